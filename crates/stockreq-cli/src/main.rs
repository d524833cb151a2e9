// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod config;
mod runtime;

use anyhow::{Context, Result};
use config::Config;
use runtime::SheetRuntime;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stockreq_app::{ReferenceData, RequestForm};
use stockreq_sheet::{SheetBackend, open_sink};

const DEMO_REFERENCE: &str = "\
drivers = [\"Pat Walker\", \"Robin Gray\", \"Casey Reed\"]
trucks = [\"Truck 7\", \"Truck 12\", \"Box 3\"]

[items]
\"Widget\" = \"A small widget\"
\"Washer\" = \"Flat zinc washer, 1/4 inch\"
\"Bolt\" = \"Hex bolt, grade 5\"
\"Pallet Wrap\" = \"Stretch film, 18 inch roll\"
";

fn main() {
    if let Err(error) = run() {
        eprintln!("{error:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = parse_cli_args(env::args().skip(1), Config::default_path()?)?;
    if options.show_help {
        print_help();
        return Ok(());
    }

    if options.print_config_path {
        println!("{}", options.config_path.display());
        return Ok(());
    }

    if options.print_example {
        print!("{}", Config::example_config(&options.config_path));
        return Ok(());
    }

    let config = Config::load(&options.config_path).with_context(|| {
        format!(
            "load config {}; run `stockreq --print-example-config` to generate a template",
            options.config_path.display()
        )
    })?;

    let (backend, sheet_path) = if options.demo {
        (SheetBackend::Csv, env::temp_dir().join("stockreq-demo.csv"))
    } else {
        let backend = config.sheet_backend()?;
        (backend, config.sheet_path(backend)?)
    };

    if options.print_sheet_path {
        println!("{}", sheet_path.display());
        return Ok(());
    }

    let reference = if options.demo {
        toml::from_str::<ReferenceData>(DEMO_REFERENCE)
            .context("parse built-in demo reference data")?
    } else {
        load_reference(&config.reference_path()?)?
    };
    reference.validate()?;
    let mut runtime = SheetRuntime::new(open_sink(backend, &sheet_path));
    if options.check_only {
        return Ok(());
    }

    let mut form = RequestForm::new(&reference);
    stockreq_tui::run_app(&mut form, &reference, &mut runtime)
}

fn load_reference(path: &Path) -> Result<ReferenceData> {
    let raw = fs::read_to_string(path).with_context(|| {
        format!(
            "read reference data {} -- set [reference].path or STOCKREQ_REFERENCE_PATH to the reference TOML",
            path.display()
        )
    })?;
    let reference: ReferenceData =
        toml::from_str(&raw).with_context(|| format!("parse reference data {}", path.display()))?;
    Ok(reference)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    config_path: PathBuf,
    print_config_path: bool,
    print_sheet_path: bool,
    demo: bool,
    print_example: bool,
    check_only: bool,
    show_help: bool,
}

fn parse_cli_args<I, S>(args: I, default_config_path: PathBuf) -> Result<CliOptions>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut options = CliOptions {
        config_path: default_config_path,
        print_config_path: false,
        print_sheet_path: false,
        demo: false,
        print_example: false,
        check_only: false,
        show_help: false,
    };

    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_ref() {
            "--config" => {
                let value = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a file path"))?;
                options.config_path = PathBuf::from(value.as_ref());
            }
            "--print-config-path" => {
                options.print_config_path = true;
            }
            "--print-sheet-path" => {
                options.print_sheet_path = true;
            }
            "--print-example-config" => {
                options.print_example = true;
            }
            "--demo" => {
                options.demo = true;
            }
            "--check" => {
                options.check_only = true;
            }
            "--help" | "-h" => {
                options.show_help = true;
            }
            unknown => {
                return Err(anyhow::anyhow!(
                    "unknown argument {unknown:?}; run with --help to see supported options"
                ));
            }
        }
    }

    Ok(options)
}

fn print_help() {
    println!("stockreq");
    println!("  --config <path>          Use a specific config path");
    println!("  --print-config-path      Print resolved config path");
    println!("  --print-sheet-path       Print resolved sheet path");
    println!("  --print-example-config   Print a config template");
    println!("  --demo                   Launch with built-in reference data and a temp sheet");
    println!("  --check                  Validate config, reference data, and sheet setup");
    println!("  --help                   Show this help");
}
