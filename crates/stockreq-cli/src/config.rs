// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use stockreq_sheet::SheetBackend;

pub const APP_NAME: &str = "stockreq";
const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub reference: Reference,
    #[serde(default)]
    pub sheet: Sheet,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            reference: Reference::default(),
            sheet: Sheet::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Reference {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Sheet {
    pub backend: Option<String>,
    pub path: Option<String>,
}

impl Default for Sheet {
    fn default() -> Self {
        Self {
            backend: Some(SheetBackend::Csv.as_str().to_owned()),
            path: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("STOCKREQ_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set STOCKREQ_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and place values under [reference] and [sheet]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(backend) = &self.sheet.backend
            && SheetBackend::parse(backend).is_none()
        {
            bail!(
                "sheet.backend in {} must be \"csv\" or \"workbook\", got {backend:?}",
                path.display()
            );
        }
        Ok(())
    }

    pub fn sheet_backend(&self) -> Result<SheetBackend> {
        let raw = self
            .sheet
            .backend
            .as_deref()
            .unwrap_or(SheetBackend::Csv.as_str());
        SheetBackend::parse(raw).ok_or_else(|| {
            anyhow!("unsupported sheet backend {raw:?}; use \"csv\" or \"workbook\"")
        })
    }

    /// Config value first, then the environment, then the platform data
    /// dir with a backend-appropriate file name.
    pub fn sheet_path(&self, backend: SheetBackend) -> Result<PathBuf> {
        if let Some(path) = &self.sheet.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("STOCKREQ_SHEET_PATH") {
            return Ok(PathBuf::from(path));
        }

        let data_root = dirs::data_dir().ok_or_else(|| {
            anyhow!("cannot resolve data directory; set [sheet].path or STOCKREQ_SHEET_PATH")
        })?;
        let app_dir = data_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create data directory {}", app_dir.display()))?;
        let file_name = match backend {
            SheetBackend::Csv => "requests.csv",
            SheetBackend::Workbook => "requests.xlsx",
        };
        Ok(app_dir.join(file_name))
    }

    pub fn reference_path(&self) -> Result<PathBuf> {
        if let Some(path) = &self.reference.path {
            return Ok(PathBuf::from(path));
        }
        if let Some(path) = env::var_os("STOCKREQ_REFERENCE_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set [reference].path or STOCKREQ_REFERENCE_PATH"
            )
        })?;
        Ok(config_root.join(APP_NAME).join("reference.toml"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# stockreq config\n# Place this file at: {}\n\nversion = 1\n\n[reference]\n# TOML file with an [items] table plus drivers and trucks lists.\n# Default is <config dir>/stockreq/reference.toml\n# path = \"/absolute/path/to/reference.toml\"\n\n[sheet]\n# \"csv\" appends flat lines; \"workbook\" maintains a headered spreadsheet.\nbackend = \"csv\"\n# Default is the platform data dir (for example ~/.local/share/stockreq/requests.csv).\n# The sheet is single-writer: point two machines at one path and rows can be lost.\n# path = \"/mnt/shared/requests.csv\"\n",
            path.display()
        )
    }
}
