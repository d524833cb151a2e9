// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use std::path::PathBuf;
use stockreq_app::{ReferenceData, SubmissionRecord};
use time::{Date, Month};

const ITEMS: [(&str, &str); 6] = [
    ("Widget", "A small widget"),
    ("Washer", "Flat zinc washer, 1/4 inch"),
    ("Wing Nut", "Zinc wing nut, 1/4 inch"),
    ("Bolt", "Hex bolt, grade 5"),
    ("Bracket", "Galvanized shelf bracket"),
    ("Pallet Wrap", "Stretch film, 18 inch roll"),
];

const DRIVERS: [&str; 5] = [
    "Pat Walker",
    "Robin Gray",
    "Casey Reed",
    "Drew Bennett",
    "Morgan Price",
];

const TRUCKS: [&str; 4] = ["Truck 7", "Truck 12", "Box 3", "Flatbed 1"];

/// Reference tables used across the workspace's tests.
pub fn sample_reference() -> ReferenceData {
    ReferenceData {
        items: ITEMS
            .iter()
            .map(|(name, description)| (name.to_string(), description.to_string()))
            .collect(),
        drivers: DRIVERS.iter().map(|name| name.to_string()).collect(),
        trucks: TRUCKS.iter().map(|name| name.to_string()).collect(),
    }
}

/// The same tables as a TOML document, for config/startup tests.
pub fn reference_toml() -> String {
    let mut out = String::new();
    out.push_str("drivers = [\n");
    for driver in DRIVERS {
        out.push_str(&format!("  \"{driver}\",\n"));
    }
    out.push_str("]\n\ntrucks = [\n");
    for truck in TRUCKS {
        out.push_str(&format!("  \"{truck}\",\n"));
    }
    out.push_str("]\n\n[items]\n");
    for (name, description) in ITEMS {
        out.push_str(&format!("\"{name}\" = \"{description}\"\n"));
    }
    out
}

pub fn fixture_date() -> Date {
    Date::from_calendar_date(2026, Month::March, 4).expect("valid fixture date")
}

/// A complete record for `item`/`quantity` with fixed date, driver, and
/// truck. Override other fields with struct update syntax.
pub fn record(item: &str, quantity: i64) -> SubmissionRecord {
    SubmissionRecord {
        date: fixture_date(),
        driver: "Pat Walker".to_owned(),
        truck: "Truck 7".to_owned(),
        item: item.to_owned(),
        quantity,
    }
}

/// A temp directory plus a sheet path inside it. Keep the directory alive
/// for the duration of the test.
pub fn temp_sheet_path(file_name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp sheet directory")?;
    let path = dir.path().join(file_name);
    Ok((dir, path))
}
