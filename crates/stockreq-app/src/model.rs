// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use time::Date;

/// Static lookup tables loaded once at startup and read-only afterwards.
///
/// Item names are unique by construction: the map keys them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ReferenceData {
    #[serde(default)]
    pub items: BTreeMap<String, String>,
    #[serde(default)]
    pub drivers: Vec<String>,
    #[serde(default)]
    pub trucks: Vec<String>,
}

impl ReferenceData {
    pub fn description_for(&self, item: &str) -> Option<&str> {
        self.items.get(item).map(String::as_str)
    }

    pub fn item_names(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    pub fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            bail!("reference data has no items -- add an [items] table and retry");
        }
        if self.drivers.is_empty() {
            bail!("reference data has no drivers -- add a drivers list and retry");
        }
        if self.trucks.is_empty() {
            bail!("reference data has no trucks -- add a trucks list and retry");
        }
        Ok(())
    }
}

/// One submitted request row. Built only on successful submit, handed to
/// the sink, then dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    pub date: Date,
    pub driver: String,
    pub truck: String,
    pub item: String,
    pub quantity: i64,
}
