// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use stockreq_app::SubmissionRecord;

use crate::{RequestSink, SheetError, format_csv_date};

/// Flat append to the legacy shared sheet. One line per record, item
/// wrapped as `="item"` so spreadsheet tools keep it textual instead of
/// reinterpreting it as a formula or number. No header management.
#[derive(Debug, Clone)]
pub struct CsvSheet {
    path: PathBuf,
}

impl CsvSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RequestSink for CsvSheet {
    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SheetError> {
        let date = format_csv_date(record.date)?;
        let line = format!(
            "{},{},=\"{}\",{}\n",
            date, record.driver, record.item, record.quantity
        );

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| SheetError::Open {
                path: self.path.clone(),
                source,
            })?;
        file.write_all(line.as_bytes())
            .map_err(|source| SheetError::Write {
                path: self.path.clone(),
                source,
            })?;
        Ok(())
    }
}
