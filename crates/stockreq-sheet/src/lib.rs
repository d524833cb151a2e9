// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod csv;
pub mod workbook;

pub use csv::CsvSheet;
pub use workbook::WorkbookSheet;

use std::path::PathBuf;
use stockreq_app::SubmissionRecord;
use thiserror::Error;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Column headers the workbook backend maintains in row 1.
pub const HEADERS: [&str; 5] = ["Date", "Driver", "Truck", "Item", "Quantity"];

/// Legacy sheet layout: two-digit year for the flat CSV, four-digit for the
/// workbook.
const CSV_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year repr:last_two]");
const WORKBOOK_DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month]/[day]/[year]");

pub fn format_csv_date(date: Date) -> Result<String, SheetError> {
    Ok(date.format(CSV_DATE_FORMAT)?)
}

pub fn format_workbook_date(date: Date) -> Result<String, SheetError> {
    Ok(date.format(WORKBOOK_DATE_FORMAT)?)
}

/// Persistence failures are their own error kind: the caller reports them
/// without discarding the entered form values, so the user can retry the
/// submit without re-typing.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("open sheet {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("append row to {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("open workbook {}", path.display())]
    OpenWorkbook {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("workbook {} has no worksheet", path.display())]
    MissingSheet { path: PathBuf },
    #[error("save workbook {}", path.display())]
    SaveWorkbook {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
    #[error("format sheet date")]
    FormatDate(#[from] time::error::Format),
}

/// A row sink. One `append` call is one scoped open-write-close (or
/// open-modify-save) operation; no handle outlives the call. Neither
/// backend locks the file -- single-writer-only is a deployment
/// constraint.
pub trait RequestSink {
    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SheetError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetBackend {
    Csv,
    Workbook,
}

impl SheetBackend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Workbook => "workbook",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(Self::Csv),
            "workbook" => Some(Self::Workbook),
            _ => None,
        }
    }
}

/// Builds the deployment's sink. Construction does no I/O; the file is
/// touched on the first append.
pub fn open_sink(backend: SheetBackend, path: impl Into<PathBuf>) -> Box<dyn RequestSink> {
    match backend {
        SheetBackend::Csv => Box::new(CsvSheet::new(path)),
        SheetBackend::Workbook => Box::new(WorkbookSheet::new(path)),
    }
}
