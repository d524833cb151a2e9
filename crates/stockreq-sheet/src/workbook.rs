// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::path::{Path, PathBuf};

use stockreq_app::SubmissionRecord;
use umya_spreadsheet::{Spreadsheet, Worksheet, new_file, reader, writer};

use crate::{HEADERS, RequestSink, SheetError, format_workbook_date};

/// Workbook append: read the file if it exists (else start a fresh book in
/// memory), make sure row 1 carries the bolded column headers, write the
/// record after the current maximum row, and save over the file. Quantity
/// is stored as a number, every other column as text.
#[derive(Debug, Clone)]
pub struct WorkbookSheet {
    path: PathBuf,
}

impl WorkbookSheet {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load_or_create(&self) -> Result<Spreadsheet, SheetError> {
        if self.path.exists() {
            reader::xlsx::read(&self.path).map_err(|source| SheetError::OpenWorkbook {
                path: self.path.clone(),
                source: source.into(),
            })
        } else {
            Ok(new_file())
        }
    }
}

impl RequestSink for WorkbookSheet {
    fn append(&mut self, record: &SubmissionRecord) -> Result<(), SheetError> {
        let mut book = self.load_or_create()?;
        let sheet = book
            .get_sheet_mut(&0)
            .ok_or_else(|| SheetError::MissingSheet {
                path: self.path.clone(),
            })?;
        ensure_header_row(sheet);

        let row = sheet.get_highest_row() + 1;
        sheet
            .get_cell_mut((1, row))
            .set_value_string(format_workbook_date(record.date)?);
        sheet
            .get_cell_mut((2, row))
            .set_value_string(record.driver.clone());
        sheet
            .get_cell_mut((3, row))
            .set_value_string(record.truck.clone());
        sheet
            .get_cell_mut((4, row))
            .set_value_string(record.item.clone());
        sheet
            .get_cell_mut((5, row))
            .set_value_number(record.quantity as f64);

        writer::xlsx::write(&book, &self.path).map_err(|source| SheetError::SaveWorkbook {
            path: self.path.clone(),
            source: source.into(),
        })?;
        Ok(())
    }
}

fn ensure_header_row(sheet: &mut Worksheet) {
    let present = HEADERS
        .iter()
        .enumerate()
        .all(|(index, header)| sheet.get_value((index as u32 + 1, 1)) == *header);
    if present {
        return;
    }

    for (index, header) in HEADERS.iter().enumerate() {
        let cell = sheet.get_cell_mut((index as u32 + 1, 1));
        cell.set_value_string(*header);
        cell.get_style_mut().get_font_mut().set_bold(true);
    }
}
