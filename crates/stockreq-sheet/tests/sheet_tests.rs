// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use std::fs;
use stockreq_app::SubmissionRecord;
use stockreq_sheet::{
    CsvSheet, HEADERS, RequestSink, SheetBackend, WorkbookSheet, open_sink,
};
use stockreq_testkit::{record, temp_sheet_path};
use time::{Date, Month};
use umya_spreadsheet::reader;

#[test]
fn csv_append_creates_the_file_and_writes_the_legacy_line() -> Result<()> {
    let (_dir, path) = temp_sheet_path("requests.csv")?;
    let mut sink = CsvSheet::new(&path);

    sink.append(&record("Widget", 3))?;

    let contents = fs::read_to_string(&path)?;
    assert_eq!(contents, "03/04/26,Pat Walker,=\"Widget\",3\n");
    Ok(())
}

#[test]
fn csv_append_preserves_existing_rows() -> Result<()> {
    let (_dir, path) = temp_sheet_path("requests.csv")?;
    fs::write(&path, "01/15/26,Robin Gray,=\"Bolt\",10\n")?;

    let mut sink = CsvSheet::new(&path);
    sink.append(&record("Washer", 2))?;

    let contents = fs::read_to_string(&path)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        [
            "01/15/26,Robin Gray,=\"Bolt\",10",
            "03/04/26,Pat Walker,=\"Washer\",2",
        ]
    );
    Ok(())
}

#[test]
fn csv_append_fails_with_a_persistence_error_for_a_bad_path() -> Result<()> {
    let (_dir, path) = temp_sheet_path("missing-dir")?;
    let mut sink = CsvSheet::new(path.join("requests.csv"));

    let error = sink
        .append(&record("Widget", 1))
        .expect_err("append into a missing directory should fail");
    assert!(error.to_string().contains("open sheet"));
    Ok(())
}

#[test]
fn workbook_fresh_file_gets_one_header_row_then_data_rows_in_order() -> Result<()> {
    let (_dir, path) = temp_sheet_path("requests.xlsx")?;
    let mut sink = WorkbookSheet::new(&path);

    sink.append(&record("Widget", 3))?;
    sink.append(&record("Bolt", 12))?;

    let book = reader::xlsx::read(&path)?;
    let sheet = book.get_sheet(&0).expect("worksheet");

    for (index, header) in HEADERS.iter().enumerate() {
        assert_eq!(sheet.get_value((index as u32 + 1, 1)), *header);
    }
    assert_eq!(sheet.get_highest_row(), 3);

    assert_eq!(sheet.get_value((1, 2)), "03/04/2026");
    assert_eq!(sheet.get_value((2, 2)), "Pat Walker");
    assert_eq!(sheet.get_value((3, 2)), "Truck 7");
    assert_eq!(sheet.get_value((4, 2)), "Widget");
    assert_eq!(sheet.get_value((5, 2)), "3");

    assert_eq!(sheet.get_value((4, 3)), "Bolt");
    assert_eq!(sheet.get_value((5, 3)), "12");
    Ok(())
}

#[test]
fn workbook_header_cells_are_bold() -> Result<()> {
    let (_dir, path) = temp_sheet_path("requests.xlsx")?;
    let mut sink = WorkbookSheet::new(&path);
    sink.append(&record("Widget", 3))?;

    let book = reader::xlsx::read(&path)?;
    let sheet = book.get_sheet(&0).expect("worksheet");

    for column in 1..=HEADERS.len() as u32 {
        let bold = sheet
            .get_cell((column, 1))
            .and_then(|cell| cell.get_style().get_font().as_ref().map(|font| *font.get_bold()))
            .unwrap_or(false);
        assert!(bold, "header column {column} should be bold");
    }
    Ok(())
}

#[test]
fn workbook_reopen_appends_after_existing_rows_without_a_second_header() -> Result<()> {
    let (_dir, path) = temp_sheet_path("requests.xlsx")?;

    {
        let mut sink = WorkbookSheet::new(&path);
        sink.append(&record("Widget", 3))?;
    }
    {
        let mut sink = WorkbookSheet::new(&path);
        sink.append(&SubmissionRecord {
            date: Date::from_calendar_date(2026, Month::March, 5)?,
            driver: "Robin Gray".to_owned(),
            truck: "Box 3".to_owned(),
            item: "Washer".to_owned(),
            quantity: 2,
        })?;
    }

    let book = reader::xlsx::read(&path)?;
    let sheet = book.get_sheet(&0).expect("worksheet");
    assert_eq!(sheet.get_highest_row(), 3);
    assert_eq!(sheet.get_value((1, 1)), "Date");
    assert_eq!(sheet.get_value((1, 3)), "03/05/2026");
    assert_eq!(sheet.get_value((2, 3)), "Robin Gray");
    assert_eq!(sheet.get_value((3, 3)), "Box 3");
    Ok(())
}

#[test]
fn open_sink_builds_the_configured_backend() -> Result<()> {
    let (_dir, csv_path) = temp_sheet_path("requests.csv")?;
    let mut sink = open_sink(SheetBackend::Csv, &csv_path);
    sink.append(&record("Widget", 1))?;
    assert!(csv_path.exists());

    let (_dir, workbook_path) = temp_sheet_path("requests.xlsx")?;
    let mut sink = open_sink(SheetBackend::Workbook, &workbook_path);
    sink.append(&record("Widget", 1))?;
    assert!(workbook_path.exists());
    Ok(())
}
