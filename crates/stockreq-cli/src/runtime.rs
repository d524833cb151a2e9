// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use stockreq_app::SubmissionRecord;
use stockreq_sheet::RequestSink;

/// Bridges the TUI's persistence seam onto the configured sheet sink.
pub struct SheetRuntime {
    sink: Box<dyn RequestSink>,
}

impl SheetRuntime {
    pub fn new(sink: Box<dyn RequestSink>) -> Self {
        Self { sink }
    }
}

impl stockreq_tui::AppRuntime for SheetRuntime {
    fn append_request(&mut self, record: &SubmissionRecord) -> Result<()> {
        self.sink.append(record)?;
        Ok(())
    }
}
