//! Tab-separated text output
//!
//! The layout matches the classic characterization tables: one header line
//! of column names, then one line per stream length, tab separated.

use super::{Cell, RowSink, RunHeader};
use crate::Result;
use std::io::Write;

/// Writes rows as tab-separated text
pub struct TsvWriter<W: Write> {
    writer: W,
}

impl<W: Write> TsvWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for TsvWriter<W> {
    fn begin(&mut self, header: &RunHeader) -> Result<()> {
        writeln!(self.writer, "{}", header.columns.join("\t"))?;
        Ok(())
    }

    fn row(&mut self, cells: &[Cell]) -> Result<()> {
        let line: Vec<String> = cells.iter().map(|c| c.to_string()).collect();
        writeln!(self.writer, "{}", line.join("\t"))?;
        // rows arrive minutes apart on long runs
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
