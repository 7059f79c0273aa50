//! JSON lines output
//!
//! The first line describes the run (profile, columns, seed, start time).
//! Every following line is one object keyed by column name.

use super::{Cell, RowSink, RunHeader};
use crate::Result;
use anyhow::Context;
use serde_json::{Map, Value};
use std::io::Write;

/// Writes rows as JSON lines
pub struct JsonLinesWriter<W: Write> {
    writer: W,
    columns: Vec<&'static str>,
}

impl<W: Write> JsonLinesWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            columns: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> RowSink for JsonLinesWriter<W> {
    fn begin(&mut self, header: &RunHeader) -> Result<()> {
        self.columns = header.columns.clone();
        let line = serde_json::to_string(header).context("Failed to serialize run header")?;
        writeln!(self.writer, "{}", line)?;
        Ok(())
    }

    fn row(&mut self, cells: &[Cell]) -> Result<()> {
        let mut obj = Map::with_capacity(cells.len());
        for (name, cell) in self.columns.iter().zip(cells) {
            let value = serde_json::to_value(cell).context("Failed to serialize cell")?;
            obj.insert((*name).to_string(), value);
        }
        let line = serde_json::to_string(&Value::Object(obj)).context("Failed to serialize row")?;
        writeln!(self.writer, "{}", line)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
