//! Result output
//!
//! Profiles emit one row per grid point through a [`RowSink`]. The sink
//! decides the format:
//!
//! - **text**: tab-separated table with a header row, for consoles and plotting scripts
//! - **json**: JSON lines, one object per row, for downstream tooling

pub mod json;
pub mod text;

use crate::Result;
use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One table cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Int(u64),
    Float(f64),
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Int(v) => write!(f, "{}", v),
            Cell::Float(v) => write!(f, "{:.3}", v),
        }
    }
}

impl From<u64> for Cell {
    fn from(v: u64) -> Self {
        Cell::Int(v)
    }
}

impl From<f64> for Cell {
    fn from(v: f64) -> Self {
        Cell::Float(v)
    }
}

/// Identifies a run at the top of its output
#[derive(Debug, Clone, Serialize)]
pub struct RunHeader {
    pub profile: String,
    pub columns: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub started_at: DateTime<Utc>,
}

impl RunHeader {
    pub fn new(profile: &str, columns: &[&'static str], seed: Option<u64>) -> Self {
        Self {
            profile: profile.to_string(),
            columns: columns.to_vec(),
            seed,
            started_at: Utc::now(),
        }
    }
}

/// Destination for profile rows
pub trait RowSink {
    fn begin(&mut self, header: &RunHeader) -> Result<()>;

    fn row(&mut self, cells: &[Cell]) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Build a sink writing `format` to `path`, or to stdout when no path is given
pub fn create_sink(format: OutputFormat, path: Option<&Path>) -> Result<Box<dyn RowSink>> {
    let writer: Box<dyn Write> = match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    Ok(match format {
        OutputFormat::Text => Box::new(text::TsvWriter::new(writer)),
        OutputFormat::Json => Box::new(json::JsonLinesWriter::new(writer)),
    })
}

/// Sink that keeps rows in memory
#[derive(Debug, Default)]
pub struct RowBuffer {
    pub header: Option<RunHeader>,
    pub rows: Vec<Vec<Cell>>,
    pub finished: bool,
}

impl RowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values of column `name` as floats
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let header = self.header.as_ref()?;
        let idx = header.columns.iter().position(|c| *c == name)?;
        Some(
            self.rows
                .iter()
                .map(|row| match row[idx] {
                    Cell::Int(v) => v as f64,
                    Cell::Float(v) => v,
                })
                .collect(),
        )
    }
}

impl RowSink for RowBuffer {
    fn begin(&mut self, header: &RunHeader) -> Result<()> {
        self.header = Some(header.clone());
        Ok(())
    }

    fn row(&mut self, cells: &[Cell]) -> Result<()> {
        self.rows.push(cells.to_vec());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Int(65536).to_string(), "65536");
        assert_eq!(Cell::Float(1.23456).to_string(), "1.235");
    }

    #[test]
    fn test_row_buffer_column() {
        let mut buf = RowBuffer::new();
        buf.begin(&RunHeader::new("plan", &["Stream", "Trials"], None)).unwrap();
        buf.row(&[Cell::Int(1), Cell::Int(8)]).unwrap();
        buf.row(&[Cell::Int(2), Cell::Float(4.5)]).unwrap();
        buf.finish().unwrap();
        assert!(buf.finished);
        assert_eq!(buf.column("Trials"), Some(vec![8.0, 4.5]));
        assert_eq!(buf.column("Missing"), None);
    }
}
