//! CSV output writers.
//!
//! Two artifacts per test: `<name>.csv` mirroring the cleaned main trace,
//! and `<name>_HSD.csv` concatenating every burst's per-cycle summaries
//! under a single fixed header.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::acquisition::trace::CleanTable;
use crate::error::{DigestError, Result};
use crate::types::{CycleSummary, HSD_FINAL_LABELS};

/// Write the cleaned main trace table as CSV.
pub fn write_main_csv(path: impl AsRef<Path>, table: &CleanTable) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DigestError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "{}", table.header.join(",")).map_err(|e| DigestError::io(path, e))?;
    for row in &table.rows {
        writeln!(writer, "{}", row.join(",")).map_err(|e| DigestError::io(path, e))?;
    }
    writer.flush().map_err(|e| DigestError::io(path, e))?;

    tracing::info!(file = %path.display(), rows = table.rows.len(), "Main trace CSV written");
    Ok(())
}

/// Appending writer for the HSD summary CSV. The header is written once at
/// creation; burst tables are appended in encounter order.
pub struct HsdCsvWriter {
    writer: BufWriter<File>,
    path: std::path::PathBuf,
    rows_written: usize,
}

impl HsdCsvWriter {
    /// Create the output file and write the fixed header row.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path).map_err(|e| DigestError::io(&path, e))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", HSD_FINAL_LABELS.join(","))
            .map_err(|e| DigestError::io(&path, e))?;
        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    /// Append one burst's summary rows.
    pub fn append(&mut self, summaries: &[CycleSummary]) -> Result<()> {
        for s in summaries {
            writeln!(
                self.writer,
                "{},{},{},{},{},{},{}",
                s.cycle, s.stroke, s.contact_potential, s.friction, s.time, s.load, s.cof
            )
            .map_err(|e| DigestError::io(&self.path, e))?;
        }
        self.rows_written += summaries.len();
        Ok(())
    }

    /// Flush and report the total row count.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush().map_err(|e| DigestError::io(&self.path, e))?;
        tracing::info!(
            file = %self.path.display(),
            rows = self.rows_written,
            "HSD summary CSV written"
        );
        Ok(self.rows_written)
    }
}
