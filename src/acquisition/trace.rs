//! Main test trace scanner.
//!
//! The main TSV file interleaves three kinds of lines after its preamble:
//!
//! ```text
//! Test started at 12:00:00 ...
//! \tTime\tThis Step\tStep Time\tTest Time\t...\tLoad (N)\t...\tTotal Cycles\t...
//! \t12:00:01\t1\t0.5\t0.5\t...\t25.0\t...\t120\t...
//! Fast data in test-h001.TSV
//! \t12:00:02\t1\t1.0\t1.0\t...
//! ...
//! Test finished at 14:00:00
//! ```
//!
//! Data lines start with a tab and carry scalars at fixed column positions.
//! `Fast data in` marker lines name the burst file whose acquisition began
//! at the preceding data line — that line's load, test time and total cycle
//! count become the burst's context.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{DigestError, Result};
use crate::types::BurstContext;

/// Preamble terminator: everything before this line is operator notes.
const TEST_STARTED_MARKER: &str = "Test started at";

/// Burst marker prefix.
const FAST_DATA_MARKER: &str = "Fast data in";

/// Fixed column positions in a tab-split data line.
const TEST_TIME_COL: usize = 4;
const LOAD_COL: usize = 7;
const TOTAL_CYCLES_COL: usize = 11;

/// One event of interest while scanning the trace body.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    /// A data line's scalar context, refreshed on every data line.
    Context(BurstContext),
    /// A burst marker naming the HSD file to process next.
    Burst { file_name: String },
}

/// Sequential scanner over the main trace file.
#[derive(Debug)]
pub struct TraceScanner {
    path: PathBuf,
    lines: std::io::Lines<BufReader<File>>,
    line_no: usize,
}

impl TraceScanner {
    /// Open the trace and position past the preamble and header row.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::open(&path).map_err(|e| DigestError::io(&path, e))?;
        let mut scanner = Self {
            lines: BufReader::new(file).lines(),
            path,
            line_no: 0,
        };
        scanner.skip_preamble()?;
        // The line after the start marker is the column header.
        scanner.next_line()?;
        Ok(scanner)
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_no += 1;
                let line = line.map_err(|e| DigestError::io(&self.path, e))?;
                Ok(Some(line.trim_end_matches('\r').to_string()))
            }
            None => Ok(None),
        }
    }

    fn skip_preamble(&mut self) -> Result<()> {
        while let Some(line) = self.next_line()? {
            if line.starts_with(TEST_STARTED_MARKER) {
                return Ok(());
            }
        }
        Err(DigestError::PreambleNotFound {
            path: self.path.clone(),
        })
    }

    /// Scan the trace body into its event sequence.
    ///
    /// Stops at the first line that is neither a data line nor a burst
    /// marker (normally `Test finished at ...`).
    pub fn events(mut self) -> Result<Vec<TraceEvent>> {
        let mut events = Vec::new();
        while let Some(line) = self.next_line()? {
            if line.starts_with('\t') {
                events.push(TraceEvent::Context(self.parse_context(&line)?));
            } else if let Some(rest) = line.strip_prefix(FAST_DATA_MARKER) {
                events.push(TraceEvent::Burst {
                    file_name: rest.trim().to_string(),
                });
            } else {
                break;
            }
        }
        Ok(events)
    }

    fn parse_context(&self, line: &str) -> Result<BurstContext> {
        let fields: Vec<&str> = line.split('\t').collect();
        let initial_time = self.scalar(&fields, TEST_TIME_COL, "Test Time")?;
        let initial_load = self.scalar(&fields, LOAD_COL, "Load (N)")?;
        let cycles = self.scalar(&fields, TOTAL_CYCLES_COL, "Total Cycles")?;
        if cycles < 0.0 || cycles > u32::MAX as f64 {
            return Err(DigestError::BadNumber {
                path: self.path.clone(),
                line: self.line_no,
                column: "Total Cycles".to_string(),
                value: cycles.to_string(),
            });
        }
        Ok(BurstContext {
            initial_cycle: cycles as u32,
            initial_time,
            initial_load,
        })
    }

    fn scalar(&self, fields: &[&str], idx: usize, column: &str) -> Result<f64> {
        let raw = fields.get(idx).ok_or_else(|| DigestError::ShortDataLine {
            path: self.path.clone(),
            line: self.line_no,
            column: column.to_string(),
        })?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| DigestError::BadNumber {
                path: self.path.clone(),
                line: self.line_no,
                column: column.to_string(),
                value: raw.trim().to_string(),
            })
    }
}

/// Cleaned main-trace table: header labels plus data rows, edge tab
/// artifacts and non-table lines removed.
#[derive(Debug)]
pub struct CleanTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Read the whole trace body as a cleaned table.
///
/// Keeps only rows with at most two missing fields (marker lines and the
/// `Test finished` line have almost all fields missing), then drops columns
/// that are empty in every surviving row — the leading and trailing tabs of
/// every data line produce two such phantom columns.
pub fn clean_table(path: impl AsRef<Path>) -> Result<CleanTable> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    // Skip preamble.
    let mut found = false;
    for line in lines.by_ref() {
        let line = line.map_err(|e| DigestError::io(path, e))?;
        if line.starts_with(TEST_STARTED_MARKER) {
            found = true;
            break;
        }
    }
    if !found {
        return Err(DigestError::PreambleNotFound {
            path: path.to_path_buf(),
        });
    }

    let header_line = match lines.next() {
        Some(line) => line.map_err(|e| DigestError::io(path, e))?,
        None => {
            return Ok(CleanTable {
                header: Vec::new(),
                rows: Vec::new(),
            })
        }
    };
    let header: Vec<String> = header_line
        .trim_end_matches('\r')
        .split('\t')
        .map(str::to_string)
        .collect();
    let column_count = header.len();
    // Two of the split columns are tab-edge phantoms; a real data row fills
    // everything else.
    let required = column_count.saturating_sub(2);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for line in lines {
        let line = line.map_err(|e| DigestError::io(path, e))?;
        let line = line.trim_end_matches('\r');
        let mut fields: Vec<String> = line.split('\t').map(str::to_string).collect();
        fields.resize(column_count, String::new());

        let filled = fields.iter().filter(|f| !f.trim().is_empty()).count();
        if filled >= required && required > 0 {
            rows.push(fields);
        }
    }

    // Drop columns empty across the header and every row.
    let keep: Vec<usize> = (0..column_count)
        .filter(|&i| {
            !header[i].trim().is_empty() || rows.iter().any(|r| !r[i].trim().is_empty())
        })
        .collect();

    let header = keep.iter().map(|&i| header[i].clone()).collect();
    let rows = rows
        .into_iter()
        .map(|r| keep.iter().map(|&i| r[i].clone()).collect())
        .collect();

    Ok(CleanTable { header, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    /// A data line with the scalar columns populated at their fixed slots.
    fn data_line(test_time: f64, load: f64, cycles: u32) -> String {
        let mut fields = vec!["0".to_string(); 14];
        fields[0] = String::new();
        fields[13] = String::new();
        fields[1] = "12:00:01".to_string();
        fields[TEST_TIME_COL] = test_time.to_string();
        fields[LOAD_COL] = load.to_string();
        fields[TOTAL_CYCLES_COL] = cycles.to_string();
        fields.join("\t")
    }

    fn header_line() -> String {
        let labels = [
            "", "Time", "This Step", "Step Time", "Test Time", "A", "B", "Load (N)", "C", "D",
            "E", "Total Cycles", "Stroke (mm)", "",
        ];
        labels.join("\t")
    }

    fn write_trace(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "operator notes\nmore notes\nTest started at 12:00:00\n{}\n{}",
            header_line(),
            body
        )
        .unwrap();
        file
    }

    #[test]
    fn scans_context_and_burst_markers_in_order() {
        let body = format!(
            "{}\nFast data in test-h001.TSV\n{}\nFast data in test-h002.TSV\nTest finished at 14:00:00\n",
            data_line(0.5, 25.0, 120),
            data_line(1.5, 26.0, 240),
        );
        let file = write_trace(&body);
        let events = TraceScanner::open(file.path()).unwrap().events().unwrap();

        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            TraceEvent::Context(BurstContext {
                initial_cycle: 120,
                initial_time: 0.5,
                initial_load: 25.0,
            })
        );
        assert_eq!(
            events[1],
            TraceEvent::Burst {
                file_name: "test-h001.TSV".to_string()
            }
        );
        assert_eq!(
            events[3],
            TraceEvent::Burst {
                file_name: "test-h002.TSV".to_string()
            }
        );
    }

    #[test]
    fn stops_at_test_finished() {
        let body = format!(
            "{}\nTest finished at 14:00:00\n{}\n",
            data_line(0.5, 25.0, 120),
            data_line(9.9, 99.0, 999),
        );
        let file = write_trace(&body);
        let events = TraceScanner::open(file.path()).unwrap().events().unwrap();
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn missing_preamble_marker_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "just notes\nno marker\n").unwrap();
        let err = TraceScanner::open(file.path()).unwrap_err();
        assert!(matches!(err, DigestError::PreambleNotFound { .. }));
    }

    #[test]
    fn bad_scalar_cell_errors_with_column_name() {
        let mut line = data_line(0.5, 25.0, 120);
        line = line.replace("25", "not-a-number");
        let file = write_trace(&format!("{}\n", line));
        let err = TraceScanner::open(file.path()).unwrap().events().unwrap_err();
        assert!(matches!(err, DigestError::BadNumber { column, .. } if column == "Load (N)"));
    }

    #[test]
    fn clean_table_drops_markers_and_phantom_columns() {
        let body = format!(
            "{}\nFast data in test-h001.TSV\n{}\nTest finished at 14:00:00\n",
            data_line(0.5, 25.0, 120),
            data_line(1.5, 26.0, 240),
        );
        let file = write_trace(&body);
        let table = clean_table(file.path()).unwrap();

        // Edge phantom columns removed from the 14-column header.
        assert_eq!(table.header.len(), 12);
        assert_eq!(table.header[0], "Time");
        assert_eq!(table.header.last().map(String::as_str), Some("Stroke (mm)"));
        // Marker and finish lines dropped, both data rows kept.
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][6], "25");
        assert_eq!(table.rows[1][10], "240");
    }
}
