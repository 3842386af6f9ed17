//! High speed burst file reader.
//!
//! Burst files are tab-separated with a fixed 4-line preamble, then a
//! header row naming the channels, then one row per sample:
//!
//! ```text
//! TE38 High Speed Data
//! High speed data at 1000 Hz
//! <operator notes>
//! <blank>
//! HSD Stroke\tHSD Contact Potential\tHSD Friction\tHSD Force Input
//! -4.98\t12.1\t-1.20\t0.52
//! ...
//! ```
//!
//! `HSD Stroke` and `HSD Friction` are mandatory; the other channels
//! default to zero when the column is absent. Any non-numeric cell in a
//! mapped column aborts the whole file — silent coercion would corrupt the
//! averages downstream.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use regex::Regex;

use crate::error::{DigestError, Result};
use crate::types::HsdSample;

/// Lines of instrument preamble before the header row.
const PREAMBLE_LINES: usize = 4;

/// Column indices for the channels we map, resolved from the header row.
#[derive(Debug, Default)]
struct ColumnMap {
    stroke: Option<usize>,
    contact_potential: Option<usize>,
    friction: Option<usize>,
    force_input: Option<usize>,
}

impl ColumnMap {
    fn from_header(header: &str) -> Self {
        let mut map = Self::default();
        for (idx, label) in header.split('\t').enumerate() {
            match label.trim() {
                "HSD Stroke" => map.stroke = Some(idx),
                "HSD Contact Potential" => map.contact_potential = Some(idx),
                "HSD Friction" => map.friction = Some(idx),
                "HSD Force Input" => map.force_input = Some(idx),
                _ => {}
            }
        }
        map
    }

    fn validate(&self, path: &Path) -> Result<(usize, usize)> {
        let stroke = self.stroke.ok_or_else(|| DigestError::MissingColumn {
            path: path.to_path_buf(),
            column: "HSD Stroke".to_string(),
        })?;
        let friction = self.friction.ok_or_else(|| DigestError::MissingColumn {
            path: path.to_path_buf(),
            column: "HSD Friction".to_string(),
        })?;
        Ok((stroke, friction))
    }
}

/// Read one burst file into ordered samples.
pub fn read_burst(path: impl AsRef<Path>) -> Result<Vec<HsdSample>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines().enumerate();

    // Skip the fixed instrument preamble.
    let mut header = None;
    for _ in 0..=PREAMBLE_LINES {
        match lines.next() {
            Some((_, line)) => header = Some(line.map_err(|e| DigestError::io(path, e))?),
            None => {
                return Err(DigestError::EmptyBurst {
                    path: path.to_path_buf(),
                })
            }
        }
    }
    let header = header.unwrap_or_default();

    let map = ColumnMap::from_header(&header);
    let (stroke_idx, friction_idx) = map.validate(path)?;

    let mut samples = Vec::new();
    for (line_idx, line) in lines {
        let line = line.map_err(|e| DigestError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let line_no = line_idx + 1;

        samples.push(HsdSample {
            stroke: required_field(&fields, stroke_idx, "HSD Stroke", path, line_no)?,
            friction: required_field(&fields, friction_idx, "HSD Friction", path, line_no)?,
            contact_potential: optional_field(
                &fields,
                map.contact_potential,
                "HSD Contact Potential",
                path,
                line_no,
            )?,
            force_input: optional_field(&fields, map.force_input, "HSD Force Input", path, line_no)?,
            time: 0.0,
        });
    }

    if samples.is_empty() {
        return Err(DigestError::EmptyBurst {
            path: path.to_path_buf(),
        });
    }

    tracing::debug!(file = %path.display(), samples = samples.len(), "Burst file read");
    Ok(samples)
}

fn required_field(
    fields: &[&str],
    idx: usize,
    column: &str,
    path: &Path,
    line: usize,
) -> Result<f64> {
    let raw = fields.get(idx).ok_or_else(|| DigestError::ShortDataLine {
        path: path.to_path_buf(),
        line,
        column: column.to_string(),
    })?;
    parse_cell(raw, column, path, line)
}

fn optional_field(
    fields: &[&str],
    idx: Option<usize>,
    column: &str,
    path: &Path,
    line: usize,
) -> Result<f64> {
    match idx {
        Some(idx) => required_field(fields, idx, column, path, line),
        None => Ok(0.0),
    }
}

fn parse_cell(raw: &str, column: &str, path: &Path, line: usize) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| DigestError::BadNumber {
            path: path.to_path_buf(),
            line,
            column: column.to_string(),
            value: raw.trim().to_string(),
        })
}

/// Extract the acquisition rate from the first burst file's preamble.
///
/// Scans for a line containing `High speed data` and pulls the first
/// `<number> Hz` match out of it. Fails explicitly rather than defaulting:
/// a silently wrong rate would make every time value wrong.
pub fn extract_acquisition_rate(path: impl AsRef<Path>) -> Result<f64> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| DigestError::io(path, e))?;
    let reader = BufReader::new(file);

    // Unwrap is safe: the pattern is a compile-time literal.
    #[allow(clippy::unwrap_used)]
    let rate_pattern = Regex::new(r"(\d+(?:\.\d+)?)\s*Hz").unwrap();

    for line in reader.lines() {
        let line = line.map_err(|e| DigestError::io(path, e))?;
        if !line.contains("High speed data") {
            continue;
        }
        if let Some(captures) = rate_pattern.captures(&line) {
            if let Ok(rate) = captures[1].parse::<f64>() {
                tracing::info!(rate_hz = rate, file = %path.display(), "Acquisition rate extracted");
                return Ok(rate);
            }
        }
    }

    Err(DigestError::RateNotFound {
        path: path.to_path_buf(),
    })
}
