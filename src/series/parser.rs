//! Parser for the distro-info CSV dialect
//!
//! Rows look like:
//!
//! ```text
//! version,codename,series,created,release,eol,eol-server
//! 12.04 LTS,Precise Pangolin,precise,2011-10-13,2012-04-26,2017-04-26
//! ```
//!
//! The header row is skipped. Only the first three columns are required.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::series::error::SeriesError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// One parsed distro-info row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesRecord {
    /// Numeric version with any qualifier removed (e.g. "12.04")
    pub version: String,
    /// Full release name (e.g. "Precise Pangolin")
    pub name: String,
    pub codename: String,
    pub lts: bool,
    pub created: Option<NaiveDate>,
    pub release: Option<NaiveDate>,
    pub eol: Option<NaiveDate>,
    pub eol_server: Option<NaiveDate>,
}

/// Parse the whole table into records, in file order.
pub fn parse_distro_info(content: &str) -> Result<Vec<SeriesRecord>, SeriesError> {
    let mut rows = content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty());

    // Header
    if rows.next().is_none() {
        return Ok(Vec::new());
    }

    rows.map(|(line_no, line)| parse_row(line_no, line)).collect()
}

fn parse_row(line_no: usize, line: &str) -> Result<SeriesRecord, SeriesError> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();

    if fields.len() < 3 {
        return Err(SeriesError::MalformedSource {
            line: line_no,
            reason: format!("expected at least 3 fields, found {}", fields.len()),
        });
    }

    let (version, lts) = split_version(fields[0]);
    if version.is_empty() {
        return Err(SeriesError::MalformedSource {
            line: line_no,
            reason: "empty version field".to_string(),
        });
    }

    let codename = fields[2];
    if codename.is_empty() {
        return Err(SeriesError::MalformedSource {
            line: line_no,
            reason: "empty series field".to_string(),
        });
    }

    let date = |index: usize| parse_date(line_no, fields.get(index).copied());

    Ok(SeriesRecord {
        version: version.to_string(),
        name: fields[1].to_string(),
        codename: codename.to_string(),
        lts,
        created: date(3),
        release: date(4),
        eol: date(5),
        eol_server: date(6),
    })
}

/// Split a version field into its numeric part and whether it is marked LTS.
pub fn split_version(field: &str) -> (&str, bool) {
    let field = field.trim();
    match field.split_once(char::is_whitespace) {
        Some((version, qualifier)) => (version, qualifier.contains("LTS")),
        None => (field, false),
    }
}

fn parse_date(line_no: usize, field: Option<&str>) -> Option<NaiveDate> {
    let field = field.filter(|f| !f.is_empty())?;
    NaiveDate::parse_from_str(field, DATE_FORMAT)
        .inspect_err(|e| debug!("Ignoring date {:?} on line {}: {}", field, line_no, e))
        .ok()
}
