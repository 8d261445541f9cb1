use std::fs;
use std::path::Path;

use log::warn;

use crate::errors::MarkerError;

// @module: Marker table parsing

/// Header names the audio editor exports for the columns we consume.
const COLUMN_START: &str = "Start";
const COLUMN_DURATION: &str = "Duration";
const COLUMN_NAME: &str = "Name";

// @struct: One row of the marker table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRow {
    // @field: Start timestamp string, `H:MM:SS[.fraction]` or `MM:SS[.fraction]`
    pub start: String,

    // @field: Duration in the same format as start
    pub duration: String,

    // @field: Chapter title
    pub name: String,
}

/// Ordered marker table as exported by the audio editor.
///
/// Row order defines chapter sequence; rows are never re-sorted by time.
#[derive(Debug)]
pub struct MarkerTable {
    /// Rows in file order
    pub rows: Vec<MarkerRow>,
}

impl MarkerTable {
    /// Read a tab-separated marker file.
    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self, MarkerError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|_| MarkerError::FileNotFound(path.to_path_buf()))?;
        let table = Self::parse_str(&content)?;
        if table.rows.is_empty() {
            return Err(MarkerError::EmptyTable(path.to_path_buf()));
        }
        Ok(table)
    }

    /// Parse tab-separated marker content.
    ///
    /// The first non-empty line is the header; `Start`, `Duration` and `Name`
    /// are resolved by name so extra exported columns are tolerated.
    pub fn parse_str(content: &str) -> Result<Self, MarkerError> {
        let mut lines = content.lines().filter(|line| !line.trim().is_empty());

        let header = lines
            .next()
            .ok_or_else(|| MarkerError::MissingColumn(COLUMN_START.to_string()))?;
        let columns: Vec<&str> = header.split('\t').map(str::trim).collect();

        let column_index = |name: &str| -> Result<usize, MarkerError> {
            columns
                .iter()
                .position(|c| *c == name)
                .ok_or_else(|| MarkerError::MissingColumn(name.to_string()))
        };
        let start_idx = column_index(COLUMN_START)?;
        let duration_idx = column_index(COLUMN_DURATION)?;
        let name_idx = column_index(COLUMN_NAME)?;
        let width = start_idx.max(duration_idx).max(name_idx);

        let mut rows = Vec::new();
        for (row_num, line) in lines.enumerate() {
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() <= width {
                return Err(MarkerError::TruncatedRow {
                    row: row_num + 1,
                    line: line.to_string(),
                });
            }

            let name = fields[name_idx].trim();
            if name.is_empty() {
                warn!("Marker row {} has an empty name", row_num + 1);
            }

            rows.push(MarkerRow {
                start: fields[start_idx].trim().to_string(),
                duration: fields[duration_idx].trim().to_string(),
                name: name.to_string(),
            });
        }

        Ok(MarkerTable { rows })
    }

    /// Marker names in row order, for the topics memo.
    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.name.as_str()).collect()
    }
}

/// Parse a marker timestamp to whole milliseconds.
///
/// The fractional part after `.` is discarded (truncated, never rounded).
/// `MM:SS` and `H:MM:SS` are the only accepted component counts.
pub fn parse_timestr_ms(timestr: &str) -> Result<u64, MarkerError> {
    let whole = timestr.split('.').next().unwrap_or_default();
    let components: Vec<u64> = whole
        .split(':')
        .map(|part| part.trim().parse::<u64>())
        .collect::<Result<_, _>>()
        .map_err(|_| MarkerError::InvalidTimestamp(timestr.to_string()))?;

    match components.as_slice() {
        [minutes, seconds] => Ok((minutes * 60 + seconds) * 1000),
        [hours, minutes, seconds] => Ok((hours * 3600 + minutes * 60 + seconds) * 1000),
        _ => Err(MarkerError::InvalidTimestamp(timestr.to_string())),
    }
}
