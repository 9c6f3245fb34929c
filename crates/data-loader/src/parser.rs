//! Parsers for delimited rating files.
//!
//! Two formats are understood:
//! - MovieLens `u.data`: `userId<TAB>itemId<TAB>rating<TAB>timestamp`
//! - the pipeline's own files: `userId<TAB>itemId<TAB>value[<TAB>timestamp]`
//!   (commas are accepted in place of tabs)
//!
//! Lines are parsed in parallel with Rayon; the resulting model does not
//! depend on the order in which lines finish parsing.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Anything that can turn a file into a [`DataModel`]
pub trait Parser {
    fn parse_data(&self, path: &Path) -> Result<DataModel>;
}

/// Parser for the MovieLens 100K `u.data` file.
///
/// Every line must carry a timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub struct MovielensParser;

impl Parser for MovielensParser {
    fn parse_data(&self, path: &Path) -> Result<DataModel> {
        let records = parse_records(path, true)?;
        debug!("Parsed {} MovieLens ratings from {:?}", records.len(), path);
        Ok(DataModel::from_preferences(records))
    }
}

/// Parser for files written by [`crate::persist::save_data_model`] and by the
/// recommendation writer. The timestamp column is optional.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimpleParser;

impl Parser for SimpleParser {
    fn parse_data(&self, path: &Path) -> Result<DataModel> {
        let records = parse_records(path, false)?;
        debug!("Parsed {} records from {:?}", records.len(), path);
        Ok(DataModel::from_preferences(records))
    }
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(content.lines().map(|s| s.to_string()).collect())
}

fn parse_records(path: &Path, require_timestamp: bool) -> Result<Vec<Preference>> {
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let lines = read_lines(path)?;

    lines
        .par_iter()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_trimmed = line.trim();
            if line_trimmed.is_empty() {
                return None; // Skip empty lines
            }
            Some(parse_line(line_trimmed, &file, idx + 1, require_timestamp))
        })
        .collect()
}

/// Parse one non-empty line into a [`Preference`]
fn parse_line(line: &str, file: &str, line_no: usize, require_timestamp: bool) -> Result<Preference> {
    let separator = if line.contains('\t') { '\t' } else { ',' };
    let parts: Vec<&str> = line.split(separator).map(str::trim).collect();

    let expected = if require_timestamp { 4 } else { 3 };
    if parts.len() < expected {
        return Err(DataLoadError::FieldCountMismatch {
            file: file.to_string(),
            expected,
            found: parts.len(),
            line: line_no,
        });
    }

    let user_id: UserId = parts[0].parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid userId: {}", e),
    })?;
    let item_id: ItemId = parts[1].parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid itemId: {}", e),
    })?;
    let value: f64 = parts[2].parse().map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: line_no,
        reason: format!("Invalid preference: {}", e),
    })?;

    let mut preference = Preference::new(user_id, item_id, value);
    if let Some(raw) = parts.get(3).filter(|raw| !raw.is_empty()) {
        let timestamp: i64 = raw.parse().map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("Invalid timestamp: {}", e),
        })?;
        // -1 marks "no timestamp" in files written by older tooling
        if timestamp >= 0 {
            preference = preference.with_timestamp(timestamp);
        }
    }
    Ok(preference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_movielens_line() {
        let pref = parse_line("196\t242\t3\t881250949", "u.data", 1, true).unwrap();
        assert_eq!(pref.user_id, 196);
        assert_eq!(pref.item_id, 242);
        assert_eq!(pref.value, 3.0);
        assert_eq!(pref.timestamp, Some(881250949));
    }

    #[test]
    fn test_movielens_requires_timestamp() {
        let err = parse_line("196\t242\t3", "u.data", 7, true).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::FieldCountMismatch { expected: 4, found: 3, line: 7, .. }
        ));
    }

    #[test]
    fn test_simple_line_without_timestamp() {
        let pref = parse_line("1,2,4.5", "recs_0.csv", 1, false).unwrap();
        assert_eq!(pref.value, 4.5);
        assert_eq!(pref.timestamp, None);

        let pref = parse_line("1\t2\t4.5\t-1", "train_0.csv", 1, false).unwrap();
        assert_eq!(pref.timestamp, None);
    }

    #[test]
    fn test_invalid_user_reports_line() {
        let err = parse_line("abc\t2\t4.5", "test_0.csv", 12, false).unwrap_err();
        match err {
            DataLoadError::ParseError { file, line, .. } => {
                assert_eq!(file, "test_0.csv");
                assert_eq!(line, 12);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_file_skips_blank_lines() {
        let file = write_temp("1\t10\t5\t100\n\n2\t10\t3\t200\n2\t11\t1\t300\n");
        let model = MovielensParser.parse_data(file.path()).unwrap();

        assert_eq!(model.num_users(), 2);
        assert_eq!(model.num_items(), 2);
        assert_eq!(model.timestamps(2, 11), &[300]);
    }

    #[test]
    fn test_missing_file() {
        let err = SimpleParser
            .parse_data(Path::new("/definitely/not/here.csv"))
            .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
