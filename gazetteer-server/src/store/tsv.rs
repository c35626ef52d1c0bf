//! Tab-separated source file reader.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::domain::{ParseError, PlaceRecord};

use super::error::StoreError;

/// Read and parse the source file at `path`.
pub fn read_source(path: &Path) -> Result<Vec<PlaceRecord>, StoreError> {
    let file = File::open(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_source(BufReader::new(file), path)
}

/// [`read_source`] on the blocking pool, for use from async code.
pub(crate) async fn load_source(path: &Path) -> Result<Vec<PlaceRecord>, StoreError> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || read_source(&path)).await?
}

/// Parse gazetteer rows from a reader.
///
/// One record per line, no header. Blank lines are skipped. Rows keep their
/// file order; a repeated id is rejected. `origin` names the source in I/O
/// errors.
pub fn parse_source(reader: impl BufRead, origin: &Path) -> Result<Vec<PlaceRecord>, StoreError> {
    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| StoreError::Io {
            path: origin.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }

        let record = PlaceRecord::from_tsv_line(&line, line_no)?;
        if !seen.insert(record.geo_name_id) {
            return Err(ParseError::DuplicateId {
                line: line_no,
                id: record.geo_name_id,
            }
            .into());
        }
        records.push(record);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeoNameId;

    fn row(id: i64, name: &str, population: &str) -> String {
        format!(
            "{id}\t{name}\t{name}\t\t55.0\t37.0\tP\tPPL\tRU\t\t48\t\t\t\t{population}\t\t144\tEurope/Moscow\t2022-12-10"
        )
    }

    #[test]
    fn parses_rows_in_file_order() {
        let data = format!("{}\n{}\n", row(2, "Omsk", "10"), row(1, "Moscow", "20"));
        let records = parse_source(data.as_bytes(), Path::new("inline")).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Omsk");
        assert_eq!(records[1].geo_name_id, GeoNameId::new(1));
    }

    #[test]
    fn skips_blank_lines() {
        let data = format!("\n{}\n\n{}\n", row(1, "Moscow", "1"), row(2, "Omsk", "2"));
        let records = parse_source(data.as_bytes(), Path::new("inline")).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn reports_line_of_bad_row() {
        let data = format!("{}\nnot a row\n", row(1, "Moscow", "1"));
        let err = parse_source(data.as_bytes(), Path::new("inline")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Parse(ParseError::FieldCount { line: 2, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let data = format!("{}\n{}\n", row(7, "Moscow", "1"), row(7, "Omsk", "2"));
        let err = parse_source(data.as_bytes(), Path::new("inline")).unwrap_err();

        assert!(matches!(
            err,
            StoreError::Parse(ParseError::DuplicateId { line: 2, .. })
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = read_source(Path::new("/nonexistent/RU.txt")).unwrap_err();
        match err {
            StoreError::Io { path, .. } => assert_eq!(path, Path::new("/nonexistent/RU.txt")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn reads_sample_dataset() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample.tsv");
        let records = read_source(&path).unwrap();

        assert_eq!(records.len(), 8);
        assert!(records.iter().any(|r| r.name == "Moscow"));
    }

    #[tokio::test]
    async fn load_source_matches_read_source() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/sample.tsv");
        let loaded = load_source(&path).await.unwrap();
        assert_eq!(loaded, read_source(&path).unwrap());
    }

    #[tokio::test]
    async fn load_source_reports_missing_file() {
        let err = load_source(Path::new("/nonexistent/RU.txt")).await.unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }
}
