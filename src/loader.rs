use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::models::RawTable;

/// Cell text read as a missing value.
const NA_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "None", "#N/A", "<NA>",
];

fn to_cell(field: &str) -> Option<String> {
    if NA_MARKERS.contains(&field) {
        None
    } else {
        Some(field.to_string())
    }
}

/// Parse CSV with a header row. Short rows are padded with missing cells,
/// surplus fields are dropped.
pub fn read_raw_table<R: Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();
    let width = columns.len();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        let mut row: Vec<Option<String>> = record.iter().take(width).map(to_cell).collect();
        row.resize(width, None);
        rows.push(row);
    }
    Ok(RawTable::new(columns, rows))
}

/// Read the export at `file_path`. `None` means the file is missing or
/// unreadable; the reason goes to the log.
pub fn load_raw_table(file_path: &Path) -> Option<RawTable> {
    if !file_path.is_file() {
        tracing::warn!(path = %file_path.display(), "source file not found");
        return None;
    }
    let file = match std::fs::File::open(file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path = %file_path.display(), error = %e, "cannot open source file");
            return None;
        }
    };
    match read_raw_table(std::io::BufReader::new(file)) {
        Ok(table) => {
            if table.is_empty() {
                tracing::warn!(path = %file_path.display(), "source file has no data rows");
            }
            tracing::info!(
                path = %file_path.display(),
                rows = table.len(),
                columns = table.columns.len(),
                "loaded source file"
            );
            Some(table)
        }
        Err(e) => {
            tracing::warn!(path = %file_path.display(), error = %e, "cannot parse source file");
            None
        }
    }
}

pub fn file_checksum(file_path: &Path) -> Result<String> {
    let data = std::fs::read(file_path)?;
    let mut hasher = Sha256::new();
    hasher.update(&data);
    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_raw_table_keeps_header_whitespace() {
        let csv = "Date , Amount,Category,Description,Recurring\n01/02/2024,5,Food,x,Yes\n";
        let table = read_raw_table(csv.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["Date ", " Amount", "Category", "Description", "Recurring"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][1].as_deref(), Some("5"));
    }

    #[test]
    fn test_read_raw_table_empty_and_na_cells_are_missing() {
        let csv = "Date,Amount,Category,Description,Recurring\n01/02/2024,,NaN,N/A, \n";
        let table = read_raw_table(csv.as_bytes()).unwrap();
        let row = &table.rows[0];
        assert_eq!(row[0].as_deref(), Some("01/02/2024"));
        assert_eq!(row[1], None);
        assert_eq!(row[2], None);
        assert_eq!(row[3], None);
        // whitespace is text, not a missing value
        assert_eq!(row[4].as_deref(), Some(" "));
    }

    #[test]
    fn test_read_raw_table_quoted_description() {
        let csv = "Date,Amount,Category,Description,Recurring\n01/02/2024,5,Food,\"\"\"Lunch\"\"\",No\n";
        let table = read_raw_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0][3].as_deref(), Some("\"Lunch\""));
    }

    #[test]
    fn test_read_raw_table_ragged_rows() {
        let csv = "Date,Amount,Category,Description,Recurring\n01/02/2024,5\n02/02/2024,1,Food,x,No,extra\n";
        let table = read_raw_table(csv.as_bytes()).unwrap();
        assert_eq!(table.rows[0].len(), 5);
        assert_eq!(table.rows[0][2], None);
        assert_eq!(table.rows[1].len(), 5);
        assert_eq!(table.rows[1][4].as_deref(), Some("No"));
    }

    #[test]
    fn test_load_raw_table_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_raw_table(&dir.path().join("nope.csv")).is_none());
        // a directory is not a readable export either
        assert!(load_raw_table(dir.path()).is_none());
    }

    #[test]
    fn test_load_raw_table_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.csv");
        std::fs::write(
            &path,
            "Date,Amount,Category,Description,Recurring\n01/02/2024,-4.50,Food,Coffee,No\n",
        )
        .unwrap();
        let table = load_raw_table(&path).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][1].as_deref(), Some("-4.50"));
    }

    #[test]
    fn test_file_checksum_is_stable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.csv");
        std::fs::write(&path, "abc").unwrap();
        assert_eq!(
            file_checksum(&path).unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
