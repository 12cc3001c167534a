use super::fields::SHEET_NAME;
use super::table::{Row, Table};
use super::value::CellValue;
use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error("Failed to open workbook {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {} has no 'Assessment' sheet (found: {})", .path.display(), .found.join(", "))]
    MissingSheet { path: PathBuf, found: Vec<String> },

    #[error("Failed to read 'Assessment' sheet of {}: {source}", .path.display())]
    Sheet {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },
}

/// Read the Assessment sheet of a workbook.
///
/// The first row is the header; blank header cells become `Unnamed: N` and
/// repeated names get a `.N` suffix. Fully blank rows are skipped.
pub fn read_assessment(path: &Path) -> Result<Table, AssessmentError> {
    let mut workbook = open_workbook_auto(path).map_err(|source| AssessmentError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names();
    if !sheet_names.iter().any(|name| name == SHEET_NAME) {
        return Err(AssessmentError::MissingSheet {
            path: path.to_path_buf(),
            found: sheet_names,
        });
    }

    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|source| AssessmentError::Sheet {
            path: path.to_path_buf(),
            source,
        })?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(Table::default());
    };

    let columns = unique_columns(header.iter().enumerate().map(|(i, cell)| match cell_value(cell) {
        Some(value) => value.to_string(),
        None => format!("Unnamed: {}", i),
    }));

    let mut table = Table::new(columns.clone());
    for cells in rows {
        let mut row = Row::default();
        for (column, cell) in columns.iter().zip(cells) {
            if let Some(value) = cell_value(cell) {
                row.set(column, value);
            }
        }
        if !row.is_empty() {
            table.push_row(row);
        }
    }

    tracing::debug!(
        path = %path.display(),
        columns = table.columns().len(),
        rows = table.len(),
        "read assessment sheet"
    );
    Ok(table)
}

/// Load the template workbook. A missing file is an empty table.
pub fn load_template(path: Option<&Path>) -> Result<Table> {
    let Some(path) = path else {
        return Ok(Table::default());
    };

    if !path.exists() {
        tracing::debug!(path = %path.display(), "template not found, starting from an empty table");
        return Ok(Table::default());
    }

    read_assessment(path).with_context(|| format!("Failed to load template {}", path.display()))
}

/// Rename repeated header names to `name.1`, `name.2`, ... so that every
/// column keeps its own cells.
fn unique_columns(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut columns = Vec::new();
    for name in names {
        let mut column = name.clone();
        let mut n = 1;
        while seen.contains(&column) {
            column = format!("{}.{}", name, n);
            n += 1;
        }
        seen.insert(column.clone());
        columns.push(column);
    }
    columns
}

fn cell_value(cell: &Data) -> Option<CellValue> {
    match cell {
        Data::Empty => None,
        Data::Int(n) => Some(CellValue::Int(*n)),
        Data::Float(f) => Some(CellValue::Float(*f)),
        Data::String(s) if s.trim().is_empty() => None,
        Data::String(s) => Some(CellValue::Text(s.clone())),
        other => Some(CellValue::Text(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::fields::{RISK_SCORE, SEVERITY};
    use rust_xlsxwriter::Workbook;

    fn write_workbook(path: &Path, sheet: &str) {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet).unwrap();
        worksheet.write_string(0, 0, "Hazard").unwrap();
        worksheet.write_string(0, 1, SEVERITY).unwrap();
        worksheet.write_string(0, 2, RISK_SCORE).unwrap();
        worksheet.write_string(1, 0, "Slip").unwrap();
        worksheet.write_number(1, 1, 5.0).unwrap();
        worksheet.write_number(1, 2, 60.0).unwrap();
        worksheet.write_string(3, 0, "Fall").unwrap();
        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_assessment_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.xlsx");
        write_workbook(&path, SHEET_NAME);

        let table = read_assessment(&path).unwrap();
        assert_eq!(
            table.columns(),
            ["Hazard".to_string(), SEVERITY.to_string(), RISK_SCORE.to_string()]
        );
        // Blank row 2 is skipped
        assert_eq!(table.len(), 2);
        assert_eq!(table.row(0).unwrap().rating(SEVERITY), Some(5));
        assert_eq!(table.row(0).unwrap().number(RISK_SCORE), Some(60.0));
        assert_eq!(table.get(1, "Hazard"), Some(&CellValue::from("Fall")));
        assert_eq!(table.get(1, RISK_SCORE), None);
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.xlsx");
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME).unwrap();
        worksheet.write_string(0, 0, "Notes").unwrap();
        worksheet.write_string(0, 1, "Notes").unwrap();
        worksheet.write_string(0, 2, RISK_SCORE).unwrap();
        worksheet.write_string(1, 0, "first").unwrap();
        worksheet.write_string(1, 1, "second").unwrap();
        worksheet.write_number(1, 2, 60.0).unwrap();
        workbook.save(&path).unwrap();

        let table = read_assessment(&path).unwrap();
        assert_eq!(
            table.columns(),
            ["Notes".to_string(), "Notes.1".to_string(), RISK_SCORE.to_string()]
        );
        assert_eq!(table.get(0, "Notes"), Some(&CellValue::from("first")));
        assert_eq!(table.get(0, "Notes.1"), Some(&CellValue::from("second")));

        let mut csv = Vec::new();
        crate::assessment::write_csv(&table, &mut csv).unwrap();
        assert_eq!(
            String::from_utf8(csv).unwrap(),
            "Notes,Notes.1,Risk Score\nfirst,second,60\n"
        );
    }

    #[test]
    fn test_unique_columns_skips_taken_suffixes() {
        let names = ["A", "A.1", "A", "B", "A"].map(String::from);
        assert_eq!(unique_columns(names.into_iter()), ["A", "A.1", "A.2", "B", "A.3"]);
    }

    #[test]
    fn test_missing_sheet_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.xlsx");
        write_workbook(&path, "Sheet1");

        let err = read_assessment(&path).unwrap_err();
        match err {
            AssessmentError::MissingSheet { found, .. } => assert_eq!(found, vec!["Sheet1"]),
            other => panic!("expected MissingSheet, got {:?}", other),
        }
    }

    #[test]
    fn test_not_a_workbook_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk.xlsx");
        std::fs::write(&path, b"definitely not a zip archive").unwrap();

        assert!(matches!(read_assessment(&path), Err(AssessmentError::Open { .. })));
    }

    #[test]
    fn test_missing_template_is_empty_table() {
        let dir = tempfile::tempdir().unwrap();
        let table = load_template(Some(&dir.path().join("risk_template.xlsx"))).unwrap();
        assert!(table.is_empty());
        assert!(table.columns().is_empty());

        assert!(load_template(None).unwrap().is_empty());
    }

    #[test]
    fn test_template_is_loaded_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("risk_template.xlsx");
        write_workbook(&path, SHEET_NAME);
        let table = load_template(Some(&path)).unwrap();
        assert_eq!(table.len(), 2);
    }
}
