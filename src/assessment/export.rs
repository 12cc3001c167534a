use super::fields::RISK_SCORE;
use super::table::Table;
use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

/// Default file name of the high-risk export
pub const DEFAULT_EXPORT_FILE: &str = "high_risks.csv";

/// Rows whose Risk Score is at least `threshold`.
/// Rows with an absent or non-numeric Risk Score are dropped.
pub fn filter_high(table: &Table, threshold: f64) -> Table {
    table.filter_rows(|row| row.number(RISK_SCORE).is_some_and(|score| score >= threshold))
}

/// Write `table` as CSV: a header of all columns, then one record per row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(table.columns())
        .context("Failed to write CSV header")?;

    for row in table.rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|column| row.get(column).map(|v| v.to_string()).unwrap_or_default())
            .collect();
        csv_writer
            .write_record(&record)
            .context("Failed to write CSV record")?;
    }

    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Filter high risks and write them to `path` atomically.
/// Returns the number of exported rows.
pub fn export_high_csv(table: &Table, threshold: f64, path: &Path) -> Result<usize> {
    let high = filter_high(table, threshold);

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open export file at {}", path.display()))?;
    write_csv(&high, &mut file)?;
    file.commit()
        .with_context(|| format!("Failed to save export file at {}", path.display()))?;

    tracing::info!(rows = high.len(), path = %path.display(), "exported high risks");
    Ok(high.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::{CellValue, Row};

    fn to_csv_string(table: &Table) -> String {
        let mut buf = Vec::new();
        write_csv(table, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn scored_table(scores: &[Option<CellValue>]) -> Table {
        let mut table = Table::new(vec!["Hazard".to_string(), RISK_SCORE.to_string()]);
        for (i, score) in scores.iter().enumerate() {
            let mut row = Row::default();
            row.set("Hazard", CellValue::from(format!("H{}", i)));
            if let Some(score) = score {
                row.set(RISK_SCORE, score.clone());
            }
            table.push_row(row);
        }
        table
    }

    #[test]
    fn test_filter_high_keeps_only_high() {
        let table = scored_table(&[
            Some(CellValue::Int(60)),
            Some(CellValue::Int(20)),
            Some(CellValue::Int(5)),
        ]);
        let high = filter_high(&table, 40.0);
        assert_eq!(high.len(), 1);
        assert_eq!(high.get(0, RISK_SCORE), Some(&CellValue::Int(60)));
        assert_eq!(high.columns(), table.columns());
    }

    #[test]
    fn test_filter_high_boundary_and_missing() {
        let table = scored_table(&[
            Some(CellValue::Float(40.0)),
            None,
            Some(CellValue::from("pending")),
            Some(CellValue::Float(39.5)),
        ]);
        let high = filter_high(&table, 40.0);
        assert_eq!(high.len(), 1);
        assert_eq!(high.get(0, "Hazard"), Some(&CellValue::from("H0")));
    }

    #[test]
    fn test_csv_output() {
        let table = scored_table(&[Some(CellValue::Float(60.0)), None]);
        let csv = to_csv_string(&table);
        assert_eq!(csv, "Hazard,Risk Score\nH0,60\nH1,\n");
    }

    #[test]
    fn test_csv_quotes_commas() {
        let mut table = Table::default();
        table.set(0, "Mitigation", CellValue::from("Guard, then train"));
        let csv = to_csv_string(&table);
        assert_eq!(csv, "Mitigation\n\"Guard, then train\"\n");
    }

    #[test]
    fn test_export_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_EXPORT_FILE);
        let table = scored_table(&[Some(CellValue::Int(60)), Some(CellValue::Int(20))]);

        let count = export_high_csv(&table, 40.0, &path).unwrap();
        assert_eq!(count, 1);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Hazard,Risk Score\nH0,60\n");
    }
}
