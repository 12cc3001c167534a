use super::fields::{DETECTABILITY, PROBABILITY, SEVERITY};
use super::value::CellValue;
use crate::scoring::Ratings;
use std::collections::HashMap;

/// One assessment row. Missing keys are absent cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: HashMap<String, CellValue>,
}

impl Row {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.cells.get(field)
    }

    pub fn set(&mut self, field: &str, value: CellValue) {
        self.cells.insert(field.to_string(), value);
    }

    pub fn clear(&mut self, field: &str) {
        self.cells.remove(field);
    }

    pub fn rating(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(CellValue::as_rating)
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(CellValue::as_number)
    }

    /// Inherent S/P/D ratings of this row
    pub fn ratings(&self) -> Ratings {
        Ratings::new(
            self.rating(SEVERITY),
            self.rating(PROBABILITY),
            self.rating(DETECTABILITY),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Ordered columns plus rows.
///
/// Writing a field that is not a column yet appends the column, so the
/// column list always covers every cell in every row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Same columns, no rows
    pub fn empty_like(&self) -> Self {
        Self::new(self.columns.clone())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, field: &str) -> bool {
        self.columns.iter().any(|c| c == field)
    }

    pub fn row(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn push_row(&mut self, row: Row) {
        for field in row.cells.keys() {
            self.ensure_column(field);
        }
        self.rows.push(row);
    }

    /// Mutable access to row `idx`, padding with blank rows as needed
    pub fn row_mut(&mut self, idx: usize) -> &mut Row {
        if self.rows.len() <= idx {
            self.rows.resize_with(idx + 1, Row::default);
        }
        &mut self.rows[idx]
    }

    pub fn set(&mut self, idx: usize, field: &str, value: CellValue) {
        self.ensure_column(field);
        self.row_mut(idx).set(field, value);
    }

    pub fn get(&self, idx: usize, field: &str) -> Option<&CellValue> {
        self.rows.get(idx).and_then(|r| r.get(field))
    }

    fn ensure_column(&mut self, field: &str) {
        if !self.has_column(field) {
            self.columns.push(field.to_string());
        }
    }

    /// A new table holding the rows that satisfy `predicate`
    pub fn filter_rows<F>(&self, predicate: F) -> Table
    where
        F: Fn(&Row) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_appends_unknown_column() {
        let mut table = Table::new(vec!["Hazard".to_string()]);
        table.set(0, "Mitigation", CellValue::from("Guard"));
        assert_eq!(table.columns(), ["Hazard".to_string(), "Mitigation".to_string()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Mitigation"), Some(&CellValue::from("Guard")));
        assert_eq!(table.get(0, "Hazard"), None);
    }

    #[test]
    fn test_set_keeps_column_order() {
        let mut table = Table::new(vec!["A".to_string(), "B".to_string()]);
        table.set(0, "B", CellValue::Int(1));
        table.set(0, "A", CellValue::Int(2));
        assert_eq!(table.columns(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_row_mut_pads() {
        let mut table = Table::default();
        table.row_mut(2).set("X", CellValue::Int(1));
        assert_eq!(table.len(), 3);
        assert!(table.row(0).unwrap().is_empty());
    }

    #[test]
    fn test_empty_like_drops_rows() {
        let mut table = Table::new(vec!["A".to_string()]);
        table.set(0, "A", CellValue::Int(1));
        let blank = table.empty_like();
        assert!(blank.is_empty());
        assert_eq!(blank.columns(), table.columns());
    }

    #[test]
    fn test_row_ratings() {
        let mut row = Row::default();
        row.set(SEVERITY, CellValue::Float(5.0));
        row.set(PROBABILITY, CellValue::from("4"));
        row.set(DETECTABILITY, CellValue::from("rarely"));
        assert_eq!(row.ratings(), Ratings::new(Some(5), Some(4), None));
    }
}
