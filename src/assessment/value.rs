use std::fmt;

/// A single non-empty cell. Absent cells are represented by `None` at the
/// row level.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Integer rating, if this cell holds one.
    ///
    /// Spreadsheet numbers arrive as floats, so integral floats count. Text is
    /// accepted when it parses as an integer after trimming.
    pub fn as_rating(&self) -> Option<i64> {
        match self {
            CellValue::Int(n) => Some(*n),
            CellValue::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                    Some(*f as i64)
                } else {
                    None
                }
            }
            CellValue::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Numeric value for comparisons against score thresholds
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Int(n) => Some(*n as f64),
            CellValue::Float(f) if !f.is_nan() => Some(*f),
            CellValue::Float(_) => None,
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|f| !f.is_nan()),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Int(n) => write!(f, "{}", n),
            CellValue::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.0}", x),
            CellValue::Float(x) => write!(f, "{}", x),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Int(n)
    }
}

impl From<f64> for CellValue {
    fn from(x: f64) -> Self {
        CellValue::Float(x)
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_from_int_and_integral_float() {
        assert_eq!(CellValue::Int(4).as_rating(), Some(4));
        assert_eq!(CellValue::Float(3.0).as_rating(), Some(3));
    }

    #[test]
    fn test_rating_rejects_fractional_float() {
        assert_eq!(CellValue::Float(2.5).as_rating(), None);
        assert_eq!(CellValue::Float(f64::NAN).as_rating(), None);
        assert_eq!(CellValue::Float(f64::INFINITY).as_rating(), None);
    }

    #[test]
    fn test_rating_from_text() {
        assert_eq!(CellValue::from(" 5 ").as_rating(), Some(5));
        assert_eq!(CellValue::from("high").as_rating(), None);
        assert_eq!(CellValue::from("").as_rating(), None);
    }

    #[test]
    fn test_number_from_text() {
        assert_eq!(CellValue::from("42.5").as_number(), Some(42.5));
        assert_eq!(CellValue::from("n/a").as_number(), None);
        assert_eq!(CellValue::from("NaN").as_number(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::Int(60).to_string(), "60");
        assert_eq!(CellValue::Float(60.0).to_string(), "60");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::from("Guard rail").to_string(), "Guard rail");
    }
}
