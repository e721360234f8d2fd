//! Scalar value model
//!
//! The value type flowing through predicates, sorting, and aggregation.
//! Comparison semantics follow SQL: null never compares equal to anything,
//! and cross-kind comparisons never match.

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Calendar-date format accepted in discrete filter values and fixed filters.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()
}

/// A single field value of a forecast record
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl ScalarValue {
    pub fn from_text(value: &Option<String>) -> Self {
        match value {
            Some(v) => ScalarValue::Text(v.clone()),
            None => ScalarValue::Null,
        }
    }

    pub fn from_number(value: Option<f64>) -> Self {
        match value {
            Some(v) => ScalarValue::Number(v),
            None => ScalarValue::Null,
        }
    }

    pub fn from_int(value: Option<i64>) -> Self {
        match value {
            Some(v) => ScalarValue::Number(v as f64),
            None => ScalarValue::Null,
        }
    }

    pub fn from_date(value: Option<NaiveDate>) -> Self {
        match value {
            Some(v) => ScalarValue::Date(v),
            None => ScalarValue::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Equality with SQL null semantics: null equals nothing, including null.
    pub fn eq_value(&self, other: &Self) -> bool {
        match (self, other) {
            (ScalarValue::Text(a), ScalarValue::Text(b)) => a == b,
            (ScalarValue::Number(a), ScalarValue::Number(b)) => a == b,
            (ScalarValue::Date(a), ScalarValue::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Ordering within the same kind. `None` when kinds differ or either
    /// side is null, in which case a comparison clause does not match.
    pub fn cmp_same_kind(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (ScalarValue::Text(a), ScalarValue::Text(b)) => Some(a.cmp(b)),
            (ScalarValue::Number(a), ScalarValue::Number(b)) => a.partial_cmp(b),
            (ScalarValue::Date(a), ScalarValue::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Total deterministic ordering used for sorting: nulls first, then by
    /// kind (number < text < date), then natural ordering within the kind.
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        let rank = |v: &ScalarValue| -> u8 {
            match v {
                ScalarValue::Null => 0,
                ScalarValue::Number(_) => 1,
                ScalarValue::Text(_) => 2,
                ScalarValue::Date(_) => 3,
            }
        };

        match rank(self).cmp(&rank(other)) {
            Ordering::Equal => self.cmp_same_kind(other).unwrap_or(Ordering::Equal),
            unequal => unequal,
        }
    }
}

impl Serialize for ScalarValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ScalarValue::Null => serializer.serialize_none(),
            ScalarValue::Text(v) => serializer.serialize_str(v),
            ScalarValue::Number(v) => serializer.serialize_f64(*v),
            ScalarValue::Date(v) => serializer.serialize_str(&v.format(DATE_FORMAT).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-15"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
        assert_eq!(parse_date("not-a-date"), None);
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_null_equals_nothing() {
        assert!(!ScalarValue::Null.eq_value(&ScalarValue::Null));
        assert!(!ScalarValue::Null.eq_value(&ScalarValue::Number(0.0)));
    }

    #[test]
    fn test_cross_kind_comparison_is_none() {
        let text = ScalarValue::Text("10".to_string());
        let number = ScalarValue::Number(10.0);
        assert_eq!(text.cmp_same_kind(&number), None);
        assert!(!text.eq_value(&number));
    }

    #[test]
    fn test_total_cmp_orders_nulls_first() {
        let mut values = vec![
            ScalarValue::Number(2.0),
            ScalarValue::Null,
            ScalarValue::Number(1.0),
        ];
        values.sort_by(|a, b| a.total_cmp(b));
        assert!(values[0].is_null());
        assert_eq!(values[1], ScalarValue::Number(1.0));
    }

    #[test]
    fn test_date_serializes_as_iso_string() {
        let value = ScalarValue::Date(NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(serde_json::to_string(&value).unwrap(), "\"2024-03-04\"");
    }
}
