//! Predicate expressions
//!
//! The compiled boolean filter over forecast records: an AND-set of filter
//! clauses plus an OR-set of search clauses. Pure data with an in-process
//! evaluator; storage backends translate the same structure into their own
//! query language.

use crate::schema::{Field, ForecastRecord, ScalarValue};

use super::spec::SortDirection;

/// A single compiled clause against one field
#[derive(Debug, Clone)]
pub enum Clause {
    /// field >= value
    GtEq(Field, ScalarValue),
    /// field <= value
    LtEq(Field, ScalarValue),
    /// field == value
    Eq(Field, ScalarValue),
    /// field ∈ values
    In(Field, Vec<ScalarValue>),
    /// case-insensitive substring match on a text field
    ContainsNoCase(Field, String),
}

impl Clause {
    /// Whether a record satisfies this clause. Null field values never match.
    pub fn matches(&self, record: &ForecastRecord) -> bool {
        match self {
            Clause::GtEq(field, value) => field
                .value_of(record)
                .cmp_same_kind(value)
                .is_some_and(|ord| ord.is_ge()),
            Clause::LtEq(field, value) => field
                .value_of(record)
                .cmp_same_kind(value)
                .is_some_and(|ord| ord.is_le()),
            Clause::Eq(field, value) => field.value_of(record).eq_value(value),
            Clause::In(field, values) => {
                let actual = field.value_of(record);
                values.iter().any(|v| actual.eq_value(v))
            }
            Clause::ContainsNoCase(field, needle) => match field.value_of(record) {
                ScalarValue::Text(text) => {
                    text.to_lowercase().contains(&needle.to_lowercase())
                }
                _ => false,
            },
        }
    }
}

/// A compiled filter: every `all` clause must hold, and at least one `any`
/// clause when the set is non-empty.
#[derive(Debug, Clone, Default)]
pub struct Predicate {
    /// AND-combined clauses (fixed filters plus per-field filter criteria)
    pub all: Vec<Clause>,
    /// OR-combined clauses (search criteria)
    pub any: Vec<Clause>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.all.is_empty() && self.any.is_empty()
    }

    /// Whether a record satisfies the whole predicate
    pub fn matches(&self, record: &ForecastRecord) -> bool {
        self.all.iter().all(|c| c.matches(record))
            && (self.any.is_empty() || self.any.iter().any(|c| c.matches(record)))
    }
}

/// Ordering applied to a listing
#[derive(Debug, Clone, Copy)]
pub struct OrderBy {
    pub field: Field,
    pub direction: SortDirection,
}
