//! Typed query descriptions
//!
//! The small closed grammar a storage backend must execute: filtered row
//! fetches with ordering and a page range, scalar aggregates over column or
//! difference expressions, per-field grouping, and two mutating statements.
//! This is deliberately not a general query planner.

use crate::query::{OrderBy, Predicate};
use crate::schema::{Field, ForecastRecord, ScalarValue};

/// Offset/limit window applied after filtering and ordering
#[derive(Debug, Clone, Copy)]
pub struct PageRange {
    pub offset: usize,
    pub limit: usize,
}

/// A filtered, optionally sorted and paged row fetch
#[derive(Debug, Clone, Default)]
pub struct SelectQuery {
    pub filter: Predicate,
    pub order: Option<OrderBy>,
    /// `None` returns the full filtered set (the bulk-export escape hatch)
    pub range: Option<PageRange>,
}

impl SelectQuery {
    pub fn filtered(filter: Predicate) -> Self {
        Self {
            filter,
            ..Default::default()
        }
    }
}

/// Per-row numeric expression feeding an aggregate
#[derive(Debug, Clone, Copy)]
pub enum NumericExpr {
    /// The field's own value
    Column(Field),
    /// `abs(a - b)`; null when either side is null
    AbsDiff(Field, Field),
    /// `(a - b)^2`; null when either side is null
    SquaredDiff(Field, Field),
}

impl NumericExpr {
    /// Evaluate against one record. Nulls propagate like SQL.
    pub fn eval(&self, record: &ForecastRecord) -> Option<f64> {
        match self {
            NumericExpr::Column(field) => field.value_of(record).as_f64(),
            NumericExpr::AbsDiff(a, b) => {
                let a = a.value_of(record).as_f64()?;
                let b = b.value_of(record).as_f64()?;
                Some((a - b).abs())
            }
            NumericExpr::SquaredDiff(a, b) => {
                let a = a.value_of(record).as_f64()?;
                let b = b.value_of(record).as_f64()?;
                Some((a - b).powi(2))
            }
        }
    }
}

/// Aggregate function over the filtered row set
#[derive(Debug, Clone, Copy)]
pub enum AggregateExpr {
    /// `COUNT(*)`
    CountRows,
    /// Sum of non-null expression values; null when none
    Sum(NumericExpr),
    /// Mean of non-null expression values; null when none
    Avg(NumericExpr),
    /// Smallest non-null field value; null when none
    Min(Field),
    /// Largest non-null field value; null when none
    Max(Field),
}

/// An aggregate query returning a single scalar
#[derive(Debug, Clone)]
pub struct ScalarQuery {
    pub filter: Predicate,
    pub aggregate: AggregateExpr,
}

impl ScalarQuery {
    /// Count all rows, unfiltered
    pub fn count_all() -> Self {
        Self {
            filter: Predicate::default(),
            aggregate: AggregateExpr::CountRows,
        }
    }

    /// Count rows matching a filter
    pub fn count(filter: Predicate) -> Self {
        Self {
            filter,
            aggregate: AggregateExpr::CountRows,
        }
    }

    /// Unfiltered aggregate over the whole dataset
    pub fn aggregate(aggregate: AggregateExpr) -> Self {
        Self {
            filter: Predicate::default(),
            aggregate,
        }
    }
}

/// Group the whole dataset by one field
#[derive(Debug, Clone, Copy)]
pub struct GroupQuery {
    pub field: Field,
}

/// One distinct value with its row count
#[derive(Debug, Clone)]
pub struct GroupCount {
    pub value: ScalarValue,
    pub count: u64,
}

/// Mutating statements supported by the store
#[derive(Debug, Clone)]
pub enum Statement {
    /// Append rows; the store assigns surrogate ids to rows without one
    Insert(Vec<ForecastRecord>),
    /// Remove every row
    Truncate,
}
