//! In-memory storage engine
//!
//! Evaluates the typed query grammar over a row vector behind an RwLock.
//! Sorting is stable and deterministic: nulls first, then natural ordering
//! within the field's kind.

use std::sync::RwLock;

use crate::schema::{ForecastRecord, ScalarValue};

use super::errors::{StoreError, StoreResult};
use super::query::{
    AggregateExpr, GroupCount, GroupQuery, ScalarQuery, SelectQuery, Statement,
};
use super::Storage;
use crate::query::SortDirection;

/// Row store backed by process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: RwLock<Vec<ForecastRecord>>,
    next_id: RwLock<i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with rows (ids assigned where missing)
    pub fn with_rows(rows: Vec<ForecastRecord>) -> Self {
        let store = Self::new();
        // Seeding cannot fail on a fresh store's locks
        let _ = store.execute(&Statement::Insert(rows));
        store
    }

    fn read_rows(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Vec<ForecastRecord>>> {
        self.rows
            .read()
            .map_err(|_| StoreError::Internal("row lock poisoned".to_string()))
    }
}

impl Storage for MemoryStore {
    fn fetch_all(&self, query: &SelectQuery) -> StoreResult<Vec<ForecastRecord>> {
        let rows = self.read_rows()?;

        let mut matched: Vec<ForecastRecord> = rows
            .iter()
            .filter(|r| query.filter.matches(r))
            .cloned()
            .collect();

        if let Some(order) = &query.order {
            matched.sort_by(|a, b| {
                let ordering = order
                    .field
                    .value_of(a)
                    .total_cmp(&order.field.value_of(b));
                match order.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        if let Some(range) = query.range {
            matched = matched
                .into_iter()
                .skip(range.offset)
                .take(range.limit)
                .collect();
        }

        Ok(matched)
    }

    fn fetch_val(&self, query: &ScalarQuery) -> StoreResult<ScalarValue> {
        let rows = self.read_rows()?;
        let matched = rows.iter().filter(|r| query.filter.matches(r));

        let value = match query.aggregate {
            AggregateExpr::CountRows => ScalarValue::Number(matched.count() as f64),
            AggregateExpr::Sum(expr) => {
                let values: Vec<f64> = matched.filter_map(|r| expr.eval(r)).collect();
                if values.is_empty() {
                    ScalarValue::Null
                } else {
                    ScalarValue::Number(values.iter().sum())
                }
            }
            AggregateExpr::Avg(expr) => {
                let values: Vec<f64> = matched.filter_map(|r| expr.eval(r)).collect();
                if values.is_empty() {
                    ScalarValue::Null
                } else {
                    ScalarValue::Number(values.iter().sum::<f64>() / values.len() as f64)
                }
            }
            AggregateExpr::Min(field) => matched
                .map(|r| field.value_of(r))
                .filter(|v| !v.is_null())
                .min_by(|a, b| a.total_cmp(b))
                .unwrap_or(ScalarValue::Null),
            AggregateExpr::Max(field) => matched
                .map(|r| field.value_of(r))
                .filter(|v| !v.is_null())
                .max_by(|a, b| a.total_cmp(b))
                .unwrap_or(ScalarValue::Null),
        };

        Ok(value)
    }

    fn fetch_groups(&self, query: &GroupQuery) -> StoreResult<Vec<GroupCount>> {
        let rows = self.read_rows()?;

        let mut groups: Vec<GroupCount> = Vec::new();
        for row in rows.iter() {
            let value = query.field.value_of(row);
            match groups.iter_mut().find(|g| {
                g.value.eq_value(&value) || (g.value.is_null() && value.is_null())
            }) {
                Some(group) => group.count += 1,
                None => groups.push(GroupCount { value, count: 1 }),
            }
        }

        groups.sort_by(|a, b| a.value.total_cmp(&b.value));
        Ok(groups)
    }

    fn execute(&self, statement: &Statement) -> StoreResult<u64> {
        let mut rows = self
            .rows
            .write()
            .map_err(|_| StoreError::Internal("row lock poisoned".to_string()))?;
        let mut next_id = self
            .next_id
            .write()
            .map_err(|_| StoreError::Internal("id lock poisoned".to_string()))?;

        match statement {
            Statement::Insert(new_rows) => {
                for row in new_rows {
                    let mut row = row.clone();
                    if row.id.is_none() {
                        *next_id += 1;
                        row.id = Some(*next_id);
                    } else {
                        *next_id = (*next_id).max(row.id.unwrap_or(0));
                    }
                    rows.push(row);
                }
                Ok(new_rows.len() as u64)
            }
            Statement::Truncate => {
                let affected = rows.len() as u64;
                rows.clear();
                Ok(affected)
            }
        }
    }
}
