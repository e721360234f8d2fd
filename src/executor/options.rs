//! Filter options and dataset stats
//!
//! Dataset-level reads backing the filter sidebar: distinct value + count
//! lists for categorical and date fields, min/max for numeric fields, and
//! the headline stats.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::schema::{ScalarValue, SchemaRegistry, DATE_FORMAT};
use crate::store::{AggregateExpr, GroupQuery, ScalarQuery};

use super::errors::ExecutorResult;
use super::executor::QueryExecutor;

/// Categorical fields offered as discrete filter options
const CATEGORICAL_FIELDS: &[&str] = &[
    "p1_dc",
    "format",
    "city",
    "state",
    "segment_code",
    "brick_description",
    "brand",
    "segment",
    "division",
    "brick_code",
    "class_code",
    "division_code",
    "vertical",
    "status",
    "month_year",
    "region",
    "family_code",
    "super_category",
    "store_type",
];

/// Numeric fields offered as range filter options
const RANGE_FIELDS: &[&str] = &["forecast_qty", "consensus_qty", "sold_qty", "wom"];

/// Date fields offered as discrete filter options
const DATE_FIELDS: &[&str] = &["week_start_date"];

/// One distinct value with its row count
#[derive(Debug, Clone, Serialize)]
pub struct OptionCount {
    pub value: ScalarValue,
    pub count: u64,
}

/// Filter options for one field
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum FilterOptionEntry {
    /// Distinct values with counts (categorical and date fields)
    Values(Vec<OptionCount>),
    /// Observed bounds (numeric fields); zero when the dataset is empty
    Range { min: f64, max: f64 },
}

/// Headline statistics of the loaded dataset
#[derive(Debug, Clone, Serialize)]
pub struct DatasetStats {
    pub total_records: u64,
    pub week_start_dates: Vec<String>,
    pub super_categories: Vec<String>,
    pub store_types: Vec<String>,
}

impl QueryExecutor {
    /// Distinct values with counts for categorical and date fields, min/max
    /// bounds for numeric fields. Null groups are omitted.
    pub fn filter_options(&self) -> ExecutorResult<BTreeMap<String, FilterOptionEntry>> {
        let schema = SchemaRegistry::forecast();
        let mut options = BTreeMap::new();

        for name in CATEGORICAL_FIELDS.iter().chain(DATE_FIELDS) {
            let Some(field) = schema.lookup(name) else {
                continue;
            };
            let groups = self.store().fetch_groups(&GroupQuery { field })?;
            let values: Vec<OptionCount> = groups
                .into_iter()
                .filter(|g| !g.value.is_null())
                .map(|g| OptionCount {
                    value: g.value,
                    count: g.count,
                })
                .collect();
            options.insert(name.to_string(), FilterOptionEntry::Values(values));
        }

        for name in RANGE_FIELDS {
            let Some(field) = schema.lookup(name) else {
                continue;
            };
            let min = self
                .store()
                .fetch_val(&ScalarQuery::aggregate(AggregateExpr::Min(field)))?;
            let max = self
                .store()
                .fetch_val(&ScalarQuery::aggregate(AggregateExpr::Max(field)))?;
            options.insert(
                name.to_string(),
                FilterOptionEntry::Range {
                    min: min.as_f64().unwrap_or(0.0),
                    max: max.as_f64().unwrap_or(0.0),
                },
            );
        }

        Ok(options)
    }

    /// Headline stats: total rows and the distinct week/category/channel sets.
    pub fn stats(&self) -> ExecutorResult<DatasetStats> {
        let schema = SchemaRegistry::forecast();
        let total = self.store().fetch_val(&ScalarQuery::count_all())?;

        let distinct = |name: &str| -> ExecutorResult<Vec<String>> {
            let Some(field) = schema.lookup(name) else {
                return Ok(Vec::new());
            };
            let groups = self.store().fetch_groups(&GroupQuery { field })?;
            Ok(groups
                .into_iter()
                .filter_map(|g| match g.value {
                    ScalarValue::Text(v) => Some(v),
                    ScalarValue::Date(v) => Some(v.format(DATE_FORMAT).to_string()),
                    _ => None,
                })
                .collect())
        };

        Ok(DatasetStats {
            total_records: total.as_f64().unwrap_or(0.0) as u64,
            week_start_dates: distinct("week_start_date")?,
            super_categories: distinct("super_category")?,
            store_types: distinct("store_type")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ForecastRecord;
    use crate::store::MemoryStore;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn executor() -> QueryExecutor {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1);
        let rows = vec![
            ForecastRecord {
                region: Some("North".to_string()),
                super_category: Some("Beverages".to_string()),
                store_type: Some("online".to_string()),
                forecast_qty: Some(10.0),
                week_start_date: monday,
                ..Default::default()
            },
            ForecastRecord {
                region: Some("North".to_string()),
                super_category: Some("Beverages".to_string()),
                store_type: Some("offline".to_string()),
                forecast_qty: Some(30.0),
                week_start_date: monday,
                ..Default::default()
            },
        ];
        QueryExecutor::new(Arc::new(MemoryStore::with_rows(rows)))
    }

    #[test]
    fn test_categorical_options_count_distinct_values() {
        let options = executor().filter_options().unwrap();
        match &options["region"] {
            FilterOptionEntry::Values(values) => {
                assert_eq!(values.len(), 1);
                assert_eq!(values[0].count, 2);
            }
            other => panic!("expected values, got {:?}", other),
        }
    }

    #[test]
    fn test_numeric_options_report_bounds() {
        let options = executor().filter_options().unwrap();
        match options["forecast_qty"] {
            FilterOptionEntry::Range { min, max } => {
                assert_eq!(min, 10.0);
                assert_eq!(max, 30.0);
            }
            ref other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_dataset_bounds_are_zero() {
        let executor = QueryExecutor::new(Arc::new(MemoryStore::new()));
        let options = executor.filter_options().unwrap();
        match options["sold_qty"] {
            FilterOptionEntry::Range { min, max } => {
                assert_eq!(min, 0.0);
                assert_eq!(max, 0.0);
            }
            ref other => panic!("expected range, got {:?}", other),
        }
    }

    #[test]
    fn test_stats() {
        let stats = executor().stats().unwrap();
        assert_eq!(stats.total_records, 2);
        assert_eq!(stats.week_start_dates, vec!["2024-01-01".to_string()]);
        assert_eq!(stats.super_categories, vec!["Beverages".to_string()]);
        assert_eq!(
            stats.store_types,
            vec!["offline".to_string(), "online".to_string()]
        );
    }
}
