//! Accuracy aggregation
//!
//! Issues the aggregate queries and derives the nine-figure report:
//! absolute error, percentage error, and RMSE for the model and the
//! consensus baseline, plus the raw quantity totals.
//!
//! The report always covers the entire dataset; listing filters do not
//! carry over. An empty dataset is a not-found condition, distinct from a
//! report of zeros.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::schema::{Field, SchemaRegistry};
use crate::store::{AggregateExpr, NumericExpr, ScalarQuery, StoreError, Storage};

/// Result type for metrics operations
pub type MetricsResult<T> = Result<T, MetricsError>;

/// Metrics computation errors
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    /// The dataset has no rows at all
    #[error("No data found for the specified filters")]
    NoData,

    /// Storage failure, surfaced opaquely
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl MetricsError {
    pub fn status_code(&self) -> u16 {
        match self {
            MetricsError::NoData => 404,
            MetricsError::Store(e) => e.status_code(),
        }
    }
}

/// Forecast accuracy compared against the consensus baseline
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccuracyReport {
    pub model_absolute_error: f64,
    pub baseline_absolute_error: f64,
    pub model_percentage_error: f64,
    pub baseline_percentage_error: f64,
    pub model_rmse: f64,
    pub baseline_rmse: f64,
    pub total_qty_sold: f64,
    pub total_qty_predicted: f64,
    pub total_qty_baseline: f64,
}

/// Computes accuracy reports from an injected store
#[derive(Clone)]
pub struct MetricsAggregator {
    store: Arc<dyn Storage>,
}

struct MetricFields {
    sold: Field,
    forecast: Field,
    consensus: Field,
}

impl MetricFields {
    fn resolve() -> Option<Self> {
        let schema = SchemaRegistry::forecast();
        Some(Self {
            sold: schema.lookup("sold_qty")?,
            forecast: schema.lookup("forecast_qty")?,
            consensus: schema.lookup("consensus_qty")?,
        })
    }
}

impl MetricsAggregator {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    /// Compute the accuracy report over the entire dataset.
    pub fn report(&self) -> MetricsResult<AccuracyReport> {
        let rows = self.store.fetch_val(&ScalarQuery::count_all())?;
        if rows.as_f64().unwrap_or(0.0) == 0.0 {
            return Err(MetricsError::NoData);
        }

        let fields = MetricFields::resolve().ok_or_else(|| {
            StoreError::Internal("forecast schema is missing a quantity field".to_string())
        })?;

        let sum = |expr: NumericExpr| -> MetricsResult<f64> {
            let value = self
                .store
                .fetch_val(&ScalarQuery::aggregate(AggregateExpr::Sum(expr)))?;
            Ok(value.as_f64().unwrap_or(0.0))
        };
        let avg = |expr: NumericExpr| -> MetricsResult<f64> {
            let value = self
                .store
                .fetch_val(&ScalarQuery::aggregate(AggregateExpr::Avg(expr)))?;
            Ok(value.as_f64().unwrap_or(0.0))
        };

        let model_abs = sum(NumericExpr::AbsDiff(fields.sold, fields.forecast))?;
        let baseline_abs = sum(NumericExpr::AbsDiff(fields.sold, fields.consensus))?;
        let total_sold = sum(NumericExpr::Column(fields.sold))?;
        let total_predicted = sum(NumericExpr::Column(fields.forecast))?;
        let total_baseline = sum(NumericExpr::Column(fields.consensus))?;
        let model_mse = avg(NumericExpr::SquaredDiff(fields.sold, fields.forecast))?;
        let baseline_mse = avg(NumericExpr::SquaredDiff(fields.sold, fields.consensus))?;

        Ok(AccuracyReport {
            model_absolute_error: model_abs,
            baseline_absolute_error: baseline_abs,
            model_percentage_error: percentage(model_abs, total_sold),
            baseline_percentage_error: percentage(baseline_abs, total_sold),
            model_rmse: model_mse.sqrt(),
            baseline_rmse: baseline_mse.sqrt(),
            total_qty_sold: total_sold,
            total_qty_predicted: total_predicted,
            total_qty_baseline: total_baseline,
        })
    }
}

/// Percentage error, defined as zero when nothing was sold.
fn percentage(abs_error: f64, total_sold: f64) -> f64 {
    if total_sold == 0.0 {
        0.0
    } else {
        abs_error * 100.0 / total_sold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ForecastRecord;
    use crate::store::MemoryStore;

    fn row(sold: f64, forecast: f64, consensus: f64) -> ForecastRecord {
        ForecastRecord {
            sold_qty: Some(sold),
            forecast_qty: Some(forecast),
            consensus_qty: Some(consensus),
            ..Default::default()
        }
    }

    fn aggregator(rows: Vec<ForecastRecord>) -> MetricsAggregator {
        MetricsAggregator::new(Arc::new(MemoryStore::with_rows(rows)))
    }

    #[test]
    fn test_worked_example() {
        let report = aggregator(vec![row(10.0, 12.0, 10.0), row(20.0, 18.0, 20.0)])
            .report()
            .unwrap();

        assert_eq!(report.model_absolute_error, 4.0);
        assert_eq!(report.baseline_absolute_error, 0.0);
        assert!((report.model_percentage_error - 400.0 / 30.0).abs() < 1e-9);
        assert_eq!(report.baseline_percentage_error, 0.0);
        assert_eq!(report.model_rmse, 2.0);
        assert_eq!(report.baseline_rmse, 0.0);
        assert_eq!(report.total_qty_sold, 30.0);
        assert_eq!(report.total_qty_predicted, 30.0);
        assert_eq!(report.total_qty_baseline, 30.0);
    }

    #[test]
    fn test_empty_dataset_is_not_found() {
        let err = aggregator(vec![]).report().unwrap_err();
        assert!(matches!(err, MetricsError::NoData));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_zero_sales_guard() {
        let report = aggregator(vec![row(0.0, 5.0, 3.0)]).report().unwrap();
        assert_eq!(report.model_percentage_error, 0.0);
        assert_eq!(report.baseline_percentage_error, 0.0);
        assert_eq!(report.model_absolute_error, 5.0);
    }

    #[test]
    fn test_rows_with_null_quantities_coerce_to_zero() {
        // One row exists but every aggregate input is null: the report is
        // computed (not a 404) with zeroed figures.
        let report = aggregator(vec![ForecastRecord::default()]).report().unwrap();
        assert_eq!(report.model_absolute_error, 0.0);
        assert_eq!(report.model_rmse, 0.0);
        assert_eq!(report.total_qty_sold, 0.0);
    }
}
