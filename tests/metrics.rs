//! Accuracy-metrics tests over the in-memory store.

use std::sync::Arc;

use demandcast::metrics::{MetricsAggregator, MetricsError};
use demandcast::schema::ForecastRecord;
use demandcast::store::MemoryStore;

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
fn worked_example_from_two_rows() {
    let report = aggregator(vec![row(10.0, 12.0, 10.0), row(20.0, 18.0, 20.0)])
        .report()
        .unwrap();

    assert_eq!(report.model_absolute_error, 4.0);
    assert_eq!(report.baseline_absolute_error, 0.0);
    // 4 * 100 / 30
    assert!((report.model_percentage_error - 13.333333333333334).abs() < 1e-9);
    assert_eq!(report.baseline_percentage_error, 0.0);
    // sqrt((4 + 4) / 2)
    assert_eq!(report.model_rmse, 2.0);
    assert_eq!(report.baseline_rmse, 0.0);
    assert_eq!(report.total_qty_sold, 30.0);
    assert_eq!(report.total_qty_predicted, 30.0);
    assert_eq!(report.total_qty_baseline, 30.0);
}

#[test]
fn empty_dataset_is_not_found_rather_than_zeros() {
    let err = aggregator(vec![]).report().unwrap_err();
    assert!(matches!(err, MetricsError::NoData));
    assert_eq!(err.status_code(), 404);
}

#[test]
fn zero_sales_yield_zero_percentage_error() {
    let report = aggregator(vec![row(0.0, 4.0, 2.0), row(0.0, 6.0, 1.0)])
        .report()
        .unwrap();

    assert_eq!(report.total_qty_sold, 0.0);
    assert_eq!(report.model_percentage_error, 0.0);
    assert_eq!(report.baseline_percentage_error, 0.0);
    // Absolute errors are still reported
    assert_eq!(report.model_absolute_error, 10.0);
}

#[test]
fn null_quantities_are_coerced_to_zero_not_an_error() {
    // A loaded but quantity-less dataset produces a zeroed report
    let report = aggregator(vec![ForecastRecord::default(), ForecastRecord::default()])
        .report()
        .unwrap();

    assert_eq!(report.model_absolute_error, 0.0);
    assert_eq!(report.baseline_absolute_error, 0.0);
    assert_eq!(report.model_rmse, 0.0);
    assert_eq!(report.total_qty_sold, 0.0);
}

#[test]
fn rows_with_partial_nulls_only_contribute_where_defined() {
    let mut partial = ForecastRecord::default();
    partial.sold_qty = Some(8.0);
    // forecast/consensus null: difference terms drop, totals keep the 8

    let report = aggregator(vec![row(10.0, 12.0, 10.0), partial]).report().unwrap();

    assert_eq!(report.model_absolute_error, 2.0);
    assert_eq!(report.total_qty_sold, 18.0);
    assert_eq!(report.total_qty_predicted, 12.0);
}

#[test]
fn report_covers_the_entire_dataset() {
    // Metrics deliberately ignore listing filters: every row contributes
    let report = aggregator(vec![
        row(10.0, 12.0, 10.0),
        row(20.0, 18.0, 20.0),
        row(5.0, 5.0, 5.0),
    ])
    .report()
    .unwrap();

    assert_eq!(report.total_qty_sold, 35.0);
}
