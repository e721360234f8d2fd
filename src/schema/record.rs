//! Forecast record
//!
//! One row of the forecast dataset: categorical attributes of an article and
//! store, the week bucket, and the sold/forecast/consensus quantities. Every
//! field is optional; uniqueness is not enforced by this core.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One row of the forecast dataset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Surrogate identifier assigned by the store
    pub id: Option<i64>,

    pub p1_dc: Option<String>,
    pub format: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub segment_code: Option<String>,
    pub consensus_qty: Option<f64>,
    pub brick_description: Option<String>,
    pub forecast_qty: Option<f64>,
    pub brand: Option<String>,
    pub segment: Option<String>,
    pub division: Option<String>,
    pub brick_code: Option<String>,
    pub class_code: Option<String>,
    pub division_code: Option<String>,
    pub vertical: Option<String>,
    pub store_no: Option<String>,
    pub batchno: Option<String>,
    pub status: Option<String>,
    pub article_id: Option<String>,
    pub month_year: Option<String>,
    pub pin_code: Option<String>,
    pub region: Option<String>,
    pub wom: Option<i64>,
    pub family_code: Option<String>,
    pub class_description: Option<String>,
    pub sd: Option<String>,
    pub article_description: Option<String>,
    pub kvi: Option<String>,
    pub npi: Option<String>,
    pub sold_qty: Option<f64>,

    /// Monday of the forecast week
    pub week_start_date: Option<NaiveDate>,
    pub super_category: Option<String>,
    /// online/offline channel
    pub store_type: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}
