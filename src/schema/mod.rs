//! # Forecast Schema
//!
//! The fixed schema of the forecast dataset: the record type, the scalar
//! value model shared by predicates and aggregates, and the field registry
//! that maps field names to typed accessors.

mod record;
mod registry;
mod value;

pub use record::ForecastRecord;
pub use registry::{Field, FieldKind, SchemaRegistry};
pub use value::{parse_date, ScalarValue, DATE_FORMAT};
