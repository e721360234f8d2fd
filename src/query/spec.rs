//! Criteria specs
//!
//! The three request blobs decoded into typed structures. The grammar is
//! closed: a filter is either a range or a discrete membership, a sort is a
//! field plus direction. Unknown object keys inside a spec are ignored by
//! the deserializer; unknown field names are resolved (and dropped) later by
//! the compiler.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::errors::{CriteriaBlob, QueryError, QueryResult};

/// Free-search criteria: field name to scalar, OR-combined across fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct SearchSpec(pub BTreeMap<String, Value>);

impl SearchSpec {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A single-field filter constraint
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FilterSpec {
    /// Inclusive interval, either bound omissible
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// Set membership over listed values
    Discrete {
        #[serde(default)]
        values: Vec<Value>,
    },
}

/// Filter criteria: field name to constraint, AND-combined across fields
pub type FilterMap = BTreeMap<String, FilterSpec>;

/// Sort direction, ascending by default
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Sort criteria for the listing
#[derive(Debug, Clone, Deserialize)]
pub struct SortSpec {
    pub field: String,
    #[serde(default)]
    pub direction: SortDirection,
}

/// The three parsed criteria blobs of one listing request
#[derive(Debug, Clone, Default)]
pub struct Criteria {
    pub search: SearchSpec,
    pub filters: FilterMap,
    pub sort: Option<SortSpec>,
}

/// Parse the three optional criteria blobs.
///
/// An absent blob yields the empty spec; a present but malformed blob fails
/// the whole request with an error naming the blob.
pub fn parse_criteria(
    search: Option<&str>,
    filters: Option<&str>,
    sort: Option<&str>,
) -> QueryResult<Criteria> {
    let search = match search {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| QueryError::InvalidCriteria(CriteriaBlob::Search))?,
        None => SearchSpec::default(),
    };

    let filters = match filters {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|_| QueryError::InvalidCriteria(CriteriaBlob::Filters))?,
        None => FilterMap::new(),
    };

    let sort = match sort {
        Some(raw) => Some(
            serde_json::from_str(raw).map_err(|_| QueryError::InvalidCriteria(CriteriaBlob::Sort))?,
        ),
        None => None,
    };

    Ok(Criteria {
        search,
        filters,
        sort,
    })
}
