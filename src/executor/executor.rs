//! Listing execution
//!
//! Two queries always run per listing: the paged row fetch and a count over
//! the same predicate, so `total` reflects the filtered universe rather than
//! the page.

use std::sync::Arc;

use serde::Serialize;

use crate::query::CompiledListing;
use crate::schema::ForecastRecord;
use crate::store::{PageRange, ScalarQuery, SelectQuery, Statement, Storage};

use super::errors::ExecutorResult;
use super::page::PageParams;

/// One page of a filtered listing
#[derive(Debug, Clone, Serialize)]
pub struct RecordPage {
    /// Size of the whole filtered universe
    pub total: u64,
    pub items: Vec<ForecastRecord>,
}

/// Executes compiled listings against an injected store
#[derive(Clone)]
pub struct QueryExecutor {
    store: Arc<dyn Storage>,
}

impl QueryExecutor {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self { store }
    }

    pub(crate) fn store(&self) -> &Arc<dyn Storage> {
        &self.store
    }

    /// Run a compiled listing with pagination.
    pub fn list(&self, listing: CompiledListing, page: PageParams) -> ExecutorResult<RecordPage> {
        page.validate()?;

        let select = SelectQuery {
            filter: listing.predicate.clone(),
            order: listing.order,
            range: if page.all_records {
                None
            } else {
                Some(PageRange {
                    offset: page.offset,
                    limit: page.limit,
                })
            },
        };

        let items = self.store.fetch_all(&select)?;
        let total = self.store.fetch_val(&ScalarQuery::count(listing.predicate))?;

        Ok(RecordPage {
            total: total.as_f64().unwrap_or(0.0) as u64,
            items,
        })
    }

    /// Remove every record from the dataset.
    pub fn clear(&self) -> ExecutorResult<u64> {
        Ok(self.store.execute(&Statement::Truncate)?)
    }
}
