//! # Query Criteria Engine
//!
//! Decodes the `search` / `filters` / `sort` request blobs into typed specs,
//! then compiles them against the schema registry into a composable
//! predicate plus an optional ordering.
//!
//! Parsing is strict on JSON syntax (a malformed blob fails the request,
//! naming the blob) and lenient on content: unknown field names and
//! unparsable discrete date values drop their clause rather than erroring.

mod compiler;
mod errors;
mod predicate;
mod spec;

pub use compiler::{compile_listing, CompiledListing, FixedFilters};
pub use errors::{CriteriaBlob, QueryError, QueryResult};
pub use predicate::{Clause, OrderBy, Predicate};
pub use spec::{parse_criteria, Criteria, FilterMap, FilterSpec, SearchSpec, SortDirection, SortSpec};
