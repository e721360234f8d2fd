//! Predicate compiler
//!
//! Maps parsed criteria onto the field registry, producing the executable
//! predicate and ordering. Field references that miss the registry drop
//! their clause only; the rest of the request proceeds.

use serde_json::Value;

use crate::schema::{parse_date, Field, FieldKind, ScalarValue, SchemaRegistry};

use super::errors::{QueryError, QueryResult};
use super::predicate::{Clause, OrderBy, Predicate};
use super::spec::{Criteria, FilterSpec};

/// Fixed top-level listing filters, AND-ed into every request
#[derive(Debug, Clone, Default)]
pub struct FixedFilters {
    pub week_start_date: Option<String>,
    pub super_category: Option<String>,
    pub store_type: Option<String>,
}

/// A fully compiled listing request
#[derive(Debug, Clone, Default)]
pub struct CompiledListing {
    pub predicate: Predicate,
    pub order: Option<OrderBy>,
}

/// Compile fixed filters plus parsed criteria into a predicate and ordering.
///
/// Fails only on a malformed fixed `week_start_date`; everything else
/// degrades by dropping the offending clause.
pub fn compile_listing(
    schema: &SchemaRegistry,
    fixed: &FixedFilters,
    criteria: &Criteria,
) -> QueryResult<CompiledListing> {
    let mut predicate = Predicate::default();

    compile_fixed(schema, fixed, &mut predicate)?;

    for (name, spec) in &criteria.filters {
        let Some(field) = schema.lookup(name) else {
            continue;
        };
        compile_filter(field, spec, &mut predicate.all);
    }

    for (name, value) in &criteria.search.0 {
        let Some(field) = schema.lookup(name) else {
            continue;
        };
        if let Some(clause) = compile_search(field, value) {
            predicate.any.push(clause);
        }
    }

    let order = criteria.sort.as_ref().and_then(|sort| {
        schema.lookup(&sort.field).map(|field| OrderBy {
            field,
            direction: sort.direction,
        })
    });

    Ok(CompiledListing { predicate, order })
}

fn compile_fixed(
    schema: &SchemaRegistry,
    fixed: &FixedFilters,
    predicate: &mut Predicate,
) -> QueryResult<()> {
    if let Some(raw) = &fixed.week_start_date {
        let date = parse_date(raw).ok_or(QueryError::InvalidDate)?;
        if let Some(field) = schema.lookup("week_start_date") {
            predicate.all.push(Clause::Eq(field, ScalarValue::Date(date)));
        }
    }
    if let Some(value) = &fixed.super_category {
        if let Some(field) = schema.lookup("super_category") {
            predicate
                .all
                .push(Clause::Eq(field, ScalarValue::Text(value.clone())));
        }
    }
    if let Some(value) = &fixed.store_type {
        if let Some(field) = schema.lookup("store_type") {
            predicate
                .all
                .push(Clause::Eq(field, ScalarValue::Text(value.clone())));
        }
    }
    Ok(())
}

fn compile_filter(field: Field, spec: &FilterSpec, clauses: &mut Vec<Clause>) {
    match spec {
        FilterSpec::Range { min, max } => {
            if let Some(min) = min {
                clauses.push(Clause::GtEq(field, ScalarValue::Number(*min)));
            }
            if let Some(max) = max {
                clauses.push(Clause::LtEq(field, ScalarValue::Number(*max)));
            }
        }
        FilterSpec::Discrete { values } => {
            let converted: Vec<ScalarValue> = values
                .iter()
                .filter_map(|v| convert_value(field.kind(), v))
                .collect();
            if !converted.is_empty() {
                clauses.push(Clause::In(field, converted));
            }
        }
    }
}

/// Convert one JSON scalar into the field's kind; unconvertible values are
/// skipped rather than failing the request.
fn convert_value(kind: FieldKind, value: &Value) -> Option<ScalarValue> {
    match kind {
        FieldKind::Text => match value {
            Value::String(s) => Some(ScalarValue::Text(s.clone())),
            Value::Number(n) => Some(ScalarValue::Text(n.to_string())),
            _ => None,
        },
        FieldKind::Number => match value {
            Value::Number(n) => n.as_f64().map(ScalarValue::Number),
            Value::String(s) => s.trim().parse::<f64>().ok().map(ScalarValue::Number),
            _ => None,
        },
        FieldKind::Date => value
            .as_str()
            .and_then(parse_date)
            .map(ScalarValue::Date),
    }
}

fn compile_search(field: Field, value: &Value) -> Option<Clause> {
    match field.kind() {
        FieldKind::Text => {
            let needle = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                _ => return None,
            };
            Some(Clause::ContainsNoCase(field, needle))
        }
        FieldKind::Number | FieldKind::Date => {
            convert_value(field.kind(), value).map(|v| Clause::Eq(field, v))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::spec::parse_criteria;
    use crate::schema::ForecastRecord;
    use chrono::NaiveDate;

    fn compile(filters: Option<&str>, search: Option<&str>, sort: Option<&str>) -> CompiledListing {
        let criteria = parse_criteria(search, filters, sort).unwrap();
        compile_listing(
            SchemaRegistry::forecast(),
            &FixedFilters::default(),
            &criteria,
        )
        .unwrap()
    }

    #[test]
    fn test_unknown_filter_field_is_dropped() {
        let listing = compile(
            Some(r#"{"nonexistent_field":{"type":"range","min":1}}"#),
            None,
            None,
        );
        assert!(listing.predicate.is_empty());
    }

    #[test]
    fn test_range_compiles_both_bounds() {
        let listing = compile(
            Some(r#"{"forecast_qty":{"type":"range","min":10,"max":100}}"#),
            None,
            None,
        );
        assert_eq!(listing.predicate.all.len(), 2);
    }

    #[test]
    fn test_boundless_range_is_a_noop() {
        let listing = compile(Some(r#"{"forecast_qty":{"type":"range"}}"#), None, None);
        assert!(listing.predicate.is_empty());
    }

    #[test]
    fn test_discrete_dates_skip_unparsable_values() {
        let listing = compile(
            Some(r#"{"week_start_date":{"type":"discrete","values":["2024-01-01","not-a-date"]}}"#),
            None,
            None,
        );
        match &listing.predicate.all[0] {
            Clause::In(_, values) => {
                assert_eq!(
                    values,
                    &vec![ScalarValue::Date(
                        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    )]
                );
            }
            other => panic!("expected membership clause, got {:?}", other),
        }
    }

    #[test]
    fn test_discrete_with_no_usable_values_is_dropped() {
        let listing = compile(
            Some(r#"{"week_start_date":{"type":"discrete","values":["nope","also-nope"]}}"#),
            None,
            None,
        );
        assert!(listing.predicate.is_empty());
    }

    #[test]
    fn test_search_compiles_substring_for_text_and_equality_for_number() {
        let listing = compile(None, Some(r#"{"brand":"acme","wom":3}"#), None);
        assert_eq!(listing.predicate.any.len(), 2);

        let record = ForecastRecord {
            brand: Some("ACME Retail".to_string()),
            wom: Some(4),
            ..Default::default()
        };
        // brand substring matches even though wom differs: search is OR-combined
        assert!(listing.predicate.matches(&record));
    }

    #[test]
    fn test_unknown_sort_field_emits_no_ordering() {
        let listing = compile(None, None, Some(r#"{"field":"bogus","direction":"desc"}"#));
        assert!(listing.order.is_none());
    }

    #[test]
    fn test_known_sort_field() {
        let listing = compile(None, None, Some(r#"{"field":"sold_qty","direction":"desc"}"#));
        let order = listing.order.unwrap();
        assert_eq!(order.field.name(), "sold_qty");
    }

    #[test]
    fn test_fixed_filters_are_anded_in() {
        let criteria = parse_criteria(None, None, None).unwrap();
        let fixed = FixedFilters {
            week_start_date: Some("2024-01-01".to_string()),
            super_category: Some("Beverages".to_string()),
            store_type: Some("online".to_string()),
        };
        let listing =
            compile_listing(SchemaRegistry::forecast(), &fixed, &criteria).unwrap();
        assert_eq!(listing.predicate.all.len(), 3);
    }

    #[test]
    fn test_invalid_fixed_date_is_rejected() {
        let criteria = parse_criteria(None, None, None).unwrap();
        let fixed = FixedFilters {
            week_start_date: Some("01/01/2024".to_string()),
            ..Default::default()
        };
        let err = compile_listing(SchemaRegistry::forecast(), &fixed, &criteria).unwrap_err();
        assert!(matches!(err, QueryError::InvalidDate));
    }
}
