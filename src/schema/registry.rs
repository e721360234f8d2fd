//! Field registry
//!
//! The closed set of queryable fields. Every filter, search, and sort
//! reference resolves through `SchemaRegistry::lookup` into a typed `Field`
//! handle carrying the field's semantic kind and accessor. Unknown names
//! resolve to `None` and callers drop the offending clause.

use super::record::ForecastRecord;
use super::value::ScalarValue;

/// Semantic kind of a queryable field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// UTF-8 text, matched by case-insensitive substring in searches
    Text,
    /// 64-bit floating point quantity
    Number,
    /// Calendar date, `YYYY-MM-DD` on the wire
    Date,
}

/// A field definition: name, kind, and typed accessor
pub struct FieldDef {
    name: &'static str,
    kind: FieldKind,
    get: fn(&ForecastRecord) -> ScalarValue,
}

/// Validated handle onto a registered field
#[derive(Clone, Copy)]
pub struct Field(&'static FieldDef);

impl Field {
    pub fn name(&self) -> &'static str {
        self.0.name
    }

    pub fn kind(&self) -> FieldKind {
        self.0.kind
    }

    /// Read this field's value out of a record
    pub fn value_of(&self, record: &ForecastRecord) -> ScalarValue {
        (self.0.get)(record)
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.0, other.0)
    }
}

impl Eq for Field {}

impl std::fmt::Debug for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Field").field(&self.0.name).finish()
    }
}

static FIELDS: &[FieldDef] = &[
    FieldDef {
        name: "id",
        kind: FieldKind::Number,
        get: |r| ScalarValue::from_int(r.id),
    },
    FieldDef {
        name: "p1_dc",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.p1_dc),
    },
    FieldDef {
        name: "format",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.format),
    },
    FieldDef {
        name: "city",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.city),
    },
    FieldDef {
        name: "state",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.state),
    },
    FieldDef {
        name: "segment_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.segment_code),
    },
    FieldDef {
        name: "consensus_qty",
        kind: FieldKind::Number,
        get: |r| ScalarValue::from_number(r.consensus_qty),
    },
    FieldDef {
        name: "brick_description",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.brick_description),
    },
    FieldDef {
        name: "forecast_qty",
        kind: FieldKind::Number,
        get: |r| ScalarValue::from_number(r.forecast_qty),
    },
    FieldDef {
        name: "brand",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.brand),
    },
    FieldDef {
        name: "segment",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.segment),
    },
    FieldDef {
        name: "division",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.division),
    },
    FieldDef {
        name: "brick_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.brick_code),
    },
    FieldDef {
        name: "class_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.class_code),
    },
    FieldDef {
        name: "division_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.division_code),
    },
    FieldDef {
        name: "vertical",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.vertical),
    },
    FieldDef {
        name: "store_no",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.store_no),
    },
    FieldDef {
        name: "batchno",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.batchno),
    },
    FieldDef {
        name: "status",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.status),
    },
    FieldDef {
        name: "article_id",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.article_id),
    },
    FieldDef {
        name: "month_year",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.month_year),
    },
    FieldDef {
        name: "pin_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.pin_code),
    },
    FieldDef {
        name: "region",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.region),
    },
    FieldDef {
        name: "wom",
        kind: FieldKind::Number,
        get: |r| ScalarValue::from_int(r.wom),
    },
    FieldDef {
        name: "family_code",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.family_code),
    },
    FieldDef {
        name: "class_description",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.class_description),
    },
    FieldDef {
        name: "sd",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.sd),
    },
    FieldDef {
        name: "article_description",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.article_description),
    },
    FieldDef {
        name: "kvi",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.kvi),
    },
    FieldDef {
        name: "npi",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.npi),
    },
    FieldDef {
        name: "sold_qty",
        kind: FieldKind::Number,
        get: |r| ScalarValue::from_number(r.sold_qty),
    },
    FieldDef {
        name: "week_start_date",
        kind: FieldKind::Date,
        get: |r| ScalarValue::from_date(r.week_start_date),
    },
    FieldDef {
        name: "super_category",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.super_category),
    },
    FieldDef {
        name: "store_type",
        kind: FieldKind::Text,
        get: |r| ScalarValue::from_text(&r.store_type),
    },
];

/// Registry of the queryable forecast fields
pub struct SchemaRegistry {
    fields: &'static [FieldDef],
}

static FORECAST: SchemaRegistry = SchemaRegistry { fields: FIELDS };

impl SchemaRegistry {
    /// The forecast dataset registry
    pub fn forecast() -> &'static SchemaRegistry {
        &FORECAST
    }

    /// Resolve a field name into a typed handle
    pub fn lookup(&self, name: &str) -> Option<Field> {
        self.fields.iter().find(|f| f.name == name).map(Field)
    }

    /// All registered fields, in declaration order
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.fields.iter().map(Field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_field() {
        let schema = SchemaRegistry::forecast();
        let field = schema.lookup("forecast_qty").unwrap();
        assert_eq!(field.name(), "forecast_qty");
        assert_eq!(field.kind(), FieldKind::Number);
    }

    #[test]
    fn test_lookup_unknown_field() {
        assert!(SchemaRegistry::forecast().lookup("nonexistent_field").is_none());
    }

    #[test]
    fn test_registry_covers_the_dataset() {
        let schema = SchemaRegistry::forecast();
        assert_eq!(schema.len(), 34);
        assert_eq!(
            schema.lookup("week_start_date").unwrap().kind(),
            FieldKind::Date
        );
        let numeric: Vec<_> = schema
            .fields()
            .filter(|f| f.kind() == FieldKind::Number)
            .map(|f| f.name())
            .collect();
        assert_eq!(
            numeric,
            vec!["id", "consensus_qty", "forecast_qty", "wom", "sold_qty"]
        );
    }

    #[test]
    fn test_accessor_reads_record() {
        let schema = SchemaRegistry::forecast();
        let record = ForecastRecord {
            brand: Some("Acme".to_string()),
            sold_qty: Some(12.5),
            ..Default::default()
        };

        let brand = schema.lookup("brand").unwrap();
        assert_eq!(brand.value_of(&record), ScalarValue::Text("Acme".to_string()));

        let sold = schema.lookup("sold_qty").unwrap();
        assert_eq!(sold.value_of(&record), ScalarValue::Number(12.5));

        let missing = schema.lookup("city").unwrap();
        assert!(missing.value_of(&record).is_null());
    }
}
