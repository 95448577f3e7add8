use serde::Serialize;
use serde_json::{Map, Value};

/// Field name used when an opaque item is wrapped into a record.
pub const OPAQUE_FIELD: &str = "value";

/// How a record was produced at the input boundary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Built from a native mapping.
    #[default]
    Map,
    /// Built from a typed value that exports its fields in bulk.
    Object,
    /// Anything else, wrapped as `{"value": <item>}`.
    Opaque,
}

/// A named-field data item being compared (one citation, claim, reference...).
///
/// Field order is the insertion order of the source mapping. Records carry no
/// identity beyond their content.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
    #[serde(skip)]
    kind: RecordKind,
}

impl Record {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields, kind: RecordKind::Map }
    }

    /// Wrap a non-mapping item as `{"value": item}`.
    pub fn opaque(item: Value) -> Self {
        let mut fields = Map::new();
        fields.insert(OPAQUE_FIELD.to_string(), item);
        Self { fields, kind: RecordKind::Opaque }
    }

    /// Normalize any serializable value. Types that serialize to an object
    /// become `Object` records; everything else (including values that fail to
    /// serialize) is wrapped opaquely.
    pub fn from_serialize<T: Serialize + ?Sized>(item: &T) -> Self {
        match serde_json::to_value(item) {
            Ok(Value::Object(fields)) => Self { fields, kind: RecordKind::Object },
            Ok(other) => Self::opaque(other),
            Err(_) => Self::opaque(Value::Null),
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Raw value at `field`, `None` when the field is absent.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }
}

/// Conversion into a [`Record`], resolved once where data enters the engine.
pub trait ToRecord {
    fn to_record(&self) -> Record;
}

impl ToRecord for Record {
    fn to_record(&self) -> Record {
        self.clone()
    }
}

impl ToRecord for Map<String, Value> {
    fn to_record(&self) -> Record {
        Record::from_map(self.clone())
    }
}

impl ToRecord for Value {
    fn to_record(&self) -> Record {
        match self {
            Value::Object(fields) => Record::from_map(fields.clone()),
            other => Record::opaque(other.clone()),
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Record::from_map(fields)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Record::from_map(fields),
            other => Record::opaque(other),
        }
    }
}

/// Normalize a slice of items into records.
pub fn to_records<T: ToRecord>(items: &[T]) -> Vec<Record> {
    items.iter().map(ToRecord::to_record).collect()
}
