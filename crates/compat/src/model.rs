//! Schema descriptor model.
//!
//! Descriptors are the wire-shape of the contract surface, detached from
//! the Rust types so two versions can be compared mechanically. A
//! [`SchemaSet`] snapshot serializes to JSON and can be committed alongside
//! a version tag and diffed across tags.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use contracts_core::{Contract, SchemaVersion, ValidationError};

/// Semantic kind of a field on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Bool,
    Integer,
    Float,
    String,
    Identifier,
    Money,
    Timestamp,
    Map,
    Any,
    /// Closed variant set, named in [`SchemaSet::enums`].
    Enum(String),
    /// Nested record, named in [`SchemaSet::records`].
    Record(String),
    List(Box<FieldKind>),
}

impl core::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FieldKind::Bool => write!(f, "bool"),
            FieldKind::Integer => write!(f, "integer"),
            FieldKind::Float => write!(f, "float"),
            FieldKind::String => write!(f, "string"),
            FieldKind::Identifier => write!(f, "identifier"),
            FieldKind::Money => write!(f, "money"),
            FieldKind::Timestamp => write!(f, "timestamp"),
            FieldKind::Map => write!(f, "map"),
            FieldKind::Any => write!(f, "any"),
            FieldKind::Enum(name) => write!(f, "enum '{name}'"),
            FieldKind::Record(name) => write!(f, "record '{name}'"),
            FieldKind::List(inner) => write!(f, "list of {inner}"),
        }
    }
}

/// One field of a record's wire shape.
///
/// An optional field always carries a default, so adding one is an additive
/// change; a required field has no default and old payloads cannot satisfy
/// it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
}

/// Wire shape of one record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Add a required field.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
            required: true,
        });
        self
    }

    /// Add an optional field (defaulted on the wire).
    pub fn optional_field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(FieldDescriptor {
            name: name.into(),
            kind,
            required: false,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_named(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Declared variant set of one enum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDescriptor {
    name: String,
    variants: Vec<String>,
}

impl EnumDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variants: Vec::new(),
        }
    }

    pub fn variant(mut self, name: impl Into<String>) -> Self {
        self.variants.push(name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn has_variant(&self, name: &str) -> bool {
        self.variants.iter().any(|v| v == name)
    }
}

/// Versioned snapshot of the whole contract surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSchemaSet", into = "RawSchemaSet")]
pub struct SchemaSet {
    version: SchemaVersion,
    records: BTreeMap<String, RecordDescriptor>,
    enums: BTreeMap<String, EnumDescriptor>,
}

impl SchemaSet {
    pub fn new(version: SchemaVersion) -> Self {
        Self {
            version,
            records: BTreeMap::new(),
            enums: BTreeMap::new(),
        }
    }

    /// Add or replace a record descriptor.
    pub fn with_record(mut self, record: RecordDescriptor) -> Self {
        self.records.insert(record.name().to_string(), record);
        self
    }

    /// Add or replace an enum descriptor.
    pub fn with_enum(mut self, descriptor: EnumDescriptor) -> Self {
        self.enums.insert(descriptor.name().to_string(), descriptor);
        self
    }

    pub fn with_version(mut self, version: SchemaVersion) -> Self {
        self.version = version;
        self
    }

    pub fn version(&self) -> SchemaVersion {
        self.version
    }

    pub fn records(&self) -> impl Iterator<Item = &RecordDescriptor> {
        self.records.values()
    }

    pub fn record(&self, name: &str) -> Option<&RecordDescriptor> {
        self.records.get(name)
    }

    pub fn enums(&self) -> impl Iterator<Item = &EnumDescriptor> {
        self.enums.values()
    }

    pub fn enumeration(&self, name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(name)
    }
}

impl Contract for SchemaSet {}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawSchemaSet {
    version: SchemaVersion,
    #[serde(default)]
    records: Vec<RecordDescriptor>,
    #[serde(default)]
    enums: Vec<EnumDescriptor>,
}

impl TryFrom<RawSchemaSet> for SchemaSet {
    type Error = ValidationError;

    fn try_from(raw: RawSchemaSet) -> Result<Self, Self::Error> {
        let mut set = SchemaSet::new(raw.version);
        for record in raw.records {
            if set.records.contains_key(record.name()) {
                return Err(ValidationError::invariant(
                    "records",
                    format!("duplicate record descriptor '{}'", record.name()),
                ));
            }
            set = set.with_record(record);
        }
        for descriptor in raw.enums {
            if set.enums.contains_key(descriptor.name()) {
                return Err(ValidationError::invariant(
                    "enums",
                    format!("duplicate enum descriptor '{}'", descriptor.name()),
                ));
            }
            set = set.with_enum(descriptor);
        }
        Ok(set)
    }
}

impl From<SchemaSet> for RawSchemaSet {
    fn from(value: SchemaSet) -> Self {
        Self {
            version: value.version,
            records: value.records.into_values().collect(),
            enums: value.enums.into_values().collect(),
        }
    }
}
