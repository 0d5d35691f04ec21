// Rust guideline compliant 2026-10-12

//! Field schemas for record kinds.
//!
//! A schema lists, per record kind, which fields exist, their types, and
//! whether each can be filtered, sorted or searched. The query engine is
//! generic over this descriptor, so kind-specific behaviour is data rather
//! than per-screen code. The built-in schemas can be narrowed from
//! configuration without recompiling.

use crate::error::ValidationError;
use crate::models::RecordKind;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

/// A record the query engine can read fields from.
pub trait Entity {
    /// Returns the kind of this record.
    fn kind(&self) -> RecordKind;

    /// Returns the record identifier, unique within its kind.
    fn id(&self) -> &str;

    /// Returns the value of a named field, or `None` when the field is
    /// unknown or has no value on this record.
    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Declared type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text, compared by code point.
    Text,
    /// One value out of a closed set, compared case-insensitively on equality.
    Category,
    /// Numeric value.
    Number,
    /// True or false.
    Boolean,
    /// Calendar date.
    Date,
}

impl FieldType {
    /// Returns whether values of this type are ordered for range predicates.
    #[must_use]
    pub fn is_ranged(&self) -> bool {
        matches!(self, FieldType::Number | FieldType::Date)
    }

    /// Returns whether values of this type are text.
    #[must_use]
    pub fn is_textual(&self) -> bool {
        matches!(self, FieldType::Text | FieldType::Category)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::Text => "text",
            FieldType::Category => "category",
            FieldType::Number => "number",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
        };
        f.write_str(name)
    }
}

/// A typed field value read from a record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text or category value.
    Text(String),
    /// Numeric value.
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// Returns whether this value can be stored in a field of `field_type`.
    #[must_use]
    pub fn fits(&self, field_type: FieldType) -> bool {
        match self {
            FieldValue::Text(_) => field_type.is_textual(),
            FieldValue::Number(_) => field_type == FieldType::Number,
            FieldValue::Bool(_) => field_type == FieldType::Boolean,
            FieldValue::Date(_) => field_type == FieldType::Date,
        }
    }

    /// Compares two values of the same variant.
    ///
    /// Numbers use a total order, text compares by code point, dates
    /// chronologically and booleans `false < true`. Values of different
    /// variants are unordered.
    #[must_use]
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        match (self, other) {
            (FieldValue::Text(a), FieldValue::Text(b)) => Some(a.cmp(b)),
            (FieldValue::Number(a), FieldValue::Number(b)) => Some(a.total_cmp(b)),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => Some(a.cmp(b)),
            (FieldValue::Date(a), FieldValue::Date(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    /// Returns the text payload, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(value) => f.write_str(value),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Bool(value) => write!(f, "{value}"),
            FieldValue::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(f64::from(value))
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

/// Describes one field of a record kind and what it can be used for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name as exposed by [`Entity::field`].
    pub name: String,
    /// Declared type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Can carry a filter predicate.
    #[serde(default)]
    pub filterable: bool,
    /// Can be a sort key.
    #[serde(default)]
    pub sortable: bool,
    /// Takes part in free-text search.
    #[serde(default)]
    pub searchable: bool,
}

impl FieldDescriptor {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            filterable: false,
            sortable: false,
            searchable: false,
        }
    }

    fn filter(mut self) -> Self {
        self.filterable = true;
        self
    }

    fn sort(mut self) -> Self {
        self.sortable = true;
        self
    }

    fn search(mut self) -> Self {
        self.searchable = true;
        self
    }
}

/// Field schema of one record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Record kind this schema describes.
    pub kind: RecordKind,
    /// Fields in display order.
    pub fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Returns the built-in schema for a record kind.
    #[must_use]
    pub fn builtin(kind: RecordKind) -> Self {
        use FieldType::{Boolean, Category, Date, Number, Text};

        let fields = match kind {
            RecordKind::Listing => vec![
                FieldDescriptor::new("id", Text).sort(),
                FieldDescriptor::new("title", Text).sort().search(),
                FieldDescriptor::new("description", Text).search(),
                FieldDescriptor::new("price", Number).filter().sort(),
                FieldDescriptor::new("currency", Category).filter(),
                FieldDescriptor::new("city", Category).filter().sort().search(),
                FieldDescriptor::new("neighborhood", Category).filter().search(),
                FieldDescriptor::new("property_type", Category).filter().sort(),
                FieldDescriptor::new("offer", Category).filter(),
                FieldDescriptor::new("status", Category).filter().sort(),
                FieldDescriptor::new("bedrooms", Number).filter().sort(),
                FieldDescriptor::new("bathrooms", Number).filter().sort(),
                FieldDescriptor::new("area", Number).filter().sort(),
                FieldDescriptor::new("featured", Boolean).filter().sort(),
                FieldDescriptor::new("slug", Text).filter(),
                FieldDescriptor::new("created_at", Date).filter().sort(),
            ],
            RecordKind::Inquiry => vec![
                FieldDescriptor::new("id", Text).sort(),
                FieldDescriptor::new("name", Text).sort().search(),
                FieldDescriptor::new("email", Text).filter(),
                FieldDescriptor::new("phone", Text),
                FieldDescriptor::new("property", Text).filter().sort().search(),
                FieldDescriptor::new("inquiry_type", Category).filter().sort(),
                FieldDescriptor::new("status", Category).filter().sort(),
                FieldDescriptor::new("source", Category).filter().sort(),
                FieldDescriptor::new("message", Text),
                FieldDescriptor::new("created_at", Date).filter().sort(),
            ],
            RecordKind::Account => vec![
                FieldDescriptor::new("id", Text).sort(),
                FieldDescriptor::new("username", Text).sort().search(),
                FieldDescriptor::new("email", Text).sort().search(),
                FieldDescriptor::new("first_name", Text).sort(),
                FieldDescriptor::new("last_name", Text).sort(),
                FieldDescriptor::new("full_name", Text).sort().search(),
                FieldDescriptor::new("role", Category).filter().sort(),
                FieldDescriptor::new("active", Boolean).filter(),
                FieldDescriptor::new("status", Category).filter().sort(),
                FieldDescriptor::new("email_verified", Boolean).filter(),
                FieldDescriptor::new("created_at", Date).filter().sort(),
            ],
            RecordKind::Amenity => vec![
                FieldDescriptor::new("id", Text).sort(),
                FieldDescriptor::new("name", Text).sort().search(),
                FieldDescriptor::new("description", Text).search(),
                FieldDescriptor::new("icon", Category).filter(),
                FieldDescriptor::new("created_at", Date).filter().sort(),
            ],
        };

        Self { kind, fields }
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Looks up a field by name, failing for unknown names.
    ///
    /// # Errors
    ///
    /// Returns `UnknownField` if the schema has no such field.
    pub fn require(&self, name: &str) -> Result<&FieldDescriptor, ValidationError> {
        self.field(name).ok_or_else(|| ValidationError::UnknownField {
            kind: self.kind,
            field: name.to_string(),
        })
    }

    /// Returns the names of all searchable fields, in schema order.
    #[must_use]
    pub fn searchable_fields(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.searchable)
            .map(|field| field.name.as_str())
            .collect()
    }

    /// Checks a configured schema against what the record kind exposes.
    ///
    /// A configured schema may drop fields or change capability flags, but
    /// every field it names must exist on the kind with the same type, and
    /// no name may repeat.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSchema` describing the first problem found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let builtin = Schema::builtin(self.kind);
        let mut seen = HashSet::new();

        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(ValidationError::InvalidSchema {
                    kind: self.kind,
                    reason: format!("field '{}' is declared twice", field.name),
                });
            }

            let known = builtin
                .field(&field.name)
                .ok_or_else(|| ValidationError::InvalidSchema {
                    kind: self.kind,
                    reason: format!("{} has no field '{}'", self.kind, field.name),
                })?;

            if known.field_type != field.field_type {
                return Err(ValidationError::InvalidSchema {
                    kind: self.kind,
                    reason: format!(
                        "field '{}' is {}, not {}",
                        field.name, known.field_type, field.field_type
                    ),
                });
            }

            if field.searchable && !field.field_type.is_textual() {
                return Err(ValidationError::InvalidSchema {
                    kind: self.kind,
                    reason: format!("field '{}' is not text and cannot be searchable", field.name),
                });
            }
        }

        Ok(())
    }
}
