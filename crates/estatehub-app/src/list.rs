// Rust guideline compliant 2026-10-12

//! Listing, filtering and value parsing for admin tables.
//!
//! Turns the string vocabulary of the console (kind names, status names and
//! `field<op>value` clauses) into validated core requests.

use crate::error::{AppError, Result};
use chrono::NaiveDate;
use estatehub_core::{
    query, Config, FieldType, FieldValue, FilterBuilder, FilterSpec, PageRequest, QueryResult,
    QuerySpec, Record, RecordKind, Role, Schema, SortDirection, SortSpec, Status,
    ValidationError,
};
use std::ops::Bound;

/// Options for listing records of one kind.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Free-text search needle.
    pub search: Option<String>,
    /// Fields to search; empty means every searchable field.
    pub search_fields: Vec<String>,
    /// `field<op>value` clauses, combined with AND.
    pub clauses: Vec<String>,
    /// Sort field. Defaults to `created_at`, newest first.
    pub sort: Option<String>,
    /// Sort descending.
    pub descending: bool,
    /// Zero-based page index.
    pub page: usize,
    /// Page size. Defaults to the configured page size.
    pub size: Option<usize>,
}

/// Comparison operator in a `field<op>value` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// `=`
    Equal,
    /// `>=`
    AtLeast,
    /// `<=`
    AtMost,
    /// `>`
    Above,
    /// `<`
    Below,
}

/// A parsed, typed `field<op>value` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct WhereClause {
    /// Field name.
    pub field: String,
    /// Operator.
    pub op: Comparison,
    /// Value typed by the field's schema type.
    pub value: FieldValue,
}

impl WhereClause {
    /// Adds this clause to a filter under construction.
    ///
    /// # Errors
    ///
    /// Returns the builder's validation error.
    pub fn apply<'a>(self, builder: FilterBuilder<'a>) -> Result<FilterBuilder<'a>> {
        let field = self.field.as_str();
        let (lower, upper) = match (self.op, self.value) {
            (Comparison::Equal, FieldValue::Bool(flag)) => return Ok(builder.flag(field, flag)?),
            (Comparison::Equal, value) => return Ok(builder.equals(field, value)?),
            (Comparison::AtLeast, value) => (Bound::Included(value), Bound::Unbounded),
            (Comparison::AtMost, value) => (Bound::Unbounded, Bound::Included(value)),
            (Comparison::Above, value) => (Bound::Excluded(value), Bound::Unbounded),
            (Comparison::Below, value) => (Bound::Unbounded, Bound::Excluded(value)),
        };
        let builder = builder.range(field, lower, upper)?;
        Ok(builder)
    }
}

/// Parses a record kind name.
///
/// # Errors
///
/// Returns `UnknownKind` if the name is not a record kind.
pub fn parse_kind(value: &str) -> Result<RecordKind> {
    RecordKind::parse(value)
        .ok_or_else(|| ValidationError::UnknownKind(value.to_string()).into())
}

/// Parses a status name within a kind's status space.
///
/// # Errors
///
/// Returns `UnknownStatus` if the name is not a status of `kind`.
pub fn parse_status(kind: RecordKind, value: &str) -> Result<Status> {
    Ok(Status::parse(kind, value)?)
}

/// Parses an account role name.
///
/// # Errors
///
/// Returns `InvalidValue` if the name is not a role.
pub fn parse_role(value: &str) -> Result<Role> {
    Role::parse(value).ok_or_else(|| {
        ValidationError::InvalidValue {
            field: "role".to_string(),
            value: value.to_string(),
            reason: "expected admin, agent or viewer".to_string(),
        }
        .into()
    })
}

/// Parses a raw value for a field of the given type.
///
/// Numbers parse as decimals, dates as `YYYY-MM-DD`, booleans as
/// `true`/`false`. Category and text values are taken verbatim.
///
/// # Errors
///
/// Returns `InvalidValue` if the text does not parse.
pub fn parse_value(field: &str, field_type: FieldType, raw: &str) -> Result<FieldValue> {
    let invalid = |reason: &str| -> AppError {
        ValidationError::InvalidValue {
            field: field.to_string(),
            value: raw.to_string(),
            reason: reason.to_string(),
        }
        .into()
    };

    match field_type {
        FieldType::Number => raw
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(FieldValue::Number)
            .ok_or_else(|| invalid("expected a number")),
        FieldType::Date => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(FieldValue::Date)
            .map_err(|_| invalid("expected a date as YYYY-MM-DD")),
        FieldType::Boolean => match raw.to_ascii_lowercase().as_str() {
            "true" => Ok(FieldValue::Bool(true)),
            "false" => Ok(FieldValue::Bool(false)),
            _ => Err(invalid("expected true or false")),
        },
        FieldType::Category | FieldType::Text => Ok(FieldValue::Text(raw.to_string())),
    }
}

/// Parses a `field<op>value` clause against a schema.
///
/// Returns `None` for `field=all`, the console's "no constraint" choice.
///
/// # Errors
///
/// Returns an error if the clause has no operator, an empty side, an
/// unknown field, or a value that does not parse for the field's type.
pub fn parse_clause(schema: &Schema, text: &str) -> Result<Option<WhereClause>> {
    let Some(position) = text.find(['=', '<', '>']) else {
        return Err(AppError::InvalidInput(format!(
            "Clause '{text}' needs one of =, >=, <=, >, <"
        )));
    };

    let rest = &text[position..];
    let (op, width) = if rest.starts_with(">=") {
        (Comparison::AtLeast, 2)
    } else if rest.starts_with("<=") {
        (Comparison::AtMost, 2)
    } else if rest.starts_with('>') {
        (Comparison::Above, 1)
    } else if rest.starts_with('<') {
        (Comparison::Below, 1)
    } else {
        (Comparison::Equal, 1)
    };

    let field = text[..position].trim();
    let raw = rest[width..].trim();
    if field.is_empty() || raw.is_empty() {
        return Err(AppError::InvalidInput(format!(
            "Clause '{text}' needs a field and a value"
        )));
    }

    let descriptor = schema.require(field)?;
    if op == Comparison::Equal && raw.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let value = parse_value(field, descriptor.field_type, raw)?;
    Ok(Some(WhereClause {
        field: field.to_string(),
        op,
        value,
    }))
}

/// Builds a filter from a search needle and raw clauses.
///
/// # Errors
///
/// Returns the first parse or validation error.
pub fn build_filter(
    schema: &Schema,
    search: Option<&str>,
    search_fields: &[String],
    clauses: &[String],
) -> Result<FilterSpec> {
    let mut builder = FilterSpec::builder(schema);

    for text in clauses {
        if let Some(clause) = parse_clause(schema, text)? {
            builder = clause.apply(builder)?;
        }
    }

    if let Some(needle) = search {
        let fields: Vec<&str> = search_fields.iter().map(String::as_str).collect();
        builder = builder.search(needle, &fields)?;
    }

    Ok(builder.build())
}

/// Builds a sort on one field.
///
/// # Errors
///
/// Returns an error if the field is unknown or not sortable.
pub fn build_sort(schema: &Schema, field: &str, descending: bool) -> Result<SortSpec> {
    let direction = if descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    Ok(SortSpec::new(schema, field, direction)?)
}

/// Lists one page of records of a kind.
///
/// # Errors
///
/// Returns an error if the options fail to parse or validate.
pub fn list_records(
    records: &[Record],
    kind: RecordKind,
    config: &Config,
    options: &ListOptions,
) -> Result<QueryResult<Record>> {
    let schema = config.schema(kind);
    let filter = build_filter(
        &schema,
        options.search.as_deref(),
        &options.search_fields,
        &options.clauses,
    )?;

    let sort = match &options.sort {
        Some(field) => build_sort(&schema, field, options.descending)?,
        None => build_sort(&schema, "created_at", true)?,
    };

    let page = PageRequest::new(
        options.page,
        options.size.unwrap_or(config.default_page_size),
    )?;

    let spec = QuerySpec::new(&filter, &sort, page)?;
    Ok(query(records, &spec))
}
