// Rust guideline compliant 2026-10-12

//! Faceted query engine.
//!
//! A query runs in a fixed order that must not be rearranged, because
//! filtering, sorting and paging do not commute once ties or partial pages
//! are involved:
//!
//! 1. Filter: keep records for which every predicate holds
//! 2. Sort: stable sort on one field
//! 3. Count: size of the filtered set
//! 4. Page: slice `[index * size, index * size + size)`
//!
//! Filter and sort requests are validated against a [`Schema`] when they are
//! built, so running a query never fails.

use crate::error::ValidationError;
use crate::models::RecordKind;
use crate::schema::{Entity, FieldType, FieldValue, Schema};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::Bound;

/// Record count from which filtering runs on the rayon pool.
const PARALLEL_THRESHOLD: usize = 1_000;

/// A constraint on a single field.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Field equals the value. Category fields compare ASCII case-insensitively.
    Equals(FieldValue),
    /// Field lies within the bounds.
    Range {
        /// Lower bound.
        lower: Bound<FieldValue>,
        /// Upper bound.
        upper: Bound<FieldValue>,
    },
    /// Boolean field has the given value.
    Flag(bool),
}

impl Predicate {
    fn matches(&self, field_type: FieldType, value: Option<&FieldValue>) -> bool {
        let Some(value) = value else {
            return false;
        };

        match self {
            Predicate::Equals(expected) => match (field_type, value, expected) {
                (FieldType::Category, FieldValue::Text(actual), FieldValue::Text(wanted)) => {
                    actual.eq_ignore_ascii_case(wanted)
                }
                _ => value.compare(expected) == Some(Ordering::Equal),
            },
            Predicate::Range { lower, upper } => {
                let above = match lower {
                    Bound::Included(bound) => {
                        matches!(value.compare(bound), Some(Ordering::Greater | Ordering::Equal))
                    }
                    Bound::Excluded(bound) => value.compare(bound) == Some(Ordering::Greater),
                    Bound::Unbounded => true,
                };
                let below = match upper {
                    Bound::Included(bound) => {
                        matches!(value.compare(bound), Some(Ordering::Less | Ordering::Equal))
                    }
                    Bound::Excluded(bound) => value.compare(bound) == Some(Ordering::Less),
                    Bound::Unbounded => true,
                };
                above && below
            }
            Predicate::Flag(expected) => *value == FieldValue::Bool(*expected),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Clause {
    field: String,
    field_type: FieldType,
    predicate: Predicate,
}

#[derive(Debug, Clone, PartialEq)]
struct TextSearch {
    needle: String,
    fields: Vec<String>,
}

impl TextSearch {
    fn matches<R: Entity>(&self, record: &R) -> bool {
        self.fields.iter().any(|field| {
            record
                .field(field)
                .as_ref()
                .and_then(FieldValue::as_text)
                .is_some_and(|text| text.to_lowercase().contains(&self.needle))
        })
    }
}

/// A validated set of predicates over one record kind, combined with AND.
///
/// Built with [`FilterSpec::builder`]. Fields without a predicate are
/// unconstrained. Multiple predicates on the same field all have to hold.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    kind: RecordKind,
    clauses: Vec<Clause>,
    search: Option<TextSearch>,
}

impl FilterSpec {
    /// Starts building a filter for the schema's record kind.
    #[must_use]
    pub fn builder(schema: &Schema) -> FilterBuilder<'_> {
        FilterBuilder {
            schema,
            spec: FilterSpec {
                kind: schema.kind,
                clauses: Vec::new(),
                search: None,
            },
        }
    }

    /// Returns a filter that keeps every record of the kind.
    #[must_use]
    pub fn all(kind: RecordKind) -> Self {
        Self {
            kind,
            clauses: Vec::new(),
            search: None,
        }
    }

    /// Returns the record kind this filter applies to.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns true when no predicate constrains the result.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty() && self.search.is_none()
    }

    /// Evaluates the filter against one record.
    ///
    /// Records of another kind never match. A missing field value fails
    /// every predicate on that field.
    pub fn matches<R: Entity>(&self, record: &R) -> bool {
        if record.kind() != self.kind {
            return false;
        }

        let clauses_hold = self.clauses.iter().all(|clause| {
            let value = record.field(&clause.field);
            clause.predicate.matches(clause.field_type, value.as_ref())
        });

        clauses_hold
            && self
                .search
                .as_ref()
                .map_or(true, |search| search.matches(record))
    }
}

/// Builder that validates each predicate against a schema as it is added.
#[derive(Debug, Clone)]
pub struct FilterBuilder<'a> {
    schema: &'a Schema,
    spec: FilterSpec,
}

impl<'a> FilterBuilder<'a> {
    /// Requires a field to equal a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown, not filterable, or the value
    /// does not fit the field's type.
    pub fn equals(
        mut self,
        field: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Self, ValidationError> {
        let value = value.into();
        let field_type = self.filterable(field)?;
        check_fits(field, field_type, &value)?;
        self.push(field, field_type, Predicate::Equals(value));
        Ok(self)
    }

    /// Requires a number or date field to lie within the bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown, not filterable, not ordered,
    /// a bound does not fit the field's type, or the range is empty.
    pub fn range(
        mut self,
        field: &str,
        lower: Bound<FieldValue>,
        upper: Bound<FieldValue>,
    ) -> Result<Self, ValidationError> {
        let field_type = self.filterable(field)?;
        if !field_type.is_ranged() {
            return Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: field_type,
                detail: "range predicates need a number or date field".to_string(),
            });
        }

        for bound in [&lower, &upper] {
            if let Bound::Included(value) | Bound::Excluded(value) = bound {
                check_fits(field, field_type, value)?;
            }
        }

        if range_is_empty(&lower, &upper) {
            return Err(ValidationError::EmptyRange {
                field: field.to_string(),
            });
        }

        self.push(field, field_type, Predicate::Range { lower, upper });
        Ok(self)
    }

    /// Requires a field to be at least `value` (inclusive).
    ///
    /// # Errors
    ///
    /// See [`FilterBuilder::range`].
    pub fn at_least(self, field: &str, value: impl Into<FieldValue>) -> Result<Self, ValidationError> {
        self.range(field, Bound::Included(value.into()), Bound::Unbounded)
    }

    /// Requires a field to be at most `value` (inclusive).
    ///
    /// # Errors
    ///
    /// See [`FilterBuilder::range`].
    pub fn at_most(self, field: &str, value: impl Into<FieldValue>) -> Result<Self, ValidationError> {
        self.range(field, Bound::Unbounded, Bound::Included(value.into()))
    }

    /// Requires a field to lie in `[low, high]`.
    ///
    /// # Errors
    ///
    /// See [`FilterBuilder::range`].
    pub fn between(
        self,
        field: &str,
        low: impl Into<FieldValue>,
        high: impl Into<FieldValue>,
    ) -> Result<Self, ValidationError> {
        self.range(
            field,
            Bound::Included(low.into()),
            Bound::Included(high.into()),
        )
    }

    /// Requires a boolean field to have the given value.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown, not filterable, or not boolean.
    pub fn flag(mut self, field: &str, value: bool) -> Result<Self, ValidationError> {
        let field_type = self.filterable(field)?;
        if field_type != FieldType::Boolean {
            return Err(ValidationError::TypeMismatch {
                field: field.to_string(),
                expected: field_type,
                detail: "flag predicates need a boolean field".to_string(),
            });
        }
        self.push(field, field_type, Predicate::Flag(value));
        Ok(self)
    }

    /// Adds a case-insensitive free-text match over `fields`.
    ///
    /// An empty `fields` slice searches every searchable field of the schema.
    /// A blank needle adds no constraint, though the fields are still checked.
    ///
    /// # Errors
    ///
    /// Returns an error if a field is unknown or not searchable.
    pub fn search(mut self, needle: &str, fields: &[&str]) -> Result<Self, ValidationError> {
        let fields: Vec<String> = if fields.is_empty() {
            self.schema
                .searchable_fields()
                .into_iter()
                .map(str::to_string)
                .collect()
        } else {
            let mut checked = Vec::with_capacity(fields.len());
            for field in fields {
                let descriptor = self.schema.require(field)?;
                if !descriptor.searchable {
                    return Err(ValidationError::NotSearchable {
                        kind: self.schema.kind,
                        field: (*field).to_string(),
                    });
                }
                checked.push((*field).to_string());
            }
            checked
        };

        let needle = needle.trim().to_lowercase();
        self.spec.search = if needle.is_empty() {
            None
        } else {
            Some(TextSearch { needle, fields })
        };
        Ok(self)
    }

    /// Finishes the filter.
    #[must_use]
    pub fn build(self) -> FilterSpec {
        self.spec
    }

    fn filterable(&self, field: &str) -> Result<FieldType, ValidationError> {
        let descriptor = self.schema.require(field)?;
        if !descriptor.filterable {
            return Err(ValidationError::NotFilterable {
                kind: self.schema.kind,
                field: field.to_string(),
            });
        }
        Ok(descriptor.field_type)
    }

    fn push(&mut self, field: &str, field_type: FieldType, predicate: Predicate) {
        self.spec.clauses.push(Clause {
            field: field.to_string(),
            field_type,
            predicate,
        });
    }
}

fn check_fits(field: &str, field_type: FieldType, value: &FieldValue) -> Result<(), ValidationError> {
    if value.fits(field_type) {
        Ok(())
    } else {
        Err(ValidationError::TypeMismatch {
            field: field.to_string(),
            expected: field_type,
            detail: format!("got value '{value}'"),
        })
    }
}

fn range_is_empty(lower: &Bound<FieldValue>, upper: &Bound<FieldValue>) -> bool {
    let (low, low_inclusive) = match lower {
        Bound::Included(value) => (value, true),
        Bound::Excluded(value) => (value, false),
        Bound::Unbounded => return false,
    };
    let (high, high_inclusive) = match upper {
        Bound::Included(value) => (value, true),
        Bound::Excluded(value) => (value, false),
        Bound::Unbounded => return false,
    };

    match low.compare(high) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => !(low_inclusive && high_inclusive),
        _ => false,
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A validated sort key for one record kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    kind: RecordKind,
    field: String,
    direction: SortDirection,
}

impl SortSpec {
    /// Creates a sort on a sortable field.
    ///
    /// # Errors
    ///
    /// Returns an error if the field is unknown or not sortable.
    pub fn new(
        schema: &Schema,
        field: &str,
        direction: SortDirection,
    ) -> Result<Self, ValidationError> {
        let descriptor = schema.require(field)?;
        if !descriptor.sortable {
            return Err(ValidationError::NotSortable {
                kind: schema.kind,
                field: field.to_string(),
            });
        }
        Ok(Self {
            kind: schema.kind,
            field: field.to_string(),
            direction,
        })
    }

    /// Creates an ascending sort.
    ///
    /// # Errors
    ///
    /// See [`SortSpec::new`].
    pub fn ascending(schema: &Schema, field: &str) -> Result<Self, ValidationError> {
        Self::new(schema, field, SortDirection::Ascending)
    }

    /// Creates a descending sort.
    ///
    /// # Errors
    ///
    /// See [`SortSpec::new`].
    pub fn descending(schema: &Schema, field: &str) -> Result<Self, ValidationError> {
        Self::new(schema, field, SortDirection::Descending)
    }

    /// Returns the record kind this sort was built for.
    #[must_use]
    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Returns the sort field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the sort direction.
    #[must_use]
    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    // Missing values go last in both directions.
    fn compare_keys(&self, a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
        match (a, b) {
            (Some(a), Some(b)) => {
                let ordering = a.compare(b).unwrap_or(Ordering::Equal);
                match self.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// Zero-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    index: usize,
    size: usize,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPage` if `size` is zero.
    pub fn new(index: usize, size: usize) -> Result<Self, ValidationError> {
        if size == 0 {
            return Err(ValidationError::InvalidPage(
                "page size must be positive, got 0".to_string(),
            ));
        }
        Ok(Self { index, size })
    }

    /// Creates a page request from signed input, as received from a UI.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPage` if `index` is negative or `size` is not positive.
    pub fn from_signed(index: i64, size: i64) -> Result<Self, ValidationError> {
        let index = usize::try_from(index).map_err(|_| {
            ValidationError::InvalidPage(format!("page index must not be negative, got {index}"))
        })?;
        let size = usize::try_from(size)
            .ok()
            .filter(|size| *size > 0)
            .ok_or_else(|| {
                ValidationError::InvalidPage(format!("page size must be positive, got {size}"))
            })?;
        Ok(Self { index, size })
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the page size.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the offset of the first row on this page.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<R> {
    /// Rows on this page, in sorted order.
    pub rows: Vec<R>,
    /// Number of records that passed the filter, before paging.
    pub total_matched: usize,
    /// Zero-based page index that was requested.
    pub page: usize,
    /// Page size that was requested.
    pub page_size: usize,
}

impl<R> QueryResult<R> {
    /// Returns the number of pages needed to show every match.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.total_matched.div_ceil(self.page_size.max(1))
    }

    /// Returns true if a page follows this one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count().saturating_sub(1)
    }
}

/// A filter, sort and page checked to target the same record kind.
#[derive(Debug, Clone, Copy)]
pub struct QuerySpec<'a> {
    filter: &'a FilterSpec,
    sort: &'a SortSpec,
    page: PageRequest,
}

impl<'a> QuerySpec<'a> {
    /// Combines a filter, a sort and a page window.
    ///
    /// # Errors
    ///
    /// Returns `KindMismatch` if the sort was built from another kind's
    /// schema than the filter.
    pub fn new(
        filter: &'a FilterSpec,
        sort: &'a SortSpec,
        page: PageRequest,
    ) -> Result<Self, ValidationError> {
        if filter.kind() != sort.kind() {
            return Err(ValidationError::KindMismatch {
                filter: filter.kind(),
                sort: sort.kind(),
            });
        }
        Ok(Self { filter, sort, page })
    }

    /// Returns the filter.
    #[must_use]
    pub fn filter(&self) -> &'a FilterSpec {
        self.filter
    }

    /// Returns the sort.
    #[must_use]
    pub fn sort(&self) -> &'a SortSpec {
        self.sort
    }

    /// Returns the page window.
    #[must_use]
    pub fn page(&self) -> PageRequest {
        self.page
    }
}

/// Runs a query: filter, stable sort, count, then page.
///
/// The input slice is never modified; matching rows on the requested page
/// are cloned into the result. Given identical inputs the output is
/// identical, including the order of records that tie on the sort key.
pub fn query<R>(records: &[R], spec: &QuerySpec<'_>) -> QueryResult<R>
where
    R: Entity + Clone + Sync,
{
    let (filter, sort, page) = (spec.filter, spec.sort, spec.page);
    let matched: Vec<&R> = if records.len() >= PARALLEL_THRESHOLD {
        records
            .par_iter()
            .filter(|record| filter.matches(*record))
            .collect()
    } else {
        records
            .iter()
            .filter(|record| filter.matches(*record))
            .collect()
    };

    let mut keyed: Vec<(Option<FieldValue>, &R)> = matched
        .into_iter()
        .map(|record| (record.field(sort.field()), record))
        .collect();
    // `sort_by` is stable, so ties keep their input order.
    keyed.sort_by(|(a, _), (b, _)| sort.compare_keys(a.as_ref(), b.as_ref()));

    let total_matched = keyed.len();
    let rows: Vec<R> = keyed
        .into_iter()
        .skip(page.offset())
        .take(page.size())
        .map(|(_, record)| record.clone())
        .collect();

    tracing::debug!(
        kind = %filter.kind(),
        input = records.len(),
        matched = total_matched,
        returned = rows.len(),
        sort = sort.field(),
        page = page.index(),
        "query executed"
    );

    QueryResult {
        rows,
        total_matched,
        page: page.index(),
        page_size: page.size(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_is_empty() {
        let five = || FieldValue::Number(5.0);
        let six = || FieldValue::Number(6.0);
        assert!(range_is_empty(&Bound::Included(six()), &Bound::Included(five())));
        assert!(range_is_empty(&Bound::Included(five()), &Bound::Excluded(five())));
        assert!(!range_is_empty(&Bound::Included(five()), &Bound::Included(five())));
        assert!(!range_is_empty(&Bound::Unbounded, &Bound::Included(five())));
    }

    #[test]
    fn test_missing_values_sort_last_both_ways() {
        let schema = Schema::builtin(RecordKind::Listing);
        let value = FieldValue::Number(1.0);
        for direction in [SortDirection::Ascending, SortDirection::Descending] {
            let sort = SortSpec::new(&schema, "area", direction).unwrap();
            assert_eq!(sort.compare_keys(Some(&value), None), Ordering::Less);
            assert_eq!(sort.compare_keys(None, Some(&value)), Ordering::Greater);
        }
    }

    #[test]
    fn test_category_equality_ignores_ascii_case() {
        let predicate = Predicate::Equals(FieldValue::Text("apartment".to_string()));
        let value = FieldValue::Text("Apartment".to_string());
        assert!(predicate.matches(FieldType::Category, Some(&value)));
        assert!(!predicate.matches(FieldType::Text, Some(&value)));
        assert!(!predicate.matches(FieldType::Category, None));
    }

    #[test]
    fn test_page_count_rounds_up() {
        let result: QueryResult<()> = QueryResult {
            rows: Vec::new(),
            total_matched: 7,
            page: 0,
            page_size: 3,
        };
        assert_eq!(result.page_count(), 3);
        assert!(result.has_next());
    }

    #[test]
    fn test_has_next_at_last_page_index() {
        let result: QueryResult<()> = QueryResult {
            rows: Vec::new(),
            total_matched: 7,
            page: usize::MAX,
            page_size: 3,
        };
        assert!(!result.has_next());

        let last = QueryResult::<()> { page: 2, ..result };
        assert!(!last.has_next());
    }

    #[test]
    fn test_query_spec_rejects_sort_for_other_kind() {
        let listings = Schema::builtin(RecordKind::Listing);
        let inquiries = Schema::builtin(RecordKind::Inquiry);
        let filter = FilterSpec::builder(&listings).build();
        let sort = SortSpec::new(&inquiries, "name", SortDirection::Ascending).unwrap();
        let page = PageRequest::new(0, 10).unwrap();

        let err = QuerySpec::new(&filter, &sort, page).unwrap_err();
        assert_eq!(
            err,
            ValidationError::KindMismatch {
                filter: RecordKind::Listing,
                sort: RecordKind::Inquiry,
            }
        );
    }
}
