// Rust guideline compliant 2026-10-12

//! Public catalog presets.
//!
//! The catalog shows available listings only, with a property-type facet,
//! price buckets such as `0-500000` or `1000000+`, and named sort presets.

use crate::error::{AppError, Result};
use estatehub_core::{
    query, Config, FieldValue, FilterSpec, ListingStatus, PageRequest, QueryResult,
    QuerySpec, Record, RecordKind, Schema, SortDirection, SortSpec,
};
use std::ops::Bound;

/// Options for one catalog page.
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    /// Free-text search over every searchable listing field.
    pub search: Option<String>,
    /// Property type facet, or `all`.
    pub property_type: Option<String>,
    /// Price bucket, or `all`.
    pub price: Option<String>,
    /// Sort preset. Defaults to `newest`.
    pub sort: Option<String>,
    /// Zero-based page index.
    pub page: usize,
    /// Page size. Defaults to the configured page size.
    pub size: Option<usize>,
}

/// A half-open price range `[low, high)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBucket {
    /// Inclusive lower bound.
    pub low: u64,
    /// Exclusive upper bound, `None` for open-ended buckets.
    pub high: Option<u64>,
}

impl PriceBucket {
    fn bounds(self) -> (Bound<FieldValue>, Bound<FieldValue>) {
        let lower = Bound::Included(FieldValue::from(self.low));
        let upper = self
            .high
            .map_or(Bound::Unbounded, |high| Bound::Excluded(FieldValue::from(high)));
        (lower, upper)
    }
}

/// Parses a price bucket: `LOW-HIGH`, `LOW+`, or `all` (no constraint).
///
/// # Errors
///
/// Returns `InvalidInput` for malformed buckets or `LOW >= HIGH`.
pub fn price_bucket(value: &str) -> Result<Option<PriceBucket>> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("all") {
        return Ok(None);
    }

    let invalid = || {
        AppError::InvalidInput(format!(
            "Price range '{value}' must be LOW-HIGH, LOW+ or all"
        ))
    };
    let amount = |text: &str| text.trim().parse::<u64>().map_err(|_| invalid());

    let bucket = if let Some(low) = value.strip_suffix('+') {
        PriceBucket {
            low: amount(low)?,
            high: None,
        }
    } else {
        let (low, high) = value.split_once('-').ok_or_else(invalid)?;
        let bucket = PriceBucket {
            low: amount(low)?,
            high: Some(amount(high)?),
        };
        if bucket.high <= Some(bucket.low) {
            return Err(invalid());
        }
        bucket
    };

    Ok(Some(bucket))
}

/// Resolves a sort preset to a listing field and direction.
///
/// `newest` sorts by creation date, newest first. `price-low` and
/// `price-high` sort by price. `area` puts the largest homes first.
///
/// # Errors
///
/// Returns `InvalidInput` for unknown presets.
pub fn sort_preset(value: &str) -> Result<(&'static str, SortDirection)> {
    match value.trim().to_ascii_lowercase().as_str() {
        "newest" => Ok(("created_at", SortDirection::Descending)),
        "price-low" => Ok(("price", SortDirection::Ascending)),
        "price-high" => Ok(("price", SortDirection::Descending)),
        "area" => Ok(("area", SortDirection::Descending)),
        _ => Err(AppError::InvalidInput(format!(
            "Unknown sort '{value}'; expected newest, price-low, price-high or area"
        ))),
    }
}

/// Builds the catalog filter: available listings, plus the optional facets.
///
/// # Errors
///
/// Returns an error if a facet value is malformed.
pub fn catalog_filter(
    schema: &Schema,
    search: Option<&str>,
    property_type: Option<&str>,
    price: Option<&str>,
) -> Result<FilterSpec> {
    let mut builder = FilterSpec::builder(schema).equals("status", ListingStatus::Available.as_str())?;

    if let Some(kind) = property_type.filter(|t| !t.trim().eq_ignore_ascii_case("all")) {
        builder = builder.equals("property_type", kind.trim())?;
    }

    if let Some(bucket) = price.map(price_bucket).transpose()?.flatten() {
        let (lower, upper) = bucket.bounds();
        builder = builder.range("price", lower, upper)?;
    }

    if let Some(needle) = search {
        builder = builder.search(needle, &[])?;
    }

    Ok(builder.build())
}

/// Returns one catalog page.
///
/// # Errors
///
/// Returns an error if the options fail to parse or validate.
pub fn catalog_page(
    records: &[Record],
    config: &Config,
    options: &CatalogOptions,
) -> Result<QueryResult<Record>> {
    let schema = config.schema(RecordKind::Listing);
    let filter = catalog_filter(
        &schema,
        options.search.as_deref(),
        options.property_type.as_deref(),
        options.price.as_deref(),
    )?;

    let (field, direction) = sort_preset(options.sort.as_deref().unwrap_or("newest"))?;
    let sort = SortSpec::new(&schema, field, direction)?;
    let page = PageRequest::new(
        options.page,
        options.size.unwrap_or(config.default_page_size),
    )?;

    let spec = QuerySpec::new(&filter, &sort, page)?;
    Ok(query(records, &spec))
}
