// Rust guideline compliant 2026-10-12

//! Shared application services for EstateHub.
//!
//! This crate provides reusable, non-CLI-specific helpers for repository
//! discovery, the JSONL record store, console and catalog queries, status
//! changes and standardized response envelopes.

pub mod catalog;
pub mod error;
pub mod lifecycle;
pub mod list;
pub mod repo;
pub mod response;
pub mod store;

pub use catalog::{catalog_filter, catalog_page, price_bucket, sort_preset, CatalogOptions, PriceBucket};
pub use error::{AppError, ErrorCode, Result};
pub use lifecycle::{allowed_targets, apply_role, apply_toggle, apply_transition};
pub use list::{
    build_filter, build_sort, list_records, parse_clause, parse_kind, parse_role, parse_status,
    parse_value, Comparison, ListOptions, WhereClause,
};
pub use repo::RepoContext;
pub use response::{ErrorEnvelope, PageMeta, SuccessEnvelope};
pub use store::RecordStore;
