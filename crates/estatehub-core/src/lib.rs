// Rust guideline compliant 2026-10-12

//! EstateHub Core Library
//!
//! This crate provides the pure, in-memory core behind the EstateHub catalog
//! and admin console:
//! - Record models (Listing, Inquiry, Account, Amenity)
//! - Field schemas describing what each kind can filter, sort and search on
//! - The faceted query engine (filter, stable sort, count, page)
//! - The lifecycle controller (per-kind status transition tables)
//! - Configuration loading and error types

pub mod config;
pub mod error;
pub mod lifecycle;
pub mod models;
pub mod query;
pub mod schema;

pub use config::{Config, OutputFormat};
pub use error::{Error, LifecycleError, Result, ValidationError};
pub use lifecycle::{Lifecycle, LifecycleController, Status, TransitionPolicy, TransitionTable};
pub use models::{
    Account, AccountStatus, Amenity, AmenityIcon, Inquiry, InquirySource, InquiryStatus,
    InquiryType, Listing, ListingStatus, OfferType, PropertyType, Record, RecordKind, Role,
};
pub use query::{
    query, FilterBuilder, FilterSpec, PageRequest, Predicate, QueryResult, QuerySpec,
    SortDirection, SortSpec,
};
pub use schema::{Entity, FieldDescriptor, FieldType, FieldValue, Schema};
