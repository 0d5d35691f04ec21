// Rust guideline compliant 2026-10-12

//! Response envelopes for JSON command output.

use crate::error::{AppError, ErrorCode};
use estatehub_core::QueryResult;
use serde::Serialize;

/// Paging metadata attached to query responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    /// Zero-based page index.
    pub page: usize,
    /// Requested page size.
    pub page_size: usize,
    /// Records that matched the filter.
    pub total_matched: usize,
    /// Pages needed to show every match.
    pub page_count: usize,
}

impl<R> From<&QueryResult<R>> for PageMeta {
    fn from(result: &QueryResult<R>) -> Self {
        Self {
            page: result.page,
            page_size: result.page_size,
            total_matched: result.total_matched,
            page_count: result.page_count(),
        }
    }
}

/// Standard success envelope.
#[derive(Debug, Serialize)]
pub struct SuccessEnvelope<T> {
    /// Status indicator.
    pub status: &'static str,
    /// Result payload.
    pub result: T,
    /// Paging metadata, present for query results.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> SuccessEnvelope<T> {
    /// Creates a new success envelope.
    #[must_use]
    pub fn new(result: T) -> Self {
        Self {
            status: "ok",
            result,
            meta: None,
        }
    }
}

impl<R> SuccessEnvelope<Vec<R>> {
    /// Wraps a query page, moving paging figures into `meta`.
    #[must_use]
    pub fn page(result: QueryResult<R>) -> Self {
        let meta = PageMeta::from(&result);
        Self {
            status: "ok",
            result: result.rows,
            meta: Some(meta),
        }
    }
}

/// Standard error envelope.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    /// Status indicator.
    pub status: &'static str,
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Optional structured details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorEnvelope {
    /// Creates a new error envelope from an application error.
    #[must_use]
    pub fn from_error(error: &AppError) -> Self {
        Self {
            status: "error",
            code: error.code(),
            message: error.to_string(),
            details: error.details(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_envelope_carries_meta() {
        let result = QueryResult {
            rows: vec![1, 2],
            total_matched: 5,
            page: 0,
            page_size: 2,
        };
        let json = serde_json::to_value(SuccessEnvelope::page(result)).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["result"], serde_json::json!([1, 2]));
        assert_eq!(json["meta"]["page_count"], 3);
    }

    #[test]
    fn test_plain_envelope_omits_meta() {
        let json = serde_json::to_value(SuccessEnvelope::new("done")).unwrap();
        assert!(json.get("meta").is_none());
    }

    #[test]
    fn test_error_envelope() {
        let error = AppError::InvalidInput("bad clause".to_string());
        let json = serde_json::to_value(ErrorEnvelope::from_error(&error)).unwrap();
        assert_eq!(json["code"], "invalid_input");
        assert_eq!(json["message"], "Invalid input: bad clause");
        assert!(json.get("details").is_none());
    }
}
