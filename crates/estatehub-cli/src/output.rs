// Rust guideline compliant 2026-10-12

//! Output formatting module for the EstateHub CLI.
//!
//! This module renders records, query pages, transition targets and errors
//! as JSON envelopes, human-readable tables, or tab-separated plain text.

use crate::terminal::{paint, wrap_text};
use estatehub_app::{AppError, ErrorCode, ErrorEnvelope, PageMeta, SuccessEnvelope};
use estatehub_core::{Entity, QueryResult, Record, RecordKind, Status};
use serde::Serialize;
use serde_json::json;
use tabled::{builder::Builder, settings::Style};
use termcolor::Color;

/// Output formatter trait.
///
/// Defines the interface for rendering command results in one output format.
pub trait OutputFormatter {
    /// Formats a single record for display.
    fn format_record(&self, record: &Record) -> String;

    /// Formats one page of query results, with its paging figures.
    fn format_page(&self, page: &QueryResult<Record>) -> String;

    /// Formats the statuses a record may move to.
    fn format_targets(&self, record: &Record, targets: &[Status]) -> String;

    /// Formats a record after a change, with a short confirmation line.
    fn format_updated(&self, message: &str, record: &Record) -> String;

    /// Formats a confirmation message with no payload.
    fn format_message(&self, message: &str) -> String;

    /// Formats an error for display.
    fn format_error(&self, error: &anyhow::Error) -> String;
}

#[derive(Serialize)]
struct TargetsPayload<'a> {
    kind: RecordKind,
    id: &'a str,
    current: Option<Status>,
    targets: &'a [Status],
}

/// JSON output formatter.
///
/// Wraps every result in the standard success or error envelope.
pub struct JsonFormatter;

impl JsonFormatter {
    fn render<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|e| {
            json!({
                "status": "error",
                "code": ErrorCode::JsonError,
                "message": e.to_string(),
            })
            .to_string()
        })
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_record(&self, record: &Record) -> String {
        Self::render(&SuccessEnvelope::new(record))
    }

    fn format_page(&self, page: &QueryResult<Record>) -> String {
        Self::render(&SuccessEnvelope {
            status: "ok",
            result: &page.rows,
            meta: Some(PageMeta::from(page)),
        })
    }

    fn format_targets(&self, record: &Record, targets: &[Status]) -> String {
        Self::render(&SuccessEnvelope::new(TargetsPayload {
            kind: record.kind(),
            id: record.id(),
            current: record.status(),
            targets,
        }))
    }

    fn format_updated(&self, _message: &str, record: &Record) -> String {
        self.format_record(record)
    }

    fn format_message(&self, message: &str) -> String {
        Self::render(&SuccessEnvelope::new(message))
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        let envelope = match error.downcast_ref::<AppError>() {
            Some(app_error) => ErrorEnvelope::from_error(app_error),
            None => ErrorEnvelope {
                status: "error",
                code: ErrorCode::InvalidInput,
                message: format!("{error:#}"),
                details: None,
            },
        };
        Self::render(&envelope)
    }
}

/// Table output formatter.
///
/// Renders pages as tables and single records as aligned key/value lines.
pub struct TableFormatter {
    use_color: bool,
}

impl TableFormatter {
    /// Creates a new table formatter.
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }
}

impl OutputFormatter for TableFormatter {
    fn format_record(&self, record: &Record) -> String {
        let mut output = String::new();
        for (label, value) in detail_rows(record) {
            let value = if label == "Description" || label == "Message" {
                wrap_text(&value, 14)
            } else {
                value
            };
            output.push_str(&format!("{:<14}{value}\n", format!("{label}:")));
        }
        output
    }

    fn format_page(&self, page: &QueryResult<Record>) -> String {
        let Some(first) = page.rows.first() else {
            return format!("No records found ({} matched).", page.total_matched);
        };

        let mut builder = Builder::default();
        builder.push_record(table_header(first.kind()).iter().map(|h| h.to_string()));
        for record in &page.rows {
            builder.push_record(table_row(record));
        }

        let mut table = builder.build();
        table.with(Style::modern());

        format!("{table}\n{}", page_footer(page))
    }

    fn format_targets(&self, record: &Record, targets: &[Status]) -> String {
        let current = record
            .status()
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        let allowed = if targets.is_empty() {
            "none (terminal status)".to_string()
        } else {
            join_statuses(targets, ", ")
        };
        format!(
            "{} {} ({current}) may move to: {allowed}",
            record.kind(),
            record.id()
        )
    }

    fn format_updated(&self, message: &str, record: &Record) -> String {
        let mark = paint("✓", Color::Green, true, self.use_color);
        format!("{mark} {message}\n{}", self.format_record(record))
    }

    fn format_message(&self, message: &str) -> String {
        let mark = paint("✓", Color::Green, true, self.use_color);
        format!("{mark} {message}")
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        let prefix = paint("Error:", Color::Red, true, self.use_color);
        format!("{prefix} {error:#}")
    }
}

/// Plain text output formatter.
///
/// One tab-separated line per record, for scripts and pipes.
pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn format_record(&self, record: &Record) -> String {
        detail_rows(record)
            .into_iter()
            .map(|(label, value)| format!("{}\t{value}", label.to_ascii_lowercase()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_page(&self, page: &QueryResult<Record>) -> String {
        page.rows
            .iter()
            .map(|record| table_row(record).join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_targets(&self, _record: &Record, targets: &[Status]) -> String {
        join_statuses(targets, "\n")
    }

    fn format_updated(&self, _message: &str, record: &Record) -> String {
        self.format_record(record)
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }

    fn format_error(&self, error: &anyhow::Error) -> String {
        format!("Error: {error:#}")
    }
}

/// Creates an output formatter for `format`: `json`, `plain`, or a table.
pub fn create_formatter(format: &str, use_color: bool) -> Box<dyn OutputFormatter> {
    match format {
        "json" => Box::new(JsonFormatter),
        "plain" => Box::new(PlainFormatter),
        _ => Box::new(TableFormatter::new(use_color)),
    }
}

/// Formats a whole-unit price with thousands separators and its currency.
pub fn format_price(price: u64, currency: &str) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{grouped} {currency}")
}

fn join_statuses(statuses: &[Status], separator: &str) -> String {
    statuses
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(separator)
}

fn page_footer<R>(page: &QueryResult<R>) -> String {
    format!(
        "Page {} of {} ({} matched)",
        page.page.saturating_add(1),
        page.page_count().max(1),
        page.total_matched
    )
}

fn yes_no(flag: bool) -> String {
    let text = if flag { "yes" } else { "no" };
    text.to_string()
}

fn or_dash<T: ToString>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

fn table_header(kind: RecordKind) -> &'static [&'static str] {
    match kind {
        RecordKind::Listing => &["ID", "Title", "City", "Type", "Price", "Status", "Featured"],
        RecordKind::Inquiry => &["ID", "Name", "Type", "Property", "Status", "Source", "Created"],
        RecordKind::Account => &["ID", "Username", "Name", "Role", "Status", "Verified"],
        RecordKind::Amenity => &["ID", "Name", "Icon", "Created"],
    }
}

fn table_row(record: &Record) -> Vec<String> {
    match record {
        Record::Listing(l) => vec![
            l.id.clone(),
            l.title.clone(),
            l.city.clone(),
            l.property_type.to_string(),
            format_price(l.price, &l.currency),
            l.status.to_string(),
            yes_no(l.featured),
        ],
        Record::Inquiry(i) => vec![
            i.id.clone(),
            i.name.clone(),
            i.inquiry_type.to_string(),
            or_dash(i.property.as_deref()),
            i.status.to_string(),
            i.source.to_string(),
            i.created_at.to_string(),
        ],
        Record::Account(a) => vec![
            a.id.clone(),
            a.username.clone(),
            a.full_name(),
            a.role.to_string(),
            a.status().to_string(),
            yes_no(a.email_verified),
        ],
        Record::Amenity(a) => vec![
            a.id.clone(),
            a.name.clone(),
            a.icon.to_string(),
            a.created_at.to_string(),
        ],
    }
}

fn detail_rows(record: &Record) -> Vec<(&'static str, String)> {
    let mut rows = vec![("Kind", record.kind().to_string()), ("ID", record.id().to_string())];
    match record {
        Record::Listing(l) => rows.extend([
            ("Title", l.title.clone()),
            ("Status", l.status.to_string()),
            ("Price", format_price(l.price, &l.currency)),
            ("Offer", l.offer.to_string()),
            ("Type", l.property_type.to_string()),
            ("City", l.city.clone()),
            ("Neighborhood", or_dash(l.neighborhood.as_deref())),
            ("Bedrooms", or_dash(l.bedrooms)),
            ("Bathrooms", or_dash(l.bathrooms)),
            ("Area", or_dash(l.area.map(|a| format!("{a} sq ft")))),
            ("Featured", yes_no(l.featured)),
            ("Slug", l.slug.clone()),
            ("Created", l.created_at.to_string()),
            ("Description", l.description.clone()),
        ]),
        Record::Inquiry(i) => rows.extend([
            ("Name", i.name.clone()),
            ("Status", i.status.to_string()),
            ("Email", i.email.clone()),
            ("Phone", or_dash(i.phone.as_deref())),
            ("Property", or_dash(i.property.as_deref())),
            ("Type", i.inquiry_type.to_string()),
            ("Source", i.source.to_string()),
            ("Created", i.created_at.to_string()),
            ("Message", i.message.clone()),
        ]),
        Record::Account(a) => rows.extend([
            ("Username", a.username.clone()),
            ("Name", a.full_name()),
            ("Status", a.status().to_string()),
            ("Email", a.email.clone()),
            ("Role", a.role.to_string()),
            ("Verified", yes_no(a.email_verified)),
            ("Created", a.created_at.to_string()),
        ]),
        Record::Amenity(a) => rows.extend([
            ("Name", a.name.clone()),
            ("Icon", a.icon.to_string()),
            ("Created", a.created_at.to_string()),
            ("Description", a.description.clone()),
        ]),
    }
    rows
}
