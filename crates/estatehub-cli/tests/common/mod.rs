// Rust guideline compliant 2026-10-12

//! Shared fixtures for CLI binary tests.

#![allow(dead_code)]

use chrono::NaiveDate;
use estatehub_core::{
    Account, Inquiry, InquirySource, InquiryStatus, InquiryType, Listing, ListingStatus,
    OfferType, PropertyType, Record, Role,
};
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

pub fn listing(id: &str, price: u64, property_type: PropertyType, status: ListingStatus, day: u32) -> Record {
    Record::Listing(Listing {
        id: id.to_string(),
        title: format!("Home {id}"),
        description: "Bright corner unit close to the beach".to_string(),
        price,
        currency: "USD".to_string(),
        city: "Miami".to_string(),
        neighborhood: Some("Brickell".to_string()),
        property_type,
        offer: OfferType::Sale,
        status,
        bedrooms: Some(2),
        bathrooms: Some(2.0),
        area: Some(1_100),
        featured: false,
        slug: format!("home-{id}"),
        created_at: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
    })
}

pub fn inquiry(id: &str, name: &str, status: InquiryStatus) -> Record {
    Record::Inquiry(Inquiry {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_ascii_lowercase().replace(' ', ".")),
        phone: None,
        property: Some("Home 1".to_string()),
        inquiry_type: InquiryType::Viewing,
        status,
        source: InquirySource::Website,
        message: "Is the unit still available?".to_string(),
        created_at: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
    })
}

pub fn account(id: &str, username: &str) -> Record {
    Record::Account(Account {
        id: id.to_string(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        first_name: "Mike".to_string(),
        last_name: "Agent".to_string(),
        role: Role::Viewer,
        active: true,
        email_verified: false,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    })
}

/// Runs the `estate` binary in `dir` with a clean EstateHub environment.
pub fn estate(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_estate"))
        .current_dir(dir)
        .args(args)
        .env_remove("ESTATEHUB_LOG")
        .env_remove("ESTATEHUB_DEFAULT_PAGE_SIZE")
        .env_remove("ESTATEHUB_ALLOW_RELISTING")
        .env_remove("ESTATEHUB_OUTPUT_FORMAT")
        .env("NO_COLOR", "1")
        .output()
        .expect("run estate")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

/// Initializes a repository through the binary and seeds its record file.
pub fn seeded_repo() -> TempDir {
    let temp_dir = TempDir::new().expect("temp dir");
    let output = estate(temp_dir.path(), &["init"]);
    assert!(output.status.success(), "init failed: {}", stderr(&output));

    let records = [
        listing("1", 650_000, PropertyType::Apartment, ListingStatus::Available, 1),
        listing("2", 750_000, PropertyType::Villa, ListingStatus::Available, 2),
        listing("3", 850_000, PropertyType::Apartment, ListingStatus::Sold, 3),
        inquiry("1", "Alice Buyer", InquiryStatus::New),
        inquiry("2", "Bob Renter", InquiryStatus::Spam),
        account("1", "mike_agent"),
    ];
    let lines: Vec<String> = records
        .iter()
        .map(|record| serde_json::to_string(record).expect("serialize"))
        .collect();
    fs::write(
        temp_dir.path().join(".estatehub").join("records.jsonl"),
        lines.join("\n") + "\n",
    )
    .expect("seed records");

    temp_dir
}

pub fn records_file(dir: &Path) -> String {
    fs::read_to_string(dir.join(".estatehub").join("records.jsonl")).expect("read records")
}

pub fn json(output: &Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!("expected JSON output ({e}), got:\n{}", stdout(output))
    })
}
