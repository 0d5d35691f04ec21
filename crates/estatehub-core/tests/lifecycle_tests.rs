// Rust guideline compliant 2026-10-12

//! Unit tests for the lifecycle controller.
//!
//! These tests validate the default transition policy, re-listing, the
//! disjoint status spaces and the error conditions.

use chrono::NaiveDate;
use estatehub_core::{
    Account, AccountStatus, Amenity, AmenityIcon, Inquiry, InquirySource, InquiryStatus,
    InquiryType, LifecycleController, LifecycleError, Listing, ListingStatus, OfferType,
    PropertyType, Record, Role, Status, TransitionPolicy,
};

fn listing(status: ListingStatus) -> Listing {
    Listing {
        id: "1".to_string(),
        title: "Modern Downtown Apartment".to_string(),
        description: "Corner unit".to_string(),
        price: 750_000,
        currency: "USD".to_string(),
        city: "Miami".to_string(),
        neighborhood: Some("Brickell".to_string()),
        property_type: PropertyType::Apartment,
        offer: OfferType::Sale,
        status,
        bedrooms: Some(2),
        bathrooms: Some(2.5),
        area: Some(1_200),
        featured: true,
        slug: "modern-downtown-apartment".to_string(),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
    }
}

fn inquiry(status: InquiryStatus) -> Inquiry {
    Inquiry {
        id: "7".to_string(),
        name: "John Smith".to_string(),
        email: "john@example.com".to_string(),
        phone: None,
        property: Some("Modern Downtown Apartment".to_string()),
        inquiry_type: InquiryType::Viewing,
        status,
        source: InquirySource::Website,
        message: "Can I see it on Friday?".to_string(),
        created_at: NaiveDate::from_ymd_opt(2024, 1, 20).unwrap(),
    }
}

fn account(active: bool) -> Account {
    Account {
        id: "2".to_string(),
        username: "jane_agent".to_string(),
        email: "jane@example.com".to_string(),
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        role: Role::Agent,
        active,
        email_verified: true,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
    }
}

#[test]
fn test_sold_listing_is_terminal_by_default() {
    let controller = LifecycleController::default();
    let sold = listing(ListingStatus::Sold);

    assert!(controller.allowed_targets(&sold).is_empty());
    assert_eq!(
        controller.transition(&sold, ListingStatus::Available),
        Err(LifecycleError::InvalidTransition {
            kind: estatehub_core::RecordKind::Listing,
            from: "sold".to_string(),
            to: "available".to_string(),
        })
    );
}

#[test]
fn test_relisting_allows_sold_to_available() {
    let controller = LifecycleController::new(TransitionPolicy::default().with_relisting());
    let sold = listing(ListingStatus::Sold);

    let relisted = controller
        .transition(&sold, ListingStatus::Available)
        .unwrap();
    assert_eq!(relisted.status, ListingStatus::Available);
}

#[test]
fn test_transition_changes_only_status() {
    let controller = LifecycleController::default();
    let original = listing(ListingStatus::Available);

    let offered = controller
        .transition(&original, ListingStatus::UnderOffer)
        .unwrap();
    assert_eq!(offered.status, ListingStatus::UnderOffer);
    assert_eq!(
        Listing {
            status: ListingStatus::Available,
            ..offered
        },
        original
    );
    assert_eq!(original.status, ListingStatus::Available);
}

#[test]
fn test_same_status_is_no_op() {
    let controller = LifecycleController::default();
    let available = listing(ListingStatus::Available);

    assert!(matches!(
        controller.transition(&available, ListingStatus::Available),
        Err(LifecycleError::NoOpTransition { .. })
    ));
}

#[test]
fn test_terminal_status_no_op_is_still_no_op() {
    let controller = LifecycleController::default();
    let spam = inquiry(InquiryStatus::Spam);

    assert!(matches!(
        controller.transition(&spam, InquiryStatus::Spam),
        Err(LifecycleError::NoOpTransition { .. })
    ));
}

#[test]
fn test_new_inquiry_can_be_marked_spam() {
    let controller = LifecycleController::default();
    let spam = controller
        .transition(&inquiry(InquiryStatus::New), InquiryStatus::Spam)
        .unwrap();
    assert_eq!(spam.status, InquiryStatus::Spam);
}

#[test]
fn test_spam_is_terminal() {
    let controller = LifecycleController::default();
    let spam = inquiry(InquiryStatus::Spam);

    assert!(controller.allowed_targets(&spam).is_empty());
    assert!(matches!(
        controller.transition(&spam, InquiryStatus::Contacted),
        Err(LifecycleError::InvalidTransition { .. })
    ));
}

#[test]
fn test_contacted_inquiry_cannot_become_spam() {
    let controller = LifecycleController::default();
    assert!(controller
        .transition(&inquiry(InquiryStatus::Contacted), InquiryStatus::Spam)
        .is_err());
}

#[test]
fn test_inquiry_pipeline() {
    let controller = LifecycleController::default();
    let lead = inquiry(InquiryStatus::New);

    let lead = controller.transition(&lead, InquiryStatus::Contacted).unwrap();
    let lead = controller.transition(&lead, InquiryStatus::Qualified).unwrap();
    let lead = controller.transition(&lead, InquiryStatus::Converted).unwrap();
    let lead = controller.transition(&lead, InquiryStatus::Closed).unwrap();
    assert_eq!(lead.status, InquiryStatus::Closed);
}

#[test]
fn test_account_deactivation_flips_active_flag() {
    let controller = LifecycleController::default();
    let agent = account(true);

    let inactive = controller
        .transition(&agent, AccountStatus::Inactive)
        .unwrap();
    assert!(!inactive.active);
    assert_eq!(inactive.role, Role::Agent);
    assert_eq!(inactive.status(), AccountStatus::Inactive);

    let active = controller
        .transition(&inactive, AccountStatus::Active)
        .unwrap();
    assert!(active.active);
}

#[test]
fn test_role_change_is_independent_of_status() {
    let inactive = account(false);
    let admin = inactive.with_role(Role::Admin);
    assert_eq!(admin.role, Role::Admin);
    assert!(!admin.active);
}

#[test]
fn test_record_targets_follow_table_order() {
    let controller = LifecycleController::default();
    let record = Record::Listing(listing(ListingStatus::OffMarket));

    assert_eq!(
        controller.allowed_record_targets(&record),
        vec![Status::Listing(ListingStatus::Available)]
    );
}

#[test]
fn test_amenity_has_no_lifecycle() {
    let controller = LifecycleController::default();
    let record = Record::Amenity(Amenity {
        id: "1".to_string(),
        name: "Swimming Pool".to_string(),
        description: "Heated outdoor pool".to_string(),
        icon: AmenityIcon::Pool,
        created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    });

    assert!(record.status().is_none());
    assert!(controller.allowed_record_targets(&record).is_empty());
    assert!(matches!(
        controller.transition_record(&record, Status::Listing(ListingStatus::Available)),
        Err(LifecycleError::InvalidTransition { .. })
    ));
}

#[test]
fn test_cross_kind_target_is_invalid() {
    let controller = LifecycleController::default();
    let record = Record::Inquiry(inquiry(InquiryStatus::New));

    assert!(matches!(
        controller.transition_record(&record, Status::Account(AccountStatus::Inactive)),
        Err(LifecycleError::InvalidTransition { .. })
    ));
}

#[test]
fn test_transition_record_wraps_typed_transition() {
    let controller = LifecycleController::default();
    let record = Record::Inquiry(inquiry(InquiryStatus::New));

    let updated = controller
        .transition_record(&record, Status::Inquiry(InquiryStatus::Contacted))
        .unwrap();
    assert_eq!(updated.status(), Some(Status::Inquiry(InquiryStatus::Contacted)));
    assert_eq!(record.status(), Some(Status::Inquiry(InquiryStatus::New)));
}

#[test]
fn test_error_messages() {
    let controller = LifecycleController::default();
    let err = controller
        .transition(&listing(ListingStatus::Sold), ListingStatus::Available)
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot transition listing from 'sold' to 'available'");

    let err = controller
        .transition(&account(true), AccountStatus::Active)
        .unwrap_err();
    assert_eq!(err.to_string(), "account is already 'active'");
}
