// Rust guideline compliant 2026-10-12

//! Property-based tests for the query engine.
//!
//! These tests validate properties that hold for any record set: filtering
//! is idempotent and selects a subset, counts ignore paging, sorting is
//! stable, and the pages of a result tile it exactly.

use chrono::NaiveDate;
use estatehub_core::{
    query, Entity, FilterSpec, Listing, ListingStatus, OfferType, PageRequest, PropertyType,
    QueryResult, QuerySpec, RecordKind, Schema, SortDirection, SortSpec,
};
use proptest::prelude::*;

fn run_query<R>(
    records: &[R],
    filter: &FilterSpec,
    sort: &SortSpec,
    page: PageRequest,
) -> QueryResult<R>
where
    R: Entity + Clone + Sync,
{
    query(records, &QuerySpec::new(filter, sort, page).unwrap())
}

fn arb_listing() -> impl Strategy<Value = Listing> {
    (
        0u64..2_000,
        prop::sample::select(vec!["Miami", "Austin", "Boston"]),
        prop::option::of(300u32..4_000),
        any::<bool>(),
    )
        .prop_map(|(price, city, area, featured)| Listing {
            id: String::new(),
            title: format!("{city} home"),
            description: String::new(),
            price,
            currency: "USD".to_string(),
            city: city.to_string(),
            neighborhood: None,
            property_type: PropertyType::House,
            offer: OfferType::Sale,
            status: ListingStatus::Available,
            bedrooms: None,
            bathrooms: None,
            area,
            featured,
            slug: String::new(),
            created_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        })
}

/// Listings with ids equal to their input position.
fn arb_listings() -> impl Strategy<Value = Vec<Listing>> {
    prop::collection::vec(arb_listing(), 0..60).prop_map(|mut listings| {
        for (i, listing) in listings.iter_mut().enumerate() {
            listing.id = format!("{i:03}");
        }
        listings
    })
}

fn arb_filter() -> impl Strategy<Value = FilterSpec> {
    (0u64..2_000, 0u64..2_000, prop::option::of(any::<bool>())).prop_map(|(a, b, featured)| {
        let schema = Schema::builtin(RecordKind::Listing);
        let mut builder = FilterSpec::builder(&schema)
            .between("price", a.min(b), a.max(b))
            .unwrap();
        if let Some(flag) = featured {
            builder = builder.flag("featured", flag).unwrap();
        }
        builder.build()
    })
}

fn arb_sort() -> impl Strategy<Value = SortSpec> {
    (
        prop::sample::select(vec!["price", "area", "city", "featured"]),
        prop_oneof![Just(SortDirection::Ascending), Just(SortDirection::Descending)],
    )
        .prop_map(|(field, direction)| {
            SortSpec::new(&Schema::builtin(RecordKind::Listing), field, direction).unwrap()
        })
}

fn everything() -> PageRequest {
    PageRequest::new(0, usize::MAX).unwrap()
}

proptest! {
    /// Applying a filter to its own output changes nothing.
    #[test]
    fn prop_filter_idempotent(
        records in arb_listings(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let once = run_query(&records, &filter, &sort, everything());
        let twice = run_query(&once.rows, &filter, &sort, everything());
        prop_assert_eq!(once.rows, twice.rows);
    }

    /// Every returned row is an input record that satisfies the filter.
    #[test]
    fn prop_result_is_matching_subset(
        records in arb_listings(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let result = run_query(&records, &filter, &sort, everything());
        for row in &result.rows {
            prop_assert!(filter.matches(row));
            prop_assert!(records.contains(row));
        }
    }

    /// The match count does not depend on paging or sorting.
    #[test]
    fn prop_count_ignores_paging(
        records in arb_listings(),
        filter in arb_filter(),
        sort in arb_sort(),
        index in 0usize..10,
        size in 1usize..10,
    ) {
        let expected = records.iter().filter(|r| filter.matches(*r)).count();
        let result = run_query(&records, &filter, &sort, PageRequest::new(index, size).unwrap());
        prop_assert_eq!(result.total_matched, expected);
        prop_assert!(result.rows.len() <= size);
    }

    /// Records that tie on the sort key keep their input order.
    #[test]
    fn prop_sort_is_stable(
        records in arb_listings(),
        sort in arb_sort(),
    ) {
        let result = run_query(&records, &FilterSpec::all(RecordKind::Listing), &sort, everything());
        for pair in result.rows.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let key = |l: &Listing| estatehub_core::Entity::field(l, sort.field());
            if key(a) == key(b) {
                prop_assert!(a.id < b.id, "tie reordered: {} before {}", a.id, b.id);
            }
        }
    }

    /// Concatenating every page reproduces the unpaged result.
    #[test]
    fn prop_pages_tile_result(
        records in arb_listings(),
        filter in arb_filter(),
        sort in arb_sort(),
        size in 1usize..8,
    ) {
        let full = run_query(&records, &filter, &sort, everything());
        let mut paged = Vec::new();
        for index in 0..full.total_matched.div_ceil(size) {
            let page = run_query(&records, &filter, &sort, PageRequest::new(index, size).unwrap());
            paged.extend(page.rows);
        }
        prop_assert_eq!(paged, full.rows);
    }

    /// Running the same query twice gives the same page.
    #[test]
    fn prop_query_deterministic(
        records in arb_listings(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let page = PageRequest::new(0, 5).unwrap();
        prop_assert_eq!(
            run_query(&records, &filter, &sort, page),
            run_query(&records, &filter, &sort, page)
        );
    }
}
