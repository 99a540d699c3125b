//! Ingestion job tests using a fake listings provider.

mod common;

use auction_insights::{AuctionError, TrendFilters};
use chrono::NaiveDate;
use common::{listing, FakeProvider};

#[test]
fn import_maps_and_stores_every_listing() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(vec![
        listing(Some("1962 Ferrari 250 GTO"), Some(48_000_000.0), Some("2023-08-13"), Some("250 GTO")),
        listing(Some("1989 Ferrari F40"), Some(2_500_000.0), Some("2023-09-02T18:30:00Z"), None),
    ]);

    let summary = store.import_with(&provider, "Ferrari", None, 50).unwrap();
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.make, "Ferrari");
    assert!(summary.model.is_none());

    let sales = store.sales().list(0, None).unwrap();
    assert_eq!(sales.len(), 2);
    assert_eq!(sales[0].car_name, "1962 Ferrari 250 GTO");
    assert_eq!(sales[0].model.as_deref(), Some("250 GTO"));
    assert_eq!(sales[0].sale_date, NaiveDate::from_ymd_opt(2023, 8, 13));
    assert_eq!(sales[1].sale_date, NaiveDate::from_ymd_opt(2023, 9, 2));
    assert!(sales[1].model.is_none());
}

#[test]
fn requested_make_overrides_provider_labels() {
    let store = common::empty_store();
    let mut mislabeled = listing(Some("Dino 246 GT"), Some(350_000.0), Some("2023-05-01"), Some("Dino"));
    mislabeled.source = Some("Dino".to_string());
    let provider = FakeProvider::with_listings(vec![mislabeled]);

    store.import_with(&provider, "Ferrari", Some("246 GT"), 10).unwrap();

    let sales = store.sales().list(0, None).unwrap();
    assert_eq!(sales[0].make.as_deref(), Some("Ferrari"));
    assert_eq!(sales[0].model.as_deref(), Some("246 GT"));
}

#[test]
fn provider_receives_query_parameters() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(Vec::new());

    let summary = store.import_with(&provider, " Porsche ", Some("911"), 25).unwrap();
    assert_eq!(summary.imported, 0);
    assert_eq!(summary.make, "Porsche");
    assert_eq!(summary.model.as_deref(), Some("911"));

    let queries = provider.queries.borrow();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].make, "Porsche");
    assert_eq!(queries[0].model.as_deref(), Some("911"));
    assert_eq!(queries[0].limit, 25);
}

#[test]
fn missing_title_aborts_whole_import() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(vec![
        listing(Some("1967 Ferrari 275 GTB/4"), Some(3_000_000.0), Some("2023-01-01"), None),
        listing(None, Some(1_000.0), Some("2023-01-02"), None),
    ]);

    let err = store.import_with(&provider, "Ferrari", None, 2).unwrap_err();
    assert!(matches!(err, AuctionError::Validation { ref field, .. } if field == "title"));
    assert_eq!(store.sales().count().unwrap(), 0);
}

#[test]
fn upstream_failure_aborts_import() {
    let store = common::empty_store();
    let provider = FakeProvider::failing("503 Service Unavailable");

    let err = store.import_with(&provider, "Ferrari", None, 10).unwrap_err();
    assert!(matches!(err, AuctionError::Upstream(_)));
    assert_eq!(store.sales().count().unwrap(), 0);
}

#[test]
fn limit_outside_bounds_is_rejected_before_fetching() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(Vec::new());

    for limit in [0, 201] {
        let err = store.import_with(&provider, "Ferrari", None, limit).unwrap_err();
        assert!(matches!(err, AuctionError::Validation { ref field, .. } if field == "limit"));
    }
    assert!(provider.queries.borrow().is_empty());
}

#[test]
fn blank_make_is_rejected() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(Vec::new());
    let err = store.import_with(&provider, "  ", None, 10).unwrap_err();
    assert!(matches!(err, AuctionError::Validation { ref field, .. } if field == "make"));
}

#[test]
fn repeated_imports_are_not_deduplicated() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(vec![listing(
        Some("1955 Mercedes-Benz 300SL"),
        Some(1_400_000.0),
        Some("2023-03-03"),
        Some("300SL"),
    )]);

    store.import_with(&provider, "Mercedes-Benz", None, 5).unwrap();
    store.import_with(&provider, "Mercedes-Benz", None, 5).unwrap();
    assert_eq!(store.sales().count().unwrap(), 2);
}

#[test]
fn imported_sales_feed_trends() {
    let store = common::empty_store();
    let provider = FakeProvider::with_listings(vec![
        listing(Some("Miura P400"), Some(1_000_000.0), Some("2023-04-01"), None),
        listing(Some("Miura SV"), Some(3_000_000.0), Some("2023-04-20"), None),
    ]);
    store.import_with(&provider, "Lamborghini", None, 10).unwrap();

    let resp = store
        .trends()
        .compute(&TrendFilters::for_makes(["Lamborghini"]))
        .unwrap();
    assert_eq!(resp.series[0].data[0].period, "2023-04");
    assert_eq!(resp.series[0].data[0].avg_price, 2_000_000.0);
}

#[test]
fn import_without_provider_settings_is_a_config_error() {
    let store = common::empty_store();
    let err = store.import_sales("Ferrari", None, 10).unwrap_err();
    assert!(matches!(err, AuctionError::Config(_)));
}
