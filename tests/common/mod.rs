//! Shared fixtures for the auction-insights integration tests.
//!
//! `setup_sample_store()` returns an in-memory store seeded with a handful of
//! sales spanning several makes, months and levels of completeness.

#![allow(dead_code)]

use std::cell::RefCell;

use auction_insights::provider::{Listing, ListingProvider, ListingQuery};
use auction_insights::{AuctionError, AuctionInsights, Result, SaleCreate};
use chrono::NaiveDate;

pub fn empty_store() -> AuctionInsights {
    AuctionInsights::builder().in_memory().build().unwrap()
}

pub fn sale(
    car_name: &str,
    make: Option<&str>,
    model: Option<&str>,
    price: Option<f64>,
    date: Option<(i32, u32, u32)>,
    year: Option<i32>,
) -> SaleCreate {
    SaleCreate {
        car_name: car_name.to_string(),
        make: make.map(str::to_string),
        model: model.map(str::to_string),
        sale_price: price,
        sale_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        year,
        ..SaleCreate::default()
    }
}

pub fn setup_sample_store() -> AuctionInsights {
    let store = empty_store();
    let sales = vec![
        sale("1965 Porsche 911", Some("Porsche"), Some("911"), Some(100_000.0), Some((2023, 1, 10)), Some(1965)),
        sale("1966 Porsche 911", Some("Porsche"), Some("911"), Some(120_000.0), Some((2023, 1, 24)), Some(1966)),
        sale("1959 Porsche 356", Some("Porsche"), Some("356"), Some(90_000.0), Some((2023, 2, 3)), Some(1959)),
        sale("1972 Ferrari Dino 246", Some("Ferrari"), Some("Dino"), Some(400_000.0), Some((2022, 12, 15)), Some(1972)),
        sale("1970 Ferrari 365 GTB/4", Some("Ferrari"), Some("Daytona"), Some(650_000.0), Some((2023, 2, 20)), Some(1970)),
        sale("1963 Jaguar E-Type", Some("Jaguar"), Some("E-Type"), Some(150_000.0), Some((2023, 1, 2)), Some(1963)),
        // Incomplete records: never bucketed.
        sale("Unpriced Porsche", Some("Porsche"), Some("912"), None, Some((2023, 3, 1)), Some(1967)),
        sale("Undated Porsche", Some("Porsche"), Some("914"), Some(20_000.0), None, Some(1971)),
        sale("Mystery Barn Find", None, None, Some(5_000.0), Some((2023, 3, 5)), None),
    ];
    for s in &sales {
        store.sales().create(s).unwrap();
    }
    store
}

// ---------------------------------------------------------------------------
// Fake provider
// ---------------------------------------------------------------------------

/// Serves canned listings (or a canned failure) and records every query.
pub struct FakeProvider {
    listings: Vec<Listing>,
    fail_with: Option<String>,
    pub queries: RefCell<Vec<ListingQuery>>,
}

impl FakeProvider {
    pub fn with_listings(listings: Vec<Listing>) -> Self {
        Self {
            listings,
            fail_with: None,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            listings: Vec::new(),
            fail_with: Some(message.to_string()),
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl ListingProvider for FakeProvider {
    fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        self.queries.borrow_mut().push(query.clone());
        if let Some(message) = &self.fail_with {
            return Err(AuctionError::Upstream(message.clone()));
        }
        Ok(self.listings.iter().take(query.limit as usize).cloned().collect())
    }
}

pub fn listing(title: Option<&str>, price: Option<f64>, end_date: Option<&str>, model: Option<&str>) -> Listing {
    Listing {
        title: title.map(str::to_string),
        price,
        auction_end_date: end_date.map(str::to_string),
        model: model.map(str::to_string),
        ..Listing::default()
    }
}
