//! Pull listings from a provider and store them as sales.
//!
//! An import is all-or-nothing: listings are fetched, every listing is mapped
//! and validated, and only then are the records written in one transaction.

use chrono::NaiveDate;
use tracing::{info, warn};

use crate::config::{MAX_IMPORT_LIMIT, MIN_IMPORT_LIMIT};
use crate::connection::Connection;
use crate::error::{AuctionError, Result};
use crate::models::SaleCreate;
use crate::provider::{Listing, ListingProvider, ListingQuery};
use crate::queries::SaleQuery;

pub struct Importer<'a, P: ?Sized> {
    conn: &'a Connection,
    provider: &'a P,
}

impl<'a, P: ListingProvider + ?Sized> Importer<'a, P> {
    pub fn new(conn: &'a Connection, provider: &'a P) -> Self {
        Self { conn, provider }
    }

    /// Import up to `limit` listings for `make` (and `model`, if given).
    ///
    /// Returns how many sales were stored. Provider failures and listings
    /// without a title abort the whole import with nothing stored.
    pub fn import_sales(&self, make: &str, model: Option<&str>, limit: u32) -> Result<usize> {
        let make = make.trim();
        if make.is_empty() {
            return Err(AuctionError::validation("make", "must not be empty"));
        }
        validate_import_limit(limit)?;
        let model = model.map(str::trim).filter(|m| !m.is_empty());

        let query = ListingQuery {
            make: make.to_string(),
            model: model.map(str::to_string),
            limit,
        };
        let listings = self.provider.fetch_listings(&query)?;

        let sales = listings
            .into_iter()
            .map(|listing| listing_to_sale(listing, make, model))
            .collect::<Result<Vec<_>>>()?;

        let imported = SaleQuery::new(self.conn).create_many(&sales)?;
        info!(make, model = ?model, imported, "import finished");
        Ok(imported)
    }
}

pub fn validate_import_limit(limit: u32) -> Result<()> {
    if !(MIN_IMPORT_LIMIT..=MAX_IMPORT_LIMIT).contains(&limit) {
        return Err(AuctionError::validation(
            "limit",
            format!(
                "must be between {} and {}, got {}",
                MIN_IMPORT_LIMIT, MAX_IMPORT_LIMIT, limit
            ),
        ));
    }
    Ok(())
}

/// Map a provider listing onto a sale.
///
/// The requested make always wins over the provider's labelling. The
/// requested model wins too when one was given; otherwise the listing's own
/// model is kept.
pub fn listing_to_sale(listing: Listing, make: &str, model: Option<&str>) -> Result<SaleCreate> {
    let car_name = listing
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuctionError::validation("title", "listing has no title"))?;

    let sale_date = listing
        .auction_end_date
        .as_deref()
        .and_then(|raw| match parse_sale_date(raw) {
            Some(date) => Some(date),
            None => {
                warn!(raw, car_name = %car_name, "unparsable auction_end_date, leaving sale date empty");
                None
            }
        });

    Ok(SaleCreate {
        car_name,
        make: Some(make.to_string()),
        model: model.map(str::to_string).or(listing.model),
        sale_price: listing.price,
        sale_date,
        vin: listing.vin,
        mileage: listing.mileage,
        year: listing.year,
        source: listing.source,
        url: listing.url,
    })
}

/// Accepts `YYYY-MM-DD` alone or as the prefix of a date-time.
fn parse_sale_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
