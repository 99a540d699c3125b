//! Client for the third-party auction listings provider.
//!
//! The importer only depends on the [`ListingProvider`] trait, so tests and
//! alternative feeds can stand in for [`OldCarsClient`].

use std::time::Duration;

use reqwest::blocking::Client;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::error::{AuctionError, Result};

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    pub make: String,
    pub model: Option<String>,
    pub limit: u32,
}

/// One provider listing. Every field may be missing in the feed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub auction_end_date: Option<String>,
    pub vin: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub mileage: Option<i64>,
    #[serde(default, deserialize_with = "whole_number")]
    pub year: Option<i32>,
    pub source: Option<String>,
    pub url: Option<String>,
    pub model: Option<String>,
}

/// Integer fields arrive as `12000`, `12000.0` or `"12000"` depending on the feed.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn whole_number<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64>,
{
    use serde::de::Error;

    let raw = match Option::<RawNumber>::deserialize(deserializer)? {
        Some(raw) => raw,
        None => return Ok(None),
    };
    let n = match raw {
        RawNumber::Int(n) => n,
        RawNumber::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => f as i64,
        RawNumber::Float(f) => return Err(D::Error::custom(format!("expected a whole number, got {}", f))),
        RawNumber::Text(s) if s.trim().is_empty() => return Ok(None),
        RawNumber::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| D::Error::custom(format!("expected a whole number, got '{}'", s)))?,
    };
    T::try_from(n)
        .map(Some)
        .map_err(|_| D::Error::custom(format!("{} is out of range", n)))
}

/// Response envelope: `{"data": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    #[serde(default)]
    pub data: Vec<Listing>,
}

// ---------------------------------------------------------------------------
// ListingProvider
// ---------------------------------------------------------------------------

pub trait ListingProvider {
    /// Fetch up to `query.limit` listings. Any failure aborts the caller's import.
    fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>>;
}

// ---------------------------------------------------------------------------
// OldCarsClient
// ---------------------------------------------------------------------------

/// Blocking HTTP client for `GET {base_url}/auctions`.
pub struct OldCarsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OldCarsClient {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(AuctionError::Config("provider base URL is empty".to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }
}

impl ListingProvider for OldCarsClient {
    fn fetch_listings(&self, query: &ListingQuery) -> Result<Vec<Listing>> {
        let url = format!("{}/auctions", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("make", query.make.clone()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(model) = &query.model {
            params.push(("model", model.clone()));
        }

        debug!(%url, make = %query.make, limit = query.limit, "fetching provider listings");
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            return Err(AuctionError::Upstream(format!(
                "GET {} returned {}",
                url, status
            )));
        }

        let page: ListingPage = resp.json()?;
        Ok(page.data)
    }
}
