use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{AuctionError, Result};

// ---------------------------------------------------------------------------
// SaleCreate — Insert payload for one auction sale
// ---------------------------------------------------------------------------

/// A sale observation before the store has assigned it an identifier.
///
/// Only `car_name` is required; the provider feed is inconsistent, so every
/// other field tolerates being absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SaleCreate {
    pub car_name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub sale_price: Option<f64>,
    pub sale_date: Option<NaiveDate>,
    pub vin: Option<String>,
    pub mileage: Option<i64>,
    pub year: Option<i32>,
    pub source: Option<String>,
    pub url: Option<String>,
}

impl SaleCreate {
    /// Shorthand for a record carrying only a display name.
    pub fn named(car_name: impl Into<String>) -> Self {
        Self {
            car_name: car_name.into(),
            ..Self::default()
        }
    }

    /// Check the field constraints the store enforces.
    pub fn validate(&self) -> Result<()> {
        if self.car_name.trim().is_empty() {
            return Err(AuctionError::validation("car_name", "must not be empty"));
        }
        if let Some(price) = self.sale_price {
            if !price.is_finite() || price < 0.0 {
                return Err(AuctionError::validation(
                    "sale_price",
                    format!("must be a non-negative number, got {}", price),
                ));
            }
        }
        if let Some(date) = self.sale_date {
            if !(1..=9999).contains(&date.year()) {
                return Err(AuctionError::validation(
                    "sale_date",
                    format!("year must be between 1 and 9999, got {}", date.year()),
                ));
            }
        }
        if let Some(mileage) = self.mileage {
            if mileage < 0 || mileage > i32::MAX as i64 {
                return Err(AuctionError::validation(
                    "mileage",
                    format!("must be between 0 and {}, got {}", i32::MAX, mileage),
                ));
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SaleRecord — Persisted auction sale
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    pub id: i64,
    pub car_name: String,
    pub make: Option<String>,
    pub model: Option<String>,
    pub sale_price: Option<f64>,
    pub sale_date: Option<NaiveDate>,
    pub vin: Option<String>,
    pub mileage: Option<i64>,
    pub year: Option<i32>,
    pub source: Option<String>,
    pub url: Option<String>,
}

impl SaleRecord {
    /// The record's fields without the store-assigned identifier.
    pub fn to_create(&self) -> SaleCreate {
        SaleCreate {
            car_name: self.car_name.clone(),
            make: self.make.clone(),
            model: self.model.clone(),
            sale_price: self.sale_price,
            sale_date: self.sale_date,
            vin: self.vin.clone(),
            mileage: self.mileage,
            year: self.year,
            source: self.source.clone(),
            url: self.url.clone(),
        }
    }
}
