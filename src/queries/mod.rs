//! Query modules for the auction sales store.
//!
//! Each module provides a query struct that borrows a
//! [`Connection`](crate::connection::Connection) and exposes typed results.

pub mod filters;
pub mod sales;
pub mod trends;

pub use filters::FilterQuery;
pub use sales::SaleQuery;
pub use trends::{fold_series, TrendFilters, TrendQuery};
