//! Classic-car auction sales with monthly price-trend analytics.
//!
//! Sale records are kept in a DuckDB table, imported from a third-party
//! listings provider or created one at a time, and summarised per make and
//! per calendar month for charting.
//!
//! # Quick start
//!
//! ```no_run
//! use auction_insights::{AuctionInsights, TrendFilters};
//!
//! let insights = AuctionInsights::builder()
//!     .in_memory()
//!     .provider("https://api.example.com/v1", "secret")
//!     .build()
//!     .unwrap();
//!
//! insights.import_sales("Porsche", None, 50).unwrap();
//! let trends = insights.trends().compute(&TrendFilters::for_makes(["Porsche"])).unwrap();
//! ```

#[cfg(feature = "async")]
pub mod async_client;
pub mod config;
pub mod connection;
pub mod error;
pub mod ingest;
pub mod models;
pub mod provider;
pub mod queries;
pub mod sql_builder;

#[cfg(feature = "async")]
pub use async_client::AsyncAuctionInsights;
pub use config::Settings;
pub use connection::Connection;
pub use error::{AuctionError, Result};
pub use ingest::Importer;
pub use models::{FilterOptions, ImportSummary, SaleCreate, SaleRecord, TrendPoint, TrendResponse, TrendSeries};
pub use provider::{Listing, ListingProvider, ListingQuery, OldCarsClient};
pub use queries::TrendFilters;
pub use sql_builder::SqlBuilder;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ---------------------------------------------------------------------------
// AuctionInsightsBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing an [`AuctionInsights`] instance.
pub struct AuctionInsightsBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
    provider: ProviderSettings,
}

impl Default for AuctionInsightsBuilder {
    fn default() -> Self {
        Self {
            database_path: None,
            in_memory: false,
            provider: ProviderSettings {
                base_url: None,
                api_key: None,
                timeout: config::DEFAULT_PROVIDER_TIMEOUT,
            },
        }
    }
}

impl AuctionInsightsBuilder {
    /// Start from environment-derived [`Settings`].
    pub fn from_settings(settings: &Settings) -> Self {
        let mut builder = Self::default();
        match &settings.database_path {
            Some(path) => builder.database_path = Some(path.clone()),
            None => builder.in_memory = true,
        }
        builder.provider = ProviderSettings {
            base_url: settings.provider_base_url.clone(),
            api_key: settings.provider_api_key.clone(),
            timeout: settings.provider_timeout,
        };
        builder
    }

    /// Store sales in the DuckDB file at `path`.
    ///
    /// If neither this nor [`in_memory`](Self::in_memory) is called, the
    /// platform data directory is used (e.g.
    /// `~/.local/share/auction-insights/auction_sales.duckdb` on Linux).
    pub fn database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self.in_memory = false;
        self
    }

    /// Keep sales in memory only; they are lost when the instance is dropped.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Configure the listings provider used by [`AuctionInsights::import_sales`].
    pub fn provider(mut self, base_url: &str, api_key: &str) -> Self {
        self.provider.base_url = Some(base_url.to_string());
        self.provider.api_key = Some(api_key.to_string());
        self
    }

    /// Set the HTTP request timeout for provider calls.
    ///
    /// Defaults to 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.provider.timeout = timeout;
        self
    }

    /// Open the store, creating the schema if needed.
    pub fn build(self) -> Result<AuctionInsights> {
        let conn = if self.in_memory {
            Connection::open_in_memory()?
        } else {
            let path = self.database_path.unwrap_or_else(config::default_database_path);
            Connection::open(path)?
        };
        Ok(AuctionInsights {
            conn,
            provider: self.provider,
        })
    }
}

#[derive(Debug, Clone)]
struct ProviderSettings {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Duration,
}

// ---------------------------------------------------------------------------
// AuctionInsights
// ---------------------------------------------------------------------------

/// The main entry point: a store connection plus provider settings.
///
/// Query interfaces are lightweight wrappers borrowing the connection.
pub struct AuctionInsights {
    conn: Connection,
    provider: ProviderSettings,
}

impl AuctionInsights {
    pub fn builder() -> AuctionInsightsBuilder {
        AuctionInsightsBuilder::default()
    }

    /// Open a scoped session on the same database.
    ///
    /// The returned instance holds its own connection, released when dropped.
    pub fn session(&self) -> Result<Self> {
        Ok(Self {
            conn: self.conn.session()?,
            provider: self.provider.clone(),
        })
    }

    // -- Query accessors ---------------------------------------------------

    /// List and create sale records.
    pub fn sales(&self) -> queries::SaleQuery<'_> {
        queries::SaleQuery::new(&self.conn)
    }

    /// Monthly price trends per make.
    pub fn trends(&self) -> queries::TrendQuery<'_> {
        queries::TrendQuery::new(&self.conn)
    }

    /// Distinct makes, models and years for filter pickers.
    pub fn filters(&self) -> queries::FilterQuery<'_> {
        queries::FilterQuery::new(&self.conn)
    }

    // -- Ingestion ----------------------------------------------------------

    /// Build a client for the configured provider.
    ///
    /// Fails with [`AuctionError::Config`] when the base URL or API key is unset.
    pub fn provider_client(&self) -> Result<OldCarsClient> {
        let base_url = self.provider.base_url.as_deref().ok_or_else(|| {
            AuctionError::Config("OLD_CARS_BASE_URL is not configured".to_string())
        })?;
        let api_key = self.provider.api_key.as_deref().ok_or_else(|| {
            AuctionError::Config("OLD_CARS_API_KEY is not configured".to_string())
        })?;
        OldCarsClient::new(base_url, api_key, self.provider.timeout)
    }

    /// Import listings from the configured provider.
    pub fn import_sales(&self, make: &str, model: Option<&str>, limit: u32) -> Result<ImportSummary> {
        let client = self.provider_client()?;
        self.import_with(&client, make, model, limit)
    }

    /// Import listings from any [`ListingProvider`].
    pub fn import_with<P: ListingProvider + ?Sized>(
        &self,
        provider: &P,
        make: &str,
        model: Option<&str>,
        limit: u32,
    ) -> Result<ImportSummary> {
        let imported = Importer::new(&self.conn, provider).import_sales(make, model, limit)?;
        Ok(ImportSummary {
            imported,
            make: make.trim().to_string(),
            model: model.map(str::trim).filter(|m| !m.is_empty()).map(str::to_string),
        })
    }

    /// Return a reference to the underlying [`Connection`] for advanced usage.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for AuctionInsights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "AuctionInsights(provider={}, timeout={}s)",
            self.provider.base_url.as_deref().unwrap_or("<unset>"),
            self.provider.timeout.as_secs()
        )
    }
}
