//! Async wrapper around [`AuctionInsights`] for use in Tokio runtimes.
//!
//! Every call opens a scoped session on the shared database and runs the
//! work on Tokio's blocking pool, keeping the async event loop free. The
//! session, including its DuckDB connection, is dropped when the work
//! finishes, whatever the outcome.
//!
//! # Example
//!
//! ```no_run
//! use auction_insights::{AsyncAuctionInsights, AuctionInsights, TrendFilters};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let sdk = AsyncAuctionInsights::new(AuctionInsights::builder().in_memory().build().unwrap());
//!
//!     let trends = sdk
//!         .run(|s| s.trends().compute(&TrendFilters::default()))
//!         .await
//!         .unwrap();
//! }
//! ```

use std::sync::{Arc, Mutex};

use crate::error::{AuctionError, Result};
use crate::{AuctionInsights, AuctionInsightsBuilder};

/// Async handle to an [`AuctionInsights`] store. Cheap to clone.
///
/// The root instance sits behind a [`Mutex`] because a DuckDB connection is
/// not `Sync`; the lock is held only while a new session is opened.
#[derive(Clone)]
pub struct AsyncAuctionInsights {
    root: Arc<Mutex<AuctionInsights>>,
}

impl AsyncAuctionInsights {
    pub fn new(root: AuctionInsights) -> Self {
        Self {
            root: Arc::new(Mutex::new(root)),
        }
    }

    /// Build the underlying store on the blocking pool.
    pub async fn build(builder: AuctionInsightsBuilder) -> Result<Self> {
        tokio::task::spawn_blocking(move || builder.build().map(Self::new))
            .await
            .map_err(|e| AuctionError::Runtime(format!("Task join error: {e}")))?
    }

    /// Run a sync operation against a fresh session on the blocking pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&AuctionInsights) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let root = self.root.clone();
        tokio::task::spawn_blocking(move || {
            let session = {
                let guard = root
                    .lock()
                    .map_err(|_| AuctionError::Runtime("store lock poisoned".into()))?;
                guard.session()?
            };
            f(&session)
        })
        .await
        .map_err(|e| AuctionError::Runtime(format!("Task join error: {e}")))?
    }
}
