//! Sale record reads and writes against the `auction_sales` table.

use duckdb::types::Value;
use tracing::debug;

use crate::config::{DEFAULT_LIST_LIMIT, SALES_TABLE};
use crate::connection::Connection;
use crate::error::{AuctionError, Result};
use crate::models::{SaleCreate, SaleRecord};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// SaleQuery
// ---------------------------------------------------------------------------

/// Query interface for persisted auction sales.
pub struct SaleQuery<'a> {
    conn: &'a Connection,
}

impl<'a> SaleQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// List sales in insertion order using offset/limit pagination.
    ///
    /// `limit` defaults to 100 when `None`. Both values must fit DuckDB's
    /// BIGINT.
    pub fn list(&self, skip: usize, limit: Option<usize>) -> Result<Vec<SaleRecord>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT);
        check_bigint("skip", skip)?;
        check_bigint("limit", limit)?;

        let (sql, params) = SqlBuilder::new(SALES_TABLE)
            .order_by(&["id ASC"])
            .limit(limit)
            .offset(skip)
            .build();

        self.conn.execute_into(&sql, &params)
    }

    /// Total number of stored sales.
    pub fn count(&self) -> Result<i64> {
        let (sql, params) = SqlBuilder::new(SALES_TABLE)
            .select(&["COUNT(*) AS n"])
            .build();

        Ok(self
            .conn
            .execute_scalar(&sql, &params)?
            .and_then(|v| v.as_i64())
            .unwrap_or(0))
    }

    /// Validate and insert one sale, returning it with its assigned id.
    pub fn create(&self, sale: &SaleCreate) -> Result<SaleRecord> {
        sale.validate()?;
        let sql = format!(
            "INSERT INTO {} (car_name, make, model, sale_price, sale_date, vin, mileage, year, source, url) \
             VALUES (?, ?, ?, ?, CAST(? AS DATE), ?, ?, ?, ?, ?) \
             RETURNING *",
            SALES_TABLE
        );

        let created: Option<SaleRecord> = self
            .conn
            .execute_into(&sql, &insert_params(sale))?
            .into_iter()
            .next();

        let created = created.ok_or(AuctionError::DuckDb(duckdb::Error::QueryReturnedNoRows))?;
        debug!(id = created.id, car_name = %created.car_name, "sale created");
        Ok(created)
    }

    /// Insert every sale inside one transaction.
    ///
    /// Either all sales are stored or, on the first failure, none are.
    pub fn create_many(&self, sales: &[SaleCreate]) -> Result<usize> {
        for sale in sales {
            sale.validate()?;
        }
        self.conn.transaction(|conn| {
            let query = SaleQuery::new(conn);
            for sale in sales {
                query.create(sale)?;
            }
            Ok(sales.len())
        })
    }
}

fn check_bigint(field: &str, value: usize) -> Result<()> {
    if i64::try_from(value).is_err() {
        return Err(AuctionError::validation(
            field,
            format!("must be at most {}, got {}", i64::MAX, value),
        ));
    }
    Ok(())
}

fn insert_params(sale: &SaleCreate) -> Vec<Value> {
    vec![
        Value::Text(sale.car_name.clone()),
        opt_text(&sale.make),
        opt_text(&sale.model),
        sale.sale_price.map(Value::Double).unwrap_or(Value::Null),
        sale.sale_date
            .map(|d| Value::Text(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(Value::Null),
        opt_text(&sale.vin),
        sale.mileage.map(Value::BigInt).unwrap_or(Value::Null),
        sale.year.map(Value::Int).unwrap_or(Value::Null),
        opt_text(&sale.source),
        opt_text(&sale.url),
    ]
}

fn opt_text(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::Text(s.clone()),
        None => Value::Null,
    }
}
