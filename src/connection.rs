//! DuckDB connection wrapper with schema bootstrap and query execution.
//!
//! A [`Connection`] owns one DuckDB connection handle. Additional handles to
//! the same database are opened with [`Connection::session`], which is how
//! callers scope store access to a single unit of work: the session is
//! released as soon as it is dropped, whether the work succeeded or not.

use crate::config::SALES_TABLE;
use crate::error::{AuctionError, Result};
use chrono::{Days, NaiveDate};
use duckdb::types::{Value, ValueRef};
use duckdb::Connection as DuckDbConnection;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

fn schema_sql() -> String {
    format!(
        "CREATE SEQUENCE IF NOT EXISTS {table}_id_seq START 1;
         CREATE TABLE IF NOT EXISTS {table} (
             id INTEGER PRIMARY KEY DEFAULT nextval('{table}_id_seq'),
             car_name VARCHAR NOT NULL,
             make VARCHAR(100),
             model VARCHAR(200),
             sale_price DOUBLE CHECK (sale_price >= 0),
             sale_date DATE,
             vin VARCHAR,
             mileage INTEGER CHECK (mileage >= 0),
             year INTEGER,
             source VARCHAR,
             url VARCHAR
         );
         CREATE INDEX IF NOT EXISTS ix_{table}_make ON {table} (make);",
        table = SALES_TABLE
    )
}

/// Wraps a DuckDB connection holding the auction sales table.
pub struct Connection {
    conn: DuckDbConnection,
}

impl Connection {
    /// Open (or create) a file-backed database and make sure the schema exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let conn = DuckDbConnection::open(path)?;
        debug!(path = %path.display(), "opened auction sales database");
        let conn = Self { conn };
        conn.ensure_schema()?;
        Ok(conn)
    }

    /// Open a private in-memory database with the schema in place.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Self {
            conn: DuckDbConnection::open_in_memory()?,
        };
        conn.ensure_schema()?;
        Ok(conn)
    }

    /// Open another handle onto the same database.
    ///
    /// Sessions see every committed write made through any other handle,
    /// including for in-memory databases.
    pub fn session(&self) -> Result<Self> {
        Ok(Self {
            conn: self.conn.try_clone()?,
        })
    }

    fn ensure_schema(&self) -> Result<()> {
        self.conn.execute_batch(&schema_sql())?;
        debug!(table = SALES_TABLE, "schema ready");
        Ok(())
    }

    /// Execute SQL and return results as a `Vec` of `HashMap`s.
    ///
    /// DuckDB values are converted to `serde_json::Value`; dates come back as
    /// `YYYY-MM-DD` strings.
    pub fn execute(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<HashMap<String, serde_json::Value>>> {
        let mut stmt = self.conn.prepare(sql)?;

        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;

        // Column metadata is only available once the statement has run.
        let executed = rows
            .as_ref()
            .ok_or_else(|| AuctionError::Runtime(format!("statement did not run: {}", sql)))?;
        let column_names: Vec<String> = executed
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut map = HashMap::with_capacity(column_names.len());
            for (i, name) in column_names.iter().enumerate() {
                map.insert(name.clone(), convert_value_ref(row.get_ref(i)?));
            }
            out.push(map);
        }

        Ok(out)
    }

    /// Execute SQL and deserialize each row into type `T`.
    pub fn execute_into<T: DeserializeOwned>(&self, sql: &str, params: &[Value]) -> Result<Vec<T>> {
        let rows = self.execute(sql, params)?;
        let mut results = Vec::with_capacity(rows.len());
        for row in rows {
            let value = serde_json::Value::Object(row.into_iter().collect());
            results.push(serde_json::from_value(value)?);
        }
        Ok(results)
    }

    /// Execute SQL and return the first column of the first row.
    ///
    /// Returns `None` if the result set is empty.
    pub fn execute_scalar(&self, sql: &str, params: &[Value]) -> Result<Option<serde_json::Value>> {
        let mut stmt = self.conn.prepare(sql)?;
        let param_values: Vec<&dyn duckdb::ToSql> =
            params.iter().map(|p| p as &dyn duckdb::ToSql).collect();

        let mut rows = stmt.query(param_values.as_slice())?;
        match rows.next()? {
            Some(row) => Ok(Some(convert_value_ref(row.get_ref(0)?))),
            None => Ok(None),
        }
    }

    /// Run `f` inside one transaction.
    ///
    /// Commits when `f` returns `Ok`, rolls back otherwise.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Self) -> Result<T>,
    {
        self.conn.execute_batch("BEGIN TRANSACTION")?;
        match f(self) {
            Ok(value) => {
                self.conn.execute_batch("COMMIT")?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback) = self.conn.execute_batch("ROLLBACK") {
                    debug!(error = %rollback, "rollback failed");
                }
                Err(e)
            }
        }
    }
}

/// Convert a DuckDB `ValueRef` to a `serde_json::Value`.
fn convert_value_ref(val: ValueRef<'_>) -> serde_json::Value {
    match val {
        ValueRef::Null => serde_json::Value::Null,
        ValueRef::Boolean(b) => serde_json::Value::Bool(b),
        ValueRef::TinyInt(n) => n.into(),
        ValueRef::SmallInt(n) => n.into(),
        ValueRef::Int(n) => n.into(),
        ValueRef::BigInt(n) => n.into(),
        ValueRef::UTinyInt(n) => n.into(),
        ValueRef::USmallInt(n) => n.into(),
        ValueRef::UInt(n) => n.into(),
        ValueRef::UBigInt(n) => n.into(),
        ValueRef::HugeInt(n) => match i64::try_from(n) {
            Ok(i) => i.into(),
            Err(_) => serde_json::Value::String(n.to_string()),
        },
        ValueRef::Float(f) => serde_json::Number::from_f64(f as f64)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Double(f) => serde_json::Number::from_f64(f)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        ValueRef::Text(bytes) => serde_json::Value::String(String::from_utf8_lossy(bytes).to_string()),
        ValueRef::Date32(days) => date_from_epoch_days(days)
            .map(|d| serde_json::Value::String(d.format("%Y-%m-%d").to_string()))
            .unwrap_or(serde_json::Value::Null),
        _ => serde_json::Value::Null,
    }
}

fn date_from_epoch_days(days: i32) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    if days >= 0 {
        epoch.checked_add_days(Days::new(days as u64))
    } else {
        epoch.checked_sub_days(Days::new(days.unsigned_abs() as u64))
    }
}
