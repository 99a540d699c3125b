//! Distinct filter values for building trend queries on the client.

use serde::de::DeserializeOwned;

use crate::config::SALES_TABLE;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::FilterOptions;
use crate::sql_builder::SqlBuilder;

pub struct FilterQuery<'a> {
    conn: &'a Connection,
}

impl<'a> FilterQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Every make, model and model year present in the store.
    ///
    /// Independent of any trend filter currently applied by the caller.
    pub fn options(&self) -> Result<FilterOptions> {
        Ok(FilterOptions {
            makes: self.distinct("make")?,
            models: self.distinct("model")?,
            years: self.distinct("year")?,
        })
    }

    /// Sorted, non-null distinct values of one column.
    fn distinct<T: DeserializeOwned>(&self, column: &str) -> Result<Vec<T>> {
        let not_null = format!("{} IS NOT NULL", column);
        let ascending = format!("{} ASC", column);
        let (sql, params) = SqlBuilder::new(SALES_TABLE)
            .select(&[column])
            .distinct()
            .where_raw(&not_null)
            .order_by(&[ascending.as_str()])
            .build();

        let rows = self.conn.execute(&sql, &params)?;
        let mut values = Vec::with_capacity(rows.len());
        for mut row in rows {
            if let Some(value) = row.remove(column) {
                values.push(serde_json::from_value(value)?);
            }
        }
        Ok(values)
    }
}
