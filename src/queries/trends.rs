//! Monthly price trends per make.
//!
//! Aggregation runs in two passes. The store groups priced, dated sales by
//! `(make, year, month)` and returns the buckets in chronological order; the
//! buckets are then folded into one [`TrendSeries`] per make, in the order
//! each make is first seen.

use std::collections::HashMap;

use duckdb::types::Value;

use crate::config::SALES_TABLE;
use crate::connection::Connection;
use crate::error::Result;
use crate::models::{MonthlyBucket, TrendPoint, TrendResponse, TrendSeries};
use crate::sql_builder::SqlBuilder;

// ---------------------------------------------------------------------------
// TrendFilters
// ---------------------------------------------------------------------------

/// Restrictions applied before grouping.
///
/// An empty `makes` list means every make. Year bounds are inclusive and
/// apply to the model year, not the sale date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrendFilters {
    pub makes: Vec<String>,
    pub model: Option<String>,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
}

impl TrendFilters {
    pub fn for_makes<I, S>(makes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            makes: makes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// TrendQuery
// ---------------------------------------------------------------------------

pub struct TrendQuery<'a> {
    conn: &'a Connection,
}

impl<'a> TrendQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Compute one series per make matching `filters`.
    ///
    /// Sales without a price, a sale date or a make are skipped. No matching
    /// sales yields an empty response.
    pub fn compute(&self, filters: &TrendFilters) -> Result<TrendResponse> {
        let buckets = self.monthly_buckets(filters)?;
        Ok(TrendResponse {
            series: fold_series(buckets),
        })
    }

    /// Grouped `(make, year, month)` statistics, oldest month first.
    ///
    /// Makes sharing a month are ordered by name.
    pub fn monthly_buckets(&self, filters: &TrendFilters) -> Result<Vec<MonthlyBucket>> {
        let mut qb = SqlBuilder::new(SALES_TABLE);
        qb.select(&[
            "make",
            "CAST(year(sale_date) AS INTEGER) AS sale_year",
            "CAST(month(sale_date) AS INTEGER) AS sale_month",
            "ROUND(AVG(sale_price), 2) AS avg_price",
            "ROUND(MIN(sale_price), 2) AS min_price",
            "ROUND(MAX(sale_price), 2) AS max_price",
            "COUNT(*) AS count",
        ]);
        qb.where_raw("sale_price IS NOT NULL")
            .where_raw("sale_date IS NOT NULL")
            .where_raw("make IS NOT NULL");

        if !filters.makes.is_empty() {
            qb.where_in("make", &filters.makes);
        }
        if let Some(model) = &filters.model {
            qb.where_eq("model", Value::Text(model.clone()));
        }
        if let Some(min) = filters.year_min {
            qb.where_gte("year", Value::Int(min));
        }
        if let Some(max) = filters.year_max {
            qb.where_lte("year", Value::Int(max));
        }

        qb.group_by(&["make", "sale_year", "sale_month"])
            .order_by(&["sale_year ASC", "sale_month ASC", "make ASC"]);

        let (sql, params) = qb.build();
        self.conn.execute_into(&sql, &params)
    }
}

// ---------------------------------------------------------------------------
// Folding buckets into series
// ---------------------------------------------------------------------------

/// Accumulates points per make while remembering first-seen order.
#[derive(Default)]
struct SeriesAccumulator {
    groups: Vec<(String, Vec<TrendPoint>)>,
    index: HashMap<String, usize>,
}

impl SeriesAccumulator {
    fn push(&mut self, make: String, point: TrendPoint) {
        match self.index.get(&make) {
            Some(&slot) => self.groups[slot].1.push(point),
            None => {
                self.index.insert(make.clone(), self.groups.len());
                self.groups.push((make, vec![point]));
            }
        }
    }

    fn finish(self) -> Vec<TrendSeries> {
        self.groups
            .into_iter()
            .map(|(make, data)| {
                let total_count: i64 = data.iter().map(|p| p.count).sum();
                let weighted: f64 = data.iter().map(|p| p.avg_price * p.count as f64).sum();
                let avg_price = if total_count == 0 {
                    0.0
                } else {
                    round2(weighted / total_count as f64)
                };
                TrendSeries {
                    make,
                    data,
                    avg_price,
                    total_count,
                }
            })
            .collect()
    }
}

/// Regroup chronologically ordered buckets into per-make series.
///
/// Series appear in the order their make is first encountered; points keep
/// the input order. A series average is the count-weighted mean of its
/// points' averages.
pub fn fold_series<I>(buckets: I) -> Vec<TrendSeries>
where
    I: IntoIterator<Item = MonthlyBucket>,
{
    let mut acc = SeriesAccumulator::default();
    for bucket in buckets {
        let make = bucket.make.clone();
        acc.push(make, TrendPoint::from(bucket));
    }
    acc.finish()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
