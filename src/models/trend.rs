use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// MonthlyBucket — One grouped (make, year, month) row from the store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    pub make: String,
    pub sale_year: i32,
    pub sale_month: u32,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub count: i64,
}

impl MonthlyBucket {
    /// `YYYY-MM`, zero padded.
    pub fn period(&self) -> String {
        format!("{:04}-{:02}", self.sale_year, self.sale_month)
    }
}

// ---------------------------------------------------------------------------
// TrendPoint — Price statistics for one make within one calendar month
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub period: String,
    pub avg_price: f64,
    pub min_price: f64,
    pub max_price: f64,
    pub count: i64,
}

impl From<MonthlyBucket> for TrendPoint {
    fn from(bucket: MonthlyBucket) -> Self {
        Self {
            period: bucket.period(),
            avg_price: bucket.avg_price,
            min_price: bucket.min_price,
            max_price: bucket.max_price,
            count: bucket.count,
        }
    }
}

// ---------------------------------------------------------------------------
// TrendSeries — One make's chronological points plus rollups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    pub make: String,
    pub data: Vec<TrendPoint>,
    /// Count-weighted average of the points' averages.
    pub avg_price: f64,
    pub total_count: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendResponse {
    pub series: Vec<TrendSeries>,
}
