//! Parameterized SELECT construction.
//!
//! Every caller-supplied value is bound through a `?` placeholder as a typed
//! DuckDB [`Value`]; only column names and fixed SQL fragments are spliced
//! into the statement text. Builder methods return `&mut Self` for chaining.
//!
//! # Example
//!
//! ```rust
//! use auction_insights::SqlBuilder;
//! use duckdb::types::Value;
//!
//! let (sql, params) = SqlBuilder::new("auction_sales")
//!     .where_eq("make", Value::Text("Porsche".into()))
//!     .where_gte("year", Value::Int(1965))
//!     .order_by(&["id ASC"])
//!     .limit(10)
//!     .build();
//! assert_eq!(params.len(), 2);
//! ```

use duckdb::types::Value;

/// Builds parameterized SQL queries against a single table.
pub struct SqlBuilder {
    select_cols: Vec<String>,
    is_distinct: bool,
    from_table: String,
    where_clauses: Vec<String>,
    params: Vec<Value>,
    group_by_cols: Vec<String>,
    order_by_cols: Vec<String>,
    limit_val: Option<usize>,
    offset_val: Option<usize>,
}

impl SqlBuilder {
    /// Create a builder targeting the given table.
    pub fn new(table: &str) -> Self {
        Self {
            select_cols: vec!["*".to_string()],
            is_distinct: false,
            from_table: table.to_string(),
            where_clauses: Vec::new(),
            params: Vec::new(),
            group_by_cols: Vec::new(),
            order_by_cols: Vec::new(),
            limit_val: None,
            offset_val: None,
        }
    }

    /// Set the columns to select (replaces the default `*`).
    pub fn select(&mut self, cols: &[&str]) -> &mut Self {
        self.select_cols = cols.iter().map(|c| c.to_string()).collect();
        self
    }

    /// Add DISTINCT to the SELECT clause.
    pub fn distinct(&mut self) -> &mut Self {
        self.is_distinct = true;
        self
    }

    /// Add a parameterless condition such as `make IS NOT NULL`.
    pub fn where_raw(&mut self, condition: &str) -> &mut Self {
        self.where_clauses.push(condition.to_string());
        self
    }

    /// `{column} = ?`
    pub fn where_eq(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} = ?", column));
        self.params.push(value);
        self
    }

    /// `{column} >= ?`
    pub fn where_gte(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} >= ?", column));
        self.params.push(value);
        self
    }

    /// `{column} <= ?`
    pub fn where_lte(&mut self, column: &str, value: Value) -> &mut Self {
        self.where_clauses.push(format!("{} <= ?", column));
        self.params.push(value);
        self
    }

    /// Add an IN condition over text values.
    ///
    /// An empty list produces `FALSE`; callers that mean "no restriction"
    /// should skip the call instead.
    pub fn where_in(&mut self, column: &str, values: &[String]) -> &mut Self {
        if values.is_empty() {
            self.where_clauses.push("FALSE".to_string());
            return self;
        }
        let placeholders: Vec<&str> = values.iter().map(|_| "?").collect();
        self.where_clauses
            .push(format!("{} IN ({})", column, placeholders.join(", ")));
        self.params
            .extend(values.iter().map(|v| Value::Text(v.clone())));
        self
    }

    /// Add GROUP BY columns or select aliases.
    pub fn group_by(&mut self, cols: &[&str]) -> &mut Self {
        self.group_by_cols.extend(cols.iter().map(|c| c.to_string()));
        self
    }

    /// Add ORDER BY clauses (e.g. `"id ASC"`).
    pub fn order_by(&mut self, clauses: &[&str]) -> &mut Self {
        self.order_by_cols.extend(clauses.iter().map(|c| c.to_string()));
        self
    }

    pub fn limit(&mut self, n: usize) -> &mut Self {
        self.limit_val = Some(n);
        self
    }

    pub fn offset(&mut self, n: usize) -> &mut Self {
        self.offset_val = Some(n);
        self
    }

    /// Build the final SQL string and its bound parameters.
    pub fn build(&self) -> (String, Vec<Value>) {
        let distinct = if self.is_distinct { "DISTINCT " } else { "" };
        let mut parts = vec![
            format!("SELECT {}{}", distinct, self.select_cols.join(", ")),
            format!("FROM {}", self.from_table),
        ];

        if !self.where_clauses.is_empty() {
            parts.push(format!("WHERE {}", self.where_clauses.join(" AND ")));
        }

        if !self.group_by_cols.is_empty() {
            parts.push(format!("GROUP BY {}", self.group_by_cols.join(", ")));
        }

        if !self.order_by_cols.is_empty() {
            parts.push(format!("ORDER BY {}", self.order_by_cols.join(", ")));
        }

        if let Some(n) = self.limit_val {
            parts.push(format!("LIMIT {}", n));
        }

        if let Some(n) = self.offset_val {
            parts.push(format!("OFFSET {}", n));
        }

        (parts.join("\n"), self.params.clone())
    }
}
