use serde::{Deserialize, Serialize};

/// Distinct filterable values currently present in the store.
///
/// Each list is ascending, duplicate-free and never contains nulls.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub makes: Vec<String>,
    pub models: Vec<String>,
    pub years: Vec<i32>,
}
