use serde::{Deserialize, Serialize};

/// Outcome of one provider import.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub imported: usize,
    pub make: String,
    pub model: Option<String>,
}
