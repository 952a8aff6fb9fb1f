use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct WarningsData {
    /// Distinct warning messages, sorted.
    pub items: Vec<String>,
}
