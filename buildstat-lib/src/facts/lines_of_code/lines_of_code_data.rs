use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinesOfCodeData {
    pub files: u64,
    pub lines: u64,
}
