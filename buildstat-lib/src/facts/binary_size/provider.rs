use super::BinarySizeData;
use crate::Result;
use crate::facts::{self, RunContext};
use crate::summary::{Direction, Summary, Unit};
use camino::Utf8PathBuf;
use ohno::IntoAppError;
use std::fs;

pub const DEFAULT_IDENTIFIER: &str = "BinarySize";

/// Reports the size of a build artifact on disk.
#[derive(Debug, Clone)]
pub struct BinarySizeProvider {
    identifier: String,
    path: Utf8PathBuf,
}

impl BinarySizeProvider {
    #[must_use]
    pub fn new(identifier: impl Into<String>, path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            identifier: identifier.into(),
            path: path.into(),
        }
    }
}

impl facts::Provider for BinarySizeProvider {
    type Data = BinarySizeData;

    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn extract(&self, context: &RunContext) -> Result<BinarySizeData> {
        let path = context.resolve(&self.path);
        let metadata = fs::metadata(&path).into_app_err_with(|| format!("unable to read size of '{path}'"))?;

        Ok(BinarySizeData { bytes: metadata.len() })
    }

    #[expect(clippy::cast_precision_loss, reason = "artifact sizes are far below 2^52 bytes")]
    fn summarize(&self, current: &BinarySizeData, previous: Option<&BinarySizeData>) -> Summary {
        Summary::numeric(
            "Binary size",
            current.bytes as f64,
            previous.map(|p| p.bytes as f64),
            Unit::Bytes,
            Direction::LowerIsBetter,
        )
    }
}
