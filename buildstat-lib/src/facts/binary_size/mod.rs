mod binary_size_data;
mod provider;

pub use binary_size_data::BinarySizeData;
pub use provider::{BinarySizeProvider, DEFAULT_IDENTIFIER};
