mod dependencies_data;
mod provider;

pub use dependencies_data::{DependenciesData, Package};
pub use provider::{DEFAULT_IDENTIFIER, DependenciesProvider};
