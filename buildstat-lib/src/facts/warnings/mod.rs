mod provider;
mod warnings_data;

pub use provider::{DEFAULT_IDENTIFIER, WarningsProvider};
pub use warnings_data::WarningsData;
