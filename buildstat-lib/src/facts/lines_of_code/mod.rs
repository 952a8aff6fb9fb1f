mod lines_of_code_data;
mod provider;

pub use lines_of_code_data::LinesOfCodeData;
pub use provider::{DEFAULT_IDENTIFIER, LinesOfCodeProvider};
