mod command_data;
mod provider;

pub use command_data::CommandData;
pub use provider::CommandProvider;
