//! Metric providers and the collector that drives them
//!
//! A metric source implements [`Provider`]: it extracts a typed snapshot of some aspect of the
//! project from the shared [`RunContext`] and knows how to [`summarize`](Provider::summarize) that
//! snapshot against the one it produced on the previous run.
//!
//! # Implementation Model
//!
//! Providers are registered in a [`ProviderRegistry`], which keeps them in the order the user
//! configured and guarantees that identifiers are unique. The registry stores providers as
//! [`DynProvider`] trait objects; a blanket implementation routes each one back into the
//! [`Collector`] with its concrete type, so the collector can decode prior data into the
//! provider's own data type.
//!
//! For every provider the [`Collector`] runs the same sequence:
//!
//! 1. extract the current data (a failure here aborts the whole run),
//! 2. locate and decode the previous data in the history (absence or decode failure is `None`),
//! 3. summarize the difference,
//! 4. record the raw payload and summary as a [`CombinedRecord`].
//!
//! The records accumulate into a [`RunOutput`], which is what gets persisted and reported.
//!
//! The providers in the submodules are thin adapters for common Rust project metrics.

pub mod binary_size;
mod collector;
pub mod command;
mod context;
pub mod dependencies;
pub mod lines_of_code;
mod output;
mod provider;
mod registry;
mod shell;
pub mod warnings;

pub use collector::Collector;
pub use context::{ProjectInfo, RunContext};
pub use output::{CombinedRecord, OutputBuilder, RunOutput};
pub use provider::{DynProvider, Provider};
pub use registry::ProviderRegistry;
pub use shell::Shell;
