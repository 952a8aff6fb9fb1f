#![doc(hidden)]

//! Core library for buildstat
//!
//! This library consolidates all functionality for the buildstat tool, which extracts
//! metrics about a project on every build, compares them with the previous build, and
//! reports what changed.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`facts`]: Metric providers and the collector that drives them
//! - [`history`]: Persisted run history and lookup of prior snapshots
//! - [`summary`]: Comparison of two snapshots into a human-readable summary
//! - [`reports`]: Console output and webhook notifications

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod facts;
pub mod history;
pub mod reports;
pub mod summary;

pub use crate::commands::{Host, run};
