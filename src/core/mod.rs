//! Core domain: records, enrollment rules, academic metrics and the
//! collaborators that move them in and out of files

pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod store;

/// Returns the current version of the `CCRM` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
