//! Ambient plumbing shared by the dashboard data-prep tools.
//!
//! - [`env`]: environment lookups and the data-root fallback chain
//! - [`config`]: TOML config loading with structured errors
//! - [`logging`]: `tracing` subscriber setup for the binaries
//! - [`sink`]: JSON output sinks (atomic files on disk, or in memory for tests)

pub mod config;
pub mod env;
pub mod logging;
pub mod sink;
