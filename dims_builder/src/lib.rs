//! Normalizes the CSV dimension masters into the front end's `dims.json`.
//!
//! Pipeline: [`table::read_table`] (encoding fallback + delimiter sniffing) →
//! [`normalize::build_dims`] (alias resolution, defaults, sorting, referential
//! integrity) → atomic JSON write. Entry point: [`run`].

#![deny(missing_docs)]

pub mod aliases;
pub mod config;
pub mod encoding;
pub mod error;
pub mod model;
pub mod normalize;
pub mod resolve;
pub mod table;

use shared_utils::sink::write_json_atomic;
use tracing::info;

pub use config::DimsConfig;
pub use error::DimsError;
pub use model::Dims;
pub use normalize::{BuildReport, MasterTables, build_dims};

/// Read the masters named by `config`, normalize them and write `dims.json`.
pub fn run(config: &DimsConfig) -> Result<BuildReport, DimsError> {
    let tables = MasterTables::load(&config.masters_dir, &config.encodings)?;
    let (dims, report) = build_dims(&tables, config);
    write_json_atomic(&config.out_path, &dims)?;
    info!(
        path = %config.out_path.display(),
        bhk = dims.bhk.len(),
        assets = dims.assets.len(),
        micromarkets = dims.micromarkets.len(),
        localities = dims.localities.len(),
        city = dims.city.is_some(),
        "wrote dims"
    );
    Ok(report)
}
