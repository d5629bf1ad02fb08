#![allow(dead_code)]

use std::path::Path;

use dims_builder::{DimsConfig, config::OrphanLocalityPolicy};
use tempfile::TempDir;

pub fn write(dir: &Path, name: &str, bytes: &[u8]) {
    std::fs::write(dir.join(name), bytes).unwrap();
}

/// A project root with a masters set exercising BOMs, `;` delimiters,
/// cp1252 bytes, an orphan locality and a missing asset-type master.
pub fn masters_root() -> TempDir {
    let root = tempfile::tempdir().unwrap();
    let masters = root.path().join("data/masters");
    std::fs::create_dir_all(&masters).unwrap();

    write(&masters, "dim_bhk.csv", b"\xEF\xBB\xBFBHK;BHKLabel\n2;2 BHK\n1;1 BHK\n");
    write(
        &masters,
        "dim_city.csv",
        b"CityID,CityName,CenterLon,CenterLat,Zoom\n1,Pune,73.85,18.52,11\n13,Mumbai,,,\n",
    );
    write(
        &masters,
        "dim_micro_market.csv",
        b"MicroMarketID,MicroMarketName,CityID\n200,Central Suburbs,13\n100,Western Suburbs,13\n",
    );
    // cp1252: 0xE9 is e-acute, 0xA0 is a non-breaking space
    write(
        &masters,
        "dim_locality.csv",
        b"LocalityID,LocalityName,CityID,MicroMarketID\n\
          12,Bandra\xA0(W\xE9st),13,100\n\
          11,Kurla,13,200\n\
          13,Nowhere,13,999\n",
    );
    root
}

pub fn config_for(root: &Path) -> DimsConfig {
    DimsConfig::default().rooted(root)
}

/// Like [`config_for`] but dropping localities whose micro-market is unknown.
pub fn strict_config_for(root: &Path) -> DimsConfig {
    DimsConfig {
        orphan_localities: OrphanLocalityPolicy::Drop,
        ..config_for(root)
    }
}
