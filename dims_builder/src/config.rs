//! Run configuration for the dims build.
//!
//! Every field has a default, so a TOML file only needs the keys it overrides:
//!
//! ```toml
//! orphan_localities = "drop"
//!
//! [encodings]
//! attempts = ["utf-8-sig", "cp1252"]
//! fallback = "latin-1"
//!
//! [city]
//! name = "mumbai"
//! id = 13
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared_utils::config::{ConfigError, load_toml};

use crate::encoding::EncodingPolicy;

/// Master file names inside the masters directory.
pub mod files {
    /// BHK codes.
    pub const BHK: &str = "dim_bhk.csv";
    /// Asset types.
    pub const ASSET_TYPE: &str = "dim_asset_type.csv";
    /// Cities.
    pub const CITY: &str = "dim_city.csv";
    /// Micro-markets.
    pub const MICRO_MARKET: &str = "dim_micro_market.csv";
    /// Localities.
    pub const LOCALITY: &str = "dim_locality.csv";
}

/// Everything a dims build needs; passed explicitly to [`crate::run`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DimsConfig {
    /// Directory holding the `dim_*.csv` masters.
    pub masters_dir: PathBuf,
    /// Where `dims.json` is written.
    pub out_path: PathBuf,
    /// Decoding order for master files.
    pub encodings: EncodingPolicy,
    /// How the single city record is picked and defaulted.
    pub city: CityTarget,
    /// What to do with localities whose micro-market does not resolve.
    pub orphan_localities: OrphanLocalityPolicy,
}

impl Default for DimsConfig {
    fn default() -> Self {
        Self {
            masters_dir: PathBuf::from("data/masters"),
            out_path: PathBuf::from("frontend/dims.json"),
            encodings: EncodingPolicy::default(),
            city: CityTarget::default(),
            orphan_localities: OrphanLocalityPolicy::default(),
        }
    }
}

impl DimsConfig {
    /// Load overrides from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        load_toml(path)
    }

    /// Resolve relative paths against a project root.
    pub fn rooted(mut self, root: &Path) -> Self {
        if self.masters_dir.is_relative() {
            self.masters_dir = root.join(&self.masters_dir);
        }
        if self.out_path.is_relative() {
            self.out_path = root.join(&self.out_path);
        }
        self
    }
}

/// Selection rule and defaults for the city record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CityTarget {
    /// Matched case-insensitively against the trimmed city name.
    pub name: String,
    /// Matched against the city ID.
    pub id: i64,
    /// Used when the matched row has no name.
    pub default_name: String,
    /// `[lon, lat]` used when the row has no centre.
    pub default_center: [f64; 2],
    /// Used when the row has no zoom.
    pub default_zoom: f64,
}

impl Default for CityTarget {
    fn default() -> Self {
        Self {
            name: "mumbai".into(),
            id: 13,
            default_name: "Mumbai".into(),
            default_center: [72.8777, 19.0760],
            default_zoom: 10.0,
        }
    }
}

/// Policy for localities whose micro-market reference is absent or unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanLocalityPolicy {
    /// Keep them without a `microMarketName`.
    #[default]
    Keep,
    /// Leave them out of `dims.json`, so every locality resolves to a micro-market.
    Drop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::TextEncoding;

    #[test]
    fn partial_toml_overrides() {
        let cfg: DimsConfig = toml::from_str(
            r#"
            orphan_localities = "drop"
            [encodings]
            attempts = ["utf-8-sig"]
            fallback = "latin-1"
            [city]
            id = 7
            "#,
        )
        .unwrap();
        assert_eq!(cfg.orphan_localities, OrphanLocalityPolicy::Drop);
        assert_eq!(cfg.encodings.attempts, vec![TextEncoding::Utf8Sig]);
        assert_eq!(cfg.encodings.fallback, TextEncoding::Latin1);
        assert_eq!(cfg.city.id, 7);
        assert_eq!(cfg.city.name, "mumbai");
        assert_eq!(cfg.masters_dir, PathBuf::from("data/masters"));
    }

    #[test]
    fn defaults_keep_orphans_and_name_the_target_city() {
        let cfg = DimsConfig::default();
        assert_eq!(cfg.orphan_localities, OrphanLocalityPolicy::Keep);
        assert_eq!(cfg.city.default_name, "Mumbai");

        let cfg: DimsConfig = toml::from_str(
            r#"
            [city]
            name = "pune"
            id = 9
            default_name = "Pune"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.city.default_name, "Pune");
        assert_eq!(cfg.city.default_zoom, 10.0);
    }

    #[test]
    fn unknown_keys_rejected() {
        assert!(toml::from_str::<DimsConfig>("bogus = true").is_err());
    }

    #[test]
    fn rooted_only_touches_relative_paths() {
        let cfg = DimsConfig {
            out_path: PathBuf::from("/srv/dims.json"),
            ..DimsConfig::default()
        }
        .rooted(Path::new("/proj"));
        assert_eq!(cfg.masters_dir, PathBuf::from("/proj/data/masters"));
        assert_eq!(cfg.out_path, PathBuf::from("/srv/dims.json"));
    }
}
