pub mod particles;
pub mod worldgen;

pub use particles::{RainConfig, SprayConfig};
pub use worldgen::WorldGenConfig;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Every tunable the crate reads, grouped by area.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoxfallConfig {
    #[serde(default)]
    pub worldgen: WorldGenConfig,
    #[serde(default)]
    pub spray: SprayConfig,
    #[serde(default)]
    pub rain: RainConfig,
}

/// Loads the TOML config at `path`, writing the defaults there first if no
/// file exists yet.
pub fn load_or_create(path: &Path) -> Result<VoxfallConfig> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    if !path.exists() {
        let default_config = VoxfallConfig::default();
        let toml_content = toml::to_string_pretty(&default_config)?;
        std::fs::write(path, toml_content).context("Failed to write default config")?;
        return Ok(default_config);
    }

    let content = std::fs::read_to_string(path).context("Failed to read config file")?;
    toml::from_str(&content).context("Failed to parse config file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_toml() {
        let config = VoxfallConfig::default();
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: VoxfallConfig = toml::from_str(&text).unwrap();

        assert_eq!(parsed.worldgen.seed, config.worldgen.seed);
        assert_eq!(parsed.worldgen.world_size, config.worldgen.world_size);
        assert_eq!(parsed.spray.spawn_rate, config.spray.spawn_rate);
        assert_eq!(parsed.rain.spawn_height, config.rain.spawn_height);
    }

    #[test]
    fn test_load_or_create_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("voxfall.toml");

        let first = load_or_create(&path).unwrap();
        assert!(path.exists());
        assert_eq!(first.worldgen.world_size, 16);

        // A partial file falls back to defaults for missing sections.
        std::fs::write(&path, "[worldgen]\nseed = 99\n").unwrap();
        let partial = load_or_create(&path).unwrap();
        assert_eq!(partial.worldgen.seed, 99);
        assert_eq!(partial.rain.spawn_rate, RainConfig::default().spawn_rate);
    }
}
