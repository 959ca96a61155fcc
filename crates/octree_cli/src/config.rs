//! Configuration parsing for the octree shell.
//!
//! Every section is optional; missing keys fall back to the library
//! defaults.
//!
//! ```toml
//! [octree]
//! center = { x = 0.0, y = 0.0, z = 0.0 }
//! size = 1000.0
//! max_points = 2
//! max_depth = 5
//!
//! [game]
//! step = 50.0
//! collision_radius = 30.0
//!
//! [data]
//! initial_points = "points.txt"
//! ```

use anyhow::{Context, Result};
use octree_index::{GameConfig, OctreeConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Root configuration for the shell.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	/// Root cube and leaf splitting.
	pub octree: OctreeConfig,
	/// Movement step and collision radius.
	pub game: GameConfig,
	/// Startup data.
	pub data: DataConfig,
}

/// Files read at startup.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DataConfig {
	/// Point list bulk-loaded before the prompt opens.
	pub initial_points: Option<PathBuf>,
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config file: {}", path.display()))?;
		Self::from_toml_str(&content)
			.with_context(|| format!("Invalid config file: {}", path.display()))
	}

	/// Parse and validate configuration from TOML text.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
		config.octree.validate().context("Invalid [octree] section")?;
		config.game.validate().context("Invalid [game] section")?;
		Ok(config)
	}
}
