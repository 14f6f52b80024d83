//! Configuration for the Lumen loading engine.
//!
//! Settings live in a TOML file; every field is optional and falls back to
//! the catalog API's defaults:
//!
//! ```toml
//! page_size = 30
//! suggestion_debounce_ms = 300
//!
//! [masonry]
//! min_column_width = 220.0
//! max_columns = 6
//! spacing = 8.0
//! ```
//!
//! The default location is `$XDG_CONFIG_HOME/lumen/config.toml` (or the
//! platform equivalent).

mod error;

use std::path::{Path, PathBuf};
use std::time::Duration;

pub use error::{ConfigError, Result};
use serde::{Deserialize, Serialize};

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Items requested per page.
	pub page_size: usize,
	/// Quiet period before a suggestion lookup, in milliseconds.
	pub suggestion_debounce_ms: u64,
	/// Grid layout settings.
	pub masonry: MasonryConfig,
}

/// Masonry grid settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MasonryConfig {
	/// Narrowest column the grid will lay out, in pixels.
	pub min_column_width: f64,
	/// Upper bound on the column count.
	pub max_columns: usize,
	/// Gap between columns and between items, in pixels.
	pub spacing: f64,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			page_size: 30,
			suggestion_debounce_ms: 300,
			masonry: MasonryConfig::default(),
		}
	}
}

impl Default for MasonryConfig {
	fn default() -> Self {
		Self {
			min_column_width: 220.0,
			max_columns: 6,
			spacing: 8.0,
		}
	}
}

impl EngineConfig {
	/// Parses and validates a TOML document.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Reads, parses and validates the file at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let source = std::fs::read_to_string(path).map_err(|error| ConfigError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::from_toml_str(&source)
	}

	/// Loads `explicit` if given, else the default location if it exists,
	/// else the built-in defaults.
	pub fn discover(explicit: Option<&Path>) -> Result<Self> {
		if let Some(path) = explicit {
			return Self::load(path);
		}
		match Self::default_path() {
			Some(path) if path.is_file() => Self::load(&path),
			_ => Ok(Self::default()),
		}
	}

	/// Platform config location for the engine.
	pub fn default_path() -> Option<PathBuf> {
		dirs::config_dir().map(|dir| dir.join("lumen").join("config.toml"))
	}

	pub fn suggestion_debounce(&self) -> Duration {
		Duration::from_millis(self.suggestion_debounce_ms)
	}

	/// Rejects values the engine cannot work with.
	pub fn validate(&self) -> Result<()> {
		if self.page_size == 0 {
			return Err(invalid("page_size", "must be at least 1"));
		}
		let masonry = &self.masonry;
		if masonry.max_columns == 0 {
			return Err(invalid("masonry.max_columns", "must be at least 1"));
		}
		if !(masonry.min_column_width.is_finite() && masonry.min_column_width > 0.0) {
			return Err(invalid("masonry.min_column_width", format!("must be a positive number, got {}", masonry.min_column_width)));
		}
		if !(masonry.spacing.is_finite() && masonry.spacing >= 0.0) {
			return Err(invalid("masonry.spacing", format!("must be a non-negative number, got {}", masonry.spacing)));
		}
		Ok(())
	}
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
	ConfigError::Invalid {
		field,
		reason: reason.into(),
	}
}
