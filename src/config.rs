//! Configuration for replicr
//!
//! The configuration follows a priority chain:
//! 1. Built-in defaults (Config::default())
//! 2. Config file (`--config`, TOML or JSON5)
//! 3. Environment variables (REPLICR_* prefix)
//! 4. CLI flags (highest priority)
//!
//! Every layer may leave values unset; [`Config::resolve`] turns the merged
//! result into concrete [`Settings`] or reports what is missing.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::MirrorError;
use crate::validation::{validate_disjoint_trees, ValidationError, Validator};

/// Environment variable names
pub const ENV_SOURCE: &str = "REPLICR_SOURCE";
pub const ENV_DESTINATION: &str = "REPLICR_DESTINATION";
pub const ENV_INTERVAL: &str = "REPLICR_INTERVAL";
pub const ENV_LOG: &str = "REPLICR_LOG";
pub const ENV_LOG_LEVEL: &str = "REPLICR_LOG_LEVEL";

/// Layered configuration, every value optional until resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
	/// Directory whose content is authoritative
	pub source: Option<PathBuf>,

	/// Directory mirrored to match the source
	pub destination: Option<PathBuf>,

	/// Seconds between pass starts
	pub interval: Option<u64>,

	/// Journal file the pass outcomes are appended to
	pub log_file: Option<PathBuf>,

	/// Tracing filter for diagnostics on stderr (trace, debug, info, warn, error)
	pub log_level: String,

	/// Echo journal sections to stdout
	pub echo_console: bool,
}

impl Default for Config {
	fn default() -> Self {
		Config {
			source: None,
			destination: None,
			interval: None,
			log_file: None,
			log_level: "info".to_string(),
			echo_console: true,
		}
	}
}

/// Fully resolved settings a mirror runs with
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
	pub source: PathBuf,
	pub destination: PathBuf,
	pub interval: Duration,
	pub log_file: PathBuf,
	pub echo_console: bool,
}

impl Config {
	/// Load a config file; `.json`/`.json5` are read as JSON5, anything
	/// else as TOML
	pub fn from_file(path: &Path) -> Result<Config, MirrorError> {
		let content = fs::read_to_string(path)?;
		let is_json = matches!(
			path.extension().and_then(|e| e.to_str()),
			Some("json") | Some("json5")
		);

		let parsed = if is_json {
			json5::from_str(&content).map_err(|e| e.to_string())
		} else {
			toml::from_str(&content).map_err(|e| e.to_string())
		};
		parsed.map_err(|message| MirrorError::ConfigParse { path: path.to_path_buf(), message })
	}

	/// Override values from the process environment
	pub fn apply_env(&mut self) -> Result<(), ValidationError> {
		self.apply_env_from(|key| std::env::var(key).ok())
	}

	/// Override values from an arbitrary variable lookup
	pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ValidationError>
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(v) = lookup(ENV_SOURCE) {
			self.source = Some(PathBuf::from(v));
		}
		if let Some(v) = lookup(ENV_DESTINATION) {
			self.destination = Some(PathBuf::from(v));
		}
		if let Some(v) = lookup(ENV_INTERVAL) {
			let secs = v.trim().parse().map_err(|e| {
				ValidationError::ConfigError(format!("Invalid {} '{}': {}", ENV_INTERVAL, v, e))
			})?;
			self.interval = Some(secs);
		}
		if let Some(v) = lookup(ENV_LOG) {
			self.log_file = Some(PathBuf::from(v));
		}
		if let Some(v) = lookup(ENV_LOG_LEVEL) {
			self.log_level = v;
		}
		Ok(())
	}

	/// Validate and produce concrete settings
	pub fn resolve(&self) -> Result<Settings, ValidationError> {
		self.validate()?;

		let missing = |what: &str| ValidationError::ConfigError(format!("{} is required", what));
		Ok(Settings {
			source: self.source.clone().ok_or_else(|| missing("source folder"))?,
			destination: self.destination.clone().ok_or_else(|| missing("destination folder"))?,
			interval: Duration::from_secs(self.interval.ok_or_else(|| missing("interval"))?),
			log_file: self.log_file.clone().ok_or_else(|| missing("log file"))?,
			echo_console: self.echo_console,
		})
	}
}

impl Validator for Config {
	fn validate(&self) -> Result<(), ValidationError> {
		match self.interval {
			Some(0) => {
				return Err(ValidationError::ConfigError(
					"interval must be at least 1 second".to_string(),
				))
			}
			Some(_) => {}
			None => return Err(ValidationError::ConfigError("interval is required".to_string())),
		}
		match (&self.source, &self.destination) {
			(Some(source), Some(destination)) => validate_disjoint_trees(source, destination)?,
			(None, _) => {
				return Err(ValidationError::ConfigError("source folder is required".to_string()))
			}
			(_, None) => {
				return Err(ValidationError::ConfigError(
					"destination folder is required".to_string(),
				))
			}
		}
		if self.log_file.is_none() {
			return Err(ValidationError::ConfigError("log file is required".to_string()));
		}
		Ok(())
	}
}


// vim: ts=4
