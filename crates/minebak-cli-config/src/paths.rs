// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::ConfigError;

const APP_DIR: &str = "minebak";

/// Resolved XDG paths for MineBak.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathsConfig {
	/// User config file: ~/.config/minebak/config.toml
	pub config_file: PathBuf,
	/// Data directory: ~/.local/share/minebak/
	pub data_dir: PathBuf,
	/// State directory: ~/.local/state/minebak/
	pub state_dir: PathBuf,
}

impl PathsConfig {
	/// Get the config directory (parent of config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.config_file.clone())
	}

	pub fn log_file(&self) -> PathBuf {
		self.state_dir.join("minebak.log")
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses environment variables if set, otherwise falls back to defaults:
/// - XDG_CONFIG_HOME or ~/.config
/// - XDG_DATA_HOME or ~/.local/share
/// - XDG_STATE_HOME or ~/.local/state
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
	let paths = paths_from(
		&home,
		std::env::var_os("XDG_CONFIG_HOME"),
		std::env::var_os("XDG_DATA_HOME"),
		std::env::var_os("XDG_STATE_HOME"),
	);

	tracing::debug!(
		config_file = %paths.config_file.display(),
		data_dir = %paths.data_dir.display(),
		state_dir = %paths.state_dir.display(),
		"resolved XDG paths"
	);
	Ok(paths)
}

fn paths_from(
	home: &Path,
	config_home: Option<OsString>,
	data_home: Option<OsString>,
	state_home: Option<OsString>,
) -> PathsConfig {
	// Relative XDG values are ignored.
	let pick = |value: Option<OsString>, fallback: &str| {
		value
			.map(PathBuf::from)
			.filter(|path| path.is_absolute())
			.unwrap_or_else(|| home.join(fallback))
	};

	PathsConfig {
		config_file: pick(config_home, ".config").join(APP_DIR).join("config.toml"),
		data_dir: pick(data_home, ".local/share").join(APP_DIR),
		state_dir: pick(state_home, ".local/state").join(APP_DIR),
	}
}

/// Where backups go when the configuration names no root:
/// `~/Documents/MineBak`, or `~/MineBak` without a documents folder.
pub fn default_backup_root() -> Result<PathBuf, ConfigError> {
	if let Some(documents) = dirs::document_dir() {
		return Ok(documents.join("MineBak"));
	}
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
	Ok(home.join("MineBak"))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_paths_default_under_home() {
		let paths = paths_from(Path::new("/home/steve"), None, None, None);
		assert_eq!(
			paths.config_file,
			PathBuf::from("/home/steve/.config/minebak/config.toml")
		);
		assert_eq!(paths.data_dir, PathBuf::from("/home/steve/.local/share/minebak"));
		assert_eq!(paths.state_dir, PathBuf::from("/home/steve/.local/state/minebak"));
		assert_eq!(
			paths.log_file(),
			PathBuf::from("/home/steve/.local/state/minebak/minebak.log")
		);
	}

	#[test]
	fn test_paths_honor_absolute_xdg_overrides() {
		let paths = paths_from(
			Path::new("/home/steve"),
			Some("/xdg/config".into()),
			Some("relative/data".into()),
			Some("/xdg/state".into()),
		);
		assert_eq!(paths.config_file, PathBuf::from("/xdg/config/minebak/config.toml"));
		assert_eq!(paths.data_dir, PathBuf::from("/home/steve/.local/share/minebak"));
		assert_eq!(paths.state_dir, PathBuf::from("/xdg/state/minebak"));
	}

	#[test]
	fn test_config_dir_returns_parent() {
		let paths = paths_from(Path::new("/home/steve"), None, None, None);
		assert!(paths.config_dir().ends_with("minebak"));
	}

	#[test]
	fn test_default_backup_root_is_named_minebak() {
		if let Ok(root) = default_backup_root() {
			assert!(root.ends_with("MineBak"));
		}
	}
}
