// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for MineBak.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - TOML configuration file loading, recovery and saving
//! - Command line overrides
//! - Configuration validation

pub mod error;
pub mod paths;
pub mod settings;

pub use error::ConfigError;
pub use paths::{default_backup_root, resolve_xdg_paths, PathsConfig};
pub use settings::{load_config, load_or_recover, CliOverrides, MinebakConfig, DEFAULT_THEME};

/// Load the configuration at `path` (or the XDG default) and apply CLI overrides.
///
/// A broken file is set aside and defaults are used.
pub fn load_config_with_cli(
	path: Option<&std::path::Path>,
	cli: CliOverrides,
) -> Result<MinebakConfig, ConfigError> {
	let mut config = match path {
		Some(path) => load_or_recover(path),
		None => load_or_recover(&resolve_xdg_paths()?.config_file),
	};
	config.apply_overrides(cli);
	config.settle_fallback();
	config.validate()?;
	Ok(config)
}
