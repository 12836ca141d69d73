// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The persisted configuration file and CLI overrides on top of it.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use minebak_backup::InstanceRoot;
use minebak_common_i18n::{
	is_supported, normalize_locale, I18nConfig, DEFAULT_FALLBACK_LOCALE, DEFAULT_LOCALE, LOCALES,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths::default_backup_root;

pub const DEFAULT_THEME: &str = "dark";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinebakConfig {
	pub locale: String,
	pub fallback_locale: String,
	pub theme: String,
	/// Unset means [`default_backup_root`].
	#[serde(skip_serializing_if = "Option::is_none")]
	pub backup_root: Option<PathBuf>,
	/// Back up every save on this interval while the interface runs.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub auto_backup_minutes: Option<u64>,
	pub instance_roots: Vec<InstanceRoot>,
}

impl Default for MinebakConfig {
	fn default() -> Self {
		Self {
			locale: DEFAULT_LOCALE.to_string(),
			fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
			theme: DEFAULT_THEME.to_string(),
			backup_root: None,
			auto_backup_minutes: None,
			instance_roots: Vec::new(),
		}
	}
}

/// Values given on the command line; `None` keeps the file's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
	pub locale: Option<String>,
	pub theme: Option<String>,
	pub backup_root: Option<PathBuf>,
}

impl MinebakConfig {
	pub fn apply_overrides(&mut self, overrides: CliOverrides) {
		if let Some(locale) = overrides.locale {
			self.locale = locale;
		}
		if let Some(theme) = overrides.theme {
			self.theme = theme;
		}
		if let Some(root) = overrides.backup_root {
			self.backup_root = Some(root);
		}
	}

	/// Pick another bundled locale as the fallback when it would equal the
	/// active locale, e.g. after `--locale en-us` with the default fallback.
	pub fn settle_fallback(&mut self) {
		let locale = normalize_locale(&self.locale);
		if locale != normalize_locale(&self.fallback_locale) {
			return;
		}
		if let Some(other) = LOCALES.iter().find(|info| info.code != locale) {
			tracing::debug!(locale = %locale, fallback = other.code, "fallback matched the active locale, using another");
			self.fallback_locale = other.code.to_string();
		}
	}

	pub fn auto_backup_interval(&self) -> Option<Duration> {
		self.auto_backup_minutes
			.map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
	}

	pub fn i18n_config(&self) -> I18nConfig {
		I18nConfig::new(normalize_locale(&self.locale), normalize_locale(&self.fallback_locale))
	}

	pub fn resolved_backup_root(&self) -> Result<PathBuf, ConfigError> {
		match &self.backup_root {
			Some(root) => Ok(root.clone()),
			None => default_backup_root(),
		}
	}

	pub fn validate(&self) -> Result<(), ConfigError> {
		self.i18n_config()
			.validate()
			.map_err(|e| ConfigError::invalid_value("locale", e.to_string()))?;

		for locale in [&self.locale, &self.fallback_locale] {
			if !is_supported(locale) {
				tracing::warn!(locale = %locale, "locale has no bundled translations");
			}
		}

		if self.theme.trim().is_empty() {
			return Err(ConfigError::invalid_value("theme", "must not be empty"));
		}
		if self.auto_backup_minutes == Some(0) {
			return Err(ConfigError::invalid_value("auto_backup_minutes", "must be at least 1"));
		}
		if let Some(root) = &self.backup_root {
			if root.as_os_str().is_empty() {
				return Err(ConfigError::invalid_value("backup_root", "must not be empty"));
			}
		}
		for root in &self.instance_roots {
			if root.path.as_os_str().is_empty() {
				return Err(ConfigError::validation("instance root with an empty path"));
			}
		}
		Ok(())
	}

	/// Write the configuration as TOML, creating parent directories.
	pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
		if let Some(parent) = path.parent() {
			fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
		}
		let contents = toml::to_string_pretty(self)?;
		fs::write(path, contents).map_err(|e| ConfigError::io(path, e))?;
		tracing::debug!(path = %path.display(), "configuration saved");
		Ok(())
	}
}

/// Read the configuration file; a missing file yields defaults.
pub fn load_config(path: &Path) -> Result<MinebakConfig, ConfigError> {
	if !path.exists() {
		tracing::debug!(path = %path.display(), "no configuration file, using defaults");
		return Ok(MinebakConfig::default());
	}
	let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
	toml::from_str(&contents).map_err(|source| ConfigError::TomlParse {
		path: path.to_path_buf(),
		source,
	})
}

/// Like [`load_config`], but a broken file is set aside as `<name>.bak`
/// and defaults are returned.
pub fn load_or_recover(path: &Path) -> MinebakConfig {
	match load_config(path) {
		Ok(config) => config,
		Err(error) => {
			let backup = backup_path(path);
			tracing::warn!(
				path = %path.display(),
				backup = %backup.display(),
				error = %error,
				"configuration unreadable, falling back to defaults"
			);
			if let Err(copy_error) = fs::copy(path, &backup) {
				tracing::error!(error = %copy_error, "failed to keep a copy of the broken configuration");
			}
			MinebakConfig::default()
		}
	}
}

fn backup_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
	name.push(".bak");
	path.with_file_name(name)
}

#[cfg(test)]
mod tests {
	use super::*;
	use minebak_backup::InstanceKind;
	use proptest::prelude::*;

	#[test]
	fn test_defaults() {
		let config = MinebakConfig::default();
		assert_eq!(config.locale, "zh-cn");
		assert_eq!(config.fallback_locale, "en-us");
		assert_eq!(config.theme, "dark");
		assert!(config.instance_roots.is_empty());
		assert!(config.validate().is_ok());
		assert!(config.i18n_config().composition_mode);
	}

	#[test]
	fn test_missing_file_gives_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let config = load_config(&dir.path().join("config.toml")).unwrap();
		assert_eq!(config, MinebakConfig::default());
	}

	#[test]
	fn test_partial_file_fills_defaults() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(
			&path,
			"locale = \"en-us\"\nfallback_locale = \"zh-cn\"\n\n[[instance_roots]]\npath = \"/games/prism\"\nkind = \"multi_mc\"\n",
		)
		.unwrap();

		let config = load_config(&path).unwrap();
		assert_eq!(config.locale, "en-us");
		assert_eq!(config.theme, "dark");
		assert_eq!(
			config.instance_roots,
			vec![InstanceRoot::new("/games/prism", InstanceKind::MultiMc)]
		);
	}

	#[test]
	fn test_save_then_load() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("nested/config.toml");
		let config = MinebakConfig {
			theme: "light".to_string(),
			backup_root: Some(PathBuf::from("/backups")),
			auto_backup_minutes: Some(60),
			instance_roots: vec![InstanceRoot::new("/games/.minecraft", InstanceKind::Normal)],
			..MinebakConfig::default()
		};
		config.save(&path).unwrap();
		assert_eq!(load_config(&path).unwrap(), config);
	}

	#[test]
	fn test_invalid_file_is_a_parse_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "locale = [").unwrap();
		assert!(matches!(load_config(&path), Err(ConfigError::TomlParse { .. })));
	}

	#[test]
	fn test_recover_keeps_broken_copy() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("config.toml");
		fs::write(&path, "theme = 5").unwrap();

		let config = load_or_recover(&path);
		assert_eq!(config, MinebakConfig::default());
		assert_eq!(
			fs::read_to_string(dir.path().join("config.toml.bak")).unwrap(),
			"theme = 5"
		);
	}

	#[test]
	fn test_overrides_replace_only_given_values() {
		let mut config = MinebakConfig::default();
		config.apply_overrides(CliOverrides {
			locale: Some("en-us".to_string()),
			..CliOverrides::default()
		});
		assert_eq!(config.locale, "en-us");
		assert_eq!(config.theme, "dark");
		assert_eq!(config.backup_root, None);
	}

	#[test]
	fn test_settle_fallback_picks_other_locale() {
		let mut config = MinebakConfig {
			locale: "EN_US".to_string(),
			..MinebakConfig::default()
		};
		config.settle_fallback();
		assert_eq!(config.fallback_locale, "zh-cn");
		assert!(config.validate().is_ok());

		let mut untouched = MinebakConfig::default();
		untouched.settle_fallback();
		assert_eq!(untouched.fallback_locale, "en-us");
	}

	#[test]
	fn test_auto_backup_interval() {
		let config = MinebakConfig {
			auto_backup_minutes: Some(30),
			..MinebakConfig::default()
		};
		assert_eq!(config.auto_backup_interval(), Some(Duration::from_secs(1800)));
		assert!(config.validate().is_ok());
		assert_eq!(MinebakConfig::default().auto_backup_interval(), None);

		let zero = MinebakConfig {
			auto_backup_minutes: Some(0),
			..MinebakConfig::default()
		};
		assert!(matches!(
			zero.validate(),
			Err(ConfigError::InvalidValue { ref field, .. }) if field == "auto_backup_minutes"
		));
	}

	#[test]
	fn test_validate_rejects_same_locale_and_fallback() {
		let config = MinebakConfig {
			locale: "EN_US".to_string(),
			..MinebakConfig::default()
		};
		assert!(matches!(
			config.validate(),
			Err(ConfigError::InvalidValue { ref field, .. }) if field == "locale"
		));
	}

	#[test]
	fn test_validate_rejects_empty_theme() {
		let config = MinebakConfig {
			theme: " ".to_string(),
			..MinebakConfig::default()
		};
		assert!(config.validate().is_err());
	}

	#[test]
	fn test_resolved_backup_root_prefers_configured() {
		let config = MinebakConfig {
			backup_root: Some(PathBuf::from("/srv/minebak")),
			..MinebakConfig::default()
		};
		assert_eq!(config.resolved_backup_root().unwrap(), PathBuf::from("/srv/minebak"));
	}

	proptest! {
		#[test]
		fn prop_saved_theme_survives_reload(theme in "[a-z]{1,12}") {
			let dir = tempfile::tempdir().unwrap();
			let path = dir.path().join("config.toml");
			let config = MinebakConfig { theme, ..MinebakConfig::default() };
			config.save(&path).unwrap();
			prop_assert_eq!(load_config(&path).unwrap(), config);
		}
	}
}
