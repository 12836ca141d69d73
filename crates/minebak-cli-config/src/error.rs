// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Errors raised while locating, reading or writing `config.toml`.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("config file {path} is not accessible: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("config file {path} is not valid TOML: {source}")]
	TomlParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("configuration could not be written as TOML: {0}")]
	TomlSerialize(#[from] toml::ser::Error),

	#[error("invalid configuration: {0}")]
	Validation(String),

	/// A single setting was rejected; `field` is the TOML key.
	#[error("invalid value for {field}: {message}")]
	InvalidValue { field: String, message: String },

	/// Neither `$HOME` nor the platform lookup produced a home directory.
	#[error("could not determine home directory")]
	HomeDirNotFound,
}

impl ConfigError {
	pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}

	pub fn validation(msg: impl Into<String>) -> Self {
		Self::Validation(msg.into())
	}

	pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			field: field.into(),
			message: message.into(),
		}
	}
}
