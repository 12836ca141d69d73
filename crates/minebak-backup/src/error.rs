// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackupError {
	#[error("I/O error at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to walk {path}: {source}")]
	Walk {
		path: PathBuf,
		#[source]
		source: walkdir::Error,
	},

	#[error("invalid backup metadata at {path}: {source}")]
	Metadata {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("instance root does not exist: {0}")]
	MissingRoot(PathBuf),

	#[error("unknown instance kind '{0}'")]
	UnknownKind(String),

	#[error("no backup of '{save}' taken at {timestamp}")]
	VersionNotFound { save: String, timestamp: i64 },

	#[error("backup is missing its copy of '{0}'")]
	MissingFile(String),

	#[error("restored file '{0}' does not match its recorded hash")]
	HashMismatch(String),

	#[error("cannot restore into {0}: it has no parent directory")]
	InvalidTarget(PathBuf),
}

impl BackupError {
	pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.as_ref().to_path_buf(),
			source,
		}
	}
}

pub type Result<T, E = BackupError> = std::result::Result<T, E>;
