// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Discovery of Minecraft instances and their saves.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{BackupError, Result};

/// Directory layout of a launcher installation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceKind {
	/// The root itself is a `.minecraft` directory.
	Normal,
	/// Every directory under `versions/` is its own game directory.
	VersionIsolated,
	/// MultiMC / Prism style `instances/<id>/instance.cfg`.
	MultiMc,
}

impl InstanceKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Normal => "normal",
			Self::VersionIsolated => "version_isolated",
			Self::MultiMc => "multi_mc",
		}
	}
}

impl fmt::Display for InstanceKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for InstanceKind {
	type Err = BackupError;

	fn from_str(s: &str) -> Result<Self> {
		match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
			"normal" => Ok(Self::Normal),
			"version_isolated" | "isolated" => Ok(Self::VersionIsolated),
			"multi_mc" | "multimc" | "prism" => Ok(Self::MultiMc),
			other => Err(BackupError::UnknownKind(other.to_string())),
		}
	}
}

/// A configured launcher directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceRoot {
	pub path: PathBuf,
	pub kind: InstanceKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Save {
	pub name: String,
	pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
	pub name: String,
	/// Digest of the canonical game directory; see [`InstanceKey`].
	pub id: String,
	pub kind: InstanceKind,
	pub game_dir: PathBuf,
	pub saves: Vec<Save>,
}

/// Identifies an instance in the backup store.
///
/// Launchers happily produce several instances with the same display name
/// (every plain root is called `.minecraft`), so backups are keyed by `id`,
/// a digest of the canonical game directory. `name` is only for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceKey {
	pub name: String,
	pub id: String,
}

impl InstanceKey {
	pub fn new(name: impl Into<String>, game_dir: &Path) -> Self {
		Self {
			name: name.into(),
			id: instance_id(game_dir),
		}
	}
}

const INSTANCE_ID_LEN: usize = 16;

/// Short hex digest of the canonical form of `game_dir`.
pub fn instance_id(game_dir: &Path) -> String {
	let canonical = fs::canonicalize(game_dir).unwrap_or_else(|_| game_dir.to_path_buf());
	let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
	let mut id = hex::encode(digest);
	id.truncate(INSTANCE_ID_LEN);
	id
}

impl InstanceRoot {
	pub fn new(path: impl Into<PathBuf>, kind: InstanceKind) -> Self {
		Self {
			path: path.into(),
			kind,
		}
	}

	/// Find every instance under this root, sorted by name.
	pub fn scan(&self) -> Result<Vec<Instance>> {
		if !self.path.is_dir() {
			return Err(BackupError::MissingRoot(self.path.clone()));
		}

		let mut instances = match self.kind {
			InstanceKind::Normal => vec![self.normal_instance()?],
			InstanceKind::VersionIsolated => self.scan_versions()?,
			InstanceKind::MultiMc => self.scan_multimc()?,
		};
		instances.sort_by(|a, b| a.name.cmp(&b.name));
		tracing::debug!(root = %self.path.display(), kind = %self.kind, count = instances.len(), "scanned instance root");
		Ok(instances)
	}

	fn normal_instance(&self) -> Result<Instance> {
		let name = dir_name(&self.path).unwrap_or_else(|| "minecraft".to_string());
		Instance::open(name, InstanceKind::Normal, self.path.clone())
	}

	fn scan_versions(&self) -> Result<Vec<Instance>> {
		let versions = nested(&self.path, "versions");
		if !versions.is_dir() {
			tracing::warn!(path = %versions.display(), "no versions directory");
			return Ok(Vec::new());
		}

		let mut instances = Vec::new();
		for dir in subdirectories(&versions)? {
			let Some(name) = dir_name(&dir) else {
				continue;
			};
			instances.push(Instance::open(name, InstanceKind::VersionIsolated, dir)?);
		}
		Ok(instances)
	}

	fn scan_multimc(&self) -> Result<Vec<Instance>> {
		let root = nested(&self.path, "instances");
		if !root.is_dir() {
			tracing::warn!(path = %root.display(), "no instances directory");
			return Ok(Vec::new());
		}

		let mut instances = Vec::new();
		for dir in subdirectories(&root)? {
			let cfg = dir.join("instance.cfg");
			if !cfg.is_file() {
				tracing::warn!(path = %dir.display(), "invalid instance: missing instance.cfg, skipping");
				continue;
			}

			let contents = fs::read_to_string(&cfg).map_err(|e| BackupError::io(&cfg, e))?;
			let name = instance_cfg_name(&contents)
				.or_else(|| dir_name(&dir))
				.unwrap_or_default();

			let game_dir = [".minecraft", "minecraft"]
				.iter()
				.map(|candidate| dir.join(candidate))
				.find(|candidate| candidate.is_dir());
			let Some(game_dir) = game_dir else {
				tracing::warn!(path = %dir.display(), "invalid instance: no game directory, skipping");
				continue;
			};

			tracing::debug!(name = %name, "instance detected");
			instances.push(Instance::open(name, InstanceKind::MultiMc, game_dir)?);
		}
		Ok(instances)
	}
}

impl Instance {
	fn open(name: String, kind: InstanceKind, game_dir: PathBuf) -> Result<Self> {
		let saves = scan_saves(&game_dir)?;
		Ok(Self {
			id: instance_id(&game_dir),
			name,
			kind,
			game_dir,
			saves,
		})
	}

	pub fn key(&self) -> InstanceKey {
		InstanceKey {
			name: self.name.clone(),
			id: self.id.clone(),
		}
	}

	pub fn save(&self, name: &str) -> Option<&Save> {
		self.saves.iter().find(|save| save.name == name)
	}
}

/// Every save directory under `<game_dir>/saves`, sorted by name.
///
/// Hidden directories (such as restore staging) are not saves.
pub fn scan_saves(game_dir: &Path) -> Result<Vec<Save>> {
	let saves_dir = game_dir.join("saves");
	if !saves_dir.is_dir() {
		return Ok(Vec::new());
	}
	let saves = subdirectories(&saves_dir)?
		.into_iter()
		.filter_map(|path| dir_name(&path).map(|name| Save { name, path }))
		.filter(|save| !save.name.starts_with('.'))
		.collect();
	Ok(saves)
}

fn instance_cfg_name(contents: &str) -> Option<String> {
	contents
		.lines()
		.find_map(|line| line.trim().strip_prefix("name="))
		.map(|name| name.trim().to_string())
		.filter(|name| !name.is_empty())
}

fn nested(root: &Path, leaf: &str) -> PathBuf {
	if root.ends_with(leaf) {
		root.to_path_buf()
	} else {
		root.join(leaf)
	}
}

fn dir_name(path: &Path) -> Option<String> {
	path.file_name().map(|name| name.to_string_lossy().into_owned())
}

fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
	let entries = fs::read_dir(dir).map_err(|e| BackupError::io(dir, e))?;
	let mut dirs = Vec::new();
	for entry in entries {
		let path = entry.map_err(|e| BackupError::io(dir, e))?.path();
		if path.is_dir() {
			dirs.push(path);
		}
	}
	dirs.sort();
	Ok(dirs)
}

/// A scan error for one root; other roots are still listed.
#[derive(Debug)]
pub struct ScanFailure {
	pub root: PathBuf,
	pub error: BackupError,
}

/// All instances found under a set of roots.
#[derive(Debug, Clone, Default)]
pub struct Inventory {
	roots: Vec<InstanceRoot>,
	instances: Vec<Instance>,
}

impl Inventory {
	pub fn new(roots: Vec<InstanceRoot>) -> Self {
		Self {
			roots,
			instances: Vec::new(),
		}
	}

	pub fn roots(&self) -> &[InstanceRoot] {
		&self.roots
	}

	pub fn instances(&self) -> &[Instance] {
		&self.instances
	}

	/// Rescan every root, replacing the previous listing.
	pub fn rescan(&mut self) -> Vec<ScanFailure> {
		let mut instances = Vec::new();
		let mut failures = Vec::new();
		for root in &self.roots {
			match root.scan() {
				Ok(found) => instances.extend(found),
				Err(error) => {
					tracing::warn!(root = %root.path.display(), error = %error, "instance root scan failed");
					failures.push(ScanFailure {
						root: root.path.clone(),
						error,
					});
				}
			}
		}
		self.instances = instances;
		failures
	}

	pub fn saves(&self) -> impl Iterator<Item = (&Instance, &Save)> {
		self.instances
			.iter()
			.flat_map(|instance| instance.saves.iter().map(move |save| (instance, save)))
	}

	pub fn save_count(&self) -> usize {
		self.instances.iter().map(|instance| instance.saves.len()).sum()
	}
}
