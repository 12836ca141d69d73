// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Versioned save backups on disk.
//!
//! Layout: `<root>/<instance>-<id>/<save>/<timestamp_ms>/` holding a
//! `metadata.json` and a `files/` tree. The first version of a save is a
//! full copy; later versions only store files whose hash changed. Every
//! version records the complete hash manifest of the save at that moment,
//! so any version can be rebuilt from itself and its predecessors.
//!
//! Restores are built in a sibling staging directory and only swapped over
//! the live save once every file matches its recorded hash.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use walkdir::WalkDir;

use crate::error::{BackupError, Result};
use crate::instance::{InstanceKey, Save};

const METADATA_FILE: &str = "metadata.json";
const FILES_DIR: &str = "files";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupKind {
	Full,
	FileDelta,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackupVersion {
	/// Milliseconds since the Unix epoch; also the directory name.
	pub timestamp: i64,
	pub kind: BackupKind,
	pub instance: String,
	#[serde(default)]
	pub instance_id: String,
	pub save: String,
	pub source: PathBuf,
	/// Relative path (with `/` separators) to hex SHA-256 of the stored bytes.
	pub file_hash: BTreeMap<String, String>,
	/// Files stored in this version's `files/` tree.
	#[serde(default)]
	pub changed: Vec<String>,
	/// Files present in the previous version but gone from this one.
	#[serde(default)]
	pub removed: Vec<String>,
}

impl BackupVersion {
	pub fn created_at(&self) -> Option<DateTime<Utc>> {
		DateTime::<Utc>::from_timestamp_millis(self.timestamp)
	}

	pub fn file_count(&self) -> usize {
		self.file_hash.len()
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
	Created(BackupVersion),
	/// Nothing changed since this version.
	Unchanged(BackupVersion),
}

impl BackupOutcome {
	pub fn version(&self) -> &BackupVersion {
		match self {
			Self::Created(version) | Self::Unchanged(version) => version,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupStore {
	root: PathBuf,
}

impl BackupStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Directory holding every version of one save.
	pub fn save_dir(&self, instance: &InstanceKey, save: &str) -> PathBuf {
		let instance_dir = format!("{}-{}", path_component(&instance.name), instance.id);
		self.root.join(instance_dir).join(path_component(save))
	}

	fn version_dir(&self, instance: &InstanceKey, save: &str, timestamp: i64) -> PathBuf {
		self.save_dir(instance, save).join(timestamp.to_string())
	}

	/// Back up `save`, storing only what changed since the latest version.
	pub fn backup(&self, instance: &InstanceKey, save: &Save) -> Result<BackupOutcome> {
		let mut manifest = hash_tree(&save.path)?;
		let versions = self.list(instance, &save.name)?;
		let previous = versions.last();

		if let Some(previous) = previous {
			if previous.file_hash == manifest {
				tracing::info!(instance = %instance.name, save = %save.name, "save unchanged since last backup");
				return Ok(BackupOutcome::Unchanged(previous.clone()));
			}
		}

		let (kind, changed, removed): (BackupKind, Vec<String>, Vec<String>) = match previous {
			None => (BackupKind::Full, manifest.keys().cloned().collect(), Vec::new()),
			Some(previous) => {
				let changed = manifest
					.iter()
					.filter(|(path, hash)| previous.file_hash.get(*path) != Some(*hash))
					.map(|(path, _)| path.clone())
					.collect();
				let removed = previous
					.file_hash
					.keys()
					.filter(|path| !manifest.contains_key(*path))
					.cloned()
					.collect();
				(BackupKind::FileDelta, changed, removed)
			}
		};

		let mut timestamp = Utc::now().timestamp_millis();
		if let Some(previous) = previous {
			timestamp = timestamp.max(previous.timestamp + 1);
		}
		while self.version_dir(instance, &save.name, timestamp).exists() {
			timestamp += 1;
		}

		let dir = self.version_dir(instance, &save.name, timestamp);
		let files = dir.join(FILES_DIR);
		if let Err(error) = store_changed(save, &files, &changed, &mut manifest) {
			discard(&dir);
			return Err(error);
		}

		let version = BackupVersion {
			timestamp,
			kind,
			instance: instance.name.clone(),
			instance_id: instance.id.clone(),
			save: save.name.clone(),
			source: save.path.clone(),
			file_hash: manifest,
			changed,
			removed,
		};
		if let Err(error) = write_metadata(&dir, &version) {
			discard(&dir);
			return Err(error);
		}

		tracing::info!(
			instance = %instance.name,
			save = %save.name,
			timestamp,
			kind = ?version.kind,
			changed = version.changed.len(),
			removed = version.removed.len(),
			"backup created"
		);
		Ok(BackupOutcome::Created(version))
	}

	/// All readable versions of a save, oldest first.
	///
	/// Versions with missing or unreadable metadata are skipped with a warning.
	pub fn list(&self, instance: &InstanceKey, save: &str) -> Result<Vec<BackupVersion>> {
		let dir = self.save_dir(instance, save);
		if !dir.is_dir() {
			return Ok(Vec::new());
		}

		let entries = fs::read_dir(&dir).map_err(|e| BackupError::io(&dir, e))?;
		let mut versions = Vec::new();
		for entry in entries {
			let path = entry.map_err(|e| BackupError::io(&dir, e))?.path();
			if !path.is_dir() {
				continue;
			}
			let metadata = path.join(METADATA_FILE);
			if !metadata.is_file() {
				tracing::warn!(path = %path.display(), "backup directory without metadata, skipping");
				continue;
			}
			match read_metadata(&metadata) {
				Ok(version) => versions.push(version),
				Err(error) => {
					tracing::warn!(path = %path.display(), error = %error, "unreadable backup metadata, skipping");
				}
			}
		}
		versions.sort_by_key(|version| version.timestamp);
		Ok(versions)
	}

	/// Rebuild the save as of `timestamp` and put it in place of `target`.
	///
	/// On error `target` is left exactly as it was.
	pub fn restore(
		&self,
		instance: &InstanceKey,
		save: &str,
		timestamp: i64,
		target: &Path,
	) -> Result<BackupVersion> {
		let versions = self.list(instance, save)?;
		let index = versions
			.iter()
			.position(|version| version.timestamp == timestamp)
			.ok_or_else(|| BackupError::VersionNotFound {
				save: save.to_string(),
				timestamp,
			})?;
		let version = &versions[index];

		let (Some(parent), Some(name)) = (target.parent(), target.file_name()) else {
			return Err(BackupError::InvalidTarget(target.to_path_buf()));
		};
		let name = name.to_string_lossy();
		let staging = parent.join(format!(".{name}.restore-{timestamp}"));
		let previous = parent.join(format!(".{name}.previous-{timestamp}"));

		if staging.exists() {
			fs::remove_dir_all(&staging).map_err(|e| BackupError::io(&staging, e))?;
		}
		fs::create_dir_all(&staging).map_err(|e| BackupError::io(&staging, e))?;
		if let Err(error) = self.rebuild(instance, save, &versions[..=index], &staging) {
			discard(&staging);
			return Err(error);
		}
		swap_into_place(&staging, target, &previous)?;

		tracing::info!(instance = %instance.name, save, timestamp, target = %target.display(), "save restored");
		Ok(version.clone())
	}

	/// Write the last of `chain` into `dir`, checking every file's hash.
	fn rebuild(
		&self,
		instance: &InstanceKey,
		save: &str,
		chain: &[BackupVersion],
		dir: &Path,
	) -> Result<()> {
		let Some(version) = chain.last() else {
			return Ok(());
		};
		for (relative, hash) in &version.file_hash {
			let holder = chain
				.iter()
				.rev()
				.find(|candidate| candidate.changed.iter().any(|path| path == relative))
				.ok_or_else(|| BackupError::MissingFile(relative.clone()))?;
			let source = self
				.version_dir(instance, save, holder.timestamp)
				.join(FILES_DIR)
				.join(relative);
			if !source.is_file() {
				return Err(BackupError::MissingFile(relative.clone()));
			}
			if store_file(&source, &dir.join(relative))? != *hash {
				return Err(BackupError::HashMismatch(relative.clone()));
			}
		}
		Ok(())
	}
}

/// Copy each changed file into `files`, recording the hash of what was stored.
fn store_changed(
	save: &Save,
	files: &Path,
	changed: &[String],
	manifest: &mut BTreeMap<String, String>,
) -> Result<()> {
	fs::create_dir_all(files).map_err(|e| BackupError::io(files, e))?;
	for relative in changed {
		let hash = store_file(&save.path.join(relative), &files.join(relative))?;
		if manifest.get(relative) != Some(&hash) {
			tracing::debug!(save = %save.name, file = %relative, "file changed while it was being stored");
			manifest.insert(relative.clone(), hash);
		}
	}
	Ok(())
}

/// Replace `target` with `staging`, parking the old contents at `previous`
/// until the swap has succeeded.
fn swap_into_place(staging: &Path, target: &Path, previous: &Path) -> Result<()> {
	if !target.exists() {
		return fs::rename(staging, target).map_err(|e| {
			discard(staging);
			BackupError::io(target, e)
		});
	}

	if previous.exists() {
		if let Err(e) = fs::remove_dir_all(previous) {
			discard(staging);
			return Err(BackupError::io(previous, e));
		}
	}
	if let Err(e) = fs::rename(target, previous) {
		discard(staging);
		return Err(BackupError::io(target, e));
	}
	if let Err(e) = fs::rename(staging, target) {
		if let Err(back) = fs::rename(previous, target) {
			tracing::error!(
				previous = %previous.display(),
				error = %back,
				"could not move the original save back; it is kept at the previous path"
			);
		}
		discard(staging);
		return Err(BackupError::io(target, e));
	}
	discard(previous);
	Ok(())
}

/// Best-effort removal of a half-written directory.
fn discard(dir: &Path) {
	if let Err(error) = fs::remove_dir_all(dir) {
		if error.kind() != io::ErrorKind::NotFound {
			tracing::warn!(path = %dir.display(), error = %error, "failed to clean up directory");
		}
	}
}

/// Hash every file under `dir`, keyed by `/`-separated relative path.
pub fn hash_tree(dir: &Path) -> Result<BTreeMap<String, String>> {
	let mut manifest = BTreeMap::new();
	for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
		let entry = entry.map_err(|source| BackupError::Walk {
			path: dir.to_path_buf(),
			source,
		})?;
		if !entry.file_type().is_file() {
			continue;
		}
		let Ok(relative) = entry.path().strip_prefix(dir) else {
			continue;
		};
		let key = relative
			.components()
			.map(|component| component.as_os_str().to_string_lossy())
			.collect::<Vec<_>>()
			.join("/");
		manifest.insert(key, hash_file(entry.path())?);
	}
	Ok(manifest)
}

pub fn hash_file(path: &Path) -> Result<String> {
	let mut file = File::open(path).map_err(|e| BackupError::io(path, e))?;
	let mut hasher = Sha256::new();
	io::copy(&mut file, &mut hasher).map_err(|e| BackupError::io(path, e))?;
	Ok(hex::encode(hasher.finalize()))
}

/// Feeds everything written through it into a SHA-256 hasher.
struct HashingWriter<W> {
	inner: W,
	hasher: Sha256,
}

impl<W: Write> Write for HashingWriter<W> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let written = self.inner.write(buf)?;
		self.hasher.update(&buf[..written]);
		Ok(written)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.inner.flush()
	}
}

/// Copy `source` to `destination` in one pass, returning the hex SHA-256 of
/// the bytes written.
fn store_file(source: &Path, destination: &Path) -> Result<String> {
	if let Some(parent) = destination.parent() {
		fs::create_dir_all(parent).map_err(|e| BackupError::io(parent, e))?;
	}
	let mut reader = File::open(source).map_err(|e| BackupError::io(source, e))?;
	let file = File::create(destination).map_err(|e| BackupError::io(destination, e))?;
	let mut writer = HashingWriter {
		inner: BufWriter::new(file),
		hasher: Sha256::new(),
	};
	io::copy(&mut reader, &mut writer).map_err(|e| BackupError::io(source, e))?;
	writer.flush().map_err(|e| BackupError::io(destination, e))?;
	Ok(hex::encode(writer.hasher.finalize()))
}

fn write_metadata(dir: &Path, version: &BackupVersion) -> Result<()> {
	let path = dir.join(METADATA_FILE);
	let json = serde_json::to_string_pretty(version).map_err(|source| BackupError::Metadata {
		path: path.clone(),
		source,
	})?;
	fs::write(&path, json).map_err(|e| BackupError::io(&path, e))
}

fn read_metadata(path: &Path) -> Result<BackupVersion> {
	let contents = fs::read_to_string(path).map_err(|e| BackupError::io(path, e))?;
	serde_json::from_str(&contents).map_err(|source| BackupError::Metadata {
		path: path.to_path_buf(),
		source,
	})
}

/// Make a name safe to use as a single directory name.
fn path_component(name: &str) -> String {
	let cleaned: String = name
		.trim()
		.chars()
		.map(|c| match c {
			'/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
			c if c.is_control() => '_',
			c => c,
		})
		.collect();
	if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
		return "_".to_string();
	}
	cleaned
}
