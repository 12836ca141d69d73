// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fs;
use std::path::Path;

use minebak_backup::{
	hash_tree, BackupError, BackupKind, BackupOutcome, BackupStore, InstanceKey, InstanceKind,
	InstanceRoot, Inventory, Save,
};

fn save_at(path: &Path) -> Save {
	Save {
		name: "World".to_string(),
		path: path.to_path_buf(),
	}
}

fn vanilla(game_dir: &Path) -> InstanceKey {
	InstanceKey::new("Vanilla", game_dir)
}

fn write(path: &Path, contents: &str) {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).unwrap();
	}
	fs::write(path, contents).unwrap();
}

#[test]
fn test_first_backup_is_full_copy() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");
	write(&world.path().join("region/r.0.0.mca"), "chunk");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let outcome = store.backup(&key, &save_at(world.path())).unwrap();
	let BackupOutcome::Created(version) = outcome else {
		panic!("expected a new version");
	};

	assert_eq!(version.kind, BackupKind::Full);
	assert_eq!(version.instance, "Vanilla");
	assert_eq!(version.instance_id, key.id);
	assert_eq!(version.changed, ["level.dat", "region/r.0.0.mca"]);
	let stored = backups
		.path()
		.join(format!("Vanilla-{}", key.id))
		.join("World")
		.join(version.timestamp.to_string());
	assert_eq!(store.save_dir(&key, "World"), stored.parent().unwrap());
	assert!(stored.join("metadata.json").is_file());
	assert_eq!(
		fs::read_to_string(stored.join("files/region/r.0.0.mca")).unwrap(),
		"chunk"
	);
}

#[test]
fn test_recorded_hashes_match_stored_files() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");
	write(&world.path().join("region/r.0.0.mca"), "chunk");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let version = store.backup(&key, &save_at(world.path())).unwrap().version().clone();

	let files = store
		.save_dir(&key, "World")
		.join(version.timestamp.to_string())
		.join("files");
	assert_eq!(hash_tree(&files).unwrap(), version.file_hash);
}

#[test]
fn test_unchanged_save_creates_nothing() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let save = save_at(world.path());
	let first = store.backup(&key, &save).unwrap();
	let second = store.backup(&key, &save).unwrap();

	assert!(matches!(second, BackupOutcome::Unchanged(_)));
	assert_eq!(second.version(), first.version());
	assert_eq!(store.list(&key, "World").unwrap().len(), 1);
}

#[test]
fn test_delta_stores_only_changes() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");
	write(&world.path().join("region/r.0.0.mca"), "chunk");
	write(&world.path().join("stats/old.json"), "{}");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let save = save_at(world.path());
	store.backup(&key, &save).unwrap();

	write(&world.path().join("region/r.0.0.mca"), "chunk v2");
	write(&world.path().join("region/r.0.1.mca"), "new chunk");
	fs::remove_file(world.path().join("stats/old.json")).unwrap();

	let BackupOutcome::Created(delta) = store.backup(&key, &save).unwrap() else {
		panic!("expected a delta version");
	};
	assert_eq!(delta.kind, BackupKind::FileDelta);
	assert_eq!(delta.changed, ["region/r.0.0.mca", "region/r.0.1.mca"]);
	assert_eq!(delta.removed, ["stats/old.json"]);
	assert_eq!(delta.file_count(), 3);

	let files = store
		.save_dir(&key, "World")
		.join(delta.timestamp.to_string())
		.join("files");
	assert!(!files.join("level.dat").exists());

	let versions = store.list(&key, "World").unwrap();
	assert_eq!(versions.len(), 2);
	assert!(versions[0].timestamp < versions[1].timestamp);
}

#[test]
fn test_same_named_instances_keep_separate_histories() {
	let dir = tempfile::tempdir().unwrap();
	let first = dir.path().join("launcher-a/.minecraft");
	let second = dir.path().join("launcher-b/.minecraft");
	write(&first.join("saves/World/level.dat"), "first");
	write(&second.join("saves/World/level.dat"), "second");

	let mut inventory = Inventory::new(vec![
		InstanceRoot::new(&first, InstanceKind::Normal),
		InstanceRoot::new(&second, InstanceKind::Normal),
	]);
	assert!(inventory.rescan().is_empty());
	let instances = inventory.instances();
	assert_eq!(instances.len(), 2);
	assert_eq!(instances[0].name, instances[1].name);
	assert_ne!(instances[0].id, instances[1].id);

	let store = BackupStore::new(dir.path().join("backups"));
	for (instance, save) in inventory.saves() {
		let outcome = store.backup(&instance.key(), save).unwrap();
		assert_eq!(outcome.version().kind, BackupKind::Full);
	}

	for (instance, expected) in instances.iter().zip([&first, &second]) {
		let versions = store.list(&instance.key(), "World").unwrap();
		assert_eq!(versions.len(), 1);
		assert_eq!(versions[0].source, expected.join("saves/World"));
		assert_eq!(versions[0].instance_id, instance.id);
	}
}

#[test]
fn test_restore_rebuilds_each_version() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	let restored = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");
	write(&world.path().join("region/r.0.0.mca"), "chunk");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let save = save_at(world.path());
	let first = store.backup(&key, &save).unwrap().version().clone();

	write(&world.path().join("level.dat"), "level v2");
	fs::remove_file(world.path().join("region/r.0.0.mca")).unwrap();
	let second = store.backup(&key, &save).unwrap().version().clone();

	let target = restored.path().join("World");
	write(&target.join("stray.txt"), "left over");

	store.restore(&key, "World", first.timestamp, &target).unwrap();
	assert_eq!(hash_tree(&target).unwrap(), first.file_hash);
	assert!(!target.join("stray.txt").exists());

	store.restore(&key, "World", second.timestamp, &target).unwrap();
	assert_eq!(fs::read_to_string(target.join("level.dat")).unwrap(), "level v2");
	assert!(!target.join("region/r.0.0.mca").exists());

	let leftovers: Vec<_> = fs::read_dir(restored.path())
		.unwrap()
		.map(|entry| entry.unwrap().file_name())
		.collect();
	assert_eq!(leftovers, ["World"]);
}

#[test]
fn test_restore_into_missing_target_creates_it() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	let restored = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let version = store.backup(&key, &save_at(world.path())).unwrap().version().clone();

	let target = restored.path().join("copies/World");
	store.restore(&key, "World", version.timestamp, &target).unwrap();
	assert_eq!(fs::read_to_string(target.join("level.dat")).unwrap(), "level");
}

#[test]
fn test_damaged_backup_leaves_live_save_untouched() {
	let dir = tempfile::tempdir().unwrap();
	let live = dir.path().join("saves/World");
	write(&live.join("level.dat"), "level");
	write(&live.join("region/r.0.0.mca"), "chunk");

	let store = BackupStore::new(dir.path().join("backups"));
	let key = vanilla(dir.path());
	let version = store.backup(&key, &save_at(&live)).unwrap().version().clone();

	write(&live.join("level.dat"), "played since");
	let before = hash_tree(&live).unwrap();

	let files = store
		.save_dir(&key, "World")
		.join(version.timestamp.to_string())
		.join("files");
	write(&files.join("region/r.0.0.mca"), "bit rot");

	let err = store.restore(&key, "World", version.timestamp, &live).unwrap_err();
	assert!(matches!(err, BackupError::HashMismatch(ref file) if file == "region/r.0.0.mca"));
	assert_eq!(hash_tree(&live).unwrap(), before);

	fs::remove_file(files.join("level.dat")).unwrap();
	let err = store.restore(&key, "World", version.timestamp, &live).unwrap_err();
	assert!(matches!(err, BackupError::MissingFile(ref file) if file == "level.dat"));
	assert_eq!(hash_tree(&live).unwrap(), before);

	let siblings: Vec<_> = fs::read_dir(dir.path().join("saves"))
		.unwrap()
		.map(|entry| entry.unwrap().file_name())
		.collect();
	assert_eq!(siblings, ["World"]);
}

#[test]
fn test_restore_unknown_version() {
	let backups = tempfile::tempdir().unwrap();
	let target = tempfile::tempdir().unwrap();
	let store = BackupStore::new(backups.path());
	let err = store
		.restore(&vanilla(target.path()), "World", 42, target.path())
		.unwrap_err();
	assert!(matches!(err, BackupError::VersionNotFound { timestamp: 42, .. }));
}

#[test]
fn test_list_skips_directories_without_metadata() {
	let backups = tempfile::tempdir().unwrap();
	let store = BackupStore::new(backups.path());
	let key = vanilla(Path::new("/games/.minecraft"));
	fs::create_dir_all(store.save_dir(&key, "World").join("123/files")).unwrap();
	assert!(store.list(&key, "World").unwrap().is_empty());
}

#[test]
fn test_corrupt_metadata_does_not_block_backups() {
	let world = tempfile::tempdir().unwrap();
	let backups = tempfile::tempdir().unwrap();
	write(&world.path().join("level.dat"), "level");

	let store = BackupStore::new(backups.path());
	let key = vanilla(world.path());
	let save = save_at(world.path());
	let first = store.backup(&key, &save).unwrap().version().clone();

	write(
		&store.save_dir(&key, "World").join("1/metadata.json"),
		"{ not json",
	);
	let versions = store.list(&key, "World").unwrap();
	assert_eq!(versions, [first.clone()]);

	write(&world.path().join("level.dat"), "level v2");
	let BackupOutcome::Created(next) = store.backup(&key, &save).unwrap() else {
		panic!("expected a new version");
	};
	assert_eq!(next.kind, BackupKind::FileDelta);
	assert_eq!(store.list(&key, "World").unwrap().len(), 2);
}
