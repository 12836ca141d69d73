// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backing up every known save without the interface, once or on a timer.

use std::thread;
use std::time::Duration;

use minebak_backup::{BackupOutcome, BackupStore, Inventory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackupSummary {
	pub created: usize,
	pub unchanged: usize,
	pub failed: usize,
}

impl BackupSummary {
	pub fn total(&self) -> usize {
		self.created + self.unchanged + self.failed
	}

	fn add(&mut self, other: &BackupSummary) {
		self.created += other.created;
		self.unchanged += other.unchanged;
		self.failed += other.failed;
	}
}

/// Rescan `inventory`, then back up each save once.
///
/// Unreadable roots and failed saves are logged and counted, not fatal.
pub fn run_backup(inventory: &mut Inventory, store: &BackupStore) -> BackupSummary {
	let failures = inventory.rescan();
	let mut summary = BackupSummary {
		failed: failures.len(),
		..BackupSummary::default()
	};

	for (instance, save) in inventory.saves() {
		match store.backup(&instance.key(), save) {
			Ok(BackupOutcome::Created(version)) => {
				tracing::info!(instance = %instance.name, save = %save.name, timestamp = version.timestamp, "backup created");
				summary.created += 1;
			}
			Ok(BackupOutcome::Unchanged(_)) => summary.unchanged += 1,
			Err(error) => {
				tracing::error!(instance = %instance.name, save = %save.name, error = %error, "backup failed");
				summary.failed += 1;
			}
		}
	}

	tracing::info!(
		created = summary.created,
		unchanged = summary.unchanged,
		failed = summary.failed,
		"backup run finished"
	);
	summary
}

/// Call [`run_backup`] every `interval` for as long as `keep_going` agrees.
///
/// `keep_going` sees each run's summary; the returned summary adds up all runs.
pub fn run_every(
	inventory: &mut Inventory,
	store: &BackupStore,
	interval: Duration,
	mut keep_going: impl FnMut(&BackupSummary) -> bool,
) -> BackupSummary {
	let mut total = BackupSummary::default();
	let mut round = 0usize;
	loop {
		round += 1;
		let summary = run_backup(inventory, store);
		total.add(&summary);
		if !keep_going(&summary) {
			tracing::info!(rounds = round, "scheduled backups stopped");
			return total;
		}
		tracing::debug!(?interval, round, "waiting for the next scheduled backup");
		thread::sleep(interval);
	}
}
