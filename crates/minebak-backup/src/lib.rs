// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Minecraft save discovery and incremental backups.
//!
//! [`InstanceRoot::scan`] finds instances for the three launcher layouts in
//! [`InstanceKind`]; [`Inventory`] aggregates several roots. [`BackupStore`]
//! writes full and file-delta versions of a save and restores any of them.

mod error;
mod instance;
mod store;

pub use error::{BackupError, Result};
pub use instance::{
	instance_id, scan_saves, Instance, InstanceKey, InstanceKind, InstanceRoot, Inventory, Save,
	ScanFailure,
};
pub use store::{hash_file, hash_tree, BackupKind, BackupOutcome, BackupStore, BackupVersion};
