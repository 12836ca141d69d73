// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::BTreeMap;

use ratatui::{backend::Backend, Terminal};

use crate::error::BootstrapError;

/// A terminal plus the named targets applications can mount onto.
pub struct Host<B: Backend> {
	terminal: Terminal<B>,
	/// Selector to whether an application occupies it.
	targets: BTreeMap<String, bool>,
	mounts: Vec<String>,
}

impl<B: Backend> Host<B> {
	pub fn new(backend: B) -> Result<Self, BootstrapError> {
		let terminal = Terminal::new(backend).map_err(|e| BootstrapError::Backend(e.to_string()))?;
		Ok(Self {
			terminal,
			targets: BTreeMap::new(),
			mounts: Vec::new(),
		})
	}

	pub fn with_target(mut self, selector: impl Into<String>) -> Self {
		self.add_target(selector);
		self
	}

	pub fn add_target(&mut self, selector: impl Into<String>) {
		self.targets.entry(selector.into()).or_insert(false);
	}

	pub fn has_target(&self, selector: &str) -> bool {
		self.targets.contains_key(selector)
	}

	pub fn is_occupied(&self, selector: &str) -> bool {
		self.targets.get(selector).copied().unwrap_or(false)
	}

	/// Every mount attempt, successful or not, in call order.
	pub fn mounts(&self) -> &[String] {
		&self.mounts
	}

	pub fn terminal(&self) -> &Terminal<B> {
		&self.terminal
	}

	pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
		&mut self.terminal
	}

	pub fn backend(&self) -> &B {
		self.terminal.backend()
	}

	pub(crate) fn attach(&mut self, selector: &str) -> Result<(), BootstrapError> {
		self.mounts.push(selector.to_string());

		let valid = selector.len() > 1
			&& selector.starts_with('#')
			&& !selector.chars().any(char::is_whitespace);
		if !valid {
			return Err(BootstrapError::InvalidSelector(selector.to_string()));
		}
		match self.targets.get_mut(selector) {
			None => Err(BootstrapError::MountTargetMissing(selector.to_string())),
			Some(true) => Err(BootstrapError::MountTargetOccupied(selector.to_string())),
			Some(occupied) => {
				*occupied = true;
				Ok(())
			}
		}
	}

	pub(crate) fn detach(&mut self, selector: &str) {
		if let Some(occupied) = self.targets.get_mut(selector) {
			*occupied = false;
		}
	}
}
