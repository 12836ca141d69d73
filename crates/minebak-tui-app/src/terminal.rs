// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io;

use crossterm::{
	terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
	ExecutableCommand,
};

/// Raw mode plus the alternate screen, undone on drop.
#[derive(Debug)]
pub struct TerminalGuard {
	active: bool,
}

impl TerminalGuard {
	pub fn enter() -> io::Result<Self> {
		enable_raw_mode()?;
		if let Err(e) = io::stdout().execute(EnterAlternateScreen) {
			let _ = disable_raw_mode();
			return Err(e);
		}
		Ok(Self { active: true })
	}

	pub fn restore(&mut self) -> io::Result<()> {
		if !self.active {
			return Ok(());
		}
		self.active = false;
		disable_raw_mode()?;
		io::stdout().execute(LeaveAlternateScreen)?;
		Ok(())
	}
}

impl Drop for TerminalGuard {
	fn drop(&mut self) {
		if let Err(e) = self.restore() {
			tracing::warn!(error = %e, "failed to restore terminal");
		}
	}
}
