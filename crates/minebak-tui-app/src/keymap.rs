// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minebak_tui_core::{Action, Keymap};
use minebak_tui_router::normalize_path;

/// Custom action kind: move to the next available locale.
pub const CYCLE_LOCALE: &str = "cycle_locale";

/// Keys that work on every page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellKeymap {
	routes: Vec<&'static str>,
}

impl ShellKeymap {
	pub fn new(routes: impl IntoIterator<Item = &'static str>) -> Self {
		Self {
			routes: routes.into_iter().collect(),
		}
	}

	fn step(&self, route: &str, delta: isize) -> Option<Action> {
		let len = self.routes.len() as isize;
		if len == 0 {
			return None;
		}
		let current = normalize_path(route);
		let target = match self
			.routes
			.iter()
			.position(|path| normalize_path(path) == current)
		{
			Some(index) => (index as isize + delta).rem_euclid(len) as usize,
			None => 0,
		};
		Some(Action::Navigate(self.routes[target].to_string()))
	}
}

impl Keymap<Action> for ShellKeymap {
	fn key_to_action(&self, key: &KeyEvent, route: &str) -> Option<Action> {
		let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
		let alt = key.modifiers.contains(KeyModifiers::ALT);

		match key.code {
			KeyCode::Char('c') if ctrl => Some(Action::Quit),
			KeyCode::Char('l') if ctrl => Some(Action::custom(CYCLE_LOCALE, "")),
			KeyCode::Char('q') if !ctrl && !alt => Some(Action::Quit),
			KeyCode::Char(digit @ '1'..='9') if !ctrl && !alt => {
				let index = digit as usize - '1' as usize;
				self.routes
					.get(index)
					.map(|path| Action::Navigate(path.to_string()))
			}
			KeyCode::Tab => self.step(route, 1),
			KeyCode::BackTab => self.step(route, -1),
			KeyCode::Backspace => Some(Action::Back),
			KeyCode::Left if alt => Some(Action::Back),
			KeyCode::Right if alt => Some(Action::Forward),
			_ => None,
		}
	}
}
