// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ratatui::layout::Rect;
use ratatui::Frame;

use minebak_common_i18n::I18n;
use minebak_tui_core::{Action, ComponentError, Event};
use minebak_tui_theme::Theme;

pub struct RenderContext<'a> {
	pub theme: &'a Theme,
	pub i18n: &'a I18n,
	/// Location the router currently points at.
	pub route: &'a str,
}

impl<'a> RenderContext<'a> {
	pub fn new(theme: &'a Theme, i18n: &'a I18n, route: &'a str) -> Self {
		Self { theme, i18n, route }
	}

	pub fn t(&self, key: &str) -> String {
		self.i18n.t(key)
	}

	pub fn t_fmt(&self, key: &str, vars: &[(&str, &str)]) -> String {
		self.i18n.t_fmt(key, vars)
	}

	pub fn locale(&self) -> &str {
		self.i18n.locale()
	}
}

/// Core trait for TUI components.
///
/// Components are the building blocks of the TUI. They handle events,
/// produce actions, and render themselves to the terminal.
pub trait Component: Send {
	fn id(&self) -> &str;

	/// Called once when the component is attached to the UI tree ("on_mount").
	/// Use this for one-time initialization that requires the component to be fully constructed.
	fn init(&mut self) -> Result<(), ComponentError> {
		Ok(())
	}

	fn handle_event(&mut self, event: &Event) -> Vec<Action>;

	fn update(&mut self, action: &Action) -> Vec<Action>;

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext);
}
