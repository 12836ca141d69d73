// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One-line status bar: labelled items on the left, key hints on the right.
//!
//! Items that do not fit are cut and end with `…`; key hints always win the
//! space they need.

use minebak_tui_theme::Theme;
use ratatui::{
	buffer::Buffer,
	layout::Rect,
	style::{Style, Stylize},
	text::{Line, Span},
	widgets::Widget,
};

#[derive(Debug, Clone)]
pub struct StatusItem {
	pub label: String,
	pub value: String,
}

#[derive(Debug, Clone)]
pub struct StatusBar {
	items: Vec<StatusItem>,
	shortcuts: Vec<(String, String)>,
	style: Style,
	key_style: Style,
}

impl Default for StatusBar {
	fn default() -> Self {
		Self {
			items: Vec::new(),
			shortcuts: Vec::new(),
			style: Style::default(),
			key_style: Style::default().bold().fg(Theme::default().colors.accent),
		}
	}
}

impl StatusBar {
	pub fn new() -> Self {
		Self::default()
	}

	/// Take colors from a theme.
	pub fn themed(theme: &Theme) -> Self {
		Self {
			style: Style::default().bg(theme.colors.surface).fg(theme.colors.text),
			key_style: Style::default().bold().fg(theme.colors.accent),
			..Self::default()
		}
	}

	pub fn item(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
		self.items.push(StatusItem {
			label: label.into(),
			value: value.into(),
		});
		self
	}

	pub fn shortcut(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
		self.shortcuts.push((key.into(), desc.into()));
		self
	}

	pub fn style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	pub fn key_style(mut self, style: Style) -> Self {
		self.key_style = style;
		self
	}

	fn shortcut_line(&self) -> Line<'_> {
		let mut spans = Vec::new();
		for (i, (key, desc)) in self.shortcuts.iter().enumerate() {
			if i > 0 {
				spans.push(Span::raw(" | "));
			}
			spans.push(Span::styled(key.as_str(), self.key_style));
			spans.push(Span::raw(" "));
			spans.push(Span::raw(desc.as_str()));
		}
		Line::from(spans)
	}

	fn item_line(&self) -> Line<'_> {
		let mut spans = Vec::new();
		for (i, item) in self.items.iter().enumerate() {
			if i > 0 {
				spans.push(Span::raw(" | "));
			}
			spans.push(Span::raw(item.label.as_str()).bold());
			spans.push(Span::raw(": "));
			spans.push(Span::raw(item.value.as_str()));
		}
		Line::from(spans)
	}
}

impl Widget for StatusBar {
	fn render(self, area: Rect, buf: &mut Buffer) {
		if area.is_empty() {
			return;
		}
		if self.style != Style::default() {
			buf.set_style(area, self.style);
		}

		let shortcut_line = self.shortcut_line();
		let shortcut_width = shortcut_line.width() as u16;
		let available_for_items = if self.shortcuts.is_empty() {
			area.width
		} else {
			area.width.saturating_sub(shortcut_width + 1)
		};

		let item_line = self.item_line();
		buf.set_line(area.x, area.y, &item_line, available_for_items);
		if item_line.width() > available_for_items as usize && available_for_items > 0 {
			buf[(area.x + available_for_items - 1, area.y)].set_symbol("…");
		}

		if !self.shortcuts.is_empty() {
			let shortcut_x = area.right().saturating_sub(shortcut_width);
			if shortcut_x > area.x {
				buf.set_line(shortcut_x, area.y, &shortcut_line, shortcut_width);
			}
		}
	}
}
