// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use ratatui::style::{Color, Modifier, Style};

#[derive(Debug, Clone, PartialEq)]
pub struct ColorPalette {
	pub background: Color,
	pub surface: Color,
	pub text: Color,
	pub text_muted: Color,
	pub accent: Color,
	pub error: Color,
	pub warning: Color,
	pub success: Color,
	pub selection_bg: Color,
	pub selection_fg: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderStyles {
	pub normal: Style,
	pub focused: Style,
	pub error: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyles {
	pub normal: Style,
	pub bold: Style,
	pub dim: Style,
	pub heading: Style,
	pub error: Style,
	pub success: Style,
}

/// Styles for the navigation bar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavStyles {
	pub active: Style,
	pub inactive: Style,
	pub divider: Style,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
	pub name: String,
	pub colors: ColorPalette,
	pub borders: BorderStyles,
	pub text: TextStyles,
	pub nav: NavStyles,
}

impl Default for Theme {
	fn default() -> Self {
		Self::dark()
	}
}

impl Theme {
	pub fn dark() -> Self {
		Self::from_palette(
			"dark",
			ColorPalette {
				background: Color::Black,
				surface: Color::Rgb(30, 30, 30),
				text: Color::White,
				text_muted: Color::DarkGray,
				accent: Color::Green,
				error: Color::Red,
				warning: Color::Yellow,
				success: Color::Green,
				selection_bg: Color::Rgb(0, 95, 0),
				selection_fg: Color::White,
			},
		)
	}

	pub fn light() -> Self {
		Self::from_palette(
			"light",
			ColorPalette {
				background: Color::White,
				surface: Color::Rgb(245, 245, 245),
				text: Color::Black,
				text_muted: Color::Gray,
				accent: Color::Rgb(0, 120, 0),
				error: Color::Red,
				warning: Color::Rgb(180, 120, 0),
				success: Color::Rgb(0, 120, 0),
				selection_bg: Color::Rgb(200, 235, 200),
				selection_fg: Color::Black,
			},
		)
	}

	/// Look up a builtin theme by name.
	pub fn by_name(name: &str) -> Option<Self> {
		match name.trim().to_ascii_lowercase().as_str() {
			"dark" => Some(Self::dark()),
			"light" => Some(Self::light()),
			_ => None,
		}
	}

	pub fn names() -> &'static [&'static str] {
		&["dark", "light"]
	}

	fn from_palette(name: &str, colors: ColorPalette) -> Self {
		let borders = BorderStyles {
			normal: Style::default().fg(colors.text_muted),
			focused: Style::default().fg(colors.accent),
			error: Style::default().fg(colors.error),
		};

		let text = TextStyles {
			normal: Style::default().fg(colors.text),
			bold: Style::default().fg(colors.text).add_modifier(Modifier::BOLD),
			dim: Style::default().fg(colors.text_muted),
			heading: Style::default().fg(colors.accent).add_modifier(Modifier::BOLD),
			error: Style::default().fg(colors.error),
			success: Style::default().fg(colors.success),
		};

		let nav = NavStyles {
			active: Style::default()
				.fg(colors.selection_fg)
				.bg(colors.selection_bg)
				.add_modifier(Modifier::BOLD),
			inactive: Style::default().fg(colors.text),
			divider: Style::default().fg(colors.text_muted),
		};

		Self {
			name: name.to_string(),
			colors,
			borders,
			text,
			nav,
		}
	}

	pub fn border_style_for(&self, focused: bool) -> Style {
		if focused {
			self.borders.focused
		} else {
			self.borders.normal
		}
	}

	pub fn selection_style(&self) -> Style {
		Style::default().bg(self.colors.selection_bg).fg(self.colors.selection_fg)
	}
}
