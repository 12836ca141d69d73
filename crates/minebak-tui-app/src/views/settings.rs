// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;

use minebak_backup::InstanceRoot;
use minebak_common_i18n::locale_info;
use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, Event};
use ratatui::{
	layout::Rect,
	text::{Line, Span},
	widgets::Paragraph,
	Frame,
};

/// Read-only facts the settings page shows next to the live locale and theme.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsInfo {
	pub config_path: Option<PathBuf>,
	pub backup_root: PathBuf,
	pub instance_roots: Vec<InstanceRoot>,
}

#[derive(Debug)]
pub struct SettingsView {
	info: SettingsInfo,
}

impl SettingsView {
	pub fn new(info: SettingsInfo) -> Self {
		Self { info }
	}

	pub fn info(&self) -> &SettingsInfo {
		&self.info
	}
}

fn describe_locale(code: &str) -> String {
	match locale_info(code) {
		Some(info) => format!("{} ({})", info.code, info.native_name),
		None => code.to_string(),
	}
}

impl Component for SettingsView {
	fn id(&self) -> &str {
		"settings"
	}

	fn handle_event(&mut self, _event: &Event) -> Vec<Action> {
		vec![]
	}

	fn update(&mut self, _action: &Action) -> Vec<Action> {
		vec![]
	}

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let label = |key: &str| Span::styled(format!("{}: ", ctx.t(key)), ctx.theme.text.bold);
		let not_set = ctx.t("settings.not_set");

		let mut lines = vec![
			Line::from(vec![label("settings.locale"), Span::raw(describe_locale(ctx.locale()))]),
			Line::from(vec![
				label("settings.fallback_locale"),
				Span::raw(describe_locale(ctx.i18n.fallback_locale())),
			]),
			Line::from(vec![label("settings.theme"), Span::raw(ctx.theme.name.clone())]),
			Line::from(vec![
				label("settings.backup_root"),
				Span::raw(self.info.backup_root.display().to_string()),
			]),
			Line::from(vec![
				label("settings.config_path"),
				Span::raw(
					self.info
						.config_path
						.as_ref()
						.map(|path| path.display().to_string())
						.unwrap_or_else(|| not_set.clone()),
				),
			]),
		];

		if self.info.instance_roots.is_empty() {
			lines.push(Line::from(vec![label("settings.instance_roots"), Span::raw(not_set)]));
		} else {
			lines.push(Line::from(label("settings.instance_roots")));
			for root in &self.info.instance_roots {
				lines.push(Line::from(format!("  - {} ({})", root.path.display(), root.kind)));
			}
		}

		frame.render_widget(Paragraph::new(lines), area);
	}
}
