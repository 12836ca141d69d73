// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, Event};
use ratatui::{
	layout::Rect,
	text::{Line, Span},
	widgets::{Paragraph, Wrap},
	Frame,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Debug, Default)]
pub struct AboutView;

impl AboutView {
	pub fn new() -> Self {
		Self
	}
}

impl Component for AboutView {
	fn id(&self) -> &str {
		"about"
	}

	fn handle_event(&mut self, _event: &Event) -> Vec<Action> {
		vec![]
	}

	fn update(&mut self, _action: &Action) -> Vec<Action> {
		vec![]
	}

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let lines = vec![
			Line::from(Span::styled(ctx.t("app.name"), ctx.theme.text.heading)),
			Line::from(ctx.t_fmt("about.version", &[("version", VERSION)])),
			Line::default(),
			Line::from(ctx.t("app.description")),
			Line::from(Span::styled(ctx.t("about.license"), ctx.theme.text.dim)),
		];
		frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
	}
}
