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

#[derive(Debug, Default)]
pub struct HomeView;

impl HomeView {
	pub fn new() -> Self {
		Self
	}
}

impl Component for HomeView {
	fn id(&self) -> &str {
		"home"
	}

	fn handle_event(&mut self, _event: &Event) -> Vec<Action> {
		vec![]
	}

	fn update(&mut self, _action: &Action) -> Vec<Action> {
		vec![]
	}

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let dim = ctx.theme.text.dim;
		let lines = vec![
			Line::from(Span::styled(ctx.t("home.welcome"), ctx.theme.text.bold)),
			Line::default(),
			Line::from(Span::styled(ctx.t("home.hint_navigate"), dim)),
			Line::from(Span::styled(ctx.t("home.hint_locale"), dim)),
			Line::from(Span::styled(ctx.t("home.hint_quit"), dim)),
		];
		frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), area);
	}
}
