// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The root component: navigation bar, current page, status bar.

use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, ComponentError, Event};
use minebak_tui_router::{normalize_path, RouteEntry};
use minebak_tui_widget_status_bar::StatusBar;
use ratatui::{
	layout::{Constraint, Direction, Layout, Rect},
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph},
	Frame,
};

use crate::routes::{view_in, ViewKind};
use crate::views::Views;

pub struct Shell {
	routes: &'static [RouteEntry<ViewKind>],
	views: Views,
	active: ViewKind,
}

impl Shell {
	pub fn new(routes: &'static [RouteEntry<ViewKind>], views: Views) -> Self {
		let active = routes.first().map(|entry| entry.component).unwrap_or(ViewKind::Home);
		Self {
			routes,
			views,
			active,
		}
	}

	/// Page that receives keys not handled globally.
	pub fn active(&self) -> ViewKind {
		self.active
	}

	pub fn views(&self) -> &Views {
		&self.views
	}

	fn has_view(&self, kind: ViewKind) -> bool {
		self.routes.iter().any(|entry| entry.component == kind)
	}

	fn render_nav(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let current = normalize_path(ctx.route);
		let mut spans = Vec::new();
		for (index, entry) in self.routes.iter().enumerate() {
			if index > 0 {
				spans.push(Span::styled("│", ctx.theme.nav.divider));
			}
			let style = if normalize_path(entry.path) == current {
				ctx.theme.nav.active
			} else {
				ctx.theme.nav.inactive
			};
			let label = format!(" {} {} ", index + 1, ctx.t(entry.component.label_key()));
			spans.push(Span::styled(label, style));
		}
		frame.render_widget(Paragraph::new(Line::from(spans)), area);
	}

	fn render_status(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let bar = StatusBar::themed(ctx.theme)
			.item(ctx.t("status.route"), ctx.route)
			.item(ctx.t("status.locale"), ctx.locale())
			.shortcut("Tab", ctx.t("status.next"))
			.shortcut("Bksp", ctx.t("status.back"))
			.shortcut("^L", ctx.t("status.switch_locale"))
			.shortcut("q", ctx.t("status.quit"));
		frame.render_widget(bar, area);
	}
}

impl Component for Shell {
	fn id(&self) -> &str {
		"shell"
	}

	fn init(&mut self) -> Result<(), ComponentError> {
		let mut seen = Vec::new();
		for entry in self.routes {
			if seen.contains(&entry.component) {
				continue;
			}
			seen.push(entry.component);
			self.views.get_mut(entry.component).init()?;
		}
		Ok(())
	}

	fn handle_event(&mut self, event: &Event) -> Vec<Action> {
		self.views.get_mut(self.active).handle_event(event)
	}

	fn update(&mut self, action: &Action) -> Vec<Action> {
		match action {
			Action::RouteChanged(path) => {
				match view_in(self.routes, path) {
					Some(kind) => self.active = kind,
					None => tracing::warn!(path = %path, "route changed to a path without a view"),
				}
				vec![]
			}
			Action::Tick if self.has_view(ViewKind::Saves) => self.views.saves.update(action),
			Action::SwitchLocale(_) | Action::Tick => vec![],
			action => self.views.get_mut(self.active).update(action),
		}
	}

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)])
			.split(area);

		self.render_nav(frame, rows[0], ctx);

		let kind = view_in(self.routes, ctx.route).unwrap_or(self.active);
		let block = Block::default()
			.title(ctx.t(kind.title_key()))
			.borders(Borders::ALL)
			.border_style(ctx.theme.border_style_for(true));
		let inner = block.inner(rows[1]);
		frame.render_widget(block, rows[1]);
		self.views.get(kind).render(frame, inner, ctx);

		self.render_status(frame, rows[2], ctx);
	}
}
