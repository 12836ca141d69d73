// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minebak_common_i18n::{I18n, I18nConfig};
use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, Event};
use minebak_tui_theme::Theme;
use ratatui::{backend::TestBackend, layout::Rect, Frame, Terminal};

pub struct TestHarness {
	terminal: Terminal<TestBackend>,
	theme: Theme,
	i18n: I18n,
	route: String,
}

impl TestHarness {
	pub fn new(width: u16, height: u16) -> Self {
		let backend = TestBackend::new(width, height);
		let terminal = Terminal::new(backend).expect("failed to create terminal");
		Self {
			terminal,
			theme: Theme::default(),
			i18n: I18n::new(I18nConfig::default()).expect("default i18n config is valid"),
			route: "/".to_string(),
		}
	}

	pub fn with_theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	pub fn with_locale(mut self, locale: &str) -> Self {
		self.i18n.set_locale(locale).expect("locale has a catalog");
		self
	}

	pub fn with_route(mut self, route: impl Into<String>) -> Self {
		self.route = route.into();
		self
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn i18n(&self) -> &I18n {
		&self.i18n
	}

	pub fn set_route(&mut self, route: impl Into<String>) {
		self.route = route.into();
	}

	pub fn render<F>(&mut self, render_fn: F) -> &TestBackend
	where
		F: FnOnce(&mut Frame, Rect, &RenderContext),
	{
		let ctx = RenderContext::new(&self.theme, &self.i18n, &self.route);
		self.terminal
			.draw(|frame| {
				let area = frame.area();
				render_fn(frame, area, &ctx);
			})
			.expect("failed to draw");
		self.terminal.backend()
	}

	pub fn assert_snapshot<F>(&mut self, name: &str, render_fn: F)
	where
		F: FnOnce(&mut Frame, Rect, &RenderContext),
	{
		self.render(render_fn);
		insta::assert_snapshot!(name, self.snapshot_text());
	}

	pub fn buffer_lines(&self) -> Vec<String> {
		let buffer = self.terminal.backend().buffer();
		let area = buffer.area;
		let mut lines = Vec::new();

		for y in area.y..area.y + area.height {
			let mut line = String::new();
			for x in area.x..area.x + area.width {
				line.push_str(buffer[(x, y)].symbol());
			}
			lines.push(line);
		}

		lines
	}

	/// Buffer text with trailing blanks removed, suitable for inline snapshots.
	pub fn snapshot_text(&self) -> String {
		let lines: Vec<String> = self
			.buffer_lines()
			.into_iter()
			.map(|line| line.trim_end().to_string())
			.collect();
		lines.join("\n").trim_end().to_string()
	}

	pub fn find_text(&self, needle: &str) -> Option<(usize, usize)> {
		let lines = self.buffer_lines();
		for (row, line) in lines.iter().enumerate() {
			if let Some(col) = line.find(needle) {
				return Some((row, col));
			}
		}
		None
	}

	pub fn contains(&self, needle: &str) -> bool {
		self.find_text(needle).is_some()
	}
}

/// Drives a single [`Component`] through events, actions and renders.
pub struct ComponentHarness<C> {
	pub harness: TestHarness,
	pub component: C,
}

impl<C: Component> ComponentHarness<C> {
	pub fn new(mut component: C, width: u16, height: u16) -> Self {
		component.init().expect("component init failed");
		Self {
			harness: TestHarness::new(width, height),
			component,
		}
	}

	pub fn with_locale(mut self, locale: &str) -> Self {
		self.harness = self.harness.with_locale(locale);
		self
	}

	pub fn render(&mut self) -> &TestBackend {
		let component = &self.component;
		self.harness.render(|frame, area, ctx| {
			component.render(frame, area, ctx);
		})
	}

	/// Feed an event and return the actions it produced.
	pub fn send_event(&mut self, event: Event) -> Vec<Action> {
		self.component.handle_event(&event)
	}

	pub fn send_key(&mut self, code: KeyCode) -> Vec<Action> {
		self.send_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)))
	}

	/// Apply an action, then keep applying follow-up actions until none remain.
	pub fn dispatch(&mut self, action: Action) -> Vec<Action> {
		let mut applied = Vec::new();
		let mut queue = vec![action];
		while let Some(action) = queue.pop() {
			queue.extend(self.component.update(&action));
			applied.push(action);
		}
		applied
	}

	pub fn assert_snapshot(&mut self, name: &str) {
		let component = &self.component;
		self.harness.assert_snapshot(name, |frame, area, ctx| {
			component.render(frame, area, ctx);
		});
	}

	pub fn assert_state_sequence<T, F>(
		&mut self,
		events: &[Event],
		mut extract_state: F,
		expected: &[T],
	) where
		T: PartialEq + std::fmt::Debug + Clone,
		F: FnMut(&C) -> T,
	{
		assert_eq!(
			events.len(),
			expected.len(),
			"events and expected states must have the same length"
		);

		for (i, (event, expected_state)) in events.iter().zip(expected.iter()).enumerate() {
			for action in self.component.handle_event(event) {
				self.dispatch(action);
			}
			let actual_state = extract_state(&self.component);
			assert_eq!(
				&actual_state, expected_state,
				"state mismatch at step {}: expected {:?}, got {:?}",
				i, expected_state, actual_state
			);
		}
	}
}

pub fn key(code: KeyCode) -> Event {
	Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn key_with(code: KeyCode, modifiers: KeyModifiers) -> Event {
	Event::Key(KeyEvent::new(code, modifiers))
}

#[cfg(feature = "proptest")]
pub mod strategies {
	use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
	use minebak_tui_core::Event;
	use proptest::prelude::*;

	pub fn key_event_strategy() -> impl Strategy<Value = KeyEvent> {
		let key_code = prop_oneof![
			Just(KeyCode::Enter),
			Just(KeyCode::Esc),
			Just(KeyCode::Backspace),
			Just(KeyCode::Tab),
			Just(KeyCode::BackTab),
			Just(KeyCode::Up),
			Just(KeyCode::Down),
			Just(KeyCode::Left),
			Just(KeyCode::Right),
			proptest::char::range('a', 'z').prop_map(KeyCode::Char),
			proptest::char::range('0', '9').prop_map(KeyCode::Char),
		];

		let modifiers = prop_oneof![
			Just(KeyModifiers::NONE),
			Just(KeyModifiers::SHIFT),
			Just(KeyModifiers::CONTROL),
			Just(KeyModifiers::ALT),
		];

		(key_code, modifiers).prop_map(|(code, mods)| KeyEvent::new(code, mods))
	}

	pub fn event_sequence_strategy(max_len: usize) -> impl Strategy<Value = Vec<Event>> {
		proptest::collection::vec(key_event_strategy().prop_map(Event::Key), 0..=max_len)
	}
}

#[cfg(feature = "proptest")]
pub use strategies::{event_sequence_strategy, key_event_strategy};

#[cfg(test)]
mod tests {
	use super::*;
	use ratatui::widgets::{Block, Borders, Paragraph};

	#[test]
	fn test_harness_creation() {
		let harness = TestHarness::new(80, 24);
		assert_eq!(harness.terminal.backend().buffer().area.width, 80);
		assert_eq!(harness.terminal.backend().buffer().area.height, 24);
		assert_eq!(harness.i18n().locale(), "zh-cn");
	}

	#[test]
	fn test_render_context_carries_route_and_locale() {
		let mut harness = TestHarness::new(30, 1).with_locale("en-us").with_route("/about");
		harness.render(|frame, area, ctx| {
			let text = format!("{} {}", ctx.route, ctx.t("nav.about"));
			frame.render_widget(Paragraph::new(text), area);
		});
		assert!(harness.contains("/about About"));
	}

	#[test]
	fn test_snapshot_text_trims_blank_cells() {
		let mut harness = TestHarness::new(6, 3);
		harness.render(|frame, area, _ctx| {
			frame.render_widget(Block::default().borders(Borders::ALL).title("Hi"), area);
		});
		insta::assert_snapshot!(harness.snapshot_text(), @r"
		┌Hi──┐
		│    │
		└────┘
		");
	}

	#[test]
	fn test_find_text() {
		let mut harness = TestHarness::new(20, 5);
		harness.render(|frame, area, _ctx| {
			let block = Block::default().borders(Borders::ALL).title("FindMe");
			frame.render_widget(block, area);
		});
		let (row, col) = harness.find_text("FindMe").unwrap();
		assert_eq!(row, 0);
		assert!(col > 0);
	}

	struct Counter {
		count: i32,
	}

	impl Component for Counter {
		fn id(&self) -> &str {
			"counter"
		}

		fn handle_event(&mut self, event: &Event) -> Vec<Action> {
			match event {
				Event::Key(key) if key.code == KeyCode::Up => vec![Action::ScrollUp(1)],
				Event::Key(key) if key.code == KeyCode::Down => vec![Action::ScrollDown(1)],
				_ => vec![],
			}
		}

		fn update(&mut self, action: &Action) -> Vec<Action> {
			match action {
				Action::ScrollUp(n) => self.count += *n as i32,
				Action::ScrollDown(n) => self.count -= *n as i32,
				_ => {}
			}
			vec![]
		}

		fn render(&self, frame: &mut Frame, area: Rect, _ctx: &RenderContext) {
			frame.render_widget(Paragraph::new(format!("Count: {}", self.count)), area);
		}
	}

	#[test]
	fn test_component_harness_round_trip() {
		let mut harness = ComponentHarness::new(Counter { count: 0 }, 20, 1);
		harness.render();
		assert!(harness.harness.contains("Count: 0"));

		let actions = harness.send_key(KeyCode::Up);
		assert_eq!(actions, vec![Action::ScrollUp(1)]);
		harness.dispatch(Action::ScrollUp(1));
		harness.render();
		assert!(harness.harness.contains("Count: 1"));
	}

	#[test]
	fn test_state_sequence() {
		let mut harness = ComponentHarness::new(Counter { count: 0 }, 20, 1);
		let events = [key(KeyCode::Up), key(KeyCode::Up), key(KeyCode::Down)];
		harness.assert_state_sequence(&events, |c| c.count, &[1, 2, 1]);
	}
}
