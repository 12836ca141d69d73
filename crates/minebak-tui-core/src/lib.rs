// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossterm::event::{KeyEvent, MouseEvent};
use thiserror::Error;

/// Result type alias using ComponentError as the default error type.
pub type Result<T, E = ComponentError> = std::result::Result<T, E>;

/// Actions that components can emit in response to events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
	/// Periodic tick for animations or polling.
	Tick,
	/// Request application shutdown.
	Quit,
	/// Terminal was resized to (width, height).
	Resize(u16, u16),
	/// Ask the router to navigate to a path.
	Navigate(String),
	/// Step back in navigation history.
	Back,
	/// Step forward in navigation history.
	Forward,
	/// The router settled on a new location.
	RouteChanged(String),
	/// Switch the active locale.
	SwitchLocale(String),
	/// Move the selection up by the specified number of rows.
	ScrollUp(usize),
	/// Move the selection down by the specified number of rows.
	ScrollDown(usize),
	/// Submit/confirm the current input or selection.
	Submit,
	/// Cancel the current operation.
	Cancel,
	/// Custom action with a kind identifier and payload.
	Custom { kind: Cow<'static, str>, payload: String },
}

impl Action {
	pub fn custom(kind: &'static str, payload: impl Into<String>) -> Self {
		Action::Custom {
			kind: Cow::Borrowed(kind),
			payload: payload.into(),
		}
	}

	pub fn is_custom(&self, expected: &str) -> bool {
		matches!(self, Action::Custom { kind, .. } if kind == expected)
	}
}

/// Terminal events from crossterm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
	/// Keyboard input.
	Key(KeyEvent),
	/// Mouse input.
	Mouse(MouseEvent),
	/// Terminal resize to (width, height).
	Resize(u16, u16),
	/// Periodic tick.
	Tick,
	/// Paste event with pasted text.
	Paste(String),
	/// Terminal gained focus.
	FocusGained,
	/// Terminal lost focus.
	FocusLost,
}

impl From<crossterm::event::Event> for Event {
	fn from(event: crossterm::event::Event) -> Self {
		match event {
			crossterm::event::Event::Key(key) => Event::Key(key),
			crossterm::event::Event::Mouse(mouse) => Event::Mouse(mouse),
			crossterm::event::Event::Resize(w, h) => Event::Resize(w, h),
			crossterm::event::Event::Paste(text) => Event::Paste(text),
			crossterm::event::Event::FocusGained => Event::FocusGained,
			crossterm::event::Event::FocusLost => Event::FocusLost,
		}
	}
}

/// Trait for mapping key events to actions given the current route.
pub trait Keymap<A> {
	fn key_to_action(&self, key: &KeyEvent, route: &str) -> Option<A>;
}

/// Source of terminal events for the run loop.
pub trait EventSource {
	/// Wait up to `timeout` for the next event.
	fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;

	/// `true` once no further events can arrive.
	fn is_closed(&self) -> bool {
		false
	}
}

/// Reads events from the real terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
	fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
		if !crossterm::event::poll(timeout)? {
			return Ok(None);
		}
		let event = crossterm::event::read()?;
		// Release and repeat events would double every key press on Windows.
		if let crossterm::event::Event::Key(key) = &event {
			if key.kind != crossterm::event::KeyEventKind::Press {
				return Ok(None);
			}
		}
		Ok(Some(event.into()))
	}
}

/// A fixed queue of events; `None` once drained.
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
	events: VecDeque<Event>,
}

impl ScriptedEvents {
	pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
		Self {
			events: events.into_iter().collect(),
		}
	}

	pub fn push(&mut self, event: Event) {
		self.events.push_back(event);
	}

	pub fn remaining(&self) -> usize {
		self.events.len()
	}
}

impl EventSource for ScriptedEvents {
	fn next(&mut self, _timeout: Duration) -> io::Result<Option<Event>> {
		Ok(self.events.pop_front())
	}

	fn is_closed(&self) -> bool {
		self.events.is_empty()
	}
}

#[derive(Debug, Error)]
pub enum ComponentError {
	#[error("initialization failed: {0}")]
	Init(String),
	#[error("render failed: {0}")]
	Render(String),
}
