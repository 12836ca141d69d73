// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Save browser: pick a save, back it up, inspect and restore its versions.

use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{KeyCode, KeyModifiers};
use minebak_backup::{
	BackupKind, BackupOutcome, BackupStore, BackupVersion, InstanceKey, Inventory, Save,
};
use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, ComponentError, Event};
use ratatui::{
	layout::{Constraint, Direction, Layout, Rect},
	style::Style,
	text::{Line, Span},
	widgets::{Block, Borders, Paragraph, Wrap},
	Frame,
};

use crate::headless::run_backup;
use crate::schedule::BackupSchedule;

pub const RESCAN: &str = "rescan";
pub const BACKUP: &str = "backup";

/// A translated status line: message key plus placeholder values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
	pub key: &'static str,
	pub vars: Vec<(&'static str, String)>,
	pub is_error: bool,
}

impl StatusMessage {
	fn info(key: &'static str, vars: Vec<(&'static str, String)>) -> Self {
		Self {
			key,
			vars,
			is_error: false,
		}
	}

	fn error(key: &'static str, vars: Vec<(&'static str, String)>) -> Self {
		Self {
			key,
			vars,
			is_error: true,
		}
	}

	pub fn text(&self, ctx: &RenderContext) -> String {
		let vars: Vec<(&str, &str)> = self.vars.iter().map(|(k, v)| (*k, v.as_str())).collect();
		ctx.t_fmt(self.key, &vars)
	}
}

#[derive(Debug, Clone)]
struct SaveEntry {
	instance: InstanceKey,
	save: Save,
}

impl SaveEntry {
	fn label(&self) -> String {
		format!("{} / {}", self.instance.name, self.save.name)
	}

	fn is(&self, instance: &InstanceKey, save: &str) -> bool {
		self.instance == *instance && self.save.name == save
	}
}

#[derive(Debug, Clone)]
struct BackupListing {
	instance: InstanceKey,
	save: String,
	versions: Vec<BackupVersion>,
	/// Position in the newest-first display order.
	cursor: usize,
}

impl BackupListing {
	fn current(&self) -> Option<&BackupVersion> {
		self.versions.iter().rev().nth(self.cursor)
	}
}

/// Which column the arrow keys move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
	Saves,
	Backups,
}

pub struct SavesView {
	inventory: Inventory,
	store: BackupStore,
	entries: Vec<SaveEntry>,
	selected: usize,
	focus: Focus,
	listing: Option<BackupListing>,
	/// Version awaiting a second Enter before it is restored.
	pending_restore: Option<i64>,
	schedule: Option<BackupSchedule>,
	status: Option<StatusMessage>,
}

impl SavesView {
	pub fn new(inventory: Inventory, store: BackupStore) -> Self {
		Self {
			inventory,
			store,
			entries: Vec::new(),
			selected: 0,
			focus: Focus::Saves,
			listing: None,
			pending_restore: None,
			schedule: None,
			status: None,
		}
	}

	/// Back up every save each `interval`, checked on tick actions.
	pub fn with_auto_backup(mut self, interval: Duration) -> Self {
		self.set_auto_backup(Some(interval));
		self
	}

	pub fn set_auto_backup(&mut self, interval: Option<Duration>) {
		self.schedule = interval.map(|interval| BackupSchedule::new(interval, Instant::now()));
	}

	pub fn auto_backup(&self) -> Option<Duration> {
		self.schedule.as_ref().map(BackupSchedule::interval)
	}

	pub fn focus(&self) -> Focus {
		self.focus
	}

	/// The version under the cursor in the backups column.
	pub fn selected_backup(&self) -> Option<&BackupVersion> {
		self.listing.as_ref().and_then(BackupListing::current)
	}

	pub fn pending_restore(&self) -> Option<i64> {
		self.pending_restore
	}

	/// `instance / save` labels in display order.
	pub fn labels(&self) -> Vec<String> {
		self.entries.iter().map(SaveEntry::label).collect()
	}

	pub fn selected(&self) -> usize {
		self.selected
	}

	pub fn status(&self) -> Option<&StatusMessage> {
		self.status.as_ref()
	}

	/// Versions of the save whose backups are shown.
	pub fn backups(&self) -> Option<&[BackupVersion]> {
		self.listing.as_ref().map(|listing| listing.versions.as_slice())
	}

	fn refresh_entries(&mut self) {
		self.entries = self
			.inventory
			.saves()
			.map(|(instance, save)| SaveEntry {
				instance: instance.key(),
				save: save.clone(),
			})
			.collect();
		self.selected = self.selected.min(self.entries.len().saturating_sub(1));
	}

	pub fn rescan(&mut self) {
		let failures = self.inventory.rescan();
		self.refresh_entries();
		self.close_backups();

		self.status = Some(match failures.first() {
			Some(failure) => StatusMessage::error(
				"saves.scan_failed",
				vec![
					("root", failure.root.display().to_string()),
					("error", failure.error.to_string()),
				],
			),
			None => StatusMessage::info(
				"saves.rescanned",
				vec![("count", self.entries.len().to_string())],
			),
		});
	}

	fn select(&mut self, index: usize) {
		if index != self.selected {
			self.selected = index;
			self.close_backups();
		}
	}

	fn close_backups(&mut self) {
		self.listing = None;
		self.focus = Focus::Saves;
		self.pending_restore = None;
	}

	fn move_cursor(&mut self, up: usize, down: usize) {
		let Some(listing) = &mut self.listing else {
			return;
		};
		let last = listing.versions.len().saturating_sub(1);
		listing.cursor = (listing.cursor.saturating_sub(up) + down).min(last);
		self.pending_restore = None;
	}

	/// Load the selected save's versions, keeping the cursor on `keep` if present.
	fn load_backups(&mut self, keep: Option<i64>) {
		let Some(entry) = self.entries.get(self.selected) else {
			return;
		};
		match self.store.list(&entry.instance, &entry.save.name) {
			Ok(versions) => {
				let cursor = keep
					.and_then(|timestamp| {
						versions.iter().rev().position(|version| version.timestamp == timestamp)
					})
					.unwrap_or(0);
				self.listing = Some(BackupListing {
					instance: entry.instance.clone(),
					save: entry.save.name.clone(),
					versions,
					cursor,
				});
			}
			Err(error) => {
				tracing::error!(save = %entry.save.name, error = %error, "listing backups failed");
				self.status = Some(StatusMessage::error(
					"saves.list_failed",
					vec![("save", entry.save.name.clone()), ("error", error.to_string())],
				));
			}
		}
	}

	fn submit(&mut self) {
		match self.focus {
			Focus::Saves => {
				self.load_backups(None);
				if self.listing.as_ref().is_some_and(|listing| !listing.versions.is_empty()) {
					self.focus = Focus::Backups;
				}
			}
			Focus::Backups => self.confirm_restore(),
		}
	}

	/// First Enter on a version asks for confirmation, the second restores it.
	fn confirm_restore(&mut self) {
		let Some(entry) = self.entries.get(self.selected) else {
			return;
		};
		let Some(version) = self.selected_backup() else {
			return;
		};
		let timestamp = version.timestamp;
		if self.pending_restore == Some(timestamp) {
			self.restore_selected();
			return;
		}
		let vars = vec![("save", entry.save.name.clone()), ("time", format_time(version))];
		self.pending_restore = Some(timestamp);
		self.status = Some(StatusMessage::info("saves.confirm_restore", vars));
	}

	fn restore_selected(&mut self) {
		self.pending_restore = None;
		let Some(entry) = self.entries.get(self.selected).cloned() else {
			return;
		};
		let Some(version) = self.selected_backup().cloned() else {
			return;
		};
		let name = entry.save.name.clone();

		// Keep the state being replaced restorable.
		let restored = self
			.store
			.backup(&entry.instance, &entry.save)
			.and_then(|_| {
				self.store
					.restore(&entry.instance, &name, version.timestamp, &entry.save.path)
			});
		self.status = Some(match restored {
			Ok(_) => StatusMessage::info(
				"saves.restored",
				vec![("save", name), ("time", format_time(&version))],
			),
			Err(error) => {
				tracing::error!(save = %name, timestamp = version.timestamp, error = %error, "restore failed");
				StatusMessage::error(
					"saves.restore_failed",
					vec![("save", name), ("error", error.to_string())],
				)
			}
		});
		self.load_backups(Some(version.timestamp));
	}

	fn backup_selected(&mut self) {
		let Some(entry) = self.entries.get(self.selected).cloned() else {
			self.status = Some(StatusMessage::info("saves.select_save", vec![]));
			return;
		};
		let name = entry.save.name.clone();
		self.status = Some(match self.store.backup(&entry.instance, &entry.save) {
			Ok(BackupOutcome::Created(_)) => {
				StatusMessage::info("saves.backup_created", vec![("save", name)])
			}
			Ok(BackupOutcome::Unchanged(_)) => {
				StatusMessage::info("saves.backup_unchanged", vec![("save", name)])
			}
			Err(error) => {
				tracing::error!(save = %name, error = %error, "backup failed");
				StatusMessage::error(
					"saves.backup_failed",
					vec![("save", name), ("error", error.to_string())],
				)
			}
		});
		let keep = self.selected_backup().map(|version| version.timestamp);
		self.load_backups(keep);
	}

	fn tick(&mut self) {
		let due = self
			.schedule
			.as_mut()
			.is_some_and(|schedule| schedule.poll(Instant::now()));
		if due {
			self.backup_all();
		}
	}

	/// Back up every save, keeping the current selection and listing.
	pub fn backup_all(&mut self) {
		let selected = self
			.entries
			.get(self.selected)
			.map(|entry| (entry.instance.clone(), entry.save.name.clone()));
		let keep = self.selected_backup().map(|version| version.timestamp);
		let listed = self.listing.is_some();

		let summary = run_backup(&mut self.inventory, &self.store);
		self.refresh_entries();

		let position = selected.and_then(|(instance, save)| {
			self.entries.iter().position(|entry| entry.is(&instance, &save))
		});
		match position {
			Some(index) => {
				self.selected = index;
				if listed {
					self.load_backups(keep);
				}
			}
			None => self.close_backups(),
		}

		let vars = vec![
			("created", summary.created.to_string()),
			("unchanged", summary.unchanged.to_string()),
			("failed", summary.failed.to_string()),
		];
		self.status = Some(if summary.failed > 0 {
			StatusMessage::error("saves.auto_backup", vars)
		} else {
			StatusMessage::info("saves.auto_backup", vars)
		});
	}

	fn render_saves(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		if self.entries.is_empty() {
			let empty = Paragraph::new(Span::styled(ctx.t("saves.empty"), ctx.theme.text.dim))
				.wrap(Wrap { trim: true });
			frame.render_widget(empty, area);
			return;
		}

		let lines: Vec<Line> = self
			.entries
			.iter()
			.enumerate()
			.map(|(index, entry)| {
				if index == self.selected {
					Line::from(Span::styled(format!("> {}", entry.label()), ctx.theme.selection_style()))
				} else {
					Line::from(format!("  {}", entry.label()))
				}
			})
			.collect();

		let visible = area.height as usize;
		let scroll = self.selected.saturating_sub(visible.saturating_sub(1));
		frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), area);
	}

	fn render_backups(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let block = Block::default()
			.title(ctx.t("saves.backups_title"))
			.borders(Borders::LEFT)
			.border_style(ctx.theme.borders.normal);
		let inner = block.inner(area);
		frame.render_widget(block, area);

		let selected = self.entries.get(self.selected);
		let listing = self
			.listing
			.as_ref()
			.filter(|listing| selected.is_some_and(|entry| entry.is(&listing.instance, &listing.save)));

		let lines: Vec<Line> = match listing {
			None => vec![Line::from(Span::styled(ctx.t("saves.select_save"), ctx.theme.text.dim))],
			Some(listing) if listing.versions.is_empty() => {
				vec![Line::from(Span::styled(ctx.t("saves.no_backups"), ctx.theme.text.dim))]
			}
			Some(listing) => listing
				.versions
				.iter()
				.rev()
				.enumerate()
				.map(|(index, version)| {
					let current = self.focus == Focus::Backups && index == listing.cursor;
					version_line(version, current, ctx)
				})
				.collect(),
		};
		let visible = inner.height as usize;
		let scroll = listing
			.map(|listing| listing.cursor.saturating_sub(visible.saturating_sub(1)))
			.unwrap_or(0);
		frame.render_widget(Paragraph::new(lines).scroll((scroll as u16, 0)), inner);
	}
}

fn format_time(version: &BackupVersion) -> String {
	version
		.created_at()
		.map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
		.unwrap_or_else(|| version.timestamp.to_string())
}

fn version_line(version: &BackupVersion, current: bool, ctx: &RenderContext) -> Line<'static> {
	let kind = match version.kind {
		BackupKind::Full => ctx.t("saves.full"),
		BackupKind::FileDelta => ctx.t("saves.delta"),
	};
	let files = ctx.t_fmt("saves.files", &[("count", version.file_count().to_string().as_str())]);
	let (marker, style) = if current {
		("> ", ctx.theme.selection_style())
	} else {
		("  ", Style::default())
	};
	Line::from(vec![
		Span::styled(format!("{marker}{}", format_time(version)), style),
		Span::raw("  "),
		Span::styled(kind, ctx.theme.text.bold),
		Span::raw("  "),
		Span::raw(files),
	])
}

impl Component for SavesView {
	fn id(&self) -> &str {
		"saves"
	}

	fn init(&mut self) -> Result<(), ComponentError> {
		self.rescan();
		Ok(())
	}

	fn handle_event(&mut self, event: &Event) -> Vec<Action> {
		let Event::Key(key) = event else {
			return vec![];
		};
		if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
			return vec![];
		}
		match key.code {
			KeyCode::Up => vec![Action::ScrollUp(1)],
			KeyCode::Down => vec![Action::ScrollDown(1)],
			KeyCode::Enter => vec![Action::Submit],
			KeyCode::Esc => vec![Action::Cancel],
			KeyCode::Char('r') => vec![Action::custom(RESCAN, "")],
			KeyCode::Char('b') => vec![Action::custom(BACKUP, "")],
			_ => vec![],
		}
	}

	fn update(&mut self, action: &Action) -> Vec<Action> {
		match action {
			Action::ScrollUp(n) if self.focus == Focus::Backups => self.move_cursor(*n, 0),
			Action::ScrollDown(n) if self.focus == Focus::Backups => self.move_cursor(0, *n),
			Action::ScrollUp(n) => self.select(self.selected.saturating_sub(*n)),
			Action::ScrollDown(n) => {
				let last = self.entries.len().saturating_sub(1);
				self.select((self.selected + n).min(last));
			}
			Action::Submit => self.submit(),
			Action::Cancel => {
				self.focus = Focus::Saves;
				self.pending_restore = None;
			}
			Action::Tick => self.tick(),
			action if action.is_custom(RESCAN) => self.rescan(),
			action if action.is_custom(BACKUP) => self.backup_selected(),
			_ => {}
		}
		vec![]
	}

	fn render(&self, frame: &mut Frame, area: Rect, ctx: &RenderContext) {
		let rows = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Min(1), Constraint::Length(1)])
			.split(area);
		let columns = Layout::default()
			.direction(Direction::Horizontal)
			.constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
			.split(rows[0]);

		self.render_saves(frame, columns[0], ctx);
		self.render_backups(frame, columns[1], ctx);

		let (text, style): (String, Style) = match &self.status {
			Some(status) if status.is_error => (status.text(ctx), ctx.theme.text.error),
			Some(status) => (status.text(ctx), ctx.theme.text.success),
			None if self.focus == Focus::Backups => (ctx.t("saves.backups_hint"), ctx.theme.text.dim),
			None => (ctx.t("saves.hint"), ctx.theme.text.dim),
		};
		frame.render_widget(Paragraph::new(Span::styled(text, style)), rows[1]);
	}
}
