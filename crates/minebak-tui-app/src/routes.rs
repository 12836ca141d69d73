// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The application's route table.

use minebak_tui_router::{normalize_path, RouteEntry};

/// Component reference carried by a route entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
	Home,
	Settings,
	Saves,
	About,
}

impl ViewKind {
	/// Message key for the navigation label.
	pub fn label_key(&self) -> &'static str {
		match self {
			Self::Home => "nav.home",
			Self::Settings => "nav.settings",
			Self::Saves => "nav.saves",
			Self::About => "nav.about",
		}
	}

	/// Message key for the page title.
	pub fn title_key(&self) -> &'static str {
		match self {
			Self::Home => "home.title",
			Self::Settings => "settings.title",
			Self::Saves => "saves.title",
			Self::About => "about.title",
		}
	}
}

/// Routes in navigation order.
pub const ROUTES: &[RouteEntry<ViewKind>] = &[
	RouteEntry::new("/", ViewKind::Home),
	RouteEntry::new("/settings", ViewKind::Settings),
	RouteEntry::new("/saves", ViewKind::Saves),
	RouteEntry::new("/about", ViewKind::About),
];

/// The table before the saves page existed.
pub const LEGACY_ROUTES: &[RouteEntry<ViewKind>] = &[
	RouteEntry::new("/", ViewKind::Home),
	RouteEntry::new("/settings", ViewKind::Settings),
	RouteEntry::new("/about", ViewKind::About),
];

pub fn view_for(path: &str) -> Option<ViewKind> {
	view_in(ROUTES, path)
}

pub fn view_in(table: &[RouteEntry<ViewKind>], path: &str) -> Option<ViewKind> {
	let key = normalize_path(path);
	table
		.iter()
		.find(|entry| normalize_path(entry.path) == key)
		.map(|entry| entry.component)
}

#[cfg(test)]
mod tests {
	use super::*;
	use minebak_tui_router::validate_table;

	#[test]
	fn test_tables_are_valid() {
		assert!(validate_table(ROUTES).is_ok());
		assert!(validate_table(LEGACY_ROUTES).is_ok());
	}

	#[test]
	fn test_route_order() {
		let paths: Vec<_> = ROUTES.iter().map(|entry| entry.path).collect();
		assert_eq!(paths, ["/", "/settings", "/saves", "/about"]);
		let legacy: Vec<_> = LEGACY_ROUTES.iter().map(|entry| entry.path).collect();
		assert_eq!(legacy, ["/", "/settings", "/about"]);
	}

	#[test]
	fn test_view_for() {
		assert_eq!(view_for("/"), Some(ViewKind::Home));
		assert_eq!(view_for("/saves/"), Some(ViewKind::Saves));
		assert_eq!(view_for("/missing"), None);
		assert_eq!(view_in(LEGACY_ROUTES, "/saves"), None);
	}

	#[test]
	fn test_every_view_has_translated_keys() {
		let i18n = minebak_common_i18n::I18n::new(Default::default()).unwrap();
		for entry in ROUTES {
			assert_ne!(i18n.t(entry.component.label_key()), entry.component.label_key());
			assert_ne!(i18n.t(entry.component.title_key()), entry.component.title_key());
		}
	}
}
