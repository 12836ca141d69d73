// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! One component per route.

mod about;
mod home;
mod saves;
mod settings;

pub use about::{AboutView, VERSION};
pub use home::HomeView;
pub use saves::{Focus, SavesView, StatusMessage, BACKUP, RESCAN};
pub use settings::{SettingsInfo, SettingsView};

use minebak_backup::{BackupStore, Inventory};
use minebak_tui_component::Component;

use crate::routes::ViewKind;

pub struct Views {
	pub home: HomeView,
	pub settings: SettingsView,
	pub saves: SavesView,
	pub about: AboutView,
}

impl Views {
	pub fn new(settings: SettingsInfo, inventory: Inventory, store: BackupStore) -> Self {
		Self {
			home: HomeView::new(),
			settings: SettingsView::new(settings),
			saves: SavesView::new(inventory, store),
			about: AboutView::new(),
		}
	}

	pub fn get(&self, kind: ViewKind) -> &dyn Component {
		match kind {
			ViewKind::Home => &self.home,
			ViewKind::Settings => &self.settings,
			ViewKind::Saves => &self.saves,
			ViewKind::About => &self.about,
		}
	}

	pub fn get_mut(&mut self, kind: ViewKind) -> &mut dyn Component {
		match kind {
			ViewKind::Home => &mut self.home,
			ViewKind::Settings => &mut self.settings,
			ViewKind::Saves => &mut self.saves,
			ViewKind::About => &mut self.about,
		}
	}
}
