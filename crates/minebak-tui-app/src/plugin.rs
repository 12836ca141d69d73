// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Plugins extend an [`crate::App`] before it is mounted.

use minebak_common_i18n::I18n;
use minebak_tui_router::Router;

use crate::error::BootstrapError;
use crate::routes::ViewKind;

pub const ROUTER_PLUGIN: &str = "router";
pub const I18N_PLUGIN: &str = "i18n";

/// Services plugins provide to the application.
#[derive(Debug, Default)]
pub struct AppContext {
	router: Option<Router<ViewKind>>,
	i18n: Option<I18n>,
	installed: Vec<&'static str>,
}

impl AppContext {
	pub fn provide_router(&mut self, router: Router<ViewKind>) {
		self.router = Some(router);
	}

	pub fn provide_i18n(&mut self, i18n: I18n) {
		self.i18n = Some(i18n);
	}

	pub fn router(&self) -> Option<&Router<ViewKind>> {
		self.router.as_ref()
	}

	pub fn i18n(&self) -> Option<&I18n> {
		self.i18n.as_ref()
	}

	/// Plugin names in installation order.
	pub fn installed(&self) -> &[&'static str] {
		&self.installed
	}

	pub(crate) fn is_installed(&self, name: &str) -> bool {
		self.installed.contains(&name)
	}

	pub(crate) fn mark_installed(&mut self, name: &'static str) {
		self.installed.push(name);
	}

	pub(crate) fn check_ready(&self) -> Result<(), BootstrapError> {
		if self.router.is_none() {
			return Err(BootstrapError::MissingPlugin(ROUTER_PLUGIN));
		}
		if self.i18n.is_none() {
			return Err(BootstrapError::MissingPlugin(I18N_PLUGIN));
		}
		Ok(())
	}

	pub(crate) fn take(&mut self) -> Result<(Router<ViewKind>, I18n), BootstrapError> {
		self.check_ready()?;
		match (self.router.take(), self.i18n.take()) {
			(Some(router), Some(i18n)) => Ok((router, i18n)),
			_ => Err(BootstrapError::MissingPlugin(ROUTER_PLUGIN)),
		}
	}
}

pub trait Plugin {
	fn name(&self) -> &'static str;

	fn install(self: Box<Self>, ctx: &mut AppContext) -> Result<(), BootstrapError>;
}

pub struct RouterPlugin {
	router: Router<ViewKind>,
}

impl RouterPlugin {
	pub fn new(router: Router<ViewKind>) -> Self {
		Self { router }
	}
}

impl Plugin for RouterPlugin {
	fn name(&self) -> &'static str {
		ROUTER_PLUGIN
	}

	fn install(self: Box<Self>, ctx: &mut AppContext) -> Result<(), BootstrapError> {
		tracing::debug!(routes = self.router.routes().len(), "installing router");
		ctx.provide_router(self.router);
		Ok(())
	}
}

pub struct I18nPlugin {
	i18n: I18n,
}

impl I18nPlugin {
	pub fn new(i18n: I18n) -> Self {
		Self { i18n }
	}
}

impl Plugin for I18nPlugin {
	fn name(&self) -> &'static str {
		I18N_PLUGIN
	}

	fn install(self: Box<Self>, ctx: &mut AppContext) -> Result<(), BootstrapError> {
		tracing::debug!(locale = %self.i18n.locale(), fallback = %self.i18n.fallback_locale(), "installing i18n");
		ctx.provide_i18n(self.i18n);
		Ok(())
	}
}
