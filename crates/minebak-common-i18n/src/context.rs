// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The i18n context handed to the UI.

use std::sync::Arc;

use crate::catalog::{interpolate, Catalog};
use crate::error::I18nError;
use crate::locale::{normalize_locale, DEFAULT_FALLBACK_LOCALE, DEFAULT_LOCALE, LOCALES};

/// Configuration record consumed when the i18n context is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct I18nConfig {
	/// Must stay `true`; lookups go through an owned context, never a global.
	pub composition_mode: bool,
	pub locale: String,
	pub fallback_locale: String,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			composition_mode: true,
			locale: DEFAULT_LOCALE.to_string(),
			fallback_locale: DEFAULT_FALLBACK_LOCALE.to_string(),
		}
	}
}

impl I18nConfig {
	pub fn new(locale: impl Into<String>, fallback_locale: impl Into<String>) -> Self {
		Self {
			locale: locale.into(),
			fallback_locale: fallback_locale.into(),
			..Self::default()
		}
	}

	pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
		self.locale = locale.into();
		self
	}

	pub fn validate(&self) -> Result<(), I18nError> {
		if !self.composition_mode {
			return Err(I18nError::LegacyModeUnsupported);
		}
		let locale = normalize_locale(&self.locale);
		let fallback = normalize_locale(&self.fallback_locale);
		if locale.is_empty() {
			return Err(I18nError::EmptyLocale);
		}
		if fallback.is_empty() {
			return Err(I18nError::EmptyFallbackLocale);
		}
		if locale == fallback {
			return Err(I18nError::SameLocaleAndFallback(locale));
		}
		Ok(())
	}
}

/// A resolved message and the locale it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation<'a> {
	pub locale: &'a str,
	pub text: &'a str,
}

#[derive(Debug, Clone)]
pub struct I18n {
	config: I18nConfig,
	active: String,
	fallback: String,
	catalog: Arc<Catalog>,
}

impl I18n {
	/// Create a context over the builtin catalogs.
	pub fn new(config: I18nConfig) -> Result<Self, I18nError> {
		Self::with_catalog(config, Catalog::builtin())
	}

	pub fn with_catalog(config: I18nConfig, catalog: Arc<Catalog>) -> Result<Self, I18nError> {
		config.validate()?;
		let active = normalize_locale(&config.locale);
		let fallback = normalize_locale(&config.fallback_locale);

		if !catalog.has_locale(&active) {
			tracing::warn!(locale = %active, "no catalog for locale; messages will come from the fallback");
		}
		if !catalog.has_locale(&fallback) {
			tracing::warn!(locale = %fallback, "no catalog for fallback locale");
		}
		tracing::debug!(locale = %active, fallback = %fallback, "i18n context created");

		Ok(Self {
			config,
			active,
			fallback,
			catalog,
		})
	}

	/// The configuration this context was created from.
	pub fn config(&self) -> &I18nConfig {
		&self.config
	}

	pub fn locale(&self) -> &str {
		&self.active
	}

	pub fn fallback_locale(&self) -> &str {
		&self.fallback
	}

	/// Switch the active locale. The fallback locale never changes.
	pub fn set_locale(&mut self, locale: &str) -> Result<(), I18nError> {
		let locale = normalize_locale(locale);
		if !self.catalog.has_locale(&locale) {
			return Err(I18nError::UnsupportedLocale(locale));
		}
		tracing::info!(from = %self.active, to = %locale, "switching locale");
		self.active = locale;
		Ok(())
	}

	/// Locales with a loaded catalog, in registry order first.
	pub fn available_locales(&self) -> Vec<String> {
		let mut locales: Vec<String> = LOCALES
			.iter()
			.filter(|info| self.catalog.has_locale(info.code))
			.map(|info| info.code.to_string())
			.collect();
		let mut extra: Vec<String> = self
			.catalog
			.locales()
			.filter(|code| !locales.iter().any(|known| known == code))
			.map(str::to_string)
			.collect();
		extra.sort();
		locales.extend(extra);
		locales
	}

	/// The locale after the active one, wrapping around.
	pub fn next_locale(&self) -> String {
		let locales = self.available_locales();
		match locales.iter().position(|code| *code == self.active) {
			Some(idx) => locales[(idx + 1) % locales.len()].clone(),
			None => locales.first().cloned().unwrap_or_else(|| self.fallback.clone()),
		}
	}

	/// Find `key` in the active locale, then in the fallback locale.
	pub fn lookup(&self, key: &str) -> Option<Translation<'_>> {
		if let Some(text) = self.catalog.get(&self.active, key) {
			return Some(Translation {
				locale: &self.active,
				text,
			});
		}

		let text = self.catalog.get(&self.fallback, key)?;
		tracing::trace!(key, locale = %self.active, fallback = %self.fallback, "using fallback message");
		Some(Translation {
			locale: &self.fallback,
			text,
		})
	}

	/// Translate `key`, returning the key itself when no catalog has it.
	pub fn t(&self, key: &str) -> String {
		match self.lookup(key) {
			Some(translation) => translation.text.to_string(),
			None => {
				tracing::trace!(key, "missing message");
				key.to_string()
			}
		}
	}

	/// Translate `key` with `{name}` placeholders substituted.
	pub fn t_fmt(&self, key: &str, vars: &[(&str, &str)]) -> String {
		interpolate(&self.t(key), vars)
	}
}
