// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Message catalogs.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::error::I18nError;
use crate::locale::{normalize_locale, DEFAULT_FALLBACK_LOCALE};

const BUILTIN_SOURCES: &[(&str, &str)] = &[
	("zh-cn", include_str!("../locales/zh-cn.toml")),
	("en-us", include_str!("../locales/en-us.toml")),
];

static BUILTIN: Lazy<Arc<Catalog>> = Lazy::new(|| {
	let mut catalog = Catalog::new();
	for (locale, source) in BUILTIN_SOURCES {
		if let Err(err) = catalog.load_toml(locale, source) {
			tracing::error!(locale = %locale, error = %err, "failed to load builtin catalog");
		}
	}
	Arc::new(catalog)
});

/// Messages for every loaded locale, keyed by flattened dotted key.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
	messages: HashMap<String, HashMap<String, String>>,
}

impl Catalog {
	pub fn new() -> Self {
		Self::default()
	}

	/// The catalogs shipped with the binary.
	pub fn builtin() -> Arc<Catalog> {
		Arc::clone(&BUILTIN)
	}

	/// Parse a TOML document and merge its strings into `locale`.
	pub fn load_toml(&mut self, locale: &str, source: &str) -> Result<(), I18nError> {
		let locale = normalize_locale(locale);
		let table: toml::Table = toml::from_str(source).map_err(|source| I18nError::CatalogParse {
			locale: locale.clone(),
			source,
		})?;

		let mut flat = HashMap::new();
		flatten(&locale, "", &table, &mut flat)?;
		tracing::debug!(locale = %locale, messages = flat.len(), "loaded catalog");
		self.messages.entry(locale).or_default().extend(flat);
		Ok(())
	}

	pub fn insert(&mut self, locale: &str, key: impl Into<String>, message: impl Into<String>) {
		self
			.messages
			.entry(normalize_locale(locale))
			.or_default()
			.insert(key.into(), message.into());
	}

	pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
		self.messages.get(locale)?.get(key).map(String::as_str)
	}

	pub fn has_locale(&self, locale: &str) -> bool {
		self.messages.contains_key(locale)
	}

	pub fn locales(&self) -> impl Iterator<Item = &str> {
		self.messages.keys().map(String::as_str)
	}

	pub fn keys(&self, locale: &str) -> impl Iterator<Item = &str> {
		self
			.messages
			.get(locale)
			.into_iter()
			.flat_map(|messages| messages.keys().map(String::as_str))
	}
}

fn flatten(
	locale: &str,
	prefix: &str,
	table: &toml::Table,
	out: &mut HashMap<String, String>,
) -> Result<(), I18nError> {
	for (name, value) in table {
		let key = if prefix.is_empty() {
			name.clone()
		} else {
			format!("{prefix}.{name}")
		};
		match value {
			toml::Value::String(message) => {
				out.insert(key, message.clone());
			}
			toml::Value::Table(nested) => flatten(locale, &key, nested, out)?,
			_ => {
				return Err(I18nError::CatalogValue {
					locale: locale.to_string(),
					key,
				})
			}
		}
	}
	Ok(())
}

/// Substitute `{name}` placeholders.
pub(crate) fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
	let mut result = template.to_string();
	for (name, value) in vars {
		result = result.replace(&format!("{{{name}}}"), value);
	}
	result
}

/// Translate `key` from the builtin catalogs, falling back to
/// [`DEFAULT_FALLBACK_LOCALE`] and then to the key itself.
pub fn t(locale: &str, key: &str) -> String {
	let catalog = Catalog::builtin();
	let locale = normalize_locale(locale);
	catalog
		.get(&locale, key)
		.or_else(|| catalog.get(DEFAULT_FALLBACK_LOCALE, key))
		.unwrap_or(key)
		.to_string()
}

/// [`t`] with `{name}` placeholders substituted from `vars`.
pub fn t_fmt(locale: &str, key: &str, vars: &[(&str, &str)]) -> String {
	interpolate(&t(locale, key), vars)
}
