// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Errors raised while configuring or switching the i18n context.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
	#[error("locale must not be empty")]
	EmptyLocale,

	#[error("fallback locale must not be empty")]
	EmptyFallbackLocale,

	#[error("locale and fallback locale are both '{0}'")]
	SameLocaleAndFallback(String),

	#[error("legacy (non-composition) mode is not supported")]
	LegacyModeUnsupported,

	#[error("locale '{0}' has no message catalog")]
	UnsupportedLocale(String),

	#[error("failed to parse catalog for '{locale}': {source}")]
	CatalogParse {
		locale: String,
		#[source]
		source: toml::de::Error,
	},

	#[error("catalog for '{locale}' has a non-string value at '{key}'")]
	CatalogValue { locale: String, key: String },
}
