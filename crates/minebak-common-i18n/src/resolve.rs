// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::{normalize_locale, DEFAULT_LOCALE, LOCALES};

/// Resolve the effective locale from a user preference and a default.
///
/// Resolution order (highest to lowest priority):
/// 1. User's locale preference (exact match after normalization)
/// 2. User's language, matched to the first locale of that language
/// 3. The given default, resolved the same way
/// 4. [`DEFAULT_LOCALE`]
///
/// # Example
///
/// ```
/// use minebak_common_i18n::resolve_locale;
///
/// assert_eq!(resolve_locale(Some("en_US.UTF-8"), "zh-cn"), "en-us");
/// assert_eq!(resolve_locale(Some("en-GB"), "zh-cn"), "en-us");
/// assert_eq!(resolve_locale(None, "en-us"), "en-us");
/// assert_eq!(resolve_locale(Some("fr"), "also_invalid"), "zh-cn");
/// ```
pub fn resolve_locale(user_locale: Option<&str>, default: &str) -> &'static str {
	if let Some(locale) = user_locale.and_then(match_locale) {
		return locale;
	}

	match_locale(default).unwrap_or(DEFAULT_LOCALE)
}

fn match_locale(requested: &str) -> Option<&'static str> {
	let requested = normalize_locale(requested);
	if requested.is_empty() {
		return None;
	}

	if let Some(info) = LOCALES.iter().find(|info| info.code == requested) {
		return Some(info.code);
	}

	let language = requested.split('-').next()?;
	LOCALES
		.iter()
		.find(|info| info.code.split('-').next() == Some(language))
		.map(|info| info.code)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_user_preference_takes_priority() {
		assert_eq!(resolve_locale(Some("en-us"), "zh-cn"), "en-us");
		assert_eq!(resolve_locale(Some("zh-cn"), "en-us"), "zh-cn");
	}

	#[test]
	fn test_language_only_matches_first_region() {
		assert_eq!(resolve_locale(Some("zh"), "en-us"), "zh-cn");
		assert_eq!(resolve_locale(Some("zh-TW"), "en-us"), "zh-cn");
		assert_eq!(resolve_locale(Some("en"), "zh-cn"), "en-us");
	}

	#[test]
	fn test_default_when_no_user_preference() {
		assert_eq!(resolve_locale(None, "en-us"), "en-us");
		assert_eq!(resolve_locale(None, "zh_CN"), "zh-cn");
	}

	#[test]
	fn test_fallback_when_both_invalid() {
		assert_eq!(resolve_locale(Some("invalid"), "also_invalid"), DEFAULT_LOCALE);
		assert_eq!(resolve_locale(None, "fr"), DEFAULT_LOCALE);
	}

	#[test]
	fn test_empty_string_is_invalid() {
		assert_eq!(resolve_locale(Some(""), "en-us"), "en-us");
		assert_eq!(resolve_locale(None, ""), DEFAULT_LOCALE);
	}
}
