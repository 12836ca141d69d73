// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported locales.

/// Locale the application starts in.
pub const DEFAULT_LOCALE: &str = "zh-cn";

/// Locale consulted when the active one lacks a message.
pub const DEFAULT_FALLBACK_LOCALE: &str = "en-us";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocaleInfo {
	/// Lowercase BCP-47 style code, e.g. `zh-cn`.
	pub code: &'static str,
	/// Name of the language in the language itself.
	pub native_name: &'static str,
	pub english_name: &'static str,
}

pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		code: "zh-cn",
		native_name: "简体中文",
		english_name: "Chinese (Simplified)",
	},
	LocaleInfo {
		code: "en-us",
		native_name: "English (US)",
		english_name: "English (US)",
	},
];

pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}

pub fn locale_info(code: &str) -> Option<&'static LocaleInfo> {
	let code = normalize_locale(code);
	LOCALES.iter().find(|info| info.code == code)
}

pub fn is_supported(code: &str) -> bool {
	locale_info(code).is_some()
}

/// Normalize a locale identifier to the catalog form.
///
/// `zh_CN.UTF-8` and `ZH-cn` both become `zh-cn`.
pub fn normalize_locale(code: &str) -> String {
	let code = code.trim();
	let code = code.split(['.', '@']).next().unwrap_or_default();
	code.replace('_', "-").to_lowercase()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_locales_are_supported() {
		assert!(is_supported(DEFAULT_LOCALE));
		assert!(is_supported(DEFAULT_FALLBACK_LOCALE));
		assert_ne!(DEFAULT_LOCALE, DEFAULT_FALLBACK_LOCALE);
	}

	#[test]
	fn test_normalize_locale() {
		assert_eq!(normalize_locale("zh_CN"), "zh-cn");
		assert_eq!(normalize_locale("en-US"), "en-us");
		assert_eq!(normalize_locale("zh_CN.UTF-8"), "zh-cn");
		assert_eq!(normalize_locale(" en_US@euro "), "en-us");
		assert_eq!(normalize_locale(""), "");
	}

	#[test]
	fn test_locale_info_lookup() {
		let info = locale_info("ZH_cn").unwrap();
		assert_eq!(info.code, "zh-cn");
		assert_eq!(info.native_name, "简体中文");
		assert!(locale_info("fr-fr").is_none());
	}

	#[test]
	fn test_codes_are_unique_and_normalized() {
		for (i, info) in LOCALES.iter().enumerate() {
			assert_eq!(normalize_locale(info.code), info.code);
			assert!(LOCALES[i + 1..].iter().all(|other| other.code != info.code));
		}
	}

	proptest::proptest! {
		#[test]
		fn prop_normalize_is_idempotent(code in "[a-zA-Z_-]{0,12}") {
			let once = normalize_locale(&code);
			proptest::prop_assert_eq!(normalize_locale(&once), once);
		}
	}
}
