// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Internationalization (i18n) support for MineBak.
//!
//! Message catalogs are TOML files compiled into the binary, one per locale.
//! Nested tables are flattened into dotted keys, so
//!
//! ```toml
//! [nav]
//! home = "Home"
//! ```
//!
//! is looked up as `nav.home`.
//!
//! An [`I18n`] context carries an active locale and a fallback locale. A
//! lookup tries the active locale first, then the fallback, and finally
//! returns the key itself so missing strings stay visible.
//!
//! # Example
//!
//! ```
//! use minebak_common_i18n::{I18n, I18nConfig};
//!
//! let i18n = I18n::new(I18nConfig::default()).unwrap();
//! assert_eq!(i18n.locale(), "zh-cn");
//! assert_eq!(i18n.fallback_locale(), "en-us");
//!
//! let label = i18n.t("nav.home");
//! assert!(!label.is_empty());
//!
//! let about = i18n.t_fmt("about.version", &[("version", "1.0.0")]);
//! assert!(about.contains("1.0.0"));
//! ```

mod catalog;
mod context;
mod error;
mod locale;
mod resolve;

pub use catalog::{t, t_fmt, Catalog};
pub use context::{I18n, I18nConfig, Translation};
pub use error::I18nError;
pub use locale::{available_locales, is_supported, locale_info, normalize_locale, LocaleInfo};
pub use resolve::resolve_locale;

pub use locale::{DEFAULT_FALLBACK_LOCALE, DEFAULT_LOCALE, LOCALES};
