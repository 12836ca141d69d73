// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side routing for the MineBak TUI.
//!
//! A route table is a plain ordered list of [`RouteEntry`] records mapping a
//! path to a component reference. The [`Router`] validates the table once,
//! then navigates over a [`History`]. The only history strategy is
//! [`MemoryHistory`]: locations live in memory and never touch the outside
//! world.
//!
//! Paths match after normalization: a trailing `/`, query and fragment are
//! ignored, and matching is case-insensitive.
//!
//! # Example
//!
//! ```
//! use minebak_tui_router::{MemoryHistory, Navigation, RouteEntry, Router};
//!
//! const ROUTES: &[RouteEntry<&str>] = &[
//!     RouteEntry::new("/", "home"),
//!     RouteEntry::new("/about", "about"),
//! ];
//!
//! let mut router = Router::new(MemoryHistory::new(), ROUTES).unwrap();
//! assert_eq!(router.current().unwrap().component, "home");
//!
//! let nav = router.push("/about/").unwrap();
//! assert!(matches!(nav, Navigation::Changed(entry) if entry.component == "about"));
//!
//! assert!(router.push("/missing").is_err());
//! assert_eq!(router.back().unwrap().component, "home");
//! ```

mod error;
mod history;
mod router;
mod table;

pub use error::RouterError;
pub use history::{History, MemoryHistory};
pub use router::{Navigation, Router};
pub use table::{normalize_path, validate_table, RouteEntry};
