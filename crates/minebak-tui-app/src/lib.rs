// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The MineBak terminal application.
//!
//! [`initialize`] builds a router over an in-memory history, an i18n
//! context, and the [`Shell`] root component, installs the router and
//! i18n plugins in that order, then mounts everything onto `#app`.
//!
//! ```no_run
//! use minebak_tui_app::{initialize, BootstrapOptions, Host};
//! use ratatui::backend::TestBackend;
//!
//! let mut host = Host::new(TestBackend::new(80, 24))?.with_target("#app");
//! let app = initialize(&mut host, BootstrapOptions::new("/tmp/minebak"))?;
//! assert_eq!(app.router().current_path(), "/");
//! # Ok::<(), minebak_tui_app::BootstrapError>(())
//! ```

pub mod bootstrap;
pub mod cli;
pub mod error;
pub mod headless;
pub mod host;
pub mod keymap;
pub mod logging;
pub mod plugin;
pub mod routes;
pub mod schedule;
pub mod shell;
pub mod terminal;
pub mod views;

pub use bootstrap::{
	initialize, App, AppBuilder, BootstrapOptions, MountFailure, MountedApp, APP_SELECTOR,
};
pub use error::BootstrapError;
pub use host::Host;
pub use keymap::{ShellKeymap, CYCLE_LOCALE};
pub use plugin::{AppContext, I18nPlugin, Plugin, RouterPlugin, I18N_PLUGIN, ROUTER_PLUGIN};
pub use routes::{view_for, view_in, ViewKind, LEGACY_ROUTES, ROUTES};
pub use shell::Shell;
