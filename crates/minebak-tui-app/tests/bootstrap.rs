// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use minebak_backup::{BackupStore, Inventory};
use minebak_common_i18n::{I18n, I18nConfig};
use minebak_tui_app::views::{SettingsInfo, Views};
use minebak_tui_app::{
	initialize, App, BootstrapError, BootstrapOptions, Host, I18nPlugin, RouterPlugin, Shell,
	I18N_PLUGIN, LEGACY_ROUTES, ROUTER_PLUGIN, ROUTES,
};
use minebak_tui_core::Action;
use minebak_tui_router::{MemoryHistory, Router};
use ratatui::backend::TestBackend;

fn host() -> Host<TestBackend> {
	Host::new(TestBackend::new(100, 24)).unwrap()
}

fn shell() -> Shell {
	Shell::new(
		ROUTES,
		Views::new(
			SettingsInfo::default(),
			Inventory::default(),
			BackupStore::new("/nonexistent/minebak"),
		),
	)
}

fn router() -> Router<minebak_tui_app::ViewKind> {
	Router::new(MemoryHistory::new(), ROUTES).unwrap()
}

fn full_app() -> App {
	App::builder(shell())
		.plugin(RouterPlugin::new(router()))
		.plugin(I18nPlugin::new(I18n::new(I18nConfig::default()).unwrap()))
		.build()
		.unwrap()
}

#[test]
fn test_initialize_defaults() {
	let mut host = host().with_target("#app");
	let app = initialize(&mut host, BootstrapOptions::new("/nonexistent/minebak")).unwrap();

	assert_eq!(app.router().current_path(), "/");
	assert_eq!(app.router().history().len(), 1);
	assert_eq!(app.router().routes().len(), 4);
	assert_eq!(app.i18n().locale(), "zh-cn");
	assert_eq!(app.i18n().fallback_locale(), "en-us");
	assert!(app.i18n().config().composition_mode);
	assert_eq!(app.plugins(), [ROUTER_PLUGIN, I18N_PLUGIN]);
	assert_eq!(app.selector(), "#app");
	assert_eq!(app.root().id(), "shell");
	assert!(!app.should_quit());

	assert_eq!(host.mounts(), ["#app"]);
	assert!(host.is_occupied("#app"));
}

#[test]
fn test_mount_retry_after_missing_target() {
	let mut bad = host();
	let failure = full_app().mount(&mut bad, "#app").unwrap_err();
	assert!(matches!(failure.error(), BootstrapError::MountTargetMissing(s) if s == "#app"));
	assert_eq!(bad.mounts(), ["#app"]);

	let app = failure.into_app();
	assert_eq!(app.context().installed(), [ROUTER_PLUGIN, I18N_PLUGIN]);
	assert!(app.context().router().is_some());
	assert!(app.context().i18n().is_some());

	let mut good = host().with_target("#app");
	let mounted = app.mount(&mut good, "#app").unwrap();
	assert_eq!(good.mounts(), ["#app"]);
	assert!(good.is_occupied("#app"));
	assert_eq!(mounted.plugins(), [ROUTER_PLUGIN, I18N_PLUGIN]);
	assert_eq!(mounted.router().current_path(), "/");
}

#[test]
fn test_second_app_cannot_share_a_target() {
	let mut host = host().with_target("#app");
	let _first = initialize(&mut host, BootstrapOptions::new("/nonexistent/minebak")).unwrap();

	let err = initialize(&mut host, BootstrapOptions::new("/nonexistent/minebak")).unwrap_err();
	assert!(matches!(err, BootstrapError::MountTargetOccupied(_)));
	assert_eq!(host.mounts(), ["#app", "#app"]);
}

#[test]
fn test_invalid_selector_is_rejected() {
	let mut host = host().with_target("#app");
	let options = BootstrapOptions::new("/nonexistent/minebak").with_selector("app");
	let err = initialize(&mut host, options).unwrap_err();
	assert!(matches!(err, BootstrapError::InvalidSelector(s) if s == "app"));
	assert!(!host.is_occupied("#app"));
}

#[test]
fn test_missing_plugin_fails_before_attach() {
	let mut host = host().with_target("#app");
	let app = App::builder(shell())
		.plugin(RouterPlugin::new(router()))
		.build()
		.unwrap();

	let failure = app.mount(&mut host, "#app").unwrap_err();
	assert!(matches!(failure.error(), BootstrapError::MissingPlugin(I18N_PLUGIN)));
	assert!(host.mounts().is_empty());
	assert!(!host.is_occupied("#app"));
}

#[test]
fn test_duplicate_plugin_rejected() {
	let err = App::builder(shell())
		.plugin(RouterPlugin::new(router()))
		.plugin(RouterPlugin::new(router()))
		.build()
		.unwrap_err();
	assert!(matches!(err, BootstrapError::DuplicatePlugin(ROUTER_PLUGIN)));
}

#[test]
fn test_plugins_install_in_registration_order() {
	let app = full_app();
	assert_eq!(app.context().installed(), ["router", "i18n"]);
}

#[test]
fn test_invalid_i18n_config_stops_before_mount() {
	let mut host = host().with_target("#app");
	let config = I18nConfig {
		composition_mode: false,
		..I18nConfig::default()
	};
	let options = BootstrapOptions::new("/nonexistent/minebak").with_i18n(config);

	let err = initialize(&mut host, options).unwrap_err();
	assert!(matches!(err, BootstrapError::I18n(_)));
	assert!(host.mounts().is_empty());
}

#[test]
fn test_legacy_table_has_no_saves_route() {
	let mut host = host().with_target("#app");
	let options = BootstrapOptions::new("/nonexistent/minebak").with_routes(LEGACY_ROUTES);
	let mut app = initialize(&mut host, options).unwrap();
	assert_eq!(app.router().routes().len(), 3);

	app.dispatch(Action::Navigate("/saves".to_string()));
	assert_eq!(app.router().current_path(), "/");

	app.dispatch(Action::Navigate("/about".to_string()));
	assert_eq!(app.router().current_path(), "/about");
}

#[test]
fn test_options_from_config() {
	let config = minebak_cli_config::MinebakConfig {
		theme: "no-such-theme".to_string(),
		auto_backup_minutes: Some(5),
		..Default::default()
	};
	let options = BootstrapOptions::from_config(
		&config,
		Some("/etc/minebak.toml".into()),
		"/srv/backups".into(),
	);
	assert_eq!(options.i18n, config.i18n_config());
	assert_eq!(options.theme.name, "dark");
	assert_eq!(options.selector, "#app");
	assert_eq!(options.store.root(), std::path::Path::new("/srv/backups"));
	assert_eq!(options.auto_backup, Some(std::time::Duration::from_secs(300)));
	assert_eq!(
		options.settings.config_path.as_deref(),
		Some(std::path::Path::new("/etc/minebak.toml"))
	);
}
