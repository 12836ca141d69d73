// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Application assembly and the mounted run loop.
//!
//! Startup always happens in the same order: router, i18n, root
//! component, plugins (router first), mount.

use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use minebak_backup::{BackupStore, Inventory};
use minebak_cli_config::MinebakConfig;
use minebak_common_i18n::{I18n, I18nConfig};
use minebak_tui_component::{Component, RenderContext};
use minebak_tui_core::{Action, Event, EventSource, Keymap};
use minebak_tui_router::{MemoryHistory, RouteEntry, Router};
use minebak_tui_theme::Theme;
use ratatui::backend::Backend;

use crate::error::BootstrapError;
use crate::host::Host;
use crate::keymap::{ShellKeymap, CYCLE_LOCALE};
use crate::plugin::{AppContext, I18nPlugin, Plugin, RouterPlugin};
use crate::routes::{ViewKind, ROUTES};
use crate::shell::Shell;
use crate::views::{SettingsInfo, Views};

/// Default mount target.
pub const APP_SELECTOR: &str = "#app";

/// Upper bound on actions handled for a single dispatch.
const MAX_DISPATCH: usize = 256;

/// An application that has its root component and plugins but is not mounted.
pub struct App {
	root: Box<dyn Component>,
	context: AppContext,
	theme: Theme,
}

impl fmt::Debug for App {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("App")
			.field("root", &self.root.id())
			.field("context", &self.context)
			.field("theme", &self.theme.name)
			.finish()
	}
}

pub struct AppBuilder {
	root: Box<dyn Component>,
	plugins: Vec<Box<dyn Plugin>>,
	theme: Theme,
}

impl AppBuilder {
	pub fn new(root: impl Component + 'static) -> Self {
		Self {
			root: Box::new(root),
			plugins: Vec::new(),
			theme: Theme::default(),
		}
	}

	/// Plugins install in the order they are added.
	pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
		self.plugins.push(Box::new(plugin));
		self
	}

	pub fn theme(mut self, theme: Theme) -> Self {
		self.theme = theme;
		self
	}

	pub fn build(self) -> Result<App, BootstrapError> {
		let mut context = AppContext::default();
		for plugin in self.plugins {
			let name = plugin.name();
			if context.is_installed(name) {
				return Err(BootstrapError::DuplicatePlugin(name));
			}
			plugin.install(&mut context)?;
			context.mark_installed(name);
			tracing::debug!(plugin = name, "plugin installed");
		}
		Ok(App {
			root: self.root,
			context,
			theme: self.theme,
		})
	}
}

impl App {
	pub fn builder(root: impl Component + 'static) -> AppBuilder {
		AppBuilder::new(root)
	}

	pub fn context(&self) -> &AppContext {
		&self.context
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	/// Attach the application to `selector` on `host`.
	///
	/// On failure the application is handed back unchanged so the caller
	/// can retry against another target.
	pub fn mount<B: Backend>(
		mut self,
		host: &mut Host<B>,
		selector: &str,
	) -> Result<MountedApp, MountFailure> {
		if let Err(error) = self.context.check_ready() {
			return Err(MountFailure { app: self, error });
		}
		if let Err(error) = host.attach(selector) {
			tracing::warn!(selector, error = %error, "mount failed");
			return Err(MountFailure { app: self, error });
		}
		if let Err(error) = self.root.init() {
			host.detach(selector);
			tracing::error!(selector, error = %error, "root component failed to initialize");
			return Err(MountFailure {
				app: self,
				error: error.into(),
			});
		}

		let plugins = self.context.installed().to_vec();
		let (router, i18n) = match self.context.take() {
			Ok(services) => services,
			Err(error) => {
				host.detach(selector);
				return Err(MountFailure { app: self, error });
			}
		};
		let keymap = ShellKeymap::new(router.routes().iter().map(|entry| entry.path));
		let current = router.current_path().to_string();

		let mut mounted = MountedApp {
			root: self.root,
			router,
			i18n,
			theme: self.theme,
			keymap,
			plugins,
			selector: selector.to_string(),
			should_quit: false,
		};
		mounted.dispatch(Action::RouteChanged(current));
		tracing::info!(
			selector,
			route = mounted.router.current_path(),
			locale = mounted.i18n.locale(),
			"application mounted"
		);
		Ok(mounted)
	}
}

/// A failed mount, carrying the application back to the caller.
#[derive(Debug, thiserror::Error)]
#[error("{error}")]
pub struct MountFailure {
	app: App,
	#[source]
	error: BootstrapError,
}

impl MountFailure {
	pub fn into_app(self) -> App {
		self.app
	}

	pub fn error(&self) -> &BootstrapError {
		&self.error
	}

	pub fn into_error(self) -> BootstrapError {
		self.error
	}
}

/// A mounted application: owns the router, i18n context and root component.
pub struct MountedApp {
	root: Box<dyn Component>,
	router: Router<ViewKind>,
	i18n: I18n,
	theme: Theme,
	keymap: ShellKeymap,
	plugins: Vec<&'static str>,
	selector: String,
	should_quit: bool,
}

impl fmt::Debug for MountedApp {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MountedApp")
			.field("root", &self.root.id())
			.field("route", &self.router.current_path())
			.field("locale", &self.i18n.locale())
			.field("selector", &self.selector)
			.field("should_quit", &self.should_quit)
			.finish()
	}
}

impl MountedApp {
	pub fn router(&self) -> &Router<ViewKind> {
		&self.router
	}

	pub fn i18n(&self) -> &I18n {
		&self.i18n
	}

	pub fn theme(&self) -> &Theme {
		&self.theme
	}

	pub fn root(&self) -> &dyn Component {
		self.root.as_ref()
	}

	/// Installed plugin names in installation order.
	pub fn plugins(&self) -> &[&'static str] {
		&self.plugins
	}

	pub fn selector(&self) -> &str {
		&self.selector
	}

	pub fn should_quit(&self) -> bool {
		self.should_quit
	}

	/// Global keys first, then the root component.
	pub fn handle_event(&mut self, event: &Event) {
		if let Event::Key(key) = event {
			if let Some(action) = self.keymap.key_to_action(key, self.router.current_path()) {
				self.dispatch(action);
				return;
			}
		}
		match event {
			Event::Resize(width, height) => self.dispatch(Action::Resize(*width, *height)),
			Event::Tick => self.dispatch(Action::Tick),
			_ => {}
		}
		for action in self.root.handle_event(event) {
			self.dispatch(action);
		}
	}

	/// Apply `action` and everything it produces, breadth first.
	pub fn dispatch(&mut self, action: Action) {
		let mut queue = VecDeque::from([action]);
		let mut handled = 0;
		while let Some(action) = queue.pop_front() {
			handled += 1;
			if handled > MAX_DISPATCH {
				tracing::warn!(pending = queue.len(), "dispatch limit reached, dropping actions");
				break;
			}
			match action {
				Action::Quit => {
					tracing::debug!("quit requested");
					self.should_quit = true;
				}
				Action::Navigate(path) => match self.router.push(&path) {
					Ok(navigation) if navigation.is_changed() => {
						queue.push_back(Action::RouteChanged(navigation.entry().path.to_string()));
					}
					Ok(_) => {}
					Err(error) => tracing::warn!(path = %path, error = %error, "navigation rejected"),
				},
				Action::Back => {
					if let Some(entry) = self.router.back() {
						queue.push_back(Action::RouteChanged(entry.path.to_string()));
					}
				}
				Action::Forward => {
					if let Some(entry) = self.router.forward() {
						queue.push_back(Action::RouteChanged(entry.path.to_string()));
					}
				}
				Action::SwitchLocale(locale) => match self.i18n.set_locale(&locale) {
					Ok(()) => queue.extend(self.root.update(&Action::SwitchLocale(locale))),
					Err(error) => tracing::warn!(locale = %locale, error = %error, "locale switch rejected"),
				},
				action if action.is_custom(CYCLE_LOCALE) => {
					queue.push_back(Action::SwitchLocale(self.i18n.next_locale()));
				}
				action => queue.extend(self.root.update(&action)),
			}
		}
	}

	pub fn draw<B: Backend>(&self, host: &mut Host<B>) -> Result<(), BootstrapError> {
		let ctx = RenderContext::new(&self.theme, &self.i18n, self.router.current_path());
		host.terminal_mut()
			.draw(|frame| {
				let area = frame.area();
				self.root.render(frame, area, &ctx);
			})
			.map_err(|e| BootstrapError::Backend(e.to_string()))?;
		Ok(())
	}

	/// Draw, wait for input, repeat until quit or the event source closes.
	pub fn run<B: Backend, E: EventSource>(
		&mut self,
		host: &mut Host<B>,
		events: &mut E,
		tick_rate: Duration,
	) -> Result<(), BootstrapError> {
		tracing::info!(tick_rate = ?tick_rate, "event loop started");
		let mut last_tick = Instant::now();
		while !self.should_quit {
			self.draw(host)?;
			if events.is_closed() {
				tracing::debug!("event source closed");
				break;
			}
			let timeout = tick_rate.saturating_sub(last_tick.elapsed());
			let event = events
				.next(timeout)
				.map_err(|e| BootstrapError::Backend(e.to_string()))?;
			if let Some(event) = event {
				self.handle_event(&event);
			}
			if last_tick.elapsed() >= tick_rate {
				self.dispatch(Action::Tick);
				last_tick = Instant::now();
			}
		}
		tracing::info!(route = self.router.current_path(), "event loop stopped");
		Ok(())
	}
}

/// Everything [`initialize`] needs.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
	pub routes: &'static [RouteEntry<ViewKind>],
	pub i18n: I18nConfig,
	pub theme: Theme,
	pub selector: String,
	pub settings: SettingsInfo,
	pub inventory: Inventory,
	pub store: BackupStore,
	/// Interval for automatic backups while the interface runs.
	pub auto_backup: Option<Duration>,
}

impl BootstrapOptions {
	pub fn new(backup_root: impl Into<PathBuf>) -> Self {
		let backup_root = backup_root.into();
		Self {
			routes: ROUTES,
			i18n: I18nConfig::default(),
			theme: Theme::default(),
			selector: APP_SELECTOR.to_string(),
			settings: SettingsInfo {
				backup_root: backup_root.clone(),
				..SettingsInfo::default()
			},
			inventory: Inventory::default(),
			store: BackupStore::new(backup_root),
			auto_backup: None,
		}
	}

	pub fn from_config(
		config: &MinebakConfig,
		config_path: Option<PathBuf>,
		backup_root: PathBuf,
	) -> Self {
		let theme = Theme::by_name(&config.theme).unwrap_or_else(|| {
			tracing::warn!(theme = %config.theme, known = ?Theme::names(), "unknown theme, using default");
			Theme::default()
		});
		Self {
			routes: ROUTES,
			i18n: config.i18n_config(),
			theme,
			selector: APP_SELECTOR.to_string(),
			settings: SettingsInfo {
				config_path,
				backup_root: backup_root.clone(),
				instance_roots: config.instance_roots.clone(),
			},
			inventory: Inventory::new(config.instance_roots.clone()),
			store: BackupStore::new(backup_root),
			auto_backup: config.auto_backup_interval(),
		}
	}

	pub fn with_routes(mut self, routes: &'static [RouteEntry<ViewKind>]) -> Self {
		self.routes = routes;
		self
	}

	pub fn with_i18n(mut self, i18n: I18nConfig) -> Self {
		self.i18n = i18n;
		self
	}

	pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
		self.selector = selector.into();
		self
	}

	pub fn with_auto_backup(mut self, interval: Duration) -> Self {
		self.auto_backup = Some(interval);
		self
	}

	pub fn with_inventory(mut self, inventory: Inventory) -> Self {
		self.settings.instance_roots = inventory.roots().to_vec();
		self.inventory = inventory;
		self
	}
}

/// Build and mount the application onto `options.selector`.
pub fn initialize<B: Backend>(
	host: &mut Host<B>,
	options: BootstrapOptions,
) -> Result<MountedApp, BootstrapError> {
	let router = Router::new(MemoryHistory::new(), options.routes)?;
	let i18n = I18n::new(options.i18n)?;
	let mut views = Views::new(options.settings, options.inventory, options.store);
	views.saves.set_auto_backup(options.auto_backup);
	let shell = Shell::new(options.routes, views);
	let app = App::builder(shell)
		.plugin(RouterPlugin::new(router))
		.plugin(I18nPlugin::new(i18n))
		.theme(options.theme)
		.build()?;
	app.mount(host, &options.selector).map_err(MountFailure::into_error)
}
