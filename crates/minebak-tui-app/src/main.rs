// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use minebak_backup::{BackupStore, Inventory};
use minebak_cli_config::{load_config_with_cli, resolve_xdg_paths};
use minebak_tui_app::cli::Args;
use minebak_tui_app::headless::{run_backup, run_every};
use minebak_tui_app::logging::init_logging;
use minebak_tui_app::terminal::TerminalGuard;
use minebak_tui_app::{initialize, BootstrapOptions, Host, APP_SELECTOR};
use minebak_tui_core::CrosstermEvents;
use ratatui::backend::CrosstermBackend;

const TICK_RATE: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
	let args = Args::parse();

	let paths = resolve_xdg_paths().context("resolving config paths")?;
	init_logging(&paths.log_file(), args.log_format)?;

	let config_path = args.config_path.clone().unwrap_or_else(|| paths.config_file.clone());
	let config = load_config_with_cli(Some(&config_path), args.overrides())
		.with_context(|| format!("loading {}", config_path.display()))?;
	let backup_root = config.resolved_backup_root()?;

	tracing::info!(
		version = env!("CARGO_PKG_VERSION"),
		config = %config_path.display(),
		backup_root = %backup_root.display(),
		locale = %config.locale,
		"starting minebak"
	);

	if args.run_backup {
		let mut inventory = Inventory::new(config.instance_roots.clone());
		let store = BackupStore::new(&backup_root);
		if let Some(interval) = args.every() {
			tracing::info!(?interval, "running scheduled backups");
			run_every(&mut inventory, &store, interval, |summary| {
				println!(
					"{} created, {} unchanged, {} failed",
					summary.created, summary.unchanged, summary.failed
				);
				true
			});
			return Ok(());
		}
		let summary = run_backup(&mut inventory, &store);
		println!(
			"{} created, {} unchanged, {} failed",
			summary.created, summary.unchanged, summary.failed
		);
		if summary.failed > 0 {
			anyhow::bail!("{} backup(s) failed, see {}", summary.failed, paths.log_file().display());
		}
		return Ok(());
	}

	let options = BootstrapOptions::from_config(&config, Some(config_path), backup_root);

	let mut guard = TerminalGuard::enter().context("preparing terminal")?;
	let result = (|| -> Result<()> {
		let mut host = Host::new(CrosstermBackend::new(io::stdout()))?.with_target(APP_SELECTOR);
		let mut app = initialize(&mut host, options)?;
		app.run(&mut host, &mut CrosstermEvents, TICK_RATE)?;
		Ok(())
	})();
	guard.restore().context("restoring terminal")?;

	if let Err(error) = &result {
		tracing::error!(error = %error, "minebak exited with an error");
	}
	result
}
