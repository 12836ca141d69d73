// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::LogFormat;

/// Environment variable holding the log filter directive.
pub const LOG_ENV: &str = "MINEBAK_LOG";

fn default_filter() -> EnvFilter {
	if cfg!(debug_assertions) {
		EnvFilter::new("minebak=debug,info")
	} else {
		EnvFilter::new("info")
	}
}

/// Send logs to `log_file`; the terminal belongs to the interface.
pub fn init_logging(log_file: &Path, format: LogFormat) -> Result<()> {
	if let Some(parent) = log_file.parent() {
		fs::create_dir_all(parent)
			.with_context(|| format!("creating log directory {}", parent.display()))?;
	}
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(log_file)
		.with_context(|| format!("opening log file {}", log_file.display()))?;
	let writer = Mutex::new(file);

	let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter());

	let registry = tracing_subscriber::registry().with(filter);
	let result = match format {
		LogFormat::Json => registry
			.with(fmt::layer().json().with_writer(writer))
			.try_init(),
		LogFormat::Compact => registry
			.with(fmt::layer().compact().with_ansi(false).with_writer(writer))
			.try_init(),
		LogFormat::Pretty => registry
			.with(fmt::layer().with_ansi(false).with_writer(writer))
			.try_init(),
	};
	result.context("installing tracing subscriber")?;

	tracing::debug!(path = %log_file.display(), "logging initialized");
	Ok(())
}
