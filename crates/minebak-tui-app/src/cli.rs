// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use minebak_cli_config::CliOverrides;

/// MineBak - back up and restore Minecraft saves from the terminal.
#[derive(Parser, Debug)]
#[command(name = "minebak", about = "Minecraft save backup manager", version)]
pub struct Args {
	/// Configuration file (defaults to the XDG config location)
	#[arg(short = 'c', long)]
	pub config_path: Option<PathBuf>,

	/// Directory backups are written to
	#[arg(long, env = "MINEBAK_BACKUP_ROOT")]
	pub backup_root: Option<PathBuf>,

	/// Interface locale, e.g. zh-cn or en-us
	#[arg(long, env = "MINEBAK_LOCALE")]
	pub locale: Option<String>,

	/// Color theme (dark, light)
	#[arg(long)]
	pub theme: Option<String>,

	/// Log output format
	#[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
	pub log_format: LogFormat,

	/// Back up every save once and exit without starting the interface
	#[arg(long)]
	pub run_backup: bool,

	/// With --run-backup, keep running and back up again every MINUTES
	#[arg(
		long,
		value_name = "MINUTES",
		requires = "run_backup",
		value_parser = clap::value_parser!(u64).range(1..)
	)]
	pub every: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
	Pretty,
	Compact,
	Json,
}

impl Args {
	pub fn overrides(&self) -> CliOverrides {
		CliOverrides {
			locale: self.locale.clone(),
			theme: self.theme.clone(),
			backup_root: self.backup_root.clone(),
		}
	}

	pub fn every(&self) -> Option<Duration> {
		self.every.map(|minutes| Duration::from_secs(minutes * 60))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_defaults() {
		let args = Args::try_parse_from(["minebak"]).unwrap();
		assert!(args.config_path.is_none());
		assert!(!args.run_backup);
		assert!(args.every().is_none());
		assert_eq!(args.log_format, LogFormat::Pretty);
	}

	#[test]
	fn test_overrides_carry_flags() {
		let args = Args::try_parse_from([
			"minebak",
			"-c",
			"/tmp/minebak.toml",
			"--locale",
			"en-us",
			"--theme",
			"light",
			"--backup-root",
			"/srv/backups",
			"--run-backup",
		])
		.unwrap();
		assert_eq!(args.config_path, Some(PathBuf::from("/tmp/minebak.toml")));
		assert!(args.run_backup);
		assert_eq!(
			args.overrides(),
			CliOverrides {
				locale: Some("en-us".to_string()),
				theme: Some("light".to_string()),
				backup_root: Some(PathBuf::from("/srv/backups")),
			}
		);
	}

	#[test]
	fn test_log_format_values() {
		let args = Args::try_parse_from(["minebak", "--log-format", "json"]).unwrap();
		assert_eq!(args.log_format, LogFormat::Json);
		assert!(Args::try_parse_from(["minebak", "--log-format", "xml"]).is_err());
	}

	#[test]
	fn test_every_needs_run_backup() {
		let args = Args::try_parse_from(["minebak", "--run-backup", "--every", "30"]).unwrap();
		assert_eq!(args.every(), Some(Duration::from_secs(30 * 60)));

		assert!(Args::try_parse_from(["minebak", "--every", "30"]).is_err());
		assert!(Args::try_parse_from(["minebak", "--run-backup", "--every", "0"]).is_err());
	}
}
