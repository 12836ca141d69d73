// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use minebak_common_i18n::I18nError;
use minebak_tui_core::ComponentError;
use minebak_tui_router::RouterError;
use thiserror::Error;

/// Failures while building or mounting the application.
#[derive(Debug, Error)]
pub enum BootstrapError {
	#[error("invalid mount selector '{0}'")]
	InvalidSelector(String),

	#[error("mount target '{0}' does not exist on this host")]
	MountTargetMissing(String),

	#[error("mount target '{0}' already holds an application")]
	MountTargetOccupied(String),

	#[error("plugin '{0}' is not installed")]
	MissingPlugin(&'static str),

	#[error("plugin '{0}' registered twice")]
	DuplicatePlugin(&'static str),

	#[error("root component failed: {0}")]
	Component(#[from] ComponentError),

	#[error("router setup failed: {0}")]
	Router(#[from] RouterError),

	#[error("i18n setup failed: {0}")]
	I18n(#[from] I18nError),

	#[error("terminal backend error: {0}")]
	Backend(String),
}
