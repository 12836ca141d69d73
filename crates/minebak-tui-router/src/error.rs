// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
	#[error("route table is empty")]
	EmptyTable,

	#[error("route #{index} has an empty path")]
	EmptyPath { index: usize },

	#[error("route path '{0}' must start with '/'")]
	NotAbsolute(String),

	#[error("route path '{0}' appears more than once")]
	DuplicatePath(String),

	#[error("no route matches '{0}'")]
	NotFound(String),
}
