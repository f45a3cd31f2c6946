// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Credential helper error types.

/// Why a credential helper invocation failed.
///
/// The router maps every variant to degraded behavior (retrieve reads as
/// absent, store/erase become no-ops); none of these ever surface to the
/// caller of a token operation.
#[derive(Debug, thiserror::Error)]
pub enum HelperError {
	/// The helper process could not be launched or driven
	#[error("failed to run credential helper: {0}")]
	Launch(#[source] std::io::Error),

	/// The helper ran but exited non-zero
	#[error("credential helper exited with status {code:?}: {stderr}")]
	NonZeroExit {
		code: Option<i32>,
		stderr: String,
	},

	/// The helper did not finish within the invocation timeout
	#[error("credential helper timed out")]
	Timeout,
}
