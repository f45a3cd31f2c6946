// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Endpoint defaults resolved once at process start.
//!
//! Each endpoint takes a build-time-embedded value if one was compiled in,
//! else a runtime environment variable, else the empty string. Resolved
//! values are passed into [`crate::SettingsStore`] rather than read from
//! ambient globals, so tests can inject their own.

/// Build-time override for the API endpoint (set via `CANDY_LFS_BUILD_API_ENDPOINT`
/// in the build environment).
const BUILD_API_ENDPOINT: Option<&str> = option_env!("CANDY_LFS_BUILD_API_ENDPOINT");

/// Build-time override for the LFS endpoint.
const BUILD_LFS_ENDPOINT: Option<&str> = option_env!("CANDY_LFS_BUILD_LFS_ENDPOINT");

/// Runtime environment variable for the API endpoint.
const ENV_API_ENDPOINT: &str = "CANDY_LFS_API_ENDPOINT";

/// Runtime environment variable for the LFS endpoint.
const ENV_LFS_ENDPOINT: &str = "CANDY_LFS_LFS_ENDPOINT";

/// Default endpoints injected into a [`crate::SettingsStore`] at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointDefaults {
	/// Default API endpoint used when a fresh settings document is created.
	pub api_endpoint: String,
	/// Default LFS endpoint used when the document has no `lfs_endpoint`.
	pub lfs_endpoint: String,
}

impl EndpointDefaults {
	/// Resolve defaults from the build-time constants and the process
	/// environment.
	pub fn resolve() -> Self {
		Self {
			api_endpoint: resolve_one(BUILD_API_ENDPOINT, ENV_API_ENDPOINT),
			lfs_endpoint: resolve_one(BUILD_LFS_ENDPOINT, ENV_LFS_ENDPOINT),
		}
	}
}

fn resolve_one(build_value: Option<&str>, env_var: &str) -> String {
	match build_value {
		Some(v) if !v.is_empty() => v.to_string(),
		_ => std::env::var(env_var).unwrap_or_default(),
	}
}
