// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resolution of the user-scoped settings file location.

use std::path::PathBuf;

use crate::ConfigError;

/// Directory name under the user's home directory.
const SETTINGS_DIR: &str = ".candy-lfs";

/// File name of the settings document inside [`SETTINGS_DIR`].
const SETTINGS_FILE: &str = "config.yaml";

/// Resolve the settings file path: `~/.candy-lfs/config.yaml`.
pub fn settings_file_path() -> Result<PathBuf, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
	let path = home.join(SETTINGS_DIR).join(SETTINGS_FILE);

	tracing::debug!(path = %path.display(), "resolved settings file path");

	Ok(path)
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Test that the settings path resolves under the home directory.
	#[test]
	fn test_settings_file_path_under_home() {
		let path = settings_file_path().unwrap();
		let s = path.to_string_lossy();
		assert!(s.contains(".candy-lfs"));
		assert!(s.ends_with("config.yaml"));
	}
}
