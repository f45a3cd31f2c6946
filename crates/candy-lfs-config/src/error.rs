// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Settings error types.

use std::path::PathBuf;

/// Errors that can occur while loading or persisting the settings document.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// I/O error reading or writing the settings file
	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	/// YAML parsing error. The settings file is the source of truth and a
	/// malformed document is never guessed at, so this is fatal.
	#[error("YAML parse error in {path}: {source}")]
	YamlParse {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	/// YAML serialization error while persisting
	#[error("YAML serialize error for {path}: {source}")]
	YamlSerialize {
		path: PathBuf,
		#[source]
		source: serde_yaml::Error,
	},

	/// Home directory not found
	#[error("Could not determine home directory")]
	HomeDirNotFound,
}
