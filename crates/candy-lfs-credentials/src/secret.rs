// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Secret wrapper that keeps tokens out of logs.

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Placeholder emitted wherever a secret would otherwise be formatted.
pub const REDACTED: &str = "[REDACTED]";

/// A token returned by the credential helper. `Debug` and `Display` print
/// [`REDACTED`]; the underlying value is only reachable through
/// [`SecretString::expose`] and is zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl SecretString {
	pub fn new(value: String) -> Self {
		Self(value)
	}

	/// Access the underlying secret value.
	pub fn expose(&self) -> &str {
		&self.0
	}
}

impl From<String> for SecretString {
	fn from(value: String) -> Self {
		Self::new(value)
	}
}

impl std::fmt::Debug for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}

impl std::fmt::Display for SecretString {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(REDACTED)
	}
}
