// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Derivation of the credential-helper identity for a tenant/repository
//! scope.
//!
//! The helper keys stored secrets by (protocol, host, path, username). Two
//! tenants sharing one LFS host stay isolated because the username is always
//! the tenant id and the path carries the tenant (and optionally the
//! repository), so lookups never cross tenant boundaries.

use url::Url;

/// Host used when no LFS endpoint is configured. Credentials still need a
/// stable key in that case; this pseudo-host provides one.
pub const FALLBACK_HOST: &str = "candy-lfs.local";

/// The (host, path, username) triple a credential is keyed by. Derived per
/// request, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialIdentity {
	pub host: String,
	pub path: String,
	pub username: String,
}

impl CredentialIdentity {
	/// Derive the identity for `(tenant_id, repo_name)` against the
	/// configured LFS endpoint (empty string means unconfigured).
	///
	/// The host is the endpoint's hostname with scheme, port and path
	/// stripped; an unconfigured or unparseable endpoint falls back to
	/// [`FALLBACK_HOST`]. The path is `tenant_id` alone or
	/// `tenant_id/repo_name`, and the username is always the tenant id.
	pub fn derive(lfs_endpoint: &str, tenant_id: &str, repo_name: Option<&str>) -> Self {
		let host = endpoint_host(lfs_endpoint)
			.unwrap_or_else(|| FALLBACK_HOST.to_string());

		let path = match repo_name {
			Some(repo) => format!("{tenant_id}/{repo}"),
			None => tenant_id.to_string(),
		};

		Self {
			host,
			path,
			username: tenant_id.to_string(),
		}
	}
}

fn endpoint_host(endpoint: &str) -> Option<String> {
	if endpoint.is_empty() {
		return None;
	}
	match Url::parse(endpoint) {
		Ok(url) => url.host_str().map(str::to_string),
		Err(e) => {
			tracing::debug!(endpoint = %endpoint, error = %e, "unparseable LFS endpoint, using fallback host");
			None
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Test: host comes from the endpoint authority with scheme, port and
	/// path stripped.
	#[test]
	fn test_host_from_endpoint() {
		let id = CredentialIdentity::derive("https://lfs.example.com/api", "t1", None);
		assert_eq!(id.host, "lfs.example.com");

		let id = CredentialIdentity::derive("https://lfs.example.com:8443/api", "t1", None);
		assert_eq!(id.host, "lfs.example.com");
	}

	/// Test: no endpoint (or a broken one) falls back to the fixed
	/// pseudo-host.
	#[test]
	fn test_host_fallback() {
		let id = CredentialIdentity::derive("", "t1", None);
		assert_eq!(id.host, FALLBACK_HOST);

		let id = CredentialIdentity::derive("not a url", "t1", None);
		assert_eq!(id.host, FALLBACK_HOST);
	}

	/// Test: the path is the tenant id alone, or tenant/repo with a single
	/// separator.
	#[test]
	fn test_path_rule() {
		let id = CredentialIdentity::derive("", "t1", None);
		assert_eq!(id.path, "t1");

		let id = CredentialIdentity::derive("", "t1", Some("repo-a"));
		assert_eq!(id.path, "t1/repo-a");
	}

	/// Test: the username is always exactly the tenant id.
	///
	/// Why this test is important: the username is what isolates tenants
	/// sharing a host, since most helpers key primarily on (host, username).
	#[test]
	fn test_username_is_tenant_id() {
		let with_repo = CredentialIdentity::derive("https://lfs.example.com", "t1", Some("r"));
		let without = CredentialIdentity::derive("", "t1", None);
		assert_eq!(with_repo.username, "t1");
		assert_eq!(without.username, "t1");
	}

	/// Test: derivation is deterministic for identical inputs.
	#[test]
	fn test_deterministic() {
		let a = CredentialIdentity::derive("https://lfs.example.com", "t1", Some("r1"));
		let b = CredentialIdentity::derive("https://lfs.example.com", "t1", Some("r1"));
		assert_eq!(a, b);
	}
}

#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		// Property: for any tenant/repo pair the path has exactly one
		// separator more than the repo-less form and the username never
		// depends on the repo.
		#[test]
		fn prop_path_and_username(
			tenant in "[a-z][a-z0-9-]{0,15}",
			repo in "[a-z][a-z0-9-]{0,15}",
			endpoint in proptest::option::of("https://[a-z]{1,10}\\.[a-z]{2,4}"),
		) {
			let endpoint = endpoint.unwrap_or_default();
			let bare = CredentialIdentity::derive(&endpoint, &tenant, None);
			let scoped = CredentialIdentity::derive(&endpoint, &tenant, Some(&repo));

			prop_assert_eq!(&bare.path, &tenant);
			prop_assert_eq!(&scoped.path, &format!("{tenant}/{repo}"));
			prop_assert_eq!(&bare.username, &tenant);
			prop_assert_eq!(&scoped.username, &tenant);
			prop_assert_eq!(&bare.host, &scoped.host);
		}
	}
}
