// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The credential router: drives the helper's fill/approve/reject verbs
//! through identities derived from the tenant/repository scope.
//!
//! Helper failures never surface to callers. Retrieval degrades to "not
//! authenticated", store and erase degrade to silent no-ops. Credential
//! helpers are optional infrastructure and a minimal environment without one
//! must still be able to use the rest of the tool.

use std::fmt::Write as _;

use tracing::{debug, warn};

use candy_lfs_config::{ConfigError, SettingsStore};

use crate::helper::GitRunner;
use crate::identity::CredentialIdentity;
use crate::secret::SecretString;

/// Routes token operations for a (tenant, optional repository) scope to the
/// external git credential helper.
#[derive(Debug, Clone, Default)]
pub struct CredentialRouter {
	runner: GitRunner,
}

impl CredentialRouter {
	pub fn new() -> Self {
		Self {
			runner: GitRunner::new(),
		}
	}

	/// Use an explicit runner (program and timeout). Tests point this at
	/// stub executables.
	pub fn with_runner(runner: GitRunner) -> Self {
		Self { runner }
	}

	/// The identity the given scope maps to, against the store's configured
	/// LFS endpoint.
	pub fn identity_for(
		&self,
		store: &SettingsStore,
		tenant_id: &str,
		repo_name: Option<&str>,
	) -> CredentialIdentity {
		CredentialIdentity::derive(store.lfs_endpoint(), tenant_id, repo_name)
	}

	/// Retrieve the stored token for the scope, or `None` when the helper
	/// has none or is unavailable. Absence means "not authenticated", never
	/// an error.
	pub async fn get_token(
		&self,
		store: &SettingsStore,
		tenant_id: &str,
		repo_name: Option<&str>,
	) -> Option<SecretString> {
		let identity = self.identity_for(store, tenant_id, repo_name);
		let request = credential_request(&identity, None);

		match self.runner.run(&["credential", "fill"], Some(&request)).await {
			Ok(output) => match parse_password(&output) {
				Some(password) => {
					debug!(host = %identity.host, path = %identity.path, "credential fill hit");
					Some(SecretString::new(password))
				}
				None => {
					debug!(host = %identity.host, path = %identity.path, "no password in helper output");
					None
				}
			},
			Err(e) => {
				debug!(host = %identity.host, path = %identity.path, error = %e, "credential fill unavailable");
				None
			}
		}
	}

	/// Store a token for the scope, best-effort. Path-scoping for the host
	/// is ensured first so tenants sharing the host do not collide.
	pub async fn set_token(
		&self,
		store: &SettingsStore,
		tenant_id: &str,
		token: &str,
		repo_name: Option<&str>,
	) {
		let identity = self.identity_for(store, tenant_id, repo_name);
		self.ensure_path_scoping(&identity.host).await;

		let request = credential_request(&identity, Some(token));
		if let Err(e) = self
			.runner
			.run(&["credential", "approve"], Some(&request))
			.await
		{
			warn!(host = %identity.host, path = %identity.path, error = %e, "credential approve failed");
		}
	}

	/// Erase the stored token for the scope, best-effort.
	pub async fn delete_token(
		&self,
		store: &SettingsStore,
		tenant_id: &str,
		repo_name: Option<&str>,
	) {
		let identity = self.identity_for(store, tenant_id, repo_name);
		let request = credential_request(&identity, None);

		if let Err(e) = self
			.runner
			.run(&["credential", "reject"], Some(&request))
			.await
		{
			debug!(host = %identity.host, path = %identity.path, error = %e, "credential reject failed");
		}
	}

	/// Erase the per-repository credential for every repository registered
	/// for the tenant, then clear the tenant's repository list. The list is
	/// cleared regardless of individual erase outcomes (erasures are
	/// best-effort and not transactional with the settings update).
	///
	/// The tenant's repo-less credential is left alone; callers wanting full
	/// cleanup erase it separately via [`CredentialRouter::delete_token`].
	pub async fn delete_all_tenant_credentials(
		&self,
		store: &mut SettingsStore,
		tenant_id: &str,
	) -> Result<(), ConfigError> {
		let repos = store.get_tenant_repos(tenant_id);
		debug!(tenant_id = %tenant_id, repo_count = repos.len(), "erasing per-repo credentials");

		for repo in &repos {
			self.delete_token(store, tenant_id, Some(repo)).await;
		}

		store.clear_tenant_repos(tenant_id)
	}

	/// Remove a tenant: drop its bookkeeping entry from the store, then
	/// erase its repo-less credential. Per-repo credentials and the repo
	/// list are untouched; see
	/// [`CredentialRouter::delete_all_tenant_credentials`].
	pub async fn remove_tenant(
		&self,
		store: &mut SettingsStore,
		tenant_id: &str,
	) -> Result<(), ConfigError> {
		store.remove_tenant(tenant_id)?;
		self.delete_token(store, tenant_id, None).await;
		Ok(())
	}

	/// Make the helper honor the `path` field for this host. Reads the
	/// global `credential.https://<host>.useHttpPath` key and sets it to
	/// `true` only when it is not already. Idempotent; failures swallowed.
	///
	/// Runs before every store rather than once per host: the router keeps
	/// no per-host memory, so a key reverted outside the tool is re-enabled
	/// on the next store.
	async fn ensure_path_scoping(&self, host: &str) {
		let key = format!("credential.https://{host}.useHttpPath");

		let current = self
			.runner
			.run(&["config", "--global", "--get", &key], None)
			.await;
		if matches!(&current, Ok(value) if value.trim() == "true") {
			return;
		}

		debug!(host = %host, "enabling path-scoped credential lookup");
		if let Err(e) = self
			.runner
			.run(&["config", "--global", &key, "true"], None)
			.await
		{
			debug!(host = %host, error = %e, "failed to enable path-scoped lookup");
		}
	}
}

/// Build a newline-terminated `key=value` request, ending with the blank
/// line that terminates a helper record.
fn credential_request(identity: &CredentialIdentity, password: Option<&str>) -> String {
	let mut request = String::new();
	let _ = writeln!(request, "protocol=https");
	let _ = writeln!(request, "host={}", identity.host);
	let _ = writeln!(request, "path={}", identity.path);
	let _ = writeln!(request, "username={}", identity.username);
	if let Some(password) = password {
		let _ = writeln!(request, "password={password}");
	}
	request.push('\n');
	request
}

/// Extract the `password=` value from line-oriented helper output.
fn parse_password(output: &str) -> Option<String> {
	output
		.lines()
		.find_map(|line| line.strip_prefix("password=").map(str::to_string))
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Test: a fill request carries protocol, host, path and username and
	/// ends with a blank line.
	#[test]
	fn test_credential_request_format() {
		let identity = CredentialIdentity {
			host: "lfs.example.com".to_string(),
			path: "t1/r1".to_string(),
			username: "t1".to_string(),
		};

		let request = credential_request(&identity, None);
		assert_eq!(
			request,
			"protocol=https\nhost=lfs.example.com\npath=t1/r1\nusername=t1\n\n"
		);

		let request = credential_request(&identity, Some("tok"));
		assert!(request.contains("password=tok\n"));
		assert!(request.ends_with("\n\n"));
	}

	/// Test: password extraction tolerates surrounding helper chatter and
	/// values containing '='.
	#[test]
	fn test_parse_password() {
		let output = "protocol=https\nusername=t1\npassword=s3cr3t==\n";
		assert_eq!(parse_password(output), Some("s3cr3t==".to_string()));

		assert_eq!(parse_password("username=t1\n"), None);
		assert_eq!(parse_password(""), None);
	}
}
