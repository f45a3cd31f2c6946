// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The settings store: single source of truth for endpoints, the current
//! tenant, and tenant/repository bookkeeping.
//!
//! Every mutation goes through [`SettingsStore::update`], which mutates the
//! in-memory document and immediately persists the whole document to disk.
//! No in-memory-only state survives past a mutating call. The store takes no
//! file lock; concurrent processes writing the same file lose updates on a
//! last-writer-wins basis.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::{SettingsDoc, TenantEntry};
use crate::{paths, ConfigError, EndpointDefaults};

/// Settings store backed by a single YAML file.
#[derive(Debug)]
pub struct SettingsStore {
	path: PathBuf,
	defaults: EndpointDefaults,
	doc: SettingsDoc,
}

impl SettingsStore {
	/// Open the store at the fixed user-scoped location
	/// (`~/.candy-lfs/config.yaml`).
	pub fn open(defaults: EndpointDefaults) -> Result<Self, ConfigError> {
		let path = paths::settings_file_path()?;
		Self::open_at(path, defaults)
	}

	/// Open the store at an explicit path. Used by tests and by callers that
	/// relocate the settings file.
	///
	/// A missing file is valid: the store starts from a fresh document with
	/// `api_endpoint` taken from `defaults` and no current tenant. A present
	/// but malformed file is a fatal [`ConfigError::YamlParse`].
	pub fn open_at(
		path: impl Into<PathBuf>,
		defaults: EndpointDefaults,
	) -> Result<Self, ConfigError> {
		let path = path.into();

		let doc = if path.exists() {
			let raw = fs::read_to_string(&path)?;
			if raw.trim().is_empty() {
				// An empty file parses as no document at all.
				SettingsDoc::default()
			} else {
				serde_yaml::from_str(&raw).map_err(|source| ConfigError::YamlParse {
					path: path.clone(),
					source,
				})?
			}
		} else {
			debug!(path = %path.display(), "no settings file, starting from defaults");
			SettingsDoc {
				api_endpoint: defaults.api_endpoint.clone(),
				..SettingsDoc::default()
			}
		};

		Ok(Self {
			path,
			defaults,
			doc,
		})
	}

	/// Path of the backing file.
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Read access to the full in-memory document.
	pub fn document(&self) -> &SettingsDoc {
		&self.doc
	}

	/// Apply `mutate` to the document and persist the result. Every named
	/// mutator goes through here, keeping the persist-on-every-mutation
	/// contract visible rather than hidden inside setters.
	/// [`SettingsStore::clear_tenant_repos`] is the one exception: it
	/// persists only when an entry was actually removed.
	///
	/// On a persist failure the in-memory document keeps the mutation; the
	/// next successful persist writes it out together with the newer change.
	pub fn update<F>(&mut self, mutate: F) -> Result<(), ConfigError>
	where
		F: FnOnce(&mut SettingsDoc),
	{
		mutate(&mut self.doc);
		self.persist()
	}

	fn persist(&self) -> Result<(), ConfigError> {
		if let Some(parent) = self.path.parent() {
			fs::create_dir_all(parent)?;
		}
		let yaml = serde_yaml::to_string(&self.doc).map_err(|source| {
			ConfigError::YamlSerialize {
				path: self.path.clone(),
				source,
			}
		})?;
		fs::write(&self.path, yaml)?;
		debug!(path = %self.path.display(), "persisted settings document");
		Ok(())
	}

	pub fn api_endpoint(&self) -> &str {
		&self.doc.api_endpoint
	}

	pub fn set_api_endpoint(&mut self, value: impl Into<String>) -> Result<(), ConfigError> {
		let value = value.into();
		self.update(|doc| doc.api_endpoint = value)
	}

	/// The configured LFS endpoint, falling back to the injected default
	/// when the document has no value. May be empty.
	pub fn lfs_endpoint(&self) -> &str {
		self
			.doc
			.lfs_endpoint
			.as_deref()
			.unwrap_or(&self.defaults.lfs_endpoint)
	}

	pub fn set_lfs_endpoint(&mut self, value: impl Into<String>) -> Result<(), ConfigError> {
		let value = value.into();
		self.update(|doc| doc.lfs_endpoint = Some(value))
	}

	pub fn current_tenant(&self) -> Option<&str> {
		self.doc.current_tenant.as_deref()
	}

	pub fn set_current_tenant(&mut self, value: Option<String>) -> Result<(), ConfigError> {
		self.update(|doc| doc.current_tenant = value)
	}

	/// Ordered tenant list.
	pub fn list_tenants(&self) -> &[TenantEntry] {
		&self.doc.tenants
	}

	/// Register a tenant. If `tenant_id` is already present its name is
	/// updated in place, preserving list position; otherwise the entry is
	/// appended.
	pub fn add_tenant(
		&mut self,
		tenant_id: impl Into<String>,
		name: impl Into<String>,
	) -> Result<(), ConfigError> {
		let tenant_id = tenant_id.into();
		let name = name.into();
		debug!(tenant_id = %tenant_id, "registering tenant");
		self.update(|doc| {
			match doc.tenants.iter_mut().find(|t| t.tenant_id == tenant_id) {
				Some(existing) => existing.name = name,
				None => doc.tenants.push(TenantEntry { tenant_id, name }),
			}
		})
	}

	/// Remove a tenant's bookkeeping entry. A no-op (but still a persist) if
	/// the tenant was never registered. The tenant's `tenant_repos` entry is
	/// left untouched, so a repo list can outlive its tenant.
	pub fn remove_tenant(&mut self, tenant_id: &str) -> Result<(), ConfigError> {
		debug!(tenant_id = %tenant_id, "removing tenant");
		self.update(|doc| doc.tenants.retain(|t| t.tenant_id != tenant_id))
	}

	/// Ordered repository names registered for a tenant; empty if none.
	pub fn get_tenant_repos(&self, tenant_id: &str) -> Vec<String> {
		self
			.doc
			.tenant_repos
			.get(tenant_id)
			.cloned()
			.unwrap_or_default()
	}

	/// Replace a tenant's repository list wholesale.
	pub fn set_tenant_repos(
		&mut self,
		tenant_id: impl Into<String>,
		repos: Vec<String>,
	) -> Result<(), ConfigError> {
		let tenant_id = tenant_id.into();
		self.update(|doc| {
			doc.tenant_repos.insert(tenant_id, repos);
		})
	}

	/// Drop a tenant's repository list. Persists only when an entry was
	/// actually removed.
	pub fn clear_tenant_repos(&mut self, tenant_id: &str) -> Result<(), ConfigError> {
		if self.doc.tenant_repos.remove(tenant_id).is_some() {
			debug!(tenant_id = %tenant_id, "cleared tenant repository list");
			self.persist()
		} else {
			Ok(())
		}
	}
}
