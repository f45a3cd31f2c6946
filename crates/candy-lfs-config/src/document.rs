// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The persisted settings document.
//!
//! A single YAML mapping holding endpoints, the current tenant, the tenant
//! list, and per-tenant repository lists. Unknown fields are tolerated on
//! load and preserved on the next save.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One entry in the ordered tenant list. `tenant_id` is unique within the
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantEntry {
	pub tenant_id: String,
	pub name: String,
}

/// The full settings document as persisted to `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDoc {
	/// API endpoint for the candy-lfs control plane.
	#[serde(default)]
	pub api_endpoint: String,

	/// LFS endpoint; when unset the store falls back to its injected default.
	#[serde(default)]
	pub lfs_endpoint: Option<String>,

	/// Identifier of the currently selected tenant, if any.
	#[serde(default)]
	pub current_tenant: Option<String>,

	/// Ordered tenant list, at most one entry per `tenant_id`.
	#[serde(default)]
	pub tenants: Vec<TenantEntry>,

	/// Per-tenant ordered repository name lists. Keys are not validated
	/// against `tenants`; a list can outlive its tenant entry.
	#[serde(default)]
	pub tenant_repos: BTreeMap<String, Vec<String>>,

	/// Fields this version does not understand, carried across load/save.
	#[serde(flatten)]
	pub extra: BTreeMap<String, serde_yaml::Value>,
}
