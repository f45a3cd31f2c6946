// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Settings persistence for the candy-lfs client.
//!
//! This crate provides:
//! - The settings document persisted at `~/.candy-lfs/config.yaml`
//! - Endpoint defaults resolved from build-time constants and environment
//! - A read-modify-persist store for endpoints, the current tenant, and
//!   per-tenant repository bookkeeping
//!
//! Credential storage lives in `candy-lfs-credentials`, which reads the
//! configured LFS endpoint (and repository lists) from this crate's
//! [`SettingsStore`].

pub mod defaults;
pub mod document;
pub mod error;
pub mod paths;
pub mod store;

pub use defaults::EndpointDefaults;
pub use document::{SettingsDoc, TenantEntry};
pub use error::ConfigError;
pub use store::SettingsStore;
