// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Tenant-scoped credential routing for the candy-lfs client.
//!
//! Secrets live in the host's git credential helper, reached through the
//! conventional fill/approve/reject protocol. This crate derives a
//! (host, path, username) identity per (tenant, optional repository) scope —
//! the username is always the tenant id, which is what keeps tenants sharing
//! one LFS host isolated — and drives the helper verbs through it. Helper
//! failures degrade: retrieval reads as absent, store and erase become
//! no-ops.
//!
//! The configured LFS endpoint (and per-tenant repository lists) come from
//! [`candy_lfs_config::SettingsStore`].

pub mod error;
pub mod helper;
pub mod identity;
pub mod router;
pub mod secret;

pub use error::HelperError;
pub use helper::{GitRunner, HELPER_TIMEOUT};
pub use identity::{CredentialIdentity, FALLBACK_HOST};
pub use router::CredentialRouter;
pub use secret::{SecretString, REDACTED};
