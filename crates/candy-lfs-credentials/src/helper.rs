// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Time-bounded invocation of the git binary.
//!
//! Every call is a single attempt bounded by a short timeout so an
//! unresponsive or interactively-prompting helper cannot hang the client.
//! A timed-out child is killed rather than left behind.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::error::HelperError;

/// Default bound on a single helper invocation.
pub const HELPER_TIMEOUT: Duration = Duration::from_secs(5);

/// Runs git subcommands with piped stdio under a fixed timeout.
///
/// The program defaults to `git` from `PATH`; tests point it at stub
/// executables instead.
#[derive(Debug, Clone)]
pub struct GitRunner {
	program: PathBuf,
	timeout: Duration,
}

impl GitRunner {
	pub fn new() -> Self {
		Self {
			program: PathBuf::from("git"),
			timeout: HELPER_TIMEOUT,
		}
	}

	/// Use an explicit program instead of `git` from `PATH`.
	pub fn with_program(program: impl Into<PathBuf>) -> Self {
		Self {
			program: program.into(),
			timeout: HELPER_TIMEOUT,
		}
	}

	/// Override the invocation timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	/// Run `args`, optionally feeding `stdin` to the child, and return the
	/// captured stdout on a zero exit.
	pub(crate) async fn run(
		&self,
		args: &[&str],
		stdin: Option<&str>,
	) -> Result<String, HelperError> {
		let mut cmd = Command::new(&self.program);
		cmd
			.args(args)
			.stdin(if stdin.is_some() {
				Stdio::piped()
			} else {
				Stdio::null()
			})
			.stdout(Stdio::piped())
			.stderr(Stdio::piped())
			.kill_on_drop(true);

		trace!(
			program = %self.program.display(),
			args = %args.join(" "),
			"running git command"
		);

		let mut child = cmd.spawn().map_err(HelperError::Launch)?;
		let pipe = child.stdin.take();

		// The write is inside the timeout too: a helper that never reads
		// stdin would otherwise block write_all forever once the request
		// outgrows the pipe buffer.
		let invocation = async {
			if let Some(input) = stdin {
				if let Some(mut pipe) = pipe {
					// A helper that exits before reading closes the pipe; the
					// exit status below is the interesting outcome then.
					if let Err(e) = pipe.write_all(input.as_bytes()).await {
						debug!(error = %e, "failed to write helper request");
					}
				}
			}
			child.wait_with_output().await
		};

		let output = match tokio::time::timeout(self.timeout, invocation).await {
			Ok(result) => result.map_err(HelperError::Launch)?,
			Err(_) => {
				warn!(
					program = %self.program.display(),
					timeout = ?self.timeout,
					"credential helper invocation timed out"
				);
				return Err(HelperError::Timeout);
			}
		};

		if output.status.success() {
			Ok(String::from_utf8_lossy(&output.stdout).to_string())
		} else {
			Err(HelperError::NonZeroExit {
				code: output.status.code(),
				stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
			})
		}
	}
}

impl Default for GitRunner {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
	use super::*;
	use std::fs;
	use std::os::unix::fs::PermissionsExt;
	use std::path::Path;
	use tempfile::TempDir;

	fn write_stub(dir: &Path, body: &str) -> PathBuf {
		let path = dir.join("stub-git");
		fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
		fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
		path
	}

	/// Test: stdout of a zero-exit child is returned as-is.
	#[tokio::test]
	async fn test_run_captures_stdout() {
		let dir = TempDir::new().unwrap();
		let stub = write_stub(dir.path(), "echo hello");
		let runner = GitRunner::with_program(stub);

		let out = runner.run(&["anything"], None).await.unwrap();
		assert_eq!(out.trim(), "hello");
	}

	/// Test: a non-zero exit maps to HelperError::NonZeroExit with the
	/// child's stderr attached.
	#[tokio::test]
	async fn test_run_nonzero_exit() {
		let dir = TempDir::new().unwrap();
		let stub = write_stub(dir.path(), "echo boom >&2; exit 3");
		let runner = GitRunner::with_program(stub);

		let err = runner.run(&["anything"], None).await.unwrap_err();
		match err {
			HelperError::NonZeroExit { code, stderr } => {
				assert_eq!(code, Some(3));
				assert_eq!(stderr, "boom");
			}
			other => panic!("expected NonZeroExit, got {other:?}"),
		}
	}

	/// Test: a missing program maps to HelperError::Launch.
	#[tokio::test]
	async fn test_run_launch_failure() {
		let runner = GitRunner::with_program("/nonexistent/candy-lfs-no-such-git");
		let err = runner.run(&["anything"], None).await.unwrap_err();
		assert!(matches!(err, HelperError::Launch(_)));
	}

	/// Test: a child that outlives the timeout maps to HelperError::Timeout.
	///
	/// Why this test is important: helpers can prompt interactively and
	/// never return; the bound is what keeps every operation from hanging.
	#[tokio::test]
	async fn test_run_timeout() {
		let dir = TempDir::new().unwrap();
		let stub = write_stub(dir.path(), "sleep 5");
		let runner = GitRunner::with_program(stub).timeout(Duration::from_millis(100));

		let err = runner.run(&["anything"], None).await.unwrap_err();
		assert!(matches!(err, HelperError::Timeout));
	}

	/// Test: the timeout also bounds the stdin-write phase.
	///
	/// Why this test is important: a helper that never reads stdin leaves
	/// write_all blocked once the request exceeds the OS pipe buffer. The
	/// bound must cover the whole invocation, not just the wait for exit,
	/// or a long token could hang the client.
	#[tokio::test]
	async fn test_run_timeout_covers_stdin_write() {
		let dir = TempDir::new().unwrap();
		let stub = write_stub(dir.path(), "sleep 30");
		let runner = GitRunner::with_program(stub).timeout(Duration::from_millis(200));

		// Well past any pipe buffer size.
		let request = "x".repeat(1024 * 1024);
		let started = std::time::Instant::now();
		let err = runner.run(&["anything"], Some(&request)).await.unwrap_err();

		assert!(matches!(err, HelperError::Timeout));
		assert!(started.elapsed() < Duration::from_secs(3));
	}

	/// Test: stdin is delivered to the child before the exit status is
	/// collected.
	#[tokio::test]
	async fn test_run_feeds_stdin() {
		let dir = TempDir::new().unwrap();
		let stub = write_stub(dir.path(), "cat");
		let runner = GitRunner::with_program(stub);

		let out = runner
			.run(&["anything"], Some("host=example.com\n\n"))
			.await
			.unwrap();
		assert_eq!(out, "host=example.com\n\n");
	}
}
