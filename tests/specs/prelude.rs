// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scratch workspace and fluent assertions over a
//! finished `loudq` invocation.

use std::path::{Path, PathBuf};
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// `loudq` with a clean environment, run from the current directory.
pub fn cli() -> Spec {
    Spec::new(None)
}

/// Temporary directory holding `in/`, a config file and run artifacts.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn empty() -> Self {
        let ws = Self { dir: tempfile::tempdir().unwrap() };
        std::fs::create_dir_all(ws.input()).unwrap();
        ws
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn input(&self) -> PathBuf {
        self.path().join("in")
    }

    pub fn output(&self) -> PathBuf {
        self.path().join("out")
    }

    pub fn error_log(&self) -> PathBuf {
        self.path().join("failed_jobs.txt")
    }

    /// Write a file relative to the workspace root.
    pub fn file(&self, rel: &str, contents: &str) -> &Self {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, contents).unwrap();
        self
    }

    pub fn read(&self, rel: &str) -> String {
        std::fs::read_to_string(self.path().join(rel)).unwrap()
    }

    /// Point `config.ini` at `program`.
    pub fn config(&self, program: &Path) -> &Self {
        self.file("config.ini", &format!("ffmpeg_path={}\n", program.display()))
    }

    /// Install a stand-in transform that copies its input to its output and
    /// fails for any source whose name contains `bad`.
    #[cfg(unix)]
    pub fn fake_ffmpeg(&self) -> &Self {
        use std::os::unix::fs::PermissionsExt;

        let script = self.path().join("fake-ffmpeg.sh");
        std::fs::write(
            &script,
            r#"#!/bin/sh
src=""
prev=""
for a in "$@"; do
  if [ "$prev" = "-i" ]; then src="$a"; fi
  prev="$a"
  dst="$a"
done
case "$src" in
  *bad*) exit 1 ;;
esac
cp "$src" "$dst"
"#,
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        self.config(&script)
    }

    /// `loudq` run from the workspace root.
    pub fn loudq(&self) -> Spec {
        Spec::new(Some(self.path()))
    }

    /// `loudq in out` with `extra` appended.
    pub fn run(&self, extra: &[&str]) -> Spec {
        let input = self.input();
        let output = self.output();
        let mut args = vec![input.to_str().unwrap(), output.to_str().unwrap()];
        args.extend_from_slice(extra);
        self.loudq().args(&args)
    }
}

pub struct Spec {
    cmd: Command,
}

impl Spec {
    fn new(dir: Option<&Path>) -> Self {
        let mut cmd = Command::cargo_bin("loudq").unwrap();
        cmd.env_remove("LOUDQ_CONFIG")
            .env_remove("LOUDQ_LOG")
            .env_remove("LOUDQ_LOG_FILE")
            .env_remove("COLOR")
            .env("NO_COLOR", "1");
        if let Some(dir) = dir {
            cmd.current_dir(dir);
        }
        Self { cmd }
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.cmd.env(key, value);
        self
    }

    /// Run and expect exit status 0.
    pub fn passes(mut self) -> Ran {
        let output = self.cmd.output().unwrap();
        let ran = Ran { output };
        assert!(ran.output.status.success(), "expected success\n{}", ran.describe());
        ran
    }

    /// Run and expect exit status 1.
    pub fn fails(mut self) -> Ran {
        let output = self.cmd.output().unwrap();
        let ran = Ran { output };
        assert_eq!(ran.output.status.code(), Some(1), "expected exit 1\n{}", ran.describe());
        ran
    }
}

pub struct Ran {
    output: Output,
}

impl Ran {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    pub fn stdout_has(self, needle: &str) -> Self {
        assert!(self.stdout().contains(needle), "stdout missing {needle:?}\n{}", self.describe());
        self
    }

    pub fn stdout_lacks(self, needle: &str) -> Self {
        assert!(!self.stdout().contains(needle), "stdout has {needle:?}\n{}", self.describe());
        self
    }

    pub fn stderr_has(self, needle: &str) -> Self {
        assert!(self.stderr().contains(needle), "stderr missing {needle:?}\n{}", self.describe());
        self
    }

    fn describe(&self) -> String {
        format!("--- stdout ---\n{}\n--- stderr ---\n{}", self.stdout(), self.stderr())
    }
}
