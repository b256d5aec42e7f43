//!
//! # Test Common Utilities
//!
//! Shared setup for the `tagvault` CLI integration tests: an isolated store root, a user
//! directory with files to tag, and a pre-configured command builder.
//!
//
// // # 测试通用工具
// //
// // 为 `tagvault` CLI 集成测试提供共享的准备工作：隔离的存储目录、
// // 含有待标记文件的用户目录，以及预先配置好的命令构建器。
// //
#![allow(dead_code)]

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

/// Context for a single test. Both directories are removed when it goes out of scope.
pub struct TestContext {
    /// Held for its Drop behavior.
    pub _temp_dir: TempDir,
    pub store_path: PathBuf,
    pub user_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempdir()?;
        let store_path = temp_dir.path().join("store");
        let user_dir = temp_dir.path().join("files");
        fs::create_dir_all(&user_dir)?;
        Ok(TestContext {
            _temp_dir: temp_dir,
            store_path,
            user_dir,
        })
    }

    /// Creates a file below the user directory.
    pub fn create_file(&self, relative: &str, content: &str) -> anyhow::Result<PathBuf> {
        let path = self.user_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)?;
        Ok(path)
    }

    /// A `tagvault` command pointed at this context's store.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_tagvault"));
        cmd.env_remove("TAGVAULT_HOME")
            .env("TAGVAULT_LOG", "off")
            .arg("--store")
            .arg(&self.store_path);
        cmd
    }

    /// Runs one command to completion and asserts it succeeded.
    pub fn run_ok(&self, args: &[&str]) -> anyhow::Result<String> {
        let output = self.cmd().args(args).assert().success().get_output().stdout.clone();
        Ok(String::from_utf8(output)?)
    }
}

pub fn arg(path: &Path) -> &str {
    path.to_str().unwrap()
}
