// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated GILT_HOME plus a scratch workspace, removed when dropped
pub struct TestHomeGuard {
    root: TempDir,
}

impl TestHomeGuard {
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create test home directory");
        fs::create_dir_all(root.path().join(".gilt")).expect("Failed to create .gilt directory");
        fs::create_dir_all(root.path().join("work")).expect("Failed to create work directory");
        Self { root }
    }

    pub fn path(&self) -> &Path {
        self.root.path()
    }

    pub fn gilt_home(&self) -> PathBuf {
        self.root.path().join(".gilt")
    }

    pub fn work_dir(&self) -> PathBuf {
        self.root.path().join("work")
    }

    pub fn write_config(&self, contents: &str) -> &Self {
        fs::write(self.gilt_home().join("config.toml"), contents)
            .expect("Failed to write config.toml");
        self
    }

    /// A `gilt` invocation isolated from the user's configuration
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::Command::cargo_bin("gilt").expect("gilt binary");
        cmd.env("GILT_HOME", self.gilt_home())
            .env_remove("GILT_OUTPUT__COLOR")
            .env_remove("GILT_COMMAND__DEBUG")
            .env_remove("RUST_LOG");
        cmd
    }
}
