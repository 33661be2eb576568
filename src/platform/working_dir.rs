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

use crate::error::Result;
use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};

/// RAII guard that puts the process back in the directory it was created in.
///
/// The working directory is process-global. Two threads changing directories
/// under separate guards will race; serialize them with a
/// [`crate::locking::NamedLockRegistry`] name.
#[derive(Debug)]
pub struct SavedWorkingDirectory {
    saved: PathBuf,
    restored: bool,
}

impl SavedWorkingDirectory {
    pub fn capture() -> Result<Self> {
        let saved = env::current_dir()?;
        debug!("Saved working directory {}", saved.display());
        Ok(Self {
            saved,
            restored: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.saved
    }

    /// Restore now and report failure instead of logging it on drop.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        env::set_current_dir(&self.saved)?;
        debug!("Restored working directory {}", self.saved.display());
        Ok(())
    }
}

impl Drop for SavedWorkingDirectory {
    fn drop(&mut self) {
        if self.restored {
            return;
        }

        match env::set_current_dir(&self.saved) {
            Ok(()) => debug!("Restored working directory {}", self.saved.display()),
            Err(err) => warn!(
                "Failed to restore working directory {}: {err}",
                self.saved.display()
            ),
        }
    }
}

/// Run `body` and return to the current directory afterwards, even if it panics.
pub fn with_saved_cwd<R>(body: impl FnOnce() -> R) -> Result<R> {
    let saved = SavedWorkingDirectory::capture()?;
    let value = body();
    saved.restore()?;
    Ok(value)
}
