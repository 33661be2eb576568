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

use crate::config::GiltConfig;
use crate::error::Result;
use crate::locking::NamedLockRegistry;
use crate::output::OutputSink;
use crate::platform::{CommandRunner, ExternalCommand, with_saved_cwd};
use log::{debug, info};
use std::env;
use std::path::Path;

/// Runs a program under a named lock, optionally from another directory.
pub struct ExecCommand<'a> {
    config: &'a GiltConfig,
    sink: &'a OutputSink,
    registry: &'a NamedLockRegistry,
}

impl<'a> ExecCommand<'a> {
    pub fn new(
        config: &'a GiltConfig,
        sink: &'a OutputSink,
        registry: &'a NamedLockRegistry,
    ) -> Result<Self> {
        Ok(Self {
            config,
            sink,
            registry,
        })
    }

    pub fn execute(
        &self,
        program: &str,
        args: &[String],
        dir: Option<&Path>,
        lock_name: Option<&str>,
        debug: bool,
    ) -> Result<()> {
        let command = ExternalCommand::new(program).args(args);
        let runner = CommandRunner::new(self.sink, debug || self.config.command.debug);
        let name = resolve_lock_name(program, dir, lock_name);

        info!("Running {command} under lock '{name}'");

        self.registry.with_lock(&name, || {
            with_saved_cwd(|| {
                if let Some(dir) = dir {
                    debug!("Entering {}", dir.display());
                    env::set_current_dir(dir)?;
                }
                runner.run(&command)
            })?
        })
    }
}

/// Explicit name first, then the target directory, then the program itself.
fn resolve_lock_name(program: &str, dir: Option<&Path>, lock_name: Option<&str>) -> String {
    match (lock_name, dir) {
        (Some(name), _) => name.to_string(),
        (None, Some(dir)) => dir.display().to_string(),
        (None, None) => program.to_string(),
    }
}
