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

//! External command execution with optional tracing.

use crate::error::{GiltError, Result};
use crate::output::OutputSink;
use log::debug;
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::process::Command;

/// Something that can be run and described for diagnostics.
pub trait Invokable {
    /// Human readable form, printed when tracing is enabled.
    fn describe(&self) -> String;

    fn invoke(&self) -> Result<()>;
}

/// A program and its arguments, run in the current working directory with
/// inherited stdio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }
}

impl Invokable for ExternalCommand {
    fn describe(&self) -> String {
        let words: Vec<String> = std::iter::once(&self.program)
            .chain(&self.args)
            .map(|word| word.to_string_lossy().into_owned())
            .collect();
        shell_words::join(words)
    }

    fn invoke(&self) -> Result<()> {
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| GiltError::CommandSpawn {
                command: self.describe(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(GiltError::CommandFailed {
                command: self.describe(),
                code: status.code(),
            })
        }
    }
}

impl fmt::Display for ExternalCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// In-process work presented as a command.
pub struct CallbackCommand<F> {
    description: String,
    callback: F,
}

impl<F> CallbackCommand<F>
where
    F: Fn() -> Result<()>,
{
    pub fn new(description: impl Into<String>, callback: F) -> Self {
        Self {
            description: description.into(),
            callback,
        }
    }
}

impl<F> Invokable for CallbackCommand<F>
where
    F: Fn() -> Result<()>,
{
    fn describe(&self) -> String {
        self.description.clone()
    }

    fn invoke(&self) -> Result<()> {
        (self.callback)()
    }
}

/// Runs commands, writing the working directory and command line as warnings
/// first when `debug` is set. Errors from the command are returned as-is.
pub struct CommandRunner<'a> {
    sink: &'a OutputSink,
    debug: bool,
}

impl<'a> CommandRunner<'a> {
    pub fn new(sink: &'a OutputSink, debug: bool) -> Self {
        Self { sink, debug }
    }

    pub fn run(&self, command: &dyn Invokable) -> Result<()> {
        if self.debug {
            self.trace(command)?;
        }

        debug!("Invoking {}", command.describe());
        command.invoke()
    }

    fn trace(&self, command: &dyn Invokable) -> Result<()> {
        let cwd = env::current_dir()?;
        self.sink.write_warn(&format!("  PWD: {}", cwd.display()))?;
        self.sink
            .write_warn(&format!("  COMMAND: {}", command.describe()))
    }
}

pub fn run_command(sink: &OutputSink, command: &dyn Invokable, debug: bool) -> Result<()> {
    CommandRunner::new(sink, debug).run(command)
}
