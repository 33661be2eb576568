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

use crate::error::GiltError;
use std::fmt;
use std::io::ErrorKind;

pub struct ErrorContext<'a> {
    pub error: &'a GiltError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a GiltError) -> Self {
        let (suggestion, details) = match error {
            GiltError::CommandSpawn { command, source } => {
                let suggestion = match source.kind() {
                    ErrorKind::NotFound => Some(format!(
                        "Ensure '{}' is installed and available in your PATH.",
                        program_name(command)
                    )),
                    ErrorKind::PermissionDenied => {
                        Some("Check that the program is executable.".to_string())
                    }
                    _ => None,
                };
                let details = Some(format!("Spawn failed: {source}"));
                (suggestion, details)
            }
            GiltError::CommandFailed { code: None, .. } => {
                let details = Some("The command was terminated by a signal.".to_string());
                (None, details)
            }
            GiltError::ConfigError(msg) => {
                let suggestion = Some(
                    "Check config.toml in your gilt home and any GILT_* environment variables \
                     (nested keys use '__', e.g. GILT_OUTPUT__COLOR=never)."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            GiltError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    ErrorKind::PermissionDenied => {
                        Some("Check file and directory permissions.".to_string())
                    }
                    ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    ErrorKind::AlreadyExists => Some(
                        "Directory copies require a destination that does not exist yet."
                            .to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            GiltError::WalkDir(walk_err) => {
                let details = walk_err
                    .path()
                    .map(|path| format!("While traversing {}", path.display()));
                (None, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

fn program_name(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or(command)
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}
