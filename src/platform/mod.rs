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

//! Process-level operations: filesystem copies, working directory handling
//! and external command execution.

pub mod file_ops;
pub mod process;
pub mod working_dir;

pub use file_ops::copy_path;
pub use process::{CallbackCommand, CommandRunner, ExternalCommand, Invokable, run_command};
pub use working_dir::{SavedWorkingDirectory, with_saved_cwd};
