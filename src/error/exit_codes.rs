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

pub fn get_exit_code(error: &GiltError) -> i32 {
    match error {
        GiltError::ConfigError(_) => 2,

        GiltError::CommandSpawn { .. } => 126, // Standard "cannot execute" exit code

        // Mirror the child's own status so wrappers stay transparent
        GiltError::CommandFailed {
            code: Some(code), ..
        } if *code != 0 => *code,

        _ => 1,
    }
}
