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
use crate::output::OutputSink;
use crate::platform::copy_path;
use log::info;
use std::path::Path;

pub struct CopyCommand<'a> {
    sink: &'a OutputSink,
}

impl<'a> CopyCommand<'a> {
    pub fn new(sink: &'a OutputSink) -> Result<Self> {
        Ok(Self { sink })
    }

    pub fn execute(&self, source: &Path, destination: &Path) -> Result<()> {
        info!(
            "Copying {} to {}",
            source.display(),
            destination.display()
        );

        copy_path(source, destination)?;

        self.sink.write_line(&format!(
            "Copied {} -> {}",
            source.display(),
            destination.display()
        ))
    }
}
