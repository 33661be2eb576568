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

//! In-process named locks.
//!
//! Callers serialize work on a shared resource (a repository checkout, a
//! target directory) by agreeing on a name for it. Holding different names
//! never blocks; holding the same name is exclusive.

pub mod guard;
pub mod registry;

pub use guard::NamedLockGuard;
pub use registry::{NamedLockRegistry, with_named_lock};
