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

use log::trace;
use std::fmt;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// Exclusive lock shared by every holder of the same name.
///
/// Ownership is tracked as a flag behind a `Mutex` rather than by a
/// `MutexGuard`, so a guard can own its lock through an `Arc` without
/// borrowing from the registry.
#[derive(Debug, Default)]
pub(crate) struct NamedLock {
    held: Mutex<bool>,
    released: Condvar,
}

impl NamedLock {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Block until the lock is free, then take it.
    pub(crate) fn lock(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        while *held {
            held = self
                .released
                .wait(held)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *held = true;
    }

    pub(crate) fn try_lock(&self) -> bool {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        if *held {
            false
        } else {
            *held = true;
            true
        }
    }

    fn unlock(&self) {
        let mut held = self.held.lock().unwrap_or_else(PoisonError::into_inner);
        *held = false;
        drop(held);
        self.released.notify_one();
    }
}

/// RAII guard that releases a named lock when dropped.
pub struct NamedLockGuard {
    name: String,
    lock: Option<Arc<NamedLock>>,
}

impl NamedLockGuard {
    /// Wraps a lock the caller has already taken.
    pub(crate) fn new(name: &str, lock: Arc<NamedLock>) -> Self {
        Self {
            name: name.to_string(),
            lock: Some(lock),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Release the lock before the guard goes out of scope.
    pub fn release(mut self) {
        self.unlock();
    }

    fn unlock(&mut self) {
        if let Some(lock) = self.lock.take() {
            lock.unlock();
            trace!("Released named lock '{}'", self.name);
        }
    }
}

impl Drop for NamedLockGuard {
    fn drop(&mut self) {
        self.unlock();
    }
}

impl fmt::Debug for NamedLockGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedLockGuard")
            .field("name", &self.name)
            .field("held", &self.lock.is_some())
            .finish()
    }
}
