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

use crate::locking::guard::{NamedLock, NamedLockGuard};
use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

static GLOBAL_REGISTRY: OnceLock<NamedLockRegistry> = OnceLock::new();

/// Hands out one exclusive lock per name, created on first request.
///
/// The map is guarded only while an entry is looked up or inserted; waiting
/// on a per-name lock happens after that guard is dropped, so unrelated
/// names never queue behind each other. Entries are never removed.
#[derive(Debug, Default)]
pub struct NamedLockRegistry {
    entries: Mutex<HashMap<String, Arc<NamedLock>>>,
}

impl NamedLockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry, created on first use.
    pub fn global() -> &'static NamedLockRegistry {
        GLOBAL_REGISTRY.get_or_init(NamedLockRegistry::new)
    }

    /// Block until the lock for `name` is available.
    ///
    /// Acquiring a name that the current thread already holds deadlocks.
    pub fn acquire(&self, name: &str) -> NamedLockGuard {
        let lock = self.entry(name);
        lock.lock();
        debug!("Acquired named lock '{name}'");
        NamedLockGuard::new(name, lock)
    }

    /// Take the lock for `name` only if nobody holds it right now.
    pub fn try_acquire(&self, name: &str) -> Option<NamedLockGuard> {
        let lock = self.entry(name);
        if lock.try_lock() {
            debug!("Acquired named lock '{name}' without waiting");
            Some(NamedLockGuard::new(name, lock))
        } else {
            None
        }
    }

    /// Run `body` while holding the lock for `name`.
    pub fn with_lock<R>(&self, name: &str, body: impl FnOnce() -> R) -> R {
        let _guard = self.acquire(name);
        body()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entry(&self, name: &str) -> Arc<NamedLock> {
        let mut entries = self.entries();
        if let Some(existing) = entries.get(name) {
            return Arc::clone(existing);
        }

        debug!("Creating named lock '{name}'");
        let lock = Arc::new(NamedLock::new());
        entries.insert(name.to_string(), Arc::clone(&lock));
        lock
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, Arc<NamedLock>>> {
        // A panic cannot leave the map half-updated: the only mutation is a single insert.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run `body` while holding `name` in the process-wide registry.
pub fn with_named_lock<R>(name: &str, body: impl FnOnce() -> R) -> R {
    NamedLockRegistry::global().with_lock(name, body)
}
