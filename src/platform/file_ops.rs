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

//! File and directory copying.

use crate::error::Result;
use log::debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Copy a file or a directory tree from `src` to `dst`.
///
/// The parent of `dst` must already exist.
///
/// * Directory sources are copied recursively into a new directory at `dst`;
///   an existing `dst` is an `AlreadyExists` error. Symlinks are followed.
/// * Any other source is copied as a single file. If `dst` is an existing
///   directory the file lands inside it under its own name.
pub fn copy_path(src: &Path, dst: &Path) -> Result<()> {
    let metadata = fs::metadata(src)?;

    if metadata.is_dir() {
        debug!(
            "Copying directory tree {} -> {}",
            src.display(),
            dst.display()
        );
        copy_tree(src, dst)
    } else {
        copy_file(src, dst)
    }
}

fn copy_tree(src: &Path, dst: &Path) -> Result<()> {
    let source = fs::canonicalize(src)?;
    let destination = resolve_destination(dst)?;
    fs::create_dir(dst)?;

    let mut directories = vec![(dst.to_path_buf(), fs::metadata(&source)?.permissions())];

    // A destination inside the source is skipped so the walk never copies its own output.
    let walker = WalkDir::new(&source)
        .follow_links(true)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.path() != destination);

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(&source)
            .map_err(|err| io::Error::other(format!("{}: {err}", entry.path().display())))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
            directories.push((target, entry.metadata()?.permissions()));
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    // Deepest first, after all files are in, so read-only directories can still be filled.
    for (directory, permissions) in directories.into_iter().rev() {
        fs::set_permissions(&directory, permissions)?;
    }

    Ok(())
}

fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    let target = file_target(src, dst);
    let bytes = fs::copy(src, &target)?;
    debug!(
        "Copied {} -> {} ({bytes} bytes)",
        src.display(),
        target.display()
    );
    Ok(())
}

fn file_target(src: &Path, dst: &Path) -> PathBuf {
    match src.file_name() {
        Some(name) if dst.is_dir() => dst.join(name),
        _ => dst.to_path_buf(),
    }
}

/// Absolute, symlink-free form of `dst`, whose final component may not exist yet.
fn resolve_destination(dst: &Path) -> Result<PathBuf> {
    let resolved = match (dst.parent(), dst.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            fs::canonicalize(parent)?.join(name)
        }
        (_, Some(name)) => std::env::current_dir()?.join(name),
        _ => fs::canonicalize(dst)?,
    };
    Ok(resolved)
}
