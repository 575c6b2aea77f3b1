// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write text to a file using a temporary sibling and rename.
/// Readers never observe a partially written file.
pub fn atomic_write(path: &Path, contents: &str) -> Result<()> {
    replace_file(path, contents, false)
}

/// Like [`atomic_write`], but the file is created owner-only (mode 0600
/// on Unix). Used for private key material.
pub fn atomic_write_secret(path: &Path, contents: &str) -> Result<()> {
    replace_file(path, contents, true)
}

fn replace_file(path: &Path, contents: &str, secret: bool) -> Result<()> {
    let temp_path = temp_sibling(path)?;

    if let Err(source) = write_and_sync(&temp_path, contents, secret) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::WriteFile {
            path: path.to_path_buf(),
            source,
        });
    }

    // Atomic rename (overwrites destination atomically)
    if let Err(source) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(Error::WriteFile {
            path: path.to_path_buf(),
            source,
        });
    }

    Ok(())
}

/// Temp path next to `path` with a random suffix. Same directory means
/// same filesystem, which the atomic rename requires.
fn temp_sibling(path: &Path) -> Result<PathBuf> {
    let file_name = path
        .file_name()
        .ok_or_else(|| Error::InvalidPath(path.to_path_buf()))?;

    let mut temp_name = file_name.to_os_string();
    temp_name.push(format!(".tmp-{:08x}", rand::random::<u32>()));
    Ok(path.with_file_name(temp_name))
}

fn write_and_sync(path: &Path, contents: &str, secret: bool) -> io::Result<()> {
    let mut file = open_new(path, secret)?;
    file.write_all(contents.as_bytes())?;
    // Flush to disk before the rename makes the file visible
    file.sync_all()
}

#[cfg(unix)]
fn open_new(path: &Path, secret: bool) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    if secret {
        options.mode(0o600);
    }
    options.open(path)
}

#[cfg(not(unix))]
fn open_new(path: &Path, _secret: bool) -> io::Result<File> {
    OpenOptions::new().write(true).create_new(true).open(path)
}
