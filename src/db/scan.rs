// Copyright (C) 2026  Caprica Software Limited
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Library import from the filesystem.
//!
//! This module discovers audio files under a directory and creates song
//! rows from their embedded tags. It utilizes `WalkDir` for directory
//! traversal and `Lofty` for metadata extraction.
//!
//! Unlike a full catalog rebuild, an import is additive: files whose path
//! is already in the library are skipped, so re-running an import over the
//! same directory is harmless.
//!
//! # Performance
//!
//! Imports run inside a single SQLite transaction to maximize write
//! throughput and ensure the library is updated atomically.

use lofty::prelude::*;
use lofty::probe::Probe;
use rusqlite::{Connection, params};
use std::path::Path;
use tracing::warn;
use walkdir::WalkDir;

use crate::error::Result;

const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "ogg", "m4a", "wav"];

/// Recursively scans a directory for audio files and imports new ones as
/// songs.
///
/// Metadata is extracted from file tags: title (falling back to the file
/// name), artist, genre (stored as the song's category), and duration.
/// Files already present in the library, unreadable files, and files
/// without tags are skipped.
///
/// # Arguments
///
/// * `conn` - A mutable reference to the SQLite database connection.
/// * `root` - The directory containing the music files.
///
/// # Returns
///
/// Returns the number of songs imported.
///
/// # Errors
///
/// Returns an error if the transaction fails or if an insert violates a
/// database constraint.
pub(crate) fn import_directory(conn: &mut Connection, root: &Path) -> Result<i64> {
    let tx = conn.transaction()?;
    let mut imported = 0;

    for entry in WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| {
            e.path().extension().is_some_and(|ext| {
                AUDIO_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
        })
    {
        let path = entry.path();

        let Some(file_path) = path.to_str() else {
            warn!(path = %path.display(), "Skipping file with non-UTF-8 path");
            continue;
        };

        let already_known: bool = tx.query_row(
            "SELECT EXISTS(SELECT 1 FROM songs WHERE file_path = ?)",
            [file_path],
            |row| row.get(0),
        )?;
        if already_known {
            continue;
        }

        let tagged_file = match Probe::open(path).and_then(|p| p.read()) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Skipping unreadable file");
                continue;
            }
        };

        let tag = tagged_file.primary_tag().or_else(|| tagged_file.first_tag());

        let title = tag
            .and_then(|t| t.title())
            .map(|t| t.to_string())
            .unwrap_or_else(|| {
                path.file_stem()
                    .map(|s| s.to_string_lossy().to_string())
                    .unwrap_or_default()
            });
        let artist = tag
            .and_then(|t| t.artist())
            .unwrap_or_else(|| "Unknown Artist".into())
            .to_string();
        let category = tag
            .and_then(|t| t.genre())
            .map(|g| g.to_string())
            .unwrap_or_default();
        let duration = i64::try_from(tagged_file.properties().duration().as_secs()).unwrap_or(0);

        tx.execute(
            "INSERT INTO songs (title, artist, category, duration, file_path)
             VALUES (?, ?, ?, ?, ?)",
            params![title, artist, category, duration, file_path],
        )?;

        imported += 1;
    }

    tx.commit()?;

    Ok(imported)
}
