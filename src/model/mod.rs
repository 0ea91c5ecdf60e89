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

//! Domain models and core data structures.
//!
//! This module defines the central entities of the application—Songs and
//! Playlists—representing the underlying data schema used for library
//! management.

use crate::util::format::format_duration;

/// A stored song. The id is assigned by the database on insert.
#[derive(Debug, Clone)]
pub struct Song {
    pub id: i64,
    pub title: String,
    pub artist: String,
    pub category: String,
    /// Duration in whole seconds.
    pub duration: i64,
    pub file_path: String,
}

impl Song {
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration)
    }
}

// Identity comparison only, two stored songs are the same song when their
// database ids match.
impl PartialEq for Song {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Song {}

/// A song that has not been stored yet and so has no id.
#[derive(Debug, Clone, Default)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub category: String,
    pub duration: i64,
    pub file_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    pub id: i64,
    pub name: String,
}

/// Derived per-playlist numbers, always recomputed from the membership
/// table rather than stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistTotals {
    pub song_count: i64,
    pub total_seconds: i64,
}

impl PlaylistTotals {
    /// Display string for the total running time, `"00:00"` when empty.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.total_seconds)
    }
}

/// A playlist together with its freshly computed totals.
#[derive(Debug, Clone)]
pub struct PlaylistSummary {
    pub playlist: Playlist,
    pub totals: PlaylistTotals,
}
