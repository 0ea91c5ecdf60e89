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

//! Library error taxonomy.
//!
//! All data-access and library operations return [`Result`]. Storage-level
//! failures are wrapped rather than swallowed so callers decide how to
//! surface them.

use thiserror::Error;

pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub(crate) enum Error {
    #[error("No playlist with id {0}")]
    PlaylistNotFound(i64),

    #[error("No song with id {0}")]
    SongNotFound(i64),

    #[error("Song {song_id} is already in playlist {playlist_id}")]
    DuplicateMembership { playlist_id: i64, song_id: i64 },

    #[error("Playlist name must not be empty")]
    EmptyPlaylistName,

    #[error("Song duration must not be negative")]
    NegativeDuration,

    #[error("Database error: {0}")]
    Storage(#[from] rusqlite::Error),
}
