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

//! The music library facade.
//!
//! [`Library`] is the single entry point consumed by the CLI layer. It
//! wraps the song and playlist repositories, the membership store, and the
//! aggregation queries, validates input, and translates storage failures
//! into domain errors. Mutating membership operations return the
//! playlist's freshly computed totals so callers never hold a stale song
//! count or duration.
//!
//! Operations are synchronous request/response against a single database
//! connection. Concurrent mutation of the same playlist must be serialized
//! by the caller; the library provides no internal locking.

use std::path::Path;

use rusqlite::Connection;
use tracing::{debug, error};

use crate::db::{aggregate, membership, playlists, scan, songs};
use crate::error::{Error, Result};
use crate::model::{NewSong, Playlist, PlaylistSummary, PlaylistTotals, Song};

pub(crate) struct Library {
    conn: Connection,
}

impl Library {
    /// Wraps an open database connection.
    ///
    /// The connection is expected to come from [`crate::db::init_db`],
    /// which configures pragmas and creates the schema. It is released
    /// when the library is dropped.
    pub(crate) fn new(conn: Connection) -> Self {
        Self { conn }
    }

    // -- Songs

    pub(crate) fn all_songs(&self) -> Result<Vec<Song>> {
        songs::fetch_all_songs(&self.conn)
    }

    /// Fetches a song by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SongNotFound`] for an unknown id.
    pub(crate) fn song_by_id(&self, song_id: i64) -> Result<Song> {
        songs::fetch_song(&self.conn, song_id)?.ok_or(Error::SongNotFound(song_id))
    }

    /// Stores a new song and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NegativeDuration`] if the draft's duration is
    /// negative.
    pub(crate) fn create_song(&self, song: &NewSong) -> Result<Song> {
        if song.duration < 0 {
            return Err(Error::NegativeDuration);
        }

        let stored = songs::insert_song(&self.conn, song)
            .inspect_err(|e| error!(title = %song.title, error = %e, "Failed to create song"))?;
        debug!(song_id = stored.id, title = %stored.title, "Created song");

        Ok(stored)
    }

    /// Rewrites every stored field of an existing song.
    pub(crate) fn update_song(&self, song: &Song) -> Result<()> {
        if song.duration < 0 {
            return Err(Error::NegativeDuration);
        }

        songs::update_song(&self.conn, song)
            .inspect_err(|e| error!(song_id = song.id, error = %e, "Failed to update song"))
    }

    /// Deletes a song, removing it from every playlist it belongs to.
    pub(crate) fn delete_song(&self, song_id: i64) -> Result<()> {
        songs::delete_song(&self.conn, song_id)
            .inspect_err(|e| error!(song_id, error = %e, "Failed to delete song"))
    }

    pub(crate) fn search_songs(&self, query: &str) -> Result<Vec<Song>> {
        songs::search_songs(&self.conn, query)
    }

    pub(crate) fn songs_by_category(&self, category: &str) -> Result<Vec<Song>> {
        songs::fetch_songs_by_category(&self.conn, category)
    }

    /// Imports audio files under a directory as new songs.
    ///
    /// Returns the number of songs added; files already in the library are
    /// skipped.
    pub(crate) fn import_directory(&mut self, root: &Path) -> Result<i64> {
        let imported = scan::import_directory(&mut self.conn, root)
            .inspect_err(|e| error!(root = %root.display(), error = %e, "Import failed"))?;
        debug!(root = %root.display(), imported, "Imported directory");

        Ok(imported)
    }

    // -- Playlists

    /// Fetches all playlists, each with freshly computed totals.
    pub(crate) fn all_playlists(&self) -> Result<Vec<PlaylistSummary>> {
        playlists::fetch_all_playlists(&self.conn)?
            .into_iter()
            .map(|playlist| {
                let totals = aggregate::playlist_totals(&self.conn, playlist.id)?;
                Ok(PlaylistSummary { playlist, totals })
            })
            .collect()
    }

    /// Fetches one playlist with freshly computed totals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaylistNotFound`] for an unknown id.
    pub(crate) fn playlist_summary(&self, playlist_id: i64) -> Result<PlaylistSummary> {
        let playlist = self.require_playlist(playlist_id)?;
        let totals = aggregate::playlist_totals(&self.conn, playlist_id)?;

        Ok(PlaylistSummary { playlist, totals })
    }

    /// Creates a playlist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPlaylistName`] if the name is empty or
    /// whitespace.
    pub(crate) fn create_playlist(&self, name: &str) -> Result<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyPlaylistName);
        }

        let playlist = playlists::insert_playlist(&self.conn, name)
            .inspect_err(|e| error!(name, error = %e, "Failed to create playlist"))?;
        debug!(playlist_id = playlist.id, name, "Created playlist");

        Ok(playlist)
    }

    /// Renames a playlist.
    pub(crate) fn rename_playlist(&self, playlist_id: i64, name: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::EmptyPlaylistName);
        }

        playlists::rename_playlist(&self.conn, playlist_id, name)
            .inspect_err(|e| error!(playlist_id, error = %e, "Failed to rename playlist"))
    }

    /// Deletes a playlist and all of its membership entries.
    pub(crate) fn delete_playlist(&self, playlist_id: i64) -> Result<()> {
        playlists::delete_playlist(&self.conn, playlist_id)
            .inspect_err(|e| error!(playlist_id, error = %e, "Failed to delete playlist"))
    }

    // -- Membership and ordering

    /// Fetches the songs of a playlist in playback order.
    pub(crate) fn songs_in_playlist(&self, playlist_id: i64) -> Result<Vec<Song>> {
        membership::songs_in_playlist(&self.conn, playlist_id)
    }

    /// Appends a song to the end of a playlist and returns the playlist's
    /// updated totals.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaylistNotFound`] or [`Error::SongNotFound`] for
    /// unknown ids, and [`Error::DuplicateMembership`] if the song is
    /// already in the playlist.
    pub(crate) fn add_song_to_playlist(
        &self,
        playlist_id: i64,
        song_id: i64,
    ) -> Result<PlaylistTotals> {
        self.require_playlist(playlist_id)?;
        self.song_by_id(song_id)?;

        membership::add_song(&self.conn, playlist_id, song_id)
            .inspect_err(|e| error!(playlist_id, song_id, error = %e, "Failed to add song"))?;
        debug!(playlist_id, song_id, "Added song to playlist");

        aggregate::playlist_totals(&self.conn, playlist_id)
    }

    /// Removes a song from a playlist and returns the playlist's updated
    /// totals. Removing a song that is not in the playlist is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlaylistNotFound`] for an unknown playlist id.
    pub(crate) fn remove_song_from_playlist(
        &self,
        playlist_id: i64,
        song_id: i64,
    ) -> Result<PlaylistTotals> {
        self.require_playlist(playlist_id)?;

        membership::remove_song(&self.conn, playlist_id, song_id)
            .inspect_err(|e| error!(playlist_id, song_id, error = %e, "Failed to remove song"))?;
        debug!(playlist_id, song_id, "Removed song from playlist");

        aggregate::playlist_totals(&self.conn, playlist_id)
    }

    /// Moves a song one place earlier in a playlist. A no-op when the song
    /// is already first or is not in the playlist.
    pub(crate) fn move_song_up(&self, playlist_id: i64, song_id: i64) -> Result<()> {
        membership::move_song_up(&self.conn, playlist_id, song_id)
            .inspect_err(|e| error!(playlist_id, song_id, error = %e, "Failed to move song up"))
    }

    /// Moves a song one place later in a playlist. A no-op when the song
    /// is already last or is not in the playlist.
    pub(crate) fn move_song_down(&self, playlist_id: i64, song_id: i64) -> Result<()> {
        membership::move_song_down(&self.conn, playlist_id, song_id)
            .inspect_err(|e| error!(playlist_id, song_id, error = %e, "Failed to move song down"))
    }

    fn require_playlist(&self, playlist_id: i64) -> Result<Playlist> {
        playlists::fetch_playlist(&self.conn, playlist_id)?
            .ok_or(Error::PlaylistNotFound(playlist_id))
    }
}
