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

//! Playlist aggregation.
//!
//! Derives the song count and total duration of a playlist from its
//! current membership. The numbers are computed on demand every time
//! rather than maintained incrementally, so they cannot drift from the
//! membership table.

use rusqlite::Connection;

use crate::error::Result;
use crate::model::PlaylistTotals;

/// Computes the song count and total duration for a playlist.
///
/// Negative durations clamp to zero in the sum. An unknown playlist id
/// yields empty totals (count zero, duration `"00:00"`).
///
/// # Arguments
///
/// * `conn` - A reference to the SQLite connection.
/// * `playlist_id` - The playlist whose membership to total up.
///
/// # Errors
///
/// Returns an error if the SQL query fails.
pub(crate) fn playlist_totals(conn: &Connection, playlist_id: i64) -> Result<PlaylistTotals> {
    let sql = "SELECT COUNT(*), COALESCE(SUM(MAX(s.duration, 0)), 0)
               FROM songs s
               JOIN playlist_songs ps ON s.id = ps.song_id
               WHERE ps.playlist_id = ?";

    let mut stmt = conn.prepare_cached(sql)?;
    let totals = stmt.query_row([playlist_id], |row| {
        Ok(PlaylistTotals {
            song_count: row.get(0)?,
            total_seconds: row.get(1)?,
        })
    })?;

    Ok(totals)
}
