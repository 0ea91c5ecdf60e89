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

//! Playlist repository.
//!
//! CRUD operations for rows of the `playlists` table. Membership and
//! ordering live in [`crate::db::membership`]; song counts and durations
//! are derived on demand by [`crate::db::aggregate`] and never stored here.

use rusqlite::{Connection, params};

use crate::error::{Error, Result};
use crate::model::Playlist;

/// Fetches all playlists, sorted by name.
///
/// # Arguments
///
/// * `conn` - A reference to the SQLite connection.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Playlist`] struct.
pub(crate) fn fetch_all_playlists(conn: &Connection) -> Result<Vec<Playlist>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM playlists ORDER BY name")?;
    let results = stmt
        .query_map([], Playlist::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches a single playlist by id, `None` if no such row exists.
pub(crate) fn fetch_playlist(conn: &Connection, playlist_id: i64) -> Result<Option<Playlist>> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM playlists WHERE id = ?")?;
    let mut rows = stmt.query_map([playlist_id], Playlist::from_row)?;

    rows.next().transpose().map_err(Error::from)
}

/// Inserts a new playlist and returns it with its generated id.
pub(crate) fn insert_playlist(conn: &Connection, name: &str) -> Result<Playlist> {
    let mut stmt = conn.prepare_cached("INSERT INTO playlists (name) VALUES (?)")?;
    stmt.execute([name])?;

    Ok(Playlist {
        id: conn.last_insert_rowid(),
        name: name.to_string(),
    })
}

/// Renames an existing playlist.
///
/// # Errors
///
/// Returns [`Error::PlaylistNotFound`] if no row has the given id.
pub(crate) fn rename_playlist(conn: &Connection, playlist_id: i64, name: &str) -> Result<()> {
    let mut stmt = conn.prepare_cached("UPDATE playlists SET name = ? WHERE id = ?")?;
    let updated = stmt.execute(params![name, playlist_id])?;

    if updated == 0 {
        return Err(Error::PlaylistNotFound(playlist_id));
    }

    Ok(())
}

/// Deletes a playlist.
///
/// All of its membership rows are removed by the `ON DELETE CASCADE`
/// constraint on `playlist_songs`. The member songs themselves are
/// untouched.
///
/// # Errors
///
/// Returns [`Error::PlaylistNotFound`] if no row has the given id.
pub(crate) fn delete_playlist(conn: &Connection, playlist_id: i64) -> Result<()> {
    let mut stmt = conn.prepare_cached("DELETE FROM playlists WHERE id = ?")?;
    let deleted = stmt.execute([playlist_id])?;

    if deleted == 0 {
        return Err(Error::PlaylistNotFound(playlist_id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_db;

    #[test]
    fn insert_assigns_an_id() {
        let conn = open_memory_db();

        let playlist = insert_playlist(&conn, "Road Trip").unwrap();
        assert!(playlist.id > 0);
        assert_eq!(playlist.name, "Road Trip");
    }

    #[test]
    fn fetch_all_is_sorted_by_name() {
        let conn = open_memory_db();

        insert_playlist(&conn, "Workout").unwrap();
        insert_playlist(&conn, "Chill").unwrap();

        let playlists = fetch_all_playlists(&conn).unwrap();
        let names: Vec<&str> = playlists.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Chill", "Workout"]);
    }

    #[test]
    fn rename_changes_the_stored_name() {
        let conn = open_memory_db();

        let playlist = insert_playlist(&conn, "Untitled").unwrap();
        rename_playlist(&conn, playlist.id, "Evening").unwrap();

        let stored = fetch_playlist(&conn, playlist.id).unwrap().unwrap();
        assert_eq!(stored.name, "Evening");
    }

    #[test]
    fn rename_unknown_playlist_is_not_found() {
        let conn = open_memory_db();

        assert!(matches!(
            rename_playlist(&conn, 42, "Nope"),
            Err(Error::PlaylistNotFound(42))
        ));
    }

    #[test]
    fn delete_removes_the_row() {
        let conn = open_memory_db();

        let playlist = insert_playlist(&conn, "Short Lived").unwrap();
        delete_playlist(&conn, playlist.id).unwrap();

        assert!(fetch_playlist(&conn, playlist.id).unwrap().is_none());
        assert!(matches!(
            delete_playlist(&conn, playlist.id),
            Err(Error::PlaylistNotFound(_))
        ));
    }
}
