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

//! Song repository.
//!
//! CRUD operations for rows of the `songs` table. Durations are stored as
//! whole seconds; any formatted source value is converted before it gets
//! here.

use rusqlite::{Connection, params};

use crate::error::{Error, Result};
use crate::model::{NewSong, Song};

const SONG_COLUMNS: &str = "id, title, artist, category, duration, file_path";

/// Fetches all songs from the database, sorted by title.
///
/// # Arguments
///
/// * `conn` - A reference to the SQLite connection.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Song`] struct.
pub(crate) fn fetch_all_songs(conn: &Connection) -> Result<Vec<Song>> {
    let sql = format!("SELECT {SONG_COLUMNS} FROM songs ORDER BY title");

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([], Song::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches a single song by id, `None` if no such row exists.
pub(crate) fn fetch_song(conn: &Connection, song_id: i64) -> Result<Option<Song>> {
    let sql = format!("SELECT {SONG_COLUMNS} FROM songs WHERE id = ?");

    let mut stmt = conn.prepare_cached(&sql)?;
    let mut rows = stmt.query_map([song_id], Song::from_row)?;

    rows.next().transpose().map_err(Error::from)
}

/// Inserts a new song and returns the stored row with its generated id.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub(crate) fn insert_song(conn: &Connection, song: &NewSong) -> Result<Song> {
    let sql = "INSERT INTO songs (title, artist, category, duration, file_path)
               VALUES (?, ?, ?, ?, ?)";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![
        song.title,
        song.artist,
        song.category,
        song.duration,
        song.file_path
    ])?;

    Ok(Song {
        id: conn.last_insert_rowid(),
        title: song.title.clone(),
        artist: song.artist.clone(),
        category: song.category.clone(),
        duration: song.duration,
        file_path: song.file_path.clone(),
    })
}

/// Updates every stored field of an existing song.
///
/// # Errors
///
/// Returns [`Error::SongNotFound`] if no row has the song's id.
pub(crate) fn update_song(conn: &Connection, song: &Song) -> Result<()> {
    let sql = "UPDATE songs SET title = ?, artist = ?, category = ?, duration = ?, file_path = ?
               WHERE id = ?";

    let mut stmt = conn.prepare_cached(sql)?;
    let updated = stmt.execute(params![
        song.title,
        song.artist,
        song.category,
        song.duration,
        song.file_path,
        song.id
    ])?;

    if updated == 0 {
        return Err(Error::SongNotFound(song.id));
    }

    Ok(())
}

/// Deletes a song.
///
/// Membership rows referencing the song are removed from every playlist by
/// the `ON DELETE CASCADE` constraint on `playlist_songs`.
///
/// # Errors
///
/// Returns [`Error::SongNotFound`] if no row has the given id.
pub(crate) fn delete_song(conn: &Connection, song_id: i64) -> Result<()> {
    let mut stmt = conn.prepare_cached("DELETE FROM songs WHERE id = ?")?;
    let deleted = stmt.execute([song_id])?;

    if deleted == 0 {
        return Err(Error::SongNotFound(song_id));
    }

    Ok(())
}

/// Searches for songs whose title or artist contains the query, sorted by
/// title.
pub(crate) fn search_songs(conn: &Connection, query: &str) -> Result<Vec<Song>> {
    let sql = format!(
        "SELECT {SONG_COLUMNS} FROM songs
         WHERE title LIKE ? OR artist LIKE ?
         ORDER BY title"
    );

    let pattern = format!("%{}%", query);

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map(params![pattern, pattern], Song::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches all songs in a category, sorted by title.
pub(crate) fn fetch_songs_by_category(conn: &Connection, category: &str) -> Result<Vec<Song>> {
    let sql = format!(
        "SELECT {SONG_COLUMNS} FROM songs
         WHERE category = ?
         ORDER BY title"
    );

    let mut stmt = conn.prepare_cached(&sql)?;
    let results = stmt
        .query_map([category], Song::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_db;

    fn sample_song(title: &str, artist: &str) -> NewSong {
        NewSong {
            title: title.to_string(),
            artist: artist.to_string(),
            category: "Rock".to_string(),
            duration: 180,
            file_path: format!("/music/{title}.mp3"),
        }
    }

    #[test]
    fn insert_assigns_distinct_ids() {
        let conn = open_memory_db();

        let a = insert_song(&conn, &sample_song("One", "A")).unwrap();
        let b = insert_song(&conn, &sample_song("Two", "B")).unwrap();

        assert!(a.id > 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn fetch_all_is_sorted_by_title() {
        let conn = open_memory_db();

        insert_song(&conn, &sample_song("Zebra", "A")).unwrap();
        insert_song(&conn, &sample_song("Alpha", "B")).unwrap();

        let songs = fetch_all_songs(&conn).unwrap();
        let titles: Vec<&str> = songs.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Zebra"]);
    }

    #[test]
    fn update_rewrites_all_fields() {
        let conn = open_memory_db();

        let mut song = insert_song(&conn, &sample_song("Draft", "A")).unwrap();
        song.title = "Final".to_string();
        song.duration = 245;
        update_song(&conn, &song).unwrap();

        let stored = fetch_song(&conn, song.id).unwrap().unwrap();
        assert_eq!(stored.title, "Final");
        assert_eq!(stored.duration, 245);
    }

    #[test]
    fn update_unknown_song_is_not_found() {
        let conn = open_memory_db();

        let song = Song {
            id: 999,
            title: "Ghost".to_string(),
            artist: "Nobody".to_string(),
            category: String::new(),
            duration: 0,
            file_path: String::new(),
        };

        assert!(matches!(
            update_song(&conn, &song),
            Err(Error::SongNotFound(999))
        ));
    }

    #[test]
    fn delete_removes_the_row() {
        let conn = open_memory_db();

        let song = insert_song(&conn, &sample_song("Gone", "A")).unwrap();
        delete_song(&conn, song.id).unwrap();

        assert!(fetch_song(&conn, song.id).unwrap().is_none());
        assert!(matches!(
            delete_song(&conn, song.id),
            Err(Error::SongNotFound(_))
        ));
    }

    #[test]
    fn search_matches_title_and_artist() {
        let conn = open_memory_db();

        insert_song(&conn, &sample_song("Harvest Moon", "Neil Young")).unwrap();
        insert_song(&conn, &sample_song("Heart of Gold", "Neil Young")).unwrap();
        insert_song(&conn, &sample_song("Something Else", "Other")).unwrap();

        let by_title = search_songs(&conn, "Harvest").unwrap();
        assert_eq!(by_title.len(), 1);

        let by_artist = search_songs(&conn, "Neil").unwrap();
        assert_eq!(by_artist.len(), 2);
    }

    #[test]
    fn category_filter_is_exact() {
        let conn = open_memory_db();

        let mut jazz = sample_song("Take Five", "Brubeck");
        jazz.category = "Jazz".to_string();
        insert_song(&conn, &jazz).unwrap();
        insert_song(&conn, &sample_song("Rocker", "A")).unwrap();

        let songs = fetch_songs_by_category(&conn, "Jazz").unwrap();
        assert_eq!(songs.len(), 1);
        assert_eq!(songs[0].title, "Take Five");
    }
}
