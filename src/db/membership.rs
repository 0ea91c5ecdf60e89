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

//! Ordered playlist membership store.
//!
//! Maintains the `playlist_songs` join table: one row per (playlist, song)
//! pair carrying an ordinal `position`. Positions are sort keys, not dense
//! array indices. Removing a song leaves a gap; reads stay correct because
//! every query orders by position, and appends stay collision-free because
//! they go past the current maximum rather than counting rows. Adjacency
//! for the move operations is defined by rank in the sorted sequence,
//! never by arithmetic on position values.

use rusqlite::{Connection, params};

use crate::error::{Error, Result};
use crate::model::Song;

/// Appends a song at the end of a playlist's ordered sequence.
///
/// The new row takes `MAX(position) + 1`, or position zero for an empty
/// playlist. The insert is a single statement, so the read of the current
/// maximum and the write are atomic.
///
/// # Errors
///
/// Returns [`Error::DuplicateMembership`] if the pair already exists. A
/// song may appear in a playlist at most once.
pub(crate) fn add_song(conn: &Connection, playlist_id: i64, song_id: i64) -> Result<()> {
    let sql = "INSERT INTO playlist_songs (playlist_id, song_id, position)
               VALUES (?1, ?2, COALESCE(
                   (SELECT MAX(position) + 1 FROM playlist_songs WHERE playlist_id = ?1), 0))";

    let mut stmt = conn.prepare_cached(sql)?;
    match stmt.execute(params![playlist_id, song_id]) {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Err(Error::DuplicateMembership {
                playlist_id,
                song_id,
            })
        }
        Err(e) => Err(e.into()),
    }
}

/// Removes a song from a playlist.
///
/// Positions of the remaining songs are left untouched; the resulting gap
/// is harmless. Removing a song that is not in the playlist is a no-op.
pub(crate) fn remove_song(conn: &Connection, playlist_id: i64, song_id: i64) -> Result<()> {
    let sql = "DELETE FROM playlist_songs WHERE playlist_id = ? AND song_id = ?";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![playlist_id, song_id])?;

    Ok(())
}

/// Fetches the songs of a playlist in ascending position order.
///
/// Produces a plain snapshot that can be re-queried at any time. An
/// unknown playlist id yields an empty list.
///
/// # Errors
///
/// Returns an error if the SQL query fails or if there is a type mismatch
/// when mapping the database rows to the [`Song`] struct.
pub(crate) fn songs_in_playlist(conn: &Connection, playlist_id: i64) -> Result<Vec<Song>> {
    let sql = "SELECT s.id, s.title, s.artist, s.category, s.duration, s.file_path
               FROM songs s
               JOIN playlist_songs ps ON s.id = ps.song_id
               WHERE ps.playlist_id = ?
               ORDER BY ps.position";

    let mut stmt = conn.prepare_cached(sql)?;
    let results = stmt
        .query_map([playlist_id], Song::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches a playlist's (song_id, position) pairs in ascending position
/// order. Cheaper than [`songs_in_playlist`] when only the ordering is
/// needed.
fn ordered_entries(conn: &Connection, playlist_id: i64) -> Result<Vec<(i64, i64)>> {
    let sql = "SELECT song_id, position FROM playlist_songs
               WHERE playlist_id = ?
               ORDER BY position";

    let mut stmt = conn.prepare_cached(sql)?;
    let results = stmt
        .query_map([playlist_id], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    Ok(results)
}

/// Fetches the position of a song within a playlist, `None` if the song is
/// not a member.
pub(crate) fn song_position(
    conn: &Connection,
    playlist_id: i64,
    song_id: i64,
) -> Result<Option<i64>> {
    let sql = "SELECT position FROM playlist_songs WHERE playlist_id = ? AND song_id = ?";

    let mut stmt = conn.prepare_cached(sql)?;
    let mut rows = stmt.query_map(params![playlist_id, song_id], |row| row.get(0))?;

    rows.next().transpose().map_err(Error::from)
}

/// Exchanges the position values of two songs within a playlist.
///
/// A no-op if either song is not in the playlist. Both writes happen in a
/// single UPDATE statement so a half-applied swap cannot be observed.
pub(crate) fn swap_positions(
    conn: &Connection,
    playlist_id: i64,
    song_id_a: i64,
    song_id_b: i64,
) -> Result<()> {
    let Some(position_a) = song_position(conn, playlist_id, song_id_a)? else {
        return Ok(());
    };
    let Some(position_b) = song_position(conn, playlist_id, song_id_b)? else {
        return Ok(());
    };

    let sql = "UPDATE playlist_songs
               SET position = CASE song_id WHEN ?2 THEN ?4 WHEN ?3 THEN ?5 END
               WHERE playlist_id = ?1 AND song_id IN (?2, ?3)";

    let mut stmt = conn.prepare_cached(sql)?;
    stmt.execute(params![
        playlist_id,
        song_id_a,
        song_id_b,
        position_b,
        position_a
    ])?;

    Ok(())
}

/// Moves a song one place earlier in a playlist's ordering.
///
/// Locates the song's rank in the ordered sequence and swaps positions
/// with its predecessor. A no-op if the song is already first or is not in
/// the playlist.
pub(crate) fn move_song_up(conn: &Connection, playlist_id: i64, song_id: i64) -> Result<()> {
    let entries = ordered_entries(conn, playlist_id)?;

    let Some(index) = entries.iter().position(|(id, _)| *id == song_id) else {
        return Ok(());
    };

    if index > 0 {
        let (song_above, _) = entries[index - 1];
        swap_positions(conn, playlist_id, song_id, song_above)?;
    }

    Ok(())
}

/// Moves a song one place later in a playlist's ordering.
///
/// A no-op if the song is already last or is not in the playlist.
pub(crate) fn move_song_down(conn: &Connection, playlist_id: i64, song_id: i64) -> Result<()> {
    let entries = ordered_entries(conn, playlist_id)?;

    let Some(index) = entries.iter().position(|(id, _)| *id == song_id) else {
        return Ok(());
    };

    if index + 1 < entries.len() {
        let (song_below, _) = entries[index + 1];
        swap_positions(conn, playlist_id, song_id, song_below)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{open_memory_db, playlists, songs};
    use crate::model::NewSong;

    fn seed_playlist(conn: &Connection, titles: &[&str]) -> (i64, Vec<i64>) {
        let playlist = playlists::insert_playlist(conn, "Test").unwrap();

        let song_ids = titles
            .iter()
            .map(|title| {
                let song = songs::insert_song(
                    conn,
                    &NewSong {
                        title: title.to_string(),
                        artist: "Artist".to_string(),
                        category: String::new(),
                        duration: 60,
                        file_path: format!("/music/{title}.mp3"),
                    },
                )
                .unwrap();
                add_song(conn, playlist.id, song.id).unwrap();
                song.id
            })
            .collect();

        (playlist.id, song_ids)
    }

    fn ordered_ids(conn: &Connection, playlist_id: i64) -> Vec<i64> {
        songs_in_playlist(conn, playlist_id)
            .unwrap()
            .iter()
            .map(|s| s.id)
            .collect()
    }

    #[test]
    fn songs_come_back_in_insertion_order() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c"]);

        assert_eq!(ordered_ids(&conn, playlist_id), ids);

        let entries = ordered_entries(&conn, playlist_id).unwrap();
        assert!(entries.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn adding_the_same_song_twice_is_rejected() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a"]);

        let result = add_song(&conn, playlist_id, ids[0]);
        assert!(matches!(result, Err(Error::DuplicateMembership { .. })));

        // The membership is unchanged by the rejected insert.
        assert_eq!(ordered_ids(&conn, playlist_id).len(), 1);
    }

    #[test]
    fn append_after_removal_does_not_collide_with_surviving_positions() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c"]);

        // Removing the middle song leaves a gap in the position sequence.
        remove_song(&conn, playlist_id, ids[1]).unwrap();

        let song = songs::insert_song(
            &conn,
            &NewSong {
                title: "d".to_string(),
                artist: "Artist".to_string(),
                category: String::new(),
                duration: 60,
                file_path: "/music/d.mp3".to_string(),
            },
        )
        .unwrap();
        add_song(&conn, playlist_id, song.id).unwrap();

        assert_eq!(ordered_ids(&conn, playlist_id), vec![ids[0], ids[2], song.id]);

        let entries = ordered_entries(&conn, playlist_id).unwrap();
        let mut positions: Vec<i64> = entries.iter().map(|(_, p)| *p).collect();
        let before = positions.len();
        positions.dedup();
        assert_eq!(positions.len(), before);
    }

    #[test]
    fn removing_an_absent_song_is_a_no_op() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a"]);

        remove_song(&conn, playlist_id, 9999).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn move_up_swaps_with_the_previous_song() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c"]);

        move_song_up(&conn, playlist_id, ids[1]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), vec![ids[1], ids[0], ids[2]]);
    }

    #[test]
    fn move_down_swaps_with_the_next_song() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c"]);

        move_song_down(&conn, playlist_id, ids[1]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), vec![ids[0], ids[2], ids[1]]);
    }

    #[test]
    fn moving_the_first_song_up_is_a_no_op() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b"]);

        move_song_up(&conn, playlist_id, ids[0]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn moving_the_last_song_down_is_a_no_op() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b"]);

        move_song_down(&conn, playlist_id, ids[1]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn moving_an_absent_song_is_a_no_op() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b"]);

        move_song_up(&conn, playlist_id, 9999).unwrap();
        move_song_down(&conn, playlist_id, 9999).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn move_up_then_down_restores_the_original_order() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c"]);

        move_song_up(&conn, playlist_id, ids[1]).unwrap();
        move_song_down(&conn, playlist_id, ids[1]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);

        move_song_down(&conn, playlist_id, ids[1]).unwrap();
        move_song_up(&conn, playlist_id, ids[1]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn moves_work_across_position_gaps() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b", "c", "d"]);

        // Leave a gap between a and c, then move d up past c.
        remove_song(&conn, playlist_id, ids[1]).unwrap();
        move_song_up(&conn, playlist_id, ids[3]).unwrap();

        assert_eq!(ordered_ids(&conn, playlist_id), vec![ids[0], ids[3], ids[2]]);
    }

    #[test]
    fn swap_with_an_absent_song_is_a_no_op() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b"]);

        swap_positions(&conn, playlist_id, ids[0], 9999).unwrap();
        swap_positions(&conn, playlist_id, 9999, ids[0]).unwrap();
        assert_eq!(ordered_ids(&conn, playlist_id), ids);
    }

    #[test]
    fn deleting_a_playlist_cascades_to_its_memberships() {
        let conn = open_memory_db();
        let (playlist_id, _) = seed_playlist(&conn, &["a", "b"]);

        playlists::delete_playlist(&conn, playlist_id).unwrap();

        assert!(ordered_ids(&conn, playlist_id).is_empty());
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM playlist_songs", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[test]
    fn deleting_a_song_removes_it_from_every_playlist() {
        let conn = open_memory_db();
        let (playlist_id, ids) = seed_playlist(&conn, &["a", "b"]);

        let other = playlists::insert_playlist(&conn, "Other").unwrap();
        add_song(&conn, other.id, ids[0]).unwrap();

        songs::delete_song(&conn, ids[0]).unwrap();

        assert_eq!(ordered_ids(&conn, playlist_id), vec![ids[1]]);
        assert!(ordered_ids(&conn, other.id).is_empty());
    }
}
