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

//! Command-line interface.
//!
//! This module defines the CLI surface and translates each subcommand into
//! calls on the [`Library`] facade, printing results to stdout. It is the
//! only consumer of the facade; nothing below this layer talks to the
//! terminal.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use crate::config::AppConfig;
use crate::library::Library;
use crate::model::{NewSong, PlaylistSummary, Song};
use crate::util::format::parse_duration;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Song commands
    #[clap(alias = "song")]
    Songs {
        #[clap(subcommand)]
        command: SongCommand,
    },
    /// Playlist commands
    #[clap(alias = "playlists")]
    Playlist {
        #[clap(subcommand)]
        command: PlaylistCommand,
    },
    /// Import songs from a directory (defaults to the configured media
    /// directories)
    Import { path: Option<PathBuf> },
    /// Configuration commands
    Config {
        #[clap(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum ConfigCommand {
    /// Show the active configuration
    Show,
    /// Set the database file
    SetDatabase { path: String },
    /// Add a media directory used by import
    AddMediaDir { path: String },
}

#[derive(Debug, Subcommand)]
pub(crate) enum SongCommand {
    /// List every song in the library
    List,
    /// Show one song
    Show { id: i64 },
    /// Add a song
    Add {
        #[clap(long)]
        title: String,
        #[clap(long)]
        artist: String,
        #[clap(long, default_value = "")]
        category: String,
        /// Duration as M:SS, H:MM:SS, or seconds
        #[clap(long, default_value = "0")]
        duration: String,
        #[clap(long, default_value = "")]
        file: String,
    },
    /// Edit fields of an existing song
    Edit {
        id: i64,
        #[clap(long)]
        title: Option<String>,
        #[clap(long)]
        artist: Option<String>,
        #[clap(long)]
        category: Option<String>,
        /// Duration as M:SS, H:MM:SS, or seconds
        #[clap(long)]
        duration: Option<String>,
        #[clap(long)]
        file: Option<String>,
    },
    /// Delete a song, removing it from every playlist
    #[clap(alias = "delete")]
    Remove { id: i64 },
    /// Search songs by title or artist
    Search { query: String },
    /// List songs in a category
    Category { name: String },
}

#[derive(Debug, Subcommand)]
pub(crate) enum PlaylistCommand {
    /// List every playlist with its song count and running time
    List,
    /// Show a playlist's songs in order
    Show { id: i64 },
    /// Create a playlist
    Create { name: String },
    /// Rename a playlist
    Rename { id: i64, name: String },
    /// Delete a playlist (member songs are kept)
    Delete { id: i64 },
    /// Append a song to a playlist
    Add { playlist_id: i64, song_id: i64 },
    /// Remove a song from a playlist
    Remove { playlist_id: i64, song_id: i64 },
    /// Move a song one place earlier in a playlist
    MoveUp { playlist_id: i64, song_id: i64 },
    /// Move a song one place later in a playlist
    MoveDown { playlist_id: i64, song_id: i64 },
}

/// Executes a parsed command against the library.
pub(crate) fn run(library: &mut Library, config: &AppConfig, command: Command) -> Result<()> {
    match command {
        Command::Songs { command } => run_song_command(library, command),
        Command::Playlist { command } => run_playlist_command(library, command),
        Command::Import { path } => run_import(library, config, path),
        Command::Config { command } => run_config(config, command),
    }
}

fn run_config(config: &AppConfig, command: ConfigCommand) -> Result<()> {
    match command {
        ConfigCommand::Show => {
            println!("database_file: {}", config.database_file);
            for dir in &config.media_dirs {
                println!("media_dir: {dir}");
            }
        }
        ConfigCommand::SetDatabase { path } => {
            let mut updated = config.clone();
            updated.database_file = path;
            crate::config::save_config(&updated)?;
            println!("Database file set to {}", updated.database_file);
        }
        ConfigCommand::AddMediaDir { path } => {
            let mut updated = config.clone();
            if !updated.media_dirs.contains(&path) {
                updated.media_dirs.push(path);
                crate::config::save_config(&updated)?;
            }
            println!("Media directories: {}", updated.media_dirs.join(", "));
        }
    }

    Ok(())
}

fn run_song_command(library: &Library, command: SongCommand) -> Result<()> {
    match command {
        SongCommand::List => {
            print_songs(&library.all_songs()?);
        }
        SongCommand::Show { id } => {
            let song = library.song_by_id(id)?;
            println!("{:>5}  {}", song.id, song_line(&song));
            if !song.file_path.is_empty() {
                println!("       {}", song.file_path);
            }
        }
        SongCommand::Add {
            title,
            artist,
            category,
            duration,
            file,
        } => {
            let song = library.create_song(&NewSong {
                title,
                artist,
                category,
                duration: parse_duration(&duration),
                file_path: file,
            })?;
            println!("Added song {}: {}", song.id, song_line(&song));
        }
        SongCommand::Edit {
            id,
            title,
            artist,
            category,
            duration,
            file,
        } => {
            let mut song = library.song_by_id(id)?;
            if let Some(title) = title {
                song.title = title;
            }
            if let Some(artist) = artist {
                song.artist = artist;
            }
            if let Some(category) = category {
                song.category = category;
            }
            if let Some(duration) = duration {
                song.duration = parse_duration(&duration);
            }
            if let Some(file) = file {
                song.file_path = file;
            }
            library.update_song(&song)?;
            println!("Updated song {}: {}", song.id, song_line(&song));
        }
        SongCommand::Remove { id } => {
            library.delete_song(id)?;
            println!("Deleted song {id}");
        }
        SongCommand::Search { query } => {
            print_songs(&library.search_songs(&query)?);
        }
        SongCommand::Category { name } => {
            print_songs(&library.songs_by_category(&name)?);
        }
    }

    Ok(())
}

fn run_playlist_command(library: &Library, command: PlaylistCommand) -> Result<()> {
    match command {
        PlaylistCommand::List => {
            for summary in library.all_playlists()? {
                println!("{:>5}  {}", summary.playlist.id, summary_line(&summary));
            }
        }
        PlaylistCommand::Show { id } => {
            let summary = library.playlist_summary(id)?;
            println!("{}", summary_line(&summary));
            for (index, song) in library.songs_in_playlist(id)?.iter().enumerate() {
                println!("{:>5}  {}", index + 1, song_line(song));
            }
        }
        PlaylistCommand::Create { name } => {
            let playlist = library.create_playlist(&name)?;
            println!("Created playlist {}: {}", playlist.id, playlist.name);
        }
        PlaylistCommand::Rename { id, name } => {
            library.rename_playlist(id, &name)?;
            println!("Renamed playlist {id} to {name}");
        }
        PlaylistCommand::Delete { id } => {
            library.delete_playlist(id)?;
            println!("Deleted playlist {id}");
        }
        PlaylistCommand::Add {
            playlist_id,
            song_id,
        } => {
            let totals = library.add_song_to_playlist(playlist_id, song_id)?;
            println!(
                "Added song {song_id} ({} songs, {})",
                totals.song_count,
                totals.formatted_duration()
            );
        }
        PlaylistCommand::Remove {
            playlist_id,
            song_id,
        } => {
            let totals = library.remove_song_from_playlist(playlist_id, song_id)?;
            println!(
                "Removed song {song_id} ({} songs, {})",
                totals.song_count,
                totals.formatted_duration()
            );
        }
        PlaylistCommand::MoveUp {
            playlist_id,
            song_id,
        } => {
            library.move_song_up(playlist_id, song_id)?;
        }
        PlaylistCommand::MoveDown {
            playlist_id,
            song_id,
        } => {
            library.move_song_down(playlist_id, song_id)?;
        }
    }

    Ok(())
}

fn run_import(library: &mut Library, config: &AppConfig, path: Option<PathBuf>) -> Result<()> {
    let roots: Vec<PathBuf> = match path {
        Some(path) => vec![path],
        None => config.media_dirs.iter().map(PathBuf::from).collect(),
    };

    if roots.is_empty() {
        anyhow::bail!("No directory given and no media directories configured");
    }

    let mut total = 0;
    for root in roots {
        let imported = library.import_directory(&root)?;
        println!("{}: imported {} songs", root.display(), imported);
        total += imported;
    }
    println!("Imported {total} songs");

    Ok(())
}

fn song_line(song: &Song) -> String {
    format!(
        "{} - {} ({})",
        song.title,
        song.artist,
        song.formatted_duration()
    )
}

fn summary_line(summary: &PlaylistSummary) -> String {
    format!(
        "{} ({} songs, {})",
        summary.playlist.name,
        summary.totals.song_count,
        summary.totals.formatted_duration()
    )
}

fn print_songs(songs: &[Song]) {
    for song in songs {
        println!("{:>5}  {}", song.id, song_line(song));
    }
}
