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

/// Formats a duration in seconds into a human-readable string.
///
/// Durations of an hour or more render as `H:MM:SS`, shorter ones as
/// `M:SS`. The leftmost unit carries no leading zero. Zero (or anything
/// non-positive) renders as the fixed string `00:00`.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(format_duration(65), "1:05");
/// assert_eq!(format_duration(3850), "1:04:10");
/// assert_eq!(format_duration(0), "00:00");
/// ```
pub(crate) fn format_duration(total_seconds: i64) -> String {
    if total_seconds <= 0 {
        return "00:00".to_string();
    }

    let hours = total_seconds / 3600;
    let mins = (total_seconds % 3600) / 60;
    let secs = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Parses a duration value into whole seconds.
///
/// Accepts `M:SS`, `H:MM:SS`, or a bare number of seconds. Anything that
/// does not parse yields zero rather than an error, imported metadata is
/// frequently sloppy and a zero-length track is harmless.
pub(crate) fn parse_duration(value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        return 0;
    }

    let parts: Vec<&str> = value.split(':').collect();
    let parsed: Option<Vec<i64>> = parts.iter().map(|p| p.trim().parse::<i64>().ok()).collect();

    match parsed.as_deref() {
        Some([seconds]) => *seconds,
        Some([mins, secs]) => mins * 60 + secs,
        Some([hours, mins, secs]) => hours * 3600 + mins * 60 + secs,
        _ => 0,
    }
}
