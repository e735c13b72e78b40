//! Value types the release pipeline works on.
//!
//! These are read-only snapshots of catalog entities fetched during one run.
//! Identifiers are the opaque ids handed out by Spotify and are never made up
//! locally.

use serde::{Deserialize, Serialize};

/// Prefix turning a track id into a Spotify track URI.
pub const TRACK_URI_PREFIX: &str = "spotify:track:";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    /// Credited artists in catalog order; the first one is the primary artist.
    pub artist_ids: Vec<String>,
    /// Display names matching `artist_ids` position by position.
    pub artist_names: Vec<String>,
    /// ISO-8601 date string. Precision may be year or month for old releases.
    pub release_date: String,
    pub markets: Vec<String>,
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn primary_artist_id(&self) -> Option<&str> {
        self.artist_ids.first().map(String::as_str)
    }

    /// Picks the track used to represent this album in a playlist.
    ///
    /// Albums with more than three tracks are represented by their third
    /// track, shorter ones by their first. Albums without tracks have none.
    pub fn sample_track(&self) -> Option<&Track> {
        if self.tracks.len() > 3 {
            return self.tracks.get(2);
        }

        self.tracks.first()
    }

    /// Key collapsing re-issues of the same title by the same artist.
    pub fn dedup_key(&self) -> String {
        format!(
            "{}:{}",
            self.primary_artist_id().unwrap_or_default(),
            self.name
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub artist_id: String,
    pub duration_ms: u64,
}

impl Track {
    pub fn uri(&self) -> String {
        format!("{TRACK_URI_PREFIX}{}", self.id)
    }

    pub fn dedup_key(&self) -> String {
        format!("{}:{}", self.artist_id, self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    /// Two-letter market code scoping album availability.
    pub country: String,
}
