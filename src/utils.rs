use std::{cmp::Ordering, collections::BTreeSet, collections::HashSet, fmt};

use chrono::{DateTime, Duration, Utc};

use crate::{
    model::{Album, Artist, Track},
    types::ReleaseTableRow,
};

/// How far back a release may date to count as recent.
pub const RECENT_RELEASE_DAYS: i64 = 365;

/// Album group of an artist's discography, as used by `include_groups`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReleaseKind {
    Album,
    Single,
    AppearsOn,
    Compilation,
}

impl ReleaseKind {
    pub const ALL: [ReleaseKind; 4] = [
        ReleaseKind::Album,
        ReleaseKind::Single,
        ReleaseKind::AppearsOn,
        ReleaseKind::Compilation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseKind::Album => "album",
            ReleaseKind::Single => "single",
            ReleaseKind::AppearsOn => "appears_on",
            ReleaseKind::Compilation => "compilation",
        }
    }
}

impl fmt::Display for ReleaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sorted, duplicate free set of release kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseKinds(pub BTreeSet<ReleaseKind>);

impl ReleaseKinds {
    pub fn iter(&self) -> impl Iterator<Item = ReleaseKind> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ReleaseKinds {
    fn default() -> Self {
        ReleaseKinds(BTreeSet::from([ReleaseKind::Album]))
    }
}

impl fmt::Display for ReleaseKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// Parses a comma separated list of release kinds.
///
/// Matching ignores case and accepts `-` for `_`. The keyword `all` selects
/// every kind.
pub fn parse_release_kinds(input: &str) -> Result<ReleaseKinds, String> {
    if input.trim().is_empty() {
        return Err("release kinds cannot be empty".to_string());
    }

    let mut kinds = BTreeSet::new();
    for segment in input.split(',') {
        let value = segment.trim().to_lowercase().replace('-', "_");
        match value.as_str() {
            "" => return Err(format!("empty segment in '{input}'")),
            "all" => kinds.extend(ReleaseKind::ALL),
            "album" => {
                kinds.insert(ReleaseKind::Album);
            }
            "single" => {
                kinds.insert(ReleaseKind::Single);
            }
            "appears_on" => {
                kinds.insert(ReleaseKind::AppearsOn);
            }
            "compilation" => {
                kinds.insert(ReleaseKind::Compilation);
            }
            _ => {
                return Err(format!(
                    "invalid value '{}', expected one of: album, single, appears_on, compilation, all",
                    segment.trim()
                ));
            }
        }
    }

    Ok(ReleaseKinds(kinds))
}

/// Collapses albums sharing primary artist and title, keeping the first one.
pub fn remove_duplicate_albums(albums: &mut Vec<Album>) {
    let mut seen_keys = HashSet::new();
    albums.retain(|album| seen_keys.insert(album.dedup_key()));
}

/// Collapses tracks sharing artist and title, keeping the first one.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_keys = HashSet::new();
    tracks.retain(|track| seen_keys.insert(track.dedup_key()));
}

/// Drops every album whose id appears in `excluded`.
pub fn remove_albums(albums: &mut Vec<Album>, excluded: &[Album]) {
    let excluded_ids: HashSet<&str> = excluded.iter().map(|a| a.id.as_str()).collect();
    albums.retain(|album| !excluded_ids.contains(album.id.as_str()));
}

pub fn album_ids(albums: &[Album]) -> Vec<String> {
    albums.iter().map(|a| a.id.clone()).collect()
}

pub fn artist_ids(artists: &[Artist]) -> Vec<String> {
    artists.iter().map(|a| a.id.clone()).collect()
}

/// Primary artist of each album, skipping albums without credited artists.
pub fn primary_artist_ids(albums: &[Album]) -> Vec<String> {
    albums
        .iter()
        .filter_map(|a| a.primary_artist_id())
        .map(str::to_string)
        .collect()
}

pub fn track_uris(tracks: &[Track]) -> Vec<String> {
    tracks.iter().map(Track::uri).collect()
}

/// One representative track per album, in album order. Albums without
/// tracks contribute nothing.
pub fn sample_tracks(albums: &[Album]) -> Vec<Track> {
    albums
        .iter()
        .filter_map(|a| a.sample_track())
        .cloned()
        .collect()
}

/// Oldest release date, as `YYYY-MM-DD`, still counted as recent at `now`.
pub fn release_cutoff(now: DateTime<Utc>) -> String {
    (now - Duration::days(RECENT_RELEASE_DAYS))
        .format("%Y-%m-%d")
        .to_string()
}

/// Keeps albums released on or after `cutoff`.
///
/// ISO-8601 dates order lexicographically, so plain string comparison works
/// for every precision Spotify hands out.
pub fn retain_recent(albums: &mut Vec<Album>, cutoff: &str) {
    albums.retain(|album| album.release_date.as_str() >= cutoff);
}

pub fn release_table_rows(albums: &[Album]) -> Vec<ReleaseTableRow> {
    albums
        .iter()
        .map(|a| ReleaseTableRow {
            date: a.release_date.clone(),
            name: a.name.clone(),
            artists: a.artist_names.join(", "),
        })
        .collect()
}

pub fn sort_release_table_rows(rows: &mut Vec<ReleaseTableRow>) {
    rows.sort_by(|a, b| {
        match b.date.cmp(&a.date) {
            Ordering::Equal => a.artists.cmp(&b.artists), // secondary sort: artists ascending
            other => other,
        }
    });
}
