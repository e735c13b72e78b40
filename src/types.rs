use serde::{Deserialize, Serialize};
use tabled::Tabled;

use crate::{
    model,
    spotify::pagination::{Page, Paginated},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl From<Artist> for model::Artist {
    fn from(artist: Artist) -> Self {
        model::Artist {
            id: artist.id,
            name: artist.name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FollowedArtistsResponse {
    pub artists: ArtistsContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtistsContainer {
    #[serde(default)]
    pub items: Vec<Artist>,
    pub next: Option<String>,
    pub cursors: Option<Cursors>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cursors {
    pub after: Option<String>,
}

impl Paginated for FollowedArtistsResponse {
    type Item = model::Artist;

    fn into_page(self) -> Page<model::Artist> {
        Page::new(
            self.artists.items.into_iter().map(Into::into).collect(),
            self.artists.next,
        )
    }
}

/// One page of `GET /artists/{id}/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumResponse {
    #[serde(default)]
    pub items: Vec<Album>,
    pub next: Option<String>,
}

impl Paginated for AlbumResponse {
    type Item = model::Album;

    fn into_page(self) -> Page<model::Album> {
        Page::new(
            self.items.into_iter().map(Into::into).collect(),
            self.next,
        )
    }
}

/// One page of `GET /me/albums`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbumsResponse {
    #[serde(default)]
    pub items: Vec<SavedAlbum>,
    pub next: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub added_at: Option<String>,
    pub album: Album,
}

impl Paginated for SavedAlbumsResponse {
    type Item = model::Album;

    fn into_page(self) -> Page<model::Album> {
        Page::new(
            self.items.into_iter().map(|s| s.album.into()).collect(),
            self.next,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub release_date_precision: String,
    #[serde(default)]
    pub album_type: String,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
    #[serde(default)]
    pub available_markets: Vec<String>,
    pub tracks: Option<Tracks>,
}

impl From<Album> for model::Album {
    fn from(album: Album) -> Self {
        let (artist_ids, artist_names): (Vec<String>, Vec<String>) =
            album.artists.into_iter().map(|a| (a.id, a.name)).unzip();
        let primary_artist = artist_ids.first().cloned().unwrap_or_default();

        let tracks = album
            .tracks
            .map(|t| t.items)
            .unwrap_or_default()
            .into_iter()
            .map(|track| model::Track {
                artist_id: track
                    .artists
                    .first()
                    .map(|a| a.id.clone())
                    .unwrap_or_else(|| primary_artist.clone()),
                id: track.id,
                name: track.name,
                duration_ms: track.duration_ms,
            })
            .collect();

        model::Album {
            id: album.id,
            name: album.name,
            artist_ids,
            artist_names,
            release_date: album.release_date,
            markets: album.available_markets,
            tracks,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlbumArtist {
    pub id: String,
    pub name: String,
}

/// Response of `GET /albums?ids=...`. Unknown ids come back as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetSeveralAlbumsResponse {
    pub albums: Vec<Option<Album>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub duration_ms: u64,
    #[serde(default)]
    pub track_number: u32,
    #[serde(default)]
    pub artists: Vec<AlbumArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub country: String,
    pub display_name: Option<String>,
}

impl From<UserProfile> for model::UserProfile {
    fn from(profile: UserProfile) -> Self {
        model::UserProfile {
            id: profile.id,
            country: profile.country,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: Option<String>,
}

#[derive(Tabled)]
pub struct ReleaseTableRow {
    pub date: String,
    pub name: String,
    pub artists: String,
}
