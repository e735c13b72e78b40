//! Release aggregation pipeline.
//!
//! [`ReleaseService`] turns the user's follow graph and library into a list
//! of recent releases and writes playlists back. It only talks to the catalog
//! through [`SpotifyConnector`] and reads the current date from [`Clock`], so
//! both can be replaced in tests.

use std::{collections::HashSet, sync::Arc};

use crate::{
    error::ServiceError,
    model::{Album, Track},
    platform::Clock,
    spotify::SpotifyConnector,
    utils,
};

/// Number of album ids per bulk album lookup; 20 is the API maximum.
pub const ALBUMS_PER_REQUEST: usize = 20;

pub struct ReleaseService {
    connector: Arc<dyn SpotifyConnector>,
    clock: Arc<dyn Clock>,
}

impl ReleaseService {
    pub fn new(connector: Arc<dyn SpotifyConnector>, clock: Arc<dyn Clock>) -> Self {
        Self { connector, clock }
    }

    /// Collects releases of the last 365 days by followed artists and by
    /// artists of saved albums, leaving out albums the user already saved.
    ///
    /// Steps, all strictly sequential:
    /// 1. read the user's country from the profile
    /// 2. gather artist ids: followed artists first, then the primary artist
    ///    of every saved album
    /// 3. fetch each artist's albums once, keeping the first occurrence of
    ///    every album id
    /// 4. drop saved albums, then fetch full album details in batches
    /// 5. keep albums released on or after the cutoff
    pub async fn get_recent_releases(&self, token: &str) -> Result<Vec<Album>, ServiceError> {
        let profile = self
            .connector
            .get_user_profile(token)
            .await
            .map_err(ServiceError::Profile)?;

        let followed = self
            .connector
            .get_followed_artists(token)
            .await
            .map_err(ServiceError::FollowedArtists)?;

        let saved_albums = self
            .connector
            .get_saved_albums(token)
            .await
            .map_err(ServiceError::SavedAlbums)?;

        let mut artist_ids = utils::artist_ids(&followed);
        artist_ids.extend(utils::primary_artist_ids(&saved_albums));

        let mut albums = self
            .collect_artist_albums(token, &artist_ids, &profile.country)
            .await?;
        utils::remove_albums(&mut albums, &saved_albums);

        let mut details = self.fetch_album_details(token, &albums).await?;

        let cutoff = utils::release_cutoff(self.clock.now());
        utils::retain_recent(&mut details, &cutoff);
        tracing::debug!(cutoff = %cutoff, releases = details.len(), "recent releases collected");

        Ok(details)
    }

    /// Creates a private playlist named `name` holding `tracks`.
    ///
    /// Stops at the first failing step. A playlist that was already created
    /// when adding tracks fails is left behind as is.
    pub async fn create_playlist_from_tracks(
        &self,
        token: &str,
        name: &str,
        tracks: &[Track],
    ) -> Result<String, ServiceError> {
        let profile = self
            .connector
            .get_user_profile(token)
            .await
            .map_err(ServiceError::Profile)?;

        let playlist_id = self
            .connector
            .create_playlist(token, &profile.id, name)
            .await
            .map_err(ServiceError::CreatePlaylist)?;

        self.connector
            .add_tracks_to_playlist(token, &profile.id, &playlist_id, tracks)
            .await
            .map_err(|source| ServiceError::AddTracks {
                playlist_id: playlist_id.clone(),
                source,
            })?;

        Ok(playlist_id)
    }

    /// Fetches the albums of every artist once, in first-seen artist order,
    /// keeping only the first occurrence of each album id.
    async fn collect_artist_albums(
        &self,
        token: &str,
        artist_ids: &[String],
        market: &str,
    ) -> Result<Vec<Album>, ServiceError> {
        let mut visited_artists: HashSet<&str> = HashSet::new();
        let mut seen_albums: HashSet<String> = HashSet::new();
        let mut albums = Vec::new();

        for artist_id in artist_ids {
            if !visited_artists.insert(artist_id.as_str()) {
                continue;
            }

            let artist_albums = self
                .connector
                .get_artist_albums(token, artist_id, market)
                .await
                .map_err(|source| ServiceError::ArtistAlbums {
                    artist_id: artist_id.clone(),
                    source,
                })?;

            albums.extend(
                artist_albums
                    .into_iter()
                    .filter(|album| seen_albums.insert(album.id.clone())),
            );
        }

        Ok(albums)
    }

    async fn fetch_album_details(
        &self,
        token: &str,
        albums: &[Album],
    ) -> Result<Vec<Album>, ServiceError> {
        let mut details = Vec::with_capacity(albums.len());

        for chunk in albums.chunks(ALBUMS_PER_REQUEST) {
            let ids = utils::album_ids(chunk);
            let infos = self
                .connector
                .get_album_info(token, &ids)
                .await
                .map_err(|source| ServiceError::AlbumInfo {
                    ids: ids.clone(),
                    source,
                })?;
            details.extend(infos);
        }

        Ok(details)
    }
}

/// Picks the tracks for a releases playlist.
///
/// Re-issues of the same title by the same artist are collapsed first, then
/// each remaining album contributes its sample track, and tracks sharing
/// artist and title are collapsed.
pub fn playlist_tracks(releases: &[Album]) -> Vec<Track> {
    let mut albums = releases.to_vec();
    utils::remove_duplicate_albums(&mut albums);

    let mut tracks = utils::sample_tracks(&albums);
    utils::remove_duplicate_tracks(&mut tracks);
    tracks
}
