//! # Spotify Integration Module
//!
//! Client for the parts of the Spotify Web API the release pipeline needs:
//! followed artists, artist discographies, the saved-album library, bulk album
//! lookup, the user profile and playlist creation.
//!
//! ## Architecture
//!
//! ```text
//! ReleaseService
//!      ↓  SpotifyConnector
//! SpotifyClient ── pagination (cursor chain, optional per-page caching)
//!      ↓                 ↘
//! Transport (bearer auth, 429 back-off)    ResponseCache
//!      ↓  HttpSender
//! reqwest
//! ```
//!
//! ## Caching
//!
//! - Artist album pages are cached by their full request URL.
//! - Bulk album lookups are cached per album under `album:<id>`.
//! - Followed artists, saved albums and the user profile are always fetched live.
//!
//! Cache entries that fail to decode count as misses. Cache write failures
//! are logged and otherwise ignored.
//!
//! ## Errors
//!
//! Every operation either returns its complete result or an [`ApiError`];
//! a failing page or batch discards everything fetched before it.

pub mod artists;
pub mod pagination;
pub mod playlist;
pub mod releases;
pub mod transport;
pub mod user;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    error::ApiError,
    management::ResponseCache,
    model::{Album, Artist, Track, UserProfile},
    utils::ReleaseKinds,
};
use transport::{RequestBody, Transport};

pub use releases::album_cache_key;

/// Catalog operations the release pipeline depends on.
///
/// [`SpotifyClient`] is the production implementation; tests substitute
/// scripted fakes.
#[async_trait]
pub trait SpotifyConnector: Send + Sync {
    async fn get_followed_artists(&self, token: &str) -> Result<Vec<Artist>, ApiError>;

    async fn get_artist_albums(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ApiError>;

    async fn get_saved_albums(&self, token: &str) -> Result<Vec<Album>, ApiError>;

    async fn get_album_info(
        &self,
        token: &str,
        album_ids: &[String],
    ) -> Result<Vec<Album>, ApiError>;

    async fn get_user_profile(&self, token: &str) -> Result<UserProfile, ApiError>;

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<String, ApiError>;

    async fn add_tracks_to_playlist(
        &self,
        token: &str,
        user_id: &str,
        playlist_id: &str,
        tracks: &[Track],
    ) -> Result<(), ApiError>;
}

pub struct SpotifyClient {
    base_url: String,
    transport: Transport,
    cache: Arc<dyn ResponseCache>,
    release_kinds: Option<ReleaseKinds>,
}

impl SpotifyClient {
    /// Creates a client for the API rooted at `base_url`, e.g. `https://api.spotify.com/v1`.
    pub fn new(
        base_url: impl Into<String>,
        transport: Transport,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            transport,
            cache,
            release_kinds: None,
        }
    }

    /// Restricts artist album listings to the given release kinds.
    pub fn with_release_kinds(mut self, release_kinds: ReleaseKinds) -> Self {
        self.release_kinds = Some(release_kinds);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    pub(crate) async fn get_json<R: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<R, ApiError> {
        let body = self.transport.request(Method::GET, url, token, None).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::decode(url, e))
    }

    /// GET that is answered from the cache when an entry for `url` decodes.
    ///
    /// A live response is only cached after it decoded successfully.
    pub(crate) async fn get_json_cached<R: DeserializeOwned>(
        &self,
        url: &str,
        token: &str,
    ) -> Result<R, ApiError> {
        if let Some(data) = self.cache.try_get(url).await {
            match serde_json::from_slice(&data) {
                Ok(response) => {
                    tracing::debug!(url, "served from cache");
                    return Ok(response);
                }
                Err(e) => tracing::warn!(url, error = %e, "ignoring undecodable cache entry"),
            }
        }

        let body = self.transport.request(Method::GET, url, token, None).await?;
        let response = serde_json::from_slice(&body).map_err(|e| ApiError::decode(url, e))?;
        self.cache.try_set(url, &body).await;
        Ok(response)
    }

    pub(crate) async fn post_json<B, R>(&self, url: &str, token: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let body = RequestBody::json(body)?;
        let response = self
            .transport
            .request(Method::POST, url, token, Some(body))
            .await?;
        serde_json::from_slice(&response).map_err(|e| ApiError::decode(url, e))
    }
}

#[async_trait]
impl SpotifyConnector for SpotifyClient {
    async fn get_followed_artists(&self, token: &str) -> Result<Vec<Artist>, ApiError> {
        self.get_followed_artists(token).await
    }

    async fn get_artist_albums(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ApiError> {
        self.get_artist_albums(token, artist_id, market).await
    }

    async fn get_saved_albums(&self, token: &str) -> Result<Vec<Album>, ApiError> {
        self.get_saved_albums(token).await
    }

    async fn get_album_info(
        &self,
        token: &str,
        album_ids: &[String],
    ) -> Result<Vec<Album>, ApiError> {
        self.get_album_info(token, album_ids).await
    }

    async fn get_user_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.get_user_profile(token).await
    }

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        self.create_playlist(token, user_id, name).await
    }

    async fn add_tracks_to_playlist(
        &self,
        token: &str,
        user_id: &str,
        playlist_id: &str,
        tracks: &[Track],
    ) -> Result<(), ApiError> {
        self.add_tracks_to_playlist(token, user_id, playlist_id, tracks)
            .await
    }
}
