//! Error types shared by the Spotify client, the response cache and the
//! release pipeline.

use std::path::PathBuf;

use reqwest::{Method, StatusCode};
use thiserror::Error;

/// Failure of a single Spotify Web API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response (DNS, refused connection, ...).
    #[error("{method} {url} failed: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The server answered with a status other than 200, 201 or 429.
    #[error("{method} {url} returned HTTP {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
    },

    /// The server kept answering 429 after the configured number of retries.
    #[error("{method} {url} is still rate limited after {attempts} attempts")]
    RateLimited {
        method: Method,
        url: String,
        attempts: u32,
    },

    #[error("cannot decode response of {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot encode request body: {0}")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn decode(url: &str, source: serde_json::Error) -> Self {
        ApiError::Decode {
            url: url.to_string(),
            source,
        }
    }

    /// HTTP status of the failed call, if the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::RateLimited { .. } => Some(StatusCode::TOO_MANY_REQUESTS),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure of a release pipeline step. Each variant names the step and keeps
/// the underlying API error as its source.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("error retrieving user profile: {0}")]
    Profile(#[source] ApiError),

    #[error("error retrieving followed artists: {0}")]
    FollowedArtists(#[source] ApiError),

    #[error("error retrieving saved albums: {0}")]
    SavedAlbums(#[source] ApiError),

    #[error("error retrieving albums of artist {artist_id}: {source}")]
    ArtistAlbums {
        artist_id: String,
        #[source]
        source: ApiError,
    },

    #[error("error retrieving album infos for [{}]: {source}", .ids.join(","))]
    AlbumInfo {
        ids: Vec<String>,
        #[source]
        source: ApiError,
    },

    #[error("error creating playlist: {0}")]
    CreatePlaylist(#[source] ApiError),

    #[error("error adding tracks to playlist {playlist_id}: {source}")]
    AddTracks {
        playlist_id: String,
        #[source]
        source: ApiError,
    },
}

impl ServiceError {
    /// The API error that caused this pipeline step to fail.
    pub fn api_error(&self) -> &ApiError {
        match self {
            ServiceError::Profile(e)
            | ServiceError::FollowedArtists(e)
            | ServiceError::SavedAlbums(e)
            | ServiceError::CreatePlaylist(e) => e,
            ServiceError::ArtistAlbums { source, .. }
            | ServiceError::AlbumInfo { source, .. }
            | ServiceError::AddTracks { source, .. } => source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_names_method_status_and_url() {
        let err = ApiError::Status {
            method: Method::GET,
            url: "https://api.example/v1/me".to_string(),
            status: StatusCode::NOT_FOUND,
        };

        let message = err.to_string();
        assert!(message.contains("GET"));
        assert!(message.contains("404"));
        assert!(message.contains("https://api.example/v1/me"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn service_error_keeps_the_api_error_as_source() {
        let err = ServiceError::AlbumInfo {
            ids: vec!["a".to_string(), "b".to_string()],
            source: ApiError::Status {
                method: Method::GET,
                url: "u".to_string(),
                status: StatusCode::BAD_GATEWAY,
            },
        };

        assert!(err.to_string().starts_with("error retrieving album infos for [a,b]"));
        assert_eq!(err.api_error().status(), Some(StatusCode::BAD_GATEWAY));
        assert!(std::error::Error::source(&err).is_some());
    }
}
