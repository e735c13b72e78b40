use super::SpotifyClient;
use crate::{
    error::ApiError,
    model::Track,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse,
    },
};

/// Maximum number of track URIs accepted by one add-tracks request.
pub const TRACKS_PER_REQUEST: usize = 100;

impl SpotifyClient {
    /// Creates an empty private playlist for `user_id` and returns its id.
    pub async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        let url = self.url(&format!("/users/{user_id}/playlists"));
        let request = CreatePlaylistRequest {
            name: name.to_string(),
            public: false,
        };

        let response: CreatePlaylistResponse = self.post_json(&url, token, &request).await?;
        Ok(response.id)
    }

    /// Appends `tracks` to a playlist in order.
    ///
    /// Sends one request per chunk of at most [`TRACKS_PER_REQUEST`] URIs and
    /// stops at the first failing chunk. Chunks sent before it stay added.
    pub async fn add_tracks_to_playlist(
        &self,
        token: &str,
        user_id: &str,
        playlist_id: &str,
        tracks: &[Track],
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/users/{user_id}/playlists/{playlist_id}/tracks"));

        for chunk in tracks.chunks(TRACKS_PER_REQUEST) {
            let request = AddTrackToPlaylistRequest {
                uris: crate::utils::track_uris(chunk),
            };
            let response: AddTrackToPlaylistResponse =
                self.post_json(&url, token, &request).await?;
            tracing::debug!(
                playlist_id,
                added = chunk.len(),
                snapshot_id = response.snapshot_id.as_deref().unwrap_or_default(),
                "tracks added"
            );
        }

        Ok(())
    }
}
