use super::{SpotifyClient, pagination::Pages};
use crate::{error::ApiError, model::Artist, types::FollowedArtistsResponse};

/// Page size for followed artists; 50 is the API maximum.
pub const FOLLOWED_ARTISTS_PAGE_SIZE: u32 = 50;

impl SpotifyClient {
    /// Retrieves every artist the user follows.
    ///
    /// Walks the `next` chain of `GET /me/following` and concatenates the
    /// pages in server order. Never cached since follows change often.
    pub async fn get_followed_artists(&self, token: &str) -> Result<Vec<Artist>, ApiError> {
        let url = self.url(&format!(
            "/me/following?type=artist&limit={FOLLOWED_ARTISTS_PAGE_SIZE}"
        ));

        Pages::<FollowedArtistsResponse>::new(self, token, url)
            .collect_all()
            .await
    }
}
