use super::SpotifyClient;
use crate::{error::ApiError, model::UserProfile, types};

impl SpotifyClient {
    /// Retrieves id and country of the token's owner via `GET /me`.
    pub async fn get_user_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        let url = self.url("/me");
        let profile: types::UserProfile = self.get_json(&url, token).await?;
        Ok(profile.into())
    }
}
