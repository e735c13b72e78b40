use super::{SpotifyClient, pagination::Pages};
use crate::{
    error::ApiError,
    model::Album,
    types::{self, AlbumResponse, GetSeveralAlbumsResponse, SavedAlbumsResponse},
};

/// Page size for artist albums and saved albums; 50 is the API maximum.
pub const ALBUMS_PAGE_SIZE: u32 = 50;

/// Cache key of a single album fetched through the bulk lookup.
pub fn album_cache_key(album_id: &str) -> String {
    format!("album:{album_id}")
}

impl SpotifyClient {
    /// Retrieves the discography of an artist as available in `market`.
    ///
    /// Every page is cached under its exact request URL, so a repeated run
    /// walking the same pages does not touch the network. The `market`
    /// parameter is left out when empty.
    pub async fn get_artist_albums(
        &self,
        token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ApiError> {
        let mut url = self.url(&format!("/artists/{artist_id}/albums?"));
        if !market.is_empty() {
            url.push_str(&format!("market={market}&"));
        }
        if let Some(kinds) = &self.release_kinds {
            url.push_str(&format!("include_groups={kinds}&"));
        }
        url.push_str(&format!("limit={ALBUMS_PAGE_SIZE}"));

        Pages::<AlbumResponse>::new(self, token, url)
            .cached()
            .collect_all()
            .await
    }

    /// Retrieves all albums in the user's library. Never cached.
    pub async fn get_saved_albums(&self, token: &str) -> Result<Vec<Album>, ApiError> {
        let url = self.url(&format!("/me/albums?limit={ALBUMS_PAGE_SIZE}"));

        Pages::<SavedAlbumsResponse>::new(self, token, url)
            .collect_all()
            .await
    }

    /// Retrieves full album objects, tracks included, for `album_ids`.
    ///
    /// Albums found under their `album:<id>` cache key are not requested
    /// again. All remaining ids go out in one `GET /albums?ids=...` and each
    /// returned album is cached on its own. Freshly fetched albums come first
    /// in the result, cache hits after them.
    pub async fn get_album_info(
        &self,
        token: &str,
        album_ids: &[String],
    ) -> Result<Vec<Album>, ApiError> {
        let mut hits: Vec<Album> = Vec::new();
        let mut missing: Vec<&str> = Vec::new();

        for id in album_ids {
            match self.cached_album(id).await {
                Some(album) => hits.push(album),
                None => missing.push(id),
            }
        }

        let mut albums = Vec::with_capacity(album_ids.len());
        if !missing.is_empty() {
            let url = self.url(&format!("/albums?ids={}", missing.join(",")));
            let response: GetSeveralAlbumsResponse = self.get_json(&url, token).await?;

            for album in response.albums.into_iter().flatten() {
                match serde_json::to_vec(&album) {
                    Ok(data) => self.cache.try_set(&album_cache_key(&album.id), &data).await,
                    Err(e) => tracing::warn!(album_id = %album.id, error = %e, "cannot encode album for cache"),
                }
                albums.push(album.into());
            }
        }

        albums.extend(hits);
        Ok(albums)
    }

    async fn cached_album(&self, album_id: &str) -> Option<Album> {
        let key = album_cache_key(album_id);
        let data = self.cache.try_get(&key).await?;

        match serde_json::from_slice::<types::Album>(&data) {
            Ok(album) => Some(album.into()),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring undecodable cache entry");
                None
            }
        }
    }
}
