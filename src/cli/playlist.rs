use std::path::PathBuf;

use chrono::Utc;

use crate::{error, info, service, success, utils, warning};

/// Default playlist name for the given day, e.g. `Weekly Releases - 2024-05-17`.
pub fn default_playlist_name(date: &str) -> String {
    format!("Weekly Releases - {date}")
}

/// Collects recent releases and writes a sample track of each into a new
/// private playlist.
pub async fn playlist(
    token: &str,
    release_kinds: &utils::ReleaseKinds,
    name: Option<String>,
    cache_dir: Option<PathBuf>,
) {
    let service = super::release_service(release_kinds, cache_dir);

    let pb = super::spinner("Collecting recent releases of followed artists...");
    let releases = match service.get_recent_releases(token).await {
        Ok(releases) => releases,
        Err(e) => {
            pb.finish_and_clear();
            error!("{}", e);
        }
    };
    pb.finish_and_clear();

    let tracks = service::playlist_tracks(&releases);
    if tracks.is_empty() {
        warning!("None of the {} releases has a track to add", releases.len());
    }

    let name = name.unwrap_or_else(|| {
        default_playlist_name(&Utc::now().format("%Y-%m-%d").to_string())
    });

    info!("Creating a playlist from {} releases...", releases.len());
    match service
        .create_playlist_from_tracks(token, &name, &tracks)
        .await
    {
        Ok(playlist_id) => success!(
            "Playlist '{}' ({}) created with {} tracks",
            name,
            playlist_id,
            tracks.len()
        ),
        Err(e) => error!("{}", e),
    }
}
