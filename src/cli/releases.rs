use std::path::PathBuf;

use tabled::Table;

use crate::{error, info, utils};

/// Prints the recent releases as a table without touching any playlist.
///
/// Rows are sorted by release date, newest first, then by artists.
pub async fn list_releases(token: &str, release_kinds: &utils::ReleaseKinds, cache_dir: Option<PathBuf>) {
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

    if releases.is_empty() {
        info!("No releases in the last {} days", utils::RECENT_RELEASE_DAYS);
        return;
    }

    let mut rows = utils::release_table_rows(&releases);
    utils::sort_release_table_rows(&mut rows);

    println!("{}", Table::new(rows));
    info!("{} releases found", releases.len());
}
