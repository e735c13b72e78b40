//! # CLI Module
//!
//! User-facing commands of Weekly Releases. Each command wires the production
//! Spotify client together, runs the release pipeline and presents the result:
//!
//! - [`list_releases`] - prints recent releases as a table (`--dry-run`)
//! - [`playlist`] - creates a private playlist from recent releases
//!
//! ## Wiring
//!
//! ```text
//! ReleaseService ── SystemClock
//!      ↓
//! SpotifyClient ── DiskCache
//!      ↓
//! Transport ── ReqwestSender
//! ```
//!
//! The API base URL and the rate limit retry cap come from [`crate::config`].
//! The cache directory can be overridden per run.
//!
//! Fatal errors are reported through the `error!` macro, which exits the
//! process with status 1.

mod playlist;
mod releases;

pub use playlist::playlist;
pub use releases::list_releases;

use std::{path::PathBuf, sync::Arc, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    config,
    management::DiskCache,
    platform::{Clock, SystemClock},
    service::ReleaseService,
    spotify::{
        SpotifyClient,
        transport::{ReqwestSender, Transport},
    },
    utils::ReleaseKinds,
};

/// Builds the release service backed by the live Spotify Web API.
pub fn release_service(release_kinds: &ReleaseKinds, cache_dir: Option<PathBuf>) -> ReleaseService {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let cache = match cache_dir {
        Some(dir) => DiskCache::new(dir),
        None => DiskCache::default_location(),
    };
    tracing::debug!(cache_dir = %cache.base_dir().display(), "using response cache");

    let transport = Transport::new(Arc::new(ReqwestSender::new()), Arc::clone(&clock))
        .with_max_retries(config::max_rate_limit_retries());
    let client = SpotifyClient::new(config::api_url(), transport, Arc::new(cache))
        .with_release_kinds(release_kinds.clone());

    ReleaseService::new(Arc::new(client), clock)
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
