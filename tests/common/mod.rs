#![allow(dead_code)]

use std::{
    collections::{HashMap, VecDeque},
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{
    Method, StatusCode,
    header::{HeaderMap, HeaderValue, RETRY_AFTER},
};
use weekly_releases::{
    Res,
    error::{ApiError, CacheError},
    management::ResponseCache,
    model::{Album, Artist, Track, UserProfile},
    platform::Clock,
    spotify::{
        SpotifyClient, SpotifyConnector,
        transport::{HttpRequest, HttpResponse, HttpSender, Transport},
    },
};

pub const BASE_URL: &str = "https://api.test/v1";
pub const TOKEN: &str = "test-token";

pub fn url(path: &str) -> String {
    format!("{BASE_URL}{path}")
}

pub fn json_response(status: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: StatusCode::from_u16(status).unwrap(),
        headers: HeaderMap::new(),
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn ok(body: serde_json::Value) -> HttpResponse {
    json_response(200, body)
}

pub fn rate_limited(retry_after: Option<&str>) -> HttpResponse {
    let mut headers = HeaderMap::new();
    if let Some(value) = retry_after {
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
    }
    HttpResponse {
        status: StatusCode::TOO_MANY_REQUESTS,
        headers,
        body: Vec::new(),
    }
}

/// HTTP sender answering from per-URL scripts.
///
/// Responses for a URL are served in order; the last one repeats. URLs
/// without a script get a 404.
#[derive(Default)]
pub struct ScriptedSender {
    routes: Mutex<HashMap<String, VecDeque<Result<HttpResponse, String>>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&self, url: &str, response: HttpResponse) -> &Self {
        self.push(url, Ok(response))
    }

    pub fn fail(&self, url: &str, message: &str) -> &Self {
        self.push(url, Err(message.to_string()))
    }

    fn push(&self, url: &str, reply: Result<HttpResponse, String>) -> &Self {
        self.routes
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_urls(&self) -> Vec<String> {
        self.requests().into_iter().map(|r| r.url).collect()
    }

    pub fn count(&self, method: Method, url: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url == url)
            .count()
    }
}

#[async_trait]
impl HttpSender for ScriptedSender {
    async fn send(&self, request: &HttpRequest) -> Res<HttpResponse> {
        self.requests.lock().unwrap().push(request.clone());

        let mut routes = self.routes.lock().unwrap();
        let Some(queue) = routes.get_mut(&request.url) else {
            return Ok(json_response(404, serde_json::json!({"error": "not found"})));
        };
        let reply = if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue.front().cloned().unwrap()
        };

        reply.map_err(Into::into)
    }
}

/// Clock frozen at a fixed instant that records requested sleeps.
pub struct FakeClock {
    now: DateTime<Utc>,
    now_calls: AtomicUsize,
    sleeps: Mutex<Vec<Duration>>,
}

impl FakeClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            now_calls: AtomicUsize::new(0),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn new() -> Self {
        Self::at(Utc.with_ymd_and_hms(2017, 1, 1, 0, 0, 0).unwrap())
    }

    pub fn now_calls(&self) -> usize {
        self.now_calls.load(Ordering::SeqCst)
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        self.now_calls.fetch_add(1, Ordering::SeqCst);
        self.now
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl ResponseCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, data: &[u8]) -> Result<(), CacheError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), data.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Client against [`BASE_URL`] wired to fakes.
pub struct Harness {
    pub sender: Arc<ScriptedSender>,
    pub clock: Arc<FakeClock>,
    pub cache: Arc<MemoryCache>,
    pub client: SpotifyClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_max_retries(None)
    }

    pub fn with_max_retries(max_retries: Option<u32>) -> Self {
        let sender = Arc::new(ScriptedSender::new());
        let clock = Arc::new(FakeClock::new());
        let cache = Arc::new(MemoryCache::new());

        let transport = Transport::new(sender.clone(), clock.clone()).with_max_retries(max_retries);
        let client = SpotifyClient::new(BASE_URL, transport, cache.clone());

        Self {
            sender,
            clock,
            cache,
            client,
        }
    }
}

pub fn server_error(url: &str) -> ApiError {
    ApiError::Status {
        method: Method::GET,
        url: url.to_string(),
        status: StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Connector serving canned catalog data and recording every call.
#[derive(Default)]
pub struct FakeConnector {
    pub profile: UserProfile,
    pub followed: Vec<Artist>,
    pub saved: Vec<Album>,
    pub artist_albums: HashMap<String, Vec<Album>>,
    pub album_details: HashMap<String, Album>,
    pub playlist_id: String,
    /// Name of the operation that fails with HTTP 500.
    pub failing: Option<&'static str>,
    calls: Mutex<Vec<String>>,
    album_batches: Mutex<Vec<Vec<String>>>,
    added_tracks: Mutex<Vec<Track>>,
    created: Mutex<Vec<(String, String)>>,
}

impl FakeConnector {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> usize {
        self.calls()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    pub fn album_batches(&self) -> Vec<Vec<String>> {
        self.album_batches.lock().unwrap().clone()
    }

    pub fn added_tracks(&self) -> Vec<Track> {
        self.added_tracks.lock().unwrap().clone()
    }

    /// `(user_id, name)` of every created playlist.
    pub fn created(&self) -> Vec<(String, String)> {
        self.created.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> Result<(), ApiError> {
        let operation = call.split(':').next().unwrap_or_default().to_string();
        self.calls.lock().unwrap().push(call);
        if self.failing == Some(operation.as_str()) {
            return Err(server_error(&operation));
        }
        Ok(())
    }
}

#[async_trait]
impl SpotifyConnector for FakeConnector {
    async fn get_followed_artists(&self, _token: &str) -> Result<Vec<Artist>, ApiError> {
        self.record("followed".to_string())?;
        Ok(self.followed.clone())
    }

    async fn get_artist_albums(
        &self,
        _token: &str,
        artist_id: &str,
        market: &str,
    ) -> Result<Vec<Album>, ApiError> {
        self.record(format!("artist_albums:{artist_id}:{market}"))?;
        Ok(self
            .artist_albums
            .get(artist_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn get_saved_albums(&self, _token: &str) -> Result<Vec<Album>, ApiError> {
        self.record("saved".to_string())?;
        Ok(self.saved.clone())
    }

    async fn get_album_info(
        &self,
        _token: &str,
        album_ids: &[String],
    ) -> Result<Vec<Album>, ApiError> {
        self.record(format!("album_info:{}", album_ids.join(",")))?;
        self.album_batches.lock().unwrap().push(album_ids.to_vec());
        Ok(album_ids
            .iter()
            .filter_map(|id| self.album_details.get(id).cloned())
            .collect())
    }

    async fn get_user_profile(&self, _token: &str) -> Result<UserProfile, ApiError> {
        self.record("profile".to_string())?;
        Ok(self.profile.clone())
    }

    async fn create_playlist(
        &self,
        _token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        self.record(format!("create_playlist:{user_id}"))?;
        self.created
            .lock()
            .unwrap()
            .push((user_id.to_string(), name.to_string()));
        Ok(self.playlist_id.clone())
    }

    async fn add_tracks_to_playlist(
        &self,
        _token: &str,
        user_id: &str,
        playlist_id: &str,
        tracks: &[Track],
    ) -> Result<(), ApiError> {
        self.record(format!("add_tracks:{user_id}:{playlist_id}"))?;
        self.added_tracks.lock().unwrap().extend_from_slice(tracks);
        Ok(())
    }
}

pub fn artist(id: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: format!("{id} name"),
    }
}

pub fn track(id: &str, artist_id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("{id} title"),
        artist_id: artist_id.to_string(),
        duration_ms: 200_000,
    }
}

pub fn album(id: &str, artist_id: &str, release_date: &str) -> Album {
    Album {
        id: id.to_string(),
        name: format!("{id} title"),
        artist_ids: vec![artist_id.to_string()],
        artist_names: vec![format!("{artist_id} name")],
        release_date: release_date.to_string(),
        markets: vec!["DE".to_string()],
        tracks: Vec::new(),
    }
}

pub fn album_with_tracks(id: &str, artist_id: &str, release_date: &str, tracks: usize) -> Album {
    let mut album = album(id, artist_id, release_date);
    album.tracks = (1..=tracks)
        .map(|i| track(&format!("{id}-t{i}"), artist_id))
        .collect();
    album
}
