//! Cursor-following pagination.
//!
//! Spotify list endpoints embed the URL of the following page in a `next`
//! field. [`Pages`] walks that chain one request at a time and stops as soon
//! as a page comes back without a `next` URL.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use super::SpotifyClient;
use crate::error::ApiError;

/// Items of one page plus the URL of the page after it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    /// An empty `next` string ends the chain just like a missing one.
    pub fn new(items: Vec<T>, next: Option<String>) -> Self {
        Self {
            items,
            next: next.filter(|url| !url.is_empty()),
        }
    }
}

/// A paginated response body.
pub trait Paginated: DeserializeOwned + Send {
    type Item: Send;

    fn into_page(self) -> Page<Self::Item>;
}

/// Lazy, finite sequence of pages starting at a given URL.
pub struct Pages<'a, R> {
    client: &'a SpotifyClient,
    token: &'a str,
    next: Option<String>,
    cached: bool,
    _response: PhantomData<fn() -> R>,
}

impl<'a, R: Paginated> Pages<'a, R> {
    pub(crate) fn new(client: &'a SpotifyClient, token: &'a str, first_url: String) -> Self {
        Self {
            client,
            token,
            next: Some(first_url),
            cached: false,
            _response: PhantomData,
        }
    }

    /// Serve each page from the response cache when possible, keyed by its URL.
    pub(crate) fn cached(mut self) -> Self {
        self.cached = true;
        self
    }

    /// Fetches the next page. Returns `Ok(None)` once the chain is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<R::Item>>, ApiError> {
        let Some(url) = self.next.take() else {
            return Ok(None);
        };

        let response: R = if self.cached {
            self.client.get_json_cached(&url, self.token).await?
        } else {
            self.client.get_json(&url, self.token).await?
        };

        let page = response.into_page();
        self.next = page.next;
        Ok(Some(page.items))
    }

    /// Concatenates all remaining pages in chain order.
    pub async fn collect_all(mut self) -> Result<Vec<R::Item>, ApiError> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page);
        }
        Ok(items)
    }
}
