use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client, Method, StatusCode,
    header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, RETRY_AFTER},
};
use serde::Serialize;

use crate::{Res, error::ApiError, platform::Clock};

/// Delay used when a 429 response carries no usable `Retry-After` header.
pub const DEFAULT_RETRY_AFTER: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// Sends a single HTTP request without any retry logic.
///
/// An `Err` means no response was received at all (DNS, refused connection,
/// broken body stream). Every HTTP status, including errors, is an `Ok`.
#[async_trait]
pub trait HttpSender: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> Res<HttpResponse>;
}

/// [`HttpSender`] backed by a shared reqwest client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestSender {
    client: Client,
}

impl ReqwestSender {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

#[async_trait]
impl HttpSender for ReqwestSender {
    async fn send(&self, request: &HttpRequest) -> Res<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Request payload together with its content type.
#[derive(Debug, Clone)]
pub struct RequestBody {
    pub content_type: &'static str,
    pub data: Vec<u8>,
}

impl RequestBody {
    pub fn json<T: Serialize>(value: &T) -> Result<Self, ApiError> {
        Ok(Self {
            content_type: "application/json",
            data: serde_json::to_vec(value).map_err(ApiError::Encode)?,
        })
    }
}

/// Authenticated request executor that waits out HTTP 429 responses.
///
/// A 429 is answered by sleeping for the `Retry-After` seconds the server
/// sent (one second when missing or unparseable) and sending the identical
/// request again. Without a retry cap this repeats until the server answers
/// with something else. Every other non-success status and every transport
/// failure is returned right away.
pub struct Transport {
    sender: Arc<dyn HttpSender>,
    clock: Arc<dyn Clock>,
    max_retries: Option<u32>,
}

impl Transport {
    pub fn new(sender: Arc<dyn HttpSender>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sender,
            clock,
            max_retries: None,
        }
    }

    /// Limits how many times a rate limited request is retried. `None` retries forever.
    pub fn with_max_retries(mut self, max_retries: Option<u32>) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub async fn request(
        &self,
        method: Method,
        url: &str,
        token: &str,
        body: Option<RequestBody>,
    ) -> Result<Vec<u8>, ApiError> {
        let request = build_request(method, url, token, body)?;
        let mut rate_limited: u32 = 0;

        loop {
            let response =
                self.sender
                    .send(&request)
                    .await
                    .map_err(|source| ApiError::Transport {
                        method: request.method.clone(),
                        url: request.url.clone(),
                        source,
                    })?;

            if response.status == StatusCode::TOO_MANY_REQUESTS {
                rate_limited += 1;
                if self.max_retries.is_some_and(|max| rate_limited > max) {
                    return Err(ApiError::RateLimited {
                        method: request.method,
                        url: request.url,
                        attempts: rate_limited,
                    });
                }

                let delay = retry_after(&response.headers);
                tracing::warn!(
                    method = %request.method,
                    url = %request.url,
                    delay_secs = delay.as_secs(),
                    "rate limited, retrying"
                );
                self.clock.sleep(delay).await;
                continue;
            }

            tracing::debug!(
                method = %request.method,
                status = response.status.as_u16(),
                url = %request.url,
                "request completed"
            );

            return match response.status {
                StatusCode::OK | StatusCode::CREATED => Ok(response.body),
                status => Err(ApiError::Status {
                    method: request.method,
                    url: request.url,
                    status,
                }),
            };
        }
    }
}

fn build_request(
    method: Method,
    url: &str,
    token: &str,
    body: Option<RequestBody>,
) -> Result<HttpRequest, ApiError> {
    let mut headers = HeaderMap::new();
    let auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|e| {
        ApiError::Transport {
            method: method.clone(),
            url: url.to_string(),
            source: Box::new(e),
        }
    })?;
    headers.insert(AUTHORIZATION, auth);

    let body = body.map(|b| {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(b.content_type));
        b.data
    });

    Ok(HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body,
    })
}

/// Reads the back-off delay of a 429 response.
pub fn retry_after(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_RETRY_AFTER)
}
