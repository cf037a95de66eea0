//! Twilio REST API client.
//!
//! Thin client over the recordings resource:
//! - Day-filtered listing that follows `next_page_uri`
//! - Media download with HTTP Basic auth
//! - Deletion, treating an already-deleted recording as success
//! - Tracing span per request

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use recmig_models::{RecordingItem, RecordingSid, DATE_FORMAT};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info_span, warn, Instrument};
use url::Url;

use crate::error::{TwilioError, TwilioResult};
use crate::source::RecordingSource;
use crate::types::RecordingPage;

/// Default API host.
pub const DEFAULT_API_BASE_URL: &str = "https://api.twilio.com";

/// REST API version prefix.
const API_VERSION: &str = "2010-04-01";

/// Largest page size the API accepts.
const MAX_PAGE_SIZE: u32 = 1000;

// =============================================================================
// Configuration
// =============================================================================

/// Twilio client configuration.
#[derive(Clone)]
pub struct TwilioConfig {
    /// Account SID (`AC...`)
    pub account_sid: String,
    /// Auth token
    pub auth_token: String,
    /// API base URL, without trailing slash
    pub api_base_url: String,
    /// Records requested per listing page
    pub page_size: u32,
    /// Request timeout
    pub timeout: Duration,
    /// Connect timeout
    pub connect_timeout: Duration,
}

impl std::fmt::Debug for TwilioConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TwilioConfig")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("page_size", &self.page_size)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl TwilioConfig {
    pub fn new(account_sid: impl Into<String>, auth_token: impl Into<String>) -> Self {
        Self {
            account_sid: account_sid.into(),
            auth_token: auth_token.into(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            page_size: MAX_PAGE_SIZE,
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Point the client at another API host (used by tests).
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create config from environment variables.
    pub fn from_env() -> TwilioResult<Self> {
        let account_sid = std::env::var("TWILIO_ACCOUNT_SID")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TwilioError::config_error("TWILIO_ACCOUNT_SID not set"))?;
        let auth_token = std::env::var("TWILIO_AUTH_TOKEN")
            .ok()
            .filter(|v| !v.is_empty())
            .ok_or_else(|| TwilioError::config_error("TWILIO_AUTH_TOKEN not set"))?;

        let mut config = Self::new(account_sid, auth_token);

        if let Ok(base) = std::env::var("TWILIO_API_BASE_URL") {
            Url::parse(&base).map_err(|e| {
                TwilioError::config_error(format!("TWILIO_API_BASE_URL is not a valid URL: {}", e))
            })?;
            config = config.with_api_base_url(base);
        }

        if let Some(secs) = std::env::var("TWILIO_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

// =============================================================================
// Client
// =============================================================================

/// Twilio recordings client.
#[derive(Clone)]
pub struct TwilioClient {
    http: Client,
    config: TwilioConfig,
}

impl TwilioClient {
    /// Create a new Twilio client.
    pub fn new(config: TwilioConfig) -> TwilioResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(Duration::from_secs(90))
            .pool_max_idle_per_host(16)
            .user_agent(concat!("recmig-twilio/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(TwilioError::Network)?;

        Ok(Self { http, config })
    }

    fn recordings_url(&self) -> String {
        format!(
            "{}/{}/Accounts/{}/Recordings.json",
            self.config.api_base_url, API_VERSION, self.config.account_sid
        )
    }

    fn recording_url(&self, sid: &RecordingSid) -> String {
        format!(
            "{}/{}/Accounts/{}/Recordings/{}.json",
            self.config.api_base_url, API_VERSION, self.config.account_sid, sid
        )
    }

    /// Absolute URL of a recording's MP3 media.
    pub fn media_url(&self, item: &RecordingItem) -> String {
        let path = match item.uri.strip_suffix(".json") {
            Some(stem) => format!("{}.mp3", stem),
            None => item.uri.replacen(".json", ".mp3", 1),
        };
        format!("{}{}", self.config.api_base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
    }

    async fn fetch_page(&self, request: RequestBuilder) -> TwilioResult<RecordingPage> {
        let response = self.authed(request).send().await?;
        let response = ensure_success(response)?;
        response
            .json::<RecordingPage>()
            .await
            .map_err(|e| TwilioError::InvalidResponse(format!("recording page: {}", e)))
    }

    // =========================================================================
    // Internal Helpers
    // =========================================================================

    /// Execute a request inside a tracing span.
    async fn execute_request<T, F>(&self, operation: &str, target: &str, fut: F) -> TwilioResult<T>
    where
        F: std::future::Future<Output = TwilioResult<T>>,
    {
        let span = info_span!("twilio_request", operation = %operation, target = %target);

        let start = Instant::now();
        let result = fut.instrument(span).await;
        debug!(
            operation = %operation,
            target = %target,
            latency_ms = start.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "Twilio request finished"
        );

        result
    }
}

fn ensure_success(response: Response) -> TwilioResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(TwilioError::from_http_status(
            status.as_u16(),
            status.canonical_reason().unwrap_or("Unknown Status"),
        ))
    }
}

#[async_trait]
impl RecordingSource for TwilioClient {
    async fn list_recordings(&self, date: NaiveDate) -> TwilioResult<Vec<RecordingItem>> {
        let day = date.format(DATE_FORMAT).to_string();

        self.execute_request("list_recordings", &day, async {
            let first = self.http.get(self.recordings_url()).query(&[
                ("DateCreated", day.clone()),
                ("PageSize", self.config.page_size.to_string()),
            ]);

            let mut page = self.fetch_page(first).await?;
            let mut items: Vec<RecordingItem> = Vec::new();

            loop {
                for resource in page.recordings {
                    let sid = resource.sid.clone();
                    match resource.into_item(date) {
                        Some(item) => items.push(item),
                        None => warn!(
                            recording_sid = %sid,
                            "Recording {} has no media URI; skipping", sid
                        ),
                    }
                }

                match page.next_page_uri.filter(|uri| !uri.is_empty()) {
                    Some(next) => {
                        let url = format!("{}{}", self.config.api_base_url, next);
                        page = self.fetch_page(self.http.get(url)).await?;
                    }
                    None => break,
                }
            }

            Ok(items)
        })
        .await
    }

    async fn fetch_media(&self, item: &RecordingItem) -> TwilioResult<Vec<u8>> {
        let url = self.media_url(item);

        self.execute_request("fetch_media", item.sid.as_str(), async {
            let response = self.authed(self.http.get(&url)).send().await?;
            let response = ensure_success(response)?;
            let bytes = response.bytes().await?;
            Ok(bytes.to_vec())
        })
        .await
    }

    async fn delete_recording(&self, sid: &RecordingSid) -> TwilioResult<()> {
        let url = self.recording_url(sid);

        self.execute_request("delete_recording", sid.as_str(), async {
            let response = self.authed(self.http.delete(&url)).send().await?;

            match response.status() {
                StatusCode::NOT_FOUND => {
                    warn!(recording_sid = %sid, "Recording already absent at provider, treating delete as done");
                    Ok(())
                }
                _ => ensure_success(response).map(|_| ()),
            }
        })
        .await
    }
}
