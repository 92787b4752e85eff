//! LRCLIB API client
//!
//! LRCLIB is a free lyrics API that provides synchronized (LRC format) lyrics.
//! API Documentation: https://lrclib.net/docs

use anyhow::Context;
use serde::Deserialize;
use tracing::debug;

use super::{LyricsDocument, LyricsProvider, parser};

/// One entry of the `/search` response
#[derive(Debug, Deserialize, Clone)]
struct LrclibRecord {
    #[serde(rename = "trackName")]
    track_name: Option<String>,
    #[serde(rename = "artistName")]
    artist_name: Option<String>,
    #[serde(rename = "syncedLyrics")]
    synced_lyrics: Option<String>,
}

/// LRCLIB API client
#[derive(Debug, Clone)]
pub struct LrclibClient {
    client: reqwest::Client,
    base_url: String,
}

impl LrclibClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://lrclib.net/api";
    const USER_AGENT: &'static str = concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    );

    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(Self::USER_AGENT)
            .build()
            .context("build reqwest client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search by free-text query
    async fn search(&self, query: &str) -> anyhow::Result<LyricsDocument> {
        let url = format!("{}/search?q={}", self.base_url, urlencoding::encode(query));

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("send LRCLIB search request")?;

        let status = response.status();
        let body = response.bytes().await.context("read LRCLIB search body")?;
        search_document(status, &body)
    }
}

/// Turn a `/search` response into the document of the first record with
/// synced lyrics. 404 or no synced record yields an empty document.
fn search_document(status: reqwest::StatusCode, body: &[u8]) -> anyhow::Result<LyricsDocument> {
    if status == reqwest::StatusCode::NOT_FOUND {
        return Ok(LyricsDocument::default());
    }
    if !status.is_success() {
        anyhow::bail!("LRCLIB search error: {}", status);
    }

    let results: Vec<LrclibRecord> = serde_json::from_slice(body).context("parse LRCLIB search json")?;
    let Some(record) = pick_synced(results) else {
        return Ok(LyricsDocument::default());
    };

    debug!(
        track = record.track_name.as_deref().unwrap_or_default(),
        artist = record.artist_name.as_deref().unwrap_or_default(),
        "LRCLIB match"
    );

    Ok(record
        .synced_lyrics
        .as_deref()
        .map(parser::parse)
        .unwrap_or_default())
}

fn pick_synced(results: Vec<LrclibRecord>) -> Option<LrclibRecord> {
    results
        .into_iter()
        .find(|r| r.synced_lyrics.as_deref().is_some_and(|s| !s.trim().is_empty()))
}

impl LyricsProvider for LrclibClient {
    async fn lookup(&self, query: &str) -> anyhow::Result<LyricsDocument> {
        self.search(query).await
    }
}
