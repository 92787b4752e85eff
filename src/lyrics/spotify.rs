//! Spotify color-lyrics client
//!
//! Needs a web player access token. Getting or refreshing that token is up
//! to the caller; it is sent as a bearer token as-is.

use anyhow::Context;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use super::{LyricLine, LyricsDocument, LyricsProvider};

const SEARCH_URL: &str = "https://api.spotify.com/v1/search";
const LYRICS_URL: &str = "https://spclient.wg.spotify.com/color-lyrics/v2/track";

#[derive(Debug, Deserialize)]
struct SearchResponse {
    tracks: Option<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    #[serde(default)]
    items: Vec<TrackItem>,
}

#[derive(Debug, Deserialize)]
struct TrackItem {
    id: String,
    name: String,
}

#[derive(Debug, Deserialize)]
struct ColorLyricsResponse {
    lyrics: ColorLyrics,
}

#[derive(Debug, Deserialize)]
struct ColorLyrics {
    #[serde(rename = "syncType")]
    sync_type: Option<String>,
    #[serde(default)]
    lines: Vec<ColorLine>,
}

#[derive(Debug, Deserialize)]
struct ColorLine {
    #[serde(rename = "startTimeMs")]
    start_time_ms: String,
    #[serde(default)]
    words: String,
}

#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: reqwest::Client,
}

impl SpotifyClient {
    pub fn new(token: &str) -> anyhow::Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static("Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36"),
        );
        headers.insert("app-platform", HeaderValue::from_static("WebPlayer"));
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", token.trim()))
            .context("access token is not a valid header value")?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .context("build reqwest client")?;
        Ok(Self { http })
    }

    async fn find_track(&self, query: &str) -> anyhow::Result<Option<TrackItem>> {
        let url = format!(
            "{}?q={}&type=track&limit=1",
            SEARCH_URL,
            urlencoding::encode(query)
        );
        let v: SearchResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("send track search request")?
            .error_for_status()
            .context("track search http status")?
            .json()
            .await
            .context("parse track search json")?;

        Ok(v.tracks.and_then(|p| p.items.into_iter().next()))
    }

    async fn color_lyrics(&self, track_id: &str) -> anyhow::Result<Option<ColorLyrics>> {
        let url = format!("{}/{}?format=json&market=from_token", LYRICS_URL, track_id);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .context("send lyrics request")?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let v: ColorLyricsResponse = response
            .error_for_status()
            .context("lyrics http status")?
            .json()
            .await
            .context("parse lyrics json")?;
        Ok(Some(v.lyrics))
    }
}

fn to_document(lyrics: ColorLyrics) -> LyricsDocument {
    if lyrics.sync_type.as_deref() == Some("UNSYNCED") {
        return LyricsDocument::default();
    }

    let lines = lyrics
        .lines
        .into_iter()
        .filter_map(|l| {
            let ms = l.start_time_ms.trim().parse().ok()?;
            Some(LyricLine::new(ms, l.words))
        })
        .collect();
    LyricsDocument { lines }
}

impl LyricsProvider for SpotifyClient {
    async fn lookup(&self, query: &str) -> anyhow::Result<LyricsDocument> {
        let Some(track) = self.find_track(query).await? else {
            return Ok(LyricsDocument::default());
        };
        debug!(id = %track.id, name = %track.name, "Spotify match");

        Ok(self
            .color_lyrics(&track.id)
            .await?
            .map(to_document)
            .unwrap_or_default())
    }
}
