//! Lyrics lookup
//!
//! This module provides:
//! - The document type a lookup yields
//! - The `LyricsProvider` capability the pipeline depends on
//! - LRCLIB and Spotify implementations of it
//! - Query construction from song metadata

pub mod lrclib;
pub mod parser;
pub mod query;
pub mod spotify;

use serde::Deserialize;

pub use lrclib::LrclibClient;
pub use query::{ArtistFallback, QueryStrategy};
pub use spotify::SpotifyClient;

/// A single line of lyrics with timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricLine {
    /// Offset in milliseconds from track start
    pub offset_ms: u64,
    pub text: String,
}

impl LyricLine {
    pub fn new(offset_ms: u64, text: String) -> Self {
        Self { offset_ms, text }
    }
}

/// Lines in the order the service returned them. Empty means not found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricsDocument {
    pub lines: Vec<LyricLine>,
}

impl LyricsDocument {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Something that can answer a free-text lyrics query.
#[allow(async_fn_in_trait)]
pub trait LyricsProvider {
    async fn lookup(&self, query: &str) -> anyhow::Result<LyricsDocument>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderKind {
    #[default]
    Lrclib,
    Spotify,
}

/// The provider selected at startup.
#[derive(Debug, Clone)]
pub enum Provider {
    Lrclib(LrclibClient),
    Spotify(SpotifyClient),
}

impl LyricsProvider for Provider {
    async fn lookup(&self, query: &str) -> anyhow::Result<LyricsDocument> {
        match self {
            Provider::Lrclib(c) => c.lookup(query).await,
            Provider::Spotify(c) => c.lookup(query).await,
        }
    }
}
