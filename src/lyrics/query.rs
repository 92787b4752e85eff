use serde::Deserialize;

use crate::song::SongDescriptor;

/// Which identity field goes into the lookup query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum QueryStrategy {
    /// `"<title> <artist>"`
    #[default]
    ArtistTitle,
    /// `"<albumartist> <title>"`
    AlbumArtistTitle,
}

/// Whether an empty preferred identity field may be replaced by the other one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ArtistFallback {
    #[default]
    Off,
    On,
}

impl QueryStrategy {
    /// Build the query string, or `None` if the song lacks a title or an
    /// identity usable under this strategy.
    pub fn query(self, song: &SongDescriptor, fallback: ArtistFallback) -> Option<String> {
        let title = song.title();
        if title.is_empty() {
            return None;
        }

        let (preferred, other) = match self {
            QueryStrategy::ArtistTitle => (song.artist(), song.album_artist()),
            QueryStrategy::AlbumArtistTitle => (song.album_artist(), song.artist()),
        };
        let artist = match (preferred.is_empty(), fallback) {
            (false, _) => preferred,
            (true, ArtistFallback::On) if !other.is_empty() => other,
            _ => return None,
        };

        Some(match self {
            QueryStrategy::ArtistTitle => format!("{} {}", title, artist),
            QueryStrategy::AlbumArtistTitle => format!("{} {}", artist, title),
        })
    }
}
