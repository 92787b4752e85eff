use std::io::Read;

use serde::Deserialize;

use crate::error::FetchError;

/// Song info as printed by the player (e.g. `rmpc song`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SongDescriptor {
    pub file: String,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Metadata {
    pub artist: String,
    pub title: String,
    #[serde(rename = "albumartist")]
    pub album_artist: String,
}

impl SongDescriptor {
    /// Consume the whole stream and decode it.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, FetchError> {
        let mut raw = Vec::new();
        reader.read_to_end(&mut raw).map_err(serde_json::Error::io)?;
        Ok(serde_json::from_slice(&raw)?)
    }

    pub fn artist(&self) -> &str {
        &self.metadata.artist
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn album_artist(&self) -> &str {
        &self.metadata.album_artist
    }
}
