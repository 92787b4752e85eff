use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::Settings;
use crate::error::FetchError;
use crate::library;
use crate::lrc;
use crate::lyrics::LyricsProvider;
use crate::song::SongDescriptor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingMetadata,
    AlreadyExists(PathBuf),
}

/// How a run ended without an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Skipped(SkipReason),
    NotFound,
    Written(PathBuf),
    /// Dry run: the rendered LRC text instead of a file.
    Printed(String),
}

/// Fetch lyrics for `song` and write them next to the library.
pub async fn run<P: LyricsProvider>(
    settings: &Settings,
    song: &SongDescriptor,
    provider: &P,
    dry_run: bool,
) -> Result<Outcome, FetchError> {
    let query = settings.strategy.query(song, settings.fallback);
    let lrc_path = if song.file.is_empty() {
        None
    } else {
        library::lrc_path(&settings.library_root, &song.file)
    };
    let (Some(query), Some(lrc_path)) = (query, lrc_path) else {
        info!("Missing artist, title, or file path, skipping lyrics fetch.");
        return Ok(Outcome::Skipped(SkipReason::MissingMetadata));
    };

    if lrc_path.exists() {
        info!("LRC file already exists: {}", lrc_path.display());
        return Ok(Outcome::Skipped(SkipReason::AlreadyExists(lrc_path)));
    }

    info!("Fetching lyrics for {}...", query);
    let doc = match provider.lookup(&query).await {
        Ok(doc) => doc,
        Err(e) => {
            warn!("Lyrics lookup failed for {}: {:#}", query, e);
            Default::default()
        }
    };
    if doc.is_empty() {
        info!("Lyrics not found for {}", query);
        return Ok(Outcome::NotFound);
    }
    info!("Found {} lines of lyrics for {}", doc.len(), query);

    if dry_run {
        return Ok(Outcome::Printed(lrc::render(&doc)));
    }

    lrc::write(&lrc_path, &doc)?;
    info!("Lyrics saved to: {}", lrc_path.display());
    Ok(Outcome::Written(lrc_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lyrics::{ArtistFallback, LyricLine, LyricsDocument, ProviderKind, QueryStrategy};
    use crate::song::Metadata;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Returns a canned result and records every query.
    struct FakeProvider {
        result: Option<LyricsDocument>,
        queries: RefCell<Vec<String>>,
    }

    impl FakeProvider {
        fn returning(lines: &[(u64, &str)]) -> Self {
            Self {
                result: Some(LyricsDocument {
                    lines: lines
                        .iter()
                        .map(|(ms, text)| LyricLine::new(*ms, text.to_string()))
                        .collect(),
                }),
                queries: RefCell::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                result: None,
                queries: RefCell::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.queries.borrow().len()
        }
    }

    impl LyricsProvider for FakeProvider {
        async fn lookup(&self, query: &str) -> anyhow::Result<LyricsDocument> {
            self.queries.borrow_mut().push(query.to_string());
            self.result
                .clone()
                .ok_or_else(|| anyhow::anyhow!("connection refused"))
        }
    }

    fn settings(root: &std::path::Path) -> Settings {
        Settings {
            library_root: root.to_path_buf(),
            strategy: QueryStrategy::ArtistTitle,
            fallback: ArtistFallback::Off,
            provider: ProviderKind::Lrclib,
            lrclib_url: String::new(),
            token: None,
        }
    }

    fn make_song(file: &str, artist: &str, title: &str, album_artist: &str) -> SongDescriptor {
        SongDescriptor {
            file: file.to_string(),
            metadata: Metadata {
                artist: artist.to_string(),
                title: title.to_string(),
                album_artist: album_artist.to_string(),
            },
        }
    }

    #[tokio::test]
    async fn test_writes_lrc() {
        let dir = TempDir::new().unwrap();
        let provider = FakeProvider::returning(&[(5000, "Hello"), (65230, "World")]);
        let song = make_song("/m/Song.mp3", "A", "T", "");

        let outcome = run(&settings(dir.path()), &song, &provider, false).await.unwrap();

        let path = dir.path().join("Song.lrc");
        assert_eq!(outcome, Outcome::Written(path.clone()));
        assert_eq!(fs::read_to_string(&path).unwrap(), "[00:05.00] Hello\n[01:05.23] World\n");
        assert_eq!(*provider.queries.borrow(), vec!["T A".to_string()]);
    }

    #[tokio::test]
    async fn test_existing_file_skips_lookup() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Song.lrc");
        fs::write(&path, "keep me").unwrap();
        let provider = FakeProvider::returning(&[(0, "x")]);

        let outcome = run(&settings(dir.path()), &make_song("/m/Song.mp3", "A", "T", ""), &provider, false)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Skipped(SkipReason::AlreadyExists(path.clone())));
        assert_eq!(provider.calls(), 0);
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_missing_metadata_skips() {
        let dir = TempDir::new().unwrap();
        let cases = [
            make_song("/m/Song.mp3", "A", "", "AA"),
            make_song("/m/Song.mp3", "", "T", ""),
            make_song("", "A", "T", "AA"),
            // preferred field empty and no fallback configured
            make_song("/m/Song.mp3", "", "T", "AA"),
        ];
        for song in &cases {
            let provider = FakeProvider::returning(&[(0, "x")]);
            let outcome = run(&settings(dir.path()), song, &provider, false).await.unwrap();
            assert_eq!(outcome, Outcome::Skipped(SkipReason::MissingMetadata), "{song:?}");
            assert_eq!(provider.calls(), 0);
        }
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_not_found_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let song = make_song("/m/Song.mp3", "A", "T", "");

        let empty = FakeProvider::returning(&[]);
        let outcome = run(&settings(dir.path()), &song, &empty, false).await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);

        let failing = FakeProvider::failing();
        let outcome = run(&settings(dir.path()), &song, &failing, false).await.unwrap();
        assert_eq!(outcome, Outcome::NotFound);
        assert_eq!(failing.calls(), 1);

        assert!(!dir.path().join("Song.lrc").exists());
    }

    #[tokio::test]
    async fn test_album_artist_strategy() {
        let dir = TempDir::new().unwrap();
        let mut s = settings(dir.path());
        s.strategy = QueryStrategy::AlbumArtistTitle;
        let provider = FakeProvider::returning(&[(0, "x")]);

        run(&s, &make_song("/m/a.b.mp3", "A", "T", "AA"), &provider, false)
            .await
            .unwrap();

        assert_eq!(*provider.queries.borrow(), vec!["AA T".to_string()]);
        assert!(dir.path().join("a.b.lrc").exists());
    }

    #[tokio::test]
    async fn test_fallback_to_other_artist() {
        let dir = TempDir::new().unwrap();
        let mut s = settings(dir.path());
        s.fallback = ArtistFallback::On;
        let provider = FakeProvider::returning(&[(0, "x")]);

        run(&s, &make_song("/m/Song.mp3", "", "T", "AA"), &provider, false)
            .await
            .unwrap();

        assert_eq!(*provider.queries.borrow(), vec!["T AA".to_string()]);
    }

    #[tokio::test]
    async fn test_dry_run() {
        let dir = TempDir::new().unwrap();
        let provider = FakeProvider::returning(&[(5000, "Hello")]);

        let outcome = run(&settings(dir.path()), &make_song("/m/Song.mp3", "A", "T", ""), &provider, true)
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Printed("[00:05.00] Hello\n".to_string()));
        assert!(!dir.path().join("Song.lrc").exists());
    }

    #[tokio::test]
    async fn test_write_failure() {
        let dir = TempDir::new().unwrap();
        let provider = FakeProvider::returning(&[(0, "x")]);
        let missing_root = dir.path().join("missing");

        let err = run(&settings(&missing_root), &make_song("/m/Song.mp3", "A", "T", ""), &provider, false)
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Io { .. }));
    }
}
