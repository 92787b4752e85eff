//! LRC writer
//!
//! Renders a lyrics document as `[mm:ss.xx] text` lines.

use std::fmt::Write as _;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::error::FetchError;
use crate::lyrics::LyricsDocument;

/// `[MM:SS.CC]` for an offset in milliseconds. Centiseconds are truncated.
pub fn format_timestamp(offset_ms: u64) -> String {
    let minutes = offset_ms / 60_000;
    let seconds = (offset_ms % 60_000) / 1000;
    let centis = (offset_ms % 1000) / 10;
    format!("[{:02}:{:02}.{:02}]", minutes, seconds, centis)
}

/// One line per lyric, in document order.
pub fn render(doc: &LyricsDocument) -> String {
    let mut out = String::new();
    for line in &doc.lines {
        let _ = writeln!(out, "{} {}", format_timestamp(line.offset_ms), line.text);
    }
    out
}

/// Create or truncate `path` with the rendered document.
pub fn write(path: &Path, doc: &LyricsDocument) -> Result<(), FetchError> {
    let io_err = |source: std::io::Error| FetchError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut file = options.open(path).map_err(io_err)?;
    file.write_all(render(doc).as_bytes()).map_err(io_err)?;
    Ok(())
}
