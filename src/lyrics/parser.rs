//! LRC text parser
//!
//! Turns synced lyrics returned as LRC text into a [`LyricsDocument`]:
//! [mm:ss.xx] Lyrics line here
//!
//! Lines keep the order they appear in. Metadata tags like `[ar:Artist]` and
//! lines without a timestamp are dropped.

use super::{LyricLine, LyricsDocument};

/// Parse LRC formatted lyrics
pub fn parse(content: &str) -> LyricsDocument {
    let mut lines = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || is_metadata(line) {
            continue;
        }

        if let Some((timestamps, text)) = parse_timed_line(line) {
            lines.extend(
                timestamps
                    .into_iter()
                    .map(|ms| LyricLine::new(ms, text.to_string())),
            );
        }
    }

    LyricsDocument { lines }
}

/// Metadata tag like [ti:Title]
fn is_metadata(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('[') else {
        return false;
    };
    let Some((tag, _)) = rest.split_once(':') else {
        return false;
    };

    // Metadata tags are typically 2-6 letters (ar, ti, offset, ...)
    !tag.is_empty() && tag.len() <= 6 && tag.chars().all(|c| c.is_ascii_alphabetic())
}

/// Parse a timed line like [00:12.34]Lyrics or [00:12.34][00:15.00]Lyrics
fn parse_timed_line(line: &str) -> Option<(Vec<u64>, &str)> {
    let mut timestamps = Vec::new();
    let mut rest = line;

    while let Some(inner) = rest.strip_prefix('[') {
        let Some(end) = inner.find(']') else {
            break;
        };
        let Some(ms) = parse_timestamp(&inner[..end]) else {
            break;
        };
        timestamps.push(ms);
        rest = &inner[end + 1..];
    }

    if timestamps.is_empty() {
        return None;
    }

    Some((timestamps, rest.trim()))
}

/// Parse timestamp string like "00:12.34" or "00:12:34" to milliseconds
fn parse_timestamp(s: &str) -> Option<u64> {
    let parts: Vec<&str> = s.split([':', '.']).collect();

    match parts.as_slice() {
        [min, sec] => {
            let min: u64 = min.parse().ok()?;
            let sec: u64 = sec.parse().ok()?;
            to_millis(min, sec, 0)
        }
        [min, sec, frac] => {
            let min: u64 = min.parse().ok()?;
            let sec: u64 = sec.parse().ok()?;
            // "34" is centiseconds, "340" milliseconds
            let ms: u64 = match frac.len() {
                1 => frac.parse::<u64>().ok()? * 100,
                2 => frac.parse::<u64>().ok()? * 10,
                3 => frac.parse().ok()?,
                _ => return None,
            };
            to_millis(min, sec, ms)
        }
        _ => None,
    }
}

/// `None` if the total does not fit in a u64
fn to_millis(min: u64, sec: u64, ms: u64) -> Option<u64> {
    min.checked_mul(60_000)?
        .checked_add(sec.checked_mul(1000)?)?
        .checked_add(ms)
}
