//! Hex-image loader.
//!
//! One 32-bit hex word per non-empty line (most-significant-bit-first hex, with
//! or without a `0x` prefix). A line beginning with `@` sets the load segment to
//! a byte address (divided by 4 to get a word index); subsequent words load
//! starting there. `#` starts a line comment; blank lines are skipped. This is
//! the simulator's only fallible boundary — everything downstream of a loaded
//! image is total by construction.

use std::fs;
use std::path::Path;

use crate::common::error::LoadError;

/// Loads a hex word image from `path` into a flat, word-addressed `Vec<u32>`.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, [`LoadError::MalformedLine`]
/// if a non-empty, non-comment line is not a valid hex word or `@addr` marker, and
/// [`LoadError::SegmentOutOfRange`] if an `@addr` marker's word index does not fit
/// in a `u32`.
pub fn load_hex(path: &Path) -> Result<Vec<u32>, LoadError> {
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_hex_image(&text)
}

/// Parses the hex-image text format directly, without touching the filesystem.
fn parse_hex_image(text: &str) -> Result<Vec<u32>, LoadError> {
    let mut words = Vec::new();
    let mut cursor = 0usize;

    for (line_no, raw_line) in text.lines().enumerate() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        if let Some(addr_text) = line.strip_prefix('@') {
            let addr = parse_hex_u32(addr_text).ok_or_else(|| LoadError::MalformedLine {
                line: line_no + 1,
                text: raw_line.to_string(),
            })?;
            cursor = (addr / 4) as usize;
            if words.len() < cursor {
                words.resize(cursor, 0);
            }
            continue;
        }

        let word = parse_hex_u32(line).ok_or_else(|| LoadError::MalformedLine {
            line: line_no + 1,
            text: raw_line.to_string(),
        })?;
        if cursor >= words.len() {
            words.resize(cursor + 1, 0);
        }
        words[cursor] = word;
        cursor += 1;
    }

    Ok(words)
}

fn parse_hex_u32(text: &str) -> Option<u32> {
    let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
    u32::from_str_radix(digits, 16).ok()
}
