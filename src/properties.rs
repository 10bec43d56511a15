//! Parser for `key=pattern` message files.
//!
//! Message files are UTF-8 text, one entry per logical line. The format
//! follows the common properties-file conventions so that files written for
//! other tooling load unchanged:
//!
//! - lines starting with `#` or `!` (after leading whitespace) are comments
//! - the first unescaped `=` or `:` separates key from pattern
//! - a trailing `\` joins the next physical line onto the current entry
//! - `\n`, `\t`, `\r`, and `\\` escapes in keys and patterns are decoded
//! - a line with no separator yields the whole trimmed line as a key with an
//!   empty pattern

use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Failure to load a message file that exists on disk.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid UTF-8")]
    InvalidUtf8 { path: String },
}

/// Read and parse a message file into key/pattern pairs.
///
/// Later occurrences of a key within one file overwrite earlier ones.
/// The caller decides whether a missing file is an error; this function
/// assumes the file exists.
pub fn load_file(path: &Path) -> Result<HashMap<String, String>, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|_| LoadError::InvalidUtf8 {
        path: path.display().to_string(),
    })?;
    Ok(parse(&text))
}

/// Parse message file text into key/pattern pairs.
pub fn parse(text: &str) -> HashMap<String, String> {
    let mut entries = HashMap::new();
    let mut lines = text.lines();

    while let Some(first) = lines.next() {
        let stripped = first.trim_start();
        if stripped.is_empty() || stripped.starts_with('#') || stripped.starts_with('!') {
            continue;
        }

        // Fold continuation lines into one logical line.
        let mut logical = stripped.to_string();
        while ends_with_odd_backslash(&logical) {
            logical.pop();
            match lines.next() {
                Some(next) => logical.push_str(next.trim_start()),
                None => break,
            }
        }

        let (key, value) = split_entry(&logical);
        if key.is_empty() {
            continue;
        }
        entries.insert(key, value);
    }

    entries
}

/// A trailing backslash marks a continuation, unless it is itself escaped.
fn ends_with_odd_backslash(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line at the first unescaped `=` or `:`, decoding escapes
/// on both sides.
fn split_entry(line: &str) -> (String, String) {
    let mut key = String::new();
    let mut chars = line.char_indices();

    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                if let Some((_, escaped)) = chars.next() {
                    push_escaped(&mut key, escaped);
                }
            }
            '=' | ':' => {
                let value = decode_escapes(line[i + c.len_utf8()..].trim_start());
                return (key.trim().to_string(), value);
            }
            _ => key.push(c),
        }
    }

    // No separator: whole line is a key with an empty pattern.
    (key.trim().to_string(), String::new())
}

fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(escaped) = chars.next() {
                push_escaped(&mut out, escaped);
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn push_escaped(out: &mut String, escaped: char) {
    match escaped {
        'n' => out.push('\n'),
        't' => out.push('\t'),
        'r' => out.push('\r'),
        other => out.push(other),
    }
}
