//! Character name validation, save filename encoding, and log-safe escaping of player input.

/// Character name validation errors with helpful messages
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NameError {
    #[error("Name is empty")]
    Empty,

    #[error("Name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("Name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },

    #[error("Name contains path separators (/ or \\)")]
    PathTraversal,
}

/// Longest accepted character name, counted in chars.
pub const MAX_NAME_CHARS: usize = 24;

/// Validate a character name and return it trimmed.
///
/// Letters (any script), digits, spaces, `-`, `_` and `'` are accepted.
pub fn validate_character_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    if trimmed.contains("..") || trimmed.contains('/') || trimmed.contains('\\') {
        return Err(NameError::PathTraversal);
    }
    let mut bad: Vec<char> = trimmed
        .chars()
        .filter(|&c| !(c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '\''))
        .collect();
    if !bad.is_empty() {
        bad.sort_unstable();
        bad.dedup();
        let chars = bad
            .iter()
            .map(|c| {
                if c.is_control() {
                    format!("\\u{{{:04x}}}", *c as u32)
                } else {
                    c.to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        return Err(NameError::InvalidCharacters { chars });
    }
    Ok(trimmed.to_string())
}

/// Generate safe filename from a character name using URL encoding
pub fn safe_filename(name: &str) -> String {
    use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
    utf8_percent_encode(name, NON_ALPHANUMERIC).to_string()
}

/// Escape player-entered text for single-line logging.
///
/// Newlines, tabs and other control characters are made visible and long input is cut
/// at 80 chars with an ellipsis.
pub fn escape_log(s: &str) -> String {
    const MAX_PREVIEW: usize = 80;
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push(c),
        }
    }
    out
}
