//! Share line parsing and formatting.
//!
//! A share line is `[path] <separator> value`: the path is a run of decimal
//! integers separated by whitespace or commas, the value is whatever the
//! adapter accepts. The longest path followed by the separator and a
//! non-blank remainder wins; a line without one is a bare value.

use super::{EncodingError, ValueAdapter};
use crate::mpc::Share;

/// What divides the path from the value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Separator {
    /// Any single whitespace character. Formatting emits no extra token.
    #[default]
    Whitespace,
    /// A literal token, emitted between path and value when formatting.
    Token(String),
}

impl Separator {
    /// Length in bytes of the separator at the start of `text`, if present.
    fn match_at(&self, text: &str) -> Option<usize> {
        match self {
            Separator::Whitespace => text.chars().next().filter(|c| c.is_whitespace()).map(char::len_utf8),
            Separator::Token(token) if !token.is_empty() && text.starts_with(token.as_str()) => Some(token.len()),
            Separator::Token(_) => None,
        }
    }
}

/// Parses and formats share lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShareCodec {
    separator: Separator,
}

impl ShareCodec {
    pub fn new(separator: Separator) -> Self {
        Self { separator }
    }

    pub fn separator(&self) -> &Separator {
        &self.separator
    }

    /// Splits a share line into its path part and value part.
    ///
    /// # Returns
    /// * `Some((path, value))` - `path` is `None` when the line is a bare value.
    /// * `None` - The line is blank.
    pub fn split_line<'a>(&self, text: &'a str) -> Option<(Option<&'a str>, &'a str)> {
        // candidate cut points: every char boundary inside the leading path run
        let mut cuts = vec![0];
        for (pos, c) in text.char_indices() {
            if !(c.is_whitespace() || c == ',' || c.is_ascii_digit()) {
                break;
            }
            cuts.push(pos + c.len_utf8());
        }

        for &cut in cuts.iter().rev() {
            let Some(sep_len) = self.separator.match_at(&text[cut..]) else {
                continue;
            };
            let rest = &text[cut + sep_len..];
            if !rest.trim().is_empty() {
                return Some((Some(&text[..cut]), rest.trim()));
            }
        }

        let value = text.trim();
        if value.is_empty() {
            None
        } else {
            Some((None, value))
        }
    }

    /// Parses a share line.
    ///
    /// # Returns
    /// * `Err(EncodingError::InvalidFormat)` - Blank line or value rejected by
    ///   the adapter's syntax.
    /// * `Err(EncodingError::InvalidPath)` - Path element not a positive integer.
    /// * `Err(EncodingError::OutOfRange)` - Value not below the adapter's prime.
    pub fn parse(&self, text: &str, adapter: &dyn ValueAdapter) -> Result<Share, EncodingError> {
        let (path_text, value_text) = self.split_line(text).ok_or(EncodingError::InvalidFormat)?;
        let path = match path_text {
            Some(path_text) => parse_path(path_text)?,
            None => Vec::new(),
        };
        let value = adapter.to_value(value_text)?;
        Share::new(value, path).map_err(|_| EncodingError::InvalidPath)
    }

    /// Formats a share as a line that `parse` reads back.
    pub fn format(&self, share: &Share, adapter: &dyn ValueAdapter) -> Result<String, EncodingError> {
        let mut parts: Vec<String> = share.path().iter().map(u64::to_string).collect();
        if let Separator::Token(token) = &self.separator {
            parts.push(token.clone());
        }
        parts.push(adapter.from_value(share.value())?);
        Ok(parts.join(" "))
    }
}

fn parse_path(text: &str) -> Result<Vec<u64>, EncodingError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<u64>().map_err(|_| EncodingError::InvalidPath))
        .collect()
}
