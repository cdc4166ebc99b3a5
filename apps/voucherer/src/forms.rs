//! `application/x-www-form-urlencoded` bodies.
//!
//! axum's `Form` extractor cannot express repeated fields, and `/delete`
//! sends one `code` per checked row, so bodies are split here and each
//! component is percent-decoded into an ordered list of pairs.

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

use crate::error::{AppError, AppResult};

/// Decoded form body, in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    /// Parses a raw request body, rejecting anything malformed.
    ///
    /// ## Errors
    /// * `AppError::MalformedForm` - the body is not UTF-8, a `%` is not
    ///   followed by two hex digits, or an escape decodes to invalid UTF-8
    pub fn parse(body: &[u8]) -> AppResult<Self> {
        let text = std::str::from_utf8(body)
            .map_err(|err| AppError::MalformedForm(format!("body is not UTF-8: {err}")))?;

        let pairs = split_pairs(text)
            .map(decode_pair)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(FormData { pairs })
    }

    /// Parses a body, skipping pairs that cannot be decoded.
    pub fn parse_lenient(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let pairs = split_pairs(&text)
            .filter_map(|pair| decode_pair(pair).ok())
            .collect();

        FormData { pairs }
    }

    /// First value of `name`, if present.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Every value of `name`, in order.
    pub fn all(&self, name: &str) -> Vec<&str> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

fn split_pairs(text: &str) -> impl Iterator<Item = (&str, &str)> + '_ {
    text.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| pair.split_once('=').unwrap_or((pair, "")))
}

fn decode_pair((key, value): (&str, &str)) -> AppResult<(String, String)> {
    Ok((decode_component(key)?, decode_component(value)?))
}

/// Decodes one key or value: `+` is a space, `%XX` a byte.
fn decode_component(component: &str) -> AppResult<String> {
    check_escapes(component)?;

    let spaced = component.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|err| {
            AppError::MalformedForm(format!("percent escape decodes to invalid UTF-8: {err}"))
        })
}

/// Every `%` must start a two-digit hex escape.
fn check_escapes(component: &str) -> AppResult<()> {
    let bytes = component.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(AppError::MalformedForm(format!(
                    "invalid percent escape in {component:?}"
                )));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
