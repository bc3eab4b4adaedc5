//! Share-link state codec
//!
//! A state travels as `base64(zlib(JSON))` in the `s` query parameter of a
//! URL. Encoding errors propagate, but decoding never fails: tokens come from
//! foreign links, so any broken stage yields an empty object and a warning.
//!
//! # Example
//!
//! ```
//! use huecurve::codec::{deserialize, serialize};
//! use serde_json::json;
//!
//! let token = serialize(&json!({"a": 1})).unwrap();
//! assert_eq!(deserialize(&token), json!({"a": 1}));
//! assert_eq!(deserialize("not-base64!!"), json!({}));
//! ```

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// Query parameter carrying the encoded state.
pub const STATE_PARAM: &str = "s";

/// Error type for encoding a state into a token or URL
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode state as JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to compress state: {0}")]
    Compress(#[from] std::io::Error),
    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Decoding failure, by stage. Never leaves this module.
#[derive(Debug, Error)]
enum DecodeError {
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("corrupt compressed stream: {0}")]
    Inflate(#[from] std::io::Error),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DecodeError {
    fn stage(&self) -> &'static str {
        match self {
            DecodeError::Base64(_) => "base64",
            DecodeError::Inflate(_) => "inflate",
            DecodeError::Json(_) => "json",
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

/// Encode a state into an opaque ASCII token.
pub fn serialize<T: Serialize + ?Sized>(state: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(state)?;
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(json.as_bytes())?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

/// Decode a token produced by [`serialize`].
///
/// Returns an empty object when the token cannot be decoded.
pub fn deserialize(token: &str) -> Value {
    match decode(token) {
        Ok(value) => value,
        Err(e) => {
            warn!(stage = e.stage(), error = %e, "unable to extract state from token");
            empty_object()
        }
    }
}

fn decode(token: &str) -> Result<Value, DecodeError> {
    let compressed = STANDARD.decode(token.trim())?;
    let mut json = String::new();
    ZlibDecoder::new(compressed.as_slice()).read_to_string(&mut json)?;
    Ok(serde_json::from_str(&json)?)
}

/// Application base of an address: `scheme://host[:port]/<first path segment>`.
pub fn base_url(address: &str) -> Result<Url, CodecError> {
    let mut url = Url::parse(address)?;
    let first_segment = url
        .path_segments()
        .and_then(|mut segments| segments.next())
        .unwrap_or_default()
        .to_string();
    url.set_path(&format!("/{}", first_segment));
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Build a share URL: the [`base_url`] of `base` plus `?s=<token>`.
///
/// Any query already on `base`, including an older `s`, is dropped.
pub fn stateful_url<T: Serialize + ?Sized>(base: &str, state: &T) -> Result<String, CodecError> {
    let mut url = base_url(base)?;
    let token = serialize(state)?;
    url.query_pairs_mut().append_pair(STATE_PARAM, &token);
    Ok(url.to_string())
}

/// Read the state carried by an address.
///
/// An address without an `s` parameter (or with an empty one) yields an empty object.
pub fn state_from_url(address: &str) -> Value {
    let url = match Url::parse(address) {
        Ok(url) => url,
        Err(e) => {
            warn!(error = %e, "unable to parse address, ignoring shared state");
            return empty_object();
        }
    };

    match url.query_pairs().find(|(key, _)| key == STATE_PARAM) {
        Some((_, token)) if !token.is_empty() => deserialize(&token),
        _ => empty_object(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_round_trip_simple() {
        let token = serialize(&json!({"a": 1})).unwrap();
        assert_eq!(deserialize(&token), json!({"a": 1}));
    }

    #[test]
    fn test_round_trip_unicode() {
        let state = json!({"name": "größe ✓", "values": [1.5, -2, null, true]});
        let token = serialize(&state).unwrap();
        assert!(token.is_ascii());
        assert_eq!(deserialize(&token), state);
    }

    #[test]
    fn test_deserialize_bad_base64() {
        assert_eq!(deserialize("not-base64!!"), json!({}));
    }

    #[test]
    fn test_deserialize_bad_stream() {
        let token = STANDARD.encode(b"definitely not zlib");
        assert_eq!(deserialize(&token), json!({}));
    }

    #[test]
    fn test_deserialize_bad_json() {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b"{\"a\": ").unwrap();
        let token = STANDARD.encode(encoder.finish().unwrap());
        assert_eq!(deserialize(&token), json!({}));
    }

    #[test]
    fn test_deserialize_empty_token() {
        assert_eq!(deserialize(""), json!({}));
    }

    #[test]
    fn test_base_url_keeps_first_segment() {
        let url = base_url("https://example.com:8080/app/deep/path?x=1#frag").unwrap();
        assert_eq!(url.as_str(), "https://example.com:8080/app");
    }

    #[test]
    fn test_base_url_root() {
        let url = base_url("https://example.com/").unwrap();
        assert_eq!(url.as_str(), "https://example.com/");
    }

    #[test]
    fn test_stateful_url_round_trip() {
        let state = json!({"settings": {"colorSpace": "hsl"}, "paletteParams": {"steps": 12}});
        let url = stateful_url("https://example.com/app", &state).unwrap();
        assert!(url.starts_with("https://example.com/app?s="));
        assert_eq!(state_from_url(&url), state);
    }

    #[test]
    fn test_stateful_url_replaces_existing_state() {
        let old = stateful_url("https://example.com/app", &json!({"old": true})).unwrap();
        let url = stateful_url(&old, &json!({"new": true})).unwrap();

        let parsed = Url::parse(&url).unwrap();
        assert_eq!(parsed.query_pairs().filter(|(key, _)| key == STATE_PARAM).count(), 1);
        assert_eq!(state_from_url(&url), json!({"new": true}));
    }

    #[test]
    fn test_stateful_url_uses_app_base() {
        let url = stateful_url("https://example.com/app/editor?x=1#top", &json!({})).unwrap();
        assert!(url.starts_with("https://example.com/app?s="));
    }

    #[test]
    fn test_state_from_url_without_param() {
        assert_eq!(state_from_url("https://example.com/app?x=1"), json!({}));
        assert_eq!(state_from_url("https://example.com/app?s="), json!({}));
    }

    #[test]
    fn test_state_from_url_corrupt_param() {
        assert_eq!(state_from_url("https://example.com/app?s=%%%"), json!({}));
    }

    #[test]
    fn test_state_from_url_unparseable_address() {
        assert_eq!(state_from_url("not a url"), json!({}));
    }

    #[test]
    fn test_stateful_url_bad_base() {
        assert!(matches!(stateful_url("relative/path", &json!({})), Err(CodecError::Url(_))));
    }
}
