//! Path decoding
//!
//! The router works on decoded text, so percent-decoding happens exactly
//! once, here, before routing. Invalid UTF-8 sequences become U+FFFD.

use percent_encoding::percent_decode_str;

/// Percent-decode a request path. `+` is kept literally (it only means a
/// space in query strings).
pub fn decode_path(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}
