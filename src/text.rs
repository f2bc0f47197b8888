// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Text extraction and HTML stripping utilities
//!
//! Independent helpers for pulling values out of scraped markup. None
//! of them share state with the HTTP layer.

use encoding_rs::Encoding;
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::{Error, Result};

/// Substring strictly between the first `left` and the next `right`
/// after it.
///
/// Empty inputs yield `Ok("")`. A delimiter that does not occur is an
/// explicit [`Error::DelimiterNotFound`] rather than a garbage slice.
pub fn mid<'a>(full: &'a str, left: &str, right: &str) -> Result<&'a str> {
    if full.is_empty() || left.is_empty() || right.is_empty() {
        return Ok("");
    }
    let start = full
        .find(left)
        .ok_or_else(|| Error::delimiter_not_found(left, "left"))?
        + left.len();
    let end = full[start..]
        .find(right)
        .ok_or_else(|| Error::delimiter_not_found(right, "right"))?
        + start;
    Ok(&full[start..end])
}

/// Every `left`...`right` bounded span, in order.
///
/// Advances past each match and stops as soon as either delimiter no
/// longer occurs; a trailing unterminated span is discarded.
pub fn mid_all<'a>(full: &'a str, left: &str, right: &str) -> Vec<&'a str> {
    let mut spans = Vec::new();
    if full.is_empty() || left.is_empty() || right.is_empty() {
        return spans;
    }
    let mut pos = 0;
    while let Some(found) = full[pos..].find(left) {
        let start = pos + found + left.len();
        match full[start..].find(right) {
            Some(len) => {
                spans.push(&full[start..start + len]);
                pos = start + len + right.len();
            }
            None => break,
        }
    }
    spans
}

lazy_static! {
    static ref SCRIPT_RE: Regex = Regex::new(r"(?is)<script[^>]*?>.*?</script>").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"(?s)<.*?>").unwrap();
    static ref NEWLINE_RUN_RE: Regex = Regex::new(r"[\r\n]\s+").unwrap();
    static ref COMMENT_OPEN_RE: Regex = Regex::new(r"<!--.*").unwrap();
    // Named entities and their numeric forms, fixed set; any other
    // numeric entity is dropped, not decoded (known limitation kept
    // for compatibility with the markup this was built against)
    static ref ENTITIES: [(Regex, &'static str); 9] = [
        (Regex::new(r"(?i)&(quot|#34);").unwrap(), "\""),
        (Regex::new(r"(?i)&(amp|#38);").unwrap(), "&"),
        (Regex::new(r"(?i)&(lt|#60);").unwrap(), "<"),
        (Regex::new(r"(?i)&(gt|#62);").unwrap(), ">"),
        (Regex::new(r"(?i)&(nbsp|#160);").unwrap(), " "),
        (Regex::new(r"(?i)&(iexcl|#161);").unwrap(), "\u{00a1}"),
        (Regex::new(r"(?i)&(cent|#162);").unwrap(), "\u{00a2}"),
        (Regex::new(r"(?i)&(pound|#163);").unwrap(), "\u{00a3}"),
        (Regex::new(r"(?i)&(copy|#169);").unwrap(), "\u{00a9}"),
    ];
    static ref NUMERIC_ENTITY_RE: Regex = Regex::new(r"&#(\d+);").unwrap();
}

/// Strip HTML down to its visible text.
///
/// Removes `<script>` blocks, then all remaining tags, collapses
/// whitespace runs that follow a newline, drops comment remnants, and
/// decodes a fixed set of entities.
pub fn strip_html(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = TAG_RE.replace_all(&text, "");
    let text = NEWLINE_RUN_RE.replace_all(&text, "");
    let text = text.replace("-->", "");
    let text = COMMENT_OPEN_RE.replace_all(&text, "");
    let mut text = text.into_owned();
    for (re, replacement) in ENTITIES.iter() {
        text = re.replace_all(&text, *replacement).into_owned();
    }
    NUMERIC_ENTITY_RE.replace_all(&text, "").into_owned()
}

/// Percent-encode every non-alphanumeric character as the given
/// encoding's bytes, each byte as `%XX` uppercase hex.
pub fn url_encode_non_alnum(text: &str, encoding: &'static Encoding) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            continue;
        }
        let mut buf = [0u8; 4];
        let (bytes, _, _) = encoding.encode(c.encode_utf8(&mut buf));
        for byte in bytes.iter() {
            result.push_str(&format!("%{:02X}", byte));
        }
    }
    result
}
