// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Response result types

use bytes::Bytes;
use regex::Regex;

use super::cookie::Cookie;

/// Response cookies, in the representation the request asked for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResponseCookies {
    /// No Set-Cookie headers were present
    #[default]
    None,
    /// Raw Set-Cookie text, multiple headers joined with `, `
    Text(String),
    /// Parsed cookie records
    Items(Vec<Cookie>),
}

/// Outcome of a single request
///
/// Created fresh by the executor for every call and not mutated
/// afterwards. A populated [`error_info`](Self::error_info) means the
/// call failed before a usable response existed; a non-2xx status with
/// `error_info == None` is a normal outcome that callers interpret
/// themselves.
#[derive(Debug, Clone, Default)]
pub struct ResponseResult {
    /// Response body decoded as text (empty when bytes were requested)
    pub text: String,
    /// Response body as raw bytes (empty when text was requested)
    pub bytes: Bytes,
    /// HTTP status code, 0 when no response was received
    pub status: u16,
    /// Failure description; None when the transport-level call succeeded
    pub error_info: Option<String>,
    /// Response headers in transport order, duplicate names preserved
    pub headers: Vec<(String, String)>,
    /// Response cookies
    pub cookies: ResponseCookies,
}

impl ResponseResult {
    /// A result carrying only an error description
    pub(crate) fn from_error(message: impl Into<String>) -> Self {
        Self {
            error_info: Some(message.into()),
            ..Self::default()
        }
    }

    /// Check if the transport-level call succeeded
    pub fn is_ok(&self) -> bool {
        self.error_info.is_none()
    }

    /// Check if the status is 2xx
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First value of the named header, case-insensitive
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All values of the named header, in order
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
            .collect()
    }

    /// Extract one cookie's value by name from the raw cookie text.
    ///
    /// Matches `name=value` up to the next `;`. Returns an empty string
    /// when the cookies are not in text form or the name is absent.
    pub fn cookie_value(&self, name: &str) -> String {
        let ResponseCookies::Text(ref raw) = self.cookies else {
            return String::new();
        };
        let pattern = format!("{}=([^;]+)", regex::escape(name));
        Regex::new(&pattern)
            .ok()
            .and_then(|re| re.captures(raw).map(|caps| caps[1].to_string()))
            .unwrap_or_default()
    }
}
