// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request configuration types

use bytes::Bytes;

use super::cookie::Cookie;
use super::{DEFAULT_CONTENT_TYPE, DEFAULT_TIMEOUT_MS, DEFAULT_USER_AGENT};

/// Request body payload
///
/// A POST carries exactly one of these; the variant replaces the
/// body-kind flag plus two nullable fields of older helper APIs, so
/// "both set" and "neither set" are unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// UTF-8 text body
    Text(String),
    /// Raw byte body
    Bytes(Bytes),
}

impl Body {
    /// Body payload as bytes, regardless of variant
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Body::Text(s) => s.as_bytes(),
            Body::Bytes(b) => b,
        }
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

/// Cookies attached to a single request
///
/// The chosen representation also selects how response cookies are
/// reported back: `Text` yields the raw joined Set-Cookie string,
/// `Items` yields parsed [`Cookie`] records. Ignored entirely when the
/// executor runs in auto-cookie mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RequestCookies {
    /// No per-request cookies
    #[default]
    None,
    /// Raw Cookie header text (`a=1; b=2`)
    Text(String),
    /// Structured cookie records
    Items(Vec<Cookie>),
}

impl RequestCookies {
    /// Whether response cookies should be reported as raw text
    pub(crate) fn wants_text(&self) -> bool {
        !matches!(self, RequestCookies::Items(_))
    }
}

/// Desired representation of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseBodyKind {
    /// Decode the body as text with the configured charset
    #[default]
    Text,
    /// Keep the body as raw bytes
    Bytes,
}

/// Configuration for a single HTTP request
///
/// Caller-owned; passed by reference into
/// [`RequestExecutor::execute`](super::RequestExecutor::execute) and
/// never retained after the call returns.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    /// Target URL
    pub url: String,
    /// Request body (POST only)
    pub body: Option<Body>,
    /// Charset label used to decode the response body as text
    pub charset: String,
    /// Referer header
    pub referer: Option<String>,
    /// User-Agent header
    pub user_agent: String,
    /// Request method, uppercased at execute time
    pub method: String,
    /// Per-request cookies
    pub cookies: RequestCookies,
    /// Extra headers, applied in order; duplicate names allowed
    pub headers: Vec<(String, String)>,
    /// Proxy address as `host:port`
    pub proxy: Option<String>,
    /// Timeout for the whole call, in milliseconds
    pub timeout_ms: u64,
    /// Follow redirects automatically
    pub follow_redirects: bool,
    /// Content-Type header
    pub content_type: String,
    /// Send an `Expect: 100-continue` probe
    pub expect_continue: bool,
    /// Desired response body representation
    pub response_body_kind: ResponseBodyKind,
    /// Spoofed origin IP, sent as `x-forwarded-for` and `client_ip`
    pub forwarded_for: Option<String>,
    /// `x-requested-with` header override
    pub requested_with: Option<String>,
}

impl RequestConfig {
    /// Create a configuration for the given URL with default settings
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: None,
            charset: "UTF-8".to_string(),
            referer: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            method: "GET".to_string(),
            cookies: RequestCookies::None,
            headers: Vec::new(),
            proxy: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            follow_redirects: false,
            content_type: DEFAULT_CONTENT_TYPE.to_string(),
            expect_continue: false,
            response_body_kind: ResponseBodyKind::default(),
            forwarded_for: None,
            requested_with: None,
        }
    }

    /// Create a POST configuration with a text body
    pub fn post(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(url)
            .method("POST")
            .body(Body::Text(body.into()))
    }

    /// Set the method
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Set the body
    pub fn body(mut self, body: Body) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the response charset label
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Set the Referer header
    pub fn referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set per-request cookies from a raw Cookie header string
    pub fn cookie_text(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = RequestCookies::Text(cookies.into());
        self
    }

    /// Set per-request cookies from structured records
    pub fn cookie_items(mut self, cookies: Vec<Cookie>) -> Self {
        self.cookies = RequestCookies::Items(cookies);
        self
    }

    /// Append a header; repeated names are kept in order
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the proxy address (`host:port`)
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Set the timeout in milliseconds
    pub fn timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set whether redirects are followed
    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.follow_redirects = follow;
        self
    }

    /// Set the Content-Type header
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }

    /// Set the `Expect: 100-continue` flag
    pub fn expect_continue(mut self, expect: bool) -> Self {
        self.expect_continue = expect;
        self
    }

    /// Request the response body as raw bytes
    pub fn response_bytes(mut self) -> Self {
        self.response_body_kind = ResponseBodyKind::Bytes;
        self
    }

    /// Set the spoofed origin IP
    pub fn forwarded_for(mut self, ip: impl Into<String>) -> Self {
        self.forwarded_for = Some(ip.into());
        self
    }

    /// Set the `x-requested-with` header
    pub fn requested_with(mut self, value: impl Into<String>) -> Self {
        self.requested_with = Some(value.into());
        self
    }
}
