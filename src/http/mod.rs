// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer: request configuration, single-shot execution,
//! response results, and cookie handling.

pub mod cookie;
mod executor;
mod request;
mod response;

pub use cookie::{
    cookie_value, format_cookie, format_cookie_to_string, parse_cookie_items, Cookie, CookieJar,
};
pub use executor::RequestExecutor;
pub use request::{Body, RequestConfig, RequestCookies, ResponseBodyKind};
pub use response::{ResponseCookies, ResponseResult};

/// Default user agent string
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default Content-Type header value
pub const DEFAULT_CONTENT_TYPE: &str = "text/html";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Redirect cap applied when redirect following is enabled
pub(crate) const MAX_REDIRECTS: usize = 10;

/// Error text reported for a POST with a missing or empty body
pub const NO_POST_CONTENT: &str = "no POST content";

/// Non-standard header names this crate emits
pub mod headers {
    pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
    pub const CLIENT_IP: &str = "client_ip";
    pub const X_REQUESTED_WITH: &str = "x-requested-with";
}
