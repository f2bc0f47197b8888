// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # httpkit - Single-shot HTTP request helper
//!
//! A thin, blocking wrapper around [`reqwest`] for scraping-style HTTP
//! work: describe one request in a [`RequestConfig`], execute it with a
//! [`RequestExecutor`], and read everything back from a
//! [`ResponseResult`]. The executor never panics and never returns an
//! error type; every failure (bad URL, missing POST body, timeout, DNS,
//! refused connection) lands in [`ResponseResult::error_info`], and a
//! non-2xx status is an ordinary outcome for the caller to interpret.
//!
//! ## Features
//!
//! - One value object per request: method, headers, cookies, proxy,
//!   timeout, body, charset
//! - Auto-cookie mode: a shared [`CookieJar`] tracks Set-Cookie across
//!   calls on the same executor
//! - Response body as decoded text (any `encoding_rs` charset label) or
//!   raw bytes
//! - Raw or structured cookie representations on both sides
//! - Scraping utilities: substring extraction, HTML stripping, cookie
//!   string parsing, MD5 hex, random IP/digit/alphanumeric generation
//!
//! ## Example
//!
//! ```rust,no_run
//! use httpkit::{RequestConfig, RequestExecutor};
//!
//! let executor = RequestExecutor::with_auto_cookie();
//! let result = executor.execute(&RequestConfig::new("https://example.com"));
//! if result.is_ok() {
//!     println!("{} {}", result.status, httpkit::text::strip_html(&result.text));
//! } else {
//!     eprintln!("request failed: {:?}", result.error_info);
//! }
//! ```

pub mod error;
pub mod http;
pub mod text;
pub mod util;

// Re-exports for convenience

pub use error::{Error, Result};

pub use http::{
    cookie_value, format_cookie, format_cookie_to_string, parse_cookie_items, Body, Cookie,
    CookieJar, RequestConfig, RequestCookies, RequestExecutor, ResponseBodyKind, ResponseCookies,
    ResponseResult,
};

pub use text::{mid, mid_all, strip_html, url_encode_non_alnum};

pub use util::{md5_hex, random_alphanum, random_digits, random_ip, timestamp_ms};
