// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Single-shot request execution

use std::io::Read;
use std::time::Duration;

use bytes::Bytes;
use encoding_rs::Encoding;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header;
use reqwest::redirect::Policy;
use reqwest::Method;
use tracing::{debug, warn};
use url::Url;

use super::cookie::{Cookie, CookieJar};
use super::request::{RequestConfig, RequestCookies, ResponseBodyKind};
use super::response::{ResponseCookies, ResponseResult};
use super::{headers, MAX_REDIRECTS, NO_POST_CONTENT};
use crate::error::{Error, Result};

/// Executes one request/response cycle per call.
///
/// Every call is synchronous and blocking: `execute` returns only on
/// completion, transport error, or timeout, and never panics or returns
/// an `Err` — all failures are reported through
/// [`ResponseResult::error_info`].
///
/// With auto-cookie mode enabled the executor tracks cookies across
/// calls in a shared [`CookieJar`] and ignores per-request cookie
/// fields. The jar itself is thread-safe, but interleaved `execute`
/// calls on one auto-cookie executor can observe each other's cookies
/// in arbitrary order; callers needing a strict ordering must serialize
/// access themselves.
#[derive(Debug, Clone, Default)]
pub struct RequestExecutor {
    auto_cookie: bool,
    jar: CookieJar,
}

impl RequestExecutor {
    /// Create an executor with auto-cookie mode off
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an executor that tracks cookies across calls
    pub fn with_auto_cookie() -> Self {
        Self {
            auto_cookie: true,
            jar: CookieJar::new(),
        }
    }

    /// Whether auto-cookie mode is enabled
    pub fn auto_cookie(&self) -> bool {
        self.auto_cookie
    }

    /// The shared cookie jar used by auto-cookie mode
    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    /// Execute one request described by `config`.
    ///
    /// The config is only borrowed for the duration of the call. A POST
    /// with a missing or empty body fails with [`NO_POST_CONTENT`]
    /// before any network I/O happens.
    pub fn execute(&self, config: &RequestConfig) -> ResponseResult {
        let method_name = config.method.to_uppercase();
        debug!(method = %method_name, url = %config.url, "executing request");

        let url = match Url::parse(&config.url) {
            Ok(url) => url,
            Err(e) => {
                warn!(url = %config.url, error = %e, "invalid URL");
                return ResponseResult::from_error(e.to_string());
            }
        };

        let method = match Method::from_bytes(method_name.as_bytes()) {
            Ok(method) => method,
            Err(e) => return ResponseResult::from_error(e.to_string()),
        };

        let client = match build_client(config) {
            Ok(client) => client,
            Err(e) => {
                warn!(error = %e, "client construction failed");
                return ResponseResult::from_error(e.to_string());
            }
        };

        let mut builder = client.request(method.clone(), url.clone());
        builder = self.apply_headers(builder, config, &url);

        if method == Method::POST {
            let body = match &config.body {
                Some(body) if !body.is_empty() => body.as_bytes().to_vec(),
                _ => {
                    debug!(url = %config.url, "POST without content, aborting");
                    return ResponseResult::from_error(NO_POST_CONTENT);
                }
            };
            builder = builder.body(body);
        }

        let response = match builder.send() {
            Ok(response) => response,
            Err(e) => {
                warn!(url = %config.url, error = %e, "request failed");
                return ResponseResult::from_error(e.to_string());
            }
        };

        self.read_response(config, response)
    }

    fn apply_headers(
        &self,
        mut builder: RequestBuilder,
        config: &RequestConfig,
        url: &Url,
    ) -> RequestBuilder {
        builder = builder
            .header(header::USER_AGENT, config.user_agent.as_str())
            .header(header::CONTENT_TYPE, config.content_type.as_str());

        if let Some(referer) = &config.referer {
            builder = builder.header(header::REFERER, referer.as_str());
        }
        if let Some(ip) = &config.forwarded_for {
            builder = builder
                .header(headers::X_FORWARDED_FOR, ip.as_str())
                .header(headers::CLIENT_IP, ip.as_str());
        }
        if let Some(requested_with) = &config.requested_with {
            builder = builder.header(headers::X_REQUESTED_WITH, requested_with.as_str());
        }
        if config.expect_continue {
            builder = builder.header(header::EXPECT, "100-continue");
        }

        // In auto-cookie mode the shared jar wins over per-request cookies
        let cookie_header = if self.auto_cookie {
            self.jar.get_cookie_header(url)
        } else {
            match &config.cookies {
                RequestCookies::None => None,
                RequestCookies::Text(text) if text.is_empty() => None,
                RequestCookies::Text(text) => Some(text.clone()),
                RequestCookies::Items(items) if items.is_empty() => None,
                RequestCookies::Items(items) => Some(
                    items
                        .iter()
                        .map(Cookie::to_header_value)
                        .collect::<Vec<_>>()
                        .join("; "),
                ),
            }
        };
        if let Some(cookie) = cookie_header {
            builder = builder.header(header::COOKIE, cookie);
        }

        // Custom headers last, in caller order; an invalid name or value
        // surfaces as a send-time error in error_info
        for (name, value) in &config.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder
    }

    fn read_response(&self, config: &RequestConfig, response: Response) -> ResponseResult {
        let final_url = response.url().clone();
        let status = response.status().as_u16();
        let content_length = response.content_length();

        let mut result = ResponseResult {
            status,
            ..ResponseResult::default()
        };
        for (name, value) in response.headers() {
            result.headers.push((
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            ));
        }

        let set_cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
            .collect();
        if self.auto_cookie {
            for raw in &set_cookies {
                self.jar.add_from_header(raw, &final_url);
            }
        }
        result.cookies = if set_cookies.is_empty() {
            ResponseCookies::None
        } else if config.cookies.wants_text() {
            ResponseCookies::Text(set_cookies.join(", "))
        } else {
            ResponseCookies::Items(
                set_cookies
                    .iter()
                    .filter_map(|raw| Cookie::parse(raw, &final_url))
                    .collect(),
            )
        };

        // Body last; a read failure keeps whatever was populated so far
        // and reports through error_info. The response (and its socket)
        // is dropped on every path.
        match config.response_body_kind {
            ResponseBodyKind::Bytes => {
                let mut buf = Vec::new();
                let read = match content_length {
                    Some(len) => response.take(len).read_to_end(&mut buf),
                    None => {
                        let mut response = response;
                        response.read_to_end(&mut buf)
                    }
                };
                if let Err(e) = read {
                    warn!(url = %final_url, error = %e, "body read failed");
                    result.error_info = Some(e.to_string());
                    return result;
                }
                result.bytes = Bytes::from(buf);
            }
            ResponseBodyKind::Text => {
                let mut buf = Vec::new();
                let mut response = response;
                if let Err(e) = response.read_to_end(&mut buf) {
                    warn!(url = %final_url, error = %e, "body read failed");
                    result.error_info = Some(e.to_string());
                    return result;
                }
                // Decoding problems are swallowed into the body text,
                // not error_info; legacy callers depend on this
                result.text = match Encoding::for_label(config.charset.as_bytes()) {
                    Some(encoding) => encoding.decode(&buf).0.into_owned(),
                    None => format!("unknown charset label: {}", config.charset),
                };
            }
        }

        debug!(status, url = %final_url, "request complete");
        result
    }
}

fn build_client(config: &RequestConfig) -> Result<Client> {
    let redirect = if config.follow_redirects {
        Policy::limited(MAX_REDIRECTS)
    } else {
        Policy::none()
    };

    let mut builder = Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .redirect(redirect);

    if let Some(proxy) = normalize_proxy(config.proxy.as_deref()) {
        let proxy_url = if proxy.contains("://") {
            proxy.clone()
        } else {
            format!("http://{}", proxy)
        };
        builder = builder.proxy(
            reqwest::Proxy::all(&proxy_url)
                .map_err(|e| Error::config(format!("invalid proxy '{}': {}", proxy, e)))?,
        );
    }

    builder.build().map_err(Error::from)
}

/// Normalize a `host:port` proxy string; full-width colons are stripped
/// as the legacy helper did, and a blank string means no proxy.
fn normalize_proxy(proxy: Option<&str>) -> Option<String> {
    let proxy = proxy?.replace('\u{FF1A}', "");
    let trimmed = proxy.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::request::Body;
    use tokio::runtime::Runtime;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // The executor is blocking, so tests drive wiremock from a
    // multi-threaded runtime kept alive for the test's duration and
    // call the executor from the test thread itself.
    fn serve() -> (Runtime, MockServer) {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let server = rt.block_on(MockServer::start());
        (rt, server)
    }

    #[test]
    fn test_get_round_trip() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/page"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string("hello")
                        .insert_header("set-cookie", "sid=abc123; Path=/"),
                )
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(format!("{}/page", server.uri())));

        assert!(result.is_ok());
        assert_eq!(result.status, 200);
        assert_eq!(result.text, "hello");
        assert!(result.bytes.is_empty());
        assert_eq!(result.cookie_value("sid"), "abc123");
        assert!(result.header("content-length").is_some());
    }

    #[test]
    fn test_post_round_trip() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("POST"))
                .and(path("/submit"))
                .and(body_string("a=1&b=2"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let config = RequestConfig::post(format!("{}/submit", server.uri()), "a=1&b=2");
        let result = executor.execute(&config);

        assert!(result.is_ok());
        assert_eq!(result.text, "ok");
    }

    #[test]
    fn test_post_without_body_makes_no_network_call() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(200))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        for config in [
            RequestConfig::new(format!("{}/submit", server.uri())).method("POST"),
            RequestConfig::new(format!("{}/submit", server.uri()))
                .method("post")
                .body(Body::Text(String::new())),
            RequestConfig::new(format!("{}/submit", server.uri()))
                .method("POST")
                .body(Body::Bytes(Bytes::new())),
        ] {
            let result = executor.execute(&config);
            assert_eq!(result.error_info.as_deref(), Some(NO_POST_CONTENT));
            assert_eq!(result.status, 0);
        }

        let received = rt.block_on(server.received_requests()).unwrap();
        assert!(received.is_empty());
    }

    #[test]
    fn test_get_with_body_configured_ignores_it() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let config = RequestConfig::new(server.uri()).body(Body::Text("unused".into()));
        let result = executor.execute(&config);

        assert!(result.is_ok());
        assert_eq!(result.text, "ok");
    }

    #[test]
    fn test_non_2xx_is_success_with_status() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(server.uri()));

        assert!(result.is_ok());
        assert_eq!(result.status, 500);
        assert_eq!(result.text, "oops");
    }

    #[test]
    fn test_spoofed_ip_and_requested_with_headers() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(header("x-forwarded-for", "10.1.2.3"))
                .and(header("client_ip", "10.1.2.3"))
                .and(header("x-requested-with", "XMLHttpRequest"))
                .and(header("x-tag", "custom"))
                .respond_with(ResponseTemplate::new(200).set_body_string("matched"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let config = RequestConfig::new(server.uri())
            .forwarded_for("10.1.2.3")
            .requested_with("XMLHttpRequest")
            .header("x-tag", "custom");
        let result = executor.execute(&config);

        assert_eq!(result.text, "matched");
    }

    #[test]
    fn test_per_request_cookies_sent() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(header("cookie", "uid=42; sid=abc"))
                .respond_with(ResponseTemplate::new(200).set_body_string("matched"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let by_text = RequestConfig::new(server.uri()).cookie_text("uid=42; sid=abc");
        assert_eq!(executor.execute(&by_text).text, "matched");

        let by_items = RequestConfig::new(server.uri())
            .cookie_items(vec![Cookie::new("uid", "42"), Cookie::new("sid", "abc")]);
        assert_eq!(executor.execute(&by_items).text, "matched");
    }

    #[test]
    fn test_auto_cookie_replays_set_cookie() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/login"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("set-cookie", "sid=abc123; Path=/"),
                )
                .mount(&server),
        );
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/account"))
                .and(header("cookie", "sid=abc123"))
                .respond_with(ResponseTemplate::new(200).set_body_string("with-cookie"))
                .mount(&server),
        );

        let executor = RequestExecutor::with_auto_cookie();
        let first = executor.execute(&RequestConfig::new(format!("{}/login", server.uri())));
        assert!(first.is_ok());
        assert_eq!(executor.jar().len(), 1);

        // Second request carries the cookie without touching config.cookies
        let second = executor.execute(&RequestConfig::new(format!("{}/account", server.uri())));
        assert_eq!(second.text, "with-cookie");
    }

    #[test]
    fn test_auto_cookie_ignores_per_request_cookies() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(header("cookie", "ignored=1"))
                .respond_with(ResponseTemplate::new(200).set_body_string("leaked"))
                .mount(&server),
        );
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_string("clean"))
                .mount(&server),
        );

        let executor = RequestExecutor::with_auto_cookie();
        let config = RequestConfig::new(server.uri()).cookie_text("ignored=1");
        assert_eq!(executor.execute(&config).text, "clean");
    }

    #[test]
    fn test_response_cookie_items_representation() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .insert_header("set-cookie", "sid=abc; Path=/p; Secure"),
                )
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let config = RequestConfig::new(server.uri()).cookie_items(vec![]);
        let result = executor.execute(&config);

        match result.cookies {
            ResponseCookies::Items(ref items) => {
                assert_eq!(items.len(), 1);
                assert_eq!(items[0].name, "sid");
                assert_eq!(items[0].value, "abc");
                assert_eq!(items[0].path, "/p");
                assert!(items[0].secure);
            }
            ref other => panic!("expected parsed cookies, got {:?}", other),
        }
    }

    #[test]
    fn test_bytes_response_kind() {
        let payload: Vec<u8> = vec![0x00, 0xFF, 0x10, 0x7F, 0x80];
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(payload.clone()))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(server.uri()).response_bytes());

        assert!(result.is_ok());
        assert_eq!(result.bytes.as_ref(), payload.as_slice());
        assert!(result.text.is_empty());
    }

    #[test]
    fn test_charset_decoding() {
        // "你好" in GBK
        let gbk_bytes: Vec<u8> = vec![0xC4, 0xE3, 0xBA, 0xC3];
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(gbk_bytes))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(server.uri()).charset("GBK"));
        assert_eq!(result.text, "你好");

        // Unknown label lands in the body text, not error_info
        let result = executor.execute(&RequestConfig::new(server.uri()).charset("no-such-charset"));
        assert!(result.is_ok());
        assert_eq!(result.text, "unknown charset label: no-such-charset");
    }

    #[test]
    fn test_malformed_url() {
        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new("::not a url::"));

        assert!(!result.is_ok());
        assert_eq!(result.status, 0);
        assert!(result.headers.is_empty());
    }

    #[test]
    fn test_connection_refused() {
        let executor = RequestExecutor::new();
        let config = RequestConfig::new("http://127.0.0.1:1/").timeout_ms(2_000);
        let result = executor.execute(&config);

        assert!(result.error_info.is_some());
        assert_eq!(result.status, 0);
    }

    #[test]
    fn test_redirects_not_followed_by_default() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/from"))
                .respond_with(ResponseTemplate::new(302).insert_header("location", "/to"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(format!("{}/from", server.uri())));

        assert!(result.is_ok());
        assert_eq!(result.status, 302);
        assert_eq!(result.header("location"), Some("/to"));
    }

    #[test]
    fn test_redirects_followed_when_enabled() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/from"))
                .respond_with(ResponseTemplate::new(302).insert_header("location", "/to"))
                .mount(&server),
        );
        rt.block_on(
            Mock::given(method("GET"))
                .and(path("/to"))
                .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let config = RequestConfig::new(format!("{}/from", server.uri())).follow_redirects(true);
        let result = executor.execute(&config);

        assert_eq!(result.status, 200);
        assert_eq!(result.text, "landed");
    }

    #[test]
    fn test_timeout_bounds_the_call() {
        let (rt, server) = serve();
        rt.block_on(
            Mock::given(method("GET"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_string("late")
                        .set_delay(Duration::from_secs(5)),
                )
                .mount(&server),
        );

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(server.uri()).timeout_ms(200));

        assert!(result.error_info.is_some());
    }

    #[test]
    fn test_truncated_body_keeps_status_and_reports_error() {
        // A server that promises 10 body bytes but closes after 3; the
        // read fails after headers were parsed, so status and headers
        // survive while error_info reports the failure
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = std::thread::spawn(move || {
            use std::io::{Read as _, Write as _};
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let _ = stream.read(&mut buf);
            let _ = stream.write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabc");
        });

        let executor = RequestExecutor::new();
        let result = executor.execute(&RequestConfig::new(format!("http://{}/", addr)));
        handle.join().unwrap();

        assert!(result.error_info.is_some());
        assert_eq!(result.status, 200);
        assert_eq!(result.header("content-length"), Some("10"));
    }

    #[test]
    fn test_normalize_proxy() {
        assert_eq!(normalize_proxy(None), None);
        assert_eq!(normalize_proxy(Some("")), None);
        assert_eq!(normalize_proxy(Some("  ")), None);
        assert_eq!(
            normalize_proxy(Some("127.0.0.1:8888")),
            Some("127.0.0.1:8888".to_string())
        );
        assert_eq!(
            normalize_proxy(Some("127.0.0.1：8888")),
            Some("127.0.0.18888".to_string())
        );
    }
}
