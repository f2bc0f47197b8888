// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Small stateless helpers: digests, random value generation, time.

use chrono::Utc;
use md5::{Digest, Md5};
use rand::Rng;

/// MD5 digest of the UTF-8 encoding of `text`, as uppercase hex
pub fn md5_hex(text: &str) -> String {
    let digest = Md5::digest(text.as_bytes());
    let mut out = String::with_capacity(32);
    for byte in digest {
        out.push_str(&format!("{:02X}", byte));
    }
    out
}

/// A random IPv4-looking address; each octet is drawn from [1,255]
pub fn random_ip() -> String {
    let mut rng = rand::rng();
    format!(
        "{}.{}.{}.{}",
        rng.random_range(1..=255),
        rng.random_range(1..=255),
        rng.random_range(1..=255),
        rng.random_range(1..=255)
    )
}

/// `n` random decimal digits
pub fn random_digits(n: usize) -> String {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| char::from(b'0' + rng.random_range(0..10u8)))
        .collect()
}

/// `n` random alphanumeric characters.
///
/// Per character, one of {lowercase, uppercase, digit} is chosen
/// uniformly, then a character uniformly within that class; digits are
/// as likely overall as either letter case.
pub fn random_alphanum(n: usize) -> String {
    let mut rng = rand::rng();
    (0..n)
        .map(|_| {
            let byte = match rng.random_range(0..3u8) {
                0 => rng.random_range(b'a'..=b'z'),
                1 => rng.random_range(b'A'..=b'Z'),
                _ => rng.random_range(b'0'..=b'9'),
            };
            char::from(byte)
        })
        .collect()
}

/// Milliseconds since the Unix epoch, from the system clock
pub fn timestamp_ms() -> i64 {
    Utc::now().timestamp_millis()
}
