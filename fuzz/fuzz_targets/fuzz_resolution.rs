//! Fuzz testing for address validation and client IP resolution.
//!
//! Checks, for arbitrary input bytes, that:
//!
//! - `is_valid_ip` never panics
//! - `extract_forwarded_candidates` only fails on non-UTF-8 input, and
//!   anything it returns passes `is_valid_ip`
//! - `resolve` never returns an address that fails `is_valid_ip`
//!
//! # Running the Fuzz Tests
//!
//! ```bash
//! cargo +nightly install cargo-fuzz
//! cargo +nightly fuzz run fuzz_resolution -- -max_total_time=60
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use request_ip::{extract_forwarded_candidates, is_valid_ip, resolve};

fuzz_target!(|data: &[u8]| {
    let text = std::str::from_utf8(data).ok();

    if let Some(s) = text {
        let _ = is_valid_ip(s);
    }

    match extract_forwarded_candidates(Some(data)) {
        Ok(Some(ip)) => assert!(is_valid_ip(ip)),
        Ok(None) => {}
        Err(_) => assert!(text.is_none()),
    }

    let headers = [("x-forwarded-for", data), ("x-real-ip", data)];
    if let Ok(Some(ip)) = resolve(&headers) {
        assert!(is_valid_ip(ip.as_str()));
    }
});
