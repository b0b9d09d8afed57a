//! IP literal validation.
//!
//! Two independent total-match predicates, one per address family, joined
//! with a logical OR. A value only counts as an IP literal when the *whole*
//! string matches; substrings, surrounding whitespace, ports, zone ids and
//! CIDR suffixes are all rejected.
//!
//! # IPv4 Grammar
//!
//! Four dot-separated decimal octets, each `0..=255`, written without leading
//! zeros (`0`, `7`, `42`, `199`, `249`, `255` are fine; `01` and `256` are not).
//!
//! # IPv6 Grammar
//!
//! Eight colon-separated groups of one to four hex digits (any case), where a
//! single `::` may stand in for one or more zero groups and the final 32 bits
//! may be written as an embedded IPv4 dotted-quad (`::ffff:192.0.2.1`).
//!
//! Both grammars are exactly the ones accepted by the standard library's
//! `Ipv4Addr` / `Ipv6Addr` parsers, so no regular expressions are needed.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Placeholder some proxies emit in place of a real address.
///
/// It fails both grammars; the constant exists so callers and tests can name it.
pub const UNKNOWN_SENTINEL: &str = "unknown";

/// Returns `true` if `value` is a complete IPv4 dotted-quad literal.
#[inline]
pub fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

/// Returns `true` if `value` is a complete IPv6 literal (full, compressed or
/// with an embedded IPv4 tail).
#[inline]
pub fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

/// Returns `true` if `value` is a valid IPv4 or IPv6 literal.
///
/// Empty input, hostnames and the [`UNKNOWN_SENTINEL`] are not IP literals.
/// Absent input is handled at the call site, typically as
/// `value.is_some_and(is_valid_ip)`.
#[inline]
pub fn is_valid_ip(value: &str) -> bool {
    is_ipv4(value) || is_ipv6(value)
}

/// Parse `value` with the same grammar as [`is_valid_ip`].
pub fn parse_ip(value: &str) -> Option<IpAddr> {
    if let Ok(v4) = value.parse::<Ipv4Addr>() {
        return Some(IpAddr::V4(v4));
    }
    value.parse::<Ipv6Addr>().ok().map(IpAddr::V6)
}
