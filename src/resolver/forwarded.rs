//! `X-Forwarded-For` decomposition.
//!
//! A forwarded-for value is a comma-separated hop list, conventionally
//! `client, proxy1, proxy2` (original client on the left, nearest proxy on
//! the right). Proxies are not always well behaved: some emit `unknown`
//! instead of an address, some hosting platforms append `:port` to IPv4
//! hops. The decomposer cleans each hop and returns the first one that is a
//! valid IP literal, scanning left to right.
//!
//! # Trust
//!
//! This is neither "trust the left-most entry" nor "trust the right-most
//! entry". Invalid hops are skipped, so a chain like
//! `unknown, 70.41.3.18` resolves to `70.41.3.18`. Any client can write this
//! header; only rely on it behind a proxy that overwrites it.

use crate::error::ResolveError;
use crate::validation::is_valid_ip;

use super::ClientIpHeader;

/// Clean candidate hops of a forwarded-for value, in header order.
///
/// Each comma-separated token is trimmed. A token with exactly one colon is
/// treated as `IPv4:port` and cut down to the part before the colon; tokens
/// with more colons (bare IPv6) are kept whole.
pub fn forwarded_candidates(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).map(strip_port)
}

#[inline]
fn strip_port(token: &str) -> &str {
    match token.split_once(':') {
        Some((host, rest)) if !rest.contains(':') => host,
        _ => token,
    }
}

/// Return the first valid IP literal in a raw forwarded-for value.
///
/// - `None` input yields `Ok(None)`.
/// - Input that is not text (invalid UTF-8) yields
///   [`ResolveError::InvalidInputType`].
/// - Otherwise the first candidate accepted by [`is_valid_ip`] is returned,
///   or `Ok(None)` when no hop validates.
pub fn extract_forwarded_candidates(raw: Option<&[u8]>) -> Result<Option<&str>, ResolveError> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value = std::str::from_utf8(raw).map_err(|_| ResolveError::InvalidInputType {
        header: ClientIpHeader::XForwardedFor.as_str(),
    })?;

    Ok(forwarded_candidates(value).find(|candidate| is_valid_ip(candidate)))
}
