//! Client IP resolution over a fixed header precedence chain.
//!
//! # Header Precedence
//!
//! Headers are inspected in the order of [`PRECEDENCE`]; the first one that
//! yields a valid IP literal wins:
//!
//! | #  | Header                | Strategy                    |
//! |----|-----------------------|-----------------------------|
//! | 1  | `x-client-ip`         | single literal              |
//! | 2  | `x-forwarded-for`     | first valid hop (see below) |
//! | 3  | `cf-connecting-ip`    | single literal              |
//! | 4  | `do-connecting-ip`    | single literal              |
//! | 5  | `fastly-client-ip`    | single literal              |
//! | 6  | `true-client-ip`      | single literal              |
//! | 7  | `x-real-ip`           | single literal              |
//! | 8  | `x-cluster-client-ip` | single literal              |
//! | 9  | `x-forwarded`         | single literal              |
//! | 10 | `forwarded-for`       | single literal              |
//! | 11 | `forwarded`           | single literal              |
//! | 12 | `x-appengine-user-ip` | single literal              |
//! | 13 | `cf-pseudo-ipv4`      | single literal (fallback)   |
//!
//! A single-literal header must hold exactly an IP literal; its value is not
//! trimmed or parsed further. `x-forwarded-for` goes through
//! [`extract_forwarded_candidates`].
//!
//! # Outcome
//!
//! `Ok(None)` is the normal "could not tell" answer. Callers decide whether
//! to fall back to the socket peer address or treat the client as unknown.
//! The only error is [`ResolveError::InvalidInputType`], for a forwarded-for
//! value that is not text.
//!
//! # Security
//!
//! Every header here can be forged by a client talking to the service
//! directly. Deploy behind a proxy that overwrites them.

mod forwarded;
mod header;
mod source;

use std::fmt;
use std::net::IpAddr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::ResolveError;
use crate::validation::parse_ip;

pub use forwarded::{extract_forwarded_candidates, forwarded_candidates};
pub use header::ClientIpHeader;
pub use source::HeaderSource;

/// How a header's value is turned into an address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// The whole value must be an IP literal.
    Single,
    /// Comma-separated hop list, first valid hop wins.
    ForwardedList,
}

/// Resolution order. Earlier entries win.
pub const PRECEDENCE: [(ClientIpHeader, Strategy); 13] = [
    (ClientIpHeader::XClientIp, Strategy::Single),
    (ClientIpHeader::XForwardedFor, Strategy::ForwardedList),
    (ClientIpHeader::CfConnectingIp, Strategy::Single),
    (ClientIpHeader::DoConnectingIp, Strategy::Single),
    (ClientIpHeader::FastlyClientIp, Strategy::Single),
    (ClientIpHeader::TrueClientIp, Strategy::Single),
    (ClientIpHeader::XRealIp, Strategy::Single),
    (ClientIpHeader::XClusterClientIp, Strategy::Single),
    (ClientIpHeader::XForwarded, Strategy::Single),
    (ClientIpHeader::ForwardedFor, Strategy::Single),
    (ClientIpHeader::Forwarded, Strategy::Single),
    (ClientIpHeader::XAppengineUserIp, Strategy::Single),
    (ClientIpHeader::CfPseudoIpv4, Strategy::Single),
];

/// A client address resolved from request headers.
///
/// Only constructible from a value the validator accepted, so
/// [`ClientIp::as_str`] is always a valid IP literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientIp {
    #[serde(rename = "ip")]
    value: String,
    #[serde(skip)]
    addr: IpAddr,
    source: ClientIpHeader,
}

impl ClientIp {
    fn from_literal(value: &str, source: ClientIpHeader) -> Option<Self> {
        let addr = parse_ip(value)?;
        Some(Self {
            value: value.to_string(),
            addr,
            source,
        })
    }

    /// The literal exactly as it appeared in the header.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// The parsed address.
    pub fn addr(&self) -> IpAddr {
        self.addr
    }

    /// The header the address was taken from.
    pub fn source(&self) -> ClientIpHeader {
        self.source
    }

    pub fn into_string(self) -> String {
        self.value
    }
}

impl fmt::Display for ClientIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl AsRef<str> for ClientIp {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl PartialEq<str> for ClientIp {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for ClientIp {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

/// Resolve the client IP from `headers`.
///
/// Walks [`PRECEDENCE`] and returns the first header holding a valid
/// address. Pass `None::<HeaderMap>` (or any `Option<H>`) when no header
/// source exists at all; the result is then `Ok(None)`.
///
/// # Errors
///
/// [`ResolveError::InvalidInputType`] when `x-forwarded-for` is present but
/// not text.
///
/// # Example
///
/// ```
/// use axum::http::{HeaderMap, HeaderValue};
/// use request_ip::resolve;
///
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", HeaderValue::from_static("unknown, 70.41.3.18"));
///
/// let ip = resolve(&headers).unwrap().unwrap();
/// assert_eq!(ip.as_str(), "70.41.3.18");
/// ```
pub fn resolve<H>(headers: &H) -> Result<Option<ClientIp>, ResolveError>
where
    H: HeaderSource + ?Sized,
{
    for (header, strategy) in PRECEDENCE {
        trace!(header = header.as_str(), "Inspecting header for client IP");

        let found = match strategy {
            Strategy::Single => headers
                .lookup(header.as_str())
                .and_then(|raw| single_literal(&raw, header)),
            Strategy::ForwardedList => {
                let raw = headers.lookup_list(header.as_str());
                extract_forwarded_candidates(raw.as_deref())?
                    .and_then(|value| ClientIp::from_literal(value, header))
            }
        };

        if let Some(ip) = found {
            debug!(client_ip = %ip, header = header.as_str(), "Resolved client IP");
            return Ok(Some(ip));
        }
    }

    trace!("No header carried a valid client IP");
    Ok(None)
}

/// Non-text values simply fail validation here; only the forwarded-for
/// decomposer treats them as an error.
#[inline]
fn single_literal(raw: &[u8], header: ClientIpHeader) -> Option<ClientIp> {
    std::str::from_utf8(raw)
        .ok()
        .and_then(|value| ClientIp::from_literal(value, header))
}
