//! Names of the headers that may carry a client address.

use std::fmt;

use serde::Serialize;

/// A request header consulted during client IP resolution.
///
/// Variants are declared in resolution order; see [`super::PRECEDENCE`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum ClientIpHeader {
    /// `X-Client-IP`, set by Amazon EC2, Heroku and others.
    XClientIp,
    /// `X-Forwarded-For`, the de-facto proxy chain header.
    XForwardedFor,
    /// `CF-Connecting-IP` (Cloudflare).
    CfConnectingIp,
    /// `DO-Connecting-IP` (DigitalOcean).
    DoConnectingIp,
    /// `Fastly-Client-Ip` (Fastly CDN and Firebase hosting).
    FastlyClientIp,
    /// `True-Client-Ip` (Akamai and Cloudflare Enterprise).
    TrueClientIp,
    /// `X-Real-IP` (nginx proxy/FastCGI).
    XRealIp,
    /// `X-Cluster-Client-IP` (Rackspace LB, Riverbed Stingray).
    XClusterClientIp,
    XForwarded,
    ForwardedFor,
    /// `Forwarded`, matched as a bare literal only.
    Forwarded,
    /// `X-Appengine-User-IP` (Google App Engine).
    XAppengineUserIp,
    /// `Cf-Pseudo-IPv4`, Cloudflare's IPv4 stand-in for IPv6 visitors.
    CfPseudoIpv4,
}

impl ClientIpHeader {
    /// Lowercase header name as sent on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::XClientIp => "x-client-ip",
            Self::XForwardedFor => "x-forwarded-for",
            Self::CfConnectingIp => "cf-connecting-ip",
            Self::DoConnectingIp => "do-connecting-ip",
            Self::FastlyClientIp => "fastly-client-ip",
            Self::TrueClientIp => "true-client-ip",
            Self::XRealIp => "x-real-ip",
            Self::XClusterClientIp => "x-cluster-client-ip",
            Self::XForwarded => "x-forwarded",
            Self::ForwardedFor => "forwarded-for",
            Self::Forwarded => "forwarded",
            Self::XAppengineUserIp => "x-appengine-user-ip",
            Self::CfPseudoIpv4 => "cf-pseudo-ipv4",
        }
    }
}

impl fmt::Display for ClientIpHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ClientIpHeader> for &'static str {
    fn from(header: ClientIpHeader) -> Self {
        header.as_str()
    }
}
