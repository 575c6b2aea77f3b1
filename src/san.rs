// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use rcgen::SanType;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/// Loopback addresses implied by the "localhost" hostname.
pub const LOCALHOST_IPS: &[IpAddr] = &[
    IpAddr::V4(Ipv4Addr::LOCALHOST),
    IpAddr::V6(Ipv6Addr::LOCALHOST),
];

/// A single Subject Alternative Name entry, classified once at parse time.
///
/// Equality is structural (same variant, same value), which is what the
/// dedup in [`resolve_sans`] relies on. Note the asymmetry this implies:
/// `Ip` entries compare on the parsed address, so "::0:1" and "::1" are
/// the same entry, while `Dns` entries compare on the literal string, so
/// "LOCALHOST" and "localhost" are not.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectAltName {
    Dns(String),
    Ip(IpAddr),
}

impl SubjectAltName {
    /// Classify a raw SAN value: anything that parses as an IPv4 or IPv6
    /// literal becomes `Ip`, everything else is a DNS name. No hostname
    /// syntax validation beyond that; this tool targets trusted local use.
    pub fn parse(value: &str) -> Self {
        match value.parse::<IpAddr>() {
            Ok(ip) => SubjectAltName::Ip(ip),
            Err(_) => SubjectAltName::Dns(value.to_string()),
        }
    }

    /// Convert to the wire-encoding type. DNS names must be ASCII (the
    /// SAN extension stores them as IA5String); anything else is rejected
    /// here rather than deep inside the encoder.
    pub(crate) fn to_san_type(&self) -> Result<SanType> {
        match self {
            SubjectAltName::Dns(name) => {
                Ok(SanType::DnsName(name.clone().try_into().map_err(|_| {
                    Error::InvalidConfiguration(format!(
                        "invalid DNS name '{}': must be ASCII",
                        name
                    ))
                })?))
            }
            SubjectAltName::Ip(ip) => Ok(SanType::IpAddress(*ip)),
        }
    }
}

impl fmt::Display for SubjectAltName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubjectAltName::Dns(name) => write!(f, "DNS:{}", name),
            SubjectAltName::Ip(ip) => write!(f, "IP:{}", ip),
        }
    }
}

/// Build the SAN list for a certificate.
///
/// The hostname always comes first as a DNS entry, even if it looks like
/// an IP address. A hostname of exactly "localhost" pulls in the loopback
/// addresses. User-supplied values follow in input order,
/// each classified by [`SubjectAltName::parse`], with duplicates of
/// anything already present dropped (first occurrence wins).
pub fn resolve_sans(hostname: &str, extra: &[String]) -> Vec<SubjectAltName> {
    let mut sans = vec![SubjectAltName::Dns(hostname.to_string())];

    if hostname == "localhost" {
        sans.extend(LOCALHOST_IPS.iter().map(|ip| SubjectAltName::Ip(*ip)));
    }

    for value in extra {
        let san = SubjectAltName::parse(value);
        if !sans.contains(&san) {
            sans.push(san);
        }
    }

    sans
}
