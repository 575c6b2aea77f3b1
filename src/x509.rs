// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

//! Inspect generated certificates without shelling out to openssl.

use crate::error::{Error, Result};
use crate::san::SubjectAltName;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;
use x509_parser::prelude::*;

/// Fields read back from a certificate, for display and for tests.
#[derive(Debug, Clone)]
pub struct CertInfo {
    /// Serial number as colon-separated lowercase hex octets.
    pub serial: String,
    pub not_before_timestamp: i64,
    pub not_after_timestamp: i64,
    /// Subject DN rendered as "C=US, ST=State, ..., CN=localhost".
    pub subject: String,
    /// Issuer DN in the same rendering. Equals the subject for
    /// self-signed certificates.
    pub issuer: String,
    pub subject_alt_names: Vec<SubjectAltName>,
    pub san_critical: bool,
    pub key_usage_critical: bool,
}

impl CertInfo {
    pub fn not_before_string(&self) -> String {
        datetime_string(self.not_before_timestamp)
    }

    pub fn not_after_string(&self) -> String {
        datetime_string(self.not_after_timestamp)
    }
}

fn datetime_string(timestamp: i64) -> String {
    match ::time::OffsetDateTime::from_unix_timestamp(timestamp) {
        Ok(dt) => format!(
            "{}-{:02}-{:02} {:02}:{:02}:{:02} UTC",
            dt.year(),
            dt.month() as u8,
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        Err(_) => "Invalid date".to_string(),
    }
}

pub fn parse_cert_file(path: &Path) -> Result<CertInfo> {
    let pem_data = std::fs::read_to_string(path).map_err(|e| Error::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse_cert_pem(&pem_data)
}

pub fn parse_cert_pem(pem_str: &str) -> Result<CertInfo> {
    let pem = ::pem::parse(pem_str)
        .map_err(|e| Error::CertParse(format!("Failed to parse PEM: {}", e)))?;

    if pem.tag() != "CERTIFICATE" {
        return Err(Error::CertParse(format!(
            "Expected CERTIFICATE, got {}",
            pem.tag()
        )));
    }

    let (_, cert) = X509Certificate::from_der(pem.contents())
        .map_err(|e| Error::CertParse(format!("Invalid X.509: {}", e)))?;

    let mut subject_alt_names = Vec::new();
    let mut san_critical = false;
    let mut key_usage_critical = false;

    for ext in cert.extensions() {
        match ext.parsed_extension() {
            ParsedExtension::SubjectAlternativeName(san) => {
                san_critical = ext.critical;
                for name in &san.general_names {
                    match name {
                        GeneralName::DNSName(dns) => {
                            subject_alt_names.push(SubjectAltName::Dns(dns.to_string()));
                        }
                        GeneralName::IPAddress(ip_bytes) if ip_bytes.len() == 4 => {
                            let ip = Ipv4Addr::new(
                                ip_bytes[0],
                                ip_bytes[1],
                                ip_bytes[2],
                                ip_bytes[3],
                            );
                            subject_alt_names.push(SubjectAltName::Ip(IpAddr::V4(ip)));
                        }
                        GeneralName::IPAddress(ip_bytes) if ip_bytes.len() == 16 => {
                            if let Ok(bytes) = <[u8; 16]>::try_from(*ip_bytes) {
                                let ip = Ipv6Addr::from(bytes);
                                subject_alt_names.push(SubjectAltName::Ip(IpAddr::V6(ip)));
                            }
                        }
                        _ => {}
                    }
                }
            }
            ParsedExtension::KeyUsage(_) => {
                key_usage_critical = ext.critical;
            }
            _ => {}
        }
    }

    Ok(CertInfo {
        serial: cert.raw_serial_as_string(),
        not_before_timestamp: cert.validity().not_before.timestamp(),
        not_after_timestamp: cert.validity().not_after.timestamp(),
        subject: cert.subject().to_string(),
        issuer: cert.issuer().to_string(),
        subject_alt_names,
        san_critical,
        key_usage_critical,
    })
}
