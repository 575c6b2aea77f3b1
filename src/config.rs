// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

/// Everything needed to generate one certificate, assembled from the CLI
/// flags. Built once, then consumed by [`crate::cert::Cert::generate`] and
/// the file writes.
#[derive(Debug, Clone)]
pub struct CertificateRequest {
    /// Hostname used as the common name and the first SAN entry.
    pub hostname: String,
    /// Validity period in days. Must be positive; validated at generation.
    pub days: i64,
    /// RSA key size in bits.
    pub key_bits: u32,
    /// Distinguished-name country.
    pub country: String,
    /// Distinguished-name state/province.
    pub state: String,
    /// Distinguished-name city/locality.
    pub city: String,
    /// Distinguished-name organization.
    pub organization: String,
    /// Extra SAN values, raw as given on the command line.
    pub sans: Vec<String>,
    /// Where the private key PEM is written.
    pub key_path: PathBuf,
    /// Where the certificate PEM is written.
    pub cert_path: PathBuf,
}

impl Default for CertificateRequest {
    fn default() -> Self {
        Self {
            hostname: "localhost".to_string(),
            days: 365,
            key_bits: 2048,
            country: "US".to_string(),
            state: "State".to_string(),
            city: "City".to_string(),
            organization: "Local".to_string(),
            sans: Vec::new(),
            key_path: PathBuf::from("cert.key"),
            cert_path: PathBuf::from("cert.crt"),
        }
    }
}
