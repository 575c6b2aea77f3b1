// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

//! Self-signed certificate generation for development HTTPS.
//!
//! ```rust,no_run
//! use localcert::{fs, Cert, CertificateRequest};
//!
//! let request = CertificateRequest {
//!     hostname: "dev.local".into(),
//!     days: 30,
//!     ..CertificateRequest::default()
//! };
//!
//! let cert = Cert::generate(&request)?;
//! fs::atomic_write_secret(&request.key_path, &cert.key_pem)?;
//! fs::atomic_write(&request.cert_path, &cert.pem)?;
//! # Ok::<(), localcert::Error>(())
//! ```

/// Certificate assembly and signing.
pub mod cert;
/// The certificate request and its defaults.
pub mod config;
/// Error types.
pub mod error;
/// Filesystem utilities.
pub mod fs;
/// RSA key pair generation.
pub mod keypair;
/// Subject alternative name handling.
pub mod san;
/// Subject distinguished name handling.
pub mod subject;
/// X.509 certificate parsing.
pub mod x509;

pub use cert::{validate_days, Cert};
pub use config::CertificateRequest;
pub use error::{Error, Result};
pub use fs::{atomic_write, atomic_write_secret};
pub use keypair::{validate_key_bits, RSA_KEY_SIZES};
pub use san::{resolve_sans, SubjectAltName, LOCALHOST_IPS};
pub use subject::distinguished_name;
pub use x509::{parse_cert_file, parse_cert_pem, CertInfo};
