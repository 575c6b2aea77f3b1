// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::config::CertificateRequest;
use crate::error::{Error, Result};
use crate::keypair;
use crate::san::{self, SubjectAltName};
use crate::subject;
use rand::RngCore;
use rcgen::{CertificateParams, KeyUsagePurpose, SerialNumber};
use time::{Duration, OffsetDateTime};

/// Number of random bytes drawn for a serial number.
const SERIAL_BYTES: usize = 20;

/// A generated certificate with its private key.
pub struct Cert {
    /// The certificate in PEM format.
    pub pem: String,
    /// The private key in PEM format (PKCS#8, unencrypted).
    pub key_pem: String,
    /// The resolved SAN entries, in certificate order.
    pub sans: Vec<SubjectAltName>,
}

/// Validate that the validity period is usable.
///
/// # Errors
/// Returns an error if `days` is zero or negative.
pub fn validate_days(days: i64) -> Result<()> {
    if days <= 0 {
        return Err(Error::InvalidConfiguration(format!(
            "validity must be at least 1 day, got {}",
            days
        )));
    }
    Ok(())
}

fn expiry_out_of_range(days: i64) -> Error {
    Error::InvalidConfiguration(format!(
        "validity of {} days puts the expiry outside the representable range",
        days
    ))
}

/// Serial material: 20 random bytes with the top bit cleared, so the DER
/// integer is always positive.
fn random_serial_bytes() -> [u8; SERIAL_BYTES] {
    let mut bytes = [0u8; SERIAL_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes[0] &= 0x7f;
    bytes
}

impl Cert {
    /// Generate a self-signed certificate.
    ///
    /// A fresh key pair and serial number are drawn on every call. The
    /// subject doubles as the issuer, notBefore is the current UTC time,
    /// notAfter is exactly the requested number of days later, and the
    /// extensions are the SAN list (non-critical) and key usage
    /// (critical, digitalSignature + keyEncipherment). Signing uses
    /// SHA-256. Nothing is written to disk here; the caller decides what
    /// to do with the PEM strings.
    pub fn generate(request: &CertificateRequest) -> Result<Cert> {
        validate_days(request.days)?;
        let lifetime = request
            .days
            .checked_mul(86_400)
            .map(Duration::seconds)
            .ok_or_else(|| expiry_out_of_range(request.days))?;

        let key_pair = keypair::generate(request.key_bits)?;
        let sans = san::resolve_sans(&request.hostname, &request.sans);

        let mut params = CertificateParams::default();
        params.distinguished_name = subject::distinguished_name(request);
        for entry in &sans {
            params.subject_alt_names.push(entry.to_san_type()?);
        }
        params.key_usages = vec![
            KeyUsagePurpose::DigitalSignature,
            KeyUsagePurpose::KeyEncipherment,
        ];
        params.serial_number = Some(SerialNumber::from(random_serial_bytes().to_vec()));

        let now = OffsetDateTime::now_utc();
        params.not_before = now;
        params.not_after = now
            .checked_add(lifetime)
            .ok_or_else(|| expiry_out_of_range(request.days))?;

        let certificate = params.self_signed(&key_pair)?;

        Ok(Cert {
            pem: certificate.pem(),
            key_pem: key_pair.serialize_pem(),
            sans,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::x509;
    use once_cell::sync::Lazy;
    use x509_parser::prelude::*;

    /// One shared certificate for the read-only assertions below; RSA key
    /// generation dominates test time.
    static GENERATED: Lazy<Cert> = Lazy::new(|| {
        Cert::generate(&CertificateRequest::default())
            .expect("certificate generation should succeed")
    });

    fn parse_der(pem_str: &str) -> Vec<u8> {
        ::pem::parse(pem_str)
            .expect("generated PEM should parse")
            .into_contents()
    }

    #[test]
    fn test_validate_days() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(365).is_ok());
        assert!(matches!(
            validate_days(0),
            Err(Error::InvalidConfiguration(_))
        ));
        assert!(matches!(
            validate_days(-5),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_generate_rejects_bad_days_before_keygen() {
        let request = CertificateRequest {
            days: 0,
            ..CertificateRequest::default()
        };
        assert!(matches!(
            Cert::generate(&request),
            Err(Error::InvalidConfiguration(_))
        ));

        let request = CertificateRequest {
            days: i64::MAX,
            ..CertificateRequest::default()
        };
        assert!(matches!(
            Cert::generate(&request),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_generate_rejects_bad_key_size() {
        let request = CertificateRequest {
            key_bits: 512,
            ..CertificateRequest::default()
        };
        assert!(matches!(
            Cert::generate(&request),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_generate_emits_pem_pair() {
        assert!(GENERATED.pem.contains("BEGIN CERTIFICATE"));
        assert!(GENERATED.key_pem.contains("BEGIN PRIVATE KEY"));
    }

    #[test]
    fn test_generate_resolves_localhost_sans() {
        assert_eq!(
            GENERATED.sans,
            vec![
                SubjectAltName::Dns("localhost".into()),
                SubjectAltName::Ip("127.0.0.1".parse().expect("ipv4")),
                SubjectAltName::Ip("::1".parse().expect("ipv6")),
            ]
        );
    }

    #[test]
    fn test_validity_window_is_exact() {
        let info = x509::parse_cert_pem(&GENERATED.pem).expect("parse");
        assert_eq!(
            info.not_after_timestamp - info.not_before_timestamp,
            365 * 86_400
        );
    }

    #[test]
    fn test_not_before_is_generation_time() {
        let info = x509::parse_cert_pem(&GENERATED.pem).expect("parse");
        let now = OffsetDateTime::now_utc().unix_timestamp();

        // Encoding truncates to whole seconds, so notBefore never exceeds now
        assert!(info.not_before_timestamp <= now);
        assert!(now - info.not_before_timestamp < 600);
    }

    #[test]
    fn test_subject_equals_issuer() {
        let info = x509::parse_cert_pem(&GENERATED.pem).expect("parse");
        assert_eq!(info.subject, info.issuer);
        assert!(info.subject.contains("CN=localhost"));
        assert!(info.subject.contains("C=US"));
        assert!(info.subject.contains("O=Local"));
    }

    #[test]
    fn test_extension_criticality() {
        let info = x509::parse_cert_pem(&GENERATED.pem).expect("parse");
        assert!(info.key_usage_critical);
        assert!(!info.san_critical);
    }

    #[test]
    fn test_key_usage_bits() {
        let der = parse_der(&GENERATED.pem);
        let (_, cert) = X509Certificate::from_der(&der).expect("valid X.509");

        let mut seen = false;
        for ext in cert.extensions() {
            if let ParsedExtension::KeyUsage(ku) = ext.parsed_extension() {
                seen = true;
                assert!(ku.digital_signature());
                assert!(ku.key_encipherment());
                assert!(!ku.non_repudiation());
                assert!(!ku.data_encipherment());
                assert!(!ku.key_agreement());
                assert!(!ku.key_cert_sign());
                assert!(!ku.crl_sign());
            }
        }
        assert!(seen, "KeyUsage extension should be present");
    }

    #[test]
    fn test_serial_is_positive_and_long() {
        let der = parse_der(&GENERATED.pem);
        let (_, cert) = X509Certificate::from_der(&der).expect("valid X.509");

        let serial = cert.raw_serial();
        // DER drops leading zero octets, so the encoded form can shrink a
        // little below the 20 bytes drawn
        assert!(serial.len() >= 18 && serial.len() <= 20);
        assert_eq!(serial[0] & 0x80, 0, "serial must encode positive");
    }

    #[test]
    fn test_serial_unique_across_generations() {
        let other = Cert::generate(&CertificateRequest::default())
            .expect("certificate generation should succeed");

        let der_a = parse_der(&GENERATED.pem);
        let der_b = parse_der(&other.pem);
        let (_, cert_a) = X509Certificate::from_der(&der_a).expect("valid X.509");
        let (_, cert_b) = X509Certificate::from_der(&der_b).expect("valid X.509");

        assert_ne!(cert_a.raw_serial(), cert_b.raw_serial());
    }

    #[test]
    fn test_round_trip_sign_verify() {
        use rsa::pkcs1::DecodeRsaPublicKey;
        use rsa::pkcs8::DecodePrivateKey;
        use rsa::sha2::{Digest, Sha256};
        use rsa::{Pkcs1v15Sign, RsaPrivateKey, RsaPublicKey};

        let private_key =
            RsaPrivateKey::from_pkcs8_pem(&GENERATED.key_pem).expect("written key should parse");

        let der = parse_der(&GENERATED.pem);
        let (_, cert) = X509Certificate::from_der(&der).expect("valid X.509");
        let public_key =
            RsaPublicKey::from_pkcs1_der(&cert.public_key().subject_public_key.data)
                .expect("certificate public key should parse");

        // The certificate must carry the public half of the written key
        assert_eq!(public_key, RsaPublicKey::from(&private_key));

        let digest = Sha256::digest(b"localcert round trip");
        let signature = private_key
            .sign(Pkcs1v15Sign::new::<Sha256>(), &digest)
            .expect("signing should succeed");
        public_key
            .verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
            .expect("signature should verify");
    }
}
