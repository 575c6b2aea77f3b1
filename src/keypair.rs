// Copyright 2025 Jayashankar
// SPDX-License-Identifier: Apache-2.0

use crate::error::{Error, Result};
use rcgen::KeyPair;
use rsa::pkcs8::{EncodePrivateKey, LineEnding};
use rsa::RsaPrivateKey;

/// RSA key sizes accepted for generation. The signing backend refuses
/// moduli below 2048 bits, so smaller requests are rejected up front.
pub const RSA_KEY_SIZES: &[u32] = &[2048, 3072, 4096];

/// Validate that the requested key size is one of the supported RSA
/// sizes.
///
/// # Errors
/// Returns an error if `bits` is not listed in [`RSA_KEY_SIZES`].
pub fn validate_key_bits(bits: u32) -> Result<()> {
    if !RSA_KEY_SIZES.contains(&bits) {
        return Err(Error::InvalidConfiguration(format!(
            "unsupported key size {} bits: choose one of 2048, 3072 or 4096",
            bits
        )));
    }
    Ok(())
}

/// Generate a fresh RSA key pair (public exponent 65537) of the given
/// size, ready to sign with SHA-256. A new key is produced on every call;
/// nothing is cached. Generation time grows steeply with key size.
pub fn generate(bits: u32) -> Result<KeyPair> {
    validate_key_bits(bits)?;

    let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), bits as usize)
        .map_err(|e| Error::KeyGeneration(e.to_string()))?;

    let pkcs8 = private_key
        .to_pkcs8_pem(LineEnding::LF)
        .map_err(|e| Error::KeyGeneration(format!("could not encode PKCS#8: {}", e)))?;

    KeyPair::from_pem_and_sign_algo(&pkcs8, &rcgen::PKCS_RSA_SHA256)
        .map_err(|e| Error::KeyGeneration(format!("could not load key for signing: {}", e)))
}
