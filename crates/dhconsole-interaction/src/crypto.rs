//! RSA encryption of outbound payloads under the session public key.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use dhconsole_core::{ConsoleError, Result};
use rsa::pkcs1::DecodeRsaPublicKey;
use rsa::pkcs8::DecodePublicKey;
use rsa::{Pkcs1v15Encrypt, RsaPublicKey};

const PKCS1_HEADER: &str = "-----BEGIN RSA PUBLIC KEY-----";

/// Encrypts with PKCS#1 v1.5 padding and returns base64 ciphertext.
#[derive(Debug, Clone)]
pub struct RsaEncryptor {
    key: RsaPublicKey,
}

impl RsaEncryptor {
    /// Parses a PEM public key.
    ///
    /// Accepts SPKI (`BEGIN PUBLIC KEY`), PKCS#1 (`BEGIN RSA PUBLIC KEY`), and a
    /// bare base64 DER body (SPKI or PKCS#1) without armor.
    pub fn from_pem(pem: &str) -> Result<Self> {
        let pem = pem.trim();
        if pem.is_empty() {
            return Err(ConsoleError::encryption(
                "RSA public key is not set; create a session first",
            ));
        }

        let key = if pem.starts_with(PKCS1_HEADER) {
            RsaPublicKey::from_pkcs1_pem(pem)
                .map_err(|e| ConsoleError::encryption(format!("Invalid PKCS#1 public key: {e}")))?
        } else if pem.starts_with("-----BEGIN") {
            RsaPublicKey::from_public_key_pem(pem)
                .map_err(|e| ConsoleError::encryption(format!("Invalid public key: {e}")))?
        } else {
            let body: String = pem.split_whitespace().collect();
            let der = BASE64_STANDARD
                .decode(body)
                .map_err(|e| ConsoleError::encryption(format!("Invalid public key encoding: {e}")))?;
            RsaPublicKey::from_public_key_der(&der)
                .or_else(|_| RsaPublicKey::from_pkcs1_der(&der))
                .map_err(|e| ConsoleError::encryption(format!("Invalid public key: {e}")))?
        };

        Ok(Self { key })
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut rng = rand::thread_rng();
        let ciphertext = self
            .key
            .encrypt(&mut rng, Pkcs1v15Encrypt, plaintext.as_bytes())
            .map_err(|e| ConsoleError::encryption(format!("Encryption failed: {e}")))?;
        Ok(BASE64_STANDARD.encode(ciphertext))
    }
}
