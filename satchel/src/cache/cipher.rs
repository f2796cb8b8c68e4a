//! Symmetric encryption of cache records at rest.
//!
//! A record is `base64(nonce || ciphertext)` sealed with ChaCha20-Poly1305.
//! The 256-bit key is the SHA-256 digest of the configured key string, so a
//! single deployment key yields the same cipher in every process.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use chacha20poly1305::{
    ChaCha20Poly1305, Key, Nonce,
    aead::{Aead, AeadCore, KeyInit, OsRng},
};
use sha2::{Digest, Sha256};
use shared::{Error, Result};

/// 12-byte nonce for ChaCha20Poly1305
const NONCE_LEN: usize = 12;

#[derive(Clone)]
pub struct RecordCipher {
    cipher: ChaCha20Poly1305,
}

impl RecordCipher {
    /// Derive the cipher from the configured key string.
    pub fn from_key(key: &str) -> Self {
        let digest = Sha256::digest(key.as_bytes());
        let mut raw = [0u8; 32];
        raw.copy_from_slice(digest.as_slice());

        Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&raw)),
        }
    }

    /// Seal a serialized entry. A fresh nonce is drawn for every call.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|e| Error::Encryption(format!("Encryption failed: {}", e)))?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(nonce.as_slice());
        sealed.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(sealed))
    }

    /// Open a sealed record. Wrong key, truncation and tampering all surface
    /// as [`Error::Corruption`].
    pub fn decrypt(&self, record: &str) -> Result<String> {
        let sealed = STANDARD
            .decode(record.trim())
            .map_err(|e| Error::Corruption(format!("record is not base64: {}", e)))?;

        if sealed.len() <= NONCE_LEN {
            return Err(Error::Corruption(format!(
                "record too short: {} bytes",
                sealed.len()
            )));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| Error::Corruption("record failed authentication".to_string()))?;

        let text = String::from_utf8(plaintext)
            .map_err(|e| Error::Corruption(format!("decrypted record is not UTF-8: {}", e)))?;

        if text.is_empty() {
            return Err(Error::Corruption("decrypted record is empty".to_string()));
        }

        Ok(text)
    }
}

impl std::fmt::Debug for RecordCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordCipher")
            .field("cipher", &"<ChaCha20Poly1305>")
            .finish()
    }
}
