//! # Atrium Cipher
//!
//! Authenticated encryption for opaque payloads exchanged with the host
//! application. Payloads are sealed with AES-256-GCM and travel as a
//! three-segment hex envelope:
//!
//! ```text
//! <iv-hex>:<tag-hex>:<ciphertext-hex>
//! ```
//!
//! A fresh 12-byte IV is drawn from the OS for every call, so sealing the
//! same plaintext twice yields different envelopes. The tag segment is the
//! 16-byte GCM authentication tag; any bit flip in any segment fails
//! decryption.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// IV length in bytes (96-bit GCM nonce)
const IV_LEN: usize = 12;

/// Authentication tag length in bytes
const TAG_LEN: usize = 16;

/// Key length in bytes (AES-256)
const KEY_LEN: usize = 32;

/// Error raised by sealing and opening payloads
#[derive(Debug, Error)]
pub enum CipherError {
    /// The key material does not decode to exactly 32 bytes
    #[error("Cipher key must be 32 bytes, got {got}")]
    InvalidKey { got: usize },

    /// A segment or key is not valid hex / base64
    #[error("Invalid encoding: {0}")]
    InvalidEncoding(String),

    /// The envelope does not have the expected segment structure
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// The ciphertext or tag fails authentication under the key
    #[error("Payload authentication failed")]
    AuthenticationFailure,
}

pub type Result<T> = std::result::Result<T, CipherError>;

/// Seals and opens payloads under a fixed AES-256-GCM key.
///
/// The cipher is cheap to construct; build one per key where it is needed
/// instead of sharing a process-wide instance.
#[derive(Clone)]
pub struct PayloadCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for PayloadCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material
        f.debug_struct("PayloadCipher").finish_non_exhaustive()
    }
}

impl PayloadCipher {
    /// Build a cipher from a hex-encoded 32-byte key
    pub fn from_hex_key(key_hex: &str) -> Result<Self> {
        let key_bytes =
            hex::decode(key_hex).map_err(|e| CipherError::InvalidEncoding(e.to_string()))?;
        Self::from_key_bytes(&key_bytes)
    }

    /// Build a cipher from raw key bytes
    pub fn from_key_bytes(key_bytes: &[u8]) -> Result<Self> {
        if key_bytes.len() != KEY_LEN {
            return Err(CipherError::InvalidKey {
                got: key_bytes.len(),
            });
        }
        let key = Key::<Aes256Gcm>::from_slice(key_bytes);
        Ok(Self {
            cipher: Aes256Gcm::new(key),
        })
    }

    /// Seal a plaintext into the `iv:tag:ciphertext` hex envelope.
    ///
    /// Draws a fresh random IV, so the output differs on every call even for
    /// identical plaintexts.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        let nonce = Nonce::from_slice(&iv);

        let sealed = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::AuthenticationFailure)?;

        // The AEAD output is ciphertext with the tag appended
        let (ciphertext, tag) = sealed.split_at(sealed.len() - TAG_LEN);

        Ok(format!(
            "{}:{}:{}",
            hex::encode(iv),
            hex::encode(tag),
            hex::encode(ciphertext)
        ))
    }

    /// Open an `iv:tag:ciphertext` hex envelope back into its plaintext.
    ///
    /// Fails with [`CipherError::AuthenticationFailure`] when any segment was
    /// altered or the key does not match the one that sealed the payload.
    pub fn decrypt(&self, envelope: &str) -> Result<String> {
        // Only the first three segments carry data; trailing ones are ignored
        let segments: Vec<&str> = envelope.split(':').collect();
        if segments.len() < 3 {
            return Err(CipherError::InvalidPayload(format!(
                "expected 3 segments, got {}",
                segments.len()
            )));
        }

        let iv = decode_segment(segments[0], "iv")?;
        let tag = decode_segment(segments[1], "tag")?;
        let ciphertext = decode_segment(segments[2], "ciphertext")?;

        if iv.len() != IV_LEN {
            return Err(CipherError::InvalidPayload(format!(
                "iv must be {IV_LEN} bytes, got {}",
                iv.len()
            )));
        }
        if tag.len() != TAG_LEN {
            return Err(CipherError::InvalidPayload(format!(
                "tag must be {TAG_LEN} bytes, got {}",
                tag.len()
            )));
        }

        let mut sealed = ciphertext;
        sealed.extend_from_slice(&tag);

        let nonce = Nonce::from_slice(&iv);
        let plaintext = self
            .cipher
            .decrypt(nonce, sealed.as_slice())
            .map_err(|_| CipherError::AuthenticationFailure)?;

        String::from_utf8(plaintext)
            .map_err(|e| CipherError::InvalidPayload(format!("plaintext is not UTF-8: {e}")))
    }

    /// Seal a plaintext and wrap the whole envelope in base64 for transports
    /// that dislike the `:` separator
    pub fn encrypt_base64(&self, plaintext: &str) -> Result<String> {
        let envelope = self.encrypt(plaintext)?;
        Ok(BASE64.encode(envelope.as_bytes()))
    }

    /// Open a base64-wrapped envelope
    pub fn decrypt_base64(&self, wrapped: &str) -> Result<String> {
        let raw = BASE64
            .decode(wrapped)
            .map_err(|e| CipherError::InvalidEncoding(e.to_string()))?;
        let envelope = String::from_utf8(raw)
            .map_err(|e| CipherError::InvalidEncoding(e.to_string()))?;
        self.decrypt(&envelope)
    }
}

fn decode_segment(segment: &str, name: &str) -> Result<Vec<u8>> {
    hex::decode(segment).map_err(|e| CipherError::InvalidEncoding(format!("{name}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const KEY_HEX: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

    fn cipher() -> PayloadCipher {
        PayloadCipher::from_hex_key(KEY_HEX).unwrap()
    }

    // ============== Key Handling Tests ==============

    #[test]
    fn test_short_key_rejected() {
        let err = PayloadCipher::from_hex_key("00ff").unwrap_err();
        assert!(matches!(err, CipherError::InvalidKey { got: 2 }));
    }

    #[test]
    fn test_non_hex_key_rejected() {
        let err = PayloadCipher::from_hex_key("not-hex-at-all").unwrap_err();
        assert!(matches!(err, CipherError::InvalidEncoding(_)));
    }

    #[test]
    fn test_raw_key_bytes_accepted() {
        assert!(PayloadCipher::from_key_bytes(&[7u8; 32]).is_ok());
        assert!(matches!(
            PayloadCipher::from_key_bytes(&[7u8; 16]).unwrap_err(),
            CipherError::InvalidKey { got: 16 }
        ));
    }

    // ============== Envelope Tests ==============

    #[test]
    fn test_roundtrip() {
        let cipher = cipher();
        let envelope = cipher.encrypt("hello world").unwrap();
        assert_eq!(cipher.decrypt(&envelope).unwrap(), "hello world");
    }

    #[test]
    fn test_envelope_shape() {
        let envelope = cipher().encrypt("payload").unwrap();
        let segments: Vec<&str> = envelope.split(':').collect();

        assert_eq!(segments.len(), 3);
        // hex doubles the byte lengths
        assert_eq!(segments[0].len(), IV_LEN * 2);
        assert_eq!(segments[1].len(), TAG_LEN * 2);
        assert_eq!(segments[2].len(), "payload".len() * 2);
    }

    #[test]
    fn test_fresh_iv_per_call() {
        let cipher = cipher();
        let a = cipher.encrypt("same input").unwrap();
        let b = cipher.encrypt("same input").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_empty_plaintext_roundtrips() {
        let cipher = cipher();
        let envelope = cipher.encrypt("").unwrap();
        assert_eq!(cipher.decrypt(&envelope).unwrap(), "");
    }

    #[test]
    fn test_unicode_roundtrips() {
        let cipher = cipher();
        let text = "名前: グレース 🗝";
        let envelope = cipher.encrypt(text).unwrap();
        assert_eq!(cipher.decrypt(&envelope).unwrap(), text);
    }

    // ============== Rejection Tests ==============

    #[test]
    fn test_missing_segments_rejected() {
        let err = cipher().decrypt("deadbeef").unwrap_err();
        assert!(matches!(err, CipherError::InvalidPayload(_)));

        let err = cipher().decrypt("dead:beef").unwrap_err();
        assert!(matches!(err, CipherError::InvalidPayload(_)));
    }

    #[test]
    fn test_trailing_segments_ignored() {
        let cipher = cipher();
        let envelope = cipher.encrypt("payload").unwrap();

        let padded = format!("{}:deadbeef", envelope);
        assert_eq!(cipher.decrypt(&padded).unwrap(), "payload");
    }

    #[test]
    fn test_odd_length_hex_rejected() {
        let cipher = cipher();
        let mut envelope = cipher.encrypt("payload").unwrap();
        envelope.push('a');
        assert!(matches!(
            cipher.decrypt(&envelope).unwrap_err(),
            CipherError::InvalidEncoding(_)
        ));
    }

    #[test]
    fn test_tampered_tag_fails_authentication() {
        let cipher = cipher();
        let envelope = cipher.encrypt("payload").unwrap();

        let mut segments: Vec<String> =
            envelope.split(':').map(str::to_string).collect();
        let tag = &mut segments[1];
        let flipped = if tag.starts_with('0') { "1" } else { "0" };
        tag.replace_range(0..1, flipped);

        let err = cipher.decrypt(&segments.join(":")).unwrap_err();
        assert!(matches!(err, CipherError::AuthenticationFailure));
    }

    #[test]
    fn test_tampered_ciphertext_fails_authentication() {
        let cipher = cipher();
        let envelope = cipher.encrypt("payload").unwrap();

        let mut segments: Vec<String> =
            envelope.split(':').map(str::to_string).collect();
        let ct = &mut segments[2];
        let flipped = if ct.starts_with('0') { "1" } else { "0" };
        ct.replace_range(0..1, flipped);

        let err = cipher.decrypt(&segments.join(":")).unwrap_err();
        assert!(matches!(err, CipherError::AuthenticationFailure));
    }

    #[test]
    fn test_wrong_key_fails_authentication() {
        let envelope = cipher().encrypt("payload").unwrap();
        let other = PayloadCipher::from_key_bytes(&[9u8; 32]).unwrap();
        assert!(matches!(
            other.decrypt(&envelope).unwrap_err(),
            CipherError::AuthenticationFailure
        ));
    }

    #[test]
    fn test_wrong_iv_length_rejected() {
        let cipher = cipher();
        let envelope = cipher.encrypt("payload").unwrap();
        let segments: Vec<&str> = envelope.split(':').collect();

        let short_iv = format!("abcd:{}:{}", segments[1], segments[2]);
        assert!(matches!(
            cipher.decrypt(&short_iv).unwrap_err(),
            CipherError::InvalidPayload(_)
        ));
    }

    // ============== Base64 Wrapper Tests ==============

    #[test]
    fn test_base64_roundtrip() {
        let cipher = cipher();
        let wrapped = cipher.encrypt_base64("hello").unwrap();
        assert!(!wrapped.contains(':'));
        assert_eq!(cipher.decrypt_base64(&wrapped).unwrap(), "hello");
    }

    #[test]
    fn test_invalid_base64_rejected() {
        assert!(matches!(
            cipher().decrypt_base64("!!! not base64 !!!").unwrap_err(),
            CipherError::InvalidEncoding(_)
        ));
    }

    // ============== Trait Bounds ==============

    #[test]
    fn test_cipher_is_send_and_sync() {
        fn assert_bounds<T: Send + Sync>() {}
        assert_bounds::<PayloadCipher>();
    }

    #[test]
    fn test_debug_hides_key() {
        let rendered = format!("{:?}", cipher());
        assert!(!rendered.contains(KEY_HEX));
    }

    // ============== Property Tests ==============

    proptest! {
        #[test]
        fn prop_roundtrip_arbitrary_printable(text in "[ -~]{0,256}") {
            let cipher = cipher();
            let envelope = cipher.encrypt(&text).unwrap();
            prop_assert_eq!(cipher.decrypt(&envelope).unwrap(), text);
        }

        #[test]
        fn prop_base64_roundtrip(text in "[ -~]{0,128}") {
            let cipher = cipher();
            let wrapped = cipher.encrypt_base64(&text).unwrap();
            prop_assert_eq!(cipher.decrypt_base64(&wrapped).unwrap(), text);
        }
    }
}
