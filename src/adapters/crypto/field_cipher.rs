//! Field-level encryption for stored profiles.
//!
//! AES-256-GCM with a fresh 96-bit nonce per value. Ciphertexts are stored as
//! `base64(nonce || ciphertext+tag)`. There is no plaintext passthrough: a
//! value that does not decrypt is an error.
//!
//! One key serves the whole process. It lives base64-encoded in a key file
//! that is created on first use.

use aes_gcm::aead::{Aead, AeadCore, OsRng};
use aes_gcm::{Aes256Gcm, Key, KeyInit, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tokio::fs;
use tokio::io::AsyncWriteExt;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Cipher failures.
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    #[error("key file is invalid: {0}")]
    InvalidKey(String),

    #[error("encryption failed")]
    Encrypt,

    #[error("ciphertext could not be decrypted: {0}")]
    Decrypt(String),

    #[error("key file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Symmetric cipher for individual string fields.
#[derive(Clone)]
pub struct FieldCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for FieldCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("FieldCipher([REDACTED])")
    }
}

impl FieldCipher {
    /// Creates a cipher from a raw 32-byte key.
    pub fn from_key_bytes(key: &[u8]) -> Result<Self, CipherError> {
        if key.len() != KEY_LEN {
            return Err(CipherError::InvalidKey(format!(
                "expected {} bytes, got {}",
                KEY_LEN,
                key.len()
            )));
        }
        Ok(Self {
            cipher: Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key)),
        })
    }

    /// Creates a cipher with a random key. The key is not persisted.
    pub fn ephemeral() -> Self {
        Self {
            cipher: Aes256Gcm::new(&Aes256Gcm::generate_key(OsRng)),
        }
    }

    /// Loads the key file, generating and writing a new key if it is absent.
    pub async fn load_or_create(path: &Path) -> Result<Self, CipherError> {
        match fs::read_to_string(path).await {
            Ok(encoded) => {
                let key = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| CipherError::InvalidKey(e.to_string()))?;
                Self::from_key_bytes(&key)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let key = Aes256Gcm::generate_key(OsRng);
                write_key_file(path, &STANDARD.encode(key)).await?;
                tracing::info!(path = %path.display(), "Created new encryption key file");
                Self::from_key_bytes(&key)
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CipherError::Encrypt)?;

        let mut packed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        packed.extend_from_slice(&nonce);
        packed.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(packed))
    }

    pub fn decrypt(&self, encoded: &str) -> Result<String, CipherError> {
        let packed = STANDARD
            .decode(encoded.trim())
            .map_err(|e| CipherError::Decrypt(format!("not base64: {}", e)))?;

        if packed.len() < NONCE_LEN + TAG_LEN {
            return Err(CipherError::Decrypt("ciphertext too short".into()));
        }

        let (nonce, ciphertext) = packed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Decrypt("wrong key or corrupted data".into()))?;

        String::from_utf8(plaintext).map_err(|e| CipherError::Decrypt(e.to_string()))
    }
}

async fn write_key_file(path: &Path, encoded: &str) -> Result<(), CipherError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    options.mode(0o600);

    let mut file = options.open(path).await?;
    file.write_all(encoded.as_bytes()).await?;
    file.flush().await?;
    Ok(())
}
