//! Encrypted at-rest storage for profile snapshots.
//!
//! File layout: `header (8) || salt (32) || nonce (12) || ciphertext`. The
//! header doubles as AEAD associated data, so editing it (or any byte of the
//! ciphertext) fails authentication rather than producing garbage profiles.

use std::fs;
use std::path::{Path, PathBuf};

use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use argon2::{Algorithm, Argon2, Params, Version};
use rand::RngCore;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use zeroize::Zeroize;

const HEADER: &[u8; 8] = b"PFLOW\x01\x00\x00";
const SALT_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

// Argon2id cost: 64 MiB, 3 passes, single lane.
const KDF_MEMORY_KIB: u32 = 65536;
const KDF_ITERATIONS: u32 = 3;
const KDF_LANES: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum VaultError {
    #[error("key derivation failed")]
    KeyDerivation,
    #[error("sealing failed")]
    Seal,
    #[error("vault unreadable: wrong passphrase or tampered data")]
    Unreadable,
    #[error("not a vault file")]
    Format,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("no local data directory available")]
    NoDataDir,
}

/// Handle to one encrypted snapshot file. The path is injected; nothing here
/// is a singleton.
#[derive(Debug, Clone)]
pub struct Vault {
    path: PathBuf,
}

impl Vault {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The conventional per-user location under the platform's local data
    /// directory.
    pub fn default_path() -> Result<Self, VaultError> {
        let dir = dirs::data_local_dir().ok_or(VaultError::NoDataDir)?;
        Ok(Self::at(dir.join("periodflow").join("profiles.pflow")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Serialize and seal `value` under `passphrase`, replacing any previous
    /// snapshot.
    pub fn save<T: Serialize>(&self, passphrase: &str, value: &T) -> Result<(), VaultError> {
        let mut plaintext = serde_json::to_vec(value)?;
        let sealed = seal(passphrase, &plaintext);
        plaintext.zeroize();
        let sealed = sealed?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, &sealed)?;
        debug!(bytes = sealed.len(), "vault snapshot written");
        Ok(())
    }

    /// Open and deserialize the snapshot. Fails with [`VaultError::Unreadable`]
    /// on a wrong passphrase or any tampering, [`VaultError::Format`] when the
    /// file is not a vault at all.
    pub fn load<T: DeserializeOwned>(&self, passphrase: &str) -> Result<T, VaultError> {
        let sealed = fs::read(&self.path)?;
        let mut plaintext = open(passphrase, &sealed)?;
        let value = serde_json::from_slice(&plaintext);
        plaintext.zeroize();
        Ok(value?)
    }

    /// Delete the snapshot file, if any.
    pub fn wipe(&self) -> Result<(), VaultError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
            warn!(path = %self.path.display(), "vault wiped");
        }
        Ok(())
    }
}

fn derive_key(passphrase: &str, salt: &[u8]) -> Result<[u8; KEY_LEN], VaultError> {
    let params = Params::new(KDF_MEMORY_KIB, KDF_ITERATIONS, KDF_LANES, Some(KEY_LEN))
        .map_err(|_| VaultError::KeyDerivation)?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; KEY_LEN];
    argon2
        .hash_password_into(passphrase.as_bytes(), salt, &mut key)
        .map_err(|_| VaultError::KeyDerivation)?;
    Ok(key)
}

fn seal(passphrase: &str, plaintext: &[u8]) -> Result<Vec<u8>, VaultError> {
    let mut salt = [0u8; SALT_LEN];
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    rand::thread_rng().fill_bytes(&mut nonce_bytes);

    let mut key = derive_key(passphrase, &salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| VaultError::Seal);
    key.zeroize();
    let cipher = cipher?;

    let ciphertext = cipher
        .encrypt(
            Nonce::from_slice(&nonce_bytes),
            Payload {
                msg: plaintext,
                aad: HEADER,
            },
        )
        .map_err(|_| VaultError::Seal)?;

    let mut out = Vec::with_capacity(HEADER.len() + SALT_LEN + NONCE_LEN + ciphertext.len());
    out.extend_from_slice(HEADER);
    out.extend_from_slice(&salt);
    out.extend_from_slice(&nonce_bytes);
    out.extend_from_slice(&ciphertext);
    Ok(out)
}

fn open(passphrase: &str, sealed: &[u8]) -> Result<Vec<u8>, VaultError> {
    if sealed.len() < HEADER.len() + SALT_LEN + NONCE_LEN || &sealed[..HEADER.len()] != HEADER {
        return Err(VaultError::Format);
    }

    let salt = &sealed[HEADER.len()..HEADER.len() + SALT_LEN];
    let nonce = &sealed[HEADER.len() + SALT_LEN..HEADER.len() + SALT_LEN + NONCE_LEN];
    let ciphertext = &sealed[HEADER.len() + SALT_LEN + NONCE_LEN..];

    let mut key = derive_key(passphrase, salt)?;
    let cipher = Aes256Gcm::new_from_slice(&key).map_err(|_| VaultError::Unreadable);
    key.zeroize();
    let cipher = cipher?;

    cipher
        .decrypt(
            Nonce::from_slice(nonce),
            Payload {
                msg: ciphertext,
                aad: HEADER,
            },
        )
        .map_err(|_| VaultError::Unreadable)
}
