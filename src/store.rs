use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;
use uuid::Uuid;
use zeroize::Zeroizing;

use crate::models::{Period, Profile, SymptomEntry};
use crate::vault::{Vault, VaultError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("vault error: {0}")]
    Vault(#[from] VaultError),
}

/// Where period and symptom history lives. Injected into the caller rather
/// than reached through any global; reads of an unknown user yield an empty
/// profile.
pub trait ProfileStore {
    fn profile(&self, user: Uuid) -> Result<Profile, StoreError>;
    fn add_period(&mut self, user: Uuid, period: Period) -> Result<(), StoreError>;
    fn add_symptom(&mut self, user: Uuid, entry: SymptomEntry) -> Result<(), StoreError>;
    fn set_show_fertility(&mut self, user: Uuid, enabled: bool) -> Result<(), StoreError>;
}

/// Plain in-memory store, useful for tests and as a session cache.
#[derive(Debug, Default)]
pub struct MemoryStore {
    profiles: HashMap<Uuid, Profile>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryStore {
    fn profile(&self, user: Uuid) -> Result<Profile, StoreError> {
        Ok(self.profiles.get(&user).cloned().unwrap_or_default())
    }

    fn add_period(&mut self, user: Uuid, period: Period) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().periods.push(period);
        Ok(())
    }

    fn add_symptom(&mut self, user: Uuid, entry: SymptomEntry) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().symptoms.push(entry);
        Ok(())
    }

    fn set_show_fertility(&mut self, user: Uuid, enabled: bool) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().settings.show_fertility = enabled;
        Ok(())
    }
}

/// Store backed by an encrypted vault file. Profiles are held in memory and
/// the whole snapshot is re-sealed after every mutation, so a crash never
/// leaves plaintext behind.
pub struct VaultStore {
    profiles: HashMap<Uuid, Profile>,
    vault: Vault,
    passphrase: Zeroizing<String>,
}

impl VaultStore {
    /// Open the vault, decrypting an existing snapshot or starting empty
    /// when the file does not exist yet.
    pub fn open(vault: Vault, passphrase: &str) -> Result<Self, StoreError> {
        let profiles = if vault.exists() {
            vault.load(passphrase)?
        } else {
            HashMap::new()
        };
        debug!(profiles = profiles.len(), "vault store opened");
        Ok(Self {
            profiles,
            vault,
            passphrase: Zeroizing::new(passphrase.to_owned()),
        })
    }

    pub fn path(&self) -> &PathBuf {
        self.vault.path()
    }

    fn persist(&self) -> Result<(), StoreError> {
        self.vault.save(&self.passphrase, &self.profiles)?;
        debug!(profiles = self.profiles.len(), "vault store persisted");
        Ok(())
    }
}

impl ProfileStore for VaultStore {
    fn profile(&self, user: Uuid) -> Result<Profile, StoreError> {
        Ok(self.profiles.get(&user).cloned().unwrap_or_default())
    }

    fn add_period(&mut self, user: Uuid, period: Period) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().periods.push(period);
        self.persist()
    }

    fn add_symptom(&mut self, user: Uuid, entry: SymptomEntry) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().symptoms.push(entry);
        self.persist()
    }

    fn set_show_fertility(&mut self, user: Uuid, enabled: bool) -> Result<(), StoreError> {
        self.profiles.entry(user).or_default().settings.show_fertility = enabled;
        self.persist()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn unknown_user_reads_as_empty_profile() {
        let store = MemoryStore::new();
        let profile = store.profile(Uuid::new_v4()).unwrap();
        assert!(profile.periods.is_empty());
        assert!(profile.symptoms.is_empty());
        assert!(!profile.settings.show_fertility);
    }

    #[test]
    fn users_do_not_see_each_other() {
        let mut store = MemoryStore::new();
        let alice = Uuid::new_v4();
        let bella = Uuid::new_v4();

        let period = Period::new(date("2026-01-01"), None).unwrap();
        store.add_period(alice, period).unwrap();
        store.set_show_fertility(alice, true).unwrap();

        assert_eq!(store.profile(alice).unwrap().periods.len(), 1);
        assert!(store.profile(bella).unwrap().periods.is_empty());
        assert!(!store.profile(bella).unwrap().settings.show_fertility);
    }

    #[test]
    fn vault_store_round_trips_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.pflow");
        let user = Uuid::new_v4();

        {
            let vault = Vault::at(path.clone());
            let mut store = VaultStore::open(vault, "pass").unwrap();
            let period = Period::new(date("2026-01-01"), Some(date("2026-01-05"))).unwrap();
            store.add_period(user, period).unwrap();
        }

        let vault = Vault::at(path);
        let store = VaultStore::open(vault, "pass").unwrap();
        let profile = store.profile(user).unwrap();
        assert_eq!(profile.periods.len(), 1);
        assert_eq!(profile.periods[0].start_date, date("2026-01-01"));
    }

    #[test]
    fn vault_store_rejects_wrong_passphrase() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.pflow");

        let vault = Vault::at(path.clone());
        let mut store = VaultStore::open(vault, "correct").unwrap();
        store
            .add_symptom(Uuid::new_v4(), SymptomEntry::on(date("2026-01-01")))
            .unwrap();
        drop(store);

        let vault = Vault::at(path);
        assert!(VaultStore::open(vault, "wrong").is_err());
    }
}
