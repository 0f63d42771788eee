//! # In-Memory Access Key Directory
//!
//! Account and key registry held in process. Used by tests and by
//! deployments that mirror the ledger locally.

use crate::domain::access_key::{AccessKeyLookup, AccessKeyPermission};
use crate::domain::errors::LookupError;
use crate::domain::keys::PublicKey;
use crate::ports::outbound::AccessKeyDirectory;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct InMemoryAccessKeyDirectory {
    accounts: RwLock<HashMap<String, HashMap<String, AccessKeyPermission>>>,
    unavailable: RwLock<Option<String>>,
}

impl InMemoryAccessKeyDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the account if absent. Existing keys are kept.
    pub fn add_account(&self, account_id: impl Into<String>) {
        self.accounts.write().entry(account_id.into()).or_default();
    }

    /// Register `public_key` on `account_id`, creating the account if needed.
    pub fn add_key(
        &self,
        account_id: impl Into<String>,
        public_key: &PublicKey,
        permission: AccessKeyPermission,
    ) {
        self.accounts
            .write()
            .entry(account_id.into())
            .or_default()
            .insert(public_key.encode(), permission);
    }

    /// Returns true if the key was registered.
    pub fn remove_key(&self, account_id: &str, public_key: &PublicKey) -> bool {
        self.accounts
            .write()
            .get_mut(account_id)
            .is_some_and(|keys| keys.remove(&public_key.encode()).is_some())
    }

    /// Make every lookup fail with a transport error until cleared.
    pub fn set_unavailable(&self, reason: Option<String>) {
        *self.unavailable.write() = reason;
    }
}

#[async_trait]
impl AccessKeyDirectory for InMemoryAccessKeyDirectory {
    async fn query_access_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyLookup, LookupError> {
        if let Some(reason) = self.unavailable.read().clone() {
            return Err(LookupError::Transport(reason));
        }

        let accounts = self.accounts.read();
        let lookup = match accounts.get(account_id) {
            None => AccessKeyLookup::AccountNotFound,
            Some(keys) => keys
                .get(&public_key.encode())
                .cloned()
                .map_or(AccessKeyLookup::NotFound, AccessKeyLookup::Found),
        };
        Ok(lookup)
    }
}
