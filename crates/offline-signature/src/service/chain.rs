//! # Chain Identity Checker
//!
//! Answers "does this key currently control this account?" against a ledger
//! directory. Independent of signature verification: a valid signature from
//! a revoked key is still cryptographically valid, so callers that need
//! current authority run both.
//!
//! Lookups are bounded by a timeout and never retried here.

use crate::config::ChainConfig;
use crate::domain::access_key::AccessKeyLookup;
use crate::domain::errors::{ChainVerifyError, LookupError, VerifyError};
use crate::domain::envelope::fields;
use crate::domain::keys::PublicKey;
use crate::domain::message::{SignedMessage, VerifiedMessage};
use crate::domain::scheme::SignatureScheme;
use crate::domain::verifier::VerifyPolicy;
use crate::ports::outbound::AccessKeyDirectory;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tracing::{debug, warn};

/// Verified message plus the ledger's answer for its signer.
#[derive(Clone, Debug, PartialEq)]
pub struct ChainVerdict {
    pub verified: VerifiedMessage,
    pub lookup: AccessKeyLookup,
}

impl ChainVerdict {
    /// Signature valid AND key registered on the claimed account.
    pub fn is_authorized(&self) -> bool {
        self.lookup.is_authorized()
    }
}

pub struct ChainIdentityChecker<D: AccessKeyDirectory> {
    directory: D,
    timeout: Duration,
}

impl<D: AccessKeyDirectory> ChainIdentityChecker<D> {
    pub fn new(directory: D, timeout: Duration) -> Self {
        Self { directory, timeout }
    }

    pub fn from_config(directory: D, config: &ChainConfig) -> Self {
        Self::new(directory, config.lookup_timeout)
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Query the directory, giving up after the configured timeout.
    pub async fn lookup(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<AccessKeyLookup, LookupError> {
        let query = self.directory.query_access_key(account_id, public_key);

        let result = match tokio::time::timeout(self.timeout, query).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::Timeout(self.timeout)),
        };

        match &result {
            Ok(lookup) => debug!(
                account_id,
                public_key = %public_key,
                authorized = lookup.is_authorized(),
                "[offline-sig] access key lookup"
            ),
            Err(error) => warn!(
                account_id,
                public_key = %public_key,
                %error,
                "[offline-sig] access key lookup failed"
            ),
        }
        result
    }

    /// `Ok(true)` iff the key is registered on the account. A missing key and
    /// a missing account are both `Ok(false)`; only lookup failures are errors.
    pub async fn account_has_key(
        &self,
        account_id: &str,
        public_key: &PublicKey,
    ) -> Result<bool, LookupError> {
        self.lookup(account_id, public_key)
            .await
            .map(|lookup| lookup.is_authorized())
    }

    /// Look up the signer of an already-verified envelope under its `sub`.
    pub async fn check_claims(&self, verified: VerifiedMessage) -> Result<ChainVerdict, ChainVerifyError> {
        let account_id = verified
            .claims
            .as_ref()
            .map(|claims| claims.subject.clone())
            .ok_or(VerifyError::MissingField(fields::SUB))?;

        let lookup = self.lookup(&account_id, &verified.public_key).await?;
        Ok(ChainVerdict { verified, lookup })
    }

    /// Verify first; look up only if the message is valid.
    pub async fn verify_and_check(
        &self,
        scheme: &dyn SignatureScheme,
        message: &SignedMessage,
        policy: &VerifyPolicy,
        now: DateTime<Utc>,
    ) -> Result<ChainVerdict, ChainVerifyError> {
        let verified = scheme.verify(message, policy, now)?;
        self.check_claims(verified).await
    }
}
