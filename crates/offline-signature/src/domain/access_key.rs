//! # Access Keys
//!
//! Ledger-side view of a public key registered on an account. Only the
//! chain identity checker consumes these; signature verification never does.

use serde::{Deserialize, Serialize};

/// What a registered key is allowed to do.
///
/// Serializes in the ledger's RPC shape: `"FullAccess"` or
/// `{"FunctionCall": {"receiver_id", "method_names", "allowance"}}`, with the
/// allowance as a decimal string (`null` for unlimited).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessKeyPermission {
    /// Unrestricted key.
    FullAccess,
    /// Function-call-scoped key: limited to calls on `receiver_id`,
    /// optionally to `method_names`, optionally with a spending allowance.
    FunctionCall {
        receiver_id: String,
        #[serde(default)]
        method_names: Vec<String>,
        #[serde(default, with = "decimal_amount")]
        allowance: Option<u128>,
    },
}

/// `Option<u128>` as a decimal string or `null`.
mod decimal_amount {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(amount: &Option<u128>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match amount {
            Some(value) => serializer.serialize_str(&value.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<u128>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer)?
            .map(|s| s.parse::<u128>().map_err(serde::de::Error::custom))
            .transpose()
    }
}

/// Result of looking up a key on an account.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessKeyLookup {
    Found(AccessKeyPermission),
    /// The account exists but the key is not registered on it.
    NotFound,
    /// The account does not exist.
    AccountNotFound,
}

impl AccessKeyLookup {
    /// Whether the key currently controls the account.
    pub fn is_authorized(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    pub fn permission(&self) -> Option<&AccessKeyPermission> {
        match self {
            Self::Found(permission) => Some(permission),
            _ => None,
        }
    }
}
