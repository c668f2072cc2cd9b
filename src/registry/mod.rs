// src/registry/mod.rs — Content ownership registry

pub mod ledger;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::infra::errors::SkyrunError;

/// Hex sha-256 digest of content, the registry's primary key.
pub fn content_hash(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxAction {
    Register,
    Transfer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxStatus {
    Success,
    Failed,
}

impl std::fmt::Display for TxStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TxStatus::Success => write!(f, "success"),
            TxStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Ownership record for one piece of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRecord {
    pub content_hash: String,
    pub owner: String,
    pub metadata: serde_json::Value,
    pub registered_at: DateTime<Utc>,
}

/// One committed registry operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub tx_id: String,
    pub action: TxAction,
    pub content_hash: String,
    pub status: TxStatus,
    pub timestamp: DateTime<Utc>,
}

/// Ledger capability recording who owns produced content.
///
/// The trait is the seam where a real chain or ledger-service client plugs
/// in; the core only needs these five operations.
pub trait ContentRegistry: Send + Sync {
    fn register(
        &self,
        content_hash: &str,
        owner: &str,
        metadata: serde_json::Value,
    ) -> Result<TransactionRecord, SkyrunError>;

    fn transfer_ownership(
        &self,
        content_hash: &str,
        from: &str,
        to: &str,
    ) -> Result<TransactionRecord, SkyrunError>;

    fn owner_of(&self, content_hash: &str) -> Option<String>;

    fn metadata_of(&self, content_hash: &str) -> Option<serde_json::Value>;

    fn verify_ownership(&self, content_hash: &str, address: &str) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_hash_is_stable() {
        let a = content_hash("same content");
        let b = content_hash("same content");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn test_content_hash_differs() {
        assert_ne!(content_hash("a"), content_hash("b"));
    }

    #[test]
    fn test_tx_status_display() {
        assert_eq!(format!("{}", TxStatus::Success), "success");
        assert_eq!(format!("{}", TxStatus::Failed), "failed");
    }
}
