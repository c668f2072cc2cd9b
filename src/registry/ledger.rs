// src/registry/ledger.rs — In-memory ledger implementation

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Utc;
use sha2::{Digest, Sha256};

use super::{ContentRecord, ContentRegistry, TransactionRecord, TxAction, TxStatus};
use crate::infra::errors::SkyrunError;

#[derive(Default)]
struct LedgerInner {
    records: HashMap<String, ContentRecord>,
    log: Vec<TransactionRecord>,
}

/// Process-local registry: an ownership map plus an append-only transaction
/// log, guarded by one mutex. The default backing for deployments that have
/// no external ledger, and the substitute used in tests.
#[derive(Default)]
pub struct InMemoryLedger {
    inner: Mutex<LedgerInner>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// All committed transactions, oldest first.
    pub fn transactions(&self) -> Vec<TransactionRecord> {
        self.lock().log.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, LedgerInner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn tx_id(action: TxAction, content_hash: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content_hash.as_bytes());
        hasher.update(match action {
            TxAction::Register => b"register".as_slice(),
            TxAction::Transfer => b"transfer".as_slice(),
        });
        hasher.update(uuid::Uuid::new_v4().as_bytes());
        format!("0x{}", hex::encode(hasher.finalize()))
    }
}

impl ContentRegistry for InMemoryLedger {
    fn register(
        &self,
        content_hash: &str,
        owner: &str,
        metadata: serde_json::Value,
    ) -> Result<TransactionRecord, SkyrunError> {
        let mut inner = self.lock();
        if inner.records.contains_key(content_hash) {
            return Err(SkyrunError::AlreadyRegistered {
                hash: content_hash.into(),
            });
        }

        inner.records.insert(
            content_hash.to_string(),
            ContentRecord {
                content_hash: content_hash.into(),
                owner: owner.into(),
                metadata,
                registered_at: Utc::now(),
            },
        );

        let tx = TransactionRecord {
            tx_id: Self::tx_id(TxAction::Register, content_hash),
            action: TxAction::Register,
            content_hash: content_hash.into(),
            status: TxStatus::Success,
            timestamp: Utc::now(),
        };
        inner.log.push(tx.clone());

        tracing::info!(hash = content_hash, owner, "Content registered");
        Ok(tx)
    }

    fn transfer_ownership(
        &self,
        content_hash: &str,
        from: &str,
        to: &str,
    ) -> Result<TransactionRecord, SkyrunError> {
        let mut inner = self.lock();
        let record = inner
            .records
            .get_mut(content_hash)
            .ok_or_else(|| SkyrunError::ContentNotFound {
                hash: content_hash.into(),
            })?;

        if record.owner != from {
            return Err(SkyrunError::NotOwner {
                hash: content_hash.into(),
                address: from.into(),
            });
        }
        record.owner = to.to_string();

        let tx = TransactionRecord {
            tx_id: Self::tx_id(TxAction::Transfer, content_hash),
            action: TxAction::Transfer,
            content_hash: content_hash.into(),
            status: TxStatus::Success,
            timestamp: Utc::now(),
        };
        inner.log.push(tx.clone());

        tracing::info!(hash = content_hash, from, to, "Ownership transferred");
        Ok(tx)
    }

    fn owner_of(&self, content_hash: &str) -> Option<String> {
        self.lock()
            .records
            .get(content_hash)
            .map(|r| r.owner.clone())
    }

    fn metadata_of(&self, content_hash: &str) -> Option<serde_json::Value> {
        self.lock()
            .records
            .get(content_hash)
            .map(|r| r.metadata.clone())
    }

    fn verify_ownership(&self, content_hash: &str, address: &str) -> bool {
        self.owner_of(content_hash).as_deref() == Some(address)
    }
}
