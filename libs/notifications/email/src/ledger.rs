//! Idempotency ledger for queue callbacks
//!
//! The queue delivers at least once. A callback claims its message id
//! before sending; a second claim of the same id within the TTL is a
//! duplicate and is acknowledged without sending again.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// How long a delivered message id is remembered
pub const DEFAULT_LEDGER_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[async_trait]
pub trait DeliveryLedger: Send + Sync {
    /// Record `id` as in flight or delivered. Returns `false` if it already was.
    async fn claim(&self, id: &str) -> bool;

    /// Forget `id` so a retried delivery can claim it again.
    async fn release(&self, id: &str);
}

/// Process-local ledger. Entries expire after the TTL and are pruned on access.
#[derive(Debug)]
pub struct InMemoryDeliveryLedger {
    entries: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl InMemoryDeliveryLedger {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryDeliveryLedger {
    fn default() -> Self {
        Self::new(DEFAULT_LEDGER_TTL)
    }
}

#[async_trait]
impl DeliveryLedger for InMemoryDeliveryLedger {
    async fn claim(&self, id: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, claimed_at| now.duration_since(*claimed_at) < self.ttl);

        if entries.contains_key(id) {
            return false;
        }
        entries.insert(id.to_string(), now);
        true
    }

    async fn release(&self, id: &str) {
        self.entries.write().await.remove(id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_second_claim_is_duplicate() {
        let ledger = InMemoryDeliveryLedger::default();
        assert!(ledger.claim("msg_1").await);
        assert!(!ledger.claim("msg_1").await);
        assert!(ledger.claim("msg_2").await);
        assert_eq!(ledger.len().await, 2);
    }

    #[tokio::test]
    async fn test_release_allows_reclaim() {
        let ledger = InMemoryDeliveryLedger::default();
        assert!(ledger.claim("msg_1").await);
        ledger.release("msg_1").await;
        assert!(ledger.claim("msg_1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_entries_expire_after_ttl() {
        let ledger = InMemoryDeliveryLedger::new(Duration::from_secs(60));
        assert!(ledger.claim("msg_1").await);

        tokio::time::advance(Duration::from_secs(30)).await;
        assert!(!ledger.claim("msg_1").await);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert!(ledger.claim("msg_1").await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_are_pruned() {
        let ledger = InMemoryDeliveryLedger::new(Duration::from_secs(1));
        ledger.claim("old").await;

        tokio::time::advance(Duration::from_secs(2)).await;
        ledger.claim("new").await;

        assert_eq!(ledger.len().await, 1);
    }
}
