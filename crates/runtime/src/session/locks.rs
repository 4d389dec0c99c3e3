//! Per-match serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

use game_core::MatchId;

/// One async mutex per match id.
///
/// Every read-modify-write of a match holds its guard, so duplicate requests
/// for the same match run one after another while different matches proceed
/// in parallel.
#[derive(Default)]
pub struct MatchLocks {
    slots: Mutex<HashMap<MatchId, Arc<AsyncMutex<()>>>>,
}

impl MatchLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to `id`.
    pub async fn acquire(&self, id: &MatchId) -> OwnedMutexGuard<()> {
        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(slots.entry(id.clone()).or_default())
        };
        slot.lock_owned().await
    }

    /// Drops the slot for `id` if nobody holds or waits on it.
    pub fn release(&self, id: &MatchId) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        if slots.get(id).is_some_and(|slot| Arc::strong_count(slot) == 1) {
            slots.remove(id);
        }
    }

    /// Drops slots nobody holds or waits on.
    pub fn prune(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.retain(|_, slot| Arc::strong_count(slot) > 1);
    }

    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn same_match_is_serialized() {
        let locks = Arc::new(MatchLocks::new());
        let id = MatchId::new("m");

        let guard = locks.acquire(&id).await;
        let contender = {
            let locks = Arc::clone(&locks);
            let id = id.clone();
            tokio::spawn(async move {
                let _guard = locks.acquire(&id).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn prune_keeps_held_slots() {
        let locks = MatchLocks::new();
        let held = locks.acquire(&MatchId::new("held")).await;
        drop(locks.acquire(&MatchId::new("idle")).await);

        locks.prune();
        assert_eq!(locks.len(), 1);

        drop(held);
        locks.prune();
        assert!(locks.is_empty());
    }

    #[tokio::test]
    async fn release_skips_contended_slots() {
        let locks = MatchLocks::new();
        let id = MatchId::new("m");

        let held = locks.acquire(&id).await;
        locks.release(&id);
        assert_eq!(locks.len(), 1);

        drop(held);
        locks.release(&id);
        assert!(locks.is_empty());
    }
}
