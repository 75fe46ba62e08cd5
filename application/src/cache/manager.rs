//! Answer cache manager

use crate::ports::cache_store::{CacheDocument, CacheStore};
use quiz_domain::{Fingerprint, ProviderAnswer, ProviderSlot};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Default number of cached answers per provider slot
pub const DEFAULT_CAPACITY: usize = 10_000;

/// How long shutdown waits for in-flight background saves
const SHUTDOWN_GRACE: Duration = Duration::from_secs(2);

/// Poll interval while waiting for in-flight saves
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// Cache occupancy counts for the administrative surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub first: usize,
    pub second: usize,
    pub third: usize,
    pub total: usize,
    pub capacity: usize,
}

/// Background-save bookkeeping for one slot
#[derive(Debug, Default, Clone, Copy)]
struct SaveState {
    /// A save task is active for this slot
    saving: bool,
    /// The slot changed while its save task was active
    dirty: bool,
}

/// Bounded, durable per-slot answer cache
///
/// Owned behind an `Arc`; `put` spawns background save tasks that hold
/// a clone of the handle. All in-memory state lives under sync mutexes
/// that are never held across an await point.
pub struct AnswerCache {
    /// One insertion-ordered map per slot, indexed by slot priority
    slots: Mutex<[CacheDocument; 3]>,
    /// Per-slot save bookkeeping, indexed by slot priority
    save_states: Mutex<[SaveState; 3]>,
    /// Save tasks spawned and not yet finished writing
    in_flight: Arc<AtomicUsize>,
    store: Arc<dyn CacheStore>,
    capacity: usize,
    shut_down: AtomicBool,
}

impl AnswerCache {
    /// Load all slot documents from the store
    ///
    /// A missing or corrupt document yields an empty cache for that
    /// slot; startup never fails on cache state.
    pub async fn load(store: Arc<dyn CacheStore>, capacity: usize) -> Arc<Self> {
        let mut maps: [CacheDocument; 3] = Default::default();

        for slot in ProviderSlot::ALL {
            match store.load(slot).await {
                Ok(mut entries) => {
                    // A capacity change between runs can leave an
                    // oversized document; drop the oldest entries
                    while entries.len() > capacity {
                        entries.shift_remove_index(0);
                    }
                    debug!("Loaded {} cached answers for slot {}", entries.len(), slot);
                    maps[slot.priority()] = entries;
                }
                Err(e) => {
                    warn!(
                        "Could not load cache document for slot {}: {} — starting empty",
                        slot, e
                    );
                }
            }
        }

        let total: usize = maps.iter().map(|m| m.len()).sum();
        info!("Answer cache loaded with {} total entries", total);

        Arc::new(Self {
            slots: Mutex::new(maps),
            save_states: Mutex::new([SaveState::default(); 3]),
            in_flight: Arc::new(AtomicUsize::new(0)),
            store,
            capacity,
            shut_down: AtomicBool::new(false),
        })
    }

    /// Look up a cached answer. Reads do not refresh eviction order.
    pub fn get(&self, slot: ProviderSlot, fingerprint: &Fingerprint) -> Option<ProviderAnswer> {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots[slot.priority()].get(fingerprint.as_str()).cloned()
    }

    /// Insert an answer, evicting the oldest entry at capacity, then
    /// schedule a background save for the slot.
    ///
    /// Error-flagged answers are silently dropped: they must never
    /// reach the durable documents.
    pub fn put(self: &Arc<Self>, slot: ProviderSlot, fingerprint: Fingerprint, answer: ProviderAnswer) {
        if answer.error {
            debug!("Refusing to cache error-flagged answer for slot {}", slot);
            return;
        }

        {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            let map = &mut slots[slot.priority()];
            if map.len() >= self.capacity && !map.contains_key(fingerprint.as_str()) {
                // Strict FIFO: the oldest-inserted entry goes,
                // regardless of how recently it was read
                map.shift_remove_index(0);
            }
            map.insert(fingerprint.into_string(), answer);
        }

        self.schedule_save(slot);
    }

    /// Schedule an asynchronous save for a slot, unless one is already
    /// in flight.
    ///
    /// The `saving` flag stays set for the whole write, so a slot never
    /// has two concurrent writers and a stale snapshot can never land
    /// after a newer one. An insert racing an active save marks the
    /// slot dirty instead; the save task re-runs with a fresh snapshot
    /// after its write, so no insert is lost.
    fn schedule_save(self: &Arc<Self>, slot: ProviderSlot) {
        if self.shut_down.load(Ordering::SeqCst) {
            debug!("Cache shut down; skipping background save for slot {}", slot);
            return;
        }

        {
            let mut states = self.save_states.lock().unwrap_or_else(|e| e.into_inner());
            let state = &mut states[slot.priority()];
            if state.saving {
                debug!("Save already in flight for slot {}, marking dirty", slot);
                state.dirty = true;
                return;
            }
            state.saving = true;
        }

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let cache = Arc::clone(self);

        tokio::spawn(async move {
            loop {
                {
                    let mut states =
                        cache.save_states.lock().unwrap_or_else(|e| e.into_inner());
                    states[slot.priority()].dirty = false;
                }

                // Snapshot at execution time: inserts before this point
                // are included, later ones re-mark the slot dirty
                let snapshot = cache.snapshot(slot);
                if let Err(e) = cache.store.save(slot, &snapshot).await {
                    warn!("Background save failed for slot {}: {}", slot, e);
                } else {
                    debug!(
                        "Background save completed for slot {} ({} entries)",
                        slot,
                        snapshot.len()
                    );
                }

                let mut states = cache.save_states.lock().unwrap_or_else(|e| e.into_inner());
                let state = &mut states[slot.priority()];
                if state.dirty {
                    continue;
                }
                state.saving = false;
                break;
            }
            cache.in_flight.fetch_sub(1, Ordering::SeqCst);
        });
    }

    fn snapshot(&self, slot: ProviderSlot) -> CacheDocument {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots[slot.priority()].clone()
    }

    /// Per-slot and total occupancy
    pub fn stats(&self) -> CacheStats {
        let slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        let first = slots[0].len();
        let second = slots[1].len();
        let third = slots[2].len();
        CacheStats {
            first,
            second,
            third,
            total: first + second + third,
            capacity: self.capacity,
        }
    }

    /// Synchronous full save of every slot
    pub async fn flush(&self) {
        for slot in ProviderSlot::ALL {
            let snapshot = self.snapshot(slot);
            if let Err(e) = self.store.save(slot, &snapshot).await {
                warn!("Flush failed for slot {}: {}", slot, e);
            }
        }
        debug!("Cache flush complete");
    }

    /// Empty all in-memory maps and delete all durable documents.
    /// An explicit operator reset — irreversible.
    pub async fn clear(&self) {
        {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            for map in slots.iter_mut() {
                map.clear();
            }
        }
        for slot in ProviderSlot::ALL {
            if let Err(e) = self.store.delete(slot).await {
                warn!("Could not delete cache document for slot {}: {}", slot, e);
            }
        }
        warn!("All answer caches cleared and cache documents removed");
    }

    /// Graceful shutdown: wait briefly for in-flight background saves,
    /// then perform one unconditional synchronous save of everything.
    ///
    /// Idempotent — a second call returns immediately.
    pub async fn shutdown(&self) {
        if self.shut_down.swap(true, Ordering::SeqCst) {
            debug!("Cache shutdown already performed");
            return;
        }

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        loop {
            let remaining = self.in_flight.load(Ordering::SeqCst);
            if remaining == 0 {
                break;
            }
            if Instant::now() >= deadline {
                warn!(
                    "Timeout waiting for {} in-flight cache save(s); flushing anyway",
                    remaining
                );
                break;
            }
            tokio::time::sleep(SHUTDOWN_POLL).await;
        }

        self.flush().await;
        info!("Answer cache shutdown complete");
    }

    #[cfg(test)]
    pub(crate) fn in_flight_saves(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}
