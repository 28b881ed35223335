//! A loss list shared between the acknowledgment path and the retransmission
//! timer.

use crate::{seq_no::SeqNo, SndLossList};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A [`SndLossList`] behind a single lock. Clones refer to the same list.
///
/// Every operation takes the lock for its whole duration, so an insert, pop
/// or remove from one thread is never interleaved with another.
#[derive(Debug, Clone, Default)]
pub struct SharedLossList {
    list: Arc<Mutex<SndLossList>>,
}

impl SharedLossList {
    pub fn new(list: SndLossList) -> Self {
        Self {
            list: Arc::new(Mutex::new(list)),
        }
    }

    pub fn insert(&self, first: SeqNo, last: SeqNo) -> usize {
        self.lock().insert(first, last)
    }

    pub fn pop(&self) -> Option<SeqNo> {
        self.lock().pop()
    }

    pub fn remove(&self, upto: SeqNo) {
        self.lock().remove(upto)
    }

    pub fn loss_length(&self) -> usize {
        self.lock().loss_length()
    }

    /// Runs `f` with the lock held, for callers that need several operations
    /// to happen together.
    pub fn with<T>(&self, f: impl FnOnce(&mut SndLossList) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, SndLossList> {
        // No list operation panics part way, so a poisoned list is still whole
        self.list.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<SndLossList> for SharedLossList {
    fn from(list: SndLossList) -> Self {
        Self::new(list)
    }
}
