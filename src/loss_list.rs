//! The sender's record of sequence numbers reported lost.
//!
//! Lost sequence numbers are kept as runs of consecutive numbers so that a
//! report covering thousands of packets costs a single slot. Runs are kept in
//! circular sequence order, starting from the earliest outstanding loss, so
//! the next packet to retransmit is always at the head.
//!
//! ```text
//!   head
//!    |
//!  [1, 2] -> [4, 8] -> [10, 12]        loss_length() == 10
//!
//!  insert(3, 3)   [1, 8] -> [10, 12]   bridges two runs, frees a slot
//!  pop()          [2, 8] -> [10, 12]   returns 1
//!  remove(9)      [10, 12]             acknowledged through 9
//! ```

use self::run::{Run, RunArena, SlotId};
use crate::{
    config::{ConfigError, LossListConfig},
    logging,
    seq_no::{mod_leq, SeqNo},
};
use std::fmt;

mod run;


/// A capacity-bounded set of lost sequence numbers, yielded in the order they
/// were sent.
///
/// The list never allocates after construction. When every run slot is taken,
/// reports that would need a new run are dropped until [`pop`](Self::pop) or
/// [`remove`](Self::remove) frees one.
#[derive(Debug, Clone)]
pub struct SndLossList {
    arena: RunArena,
    /// The run holding the earliest outstanding loss
    head: Option<SlotId>,
    /// Total sequence numbers across all runs
    length: usize,
}

impl SndLossList {
    /// Creates an empty list with room for `capacity` separate runs.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        LossListConfig::new(capacity).map(Self::with_config)
    }

    pub fn with_config(config: LossListConfig) -> Self {
        Self {
            arena: RunArena::new(config.capacity()),
            head: None,
            length: 0,
        }
    }

    /// Records `first..=last` as lost and returns how many of those sequence
    /// numbers were not already recorded.
    ///
    /// A range that overlaps or borders existing runs is merged into them. A
    /// range that touches nothing takes a new slot; if none is free the report
    /// is dropped and 0 is returned. A range whose `last` comes before `first`
    /// is ignored.
    pub fn insert(&mut self, first: SeqNo, last: SeqNo) -> usize {
        if last.precedes(first) {
            logging::inverted_event(first, last);
            return 0;
        }

        let before = self.length;

        // Skip every run that ends more than one before `first`
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let run = self.arena.run(id);
            if run.reaches(first) {
                break;
            }
            prev = cursor;
            cursor = run.next;
        }

        match cursor.filter(|&id| !last.increment().precedes(self.arena.run(id).start)) {
            Some(id) => self.merge_into(id, first, last),
            None => {
                let run = Run {
                    start: first,
                    end: last,
                    next: cursor,
                };
                let Some(id) = self.arena.alloc(run) else {
                    logging::rejected_event(first, last, self.capacity());
                    return 0;
                };
                match prev {
                    Some(prev) => self.arena.run_mut(prev).next = Some(id),
                    None => self.head = Some(id),
                }
                self.length += run.len();
            }
        }

        let added = self.length - before;
        logging::insert_event(first, last, added, self.length);
        added
    }

    /// Widens the run at `id` to cover `first..=last`, then absorbs any later
    /// runs the widened run now reaches.
    fn merge_into(&mut self, id: SlotId, first: SeqNo, last: SeqNo) {
        let mut merged = *self.arena.run(id);
        self.length -= merged.len();

        if first.precedes(merged.start) {
            merged.start = first;
        }
        if merged.end.precedes(last) {
            merged.end = last;
        }

        while let Some(next_id) = merged.next {
            let next = *self.arena.run(next_id);
            if !merged.reaches(next.start) {
                break;
            }
            if merged.end.precedes(next.end) {
                merged.end = next.end;
            }
            self.length -= next.len();
            merged.next = next.next;
            self.arena.release(next_id);
        }

        self.length += merged.len();
        *self.arena.run_mut(id) = merged;
    }

    /// Removes and returns the earliest lost sequence number, or `None` if
    /// nothing is outstanding.
    pub fn pop(&mut self) -> Option<SeqNo> {
        let id = self.head?;
        let run = *self.arena.run(id);

        if run.start == run.end {
            self.head = run.next;
            self.arena.release(id);
        } else {
            self.arena.run_mut(id).start = run.start.increment();
        }
        self.length -= 1;

        logging::pop_event(run.start, self.length);
        Some(run.start)
    }

    /// Forgets every loss at or before `upto`. A run that straddles `upto`
    /// keeps only the part after it.
    pub fn remove(&mut self, upto: SeqNo) {
        let before = self.length;

        while let Some(id) = self.head {
            let run = *self.arena.run(id);
            if mod_leq(run.end, upto) {
                self.head = run.next;
                self.length -= run.len();
                self.arena.release(id);
                continue;
            }

            if mod_leq(run.start, upto) {
                self.arena.run_mut(id).start = upto.increment();
                self.length -= SeqNo::span(run.start, upto) as usize;
            }
            break;
        }

        logging::remove_event(upto, before - self.length, self.length);
    }

    /// The number of lost sequence numbers recorded, counting every member of
    /// every run.
    pub fn loss_length(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// The number of runs currently stored
    pub fn runs(&self) -> usize {
        self.arena.in_use()
    }

    /// The maximum number of runs
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Whether a report touching no existing run would be dropped
    pub fn is_full(&self) -> bool {
        self.arena.is_full()
    }

    /// Drops every recorded loss.
    pub fn clear(&mut self) {
        self.arena.reset();
        self.head = None;
        self.length = 0;
    }

    /// Iterates over the runs as inclusive `(start, end)` pairs, earliest
    /// first.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            arena: &self.arena,
            cursor: self.head,
        }
    }

    /// Logs the current run layout at DEBUG.
    pub fn trace_state(&self) {
        logging::state_event(self.runs(), self.length, &self.to_string());
    }
}

impl Default for SndLossList {
    fn default() -> Self {
        Self::with_config(LossListConfig::default())
    }
}

impl fmt::Display for SndLossList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (start, end)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "[{}, {}]", start, end)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a SndLossList {
    type Item = (SeqNo, SeqNo);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the runs of a [`SndLossList`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    arena: &'a RunArena,
    cursor: Option<SlotId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (SeqNo, SeqNo);

    fn next(&mut self) -> Option<Self::Item> {
        let run = self.arena.run(self.cursor?);
        self.cursor = run.next;
        Some((run.start, run.end))
    }
}
