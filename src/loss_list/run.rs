use crate::seq_no::SeqNo;

/// Index of a slot in a [`RunArena`]
pub(super) type SlotId = usize;

/// A closed range of lost sequence numbers, linked to the run that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Run {
    pub start: SeqNo,
    pub end: SeqNo,
    pub next: Option<SlotId>,
}

impl Run {
    /// The number of sequence numbers in the run
    pub fn len(&self) -> usize {
        SeqNo::span(self.start, self.end) as usize
    }

    /// Whether `seq` is at most one past the end of the run, so that a range
    /// starting at `seq` overlaps or extends it.
    pub fn reaches(&self, seq: SeqNo) -> bool {
        !self.end.increment().precedes(seq)
    }
}

/// A fixed number of run slots, allocated once. Free slots are handed out
/// from a stack so nothing is allocated after construction.
#[derive(Debug, Clone)]
pub(super) struct RunArena {
    slots: Vec<Run>,
    free: Vec<SlotId>,
}

impl RunArena {
    pub fn new(capacity: usize) -> Self {
        let empty = Run {
            start: SeqNo::ZERO,
            end: SeqNo::ZERO,
            next: None,
        };
        Self {
            slots: vec![empty; capacity],
            // Reversed so slot 0 is handed out first
            free: (0..capacity).rev().collect(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn in_use(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Takes a free slot for `run`, or returns `None` if every slot is used.
    pub fn alloc(&mut self, run: Run) -> Option<SlotId> {
        let id = self.free.pop()?;
        self.slots[id] = run;
        Some(id)
    }

    /// Returns a slot to the free stack. The caller must already have
    /// unlinked it.
    pub fn release(&mut self, id: SlotId) {
        debug_assert!(id < self.slots.len());
        debug_assert!(!self.free.contains(&id));
        self.free.push(id);
    }

    /// Returns every slot to the free stack.
    pub fn reset(&mut self) {
        self.free.clear();
        self.free.extend((0..self.slots.len()).rev());
    }

    /// Panics if `id` lies outside the arena.
    pub fn run(&self, id: SlotId) -> &Run {
        &self.slots[id]
    }

    /// Panics if `id` lies outside the arena.
    pub fn run_mut(&mut self, id: SlotId) -> &mut Run {
        &mut self.slots[id]
    }
}
