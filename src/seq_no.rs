//! Sequence numbers and the circular arithmetic used to order them.
//!
//! Sequence numbers live in a 31-bit space that wraps at [`MODULUS`]. Two
//! numbers are ordered by the signed distance between them rather than by
//! magnitude, which is only meaningful while they are less than
//! [`HALF_RANGE`] apart.

use std::fmt;

/// The number of distinct sequence numbers
pub const MODULUS: u32 = 1 << 31;

/// The largest forward distance two comparable sequence numbers may have
pub const HALF_RANGE: u32 = MODULUS / 2;

/// A sequence number in `[0, MODULUS)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SeqNo(u32);

impl SeqNo {
    pub const MAX: SeqNo = SeqNo(MODULUS - 1);
    pub const ZERO: SeqNo = SeqNo(0);

    /// Creates a sequence number, discarding bits above the 31-bit space.
    pub const fn new(value: u32) -> Self {
        Self(value & Self::MAX.0)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// `self + 1`, wrapping to zero after [`SeqNo::MAX`]
    pub const fn increment(self) -> Self {
        self.add(1)
    }

    /// `self - 1`, wrapping to [`SeqNo::MAX`] before zero
    pub const fn decrement(self) -> Self {
        self.sub(1)
    }

    pub const fn add(self, n: u32) -> Self {
        Self::new(self.0.wrapping_add(n))
    }

    pub const fn sub(self, n: u32) -> Self {
        Self::new(self.0.wrapping_sub(n))
    }

    /// The signed distance travelled going forward from `self` to `other`,
    /// normalized to `(-HALF_RANGE, HALF_RANGE]`.
    pub const fn offset(self, other: SeqNo) -> i32 {
        let forward = other.0.wrapping_sub(self.0) & Self::MAX.0;
        if forward > HALF_RANGE {
            (forward as i64 - MODULUS as i64) as i32
        } else {
            forward as i32
        }
    }

    /// Whether `self` comes strictly before `other`
    pub const fn precedes(self, other: SeqNo) -> bool {
        self.offset(other) > 0
    }

    /// The number of sequence numbers in `first..=last`. Zero when `last`
    /// comes before `first`.
    pub const fn span(first: SeqNo, last: SeqNo) -> u32 {
        let offset = first.offset(last);
        if offset < 0 {
            0
        } else {
            offset as u32 + 1
        }
    }
}

impl From<u32> for SeqNo {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<SeqNo> for u32 {
    fn from(seq: SeqNo) -> Self {
        seq.0
    }
}

impl fmt::Display for SeqNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// a < b under modular arithmetic
pub fn mod_le(a: SeqNo, b: SeqNo) -> bool {
    a.precedes(b)
}

/// a <= b under modular arithmetic
pub fn mod_leq(a: SeqNo, b: SeqNo) -> bool {
    a.offset(b) >= 0
}

/// a > b under modular arithmetic
pub fn mod_ge(a: SeqNo, b: SeqNo) -> bool {
    mod_le(b, a)
}

/// a >= b under modular arithmetic
pub fn mod_geq(a: SeqNo, b: SeqNo) -> bool {
    mod_leq(b, a)
}

/// Is `b` between `a` and `c` when accounting for modular arithmetic?
pub fn mod_bounded(a: SeqNo, ab_cmp: ModCmp, b: SeqNo, bc_cmp: ModCmp, c: SeqNo) -> bool {
    ab_cmp.holds(a, b) && bc_cmp.holds(b, c)
}

pub use ModCmp::*;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModCmp {
    Le,
    Leq,
}

impl ModCmp {
    pub fn holds(self, a: SeqNo, b: SeqNo) -> bool {
        match self {
            Le => mod_le(a, b),
            Leq => mod_leq(a, b),
        }
    }
}
