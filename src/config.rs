//! Sizing for the sender loss list.

use crate::seq_no::HALF_RANGE;

/// Flow window, in packets, assumed when no window is negotiated
pub const DEFAULT_FLOW_WINDOW: usize = 8192;

/// Settings fixed when a [`SndLossList`](crate::SndLossList) is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LossListConfig {
    capacity: usize,
}

impl LossListConfig {
    /// Creates a configuration allowing at most `capacity` separate runs of
    /// lost sequence numbers.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            Err(ConfigError::ZeroCapacity)
        } else if capacity > HALF_RANGE as usize {
            Err(ConfigError::CapacityTooLarge(capacity))
        } else {
            Ok(Self { capacity })
        }
    }

    /// Sizes the list for a sender whose flow window is `window` packets.
    /// Every other packet in flight may be reported lost on its own, so the
    /// list gets two slots per packet.
    pub fn from_flow_window(window: usize) -> Result<Self, ConfigError> {
        Self::new(window.saturating_mul(2))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for LossListConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_FLOW_WINDOW * 2,
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("A loss list needs room for at least one run")]
    ZeroCapacity,
    #[error("Capacity {0} exceeds the comparable range of sequence numbers")]
    CapacityTooLarge(usize),
}
