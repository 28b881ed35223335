//! Sender-side loss tracking for a reliable transport over unordered
//! datagrams.
//!
//! Every data packet carries a 31-bit sequence number that wraps. When the
//! receiver reports packets missing, the sender records them in a
//! [`SndLossList`] until they are retransmitted or acknowledged.
//!
//! # Organization
//! - [`seq_no`] holds [`SeqNo`] and the circular comparisons used to order
//!   sequence numbers across wraparound
//! - [`SndLossList`] stores lost sequence numbers as runs and hands them back
//!   earliest first
//! - [`SharedLossList`] wraps a list for senders whose acknowledgment handling
//!   and retransmission timer run on different threads
//! - [`LossListConfig`] sizes a list
//!
//! # Usage
//!
//! ```
//! use sndloss::{SeqNo, SndLossList};
//!
//! let mut list = SndLossList::new(64).unwrap();
//! assert_eq!(list.insert(SeqNo::new(1), SeqNo::new(2)), 2);
//! assert_eq!(list.insert(SeqNo::new(4), SeqNo::new(4)), 1);
//! assert_eq!(list.insert(SeqNo::new(3), SeqNo::new(3)), 1);
//!
//! // Acknowledged through 1
//! list.remove(SeqNo::new(1));
//! assert_eq!(list.pop(), Some(SeqNo::new(2)));
//! assert_eq!(list.loss_length(), 2);
//! ```

pub mod logging;
pub mod seq_no;
pub use seq_no::SeqNo;

pub mod config;
pub use config::{ConfigError, LossListConfig};

pub mod loss_list;
pub use loss_list::SndLossList;

mod shared;
pub use shared::SharedLossList;
