//! # cdc-fifo
//!
//! A bounded buffer between two independently clocked domains. Position
//! counters cross the boundary only as Gray snapshots through multi-stage
//! latches, so each side works from a conservative, never torn, view of the
//! other.
//!
//! - [`dsa`]: storage array, width adapter, Gray codec, pointer arithmetic.
//! - [`DualClockFifo`]: discrete-step model, one call per clock edge.
//! - [`bridge`]: the same controllers split across two threads.
//! - [`link`]: byte-stream wiring to line receivers and transmitters.

pub use cdcfifo_core::{
    bridge, ConfigError, Consumer, DualClock, DualClockFifo, FifoBuilder, FifoConfig, FifoError, Producer,
    ReadOutcome, ReadStatus, Stimulus, WriteOutcome, WriteStatus,
};
pub use cdcfifo_dsa as dsa;
pub use cdcfifo_link as link;
