//! # cdcfifo-link: Byte-Stream Boundary
//!
//! Wires a dual-clock buffer between a line receiver and a line transmitter.
//! Framing (start/stop bits, baud division) belongs to those collaborators;
//! this crate only sees one byte per `byte ready` pulse on the way in and a
//! `busy` signal on the way out.

pub mod error;
pub mod line;
pub mod port;
pub mod pump;
pub mod runtime;

pub use error::LinkError;
pub use line::{CaptureTransmitter, LineReceiver, LineTransmitter, ScriptedReceiver};
pub use port::{ConsumerPort, ProducerPort};
pub use pump::{ReceivePump, TransmitPump};
pub use runtime::{LinkHandle, LinkReport, LinkRuntime, LinkSignal};
