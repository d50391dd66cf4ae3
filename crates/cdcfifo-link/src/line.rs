//! # cdcfifo-link: Line Collaborators
//!
//! The serial framing logic on either side of the buffer, reduced to the
//! signals the buffer actually exchanges with it.

use bytes::{BufMut, Bytes, BytesMut};

/// The upstream line receiver.
///
/// ## Contract
/// Polled exactly once per producer step. `Some(byte)` is the one-step
/// `byte ready` pulse for a successfully framed character; a byte not taken
/// on that step is gone.
pub trait LineReceiver: Send {
    fn poll_byte(&mut self) -> Option<u8>;
}

/// The downstream line transmitter.
///
/// ## Contract
/// Exactly one of [`load`](LineTransmitter::load) or
/// [`tick`](LineTransmitter::tick) is called per consumer step. `busy` is
/// sampled before either.
pub trait LineTransmitter: Send {
    fn busy(&self) -> bool;

    /// Data-load input. Starts shifting `byte` out.
    fn load(&mut self, byte: u8);

    /// A step with nothing to load.
    fn tick(&mut self);
}

/// Replays a fixed byte sequence, one byte every `gap + 1` steps.
pub struct ScriptedReceiver {
    bytes: Bytes,
    cursor: usize,
    gap: u32,
    countdown: u32,
}

impl ScriptedReceiver {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            cursor: 0,
            gap: 0,
            countdown: 0,
        }
    }

    /// Idle steps between consecutive byte-ready pulses.
    pub fn with_gap(mut self, idle_steps: u32) -> Self {
        self.gap = idle_steps;
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.bytes.len()
    }

    /// Bytes already pulsed out.
    pub fn emitted(&self) -> usize {
        self.cursor
    }
}

impl LineReceiver for ScriptedReceiver {
    fn poll_byte(&mut self) -> Option<u8> {
        if self.countdown > 0 {
            self.countdown -= 1;
            return None;
        }
        let byte = *self.bytes.get(self.cursor)?;
        self.cursor += 1;
        self.countdown = self.gap;
        Some(byte)
    }
}

/// Records every loaded byte and stays busy for a fixed number of steps
/// after each load.
pub struct CaptureTransmitter {
    sent: BytesMut,
    busy_steps: u32,
    remaining: u32,
}

impl CaptureTransmitter {
    pub fn new(busy_steps: u32) -> Self {
        Self {
            sent: BytesMut::new(),
            busy_steps,
            remaining: 0,
        }
    }

    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    pub fn into_bytes(self) -> Bytes {
        self.sent.freeze()
    }
}

impl LineTransmitter for CaptureTransmitter {
    fn busy(&self) -> bool {
        self.remaining > 0
    }

    fn load(&mut self, byte: u8) {
        self.sent.put_u8(byte);
        self.remaining = self.busy_steps;
    }

    fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
