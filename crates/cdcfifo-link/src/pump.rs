use cdcfifo_core::{ReadOutcome, WriteOutcome};
use cdcfifo_dsa::{Geometry, Side, Word};

use crate::error::LinkError;
use crate::line::{LineReceiver, LineTransmitter};
use crate::port::{ConsumerPort, ProducerPort};

const BYTE: u32 = 8;

fn require_byte_wide(geometry: &Geometry, side: Side) -> Result<(), LinkError> {
    let width = geometry.transfer_width(side);
    if width != BYTE {
        return Err(LinkError::NotByteWide { side, width });
    }
    Ok(())
}

/// Producer-domain glue between a line receiver and a buffer.
///
/// `enable` is the byte-ready pulse gated by `!full`. A pulse that arrives
/// while full is an overrun: the byte is dropped and counted.
#[derive(Debug, Default)]
pub struct ReceivePump {
    accepted: u64,
    overruns: u64,
}

impl ReceivePump {
    pub fn new<P: ProducerPort>(port: &P) -> Result<Self, LinkError> {
        require_byte_wide(port.geometry(), Side::Write)?;
        Ok(Self::default())
    }

    /// One producer step.
    pub fn step<P: ProducerPort, R: LineReceiver>(&mut self, port: &mut P, receiver: &mut R) -> WriteOutcome {
        let status = port.write_status();
        match receiver.poll_byte() {
            Some(byte) if !status.full => {
                let outcome = port.write_step(true, byte as Word);
                self.accepted += 1;
                outcome
            }
            Some(byte) => {
                self.overruns += 1;
                tracing::warn!("ReceivePump: overrun, dropped {:#04x} (total {})", byte, self.overruns);
                port.write_step(false, 0)
            }
            None => port.write_step(false, 0),
        }
    }

    pub fn accepted(&self) -> u64 {
        self.accepted
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}

/// Consumer-domain glue between a buffer and a line transmitter.
///
/// `enable` is `!empty && !busy`. With look-ahead the drained byte is on
/// `data_out` during the committing step and is loaded right away. Without
/// it the byte shows up one step later; reads are held until it has been
/// handed over.
#[derive(Debug, Default)]
pub struct TransmitPump {
    pending: bool,
    sent: u64,
}

impl TransmitPump {
    pub fn new<C: ConsumerPort>(port: &C) -> Result<Self, LinkError> {
        require_byte_wide(port.geometry(), Side::Read)?;
        Ok(Self::default())
    }

    /// One consumer step.
    pub fn step<C: ConsumerPort, T: LineTransmitter>(&mut self, port: &mut C, transmitter: &mut T) -> ReadOutcome {
        let status = port.read_status();
        let enable = !status.empty && !transmitter.busy() && !self.pending;
        let outcome = port.read_step(enable);

        let load = if self.pending {
            self.pending = false;
            true
        } else if outcome.committed && port.look_ahead() {
            true
        } else {
            self.pending = outcome.committed;
            false
        };

        if load {
            transmitter.load(outcome.data_out as u8);
            self.sent += 1;
        } else {
            transmitter.tick();
        }
        outcome
    }

    pub fn sent(&self) -> u64 {
        self.sent
    }

    /// A byte has been drained but not yet handed to the transmitter.
    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
