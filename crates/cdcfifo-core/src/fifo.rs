//! # Stepped Dual-Clock FIFO
//!
//! A discrete-step model of the buffer. Each call to [`DualClockFifo::write_step`]
//! or [`DualClockFifo::read_step`] is one clock edge of that domain; the
//! caller decides how the two domains interleave, directly or through a
//! [`DualClock`].

use cdcfifo_dsa::{Geometry, Side, StorageArray, Word};

use crate::clock::DualClock;
use crate::config::FifoConfig;
use crate::error::ConfigError;
use crate::read_side::{ReadController, ReadOutcome, ReadStatus};
use crate::write_side::{WriteController, WriteOutcome, WriteStatus};

/// Drives both domains of a [`DualClockFifo`] during [`DualClockFifo::run`].
pub trait Stimulus {
    /// Returns the word to write this producer step, or `None` to idle.
    fn produce(&mut self, status: &WriteStatus) -> Option<Word>;

    /// Returns whether to request a read this consumer step.
    fn consume(&mut self, status: &ReadStatus) -> bool;

    fn on_write(&mut self, _outcome: &WriteOutcome) {}

    fn on_read(&mut self, _outcome: &ReadOutcome) {}
}

/// The shared storage plus one controller per domain.
///
/// Each controller is the only writer of its own counter and of the
/// synchronizer it receives through; the other controller is handed only
/// the published Gray snapshot.
pub struct DualClockFifo {
    storage: StorageArray,
    writer: WriteController,
    reader: ReadController,
}

impl DualClockFifo {
    pub fn new(config: &FifoConfig) -> Result<Self, ConfigError> {
        let geometry = config.validate()?;
        tracing::debug!(
            "DualClockFifo: depth {} cells, {}-bit writes, {}-bit reads, {} sync stages, look-ahead {}",
            geometry.depth(),
            geometry.transfer_width(Side::Write),
            geometry.transfer_width(Side::Read),
            config.sync_stages,
            config.look_ahead
        );

        Ok(Self {
            storage: StorageArray::new(geometry),
            writer: WriteController::new(geometry, config.sync_stages, config.almost_full_slack),
            reader: ReadController::new(geometry, config.sync_stages, config.look_ahead, config.almost_empty_slack),
        })
    }

    pub fn geometry(&self) -> &Geometry {
        self.storage.geometry()
    }

    pub fn writer(&self) -> &WriteController {
        &self.writer
    }

    pub fn reader(&self) -> &ReadController {
        &self.reader
    }

    pub fn write_status(&self) -> WriteStatus {
        self.writer.status()
    }

    pub fn read_status(&self) -> ReadStatus {
        self.reader.status()
    }

    /// One producer clock edge.
    pub fn write_step(&mut self, enable: bool, data: Word) -> WriteOutcome {
        let outcome = self.writer.clock(enable, data, &self.storage, self.reader.published());
        if outcome.committed {
            tracing::trace!("write commit {:#x} -> {:?}", data, self.writer.position());
        }
        outcome
    }

    /// One consumer clock edge.
    pub fn read_step(&mut self, enable: bool) -> ReadOutcome {
        let outcome = self.reader.clock(enable, &self.storage, self.writer.published());
        if outcome.committed {
            tracing::trace!("read commit -> {:?}", self.reader.position());
        }
        outcome
    }

    /// Resets the producer domain: its counter and the latches relaying the
    /// consumer counter into it.
    ///
    /// ## Contract
    /// The producer counter moves back to zero. Once that reaches the
    /// consumer, a consumer counter that had advanced past zero sits ahead
    /// of it, and the consumer's occupancy is no longer bounded by `depth`.
    /// The consumer domain must be reset too before it reads again; use
    /// [`reset`](Self::reset) when both domains go down together.
    pub fn reset_write_domain(&mut self) {
        tracing::info!("DualClockFifo: write domain reset");
        self.writer.reset();
    }

    /// Resets the consumer domain: its counter, output register and the
    /// latches relaying the producer counter into it.
    ///
    /// Storage is kept, so unread cells are replayed from address zero.
    /// That only stays within `depth` while the producer counter has not
    /// moved more than `depth` cells past zero; otherwise reset the producer
    /// as well.
    pub fn reset_read_domain(&mut self) {
        tracing::info!("DualClockFifo: read domain reset");
        self.reader.reset();
    }

    /// Resets both domains. Storage contents are left as they are, but both
    /// sides restart empty.
    pub fn reset(&mut self) {
        tracing::info!("DualClockFifo: full reset");
        self.writer.reset();
        self.reader.reset();
    }

    /// Runs `edges` clock edges in the order `clock` yields them.
    pub fn run<S: Stimulus>(&mut self, clock: &mut DualClock, edges: usize, stimulus: &mut S) {
        for (_, side) in clock.take(edges) {
            match side {
                Side::Write => {
                    let status = self.write_status();
                    let outcome = match stimulus.produce(&status) {
                        Some(word) => self.write_step(true, word),
                        None => self.write_step(false, 0),
                    };
                    stimulus.on_write(&outcome);
                }
                Side::Read => {
                    let status = self.read_status();
                    let enable = stimulus.consume(&status);
                    let outcome = self.read_step(enable);
                    stimulus.on_read(&outcome);
                }
            }
        }
    }
}
