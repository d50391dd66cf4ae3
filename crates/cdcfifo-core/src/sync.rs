//! # Cross-Domain Pointer Synchronizer
//!
//! Moves a position counter from the domain that owns it into the domain
//! that needs it. The owner publishes a Gray snapshot; the receiver shifts
//! that snapshot through its own chain of latches, one stage per receiving
//! step, and only ever reads the last stage.
//!
//! ## Staleness Bound
//! A published value becomes usable exactly `stages` receiving steps after
//! it is first sampled. Until then the receiver keeps working with an older
//! snapshot, which can only make `full` and `empty` more pessimistic.

use cdcfifo_dsa::{Geometry, GrayCode, Position};

/// The receiving half of one synchronizer instance.
///
/// Owned and mutated exclusively by the receiving domain.
#[derive(Clone, Debug)]
pub struct PointerSync {
    stages: Box<[GrayCode]>,
    geometry: Geometry,
}

impl PointerSync {
    pub fn new(geometry: Geometry, stages: usize) -> Self {
        assert!(stages >= 2, "a synchronizer needs at least two stages");
        Self {
            stages: vec![GrayCode::ZERO; stages].into_boxed_slice(),
            geometry,
        }
    }

    /// The Gray snapshot a domain publishes for its own counter.
    ///
    /// Bits below [`Geometry::relay_shift`] are dropped first, so the encoded
    /// value steps by at most one per transfer and rounds the counter down
    /// to the coarser side's boundary.
    #[inline(always)]
    pub fn encode(position: Position, geometry: &Geometry) -> GrayCode {
        GrayCode::encode(position.raw() >> geometry.relay_shift())
    }

    /// One receiving-domain clock edge: every stage takes its predecessor's
    /// value and the first stage samples the foreign snapshot.
    pub fn sample(&mut self, foreign: GrayCode) {
        self.stages.copy_within(..self.stages.len() - 1, 1);
        self.stages[0] = foreign;
    }

    /// The settled snapshot, still Gray-coded.
    #[inline(always)]
    pub fn stable(&self) -> GrayCode {
        self.stages[self.stages.len() - 1]
    }

    /// The settled snapshot decoded and re-scaled into a cell position.
    #[inline(always)]
    pub fn relayed(&self) -> Position {
        let bin = self.stable().decode() << self.geometry.relay_shift();
        Position::from_raw(bin, &self.geometry)
    }

    /// Clears every stage. Driven by the receiving domain's reset only.
    pub fn reset(&mut self) {
        self.stages.fill(GrayCode::ZERO);
    }

    pub fn stages(&self) -> usize {
        self.stages.len()
    }
}
