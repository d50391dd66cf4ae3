use cdcfifo_dsa::{Geometry, GrayCode, Position, Side, StorageArray, Word};

use crate::sync::PointerSync;

/// Flags the consumer sees before deciding whether to read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadStatus {
    pub empty: bool,
    pub almost_empty: bool,
    /// Occupancy in consumer transfer units.
    pub count: u32,
}

/// Result of one consumer step.
///
/// `data_out` is the output register as it stood during the step. With
/// look-ahead it already holds the word being read on a committing step;
/// without it the word read appears on the following step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReadOutcome {
    pub committed: bool,
    pub data_out: Word,
    pub empty: bool,
    pub almost_empty: bool,
    pub count: u32,
}

/// Consumer-side controller. Mirror image of the producer controller plus
/// the registered read port.
#[derive(Clone, Debug)]
pub struct ReadController {
    geometry: Geometry,
    position: Position,
    published: GrayCode,
    write_sync: PointerSync,
    look_ahead: bool,
    data_out: Word,
    almost_empty_slack: u32,
}

impl ReadController {
    pub fn new(geometry: Geometry, sync_stages: usize, look_ahead: bool, almost_empty_slack: u32) -> Self {
        Self {
            geometry,
            position: Position::ZERO,
            published: GrayCode::ZERO,
            write_sync: PointerSync::new(geometry, sync_stages),
            look_ahead,
            data_out: 0,
            almost_empty_slack,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> Position {
        self.position
    }

    #[inline(always)]
    pub fn published(&self) -> GrayCode {
        self.published
    }

    #[inline(always)]
    pub fn relayed_write(&self) -> Position {
        self.write_sync.relayed()
    }

    /// Current contents of the output register.
    #[inline(always)]
    pub fn data_out(&self) -> Word {
        self.data_out
    }

    pub fn look_ahead(&self) -> bool {
        self.look_ahead
    }

    pub fn status(&self) -> ReadStatus {
        let relayed = self.write_sync.relayed();
        let count = occupancy(self.position, relayed, &self.geometry);
        ReadStatus {
            empty: is_empty(self.position, relayed, &self.geometry),
            almost_empty: count <= self.almost_empty_slack,
            count,
        }
    }

    /// One consumer clock edge.
    ///
    /// With look-ahead the read port is always enabled and is presented the
    /// address the counter will hold after this edge, so the register always
    /// carries the word at the head. Without it the port is enabled only by
    /// a committed read and sees the un-advanced address.
    pub fn clock(&mut self, enable: bool, storage: &StorageArray, remote: GrayCode) -> ReadOutcome {
        let status = self.status();
        let committed = enable && !status.empty;
        let data_out = self.data_out;

        let next = self.position.advance(self.geometry.granularity(Side::Read), &self.geometry);
        if self.look_ahead {
            let presented = if committed { next } else { self.position };
            self.data_out = storage.read(presented.address(&self.geometry));
        } else if committed {
            self.data_out = storage.read(self.position.address(&self.geometry));
        }

        if committed {
            self.position = next;
            self.published = PointerSync::encode(self.position, &self.geometry);
        }
        self.write_sync.sample(remote);

        ReadOutcome {
            committed,
            data_out,
            empty: status.empty,
            almost_empty: status.almost_empty,
            count: status.count,
        }
    }

    /// Consumer-domain reset. Clears the output register as well.
    pub fn reset(&mut self) {
        self.position = Position::ZERO;
        self.published = GrayCode::ZERO;
        self.write_sync.reset();
        self.data_out = 0;
    }
}

/// Empty when guard and address agree down to the consumer's transfer size.
///
/// The comparison ignores the bits below one consumer transfer, a wider
/// test than the exact match `full` uses.
#[inline(always)]
pub fn is_empty(local: Position, relayed_write: Position, geometry: &Geometry) -> bool {
    let coarse = geometry.granularity(Side::Read).trailing_zeros();
    local.truncate(coarse) == relayed_write.truncate(coarse)
}

/// Cells available, shifted down into consumer units.
#[inline(always)]
pub fn occupancy(local: Position, relayed_write: Position, geometry: &Geometry) -> u32 {
    relayed_write.cells_ahead_of(local, geometry) >> geometry.granularity(Side::Read).trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ignores_partial_consumer_transfer() {
        // 8-bit writes, 16-bit reads: one written cell is not yet a transfer.
        let g = Geometry::new(8, 8, 1, 2);
        assert!(is_empty(Position::ZERO, Position::from_raw(1, &g), &g));
        assert!(!is_empty(Position::ZERO, Position::from_raw(2, &g), &g));
        assert_eq!(occupancy(Position::ZERO, Position::from_raw(3, &g), &g), 1);
    }

    #[test]
    fn test_full_and_empty_are_exclusive() {
        let g = Geometry::new(4, 8, 1, 1);
        for w in 0..8 {
            for r in 0..8 {
                let (w, r) = (Position::from_raw(w, &g), Position::from_raw(r, &g));
                if w.cells_ahead_of(r, &g) > g.depth() {
                    continue;
                }
                assert!(!(crate::write_side::is_full(w, r, &g) && is_empty(r, w, &g)));
            }
        }
    }
}
