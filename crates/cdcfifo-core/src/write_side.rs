use cdcfifo_dsa::{Geometry, GrayCode, Position, Side, StorageArray, Word};

use crate::sync::PointerSync;

/// Flags the producer sees before deciding whether to write.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteStatus {
    pub full: bool,
    pub almost_full: bool,
    /// Occupancy in producer transfer units.
    pub count: u32,
}

/// Result of one producer step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteOutcome {
    pub committed: bool,
    pub full: bool,
    pub almost_full: bool,
    pub count: u32,
}

/// Producer-side controller.
///
/// Holds the write position counter, the Gray snapshot it publishes, and
/// the synchronizer that relays the consumer's counter into this domain.
/// Everything else is derived on demand from those.
#[derive(Clone, Debug)]
pub struct WriteController {
    geometry: Geometry,
    position: Position,
    published: GrayCode,
    read_sync: PointerSync,
    almost_full_slack: u32,
}

impl WriteController {
    pub fn new(geometry: Geometry, sync_stages: usize, almost_full_slack: u32) -> Self {
        Self {
            geometry,
            position: Position::ZERO,
            published: GrayCode::ZERO,
            read_sync: PointerSync::new(geometry, sync_stages),
            almost_full_slack,
        }
    }

    #[inline(always)]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The snapshot the consumer domain samples.
    #[inline(always)]
    pub fn published(&self) -> GrayCode {
        self.published
    }

    /// This domain's current view of the consumer counter.
    #[inline(always)]
    pub fn relayed_read(&self) -> Position {
        self.read_sync.relayed()
    }

    pub fn status(&self) -> WriteStatus {
        let relayed = self.read_sync.relayed();
        let count = occupancy(self.position, relayed, &self.geometry);
        let free = self.geometry.capacity(Side::Write).saturating_sub(count);
        WriteStatus {
            full: is_full(self.position, relayed, &self.geometry),
            almost_full: free <= self.almost_full_slack,
            count,
        }
    }

    /// One producer clock edge.
    ///
    /// Flags are evaluated against the state before the edge. A write while
    /// full is dropped without side effects; the caller retries on a later
    /// step.
    pub fn clock(&mut self, enable: bool, data: Word, storage: &StorageArray, remote: GrayCode) -> WriteOutcome {
        let status = self.status();
        let committed = enable && !status.full;

        storage.write(self.position.address(&self.geometry), data, committed);
        if committed {
            self.position = self.position.advance(self.geometry.granularity(Side::Write), &self.geometry);
            self.published = PointerSync::encode(self.position, &self.geometry);
        }
        self.read_sync.sample(remote);

        WriteOutcome {
            committed,
            full: status.full,
            almost_full: status.almost_full,
            count: status.count,
        }
    }

    /// Producer-domain reset. Storage is left untouched.
    pub fn reset(&mut self) {
        self.position = Position::ZERO;
        self.published = GrayCode::ZERO;
        self.read_sync.reset();
    }
}

/// Full when both pointers address the same cell but sit on different laps.
#[inline(always)]
pub fn is_full(local: Position, relayed_read: Position, geometry: &Geometry) -> bool {
    local.address(geometry) == relayed_read.address(geometry) && local.guard(geometry) != relayed_read.guard(geometry)
}

/// Cells held, shifted down into producer units.
#[inline(always)]
pub fn occupancy(local: Position, relayed_read: Position, geometry: &Geometry) -> u32 {
    local.cells_ahead_of(relayed_read, geometry) >> geometry.granularity(Side::Write).trailing_zeros()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_needs_matching_address_and_opposite_guard() {
        let g = Geometry::new(4, 8, 1, 1);
        assert!(!is_full(Position::ZERO, Position::ZERO, &g));
        assert!(is_full(Position::from_raw(4, &g), Position::ZERO, &g));
        assert!(is_full(Position::from_raw(1, &g), Position::from_raw(5, &g), &g));
        assert!(!is_full(Position::from_raw(3, &g), Position::ZERO, &g));
    }

    #[test]
    fn test_occupancy_in_producer_units() {
        let g = Geometry::new(8, 8, 2, 1);
        assert_eq!(occupancy(Position::from_raw(6, &g), Position::from_raw(2, &g), &g), 2);
        assert_eq!(occupancy(Position::from_raw(10, &g), Position::from_raw(2, &g), &g), 4);
    }
}
