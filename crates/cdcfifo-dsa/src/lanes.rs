use alloc::vec::Vec;

use crate::geometry::{Geometry, Side};
use crate::Word;

/// Where one transfer lands inside a storage row.
///
/// A row is the concatenation of every lane at one sub-array index, lane 0
/// in the most significant position. A slot is the run of lanes a single
/// transfer covers plus the shift that brings it down to bit 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneSlot {
    pub first_lane: u32,
    pub lanes: u32,
    pub shift: u32,
    pub mask: Word,
}

/// Selector table for one side, indexed by the low address bits that the
/// sub-array row index does not consume.
///
/// The table has `lanes / granularity` entries. When a side moves a full row
/// per transfer it collapses to a single entry with zero shift.
#[derive(Clone, Debug)]
pub struct LaneTable {
    slots: Vec<LaneSlot>,
    slot_shift: u32,
    slot_mask: u32,
}

impl LaneTable {
    pub fn new(geometry: &Geometry, side: Side) -> Self {
        let lanes = geometry.lanes();
        let granularity = geometry.granularity(side);
        let cell_width = geometry.cell_width();
        let count = lanes / granularity;

        let mut slots = Vec::with_capacity(count as usize);
        for slot in 0..count {
            let first_lane = slot * granularity;
            // Lanes after this slot sit below it in the row.
            let trailing = lanes - first_lane - granularity;
            slots.push(LaneSlot {
                first_lane,
                lanes: granularity,
                shift: trailing * cell_width,
                mask: Geometry::width_mask(granularity * cell_width),
            });
        }

        Self {
            slots,
            slot_shift: granularity.trailing_zeros(),
            slot_mask: count - 1,
        }
    }

    /// Looks up the slot for a cell address.
    #[inline(always)]
    pub fn select(&self, addr: u32) -> LaneSlot {
        self.slots[((addr >> self.slot_shift) & self.slot_mask) as usize]
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
