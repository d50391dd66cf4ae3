use core::fmt;

use crate::Word;

/// Which side of the buffer a parameter or controller belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// The producer domain.
    Write,
    /// The consumer domain.
    Read,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Write => f.write_str("write"),
            Side::Read => f.write_str("read"),
        }
    }
}

/// The validated shape of a dual-clock buffer.
///
/// All counts are in base cells. Construction assumes the parameters were
/// already validated by the configuration layer: `depth` and both
/// granularities are powers of two, `depth` is at least the larger
/// granularity, and the widest transfer fits in a [`Word`].
///
/// ## Pointer Layout
/// A position counter is `addr_bits + 1` wide. The extra top bit is the
/// guard: it flips on every wrap past the addressable range, which is what
/// separates "full" from "empty" when the address bits match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    depth: u32,
    addr_bits: u32,
    cell_width: u32,
    write_cells: u32,
    read_cells: u32,
}

impl Geometry {
    /// Largest supported depth, in cells. Keeps `depth << 1` inside a `u32`
    /// with room to spare for guard promotion.
    pub const MAX_DEPTH: u32 = 1 << 30;

    pub fn new(depth: u32, cell_width: u32, write_cells: u32, read_cells: u32) -> Self {
        debug_assert!(depth.is_power_of_two() && depth <= Self::MAX_DEPTH);
        debug_assert!(write_cells.is_power_of_two() && read_cells.is_power_of_two());
        debug_assert!(depth >= write_cells.max(read_cells));
        debug_assert!((1..=Word::BITS).contains(&cell_width));
        debug_assert!(write_cells.max(read_cells) * cell_width <= Word::BITS);

        Self {
            depth,
            addr_bits: depth.trailing_zeros(),
            cell_width,
            write_cells,
            read_cells,
        }
    }

    #[inline(always)]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline(always)]
    pub fn addr_bits(&self) -> u32 {
        self.addr_bits
    }

    #[inline(always)]
    pub fn cell_width(&self) -> u32 {
        self.cell_width
    }

    /// Cells moved by one transfer on the given side.
    #[inline(always)]
    pub fn granularity(&self, side: Side) -> u32 {
        match side {
            Side::Write => self.write_cells,
            Side::Read => self.read_cells,
        }
    }

    /// Bits moved by one transfer on the given side.
    #[inline(always)]
    pub fn transfer_width(&self, side: Side) -> u32 {
        self.granularity(side) * self.cell_width
    }

    /// Number of parallel sub-arrays. The wider side addresses a full row.
    #[inline(always)]
    pub fn lanes(&self) -> u32 {
        self.write_cells.max(self.read_cells)
    }

    /// Entries per sub-array.
    #[inline(always)]
    pub fn rows(&self) -> u32 {
        self.depth / self.lanes()
    }

    /// Mask covering the guard bit and the address bits.
    #[inline(always)]
    pub fn pointer_mask(&self) -> u32 {
        (self.depth << 1) - 1
    }

    #[inline(always)]
    pub fn address_mask(&self) -> u32 {
        self.depth - 1
    }

    /// Low pointer bits that never cross a domain boundary.
    ///
    /// Both sides only ever observe the other at whole-transfer boundaries of
    /// the coarser side, so the relayed code starts above those bits.
    #[inline(always)]
    pub fn relay_shift(&self) -> u32 {
        self.lanes().trailing_zeros()
    }

    /// Capacity in transfer units of the given side.
    #[inline(always)]
    pub fn capacity(&self, side: Side) -> u32 {
        self.depth / self.granularity(side)
    }

    /// Mask of `bits` low ones, tolerating a full-word width.
    #[inline(always)]
    pub fn width_mask(bits: u32) -> Word {
        if bits == 0 {
            0
        } else {
            Word::MAX >> (Word::BITS - bits)
        }
    }

    #[inline(always)]
    pub fn cell_mask(&self) -> Word {
        Self::width_mask(self.cell_width)
    }
}
