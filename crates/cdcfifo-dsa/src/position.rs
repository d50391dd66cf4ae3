use crate::geometry::Geometry;

/// A position counter in base cells, guard bit included.
///
/// Only ever advances, wrapping modulo `2 * depth`. Each side owns exactly
/// one and is its sole writer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Position(u32);

static_assertions::assert_eq_size!(Position, u32);

impl Position {
    pub const ZERO: Self = Self(0);

    #[inline(always)]
    pub fn from_raw(raw: u32, geometry: &Geometry) -> Self {
        Self(raw & geometry.pointer_mask())
    }

    #[inline(always)]
    pub fn raw(self) -> u32 {
        self.0
    }

    /// Cell address inside the storage array.
    #[inline(always)]
    pub fn address(self, geometry: &Geometry) -> u32 {
        self.0 & geometry.address_mask()
    }

    #[inline(always)]
    pub fn guard(self, geometry: &Geometry) -> bool {
        self.0 & geometry.depth() != 0
    }

    #[inline(always)]
    pub fn advance(self, cells: u32, geometry: &Geometry) -> Self {
        Self(self.0.wrapping_add(cells) & geometry.pointer_mask())
    }

    /// Clears the low `bits`, rounding down to a coarser transfer boundary.
    #[inline(always)]
    pub fn truncate(self, bits: u32) -> Self {
        Self((self.0 >> bits) << bits)
    }

    /// Cells from `behind` up to `self`.
    ///
    /// When the guard bits match both pointers sit in the same lap and the
    /// address difference is direct. When they differ the leading pointer has
    /// wrapped once more, so its guard is promoted into the subtraction as an
    /// extra `depth` before subtracting.
    #[inline(always)]
    pub fn cells_ahead_of(self, behind: Self, geometry: &Geometry) -> u32 {
        let ahead_addr = self.address(geometry);
        let behind_addr = behind.address(geometry);
        let promoted = if self.guard(geometry) != behind.guard(geometry) {
            ahead_addr + geometry.depth()
        } else {
            ahead_addr
        };
        promoted.wrapping_sub(behind_addr) & geometry.pointer_mask()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_flips_on_wrap() {
        let g = Geometry::new(4, 8, 1, 1);
        let mut p = Position::ZERO;
        for _ in 0..4 {
            assert!(!p.guard(&g));
            p = p.advance(1, &g);
        }
        assert!(p.guard(&g));
        assert_eq!(p.address(&g), 0);
        for _ in 0..4 {
            p = p.advance(1, &g);
        }
        assert_eq!(p, Position::ZERO);
    }

    #[test]
    fn test_cells_ahead_across_wrap() {
        let g = Geometry::new(8, 8, 1, 1);
        let write = Position::from_raw(9, &g); // lap 1, address 1
        let read = Position::from_raw(6, &g); // lap 0, address 6
        assert_eq!(write.cells_ahead_of(read, &g), 3);

        let full = Position::from_raw(8, &g);
        assert_eq!(full.cells_ahead_of(Position::ZERO, &g), 8);
        assert_eq!(Position::ZERO.cells_ahead_of(Position::ZERO, &g), 0);
    }

    #[test]
    fn test_truncate_rounds_down() {
        assert_eq!(Position(7).truncate(1), Position(6));
        assert_eq!(Position(7).truncate(0), Position(7));
    }
}
