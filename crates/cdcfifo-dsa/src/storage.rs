use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::atomic::{AtomicU64, Ordering};
use crate::geometry::{Geometry, Side};
use crate::lanes::LaneTable;
use crate::Word;

/// One sub-array: `rows` cells of `cell_width` bits.
struct CellBank {
    cells: Box<[AtomicU64]>,
}

impl CellBank {
    fn new(rows: u32) -> Self {
        let mut cells = Vec::with_capacity(rows as usize);
        for _ in 0..rows {
            cells.push(AtomicU64::new(0));
        }
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    #[inline(always)]
    fn store(&self, row: u32, value: Word) {
        self.cells[row as usize].store(value, Ordering::Relaxed);
    }

    #[inline(always)]
    fn load(&self, row: u32) -> Word {
        self.cells[row as usize].load(Ordering::Relaxed)
    }
}

/// Dual-port storage with a width adapter between the two ports.
///
/// The array is split into `lanes` parallel sub-arrays, one per cell of the
/// wider side's transfer. A transfer of `g` cells starting at cell address
/// `a` lives in row `a / lanes`, lanes `a % lanes ..` onward; cell `a` takes
/// the most significant slice of the transfer word.
///
/// ## Ownership
/// Both ports take `&self`. Cells are relaxed atomics; which port may touch
/// which cells is decided entirely by the position counters, and the
/// happens-before edge comes from publishing those counters, not from the
/// cells themselves.
pub struct StorageArray {
    banks: Vec<CellBank>,
    geometry: Geometry,
    write_lanes: LaneTable,
    read_lanes: LaneTable,
    row_shift: u32,
}

impl StorageArray {
    pub fn new(geometry: Geometry) -> Self {
        let mut banks = Vec::with_capacity(geometry.lanes() as usize);
        for _ in 0..geometry.lanes() {
            banks.push(CellBank::new(geometry.rows()));
        }

        tracing::debug!(
            "StorageArray: {} lanes x {} rows of {} bits",
            geometry.lanes(),
            geometry.rows(),
            geometry.cell_width()
        );

        Self {
            banks,
            write_lanes: LaneTable::new(&geometry, Side::Write),
            read_lanes: LaneTable::new(&geometry, Side::Read),
            row_shift: geometry.lanes().trailing_zeros(),
            geometry,
        }
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Write port. Splits `data` across the lanes its address selects.
    ///
    /// Bits of `data` above the producer's transfer width are ignored.
    pub fn write(&self, addr: u32, data: Word, enable: bool) {
        if !enable {
            return;
        }
        let addr = addr & self.geometry.address_mask();
        let row = addr >> self.row_shift;
        let slot = self.write_lanes.select(addr);
        let cell_width = self.geometry.cell_width();
        let cell_mask = self.geometry.cell_mask();

        for j in 0..slot.lanes {
            let slice = (data >> ((slot.lanes - 1 - j) * cell_width)) & cell_mask;
            self.banks[(slot.first_lane + j) as usize].store(row, slice);
        }
    }

    /// Read port. Combinational: returns the consumer-width word at `addr`.
    pub fn read(&self, addr: u32) -> Word {
        let addr = addr & self.geometry.address_mask();
        let slot = self.read_lanes.select(addr);
        (self.readout(addr >> self.row_shift) >> slot.shift) & slot.mask
    }

    /// Full-row readout, lane 0 in the most significant position.
    fn readout(&self, row: u32) -> Word {
        let cell_width = self.geometry.cell_width();
        self.banks
            .iter()
            .fold(0, |acc: Word, bank| acc.checked_shl(cell_width).unwrap_or(0) | bank.load(row))
    }
}
