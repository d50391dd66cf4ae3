//! Random interleavings of producer and consumer edges against a byte-stream
//! reference model.

use std::collections::VecDeque;

use cdcfifo_core::{read_side, write_side, DualClockFifo, FifoBuilder};
use cdcfifo_dsa::{Side, Word};
use proptest::prelude::*;

/// (depth in cells, write width, read width), all with 8-bit cells.
fn shapes() -> impl Strategy<Value = (u32, u32, u32)> {
    prop_oneof![
        Just((4, 8, 8)),
        Just((8, 8, 8)),
        Just((8, 16, 8)),
        Just((8, 8, 16)),
        Just((16, 32, 8)),
        Just((16, 8, 32)),
        Just((16, 16, 64)),
    ]
}

struct Reference {
    next_byte: u8,
    in_flight: VecDeque<u8>,
    /// Registered mode: the word whose read committed last consumer step.
    lagging: Option<Word>,
    cells_written: u64,
    cells_read: u64,
}

impl Reference {
    fn new() -> Self {
        Self {
            next_byte: 0,
            in_flight: VecDeque::new(),
            lagging: None,
            cells_written: 0,
            cells_read: 0,
        }
    }

    fn next_word(&self, cells: u32) -> Word {
        (0..cells).fold(0, |acc, i| (acc << 8) | self.next_byte.wrapping_add(i as u8) as Word)
    }

    fn commit_write(&mut self, cells: u32) {
        for _ in 0..cells {
            self.in_flight.push_back(self.next_byte);
            self.next_byte = self.next_byte.wrapping_add(1);
        }
        self.cells_written += cells as u64;
    }

    fn commit_read(&mut self, cells: u32) -> Word {
        self.cells_read += cells as u64;
        (0..cells).fold(0, |acc, _| (acc << 8) | self.in_flight.pop_front().unwrap() as Word)
    }
}

fn build(shape: (u32, u32, u32), stages: usize, look_ahead: bool) -> DualClockFifo {
    FifoBuilder::new()
        .with_depth(shape.0)
        .with_widths(shape.1, shape.2)
        .with_sync_stages(stages)
        .with_look_ahead(look_ahead)
        .build()
        .unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_interleavings_conserve_and_preserve_order(
        shape in shapes(),
        stages in 2usize..5,
        look_ahead in any::<bool>(),
        ops in prop::collection::vec((any::<bool>(), any::<bool>()), 1..400),
    ) {
        let mut fifo = build(shape, stages, look_ahead);
        let g = *fifo.geometry();
        let (write_cells, read_cells) = (g.granularity(Side::Write), g.granularity(Side::Read));
        let mut model = Reference::new();

        for (is_write, enable) in ops {
            if is_write {
                let word = model.next_word(write_cells);
                let outcome = fifo.write_step(enable, word);
                prop_assert!(outcome.count <= g.capacity(Side::Write));
                if outcome.committed {
                    model.commit_write(write_cells);
                }
            } else {
                let outcome = fifo.read_step(enable);
                prop_assert!(outcome.count <= g.capacity(Side::Read));
                if let Some(expected) = model.lagging.take() {
                    prop_assert_eq!(outcome.data_out, expected);
                }
                if outcome.committed {
                    let expected = model.commit_read(read_cells);
                    if look_ahead {
                        prop_assert_eq!(outcome.data_out, expected);
                    } else {
                        model.lagging = Some(expected);
                    }
                }
            }

            // The true counters always hold exactly what was committed.
            let (w, r) = (fifo.writer().position(), fifo.reader().position());
            let held = w.cells_ahead_of(r, &g) as u64;
            prop_assert_eq!(held, model.cells_written - model.cells_read);
            prop_assert!(held <= g.depth() as u64);
            prop_assert!(!(write_side::is_full(w, r, &g) && read_side::is_empty(r, w, &g)));

            // Each side's view never claims more than the truth.
            let write_view = fifo.write_status().count * write_cells;
            let read_view = fifo.read_status().count * read_cells;
            prop_assert!(write_view as u64 >= held);
            prop_assert!(read_view as u64 <= held);
        }

        // Once both relays have drained, each side reports the exact amount
        // in its own units: rounded up for the producer, down for the consumer.
        for _ in 0..stages {
            fifo.write_step(false, 0);
            fifo.read_step(false);
        }
        let held = (model.cells_written - model.cells_read) as u32;
        prop_assert_eq!(fifo.write_status().count, held.div_ceil(write_cells));
        prop_assert_eq!(fifo.read_status().count, held / read_cells);
        // Full means no room for one more whole producer transfer.
        let write_units = held.div_ceil(write_cells);
        prop_assert_eq!(fifo.write_status().full, write_units == g.capacity(Side::Write));
        prop_assert_eq!(fifo.read_status().empty, held < read_cells);
    }
}
