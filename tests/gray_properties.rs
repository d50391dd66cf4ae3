use cdcfifo_core::PointerSync;
use cdcfifo_dsa::{Geometry, GrayCode, Position};
use proptest::prelude::*;

#[test]
fn test_gray_exhaustive_small_counters() {
    // Every counter width up to 12 bits, including the wrap back to zero.
    for bits in 1..=12u32 {
        let range = 1u32 << bits;
        for v in 0..range {
            let code = GrayCode::encode(v);
            assert_eq!(code.decode(), v);
            assert!(code.bits() < range, "code must stay inside the counter width");
            let next = GrayCode::encode((v + 1) % range);
            assert_eq!(code.distance(next), 1, "v = {} at {} bits", v, bits);
        }
    }
}

#[test]
fn test_published_snapshots_change_one_bit_per_transfer() {
    // Producer moves 2 cells, consumer 1: each producer step must still flip
    // exactly one bit of what it publishes.
    let g = Geometry::new(16, 8, 2, 1);
    let mut position = Position::ZERO;
    let mut code = PointerSync::encode(position, &g);
    for _ in 0..64 {
        position = position.advance(2, &g);
        let next = PointerSync::encode(position, &g);
        assert_eq!(code.distance(next), 1);
        code = next;
    }
}

#[test]
fn test_fine_side_publishes_at_most_one_bit_per_step() {
    // The 1-cell consumer as seen by the 4-cell producer: most steps publish
    // nothing new, the rest flip one bit.
    let g = Geometry::new(32, 8, 4, 1);
    let mut position = Position::ZERO;
    let mut code = PointerSync::encode(position, &g);
    for _ in 0..128 {
        position = position.advance(1, &g);
        let next = PointerSync::encode(position, &g);
        assert!(code.distance(next) <= 1);
        code = next;
    }
}

proptest! {
    #[test]
    fn prop_gray_round_trip(v in any::<u32>()) {
        prop_assert_eq!(GrayCode::encode(v).decode(), v);
    }

    #[test]
    fn prop_gray_successors_differ_in_one_bit(v in 0..u32::MAX) {
        prop_assert_eq!(GrayCode::encode(v).distance(GrayCode::encode(v + 1)), 1);
    }
}
