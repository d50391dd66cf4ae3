#![no_std]
extern crate alloc;

pub mod geometry;
pub mod gray;
pub mod lanes;
pub mod position;
pub mod storage;

mod atomic;

pub use geometry::{Geometry, Side};
pub use gray::GrayCode;
pub use lanes::{LaneSlot, LaneTable};
pub use position::Position;
pub use storage::StorageArray;

/// A transfer word. Each side's transfer fits in the low `width` bits.
pub type Word = u64;
