pub mod bridge;
pub mod clock;
pub mod config;
pub mod error;
pub mod fifo;
pub mod read_side;
pub mod sync;
pub mod write_side;

pub use bridge::{Consumer, Producer};
pub use clock::DualClock;
pub use config::FifoConfig;
pub use error::{ConfigError, FifoError};
pub use fifo::{DualClockFifo, Stimulus};
pub use read_side::{ReadController, ReadOutcome, ReadStatus};
pub use sync::PointerSync;
pub use write_side::{WriteController, WriteOutcome, WriteStatus};

/// A fluent builder for dual-clock buffers.
///
/// ## Validation
/// Parameters are only checked when a buffer is built, so setters can be
/// chained in any order.
#[derive(Debug, Clone, Default)]
pub struct FifoBuilder {
    pub config: FifoConfig,
}

impl FifoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides every parameter at once.
    pub fn with_config(mut self, config: FifoConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_depth(mut self, cells: u32) -> Self {
        self.config.depth = cells;
        self
    }

    pub fn with_cell_width(mut self, bits: u32) -> Self {
        self.config.cell_width = bits;
        self
    }

    pub fn with_widths(mut self, write_bits: u32, read_bits: u32) -> Self {
        self.config.write_width = write_bits;
        self.config.read_width = read_bits;
        self
    }

    pub fn with_sync_stages(mut self, stages: usize) -> Self {
        self.config.sync_stages = stages;
        self
    }

    pub fn with_look_ahead(mut self, enabled: bool) -> Self {
        self.config.look_ahead = enabled;
        self
    }

    pub fn with_slack(mut self, almost_full: u32, almost_empty: u32) -> Self {
        self.config.almost_full_slack = almost_full;
        self.config.almost_empty_slack = almost_empty;
        self
    }

    /// Builds the single-threaded stepped model.
    pub fn build(&self) -> Result<DualClockFifo, ConfigError> {
        DualClockFifo::new(&self.config)
    }

    /// Builds the two-thread bridge.
    pub fn build_bridge(&self) -> Result<(Producer, Consumer), ConfigError> {
        bridge::channel(&self.config)
    }
}
