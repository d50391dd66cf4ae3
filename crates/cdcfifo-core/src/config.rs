use std::path::Path;

use cdcfifo_dsa::{Geometry, Side, Word};
use serde::Deserialize;

use crate::error::{ConfigError, FifoError};

/// Parameters of a dual-clock buffer, as written in a TOML file.
///
/// Widths are in bits. `depth` counts base cells of `cell_width` bits.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct FifoConfig {
    pub depth: u32,
    pub cell_width: u32,
    pub write_width: u32,
    pub read_width: u32,
    pub sync_stages: usize,
    pub look_ahead: bool,
    /// Producer units of free space at or below which `almost_full` rises.
    pub almost_full_slack: u32,
    /// Consumer units of occupancy at or below which `almost_empty` rises.
    pub almost_empty_slack: u32,
}

impl Default for FifoConfig {
    fn default() -> Self {
        Self {
            depth: 16,
            cell_width: 8,
            write_width: 8,
            read_width: 8,
            sync_stages: 2,
            look_ahead: false,
            almost_full_slack: 1,
            almost_empty_slack: 1,
        }
    }
}

impl FifoConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, FifoError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FifoError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Checks every parameter once and derives the buffer shape.
    pub fn validate(&self) -> Result<Geometry, ConfigError> {
        if self.cell_width == 0 || self.cell_width > Word::BITS {
            return Err(ConfigError::CellWidth(self.cell_width));
        }

        let write_cells = self.cells_per_transfer(Side::Write, self.write_width)?;
        let read_cells = self.cells_per_transfer(Side::Read, self.read_width)?;

        let (wide, narrow) = (write_cells.max(read_cells), write_cells.min(read_cells));
        if wide % narrow != 0 {
            return Err(ConfigError::RatioNotIntegral {
                write_width: self.write_width,
                read_width: self.read_width,
            });
        }

        for (side, cells) in [(Side::Write, write_cells), (Side::Read, read_cells)] {
            if !cells.is_power_of_two() {
                return Err(ConfigError::GranularityNotPowerOfTwo { side, cells });
            }
        }

        if !self.depth.is_power_of_two() {
            return Err(ConfigError::DepthNotPowerOfTwo(self.depth));
        }
        if self.depth < wide || self.depth > Geometry::MAX_DEPTH {
            return Err(ConfigError::DepthOutOfRange {
                depth: self.depth,
                min: wide,
                max: Geometry::MAX_DEPTH,
            });
        }

        if self.sync_stages < 2 {
            return Err(ConfigError::SyncStages(self.sync_stages));
        }

        Ok(Geometry::new(self.depth, self.cell_width, write_cells, read_cells))
    }

    fn cells_per_transfer(&self, side: Side, width: u32) -> Result<u32, ConfigError> {
        if width == 0 || width > Word::BITS {
            return Err(ConfigError::TransferWidth { side, width });
        }
        if width % self.cell_width != 0 {
            return Err(ConfigError::NotCellMultiple {
                side,
                width,
                cell_width: self.cell_width,
            });
        }
        Ok(width / self.cell_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(depth: u32, write_width: u32, read_width: u32) -> FifoConfig {
        FifoConfig { depth, write_width, read_width, ..FifoConfig::default() }
    }

    #[test]
    fn test_default_is_valid() {
        let g = FifoConfig::default().validate().unwrap();
        assert_eq!(g.depth(), 16);
        assert_eq!(g.lanes(), 1);
    }

    #[test]
    fn test_rejects_each_failure_class() {
        assert_eq!(config(12, 8, 8).validate(), Err(ConfigError::DepthNotPowerOfTwo(12)));
        assert_eq!(
            config(16, 12, 8).validate(),
            Err(ConfigError::NotCellMultiple { side: Side::Write, width: 12, cell_width: 8 })
        );
        assert_eq!(
            config(16, 24, 16).validate(),
            Err(ConfigError::RatioNotIntegral { write_width: 24, read_width: 16 })
        );
        assert_eq!(
            config(16, 48, 16).validate(),
            Err(ConfigError::GranularityNotPowerOfTwo { side: Side::Write, cells: 6 })
        );
        assert_eq!(
            config(2, 32, 8).validate(),
            Err(ConfigError::DepthOutOfRange { depth: 2, min: 4, max: Geometry::MAX_DEPTH })
        );
        assert_eq!(
            config(16, 72, 8).validate(),
            Err(ConfigError::TransferWidth { side: Side::Write, width: 72 })
        );

        let stages = FifoConfig { sync_stages: 1, ..FifoConfig::default() };
        assert_eq!(stages.validate(), Err(ConfigError::SyncStages(1)));

        let cell = FifoConfig { cell_width: 0, ..FifoConfig::default() };
        assert_eq!(cell.validate(), Err(ConfigError::CellWidth(0)));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let cfg = FifoConfig::from_toml_str("depth = 64\nlook_ahead = true\n").unwrap();
        assert_eq!(cfg.depth, 64);
        assert!(cfg.look_ahead);
        assert_eq!(cfg.sync_stages, 2);
        assert_eq!(cfg.write_width, 8);
    }
}
