use core::fmt;

use cdcfifo_dsa::Side;

/// A parameter set that cannot describe a buffer.
///
/// Detected once, when the configuration is validated. None of these can
/// arise while stepping a built buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    CellWidth(u32),
    TransferWidth { side: Side, width: u32 },
    NotCellMultiple { side: Side, width: u32, cell_width: u32 },
    RatioNotIntegral { write_width: u32, read_width: u32 },
    GranularityNotPowerOfTwo { side: Side, cells: u32 },
    DepthNotPowerOfTwo(u32),
    DepthOutOfRange { depth: u32, min: u32, max: u32 },
    SyncStages(usize),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::CellWidth(w) => write!(f, "cell width {} is outside 1..=64 bits", w),
            ConfigError::TransferWidth { side, width } => {
                write!(f, "{} width {} is outside 1..=64 bits", side, width)
            }
            ConfigError::NotCellMultiple { side, width, cell_width } => write!(
                f,
                "{} width {} is not a multiple of the {}-bit cell",
                side, width, cell_width
            ),
            ConfigError::RatioNotIntegral { write_width, read_width } => write!(
                f,
                "width ratio {}:{} is neither an integer nor its reciprocal",
                write_width, read_width
            ),
            ConfigError::GranularityNotPowerOfTwo { side, cells } => {
                write!(f, "{} transfer of {} cells is not a power of two", side, cells)
            }
            ConfigError::DepthNotPowerOfTwo(d) => write!(f, "depth {} is not a power of two", d),
            ConfigError::DepthOutOfRange { depth, min, max } => {
                write!(f, "depth {} is outside {}..={} cells", depth, min, max)
            }
            ConfigError::SyncStages(n) => write!(f, "{} synchronizer stages, at least 2 required", n),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug)]
pub enum FifoError {
    Config(ConfigError),
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for FifoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FifoError::Config(e) => write!(f, "invalid configuration: {}", e),
            FifoError::Io(e) => write!(f, "configuration I/O: {}", e),
            FifoError::Parse(e) => write!(f, "configuration syntax: {}", e),
        }
    }
}

impl std::error::Error for FifoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FifoError::Config(e) => Some(e),
            FifoError::Io(e) => Some(e),
            FifoError::Parse(e) => Some(e),
        }
    }
}

impl From<ConfigError> for FifoError {
    fn from(e: ConfigError) -> Self {
        FifoError::Config(e)
    }
}

impl From<std::io::Error> for FifoError {
    fn from(e: std::io::Error) -> Self {
        FifoError::Io(e)
    }
}

impl From<toml::de::Error> for FifoError {
    fn from(e: toml::de::Error) -> Self {
        FifoError::Parse(e)
    }
}
