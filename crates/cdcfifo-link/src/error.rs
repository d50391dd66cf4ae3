use core::fmt;

use cdcfifo_core::{ConfigError, FifoError};
use cdcfifo_dsa::Side;

#[derive(Debug)]
pub enum LinkError {
    /// The line collaborators move single bytes; both sides must be 8 bits.
    NotByteWide { side: Side, width: u32 },
    Fifo(FifoError),
    /// A domain task panicked or was aborted.
    Task(tokio::task::JoinError),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::NotByteWide { side, width } => {
                write!(f, "{} side is {} bits wide, the line moves bytes", side, width)
            }
            LinkError::Fifo(e) => write!(f, "{}", e),
            LinkError::Task(e) => write!(f, "domain task failed: {}", e),
        }
    }
}

impl std::error::Error for LinkError {}

impl From<FifoError> for LinkError {
    fn from(e: FifoError) -> Self {
        LinkError::Fifo(e)
    }
}

impl From<ConfigError> for LinkError {
    fn from(e: ConfigError) -> Self {
        LinkError::Fifo(FifoError::Config(e))
    }
}

impl From<tokio::task::JoinError> for LinkError {
    fn from(e: tokio::task::JoinError) -> Self {
        LinkError::Task(e)
    }
}
