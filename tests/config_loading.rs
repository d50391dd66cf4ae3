use std::io::Write;

use cdcfifo_core::{ConfigError, DualClockFifo, FifoConfig, FifoError};
use cdcfifo_dsa::Side;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "depth = 32\ncell_width = 8\nwrite_width = 32\nread_width = 8\nsync_stages = 3\nlook_ahead = true"
    )
    .unwrap();

    let config = FifoConfig::load(file.path()).unwrap();
    assert_eq!(config.depth, 32);
    assert_eq!(config.sync_stages, 3);
    assert!(config.look_ahead);
    // Unset keys fall back to defaults.
    assert_eq!(config.almost_full_slack, 1);

    let geometry = config.validate().unwrap();
    assert_eq!(geometry.lanes(), 4);
    assert_eq!(geometry.rows(), 8);
    assert_eq!(geometry.capacity(Side::Write), 8);
    assert_eq!(geometry.capacity(Side::Read), 32);

    let fifo = DualClockFifo::new(&config).unwrap();
    assert!(fifo.read_status().empty);
    assert_eq!(fifo.write_status().count, 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = FifoConfig::load(dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, FifoError::Io(_)), "got {:?}", err);
}

#[test]
fn test_malformed_toml_is_parse_error() {
    let err = FifoConfig::from_toml_str("depth = \"sixteen\"").unwrap_err();
    assert!(matches!(err, FifoError::Parse(_)), "got {:?}", err);
    println!("Parse failure reported as: {}", err);
}

#[test]
fn test_invalid_values_surface_on_validate() {
    let config = FifoConfig::from_toml_str("depth = 24").unwrap();
    assert_eq!(config.validate(), Err(ConfigError::DepthNotPowerOfTwo(24)));

    let wrapped: FifoError = config.validate().unwrap_err().into();
    assert!(wrapped.to_string().contains("not a power of two"));
    assert!(std::error::Error::source(&wrapped).is_some());
}
