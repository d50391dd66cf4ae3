use std::time::Duration;

use cdc_fifo::link::{CaptureTransmitter, LinkRuntime, ScriptedReceiver};
use cdc_fifo::FifoConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let path = std::env::args().nth(1).unwrap_or_else(|| "demos/uart_fifo.toml".to_string());
    let config = FifoConfig::load(&path)?;
    tracing::info!("Loaded {} ({:?})", path, config);

    // Receiver at 1 kHz with a byte every 4th step, transmitter at ~333 Hz
    // and busy for one step after each load.
    let message = b"Gray pointers cross, data does not.\n".to_vec();
    let handle = LinkRuntime::new(config)
        .with_periods(Duration::from_millis(1), Duration::from_millis(3))
        .spawn(ScriptedReceiver::new(message.clone()).with_gap(3), CaptureTransmitter::new(1))?;

    tokio::time::sleep(Duration::from_millis(500)).await;
    let report = handle.shutdown().await?;

    println!(
        "accepted {} bytes, {} overruns, sent {} bytes",
        report.accepted, report.overruns, report.sent
    );
    println!("echo: {}", String::from_utf8_lossy(report.transmitter.sent()));
    Ok(())
}
