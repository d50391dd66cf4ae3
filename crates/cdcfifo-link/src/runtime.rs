use std::time::Duration;

use cdcfifo_core::{bridge, FifoConfig};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::error::LinkError;
use crate::line::{LineReceiver, LineTransmitter};
use crate::pump::{ReceivePump, TransmitPump};

/// Control messages for the domain tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkSignal {
    Shutdown,
}

/// Clocks a threaded bridge from two independent tokio intervals.
///
/// ## Domains
/// The producer task polls the receiver once per `write_period`; the
/// consumer task feeds the transmitter once per `read_period`. The tasks
/// share nothing but the bridge, so the two periods can be unrelated.
pub struct LinkRuntime {
    config: FifoConfig,
    write_period: Duration,
    read_period: Duration,
}

impl LinkRuntime {
    pub fn new(config: FifoConfig) -> Self {
        Self {
            config,
            write_period: Duration::from_millis(1),
            read_period: Duration::from_millis(3),
        }
    }

    pub fn with_periods(mut self, write_period: Duration, read_period: Duration) -> Self {
        self.write_period = write_period;
        self.read_period = read_period;
        self
    }

    /// Builds the bridge and starts both domain tasks on the current runtime.
    pub fn spawn<R, T>(self, receiver: R, transmitter: T) -> Result<LinkHandle<R, T>, LinkError>
    where
        R: LineReceiver + 'static,
        T: LineTransmitter + 'static,
    {
        let (mut producer, mut consumer) = bridge::channel(&self.config)?;
        let mut receive_pump = ReceivePump::new(&producer)?;
        let mut transmit_pump = TransmitPump::new(&consumer)?;

        tracing::info!(
            "LinkRuntime: starting (write every {:?}, read every {:?})",
            self.write_period,
            self.read_period
        );

        let (write_tx, mut write_rx) = mpsc::channel::<LinkSignal>(1);
        let (read_tx, mut read_rx) = mpsc::channel::<LinkSignal>(1);
        let write_period = self.write_period;
        let read_period = self.read_period;

        let receive = tokio::spawn(async move {
            let mut receiver = receiver;
            let mut ticker = tokio::time::interval(write_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    signal = write_rx.recv() => match signal {
                        Some(LinkSignal::Shutdown) | None => break,
                    },
                    _ = ticker.tick() => {
                        receive_pump.step(&mut producer, &mut receiver);
                    }
                }
            }
            (receiver, receive_pump)
        });

        let transmit = tokio::spawn(async move {
            let mut transmitter = transmitter;
            let mut ticker = tokio::time::interval(read_period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    signal = read_rx.recv() => match signal {
                        Some(LinkSignal::Shutdown) | None => break,
                    },
                    _ = ticker.tick() => {
                        transmit_pump.step(&mut consumer, &mut transmitter);
                    }
                }
            }
            (transmitter, transmit_pump)
        });

        Ok(LinkHandle {
            control: [write_tx, read_tx],
            receive,
            transmit,
        })
    }
}

/// Running link. Dropping it without [`shutdown`](LinkHandle::shutdown)
/// closes the control channels, which also stops both tasks.
pub struct LinkHandle<R, T> {
    control: [mpsc::Sender<LinkSignal>; 2],
    receive: JoinHandle<(R, ReceivePump)>,
    transmit: JoinHandle<(T, TransmitPump)>,
}

/// What each domain did before shutdown, plus the collaborators handed back.
pub struct LinkReport<R, T> {
    pub receiver: R,
    pub transmitter: T,
    pub accepted: u64,
    pub overruns: u64,
    pub sent: u64,
}

impl<R, T> LinkHandle<R, T> {
    /// Stops both domains and waits for their tasks.
    pub async fn shutdown(self) -> Result<LinkReport<R, T>, LinkError> {
        for tx in &self.control {
            // A closed channel means the task already exited.
            let _ = tx.send(LinkSignal::Shutdown).await;
        }
        let (receiver, receive_pump) = self.receive.await?;
        let (transmitter, transmit_pump) = self.transmit.await?;

        tracing::info!(
            "LinkRuntime: stopped ({} accepted, {} overruns, {} sent)",
            receive_pump.accepted(),
            receive_pump.overruns(),
            transmit_pump.sent()
        );

        Ok(LinkReport {
            receiver,
            transmitter,
            accepted: receive_pump.accepted(),
            overruns: receive_pump.overruns(),
            sent: transmit_pump.sent(),
        })
    }
}
