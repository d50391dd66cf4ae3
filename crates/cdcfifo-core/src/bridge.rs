//! # Threaded Dual-Clock Bridge
//!
//! The same controllers as the stepped model, split across two threads.
//! Each half owns its controller outright; the only shared state is the
//! storage array and the two published Gray pointers.
//!
//! ## Mechanical Sympathy
//! - **Single Publisher**: each published pointer has exactly one writer,
//!   the half that owns the counter. It is stored with `Release` after the
//!   storage write it covers.
//! - **Sampled, not Read**: the other half loads it with `Acquire` into the
//!   first latch of its own synchronizer chain. Decisions use only the last
//!   latch, so the staleness bound of the stepped model holds here too.
//! - **Cache-Line Padding**: the two published pointers live on separate
//!   64-byte lines to prevent false sharing between the domains.

#[cfg(loom)]
use loom::sync::atomic::{AtomicU32, Ordering};
#[cfg(loom)]
use loom::sync::Arc;

#[cfg(not(loom))]
use core::sync::atomic::{AtomicU32, Ordering};
#[cfg(not(loom))]
use std::sync::Arc;

use cdcfifo_dsa::{Geometry, GrayCode, StorageArray, Word};

use crate::config::FifoConfig;
use crate::error::ConfigError;
use crate::read_side::{ReadController, ReadOutcome, ReadStatus};
use crate::write_side::{WriteController, WriteOutcome, WriteStatus};

#[repr(align(64))]
struct CacheAlignedAtomic(AtomicU32);

static_assertions::const_assert_eq!(core::mem::align_of::<CacheAlignedAtomic>(), 64);

impl CacheAlignedAtomic {
    fn new() -> Self {
        Self(AtomicU32::new(0))
    }

    #[inline(always)]
    fn publish(&self, code: GrayCode) {
        self.0.store(code.bits(), Ordering::Release);
    }

    #[inline(always)]
    fn sample(&self) -> GrayCode {
        GrayCode::from_bits(self.0.load(Ordering::Acquire))
    }
}

struct Shared {
    storage: StorageArray,
    write_gray: CacheAlignedAtomic,
    read_gray: CacheAlignedAtomic,
}

/// Producer half. Not `Clone`: there is exactly one producer.
pub struct Producer {
    shared: Arc<Shared>,
    controller: WriteController,
}

/// Consumer half. Not `Clone`: there is exactly one consumer.
pub struct Consumer {
    shared: Arc<Shared>,
    controller: ReadController,
}

/// Builds a bridge and splits it into its two halves.
pub fn channel(config: &FifoConfig) -> Result<(Producer, Consumer), ConfigError> {
    let geometry = config.validate()?;
    let shared = Arc::new(Shared {
        storage: StorageArray::new(geometry),
        write_gray: CacheAlignedAtomic::new(),
        read_gray: CacheAlignedAtomic::new(),
    });

    let producer = Producer {
        shared: shared.clone(),
        controller: WriteController::new(geometry, config.sync_stages, config.almost_full_slack),
    };
    let consumer = Consumer {
        shared,
        controller: ReadController::new(geometry, config.sync_stages, config.look_ahead, config.almost_empty_slack),
    };
    Ok((producer, consumer))
}

impl Producer {
    /// One producer step on the calling thread.
    pub fn tick(&mut self, enable: bool, data: Word) -> WriteOutcome {
        let remote = self.shared.read_gray.sample();
        let outcome = self.controller.clock(enable, data, &self.shared.storage, remote);
        if outcome.committed {
            self.shared.write_gray.publish(self.controller.published());
        }
        outcome
    }

    pub fn status(&self) -> WriteStatus {
        self.controller.status()
    }

    pub fn geometry(&self) -> &Geometry {
        self.shared.storage.geometry()
    }
}

impl Consumer {
    /// One consumer step on the calling thread.
    pub fn tick(&mut self, enable: bool) -> ReadOutcome {
        let remote = self.shared.write_gray.sample();
        let outcome = self.controller.clock(enable, &self.shared.storage, remote);
        if outcome.committed {
            self.shared.read_gray.publish(self.controller.published());
        }
        outcome
    }

    pub fn status(&self) -> ReadStatus {
        self.controller.status()
    }

    /// Current output register, see [`ReadOutcome::data_out`].
    pub fn data_out(&self) -> Word {
        self.controller.data_out()
    }

    pub fn look_ahead(&self) -> bool {
        self.controller.look_ahead()
    }

    pub fn geometry(&self) -> &Geometry {
        self.shared.storage.geometry()
    }
}
