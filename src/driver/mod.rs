// src/driver/mod.rs

//! Polling driver for the HMC5883L.
//!
//! The host calls [`Hmc5883l::update`] from its main loop. Every
//! [`POLL_INTERVAL_MS`](crate::common::timing::POLL_INTERVAL_MS) the driver
//! puts one asynchronous request on the bus: a presence check while the
//! sensor is not confirmed, a 6-byte data read once it is. The transport
//! reports back through [`TransferClient`], which the driver implements; the
//! driver hands itself to every request, so no global state is involved.
//!
//! Shared state lives behind a `critical_section::Mutex`, so completions may
//! arrive from an interrupt. The lock is released before the transport is
//! called, which lets a transport complete inline.

mod state;

#[cfg(test)]
mod mock;

pub use state::{DriverStats, Presence};

use crate::common::{
    config::MagConfig,
    error::MagError,
    hal_traits::{BusTransport, Clock, TransferClient, TransferStatus},
    reading::Reading,
    registers::{ADDRESS, DATA_LEN, DATA_START},
    timing,
};
use core::cell::RefCell;
use critical_section::Mutex;
use log::{debug, info, warn};
use state::{Request, SensorState};

/// Represents one HMC5883L on a shared bus.
pub struct Hmc5883l<'a, B, C>
where
    B: BusTransport<'a>,
    C: Clock,
{
    bus: &'a B,
    clock: &'a C,
    config: MagConfig,
    state: Mutex<RefCell<SensorState>>,
}

impl<'a, B, C> Hmc5883l<'a, B, C>
where
    B: BusTransport<'a> + 'a,
    C: Clock + 'a,
{
    pub const fn new(bus: &'a B, clock: &'a C, config: MagConfig) -> Self {
        Hmc5883l {
            bus,
            clock,
            config,
            state: Mutex::new(RefCell::new(SensorState::new())),
        }
    }

    pub fn config(&self) -> &MagConfig {
        &self.config
    }

    /// Checks for and configures the sensor.
    ///
    /// Waits until the clock reads at least 14 ms since boot, then checks
    /// that the device acknowledges and writes CRA, CRB and MODE. All three
    /// writes are attempted; the first failure is returned.
    ///
    /// With the default (lenient) configuration a device that acknowledged
    /// is marked present even if a write failed. Set
    /// [`MagConfig::strict_init`] to keep it absent in that case.
    pub fn init(&self) -> Result<(), MagError<B::Error>> {
        while self.clock.now_ms() < timing::POWER_UP_MS {
            self.clock.delay_ms(1);
        }

        let now = self.clock.now_ms();
        self.with_state(|s| {
            s.presence = Presence::NotDetected;
            s.last_update_ms = now;
            s.next_update_ms = now;
        });

        if let Err(e) = self.bus.check_presence(ADDRESS) {
            debug!("hmc5883l: no ack at {:#04x}: {:?}", ADDRESS, e);
            return Err(MagError::NotPresent);
        }

        self.clock.delay_ms(timing::SETTLE_MS);

        let mut first_error = None;
        for write in self.config.register_writes() {
            if let Err(e) = self.bus.write(ADDRESS, &write) {
                warn!("hmc5883l: write to register {:#04x} failed: {:?}", write[0], e);
                if first_error.is_none() {
                    first_error = Some(MagError::Configuration {
                        register: write[0],
                        cause: e,
                    });
                }
            }
        }

        if first_error.is_none() || !self.config.strict_init {
            self.with_state(|s| s.presence = Presence::Present);
        }

        match first_error {
            Some(e) => Err(e),
            None => {
                info!("hmc5883l: configured");
                Ok(())
            }
        }
    }

    /// Returns whether the sensor currently counts as present.
    ///
    /// A present sensor without a successful transfer for more than 200 ms is
    /// marked absent here, and the absence is time-stamped.
    pub fn present(&self) -> bool {
        let now = self.clock.now_ms();
        self.with_state(|s| s.refresh_presence(now))
    }

    /// Runs one scheduler tick. Call it from the main loop; it does nothing
    /// until the next 14 ms slot is due.
    pub fn update(&'a self) {
        let now = self.clock.now_ms();
        let Some(request) = self.with_state(|s| s.schedule(now)) else {
            return;
        };

        let started = match request {
            Request::CheckPresence => self.bus.start_check_presence(ADDRESS, self),
            Request::ReadData => {
                self.bus
                    .start_read(ADDRESS, DATA_START.addr(), DATA_LEN, self)
            }
        };

        if let Err(e) = started {
            warn!("hmc5883l: transport refused {:?}: {:?}", request, e);
            self.with_state(|s| s.start_rejected());
        }
    }

    /// Copies the cached reading into `out`.
    ///
    /// Returns false if any axis holds the overflow sentinel. Presence is
    /// not consulted; combine with [`Hmc5883l::present`] as needed.
    pub fn read(&self, out: &mut Reading) -> bool {
        *out = self.with_state(|s| s.reading);
        !out.is_overflow()
    }

    /// The cached reading, or `Overflow` if it carries the sentinel.
    pub fn reading(&self) -> Result<Reading, MagError<B::Error>> {
        let reading = self.with_state(|s| s.reading);
        if reading.is_overflow() {
            Err(MagError::Overflow)
        } else {
            Ok(reading)
        }
    }

    /// Non-blocking wait for a new sample.
    ///
    /// Yields each successfully read sample once. Returns `WouldBlock` until
    /// the next read completes and `NotPresent` while the sensor is absent.
    pub fn poll(&self) -> nb::Result<Reading, MagError<B::Error>> {
        let now = self.clock.now_ms();
        self.with_state(|s| {
            if !s.refresh_presence(now) {
                return Err(nb::Error::Other(MagError::NotPresent));
            }
            if !s.fresh {
                return Err(nb::Error::WouldBlock);
            }
            s.fresh = false;
            if s.reading.is_overflow() {
                Err(nb::Error::Other(MagError::Overflow))
            } else {
                Ok(s.reading)
            }
        })
    }

    /// Current presence state, without the staleness check.
    pub fn state(&self) -> Presence {
        self.with_state(|s| s.presence)
    }

    pub fn last_update_ms(&self) -> u32 {
        self.with_state(|s| s.last_update_ms)
    }

    pub fn next_update_ms(&self) -> u32 {
        self.with_state(|s| s.next_update_ms)
    }

    /// True while a request is waiting for its completion.
    pub fn is_busy(&self) -> bool {
        self.with_state(|s| s.in_flight.is_some())
    }

    pub fn stats(&self) -> DriverStats {
        self.with_state(|s| s.stats)
    }

    fn with_state<R>(&self, f: impl FnOnce(&mut SensorState) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs)))
    }
}

impl<'a, B, C> TransferClient for Hmc5883l<'a, B, C>
where
    B: BusTransport<'a> + 'a,
    C: Clock + 'a,
{
    fn transfer_complete(&self, status: TransferStatus, data: &[u8]) {
        let now = self.clock.now_ms();
        let policy = self.config.completion;
        self.with_state(|s| s.complete(now, status, data, policy));
    }
}
