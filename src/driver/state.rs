// src/driver/state.rs

use crate::common::{
    config::CompletionPolicy,
    hal_traits::TransferStatus,
    reading::{decode, Reading},
    registers::DATA_LEN,
    timing,
};
use log::{debug, trace, warn};

/// Presence state of the magnetometer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Presence {
    /// No successful transfer inside the staleness window.
    NotDetected,
    /// A presence check was issued and is assumed to succeed until it
    /// completes or the staleness window says otherwise.
    PendingPresence,
    /// A presence check or data read succeeded inside the staleness window.
    Present,
}

impl Presence {
    /// `PendingPresence` counts as present.
    #[inline]
    pub const fn is_present(self) -> bool {
        !matches!(self, Presence::NotDetected)
    }
}

/// Transaction counters, for diagnostics.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct DriverStats {
    /// Requests handed to the transport.
    pub requests: u32,
    /// Completions received.
    pub completions: u32,
    /// Completions that reported a failure.
    pub failures: u32,
    /// Requests the transport refused to queue.
    pub rejected: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum Request {
    CheckPresence,
    ReadData,
}

/// Everything the polling loop and the completion context share.
#[derive(Debug)]
pub(crate) struct SensorState {
    pub presence: Presence,
    pub last_update_ms: u32,
    pub next_update_ms: u32,
    pub raw: [u8; DATA_LEN],
    pub reading: Reading,
    pub in_flight: Option<Request>,
    /// A data read completed since the last `poll()`.
    pub fresh: bool,
    pub stats: DriverStats,
}

impl SensorState {
    pub const fn new() -> Self {
        SensorState {
            presence: Presence::NotDetected,
            last_update_ms: 0,
            next_update_ms: 0,
            raw: [0; DATA_LEN],
            reading: Reading::new(0, 0, 0),
            in_flight: None,
            fresh: false,
            stats: DriverStats {
                requests: 0,
                completions: 0,
                failures: 0,
                rejected: 0,
            },
        }
    }

    /// Drops a present sensor that has been silent for longer than the
    /// staleness window. Returns the resulting presence flag.
    pub fn refresh_presence(&mut self, now: u32) -> bool {
        if self.presence.is_present()
            && timing::elapsed_ms(now, self.last_update_ms) > timing::STALENESS_WINDOW_MS
        {
            debug!(
                "hmc5883l: no successful transfer for {} ms, marking absent",
                timing::elapsed_ms(now, self.last_update_ms)
            );
            self.presence = Presence::NotDetected;
            self.last_update_ms = now;
        }
        self.presence.is_present()
    }

    /// Decides what, if anything, to put on the bus at `now`.
    ///
    /// Advances the schedule by one fixed interval whenever it is due, even
    /// if nothing is issued because a request is still outstanding.
    pub fn schedule(&mut self, now: u32) -> Option<Request> {
        if !timing::deadline_reached(now, self.next_update_ms) {
            return None;
        }
        self.next_update_ms = self.next_update_ms.wrapping_add(timing::POLL_INTERVAL_MS);

        self.refresh_presence(now);

        if let Some(outstanding) = self.in_flight {
            trace!("hmc5883l: {:?} still in flight, skipping slot", outstanding);
            return None;
        }

        let request = match self.presence {
            Presence::Present => Request::ReadData,
            Presence::NotDetected | Presence::PendingPresence => {
                self.presence = Presence::PendingPresence;
                Request::CheckPresence
            }
        };
        self.in_flight = Some(request);
        self.stats.requests = self.stats.requests.wrapping_add(1);
        Some(request)
    }

    /// The transport refused the request; no completion will follow.
    pub fn start_rejected(&mut self) {
        self.in_flight = None;
        self.stats.rejected = self.stats.rejected.wrapping_add(1);
    }

    /// Applies a transport completion.
    pub fn complete(
        &mut self,
        now: u32,
        status: TransferStatus,
        data: &[u8],
        policy: CompletionPolicy,
    ) {
        let request = self.in_flight.take();
        if request.is_none() {
            warn!("hmc5883l: completion without an outstanding request");
        }
        self.stats.completions = self.stats.completions.wrapping_add(1);

        let short_read = request == Some(Request::ReadData) && data.len() != DATA_LEN;
        if short_read && status.is_success() {
            warn!("hmc5883l: read returned {} of {} bytes", data.len(), DATA_LEN);
        }

        if status.is_success() && !short_read {
            self.presence = Presence::Present;
            self.last_update_ms = now;
            if request == Some(Request::ReadData) {
                self.raw.copy_from_slice(data);
                self.reading = decode(&self.raw);
                self.fresh = true;
            } else if policy == CompletionPolicy::Legacy {
                self.reading = decode(&self.raw);
            }
            return;
        }

        self.stats.failures = self.stats.failures.wrapping_add(1);
        trace!("hmc5883l: {:?} failed with {:?}", request, status);
        match policy {
            CompletionPolicy::Validated => {
                // A refused presence check settles the optimistic state
                if request == Some(Request::CheckPresence)
                    && self.presence == Presence::PendingPresence
                {
                    self.presence = Presence::NotDetected;
                }
            }
            CompletionPolicy::Legacy => {
                self.last_update_ms = now;
                self.reading = decode(&self.raw);
            }
        }
    }
}
