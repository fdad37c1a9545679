// src/common/hal_traits.rs

use core::fmt::Debug;

/// Abstraction for the system time source used by the driver.
///
/// Methods take `&self` because the clock is shared with the host loop and
/// usually backed by a hardware counter. Implementations typically wrap a
/// SysTick / RTC counter in a `Cell` or an atomic.
pub trait Clock {
    /// Monotonic milliseconds since boot. Allowed to wrap at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Block for at least the specified number of milliseconds.
    fn delay_ms(&self, ms: u32);
}

/// Outcome of an asynchronous bus transaction, as reported to a [`TransferClient`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TransferStatus {
    /// The transaction completed and every byte was acknowledged.
    Success,
    /// The device did not acknowledge its address or a data byte.
    Nack,
    /// Any other bus failure (arbitration loss, overrun, timeout, ...).
    Failed,
}

impl TransferStatus {
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, TransferStatus::Success)
    }
}

/// Receiver of asynchronous transaction completions.
///
/// The transport calls [`TransferClient::transfer_complete`] exactly once for
/// every request it accepted, from whatever context it completes in (ISR, DMA
/// handler, deferred call queue, or inline from the request itself).
pub trait TransferClient {
    /// `data` holds the bytes read by the transaction. It is empty for
    /// presence checks and may be shorter than requested on failure.
    fn transfer_complete(&self, status: TransferStatus, data: &[u8]);
}

/// Abstraction for the I2C-like bus the magnetometer sits on.
///
/// The synchronous methods are only used during initialisation. Polling goes
/// through the `start_*` methods, which return as soon as the request is
/// queued and report the result through the client passed with the request.
/// Methods take `&self` so the transport can be shared with the completion
/// context; implementations use interior mutability.
pub trait BusTransport<'a> {
    /// Associated error type for bus errors.
    type Error: Debug;

    /// Blocking check that a device acknowledges `address`.
    fn check_presence(&self, address: u8) -> Result<(), Self::Error>;

    /// Blocking write of `bytes` (register pointer followed by payload).
    fn write(&self, address: u8, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Queues a presence check and reports the result to `client`.
    ///
    /// Returns `Err` if the request could not be queued; in that case the
    /// client is never called for it.
    fn start_check_presence(
        &self,
        address: u8,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error>;

    /// Queues a read of `len` bytes starting at `register` and reports the
    /// bytes to `client`.
    ///
    /// Returns `Err` if the request could not be queued; in that case the
    /// client is never called for it.
    fn start_read(
        &self,
        address: u8,
        register: u8,
        len: usize,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error>;
}
