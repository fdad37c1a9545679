// src/adapter/blocking_hal.rs

use crate::common::hal_traits::{BusTransport, TransferClient, TransferStatus};
use crate::common::registers::DATA_LEN;
use core::cell::RefCell;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Largest read the adapter can buffer.
pub const MAX_READ_LEN: usize = DATA_LEN;

/// Adapts a blocking `embedded_hal::i2c::I2c` bus to [`BusTransport`].
///
/// "Asynchronous" requests run to completion inside the `start_*` call: the
/// client's `transfer_complete` is invoked before `start_*` returns, so the
/// driver must tolerate inline completion. Suits single-threaded polling
/// loops where blocking for one short transfer every slot is acceptable.
pub struct BlockingBus<I2C> {
    i2c: RefCell<I2C>,
}

impl<I2C: I2c> BlockingBus<I2C> {
    pub fn new(i2c: I2C) -> Self {
        BlockingBus {
            i2c: RefCell::new(i2c),
        }
    }

    /// Releases the wrapped bus.
    pub fn release(self) -> I2C {
        self.i2c.into_inner()
    }
}

/// Maps a HAL error onto the status reported to transfer clients.
pub fn status_for(kind: ErrorKind) -> TransferStatus {
    match kind {
        ErrorKind::NoAcknowledge(_) => TransferStatus::Nack,
        _ => TransferStatus::Failed,
    }
}

impl<'a, I2C: I2c> BusTransport<'a> for BlockingBus<I2C> {
    type Error = I2C::Error;

    fn check_presence(&self, address: u8) -> Result<(), Self::Error> {
        // Zero-length write: address phase only
        self.i2c.borrow_mut().write(address, &[])
    }

    fn write(&self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.i2c.borrow_mut().write(address, bytes)
    }

    fn start_check_presence(
        &self,
        address: u8,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error> {
        let status = match self.check_presence(address) {
            Ok(()) => TransferStatus::Success,
            Err(e) => {
                log::trace!("hmc5883l adapter: no answer from {:#04x}: {:?}", address, e);
                status_for(e.kind())
            }
        };
        client.transfer_complete(status, &[]);
        Ok(())
    }

    fn start_read(
        &self,
        address: u8,
        register: u8,
        len: usize,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error> {
        let mut buffer = [0u8; MAX_READ_LEN];
        let len = len.min(MAX_READ_LEN);
        let result = self
            .i2c
            .borrow_mut()
            .write_read(address, &[register], &mut buffer[..len]);
        match result {
            Ok(()) => client.transfer_complete(TransferStatus::Success, &buffer[..len]),
            Err(e) => client.transfer_complete(status_for(e.kind()), &[]),
        }
        Ok(())
    }
}
