// src/driver/mock.rs

// Test doubles for the clock and the bus. Only compiled for unit tests.

extern crate std;

use crate::common::hal_traits::{BusTransport, Clock, TransferClient, TransferStatus};
use core::cell::{Cell, RefCell};
use std::vec::Vec;

// --- Mock Clock ---
pub(crate) struct MockClock {
    now: Cell<u32>,
    pub delays: RefCell<Vec<u32>>,
}

impl MockClock {
    pub fn new(now: u32) -> Self {
        MockClock {
            now: Cell::new(now),
            delays: RefCell::new(Vec::new()),
        }
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }

    fn delay_ms(&self, ms: u32) {
        self.delays.borrow_mut().push(ms);
        self.advance(ms);
    }
}

// --- Mock Bus Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockBusError;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum MockRequest {
    CheckPresence { address: u8 },
    Read { address: u8, register: u8, len: usize },
}

// --- Mock Bus ---
/// Records every call. Async requests stay pending until the test calls
/// `complete`, unless an inline completion is staged.
pub(crate) struct MockBus<'a> {
    pub present: Cell<bool>,
    pub fail_write_register: Cell<Option<u8>>,
    pub reject_starts: Cell<bool>,
    pub inline_completion: Cell<Option<(TransferStatus, [u8; 6])>>,
    pub presence_checks: Cell<u32>,
    pub writes: RefCell<Vec<(u8, Vec<u8>)>>,
    pub requests: RefCell<Vec<MockRequest>>,
    pending: Cell<Option<&'a dyn TransferClient>>,
}

impl<'a> MockBus<'a> {
    pub fn new(present: bool) -> Self {
        MockBus {
            present: Cell::new(present),
            fail_write_register: Cell::new(None),
            reject_starts: Cell::new(false),
            inline_completion: Cell::new(None),
            presence_checks: Cell::new(0),
            writes: RefCell::new(Vec::new()),
            requests: RefCell::new(Vec::new()),
            pending: Cell::new(None),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_request(&self) -> Option<MockRequest> {
        self.requests.borrow().last().copied()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Delivers the completion for the outstanding request.
    pub fn complete(&self, status: TransferStatus, data: &[u8]) {
        let client = self.pending.take().expect("no pending request");
        client.transfer_complete(status, data);
    }

    fn accept(&self, request: MockRequest, client: &'a dyn TransferClient) -> Result<(), MockBusError> {
        if self.reject_starts.get() {
            return Err(MockBusError);
        }
        assert!(self.pending.get().is_none(), "second request while one is pending");
        self.requests.borrow_mut().push(request);
        match self.inline_completion.get() {
            Some((status, data)) => {
                let data: &[u8] = match request {
                    MockRequest::Read { .. } => &data,
                    MockRequest::CheckPresence { .. } => &[],
                };
                client.transfer_complete(status, data);
            }
            None => self.pending.set(Some(client)),
        }
        Ok(())
    }
}

impl<'a> BusTransport<'a> for MockBus<'a> {
    type Error = MockBusError;

    fn check_presence(&self, _address: u8) -> Result<(), Self::Error> {
        self.presence_checks.set(self.presence_checks.get() + 1);
        if self.present.get() {
            Ok(())
        } else {
            Err(MockBusError)
        }
    }

    fn write(&self, address: u8, bytes: &[u8]) -> Result<(), Self::Error> {
        self.writes.borrow_mut().push((address, bytes.to_vec()));
        match self.fail_write_register.get() {
            Some(reg) if bytes.first() == Some(&reg) => Err(MockBusError),
            _ => Ok(()),
        }
    }

    fn start_check_presence(
        &self,
        address: u8,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error> {
        self.accept(MockRequest::CheckPresence { address }, client)
    }

    fn start_read(
        &self,
        address: u8,
        register: u8,
        len: usize,
        client: &'a dyn TransferClient,
    ) -> Result<(), Self::Error> {
        self.accept(MockRequest::Read { address, register, len }, client)
    }
}
