use core::cell::Cell;

use embedded_hal_async::delay::DelayNs;
use heapless::{Deque, Vec};

use crate::bus::Bus;
use crate::clock::Clock;
use crate::command::MAX_COMMAND_BYTES;
use crate::response::MAX_RESPONSE_BYTES;

/// Scripted [`Bus`]. Responses are handed out in the order they were queued, a read with
/// nothing queued fails like a NACK would.
pub struct FakeBus<const N: usize> {
    responses: Deque<Vec<u8, MAX_RESPONSE_BYTES>, N>,
    writes: Vec<Vec<u8, MAX_COMMAND_BYTES>, N>,
    reads: usize,
    fail_writes: bool,
}

impl<const N: usize> FakeBus<N> {
    pub fn new() -> Self {
        FakeBus {
            responses: Deque::new(),
            writes: Vec::new(),
            reads: 0,
            fail_writes: false,
        }
    }

    pub fn with_response(&mut self, data: &[u8]) {
        self.responses.push_back(Vec::from_slice(data).unwrap()).unwrap();
    }

    /// Queues the identity and calibration responses of a healthy device.
    pub fn with_device(&mut self, id: [u8; 2], otp: [[u8; 3]; 4]) {
        self.with_response(&id);
        for word in otp {
            self.with_response(&word);
        }
    }

    pub fn failing_writes(&mut self) {
        self.fail_writes = true;
    }

    pub fn writes(&self) -> &[Vec<u8, MAX_COMMAND_BYTES>] {
        &self.writes
    }

    pub fn reads(&self) -> usize {
        self.reads
    }

    pub fn pending_responses(&self) -> usize {
        self.responses.len()
    }
}

impl<const N: usize> Bus for FakeBus<N> {
    type Error = ();

    async fn write(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(());
        }
        self.writes.push(Vec::from_slice(data).unwrap()).unwrap();

        Ok(())
    }

    async fn read(&mut self, data: &mut [u8]) -> Result<(), Self::Error> {
        let response = self.responses.pop_front().ok_or(())?;
        assert_eq!(
            data.len(),
            response.len(),
            "read of {} bytes, queued response has {}",
            data.len(),
            response.len()
        );
        data.copy_from_slice(&response);
        self.reads += 1;

        Ok(())
    }
}

/// Manually driven clock with nanosecond resolution.
#[derive(Default)]
pub struct FakeClock {
    now_ns: Cell<u64>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance_ns(ms * 1_000_000);
    }

    pub fn advance_ns(&self, ns: u64) {
        self.now_ns.set(self.now_ns.get() + ns);
    }
}

impl Clock for &FakeClock {
    fn now_ms(&mut self) -> u64 {
        self.now_ns.get() / 1_000_000
    }
}

/// Delay that completes immediately and moves a [`FakeClock`] forward by the requested time.
pub struct FakeDelay<'a> {
    clock: &'a FakeClock,
    total_ns: u64,
}

impl<'a> FakeDelay<'a> {
    pub fn new(clock: &'a FakeClock) -> Self {
        Self { clock, total_ns: 0 }
    }

    /// Total time slept through this delay.
    pub fn total_ns(&self) -> u64 {
        self.total_ns
    }
}

impl DelayNs for FakeDelay<'_> {
    async fn delay_ns(&mut self, ns: u32) {
        self.total_ns += ns as u64;
        self.clock.advance_ns(ns as u64);
    }
}
