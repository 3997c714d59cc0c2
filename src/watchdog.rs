//! # watchdog
//!
//! Last-resort recovery. Once enabled, the foreground loop has to check in
//! within the timeout or the whole machine is reset from power-on.
use std::cell::Cell;
use std::time::{Duration, Instant};

/// the watchdog as the foreground loop sees it
pub trait Watchdog {
    fn enable(&mut self, timeout: Duration);
    fn acknowledge(&mut self);
}

/// The watchdog counter itself. The machine polls `expired` the way the
/// hardware counter would run down on its own.
#[derive(Default)]
pub struct WatchdogState {
    armed: Cell<Option<Armed>>,
}

#[derive(Clone, Copy)]
struct Armed {
    timeout: Duration,
    last_ack: Instant,
}

impl WatchdogState {
    pub fn new() -> Self {
        WatchdogState::default()
    }

    fn arm(&self, timeout: Duration, now: Instant) {
        self.armed.set(Some(Armed {
            timeout,
            last_ack: now,
        }));
    }

    fn feed(&self, now: Instant) {
        if let Some(mut armed) = self.armed.get() {
            armed.last_ack = now;
            self.armed.set(Some(armed));
        }
    }

    pub fn enabled(&self) -> bool {
        self.armed.get().is_some()
    }

    /// has the timeout run out by `now`? never true while disabled
    pub fn expired(&self, now: Instant) -> bool {
        match self.armed.get() {
            Some(armed) => now.saturating_duration_since(armed.last_ack) > armed.timeout,
            None => false,
        }
    }

    /// a reset turns the watchdog back off
    pub fn disarm(&self) {
        self.armed.set(None);
    }
}

/// host watchdog, backed by a shared `WatchdogState`
pub struct SoftWatchdog<'a> {
    state: &'a WatchdogState,
}

impl<'a> SoftWatchdog<'a> {
    pub fn new(state: &'a WatchdogState) -> Self {
        SoftWatchdog { state }
    }
}

impl Watchdog for SoftWatchdog<'_> {
    fn enable(&mut self, timeout: Duration) {
        self.state.arm(timeout, Instant::now());
    }

    fn acknowledge(&mut self) {
        self.state.feed(Instant::now());
    }
}

/// counts acknowledgements; for testing
#[derive(Default)]
pub struct DummyWatchdog {
    pub timeout: Option<Duration>,
    pub acks: usize,
}

impl DummyWatchdog {
    pub fn new() -> Self {
        DummyWatchdog::default()
    }
}

impl Watchdog for DummyWatchdog {
    fn enable(&mut self, timeout: Duration) {
        self.timeout = Some(timeout);
    }

    fn acknowledge(&mut self) {
        self.acks += 1;
    }
}
