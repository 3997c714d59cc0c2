//! # snapshot
//!
//! Everything that crosses between the tick and the foreground loop.
//!
//! The tick publishes the generation count and raises `ready`; the
//! foreground takes the value and lowers it. The count is a 16-bit atomic,
//! so a reader sees either the old value or the new one, never half of
//! each. Store order is value then flag (Release), and the reader clears the
//! flag before loading the value (Acquire), so whatever the reader gets is
//! at least as new as the notification it consumed. Several ticks between
//! reads collapse into one.
//!
//! The other direction is a single reseed-request line, raised by the
//! foreground and consumed by the next tick.
use std::sync::atomic::{AtomicBool, AtomicU16, Ordering};

pub struct SnapshotChannel {
    generation: AtomicU16,
    ready: AtomicBool,
    reseed_requested: AtomicBool,
}

impl Default for SnapshotChannel {
    fn default() -> Self {
        SnapshotChannel::new()
    }
}

impl SnapshotChannel {
    pub const fn new() -> Self {
        SnapshotChannel {
            generation: AtomicU16::new(0),
            ready: AtomicBool::new(false),
            reseed_requested: AtomicBool::new(false),
        }
    }

    /// tick side: make a new generation count visible
    pub fn publish(&self, generation: u16) {
        self.generation.store(generation, Ordering::Relaxed);
        self.ready.store(true, Ordering::Release);
    }

    /// foreground side: the latest count, if one arrived since the last take
    pub fn take(&self) -> Option<u16> {
        if self.ready.swap(false, Ordering::Acquire) {
            Some(self.generation.load(Ordering::Relaxed))
        } else {
            None
        }
    }

    /// is there a count waiting to be taken?
    pub fn pending(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// foreground side: ask the tick to throw the field away
    pub fn request_reseed(&self) {
        self.reseed_requested.store(true, Ordering::Release);
    }

    /// tick side: consume a pending reseed request
    pub fn take_reseed_request(&self) -> bool {
        self.reseed_requested.swap(false, Ordering::Acquire)
    }

    /// back to power-on state
    pub fn clear(&self) {
        self.generation.store(0, Ordering::Relaxed);
        self.ready.store(false, Ordering::Release);
        self.reseed_requested.store(false, Ordering::Release);
    }
}
