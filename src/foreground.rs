//! # foreground
//!
//! The main loop: whatever time the tick doesn't take. It only ever sees the
//! published generation count, and only ever asks for a reseed; the field
//! belongs to the tick.
use crate::input::{Input, Key};
use crate::seven_seg::{DisplayStatus, NumericDisplay};
use crate::snapshot::SnapshotChannel;
use crate::watchdog::Watchdog;
use log::{debug, warn};

/// what one pass round the loop did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Continue,
    /// quit key; host only
    Quit,
}

pub struct Foreground<'a> {
    display: &'a mut dyn NumericDisplay,
    watchdog: &'a mut dyn Watchdog,
    input: &'a mut dyn Input,
    channel: &'a SnapshotChannel,
    shown: u16,
}

impl<'a> Foreground<'a> {
    pub fn new(
        display: &'a mut dyn NumericDisplay,
        watchdog: &'a mut dyn Watchdog,
        input: &'a mut dyn Input,
        channel: &'a SnapshotChannel,
    ) -> Foreground<'a> {
        Foreground {
            display,
            watchdog,
            input,
            channel,
            shown: 0,
        }
    }

    /// arm the watchdog; done once, just before the loop starts
    pub fn enable_watchdog(&mut self, timeout: std::time::Duration) {
        self.watchdog.enable(timeout);
    }

    /// the count currently on the readout
    pub fn shown(&self) -> u16 {
        self.shown
    }

    /// one pass: input, fresh count, render, watchdog. Nothing in here is
    /// fatal.
    pub fn iterate(&mut self) -> Pass {
        let mut pass = Pass::Continue;
        match self.input.poll() {
            Ok(Some(Key::Reset)) => {
                debug!("reset button");
                self.channel.request_reseed();
            }
            Ok(Some(Key::Quit)) => pass = Pass::Quit,
            Ok(None) => {}
            Err(e) => warn!("input: {}", e),
        }

        if let Some(generation) = self.channel.take() {
            self.shown = generation;
        }

        match self.display.render_number(self.shown) {
            Ok(DisplayStatus::Shown) => {}
            Ok(DisplayStatus::OutOfRange) => {
                debug!("{} won't fit on the readout", self.shown);
                self.channel.request_reseed();
            }
            Err(e) => warn!("readout: {}", e),
        }

        self.watchdog.acknowledge();
        pass
    }
}
