//! # scheduler
//!
//! Everything that happens on a timer overflow. On the board this is the
//! whole body of the timer ISR; it runs to completion, it never nests, and
//! it is the only code that touches the field or the activity counters.
//!
//! Order within a tick:
//!
//!  1. bump the generation count
//!  2. push the field to the matrix (so the matrix always shows last tick's
//!     result, never a half-built one)
//!  3. step the automaton, or reseed if asked to / if the field is boring
//!  4. commit the step, unless a reseed replaced it
//!  5. publish the count for the foreground loop
//!  6. resample the brightness pot
use crate::adc::{brightness_level, AnalogSampler};
use crate::automaton;
use crate::config::Config;
use crate::grid::{Grid, WIDTH};
use crate::matrix::{MatrixDriver, MAX_BRIGHTNESS};
use crate::reseed::{self, RandomSource};
use crate::snapshot::SnapshotChannel;
use crate::stagnation::{ReseedDecision, StagnationDetector};
use log::{info, trace};

/// why the field was thrown away
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReseedCause {
    /// power-on
    Boot,
    /// too many near-frozen generations
    LowActivity,
    /// too many slowly-churning generations
    MediumActivity,
    /// the foreground loop asked: reset button, or the count outgrew the
    /// readout
    Requested,
}

/// what one tick did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// the count published at the end of the tick
    pub generation: u16,
    /// cells flipped by this tick's step; None when a request pre-empted it
    pub changed: Option<u16>,
    pub reseed: Option<ReseedCause>,
    pub brightness: u8,
}

pub struct TickScheduler<'a> {
    grid: Grid,
    scratch: Grid,
    detector: StagnationDetector,
    generation: u16,
    matrix: &'a mut dyn MatrixDriver,
    sampler: &'a mut dyn AnalogSampler,
    random: &'a mut dyn RandomSource,
    channel: &'a SnapshotChannel,
    brightness_channel: u8,
    brightness_divisor: u16,
}

impl<'a> TickScheduler<'a> {
    pub fn new(
        config: &Config,
        matrix: &'a mut dyn MatrixDriver,
        sampler: &'a mut dyn AnalogSampler,
        random: &'a mut dyn RandomSource,
        channel: &'a SnapshotChannel,
    ) -> TickScheduler<'a> {
        TickScheduler {
            grid: Grid::empty(),
            scratch: Grid::empty(),
            detector: StagnationDetector::new(),
            generation: 0,
            matrix,
            sampler,
            random,
            channel,
            brightness_channel: config.brightness_channel,
            brightness_divisor: config.brightness_divisor,
        }
    }

    /// power-on: matrix up, nothing pending between the contexts, first
    /// random field in place
    pub fn boot(&mut self) {
        self.matrix.init();
        self.channel.clear();
        self.reseed(ReseedCause::Boot);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u16 {
        self.generation
    }

    pub fn detector(&self) -> &StagnationDetector {
        &self.detector
    }

    /// fresh random field; generation and both activity counters back to 0
    pub fn reseed(&mut self, cause: ReseedCause) {
        reseed::randomize(&mut self.grid, &mut *self.random);
        self.generation = 0;
        self.detector.reset();
        info!(
            "reseeded ({:?}), {} cells alive",
            cause,
            self.grid.population()
        );
    }

    /// the timer overflow handler
    pub fn on_tick(&mut self) -> TickReport {
        self.generation = self.generation.saturating_add(1);
        self.push_frame();

        let (changed, reseed) = if self.channel.take_reseed_request() {
            (None, Some(ReseedCause::Requested))
        } else {
            let changed = automaton::step(&self.grid, &mut self.scratch);
            let cause = match self.detector.update(changed) {
                ReseedDecision::Continue => None,
                ReseedDecision::LowActivity => Some(ReseedCause::LowActivity),
                ReseedDecision::MediumActivity => Some(ReseedCause::MediumActivity),
            };
            (Some(changed), cause)
        };

        match reseed {
            Some(cause) => self.reseed(cause),
            None => self.grid.commit(&self.scratch),
        }

        self.channel.publish(self.generation);
        let brightness = self.resample_brightness();
        trace!(
            "tick: generation {} changed {:?} brightness {}",
            self.generation,
            changed,
            brightness
        );

        TickReport {
            generation: self.generation,
            changed,
            reseed,
            brightness,
        }
    }

    fn push_frame(&mut self) {
        for (x, mask) in self.grid.columns().iter().enumerate() {
            self.matrix.write_column(x, *mask);
        }
    }

    fn resample_brightness(&mut self) -> u8 {
        let reading = self.sampler.sample(self.brightness_channel);
        let level = brightness_level(reading, self.brightness_divisor).min(MAX_BRIGHTNESS);
        self.matrix.set_brightness(level);
        level
    }
}
