//! # machine
//!
//! The microcontroller itself, as far as the host can fake it: one thread,
//! a timer that overflows every tick period, and a watchdog counter. The
//! timer handler only ever runs between two foreground passes, never in the
//! middle of one, which is the same guarantee an interrupt gives the
//! foreground on the board as far as the shared state is concerned.
use crate::adc::AnalogSampler;
use crate::config::Config;
use crate::foreground::{Foreground, Pass};
use crate::reseed::PseudoRandom;
use crate::scheduler::TickScheduler;
use crate::watchdog::WatchdogState;
use log::{info, warn};
use std::time::{Duration, Instant};

/// why the main loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Halt {
    /// quit key
    Quit,
    /// the foreground stopped checking in; boot again from scratch
    WatchdogReset,
    /// ran for as many ticks as asked
    TickLimit,
}

/// the free-running overflow timer
#[derive(Debug)]
pub struct TickTimer {
    period: Duration,
    next_due: Instant,
    overruns: u64,
}

impl TickTimer {
    /// first overflow one period after `start`
    pub fn new(period: Duration, start: Instant) -> Self {
        TickTimer {
            period,
            next_due: start + period,
            overruns: 0,
        }
    }

    /// has the timer overflowed by `now`? Overflows that were missed
    /// altogether are counted, not queued.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        let period = self.period.as_nanos().max(1);
        let missed = (now - self.next_due).as_nanos() / period;
        let missed = u32::try_from(missed).unwrap_or(u32::MAX);
        self.overruns = self.overruns.saturating_add(u64::from(missed));
        self.next_due += self.period * missed.saturating_add(1);
        true
    }

    pub fn overruns(&self) -> u64 {
        self.overruns
    }
}

/// the random source the first field comes from: the floating ADC input,
/// unless a seed was given
pub fn seed_source(
    sampler: &mut dyn AnalogSampler,
    config: &Config,
    seed: Option<u64>,
) -> PseudoRandom {
    match seed {
        Some(seed) => {
            info!("seeded from {}", seed);
            PseudoRandom::from_seed(seed)
        }
        None => {
            let reading = sampler.sample(config.seed_channel);
            info!("seeded from channel {} reading {}", config.seed_channel, reading);
            PseudoRandom::from_reading(reading)
        }
    }
}

pub struct Machine<'a> {
    scheduler: TickScheduler<'a>,
    foreground: Foreground<'a>,
    watchdog: &'a WatchdogState,
    timer: TickTimer,
    tick_period: Duration,
    watchdog_timeout: Option<Duration>,
    ticks: u64,
    reported_overruns: u64,
}

impl<'a> Machine<'a> {
    pub fn new(
        config: &Config,
        scheduler: TickScheduler<'a>,
        foreground: Foreground<'a>,
        watchdog: &'a WatchdogState,
    ) -> Machine<'a> {
        Machine {
            scheduler,
            foreground,
            watchdog,
            timer: TickTimer::new(config.tick_period, Instant::now()),
            tick_period: config.tick_period,
            watchdog_timeout: if config.use_watchdog {
                Some(config.watchdog_timeout)
            } else {
                None
            },
            ticks: 0,
            reported_overruns: 0,
        }
    }

    /// power-on: matrix and field, timer started, watchdog last
    pub fn boot(&mut self, now: Instant) {
        self.watchdog.disarm();
        self.scheduler.boot();
        self.timer = TickTimer::new(self.tick_period, now);
        self.ticks = 0;
        self.reported_overruns = 0;
        if let Some(timeout) = self.watchdog_timeout {
            self.foreground.enable_watchdog(timeout);
        }
    }

    /// ticks handled since boot
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scheduler(&self) -> &TickScheduler<'a> {
        &self.scheduler
    }

    /// one foreground pass, with the tick handled first if the timer has
    /// overflowed by `now`
    pub fn step(&mut self, now: Instant) -> Option<Halt> {
        if self.watchdog.expired(now) {
            warn!("watchdog reset after {} ticks", self.ticks);
            self.watchdog.disarm();
            return Some(Halt::WatchdogReset);
        }

        if self.timer.poll(now) {
            self.scheduler.on_tick();
            self.ticks += 1;
            let overruns = self.timer.overruns();
            if overruns > self.reported_overruns {
                warn!(
                    "tick overrun: {} overflow(s) missed, {} in total",
                    overruns - self.reported_overruns,
                    overruns
                );
                self.reported_overruns = overruns;
            }
        }

        match self.foreground.iterate() {
            Pass::Continue => None,
            Pass::Quit => Some(Halt::Quit),
        }
    }

    /// run until something stops the machine
    pub fn main_loop(&mut self, max_ticks: Option<u64>) -> Halt {
        loop {
            if let Some(limit) = max_ticks {
                if self.ticks >= limit {
                    return Halt::TickLimit;
                }
            }
            if let Some(halt) = self.step(Instant::now()) {
                return halt;
            }
        }
    }
}
