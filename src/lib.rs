//! # lifematrix
//!
//! Conway's Game of Life on a 32x8 LED matrix, wrapped top to bottom and
//! side to side, with the generation count on a three-digit 7-segment
//! readout.
//!
//! ## Design
//!
//! * two execution contexts, as on the board:
//!    - the tick: runs on every timer overflow (~0.52 s), owns the field,
//!      steps the automaton and decides when to reseed
//!    - the foreground: everything else; multiplexes the readout, reads the
//!      buttons, feeds the watchdog
//! * the only state shared between them is the generation count and a
//!   "please reseed" line, both in `SnapshotChannel`
//! * hardware behind traits so the panel can be a terminal, a log or a test
//!   dummy
//! * the timer interrupt is emulated: it only fires between two foreground
//!   passes, never in the middle of one. Wallclock timing looks right, but a
//!   slow pass delays the tick rather than being interrupted by it
//!
//! Model
//!
//! Machine
//!  |-- config, timer, watchdog state
//!  |-- tick scheduler(matrix, brightness pot, random source, channel)
//!  |    |-- grid, scratch grid
//!  |    `-- stagnation detector
//!  |-- foreground(readout, watchdog, buttons, channel)
//!  `-- main loop
//!       |-- if watchdog.expired() { reboot from power-on }
//!       |-- if timer.overflowed() { scheduler.on_tick() }
//!       `-- foreground.iterate()
pub mod adc;
pub mod automaton;
pub mod config;
pub mod display;
mod error;
pub mod foreground;
pub mod grid;
pub mod input;
pub mod machine;
pub mod matrix;
pub mod reseed;
pub mod scheduler;
pub mod seven_seg;
pub mod snapshot;
pub mod stagnation;
pub mod watchdog;

pub use crate::error::{Error, Result};
