//! # matrix
//!
//! The LED matrix as the tick sees it: a column-addressed write and a global
//! brightness. On the real board this is an HT1632C on a bit-banged serial
//! line; here `RamMatrix` writes into a shared block of display RAM that the
//! terminal panel reads back when it redraws.
use crate::grid::WIDTH;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

/// brightness levels run 0..=MAX_BRIGHTNESS (16 PWM steps)
pub const MAX_BRIGHTNESS: u8 = 15;

/// Used by the tick to put a frame on the matrix. It doesn't need to know
/// how the matrix is wired.
pub trait MatrixDriver {
    /// called once at power-on
    fn init(&mut self);

    /// write one column; bit y lights row y
    fn write_column(&mut self, column: usize, mask: u8);

    /// set the global duty level, 0..=MAX_BRIGHTNESS
    fn set_brightness(&mut self, level: u8);
}

/// the matrix controller's display RAM and PWM register. Every cell is its
/// own atomic, so the panel may read while the tick writes; a redraw may mix
/// two frames for one refresh, same as the real chip.
pub struct MatrixRam {
    columns: [AtomicU8; WIDTH],
    brightness: AtomicU8,
    powered: AtomicBool,
}

impl Default for MatrixRam {
    fn default() -> Self {
        MatrixRam::new()
    }
}

impl MatrixRam {
    pub fn new() -> Self {
        MatrixRam {
            columns: std::array::from_fn(|_| AtomicU8::new(0)),
            brightness: AtomicU8::new(MAX_BRIGHTNESS),
            powered: AtomicBool::new(false),
        }
    }

    /// copy of what's currently latched, column by column
    pub fn frame(&self) -> [u8; WIDTH] {
        std::array::from_fn(|x| self.columns[x].load(Ordering::Relaxed))
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.load(Ordering::Relaxed)
    }

    pub fn powered(&self) -> bool {
        self.powered.load(Ordering::Acquire)
    }
}

/// host stand-in for the matrix controller
pub struct RamMatrix {
    ram: Arc<MatrixRam>,
}

impl RamMatrix {
    pub fn new(ram: Arc<MatrixRam>) -> Self {
        RamMatrix { ram }
    }
}

impl MatrixDriver for RamMatrix {
    fn init(&mut self) {
        for c in self.ram.columns.iter() {
            c.store(0, Ordering::Relaxed);
        }
        self.ram.brightness.store(MAX_BRIGHTNESS, Ordering::Relaxed);
        self.ram.powered.store(true, Ordering::Release);
    }

    fn write_column(&mut self, column: usize, mask: u8) {
        self.ram.columns[column % WIDTH].store(mask, Ordering::Relaxed);
    }

    fn set_brightness(&mut self, level: u8) {
        self.ram
            .brightness
            .store(level.min(MAX_BRIGHTNESS), Ordering::Relaxed);
    }
}

/// records everything written to it; useful for testing the tick
#[derive(Default)]
pub struct DummyMatrix {
    pub initialised: bool,
    pub frame: [u8; WIDTH],
    pub writes: Vec<(usize, u8)>,
    pub brightness: Vec<u8>,
}

impl DummyMatrix {
    pub fn new() -> Self {
        DummyMatrix::default()
    }
}

impl MatrixDriver for DummyMatrix {
    fn init(&mut self) {
        self.initialised = true;
    }

    fn write_column(&mut self, column: usize, mask: u8) {
        self.frame[column % WIDTH] = mask;
        self.writes.push((column, mask));
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness.push(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_matrix_latches_columns() {
        let ram = Arc::new(MatrixRam::new());
        let mut m = RamMatrix::new(Arc::clone(&ram));
        m.init();
        m.write_column(0, 0x81);
        m.write_column(31, 0x7e);
        let frame = ram.frame();
        assert_eq!(frame[0], 0x81);
        assert_eq!(frame[31], 0x7e);
        assert_eq!(frame[1..31], [0; 30]);
    }

    #[test]
    fn test_init_blanks_and_powers_up() {
        let ram = Arc::new(MatrixRam::new());
        let mut m = RamMatrix::new(Arc::clone(&ram));
        m.write_column(4, 0xff);
        assert!(!ram.powered());
        m.init();
        assert!(ram.powered());
        assert_eq!(ram.frame(), [0; WIDTH]);
    }

    #[test]
    fn test_brightness_is_clamped() {
        let ram = Arc::new(MatrixRam::new());
        let mut m = RamMatrix::new(Arc::clone(&ram));
        m.set_brightness(3);
        assert_eq!(ram.brightness(), 3);
        m.set_brightness(200);
        assert_eq!(ram.brightness(), MAX_BRIGHTNESS);
    }

    #[test]
    fn test_dummy_records_writes() {
        let mut m = DummyMatrix::new();
        m.init();
        m.write_column(2, 0x0f);
        m.set_brightness(9);
        assert!(m.initialised);
        assert_eq!(m.writes, vec![(2, 0x0f)]);
        assert_eq!(m.frame[2], 0x0f);
        assert_eq!(m.brightness, vec![9]);
    }
}
