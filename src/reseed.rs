//! # reseed
//!
//! Fresh random fields. The firmware seeded its generator once at power-on
//! from the noisy low bits of an unconnected ADC input; `PseudoRandom` does
//! the same from whatever reading it's handed.
use crate::grid::{Grid, WIDTH};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// gives out random bytes, one column's worth at a time
pub trait RandomSource {
    fn next_byte(&mut self) -> u8;
}

/// the production source: seeded once, then asked for bytes forever
pub struct PseudoRandom {
    rng: StdRng,
}

impl PseudoRandom {
    pub fn from_seed(seed: u64) -> Self {
        PseudoRandom {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// seed from an analog reading; only the low byte carries any noise
    pub fn from_reading(reading: u16) -> Self {
        Self::from_seed(u64::from(reading & 0xff))
    }
}

impl RandomSource for PseudoRandom {
    fn next_byte(&mut self) -> u8 {
        self.rng.random()
    }
}

/// plays back a fixed list of bytes, then repeats the last one; for tests
/// and for reproducing a particular field
pub struct ScriptedSource {
    bytes: Vec<u8>,
    position: usize,
}

impl ScriptedSource {
    pub fn new(bytes: &[u8]) -> Self {
        ScriptedSource {
            bytes: Vec::from(bytes),
            position: 0,
        }
    }
}

impl RandomSource for ScriptedSource {
    fn next_byte(&mut self) -> u8 {
        let b = match self.bytes.get(self.position) {
            Some(b) => *b,
            None => self.bytes.last().copied().unwrap_or(0),
        };
        self.position += 1;
        b
    }
}

/// overwrite every column with a random byte
pub fn randomize(grid: &mut Grid, source: &mut dyn RandomSource) {
    for x in 0..WIDTH {
        grid.set_column(x, source.next_byte());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_randomize_fills_every_column() {
        let mut g = Grid::empty();
        let script: Vec<u8> = (1..=WIDTH as u8).collect();
        randomize(&mut g, &mut ScriptedSource::new(&script));
        assert_eq!(&g.columns()[..], &script[..]);
    }

    #[test]
    fn test_randomize_replaces_old_state() {
        let mut g = Grid::from_columns([0xff; WIDTH]);
        randomize(&mut g, &mut ScriptedSource::new(&[0]));
        assert_eq!(g, Grid::empty());
    }

    #[test]
    fn test_scripted_source_repeats_last_byte() {
        let mut s = ScriptedSource::new(&[1, 2]);
        assert_eq!(
            [s.next_byte(), s.next_byte(), s.next_byte(), s.next_byte()],
            [1, 2, 2, 2]
        );
        let mut empty = ScriptedSource::new(&[]);
        assert_eq!(empty.next_byte(), 0);
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = Grid::empty();
        let mut b = Grid::empty();
        randomize(&mut a, &mut PseudoRandom::from_seed(42));
        randomize(&mut b, &mut PseudoRandom::from_seed(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_reading_uses_low_byte_only() {
        let mut a = Grid::empty();
        let mut b = Grid::empty();
        randomize(&mut a, &mut PseudoRandom::from_reading(0x0312));
        randomize(&mut b, &mut PseudoRandom::from_reading(0x0012));
        assert_eq!(a, b);
    }

    #[test]
    fn test_successive_fields_differ() {
        let mut source = PseudoRandom::from_seed(7);
        let mut a = Grid::empty();
        let mut b = Grid::empty();
        randomize(&mut a, &mut source);
        randomize(&mut b, &mut source);
        assert_ne!(a, b);
        assert!(a.population() > 0);
    }
}
