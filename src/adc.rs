//! # adc
//!
//! 10-bit analog sampling. On the board, channel 6 is the brightness pot and
//! channel 9 floats, which makes its low bits a usable seed.
use rand::rngs::StdRng;
use rand::Rng;

/// the ATtiny26 has ADC0..ADC10
pub const ADC_CHANNELS: usize = 11;
/// full-scale reading
pub const ADC_MAX: u16 = 1023;

/// Reads one channel. Conversion is a short, bounded busy-wait, so this
/// never fails.
pub trait AnalogSampler {
    fn sample(&mut self, channel: u8) -> u16;
}

/// map a brightness reading to a matrix duty level
pub fn brightness_level(reading: u16, divisor: u16) -> u8 {
    (reading.min(ADC_MAX) / divisor.max(1)).min(u16::from(u8::MAX)) as u8
}

/// host stand-in for the ADC: channels with a level set read back that level
/// with a little jitter, the rest read as noise
pub struct NoiseSampler {
    rng: StdRng,
    levels: [Option<u16>; ADC_CHANNELS],
    jitter: u16,
}

impl NoiseSampler {
    pub fn new(rng: StdRng) -> Self {
        NoiseSampler {
            rng,
            levels: [None; ADC_CHANNELS],
            jitter: 4,
        }
    }

    /// wire a steady voltage (e.g. a pot) to a channel
    pub fn with_level(mut self, channel: u8, reading: u16) -> Self {
        if let Some(slot) = self.levels.get_mut(channel as usize) {
            *slot = Some(reading.min(ADC_MAX));
        }
        self
    }
}

impl AnalogSampler for NoiseSampler {
    fn sample(&mut self, channel: u8) -> u16 {
        match self.levels.get(channel as usize).copied().flatten() {
            Some(level) => {
                let low = level.saturating_sub(self.jitter);
                let high = (level + self.jitter).min(ADC_MAX);
                self.rng.random_range(low..=high)
            }
            None => self.rng.random_range(0..=ADC_MAX),
        }
    }
}

/// always reads the same values; for testing
pub struct FixedSampler {
    pub readings: [u16; ADC_CHANNELS],
    pub samples: Vec<u8>,
}

impl FixedSampler {
    pub fn new(reading: u16) -> Self {
        FixedSampler {
            readings: [reading; ADC_CHANNELS],
            samples: Vec::new(),
        }
    }
}

impl AnalogSampler for FixedSampler {
    fn sample(&mut self, channel: u8) -> u16 {
        self.samples.push(channel);
        self.readings[channel as usize % ADC_CHANNELS]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_brightness_scale() {
        assert_eq!(brightness_level(0, 64), 0);
        assert_eq!(brightness_level(63, 64), 0);
        assert_eq!(brightness_level(64, 64), 1);
        assert_eq!(brightness_level(1023, 64), 15);
    }

    #[test]
    fn test_brightness_ignores_out_of_range_reading() {
        assert_eq!(brightness_level(u16::MAX, 64), 15);
        // a zero divisor is treated as one rather than dividing by zero
        assert_eq!(brightness_level(200, 0), 200);
    }

    #[test]
    fn test_noise_stays_in_range() {
        let mut s = NoiseSampler::new(StdRng::seed_from_u64(1));
        for _ in 0..1000 {
            assert!(s.sample(9) <= ADC_MAX);
        }
    }

    #[test]
    fn test_level_with_jitter() {
        let mut s = NoiseSampler::new(StdRng::seed_from_u64(2)).with_level(6, 512);
        for _ in 0..100 {
            let r = s.sample(6);
            assert!((508..=516).contains(&r), "{}", r);
        }
    }

    #[test]
    fn test_level_near_full_scale() {
        let mut s = NoiseSampler::new(StdRng::seed_from_u64(3)).with_level(6, 5000);
        for _ in 0..100 {
            assert!(s.sample(6) <= ADC_MAX);
        }
    }

    #[test]
    fn test_fixed_sampler_logs_channels() {
        let mut s = FixedSampler::new(700);
        assert_eq!(s.sample(6), 700);
        assert_eq!(s.sample(9), 700);
        assert_eq!(s.samples, vec![6, 9]);
    }
}
