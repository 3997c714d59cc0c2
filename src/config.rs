//! Board configuration

use crate::{Error, Result};
use std::time::Duration;

/// 8 MHz clock, /16384 prescaler, 8-bit timer overflow
pub const TICK_PERIOD: Duration = Duration::from_micros(524_288);

/// Hardware choices for one board. The defaults are the reference build.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Time between timer overflows, i.e. between generations.
    pub tick_period: Duration,

    /// Digits fitted to the generation readout.
    pub digits: u8,

    /// How long each digit stays lit while multiplexing.
    pub digit_delay: Duration,

    /// ADC channel wired to the brightness pot.
    pub brightness_channel: u8,

    /// Floating ADC channel read once at power-on to seed the generator.
    pub seed_channel: u8,

    /// Brightness reading is divided by this to get a duty level.
    pub brightness_divisor: u16,

    /// Whether the watchdog is armed at all.
    pub use_watchdog: bool,

    /// Watchdog timeout once armed.
    pub watchdog_timeout: Duration,

    /// Whether the generation-reset button is fitted.
    pub reset_button: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_period: TICK_PERIOD,
            digits: 3,
            digit_delay: Duration::from_millis(1),
            brightness_channel: 6,
            seed_channel: 9,
            brightness_divisor: 64,
            use_watchdog: true,
            watchdog_timeout: Duration::from_secs(1),
            reset_button: true,
        }
    }
}

impl Config {
    /// Digits are multiplexed inside the foreground loop, so a full pass has
    /// to fit well inside the watchdog timeout.
    pub fn refresh_time(&self) -> Duration {
        self.digit_delay * u32::from(self.digits)
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.tick_period.is_zero() {
            return Err(Error::Config("tick period must be > 0"));
        }
        if !(1..=5).contains(&self.digits) {
            return Err(Error::Config("digits must be in 1..=5"));
        }
        if usize::from(self.brightness_channel) >= crate::adc::ADC_CHANNELS
            || usize::from(self.seed_channel) >= crate::adc::ADC_CHANNELS
        {
            return Err(Error::Config("no such ADC channel"));
        }
        if self.brightness_divisor == 0 {
            return Err(Error::Config("brightness divisor must be > 0"));
        }
        if self.use_watchdog && self.refresh_time() >= self.watchdog_timeout {
            return Err(Error::Config(
                "digit refresh takes longer than the watchdog timeout",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_tick_period_is_half_a_second() {
        assert_eq!(TICK_PERIOD.as_micros(), 16_384 * 256 / 8);
    }

    #[test]
    fn test_refresh_time() {
        assert_eq!(Config::default().refresh_time(), Duration::from_millis(3));
    }

    #[test]
    fn test_rejects_bad_values() {
        let bad = [
            Config {
                tick_period: Duration::ZERO,
                ..Config::default()
            },
            Config {
                digits: 0,
                ..Config::default()
            },
            Config {
                digits: 6,
                ..Config::default()
            },
            Config {
                brightness_channel: 11,
                ..Config::default()
            },
            Config {
                brightness_divisor: 0,
                ..Config::default()
            },
            Config {
                digit_delay: Duration::from_millis(400),
                ..Config::default()
            },
        ];
        for c in bad.iter() {
            assert!(matches!(c.validate(), Err(Error::Config(_))), "{:?}", c);
        }
    }

    #[test]
    fn test_slow_digits_fine_without_watchdog() {
        let c = Config {
            digit_delay: Duration::from_millis(400),
            use_watchdog: false,
            ..Config::default()
        };
        assert!(c.validate().is_ok());
    }
}
