//! # seven_seg
//!
//! The multiplexed 7-segment readout for the generation count. Only one
//! digit is lit at a time; the driver walks the digits fast enough that they
//! all look on.
//!
//!  ---A---
//! |       |
//! F       B
//! |___G___|
//! |       |
//! E       C
//! |___D___|
//!
//! Segment masks are `0bABCDEFG`. Position 0 is the least significant
//! (rightmost) digit.
use crate::Result;

/// segment masks for 0-9
pub const DIGIT_SEGMENTS: [u8; 10] = [
    0b111_1110, // 0
    0b011_0000, // 1
    0b110_1101, // 2
    0b111_1001, // 3
    0b011_0011, // 4
    0b101_1011, // 5
    0b101_1111, // 6
    0b111_0000, // 7
    0b111_1111, // 8
    0b111_0011, // 9
];

/// 'E', shown when the number won't fit
pub const ERROR_SEGMENTS: u8 = 0b100_1111;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    Error,
    Blank,
}

impl Glyph {
    /// which segments to light; anything that isn't 0-9 shows as an error
    pub fn segments(&self) -> u8 {
        match self {
            Glyph::Digit(d) => match DIGIT_SEGMENTS.get(*d as usize) {
                Some(s) => *s,
                None => ERROR_SEGMENTS,
            },
            Glyph::Error => ERROR_SEGMENTS,
            Glyph::Blank => 0,
        }
    }
}

/// what happened to the last number rendered
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayStatus {
    Shown,
    /// too many digits; the error glyph went up instead
    OutOfRange,
}

/// the largest value `digits` digits can show
pub fn max_displayable(digits: u8) -> u32 {
    10u32.saturating_pow(u32::from(digits)).saturating_sub(1)
}

/// A multiplexed numeric display. Implementors light one digit per
/// `render_digit` call and own their inter-digit timing; `render_number`
/// does the formatting on top.
pub trait NumericDisplay {
    /// how many digits are fitted
    fn digit_count(&self) -> u8;

    /// light a single digit
    fn render_digit(&mut self, glyph: Glyph, position: u8) -> Result<()>;

    /// called after a full pass over the digits
    fn present(&mut self) -> Result<()> {
        Ok(())
    }

    /// show a number, least significant digit first
    fn render_number(&mut self, value: u16) -> Result<DisplayStatus> {
        let digits = self.digit_count();
        if u32::from(value) > max_displayable(digits) {
            self.render_digit(Glyph::Error, 0)?;
            for position in 1..digits {
                self.render_digit(Glyph::Blank, position)?;
            }
            self.present()?;
            return Ok(DisplayStatus::OutOfRange);
        }

        let mut remaining = value;
        for position in 0..digits {
            self.render_digit(Glyph::Digit((remaining % 10) as u8), position)?;
            remaining /= 10;
        }
        self.present()?;
        Ok(DisplayStatus::Shown)
    }
}

/// keeps the last glyph for each position; useful for testing the foreground
pub struct DummyNumericDisplay {
    pub glyphs: Vec<Glyph>,
    pub presents: usize,
    pub fail: bool,
}

impl DummyNumericDisplay {
    pub fn new(digits: u8) -> Self {
        DummyNumericDisplay {
            glyphs: vec![Glyph::Blank; digits as usize],
            presents: 0,
            fail: false,
        }
    }

    /// the digits as they'd read left to right
    pub fn reading(&self) -> String {
        self.glyphs
            .iter()
            .rev()
            .map(|g| match g {
                Glyph::Digit(d) => char::from(b'0' + d),
                Glyph::Error => 'E',
                Glyph::Blank => ' ',
            })
            .collect()
    }
}

impl NumericDisplay for DummyNumericDisplay {
    fn digit_count(&self) -> u8 {
        self.glyphs.len() as u8
    }

    fn render_digit(&mut self, glyph: Glyph, position: u8) -> Result<()> {
        if self.fail {
            let e = std::io::Error::new(std::io::ErrorKind::Other, "display unplugged");
            return Err(e.into());
        }
        if let Some(g) = self.glyphs.get_mut(position as usize) {
            *g = glyph;
        }
        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.presents += 1;
        Ok(())
    }
}
