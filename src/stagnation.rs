//! # stagnation
//!
//! Decides when the field has become boring. Each step's changed-cell count
//! lands in one of three brackets:
//!
//!  * low (<= 4 cells flipped)    -- nearly frozen; feeds the low counter
//!  * medium (<= 8 cells flipped) -- slow churn, e.g. a few oscillators
//!  * high                        -- chaotic; both counters bleed back down
//!
//! Once the low counter passes 42, or the medium counter passes 196, the
//! field is reseeded. Slow churn is tolerated for much longer than a frozen
//! field.
use log::trace;

/// a step flipping at most this many cells counts as low activity
pub const LOW_THRESHOLD_DIFF: u16 = 4;
/// a step flipping at most this many cells (and more than the low bracket)
/// counts as medium activity
pub const MED_THRESHOLD_DIFF: u16 = 8;
/// reseed once the low counter goes above this
pub const LOW_COUNT_LIMIT: u8 = 42;
/// reseed once the medium counter goes above this
pub const MED_COUNT_LIMIT: u16 = 196;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReseedDecision {
    /// interesting enough; commit the step
    Continue,
    /// too many near-frozen steps
    LowActivity,
    /// too many slowly-churning steps
    MediumActivity,
}

impl ReseedDecision {
    pub fn should_reseed(&self) -> bool {
        !matches!(self, ReseedDecision::Continue)
    }
}

/// the two activity counters. Both clamp at the top of their range instead of
/// wrapping, so a long run of boring steps can't roll over to look fresh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StagnationDetector {
    low: u8,
    medium: u16,
}

impl StagnationDetector {
    pub const fn new() -> Self {
        StagnationDetector { low: 0, medium: 0 }
    }

    pub fn low_count(&self) -> u8 {
        self.low
    }

    pub fn medium_count(&self) -> u16 {
        self.medium
    }

    /// feed one step's changed-cell count
    pub fn update(&mut self, changed: u16) -> ReseedDecision {
        if changed <= LOW_THRESHOLD_DIFF {
            self.low = self.low.saturating_add(1);
        } else if changed <= MED_THRESHOLD_DIFF {
            self.medium = self.medium.saturating_add(1);
        } else {
            self.low = self.low.saturating_sub(1);
            self.medium = self.medium.saturating_sub(1);
        }
        trace!(
            "changed {} -> low {} medium {}",
            changed,
            self.low,
            self.medium
        );

        // only the counter that tripped is cleared here; a reseed clears both
        if self.low > LOW_COUNT_LIMIT {
            self.low = 0;
            ReseedDecision::LowActivity
        } else if self.medium > MED_COUNT_LIMIT {
            self.medium = 0;
            ReseedDecision::MediumActivity
        } else {
            ReseedDecision::Continue
        }
    }

    pub fn reset(&mut self) {
        *self = StagnationDetector::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frozen_field_reseeds_on_tick_43() {
        let mut d = StagnationDetector::new();
        for tick in 1..=42 {
            assert_eq!(d.update(0), ReseedDecision::Continue, "tick {}", tick);
        }
        assert_eq!(d.update(0), ReseedDecision::LowActivity);
        assert_eq!(d.low_count(), 0);
    }

    #[test]
    fn test_slow_churn_reseeds_on_tick_197() {
        let mut d = StagnationDetector::new();
        for _ in 0..196 {
            assert_eq!(d.update(6), ReseedDecision::Continue);
        }
        assert_eq!(d.update(6), ReseedDecision::MediumActivity);
        assert_eq!(d.medium_count(), 0);
    }

    #[test]
    fn test_bracket_edges() {
        let mut d = StagnationDetector::new();
        d.update(LOW_THRESHOLD_DIFF);
        assert_eq!((d.low_count(), d.medium_count()), (1, 0));
        d.update(LOW_THRESHOLD_DIFF + 1);
        assert_eq!((d.low_count(), d.medium_count()), (1, 1));
        d.update(MED_THRESHOLD_DIFF);
        assert_eq!((d.low_count(), d.medium_count()), (1, 2));
        d.update(MED_THRESHOLD_DIFF + 1);
        assert_eq!((d.low_count(), d.medium_count()), (0, 1));
    }

    #[test]
    fn test_high_activity_floors_at_zero() {
        let mut d = StagnationDetector::new();
        d.update(2);
        for _ in 0..10 {
            assert_eq!(d.update(200), ReseedDecision::Continue);
        }
        assert_eq!((d.low_count(), d.medium_count()), (0, 0));
    }

    #[test]
    fn test_high_activity_delays_reseed() {
        let mut d = StagnationDetector::new();
        for _ in 0..42 {
            d.update(0);
        }
        d.update(50);
        assert_eq!(d.update(0), ReseedDecision::Continue);
        assert_eq!(d.update(0), ReseedDecision::LowActivity);
    }

    #[test]
    fn test_alternating_brackets_rise_together() {
        let mut d = StagnationDetector::new();
        let (mut low, mut medium) = (0, 0);
        let mut tripped = None;
        for (tick, changed) in [2u16, 6].iter().cycle().take(100).enumerate() {
            let decision = d.update(*changed);
            if decision.should_reseed() {
                tripped = Some((tick + 1, decision));
                break;
            }
            assert!(d.low_count() >= low);
            assert!(d.medium_count() >= medium);
            low = d.low_count();
            medium = d.medium_count();
        }
        // the 43rd low step is tick 85
        assert_eq!(tripped, Some((85, ReseedDecision::LowActivity)));
        assert_eq!(low, 42);
        assert_eq!(medium, 42);
    }

    #[test]
    fn test_trip_leaves_the_other_counter() {
        let mut d = StagnationDetector::new();
        for _ in 0..10 {
            d.update(6);
        }
        for _ in 0..43 {
            d.update(1);
        }
        assert_eq!(d.low_count(), 0);
        assert_eq!(d.medium_count(), 10);
    }

    #[test]
    fn test_reset_clears_both() {
        let mut d = StagnationDetector::new();
        d.update(1);
        d.update(7);
        d.reset();
        assert_eq!(d, StagnationDetector::new());
    }
}
