use serde::{Deserialize, Serialize};

use crate::error::{EvalError, Result};

/// Vocal / Dance / Visual status of an idol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeTriple {
    pub vocal: u32,
    pub dance: u32,
    pub visual: u32,
}

impl AttributeTriple {
    pub fn new(vocal: u32, dance: u32, visual: u32) -> Self {
        Self {
            vocal,
            dance,
            visual,
        }
    }

    pub fn sum(&self) -> u64 {
        self.vocal as u64 + self.dance as u64 + self.visual as u64
    }

    fn map(self, f: impl Fn(u32) -> u32) -> Self {
        Self {
            vocal: f(self.vocal),
            dance: f(self.dance),
            visual: f(self.visual),
        }
    }

    /// Adds `bonus` to every status and caps each at `ceiling`.
    pub fn with_bonus_clamped(self, bonus: u32, ceiling: u32) -> Self {
        self.map(|v| v.saturating_add(bonus).min(ceiling))
    }

    /// Checks every status lies in `1..=ceiling`.
    pub fn validate(&self, ceiling: u32) -> Result<()> {
        for (name, value) in self.named() {
            if value == 0 {
                return Err(EvalError::InvalidInput(format!(
                    "{} must be 1 or more",
                    name
                )));
            }
            if value > ceiling {
                return Err(EvalError::InvalidInput(format!(
                    "{} must be {} or less (got {})",
                    name, ceiling, value
                )));
            }
        }
        Ok(())
    }

    /// Takes each non-zero value from `extracted`, keeping `self` where the
    /// extraction left a slot at 0.
    pub fn overlay(self, extracted: AttributeTriple) -> Self {
        let pick = |prior: u32, read: u32| if read > 0 { read } else { prior };
        Self {
            vocal: pick(self.vocal, extracted.vocal),
            dance: pick(self.dance, extracted.dance),
            visual: pick(self.visual, extracted.visual),
        }
    }

    /// Number of slots holding a non-zero value.
    pub fn filled_slots(&self) -> usize {
        self.named().iter().filter(|(_, v)| *v > 0).count()
    }

    fn named(&self) -> [(&'static str, u32); 3] {
        [
            ("vocal", self.vocal),
            ("dance", self.dance),
            ("visual", self.visual),
        ]
    }
}

/// Evaluation points earned by status: `floor(2.3 * (vo + da + vi))`.
pub fn attribute_score(attrs: &AttributeTriple) -> u64 {
    attrs.sum() * 23 / 10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_and_clamp() {
        let attrs = AttributeTriple::new(1100, 1480, 1500);
        let clamped = attrs.with_bonus_clamped(30, 1500);
        assert_eq!(clamped, AttributeTriple::new(1130, 1500, 1500));
        // Source triple is untouched
        assert_eq!(attrs.vocal, 1100);
    }

    #[test]
    fn test_clamp_without_bonus() {
        let attrs = AttributeTriple::new(1700, 1801, 10);
        assert_eq!(
            attrs.with_bonus_clamped(0, 1800),
            AttributeTriple::new(1700, 1800, 10)
        );
    }

    #[test]
    fn test_attribute_score_floors() {
        assert_eq!(attribute_score(&AttributeTriple::new(1130, 1130, 1130)), 7797);
        // 2.3 * 1 = 2.3
        assert_eq!(attribute_score(&AttributeTriple::new(1, 0, 0)), 2);
        assert_eq!(attribute_score(&AttributeTriple::default()), 0);
    }

    #[test]
    fn test_attribute_score_monotonic() {
        let mut previous = 0;
        for sum in 0..5000u32 {
            let score = attribute_score(&AttributeTriple::new(sum, 0, 0));
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_validate() {
        assert!(AttributeTriple::new(1, 1500, 800).validate(1500).is_ok());
        assert!(AttributeTriple::new(0, 1500, 800).validate(1500).is_err());
        assert!(matches!(
            AttributeTriple::new(1, 1501, 800).validate(1500),
            Err(EvalError::InvalidInput(_))
        ));
        assert!(AttributeTriple::new(1, 1501, 1800).validate(1800).is_ok());
    }

    #[test]
    fn test_overlay_keeps_prior_on_zero() {
        let prior = AttributeTriple::new(1100, 1200, 1300);
        let extracted = AttributeTriple::new(1234, 0, 987);
        assert_eq!(
            prior.overlay(extracted),
            AttributeTriple::new(1234, 1200, 987)
        );
        assert_eq!(extracted.filled_slots(), 2);
    }
}
