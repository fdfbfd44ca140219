use crate::models::Opportunity;

const HIGH_MIN_VOLUME: u64 = 500;
const HIGH_MAX_COMPETITION: u8 = 60;
const MEDIUM_MIN_VOLUME: u64 = 100;
const MEDIUM_MAX_COMPETITION: u8 = 75;

/// Scores a phrase from its monthly volume and competition percentage.
pub struct OpportunityClassifier;

impl OpportunityClassifier {
    /// Rules are checked in order and every bound is strict.
    pub fn classify(volume: u64, competition: u8) -> Opportunity {
        if volume > HIGH_MIN_VOLUME && competition < HIGH_MAX_COMPETITION {
            Opportunity::High
        } else if volume > MEDIUM_MIN_VOLUME && competition < MEDIUM_MAX_COMPETITION {
            Opportunity::Medium
        } else {
            Opportunity::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_cases() {
        assert_eq!(OpportunityClassifier::classify(501, 59), Opportunity::High);
        assert_eq!(OpportunityClassifier::classify(500, 0), Opportunity::Medium);
        assert_eq!(OpportunityClassifier::classify(501, 60), Opportunity::Medium);
        assert_eq!(OpportunityClassifier::classify(101, 74), Opportunity::Medium);
        assert_eq!(OpportunityClassifier::classify(101, 75), Opportunity::Low);
        assert_eq!(OpportunityClassifier::classify(100, 0), Opportunity::Low);
        assert_eq!(OpportunityClassifier::classify(0, 0), Opportunity::Low);
    }

    #[test]
    fn high_volume_with_heavy_competition_is_low() {
        assert_eq!(OpportunityClassifier::classify(50_000, 90), Opportunity::Low);
    }

    #[test]
    fn total_over_competition_range() {
        for volume in [0_u64, 1, 100, 101, 500, 501, 10_000] {
            for competition in 0..=100_u8 {
                let tier = OpportunityClassifier::classify(volume, competition);
                assert!(matches!(
                    tier,
                    Opportunity::High | Opportunity::Medium | Opportunity::Low
                ));
            }
        }
    }
}
