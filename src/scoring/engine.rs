/// The three S/P/D ratings of one record. Each is absent until answered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ratings {
    pub severity: Option<i64>,
    pub probability: Option<i64>,
    pub detectability: Option<i64>,
}

impl Ratings {
    pub fn new(severity: Option<i64>, probability: Option<i64>, detectability: Option<i64>) -> Self {
        Self {
            severity,
            probability,
            detectability,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.severity.is_some() && self.probability.is_some() && self.detectability.is_some()
    }
}

/// Severity x Probability x Detectability.
///
/// Absent unless all three ratings are present. An overflowing product is
/// also absent rather than wrapped.
pub fn risk_score(ratings: &Ratings) -> Option<i64> {
    let s = ratings.severity?;
    let p = ratings.probability?;
    let d = ratings.detectability?;
    s.checked_mul(p)?.checked_mul(d)
}

/// Residual ratings once mitigation is recorded.
///
/// No independent re-rating is captured: residual S/P/D are the inherent
/// ratings at the moment mitigation is saved.
pub fn residual_from(inherent: &Ratings) -> Option<Ratings> {
    if inherent.is_complete() {
        Some(*inherent)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_full_ratings_score() {
        let ratings = Ratings::new(Some(5), Some(4), Some(3));
        assert_eq!(risk_score(&ratings), Some(60));
    }

    #[test]
    fn test_missing_rating_has_no_score() {
        assert_eq!(risk_score(&Ratings::new(Some(5), None, Some(3))), None);
        assert_eq!(risk_score(&Ratings::new(None, Some(4), Some(3))), None);
        assert_eq!(risk_score(&Ratings::new(Some(5), Some(4), None)), None);
        assert_eq!(risk_score(&Ratings::default()), None);
    }

    #[test]
    fn test_zero_rating_scores_zero() {
        assert_eq!(risk_score(&Ratings::new(Some(0), Some(4), Some(3))), Some(0));
    }

    #[test]
    fn test_overflow_is_absent() {
        let ratings = Ratings::new(Some(i64::MAX), Some(2), Some(1));
        assert_eq!(risk_score(&ratings), None);
    }

    #[test]
    fn test_residual_copies_inherent() {
        let inherent = Ratings::new(Some(5), Some(4), Some(3));
        let residual = residual_from(&inherent).unwrap();
        assert_eq!(residual, inherent);
        assert_eq!(risk_score(&residual), Some(60));
    }

    #[test]
    fn test_residual_requires_complete_ratings() {
        assert!(residual_from(&Ratings::new(Some(5), Some(4), None)).is_none());
    }

    proptest! {
        #[test]
        fn prop_score_is_product(s in 0i64..1000, p in 0i64..1000, d in 0i64..1000) {
            let ratings = Ratings::new(Some(s), Some(p), Some(d));
            prop_assert_eq!(risk_score(&ratings), Some(s * p * d));
        }

        #[test]
        fn prop_any_absent_rating_means_no_score(
            s in proptest::option::of(0i64..100),
            p in proptest::option::of(0i64..100),
            d in proptest::option::of(0i64..100),
        ) {
            let ratings = Ratings::new(s, p, d);
            let complete = s.is_some() && p.is_some() && d.is_some();
            prop_assert_eq!(risk_score(&ratings).is_some(), complete);
        }
    }
}
