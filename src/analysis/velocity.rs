use crate::config::velocity_thresholds::*;
use crate::types::MarketVelocity;

/// Classify how quickly listings transact from average days on market.
/// Upper bounds are inclusive: exactly 30 days is still `VeryFast`.
pub fn classify_velocity(avg_days_on_market: Option<f64>) -> MarketVelocity {
    let Some(days) = avg_days_on_market else {
        return MarketVelocity::Unknown;
    };

    if days <= VERY_FAST_MAX {
        MarketVelocity::VeryFast
    } else if days <= FAST_MAX {
        MarketVelocity::Fast
    } else if days <= MODERATE_MAX {
        MarketVelocity::Moderate
    } else if days <= SLOW_MAX {
        MarketVelocity::Slow
    } else {
        MarketVelocity::VerySlow
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_average_is_unknown() {
        assert_eq!(classify_velocity(None), MarketVelocity::Unknown);
    }

    #[test]
    fn boundaries_fall_into_the_faster_bucket() {
        assert_eq!(classify_velocity(Some(30.0)), MarketVelocity::VeryFast);
        assert_eq!(classify_velocity(Some(60.0)), MarketVelocity::Fast);
        assert_eq!(classify_velocity(Some(90.0)), MarketVelocity::Moderate);
        assert_eq!(classify_velocity(Some(120.0)), MarketVelocity::Slow);
    }

    #[test]
    fn just_past_each_boundary_moves_down_one_bucket() {
        assert_eq!(classify_velocity(Some(30.5)), MarketVelocity::Fast);
        assert_eq!(classify_velocity(Some(60.1)), MarketVelocity::Moderate);
        assert_eq!(classify_velocity(Some(91.0)), MarketVelocity::Slow);
        assert_eq!(classify_velocity(Some(120.01)), MarketVelocity::VerySlow);
    }

    #[test]
    fn zero_and_negative_days_are_very_fast() {
        assert_eq!(classify_velocity(Some(0.0)), MarketVelocity::VeryFast);
        assert_eq!(classify_velocity(Some(-5.0)), MarketVelocity::VeryFast);
    }

    #[test]
    fn label_never_gets_faster_as_days_increase() {
        fn rank(v: MarketVelocity) -> u8 {
            match v {
                MarketVelocity::VeryFast => 0,
                MarketVelocity::Fast => 1,
                MarketVelocity::Moderate => 2,
                MarketVelocity::Slow => 3,
                MarketVelocity::VerySlow => 4,
                MarketVelocity::Unknown => unreachable!(),
            }
        }

        let mut previous = 0;
        for tenth in 0..=2000 {
            let current = rank(classify_velocity(Some(tenth as f64 / 10.0)));
            assert!(current >= previous, "regressed at {} days", tenth as f64 / 10.0);
            previous = current;
        }
        assert_eq!(previous, 4);
    }
}
