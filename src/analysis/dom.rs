use serde::Serialize;
use serde_json::Number;

use crate::analysis::velocity::classify_velocity;
use crate::payload::{fields, RawMarketPayload, Section};
use crate::types::{none_as_empty_map, MarketVelocity};

/// Days-on-market statistics for one side of the market.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomStats {
    pub average_days: Option<Number>,
    pub median_days: Option<Number>,
    pub min_days: Option<Number>,
    pub max_days: Option<Number>,
    pub new_listings: Option<Number>,
    pub total_listings: Option<Number>,
    pub market_velocity: MarketVelocity,
}

/// `None` means the side was not in the payload at all (serialized as `{}`);
/// a present side with no average carries `MarketVelocity::Unknown` instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomSummary {
    #[serde(serialize_with = "none_as_empty_map")]
    pub sale_dom: Option<DomStats>,
    #[serde(serialize_with = "none_as_empty_map")]
    pub rental_dom: Option<DomStats>,
}

pub fn extract_dom_trends(payload: &RawMarketPayload) -> DomSummary {
    DomSummary {
        sale_dom: payload.sale().map(|s| dom_stats(&s)),
        rental_dom: payload.rental().map(|r| dom_stats(&r)),
    }
}

fn dom_stats(section: &Section<'_>) -> DomStats {
    let average_days = section.number(fields::AVERAGE_DOM);
    let market_velocity = classify_velocity(average_days.as_ref().and_then(Number::as_f64));
    DomStats {
        average_days,
        median_days: section.number(fields::MEDIAN_DOM),
        min_days: section.number(fields::MIN_DOM),
        max_days: section.number(fields::MAX_DOM),
        new_listings: section.number(fields::NEW_LISTINGS),
        total_listings: section.number(fields::TOTAL_LISTINGS),
        market_velocity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_both_sides_with_velocity() {
        let payload = RawMarketPayload::new(json!({
            "saleData": {
                "averageDaysOnMarket": 40,
                "medianDaysOnMarket": 35,
                "minDaysOnMarket": 1,
                "maxDaysOnMarket": 210,
                "newListings": 18,
                "totalListings": 96
            },
            "rentalData": {"averageDaysOnMarket": 125.5, "totalListings": 300}
        }));

        let dom = extract_dom_trends(&payload);
        let sale = dom.sale_dom.unwrap();
        assert_eq!(sale.average_days, Some(Number::from(40)));
        assert_eq!(sale.median_days, Some(Number::from(35)));
        assert_eq!(sale.min_days, Some(Number::from(1)));
        assert_eq!(sale.max_days, Some(Number::from(210)));
        assert_eq!(sale.new_listings, Some(Number::from(18)));
        assert_eq!(sale.total_listings, Some(Number::from(96)));
        assert_eq!(sale.market_velocity, MarketVelocity::Fast);

        let rental = dom.rental_dom.unwrap();
        assert_eq!(rental.market_velocity, MarketVelocity::VerySlow);
        assert_eq!(rental.new_listings, None);
        assert_eq!(rental.total_listings, Some(Number::from(300)));
    }

    #[test]
    fn present_section_without_average_is_unknown_not_empty() {
        let payload = RawMarketPayload::new(json!({"saleData": {"totalListings": 4}}));
        let dom = extract_dom_trends(&payload);

        let sale = dom.sale_dom.as_ref().unwrap();
        assert_eq!(sale.average_days, None);
        assert_eq!(sale.market_velocity, MarketVelocity::Unknown);
        assert!(dom.rental_dom.is_none());

        let value = serde_json::to_value(&dom).unwrap();
        assert_eq!(value["sale_dom"]["market_velocity"], json!("Unknown"));
        assert_eq!(value["rental_dom"], json!({}));
    }

    #[test]
    fn listing_counts_are_copied_as_published() {
        let payload = RawMarketPayload::new(json!({
            "saleData": {"averageDaysOnMarket": 62.5, "newListings": 12.5, "totalListings": 0}
        }));
        let value = serde_json::to_value(extract_dom_trends(&payload)).unwrap();
        assert_eq!(value["sale_dom"]["new_listings"].to_string(), "12.5");
        assert_eq!(value["sale_dom"]["total_listings"].to_string(), "0");
        assert_eq!(value["sale_dom"]["average_days"].to_string(), "62.5");
        assert_eq!(value["sale_dom"]["market_velocity"], json!("Moderate"));
    }
}
