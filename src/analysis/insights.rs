use serde::Serialize;

use crate::config::{temperature_thresholds, yield_thresholds};
use crate::payload::{fields, RawMarketPayload};
use crate::types::{InvestmentPotential, MarketTemperature};

pub const HOT_MARKET_ADVICE: &str = "Consider quick decision-making for purchases";
pub const WARM_MARKET_ADVICE: &str = "Good market conditions for both buying and selling";
pub const COOL_MARKET_ADVICE: &str = "Buyer-friendly market with more negotiation power";
pub const HIGH_YIELD_ADVICE: &str = "Strong rental yield potential";
pub const MODERATE_YIELD_ADVICE: &str = "Decent rental investment opportunity";
pub const LOW_YIELD_ADVICE: &str = "Consider other investment markets";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MarketInsights {
    pub market_temperature: MarketTemperature,
    pub investment_potential: InvestmentPotential,
    /// Annual gross rental yield in percent, when both averages were usable.
    pub rental_yield: Option<f64>,
    /// Temperature advice first, then investment advice.
    pub recommendations: Vec<String>,
}

/// Derive temperature and investment potential straight from the payload.
///
/// Unlike the extractors, missing averages read as 0 here: a sale section with
/// no `averageDaysOnMarket` is classified Hot, and a zero rent or price skips
/// the yield evaluation entirely.
pub fn calculate_market_insights(payload: &RawMarketPayload) -> MarketInsights {
    let mut insights = MarketInsights::default();

    if let Some(sale) = payload.sale() {
        let avg_dom = sale.number_or_zero(fields::AVERAGE_DOM);
        let (temperature, advice) = classify_temperature(avg_dom);
        insights.market_temperature = temperature;
        insights.recommendations.push(advice.to_string());
    }

    if let (Some(rental), Some(sale)) = (payload.rental(), payload.sale()) {
        let avg_rent = rental.number_or_zero(fields::AVERAGE_RENT);
        let avg_price = sale.number_or_zero(fields::AVERAGE_PRICE);

        if avg_rent > 0.0 && avg_price > 0.0 {
            let annual_yield = rental_yield(avg_rent, avg_price);
            let (potential, advice) = classify_investment(annual_yield);
            insights.investment_potential = potential;
            insights.rental_yield = Some(annual_yield);
            insights.recommendations.push(advice.to_string());
        }
    }

    insights
}

/// Annual gross yield in percent: twelve months of rent over purchase price.
pub fn rental_yield(monthly_rent: f64, price: f64) -> f64 {
    monthly_rent * 12.0 / price * 100.0
}

fn classify_temperature(avg_dom: f64) -> (MarketTemperature, &'static str) {
    if avg_dom <= temperature_thresholds::HOT_MAX {
        (MarketTemperature::Hot, HOT_MARKET_ADVICE)
    } else if avg_dom <= temperature_thresholds::WARM_MAX {
        (MarketTemperature::Warm, WARM_MARKET_ADVICE)
    } else {
        (MarketTemperature::Cool, COOL_MARKET_ADVICE)
    }
}

fn classify_investment(annual_yield: f64) -> (InvestmentPotential, &'static str) {
    if annual_yield >= yield_thresholds::HIGH_MIN {
        (InvestmentPotential::High, HIGH_YIELD_ADVICE)
    } else if annual_yield >= yield_thresholds::MODERATE_MIN {
        (InvestmentPotential::Moderate, MODERATE_YIELD_ADVICE)
    } else {
        (InvestmentPotential::Low, LOW_YIELD_ADVICE)
    }
}
