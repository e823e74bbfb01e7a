use serde::Serialize;
use serde_json::Number;

use crate::payload::{fields, RawMarketPayload, Section};
use crate::types::none_as_empty_map;

/// Average/median/min/max group, copied as published.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatRange {
    pub average: Option<Number>,
    pub median: Option<Number>,
    pub min: Option<Number>,
    pub max: Option<Number>,
}

impl StatRange {
    fn read(section: &Section<'_>, average: &str, median: &str, min: &str, max: &str) -> Self {
        Self {
            average: section.number(average),
            median: section.number(median),
            min: section.number(min),
            max: section.number(max),
        }
    }

    fn square_footage(section: &Section<'_>) -> Self {
        Self::read(
            section,
            fields::AVERAGE_SQFT,
            fields::MEDIAN_SQFT,
            fields::MIN_SQFT,
            fields::MAX_SQFT,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleTrends {
    pub average_price: Option<Number>,
    pub median_price: Option<Number>,
    pub min_price: Option<Number>,
    pub max_price: Option<Number>,
    pub price_per_sqft: StatRange,
    pub square_footage: StatRange,
    pub last_updated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalTrends {
    pub average_rent: Option<Number>,
    pub median_rent: Option<Number>,
    pub min_rent: Option<Number>,
    pub max_rent: Option<Number>,
    pub rent_per_sqft: StatRange,
    pub square_footage: StatRange,
    pub last_updated: Option<String>,
}

/// Normalized price and rent statistics. A `None` side serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendSummary {
    #[serde(serialize_with = "none_as_empty_map")]
    pub sale_trends: Option<SaleTrends>,
    #[serde(serialize_with = "none_as_empty_map")]
    pub rental_trends: Option<RentalTrends>,
}

pub fn extract_price_trends(payload: &RawMarketPayload) -> TrendSummary {
    TrendSummary {
        sale_trends: payload.sale().map(|s| sale_trends(&s)),
        rental_trends: payload.rental().map(|r| rental_trends(&r)),
    }
}

fn sale_trends(sale: &Section<'_>) -> SaleTrends {
    SaleTrends {
        average_price: sale.number(fields::AVERAGE_PRICE),
        median_price: sale.number(fields::MEDIAN_PRICE),
        min_price: sale.number(fields::MIN_PRICE),
        max_price: sale.number(fields::MAX_PRICE),
        price_per_sqft: StatRange::read(
            sale,
            fields::AVERAGE_PRICE_PER_SQFT,
            fields::MEDIAN_PRICE_PER_SQFT,
            fields::MIN_PRICE_PER_SQFT,
            fields::MAX_PRICE_PER_SQFT,
        ),
        square_footage: StatRange::square_footage(sale),
        last_updated: sale.text(fields::LAST_UPDATED_DATE),
    }
}

fn rental_trends(rental: &Section<'_>) -> RentalTrends {
    RentalTrends {
        average_rent: rental.number(fields::AVERAGE_RENT),
        median_rent: rental.number(fields::MEDIAN_RENT),
        min_rent: rental.number(fields::MIN_RENT),
        max_rent: rental.number(fields::MAX_RENT),
        rent_per_sqft: StatRange::read(
            rental,
            fields::AVERAGE_RENT_PER_SQFT,
            fields::MEDIAN_RENT_PER_SQFT,
            fields::MIN_RENT_PER_SQFT,
            fields::MAX_RENT_PER_SQFT,
        ),
        square_footage: StatRange::square_footage(rental),
        last_updated: rental.text(fields::LAST_UPDATED_DATE),
    }
}
