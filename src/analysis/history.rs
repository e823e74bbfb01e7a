use serde::Serialize;
use serde_json::Number;

use crate::payload::{fields, RawMarketPayload, Section};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleHistoryRecord {
    pub date: Option<String>,
    pub average_price: Option<Number>,
    pub median_price: Option<Number>,
    pub price_per_sqft: Option<Number>,
    pub days_on_market: Option<Number>,
    pub new_listings: Option<Number>,
    pub total_listings: Option<Number>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RentalHistoryRecord {
    pub date: Option<String>,
    pub average_rent: Option<Number>,
    pub median_rent: Option<Number>,
    pub rent_per_sqft: Option<Number>,
    pub days_on_market: Option<Number>,
    pub new_listings: Option<Number>,
    pub total_listings: Option<Number>,
}

/// Per-period series for both sides, in the order the source published them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct HistoricalTrends {
    pub sale_history: Vec<SaleHistoryRecord>,
    pub rental_history: Vec<RentalHistoryRecord>,
}

pub fn extract_historical_trends(payload: &RawMarketPayload) -> HistoricalTrends {
    let sale_history: Vec<SaleHistoryRecord> = payload
        .sale()
        .and_then(|s| s.history())
        .map(|entries| entries.map(|e| sale_record(&e)).collect())
        .unwrap_or_default();

    let rental_history: Vec<RentalHistoryRecord> = payload
        .rental()
        .and_then(|r| r.history())
        .map(|entries| entries.map(|e| rental_record(&e)).collect())
        .unwrap_or_default();

    HistoricalTrends {
        sale_history,
        rental_history,
    }
}

fn sale_record(entry: &Section<'_>) -> SaleHistoryRecord {
    SaleHistoryRecord {
        date: entry.text(fields::DATE),
        average_price: entry.number(fields::AVERAGE_PRICE),
        median_price: entry.number(fields::MEDIAN_PRICE),
        price_per_sqft: entry.number(fields::AVERAGE_PRICE_PER_SQFT),
        days_on_market: entry.number(fields::AVERAGE_DOM),
        new_listings: entry.number(fields::NEW_LISTINGS),
        total_listings: entry.number(fields::TOTAL_LISTINGS),
    }
}

fn rental_record(entry: &Section<'_>) -> RentalHistoryRecord {
    RentalHistoryRecord {
        date: entry.text(fields::DATE),
        average_rent: entry.number(fields::AVERAGE_RENT),
        median_rent: entry.number(fields::MEDIAN_RENT),
        rent_per_sqft: entry.number(fields::AVERAGE_RENT_PER_SQFT),
        days_on_market: entry.number(fields::AVERAGE_DOM),
        new_listings: entry.number(fields::NEW_LISTINGS),
        total_listings: entry.number(fields::TOTAL_LISTINGS),
    }
}
