//! Schema-free market statistics payload and the typed view the extractors
//! read it through.
//!
//! The source does not publish every statistic for every market, so every
//! accessor here returns `Option`. What a missing value *means* is decided by
//! the caller: the extractors keep it absent, the insight engine reads it as 0.
//! Statistics stay `serde_json::Number` so they re-serialize as published.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::PayloadError;

/// Top-level section keys.
pub const SALE_DATA: &str = "saleData";
pub const RENTAL_DATA: &str = "rentalData";

/// Field names published by the source, per section and per history entry.
pub mod fields {
    pub const HISTORY: &str = "history";
    pub const DATE: &str = "date";
    pub const LAST_UPDATED_DATE: &str = "lastUpdatedDate";

    pub const AVERAGE_PRICE: &str = "averagePrice";
    pub const MEDIAN_PRICE: &str = "medianPrice";
    pub const MIN_PRICE: &str = "minPrice";
    pub const MAX_PRICE: &str = "maxPrice";
    pub const AVERAGE_PRICE_PER_SQFT: &str = "averagePricePerSquareFoot";
    pub const MEDIAN_PRICE_PER_SQFT: &str = "medianPricePerSquareFoot";
    pub const MIN_PRICE_PER_SQFT: &str = "minPricePerSquareFoot";
    pub const MAX_PRICE_PER_SQFT: &str = "maxPricePerSquareFoot";

    pub const AVERAGE_RENT: &str = "averageRent";
    pub const MEDIAN_RENT: &str = "medianRent";
    pub const MIN_RENT: &str = "minRent";
    pub const MAX_RENT: &str = "maxRent";
    pub const AVERAGE_RENT_PER_SQFT: &str = "averageRentPerSquareFoot";
    pub const MEDIAN_RENT_PER_SQFT: &str = "medianRentPerSquareFoot";
    pub const MIN_RENT_PER_SQFT: &str = "minRentPerSquareFoot";
    pub const MAX_RENT_PER_SQFT: &str = "maxRentPerSquareFoot";

    pub const AVERAGE_SQFT: &str = "averageSquareFootage";
    pub const MEDIAN_SQFT: &str = "medianSquareFootage";
    pub const MIN_SQFT: &str = "minSquareFootage";
    pub const MAX_SQFT: &str = "maxSquareFootage";

    pub const AVERAGE_DOM: &str = "averageDaysOnMarket";
    pub const MEDIAN_DOM: &str = "medianDaysOnMarket";
    pub const MIN_DOM: &str = "minDaysOnMarket";
    pub const MAX_DOM: &str = "maxDaysOnMarket";
    pub const NEW_LISTINGS: &str = "newListings";
    pub const TOTAL_LISTINGS: &str = "totalListings";

    /// Every field above that must hold a number when present.
    pub const NUMERIC: &[&str] = &[
        AVERAGE_PRICE,
        MEDIAN_PRICE,
        MIN_PRICE,
        MAX_PRICE,
        AVERAGE_PRICE_PER_SQFT,
        MEDIAN_PRICE_PER_SQFT,
        MIN_PRICE_PER_SQFT,
        MAX_PRICE_PER_SQFT,
        AVERAGE_RENT,
        MEDIAN_RENT,
        MIN_RENT,
        MAX_RENT,
        AVERAGE_RENT_PER_SQFT,
        MEDIAN_RENT_PER_SQFT,
        MIN_RENT_PER_SQFT,
        MAX_RENT_PER_SQFT,
        AVERAGE_SQFT,
        MEDIAN_SQFT,
        MIN_SQFT,
        MAX_SQFT,
        AVERAGE_DOM,
        MEDIAN_DOM,
        MIN_DOM,
        MAX_DOM,
        NEW_LISTINGS,
        TOTAL_LISTINGS,
    ];
}

/// Unmodified response body from the market statistics source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawMarketPayload(Value);

impl RawMarketPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    #[cfg(test)]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn sale(&self) -> Option<Section<'_>> {
        self.section(SALE_DATA)
    }

    pub fn rental(&self) -> Option<Section<'_>> {
        self.section(RENTAL_DATA)
    }

    fn section(&self, key: &str) -> Option<Section<'_>> {
        self.0.get(key).and_then(Value::as_object).map(Section)
    }

    /// Verifies the nesting and value types the extractors rely on. A `null`
    /// section, history or statistic counts as absent; any other value of the
    /// wrong kind is a shape violation.
    pub fn check_shape(&self) -> Result<(), PayloadError> {
        let root = self.0.as_object().ok_or(PayloadError::NotAnObject)?;

        for section in [SALE_DATA, RENTAL_DATA] {
            let data = match root.get(section) {
                None | Some(Value::Null) => continue,
                Some(Value::Object(data)) => data,
                Some(_) => return Err(PayloadError::SectionNotAnObject { section }),
            };

            if let Some(field) = first_non_numeric(data) {
                return Err(PayloadError::FieldNotANumber { section, field });
            }

            let history = match data.get(fields::HISTORY) {
                None | Some(Value::Null) => continue,
                Some(Value::Array(history)) => history,
                Some(_) => return Err(PayloadError::HistoryNotAList { section }),
            };

            for (index, entry) in history.iter().enumerate() {
                let entry = entry
                    .as_object()
                    .ok_or(PayloadError::HistoryEntryNotAnObject { section, index })?;
                if let Some(field) = first_non_numeric(entry) {
                    return Err(PayloadError::HistoryFieldNotANumber {
                        section,
                        index,
                        field,
                    });
                }
            }
        }

        Ok(())
    }
}

fn first_non_numeric(data: &Map<String, Value>) -> Option<&'static str> {
    fields::NUMERIC.iter().copied().find(|field| {
        !matches!(data.get(*field), None | Some(Value::Null) | Some(Value::Number(_)))
    })
}

/// Borrowed view over one statistics mapping: a `saleData`/`rentalData`
/// section or a single history entry.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a>(&'a Map<String, Value>);

impl<'a> Section<'a> {
    /// Numeric field exactly as published, `None` when absent or null.
    pub fn number(&self, field: &str) -> Option<Number> {
        match self.0.get(field) {
            Some(Value::Number(n)) => Some(n.clone()),
            _ => None,
        }
    }

    /// Numeric field read with absence meaning 0.
    pub fn number_or_zero(&self, field: &str) -> f64 {
        self.number(field)
            .and_then(|n| n.as_f64())
            .unwrap_or(0.0)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.0
            .get(field)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    /// History entries in source order. `None` when the section carries no
    /// history list at all; non-object entries are skipped (see
    /// [`RawMarketPayload::check_shape`]).
    pub fn history(&self) -> Option<impl Iterator<Item = Section<'a>> + 'a> {
        let entries = self.0.get(fields::HISTORY)?.as_array()?;
        Some(entries.iter().filter_map(Value::as_object).map(Section))
    }
}
