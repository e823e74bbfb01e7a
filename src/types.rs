use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Five ASCII digit US zip code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ZipCode(String);

impl ZipCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ZipCode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() == 5 && s.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(s.to_string()))
        } else {
            Err(ValidationError::ZipCode)
        }
    }
}

impl std::fmt::Display for ZipCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which statistics sections the source should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataType {
    #[default]
    All,
    Sale,
    Rental,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::All => "All",
            DataType::Sale => "Sale",
            DataType::Rental => "Rental",
        }
    }
}

impl FromStr for DataType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "All" => Ok(DataType::All),
            "Sale" => Ok(DataType::Sale),
            "Rental" => Ok(DataType::Rental),
            _ => Err(ValidationError::DataType),
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Months of history to request, 1..=60.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryRange(u8);

impl HistoryRange {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 60;

    pub fn new(months: i64) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&months) {
            Ok(Self(months as u8))
        } else {
            Err(ValidationError::HistoryRange)
        }
    }

    pub fn months(&self) -> u8 {
        self.0
    }
}

impl Default for HistoryRange {
    fn default() -> Self {
        Self(12)
    }
}

impl FromStr for HistoryRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let months = s.trim().parse::<i64>().map_err(|_| ValidationError::HistoryRange)?;
        Self::new(months)
    }
}

// ---------------------------------------------------------------------------
// Qualitative labels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MarketVelocity {
    #[serde(rename = "Very Fast")]
    VeryFast,
    Fast,
    Moderate,
    Slow,
    #[serde(rename = "Very Slow")]
    VerySlow,
    Unknown,
}

impl std::fmt::Display for MarketVelocity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketVelocity::VeryFast => "Very Fast",
            MarketVelocity::Fast => "Fast",
            MarketVelocity::Moderate => "Moderate",
            MarketVelocity::Slow => "Slow",
            MarketVelocity::VerySlow => "Very Slow",
            MarketVelocity::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MarketTemperature {
    Hot,
    Warm,
    Cool,
    #[default]
    Unknown,
}

impl std::fmt::Display for MarketTemperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            MarketTemperature::Hot => "Hot",
            MarketTemperature::Warm => "Warm",
            MarketTemperature::Cool => "Cool",
            MarketTemperature::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InvestmentPotential {
    High,
    Moderate,
    Low,
    #[default]
    Unknown,
}

impl std::fmt::Display for InvestmentPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            InvestmentPotential::High => "High",
            InvestmentPotential::Moderate => "Moderate",
            InvestmentPotential::Low => "Low",
            InvestmentPotential::Unknown => "Unknown",
        };
        write!(f, "{s}")
    }
}

// ---------------------------------------------------------------------------
// Serialization helpers
// ---------------------------------------------------------------------------

/// Serializes a missing market side as `{}` rather than `null`, so consumers
/// can tell "section not fetched" apart from a populated record.
pub fn none_as_empty_map<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Serialize,
    S: Serializer,
{
    use serde::ser::SerializeMap;

    match value {
        Some(v) => v.serialize(serializer),
        None => serializer.serialize_map(Some(0))?.end(),
    }
}
