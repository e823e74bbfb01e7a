use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::dom::{extract_dom_trends, DomSummary};
use crate::analysis::history::{extract_historical_trends, HistoricalTrends};
use crate::analysis::insights::{calculate_market_insights, MarketInsights};
use crate::analysis::trends::{extract_price_trends, TrendSummary};
use crate::fetcher::{MarketDataSource, MarketStatsRequest};
use crate::payload::RawMarketPayload;
use crate::types::{DataType, HistoryRange, ZipCode};

/// Full analysis of one zip code. `raw_data` is the untouched source payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketAnalysis {
    pub zip_code: ZipCode,
    pub analysis_date: DateTime<Utc>,
    pub price_trends: TrendSummary,
    pub dom_trends: DomSummary,
    pub historical_trends: HistoricalTrends,
    pub market_insights: MarketInsights,
    pub raw_data: RawMarketPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedAnalysis {
    pub error: String,
    pub zip_code: ZipCode,
    pub analysis_date: DateTime<Utc>,
}

/// Either a complete analysis or the reason there is none. Never partial.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Completed(Box<MarketAnalysis>),
    Failed(FailedAnalysis),
}

impl AnalysisOutcome {
    pub fn zip_code(&self) -> &ZipCode {
        match self {
            AnalysisOutcome::Completed(a) => &a.zip_code,
            AnalysisOutcome::Failed(f) => &f.zip_code,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed(_))
    }

    fn failed(zip_code: &ZipCode, error: String, analysis_date: DateTime<Utc>) -> Self {
        AnalysisOutcome::Failed(FailedAnalysis {
            error,
            zip_code: zip_code.clone(),
            analysis_date,
        })
    }
}

/// Fetches once per call and runs every extraction stage over that payload.
pub struct MarketAnalyzer<S> {
    source: S,
}

impl<S: MarketDataSource> MarketAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Analyze `zip_code` over the last `history_range` months. Source
    /// failures come back as [`AnalysisOutcome::Failed`], never as `Err`.
    pub async fn analyze_market_trends(
        &self,
        zip_code: &ZipCode,
        history_range: HistoryRange,
    ) -> AnalysisOutcome {
        let request = MarketStatsRequest {
            zip_code: zip_code.clone(),
            data_type: DataType::All,
            history_range,
        };

        match self.source.fetch_market_stats(&request).await {
            Ok(payload) => analyze_payload(zip_code, payload, Utc::now()),
            Err(e) => {
                warn!(zip_code = %zip_code, "market analysis failed: {e}");
                AnalysisOutcome::failed(zip_code, e.to_string(), Utc::now())
            }
        }
    }
}

/// The pure part of an analysis: shape check, then every stage over the same
/// payload. Identical payloads give identical outcomes apart from the date.
pub fn analyze_payload(
    zip_code: &ZipCode,
    payload: RawMarketPayload,
    analysis_date: DateTime<Utc>,
) -> AnalysisOutcome {
    if let Err(e) = payload.check_shape() {
        warn!(zip_code = %zip_code, "unexpected market payload shape: {e}");
        return AnalysisOutcome::failed(zip_code, e.to_string(), analysis_date);
    }

    let price_trends = extract_price_trends(&payload);
    let dom_trends = extract_dom_trends(&payload);
    let historical_trends = extract_historical_trends(&payload);
    let market_insights = calculate_market_insights(&payload);

    info!(
        zip_code = %zip_code,
        temperature = %market_insights.market_temperature,
        investment = %market_insights.investment_potential,
        sale_periods = historical_trends.sale_history.len(),
        rental_periods = historical_trends.rental_history.len(),
        "market analysis complete"
    );

    AnalysisOutcome::Completed(Box::new(MarketAnalysis {
        zip_code: zip_code.clone(),
        analysis_date,
        price_trends,
        dom_trends,
        historical_trends,
        market_insights,
        raw_data: payload,
    }))
}
