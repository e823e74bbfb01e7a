use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use tracing::info;

use crate::analysis::{AnalysisOutcome, MarketAnalyzer};
use crate::api::health::{HealthResponse, HealthState};
use crate::error::AppError;
use crate::fetcher::{MarketDataSource, MarketStatsRequest};
use crate::payload::RawMarketPayload;
use crate::types::{DataType, HistoryRange, ZipCode};

pub struct ApiState<S> {
    pub analyzer: Arc<MarketAnalyzer<S>>,
    pub health: Arc<HealthState>,
    /// Used when a request carries no `history_range`.
    pub default_history_range: HistoryRange,
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            analyzer: Arc::clone(&self.analyzer),
            health: Arc::clone(&self.health),
            default_history_range: self.default_history_range,
        }
    }
}

pub fn router<S: MarketDataSource + 'static>(state: ApiState<S>) -> Router {
    Router::new()
        .route("/health", get(get_health::<S>))
        .route("/markets/:zip_code/analysis", get(get_market_analysis::<S>))
        .route("/markets/:zip_code/stats", get(get_market_stats::<S>))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Query param structs
// ---------------------------------------------------------------------------

// Raw strings so bad values surface as our validation messages rather than
// axum's generic query rejection.

#[derive(Deserialize)]
pub struct AnalysisQuery {
    pub history_range: Option<String>,
}

#[derive(Deserialize)]
pub struct StatsQuery {
    pub data_type: Option<String>,
    pub history_range: Option<String>,
}

fn history_range_or(raw: Option<&str>, default: HistoryRange) -> Result<HistoryRange, AppError> {
    match raw {
        Some(s) => Ok(s.parse::<HistoryRange>()?),
        None => Ok(default),
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn get_health<S: MarketDataSource + 'static>(
    State(state): State<ApiState<S>>,
) -> Json<HealthResponse> {
    Json(state.health.snapshot())
}

async fn get_market_analysis<S: MarketDataSource + 'static>(
    State(state): State<ApiState<S>>,
    Path(zip_code): Path<String>,
    Query(params): Query<AnalysisQuery>,
) -> Result<(StatusCode, Json<AnalysisOutcome>), AppError> {
    let zip_code = zip_code.parse::<ZipCode>()?;
    let history_range =
        history_range_or(params.history_range.as_deref(), state.default_history_range)?;

    let outcome = state
        .analyzer
        .analyze_market_trends(&zip_code, history_range)
        .await;
    state.health.record_analysis(outcome.is_failed());

    let status = if outcome.is_failed() {
        StatusCode::BAD_GATEWAY
    } else {
        StatusCode::OK
    };
    Ok((status, Json(outcome)))
}

async fn get_market_stats<S: MarketDataSource + 'static>(
    State(state): State<ApiState<S>>,
    Path(zip_code): Path<String>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<RawMarketPayload>, AppError> {
    let request = MarketStatsRequest {
        zip_code: zip_code.parse::<ZipCode>()?,
        data_type: match params.data_type.as_deref() {
            Some(s) => s.parse::<DataType>()?,
            None => DataType::All,
        },
        history_range: history_range_or(
            params.history_range.as_deref(),
            state.default_history_range,
        )?,
    };

    info!(zip_code = %request.zip_code, data_type = %request.data_type, "raw market stats requested");
    let payload = state.analyzer.source().fetch_market_stats(&request).await?;
    Ok(Json(payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetcher::testing::StaticSource;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn state(source: StaticSource) -> ApiState<StaticSource> {
        ApiState {
            analyzer: Arc::new(MarketAnalyzer::new(source)),
            health: Arc::new(HealthState::new()),
            default_history_range: HistoryRange::default(),
        }
    }

    async fn call(state: ApiState<StaticSource>, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    fn json_body(body: &[u8]) -> Value {
        serde_json::from_slice(body).unwrap()
    }

    #[tokio::test]
    async fn analysis_returns_completed_outcome() {
        let st = state(StaticSource::ok(json!({
            "saleData": {"averagePrice": 300000, "averageDaysOnMarket": 50},
            "rentalData": {"averageRent": 2500}
        })));
        let (status, body) = call(st.clone(), "/markets/90210/analysis?history_range=6").await;

        assert_eq!(status, StatusCode::OK);
        let value = json_body(&body);
        assert_eq!(value["zip_code"], json!("90210"));
        assert_eq!(value["market_insights"]["investment_potential"], json!("High"));
        assert_eq!(value["market_insights"]["market_temperature"], json!("Hot"));

        let requests = st.analyzer.source().requests.lock().unwrap();
        assert_eq!(requests[0].history_range.months(), 6);
        assert_eq!(requests[0].data_type, DataType::All);
        assert_eq!(st.health.snapshot().analyses_completed, 1);
    }

    #[tokio::test]
    async fn analysis_failure_is_bad_gateway_with_error_body() {
        let st = state(StaticSource::failing(FetchError::RateLimited));
        let (status, body) = call(st.clone(), "/markets/10001/analysis").await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let value = json_body(&body);
        assert_eq!(value["error"], json!("Rate limit exceeded. Please try again later."));
        assert_eq!(value["zip_code"], json!("10001"));
        assert!(value.get("price_trends").is_none());
        assert_eq!(st.health.snapshot().analyses_failed, 1);
    }

    #[tokio::test]
    async fn invalid_inputs_are_rejected_before_fetching() {
        let st = state(StaticSource::ok(json!({})));

        let (status, body) = call(st.clone(), "/markets/9021/analysis").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(String::from_utf8(body).unwrap(), "zip_code must be a valid 5-digit US zip code");

        let (status, _) = call(st.clone(), "/markets/90210/analysis?history_range=61").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = call(st.clone(), "/markets/90210/stats?data_type=Lease").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(String::from_utf8(body).unwrap(), "data_type must be one of: All, Sale, Rental");

        assert!(st.analyzer.source().requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn stats_passes_the_raw_payload_through() {
        let raw = json!({"saleData": {"averagePrice": 1, "unlisted": "kept"}});
        let st = state(StaticSource::ok(raw.clone()));
        let (status, body) = call(st.clone(), "/markets/30309/stats?data_type=Sale&history_range=3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json_body(&body), raw);

        let requests = st.analyzer.source().requests.lock().unwrap();
        assert_eq!(requests[0].data_type, DataType::Sale);
        assert_eq!(requests[0].history_range.months(), 3);
    }

    #[tokio::test]
    async fn stats_maps_fetch_errors_to_status_codes() {
        for (err, expected) in [
            (FetchError::Unauthorized, StatusCode::UNAUTHORIZED),
            (FetchError::NotFound { zip_code: "30309".to_string() }, StatusCode::NOT_FOUND),
            (FetchError::RateLimited, StatusCode::TOO_MANY_REQUESTS),
            (FetchError::Network("reset".to_string()), StatusCode::BAD_GATEWAY),
        ] {
            let (status, _) = call(state(StaticSource::failing(err)), "/markets/30309/stats").await;
            assert_eq!(status, expected);
        }
    }

    #[tokio::test]
    async fn health_reports_counters() {
        let st = state(StaticSource::ok(json!({})));
        st.health.record_analysis(true);
        let (status, body) = call(st, "/health").await;

        assert_eq!(status, StatusCode::OK);
        let value = json_body(&body);
        assert_eq!(value["status"], json!("ok"));
        assert_eq!(value["analyses_failed"], json!(1));
        assert_eq!(value["analyses_completed"], json!(0));
    }
}
