use std::future::Future;

use reqwest::StatusCode;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{FetchError, Result};
use crate::payload::RawMarketPayload;
use crate::types::{DataType, HistoryRange, ZipCode};

/// One `/markets` query. Fields are pre-validated by their types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketStatsRequest {
    pub zip_code: ZipCode,
    pub data_type: DataType,
    pub history_range: HistoryRange,
}

/// Anything that can produce raw market statistics for a zip code.
/// Implementors own credentials, timeouts and any retry policy.
pub trait MarketDataSource: Send + Sync {
    fn fetch_market_stats(
        &self,
        request: &MarketStatsRequest,
    ) -> impl Future<Output = std::result::Result<RawMarketPayload, FetchError>> + Send;
}

/// RentCast `/markets` REST client.
pub struct RentcastClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RentcastClient {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
        })
    }

    fn markets_url(&self) -> String {
        format!("{}/markets", self.base_url)
    }
}

impl MarketDataSource for RentcastClient {
    async fn fetch_market_stats(
        &self,
        request: &MarketStatsRequest,
    ) -> std::result::Result<RawMarketPayload, FetchError> {
        let history_range = request.history_range.months().to_string();
        let params = [
            ("zipCode", request.zip_code.as_str()),
            ("dataType", request.data_type.as_str()),
            ("historyRange", history_range.as_str()),
        ];

        debug!(
            zip_code = %request.zip_code,
            data_type = %request.data_type,
            history_range = request.history_range.months(),
            "GET {}",
            self.markets_url()
        );

        let response = self
            .client
            .get(self.markets_url())
            .header(reqwest::header::ACCEPT, "application/json")
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if let Some(err) = error_for_status(status, &request.zip_code) {
            warn!(zip_code = %request.zip_code, status = status.as_u16(), "market stats request failed: {err}");
            return Err(err);
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;

        info!(zip_code = %request.zip_code, "market stats received");
        Ok(RawMarketPayload::new(body))
    }
}

/// Maps a non-success status to the failure the caller sees.
fn error_for_status(status: StatusCode, zip_code: &ZipCode) -> Option<FetchError> {
    if status.is_success() {
        return None;
    }
    let err = match status {
        StatusCode::UNAUTHORIZED => FetchError::Unauthorized,
        StatusCode::NOT_FOUND => FetchError::NotFound {
            zip_code: zip_code.to_string(),
        },
        StatusCode::TOO_MANY_REQUESTS => FetchError::RateLimited,
        other => FetchError::Request(other.to_string()),
    };
    Some(err)
}


/// In-memory source for tests: answers every request with the same result
/// and records what was asked.
#[cfg(test)]
pub mod testing {
    use std::sync::Mutex;

    use super::*;

    pub struct StaticSource {
        response: std::result::Result<RawMarketPayload, FetchError>,
        pub requests: Mutex<Vec<MarketStatsRequest>>,
    }

    impl StaticSource {
        pub fn ok(value: serde_json::Value) -> Self {
            Self::with(Ok(RawMarketPayload::new(value)))
        }

        pub fn failing(err: FetchError) -> Self {
            Self::with(Err(err))
        }

        fn with(response: std::result::Result<RawMarketPayload, FetchError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl MarketDataSource for StaticSource {
        async fn fetch_market_stats(
            &self,
            request: &MarketStatsRequest,
        ) -> std::result::Result<RawMarketPayload, FetchError> {
            self.requests.lock().unwrap().push(request.clone());
            self.response.clone()
        }
    }
}
