use tracing::info;

use crate::domain::entities::operator::OperatorDataset;
use crate::infra::api::payload::{build_dataset, Envelope};
use crate::usecase::ports::provider::{OperatorProvider, ProviderError};

pub const DEFAULT_API_URL: &str = "https://backend.yituliu.site/operator/elite/";
pub const API_URL_ENV: &str = "ELITECOST_API_URL";

/// The one outbound call: a plain unauthenticated GET to a fixed URL. No
/// retry, no cancellation.
pub struct OperatorApi {
    base_url: String,
}

impl OperatorApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn from_env() -> Self {
        let base_url =
            std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl OperatorProvider for OperatorApi {
    fn fetch_dataset(&self) -> Result<OperatorDataset, ProviderError> {
        info!(url = %self.base_url, "fetching operator dataset");

        let body = reqwest::blocking::get(&self.base_url)
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(|err| ProviderError::Http(err.to_string()))?;

        let envelope: Envelope =
            serde_json::from_str(&body).map_err(|err| ProviderError::Decode(err.to_string()))?;

        let dataset = build_dataset(envelope.data.data);
        info!(operators = dataset.operators.len(), "operator dataset ready");
        Ok(dataset)
    }
}
