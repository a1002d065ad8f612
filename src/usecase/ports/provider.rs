use crate::domain::entities::operator::OperatorDataset;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    Http(String),
    Decode(String),
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderError::Http(message) => write!(f, "http request failed: {message}"),
            ProviderError::Decode(message) => write!(f, "payload decode failed: {message}"),
        }
    }
}

impl std::error::Error for ProviderError {}

pub trait OperatorProvider: Send + Sync {
    fn fetch_dataset(&self) -> Result<OperatorDataset, ProviderError>;
}
