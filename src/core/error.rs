use thiserror::Error;

/// Failure of a single pipeline fetch cycle.
///
/// Every variant carries a human-readable message; callers surface it as the
/// pipeline's error state and never propagate further.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Network, HTTP status or body decoding failure
    #[error("{0}")]
    Transport(String),

    /// Well-formed response in which the provider reports a domain error
    #[error("{0}")]
    Provider(String),

    /// Well-formed success response without usable data
    #[error("{0}")]
    EmptyResult(String),
}

impl FetchError {
    pub fn transport(message: impl Into<String>) -> Self {
        FetchError::Transport(message.into())
    }

    pub fn provider(message: impl Into<String>) -> Self {
        FetchError::Provider(message.into())
    }

    pub fn empty(message: impl Into<String>) -> Self {
        FetchError::EmptyResult(message.into())
    }
}

/// Result alias used by fetchers and normalizers.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// A decoded provider response that may carry an in-band error message.
pub trait ProviderPayload {
    fn provider_error(&self) -> Option<String>;
}
