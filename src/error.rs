use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Currency code outside the supported set, or missing from an injected catalog.
    #[error("unsupported currency code: {0}")]
    UnsupportedCurrency(String),

    #[error("gradient catalog must contain at least one option")]
    EmptyGradientCatalog,

    #[error("invalid invoice JSON: {0}")]
    Json(#[from] serde_json::Error),
}
