use crate::types::CurrencyKey;

/// Errors surfaced at the query and configuration boundary.
///
/// Selectors themselves never fail: missing or malformed raw state flows
/// through the graph as zero/`None` (see [`crate::num::Wei`]).
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("subgraph request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("subgraph rejected query: {0}")]
    Subgraph(String),

    #[error("currency key too long for bytes32 encoding: {0}")]
    CurrencyKeyTooLong(CurrencyKey),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}
