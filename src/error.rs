use thiserror::Error;

/// Failures the catalog client can run into while reading the product table.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to reach catalog store: {0}")]
    Transport(String),

    #[error("catalog store returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("catalog response could not be decoded: {0}")]
    Decode(String),

    #[error("invalid catalog configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Message shown to visitors when the catalog cannot be loaded.
    pub fn user_message(&self) -> String {
        match self {
            CatalogError::Transport(_) | CatalogError::Status { .. } => {
                format!("Error fetching products: {}", self)
            }
            CatalogError::Decode(_) => "Error fetching products: unexpected response".to_string(),
            CatalogError::Config(msg) => format!("Catalog is not configured: {}", msg),
        }
    }
}

impl From<wreq::Error> for CatalogError {
    fn from(err: wreq::Error) -> Self {
        CatalogError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Decode(err.to_string())
    }
}
