use artboard_client::TransportError;
use artboard_core::{CoreError, EncodingError};

/// Why a controller operation did not complete.
///
/// The `Display` text is what ends up in the user-facing messages.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Encoding(#[from] EncodingError),

    #[error(transparent)]
    Validation(#[from] CoreError),

    /// A newer refresh was issued before this one completed and stale
    /// responses are being discarded.
    #[error("Refresh superseded by a newer request")]
    Superseded,
}

/// Invalid configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] TransportError),
}
