//! The remote artwork service contract.

use artboard_core::{Artwork, ArtworkFields, DeleteResponse, ImagePayload};
use async_trait::async_trait;

/// Errors from a single round trip to the artwork service.
///
/// Raised to the caller as-is; the transport never retries.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The HTTP request itself failed (network, DNS, TLS, body read).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("Artwork API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The response body did not match the expected shape.
    #[error("Invalid response body: {0}")]
    Decode(String),

    /// The request could not be addressed (bad base URL or empty id).
    /// Nothing was sent.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

/// List/create/update/delete over artwork records.
///
/// Implementations hold no per-call state, so an abandoned call leaks
/// nothing.
#[async_trait]
pub trait ArtworkService: Send + Sync {
    /// All records, in the order the service returns them.
    async fn list(&self) -> Result<Vec<Artwork>, TransportError>;

    /// Create a record. The image is mandatory.
    async fn create(
        &self,
        fields: &ArtworkFields,
        image: ImagePayload,
    ) -> Result<Artwork, TransportError>;

    /// Update a record. With `image == None` no image part is sent and
    /// the service keeps the stored image.
    async fn update(
        &self,
        id: &str,
        fields: &ArtworkFields,
        image: Option<ImagePayload>,
    ) -> Result<Artwork, TransportError>;

    /// Delete a record, returning the service's status message.
    async fn delete(&self, id: &str) -> Result<DeleteResponse, TransportError>;
}
