//! REST client for the artwork service HTTP endpoints.
//!
//! | Operation | Request                                   | Response            |
//! |-----------|-------------------------------------------|---------------------|
//! | list      | `GET /artworks`                           | `[Artwork]`         |
//! | create    | `POST /artworks` (multipart, image)       | `Artwork`           |
//! | update    | `PUT /artworks/{id}` (multipart, image?)  | `Artwork`           |
//! | delete    | `DELETE /artworks/{id}`                   | `{ "message": .. }` |

use std::time::Duration;

use artboard_core::{Artwork, ArtworkFields, DeleteResponse, ImagePayload};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use crate::service::{ArtworkService, TransportError};

/// Multipart part name carrying the image file.
pub const IMAGE_PART: &str = "image";

/// HTTP client for one artwork service deployment.
pub struct ArtworkApi {
    client: reqwest::Client,
    api_url: String,
}

impl ArtworkApi {
    /// Create a client with reqwest's defaults (no request timeout).
    ///
    /// * `api_url` - Base URL, e.g. `https://art-api.sendiko.my.id`. A
    ///   trailing slash is ignored.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Create a client whose requests give up after `timeout`.
    pub fn with_timeout(
        api_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    /// Base URL without a trailing slash.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    // ---- private helpers ----

    fn collection_url(&self) -> String {
        format!("{}/artworks", self.api_url)
    }

    /// URL for a single record. The id is percent-encoded as exactly one
    /// path segment, so `/`, `?` and `#` inside it stay part of the id.
    fn item_url(&self, id: &str) -> Result<reqwest::Url, TransportError> {
        if id.is_empty() {
            return Err(TransportError::InvalidUrl("artwork id is empty".into()));
        }
        let mut url = reqwest::Url::parse(&self.collection_url())
            .map_err(|e| TransportError::InvalidUrl(format!("{}: {e}", self.api_url)))?;
        url.path_segments_mut()
            .map_err(|()| TransportError::InvalidUrl(self.api_url.clone()))?
            .push(id);
        Ok(url)
    }

    /// Build the multipart body: the five text parts, then the image
    /// part only when one is supplied.
    fn multipart_form(
        fields: &ArtworkFields,
        image: Option<ImagePayload>,
    ) -> Result<Form, TransportError> {
        let mut form = fields
            .parts()
            .into_iter()
            .fold(Form::new(), |form, (name, value)| {
                form.text(name, value.to_string())
            });

        if let Some(image) = image {
            let part = Part::bytes(image.bytes)
                .file_name(image.filename)
                .mime_str(image.mime_type)?;
            form = form.part(IMAGE_PART, part);
        }

        Ok(form)
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`TransportError::Api`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TransportError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TransportError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TransportError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| TransportError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ArtworkService for ArtworkApi {
    async fn list(&self) -> Result<Vec<Artwork>, TransportError> {
        let response = self.client.get(self.collection_url()).send().await?;
        let artworks: Vec<Artwork> = Self::parse_response(response).await?;
        tracing::debug!(count = artworks.len(), "Fetched artworks");
        Ok(artworks)
    }

    async fn create(
        &self,
        fields: &ArtworkFields,
        image: ImagePayload,
    ) -> Result<Artwork, TransportError> {
        let form = Self::multipart_form(fields, Some(image))?;
        let response = self
            .client
            .post(self.collection_url())
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn update(
        &self,
        id: &str,
        fields: &ArtworkFields,
        image: Option<ImagePayload>,
    ) -> Result<Artwork, TransportError> {
        let form = Self::multipart_form(fields, image)?;
        let response = self
            .client
            .put(self.item_url(id)?)
            .multipart(form)
            .send()
            .await?;

        Self::parse_response(response).await
    }

    async fn delete(&self, id: &str) -> Result<DeleteResponse, TransportError> {
        let response = self.client.delete(self.item_url(id)?).send().await?;
        Self::parse_response(response).await
    }
}
