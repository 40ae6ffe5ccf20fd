//! The artwork sync controller.
//!
//! [`SyncController`] is the single writer of [`SyncState`]. Every
//! operation is an `async fn` that may suspend on the remote service;
//! hosts either await it directly or launch it as an independent task
//! with the `spawn_*` helpers.
//!
//! # Completion contract
//!
//! Operations are not serialized against each other. Each refresh
//! applies its own response when that response arrives, so with two
//! overlapping refreshes the published list and status reflect whichever
//! completed last in wall-clock order, not whichever was issued last.
//! [`SyncController::discard_stale_refresh`] opts into dropping
//! responses that were overtaken by a newer request.
//!
//! Mutations never patch the list locally. A successful create, update,
//! or delete triggers a full refresh so the list always mirrors the
//! service, including server-computed timestamps.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use artboard_client::{ArtworkApi, ArtworkService};
use artboard_core::artwork::sort_newest_first;
use artboard_core::{encode_image, Artwork, ArtworkFields};
use image::DynamicImage;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;

use crate::config::SyncConfig;
use crate::error::{ConfigError, SyncError};
use crate::state::{Mutation, OperationStatus, SyncEvent, SyncState};

/// Broadcast channel capacity for [`SyncEvent`]s.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Owns the published artwork state and orchestrates remote calls.
pub struct SyncController {
    service: Arc<dyn ArtworkService>,
    state: watch::Sender<SyncState>,
    event_tx: broadcast::Sender<SyncEvent>,
    /// Ticket of the most recently issued refresh.
    latest_refresh: AtomicU64,
    discard_stale_refresh: bool,
}

impl SyncController {
    /// Create a controller around an injected service. Starts with an
    /// empty list and status `Loading`.
    pub fn new(service: Arc<dyn ArtworkService>) -> Self {
        let (state, _) = watch::channel(SyncState::default());
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            service,
            state,
            event_tx,
            latest_refresh: AtomicU64::new(0),
            discard_stale_refresh: false,
        }
    }

    /// Build a controller talking HTTP to `config.api_url`.
    pub fn from_config(config: &SyncConfig) -> Result<Self, ConfigError> {
        let api = match config.request_timeout {
            Some(timeout) => ArtworkApi::with_timeout(config.api_url.as_str(), timeout)?,
            None => ArtworkApi::new(config.api_url.as_str()),
        };
        tracing::info!(
            api_url = %api.api_url(),
            discard_stale_refresh = config.discard_stale_refresh,
            "Artwork sync controller configured",
        );
        Ok(Self::new(Arc::new(api)).discard_stale_refresh(config.discard_stale_refresh))
    }

    /// Drop refresh responses that complete after a newer refresh was
    /// issued, instead of letting the last arrival win.
    pub fn discard_stale_refresh(mut self, enabled: bool) -> Self {
        self.discard_stale_refresh = enabled;
        self
    }

    // ---- published state ----

    /// Copy of the current state.
    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified on every state change.
    pub fn watch(&self) -> watch::Receiver<SyncState> {
        self.state.subscribe()
    }

    /// Subscribe to change events.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.event_tx.subscribe()
    }

    pub fn status(&self) -> OperationStatus {
        self.state.borrow().status
    }

    pub fn artworks(&self) -> Vec<Artwork> {
        self.state.borrow().artworks.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.state.borrow().error_message.clone()
    }

    pub fn delete_feedback(&self) -> Option<String> {
        self.state.borrow().delete_feedback.clone()
    }

    // ---- refresh ----

    /// Reload the full list from the service.
    ///
    /// Sets the status to `Loading` immediately, even if another refresh
    /// is in flight. On success the list is replaced with the response
    /// sorted newest-first and the status becomes `Success`. On failure
    /// the status becomes `Failed` and the previous list is kept.
    pub async fn refresh(&self) -> Result<usize, SyncError> {
        let ticket = self.latest_refresh.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| state.status = OperationStatus::Loading);
        self.emit(SyncEvent::RefreshStarted);
        tracing::debug!(ticket, "Refreshing artworks");

        let result = self.service.list().await;

        if self.discard_stale_refresh && ticket != self.latest_refresh.load(Ordering::SeqCst) {
            tracing::debug!(ticket, "Discarding superseded refresh response");
            return Err(SyncError::Superseded);
        }

        match result {
            Ok(artworks) => {
                warn_on_duplicate_ids(&artworks);
                let artworks = sort_newest_first(artworks);
                let count = artworks.len();
                self.state.send_modify(|state| {
                    state.artworks = artworks;
                    state.status = OperationStatus::Success;
                });
                tracing::info!(count, "Loaded artworks");
                self.emit(SyncEvent::RefreshSucceeded { count });
                Ok(count)
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load artworks");
                self.state.send_modify(|state| state.status = OperationStatus::Failed);
                self.emit(SyncEvent::RefreshFailed {
                    error: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    // ---- mutations ----

    /// Create a record from `fields` and `image`, then refresh.
    ///
    /// Nothing is sent when a field is empty or the image cannot be
    /// encoded. On any failure the error message is set and no refresh
    /// happens.
    pub async fn create(
        &self,
        fields: ArtworkFields,
        image: &DynamicImage,
    ) -> Result<Artwork, SyncError> {
        let result = async {
            fields.validate()?;
            let payload = encode_image(image)?;
            Ok::<_, SyncError>(self.service.create(&fields, payload).await?)
        }
        .await;

        match result {
            Ok(artwork) => {
                tracing::info!(id = %artwork.id, "Artwork created");
                self.emit(SyncEvent::ArtworkCreated {
                    id: artwork.id.clone(),
                });
                let _ = self.refresh().await;
                Ok(artwork)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Create, e)),
        }
    }

    /// Update record `id`, then refresh.
    ///
    /// With `image == None` no image is encoded or sent and the service
    /// keeps the stored one.
    pub async fn update(
        &self,
        id: &str,
        fields: ArtworkFields,
        image: Option<&DynamicImage>,
    ) -> Result<Artwork, SyncError> {
        let result = async {
            fields.validate()?;
            let payload = image.map(encode_image).transpose()?;
            Ok::<_, SyncError>(self.service.update(id, &fields, payload).await?)
        }
        .await;

        match result {
            Ok(artwork) => {
                tracing::info!(id, "Artwork updated");
                self.emit(SyncEvent::ArtworkUpdated { id: id.to_string() });
                let _ = self.refresh().await;
                Ok(artwork)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Update, e)),
        }
    }

    /// Delete record `id`.
    ///
    /// On success the service's message becomes the delete feedback and
    /// the list is refreshed. On failure the feedback is a local failure
    /// message and the error message is left alone.
    pub async fn delete(&self, id: &str) -> Result<String, SyncError> {
        match self.service.delete(id).await {
            Ok(response) => {
                let message = response.message;
                tracing::info!(id, message = %message, "Artwork deleted");
                self.state
                    .send_modify(|state| state.delete_feedback = Some(message.clone()));
                self.emit(SyncEvent::ArtworkDeleted {
                    id: id.to_string(),
                    message: message.clone(),
                });
                let _ = self.refresh().await;
                Ok(message)
            }
            Err(e) => Err(self.mutation_failed(Mutation::Delete, e.into())),
        }
    }

    // ---- acknowledgements ----

    /// Clear the create/update error message. Idempotent.
    pub fn clear_error(&self) {
        self.state
            .send_if_modified(|state| state.error_message.take().is_some());
    }

    /// Clear the delete feedback after it has been shown. Idempotent.
    pub fn clear_delete_feedback(&self) {
        self.state
            .send_if_modified(|state| state.delete_feedback.take().is_some());
    }

    // ---- task launchers ----

    /// Run [`refresh`](Self::refresh) as an independent task.
    pub fn spawn_refresh(self: &Arc<Self>) -> JoinHandle<Result<usize, SyncError>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.refresh().await })
    }

    /// Run [`create`](Self::create) as an independent task.
    pub fn spawn_create(
        self: &Arc<Self>,
        fields: ArtworkFields,
        image: DynamicImage,
    ) -> JoinHandle<Result<Artwork, SyncError>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.create(fields, &image).await })
    }

    /// Run [`update`](Self::update) as an independent task.
    pub fn spawn_update(
        self: &Arc<Self>,
        id: String,
        fields: ArtworkFields,
        image: Option<DynamicImage>,
    ) -> JoinHandle<Result<Artwork, SyncError>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.update(&id, fields, image.as_ref()).await })
    }

    /// Run [`delete`](Self::delete) as an independent task.
    pub fn spawn_delete(self: &Arc<Self>, id: String) -> JoinHandle<Result<String, SyncError>> {
        let this = Arc::clone(self);
        tokio::spawn(async move { this.delete(&id).await })
    }

    // ---- private helpers ----

    /// Record a failed mutation in the published state and hand the
    /// error back to the caller.
    fn mutation_failed(&self, operation: Mutation, error: SyncError) -> SyncError {
        tracing::warn!(?operation, error = %error, "Artwork mutation failed");

        let message = match operation {
            Mutation::Create | Mutation::Update => format!("Error: {error}"),
            Mutation::Delete => format!("Delete failed: {error}"),
        };
        self.state.send_modify(|state| match operation {
            Mutation::Create | Mutation::Update => state.error_message = Some(message),
            Mutation::Delete => state.delete_feedback = Some(message),
        });

        self.emit(SyncEvent::MutationFailed {
            operation,
            error: error.to_string(),
        });
        error
    }

    fn emit(&self, event: SyncEvent) {
        // Only fails when nobody is subscribed.
        let _ = self.event_tx.send(event);
    }
}

/// The service is expected to return unique ids. Duplicates are kept as
/// received, only logged.
fn warn_on_duplicate_ids(artworks: &[Artwork]) {
    let mut seen = HashSet::with_capacity(artworks.len());
    for artwork in artworks {
        if !seen.insert(artwork.id.as_str()) {
            tracing::warn!(id = %artwork.id, "Service returned a duplicate artwork id");
        }
    }
}
