//! Shared test doubles for the sync integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use artboard_client::{ArtworkService, TransportError};
use artboard_core::{Artwork, ArtworkFields, DeleteResponse, ImagePayload};
use async_trait::async_trait;
use image::{DynamicImage, Rgb, RgbImage};
use tokio::sync::oneshot;

/// Scripted behaviour for one `list()` call.
pub enum ListStep {
    /// Answer immediately. `Err(status)` becomes `TransportError::Api`.
    Respond(Result<Vec<Artwork>, u16>),
    /// Wait for the sender to fire (or drop), then answer.
    WaitThenRespond(oneshot::Receiver<()>, Result<Vec<Artwork>, u16>),
    /// Never answer.
    Hang,
}

/// In-memory [`ArtworkService`] that records every call.
///
/// `list()` consumes scripted steps in order and answers `Ok(vec![])`
/// once the script runs out. Mutations succeed unless
/// [`fail_mutations_with`](Self::fail_mutations_with) was set.
#[derive(Default)]
pub struct MockService {
    list_calls: AtomicUsize,
    steps: Mutex<VecDeque<ListStep>>,
    mutation_failure: Mutex<Option<u16>>,
    delete_message: Mutex<String>,
    pub creates: Mutex<Vec<(ArtworkFields, ImagePayload)>>,
    pub updates: Mutex<Vec<(String, ArtworkFields, Option<ImagePayload>)>>,
    pub deletes: Mutex<Vec<String>>,
}

impl MockService {
    pub fn new() -> Self {
        let mock = Self::default();
        *mock.delete_message.lock().unwrap() = "Artwork removed".to_string();
        mock
    }

    pub fn push_list(&self, step: ListStep) {
        self.steps.lock().unwrap().push_back(step);
    }

    pub fn respond_with(&self, artworks: Vec<Artwork>) {
        self.push_list(ListStep::Respond(Ok(artworks)));
    }

    pub fn fail_list_with(&self, status: u16) {
        self.push_list(ListStep::Respond(Err(status)));
    }

    pub fn fail_mutations_with(&self, status: u16) {
        *self.mutation_failure.lock().unwrap() = Some(status);
    }

    pub fn set_delete_message(&self, message: &str) {
        *self.delete_message.lock().unwrap() = message.to_string();
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Yield until `list()` has been entered at least `n` times.
    pub async fn wait_for_list_calls(&self, n: usize) {
        while self.list_calls() < n {
            tokio::task::yield_now().await;
        }
    }

    fn mutation_result(&self) -> Result<(), TransportError> {
        match *self.mutation_failure.lock().unwrap() {
            Some(status) => Err(api_error(status)),
            None => Ok(()),
        }
    }
}

fn api_error(status: u16) -> TransportError {
    TransportError::Api {
        status,
        body: "scripted failure".to_string(),
    }
}

#[async_trait]
impl ArtworkService for MockService {
    async fn list(&self) -> Result<Vec<Artwork>, TransportError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let step = self.steps.lock().unwrap().pop_front();

        let outcome = match step {
            None => Ok(Vec::new()),
            Some(ListStep::Respond(outcome)) => outcome,
            Some(ListStep::WaitThenRespond(gate, outcome)) => {
                let _ = gate.await;
                outcome
            }
            Some(ListStep::Hang) => std::future::pending().await,
        };
        outcome.map_err(api_error)
    }

    async fn create(
        &self,
        fields: &ArtworkFields,
        image: ImagePayload,
    ) -> Result<Artwork, TransportError> {
        self.mutation_result()?;
        self.creates.lock().unwrap().push((fields.clone(), image));
        Ok(artwork_with_fields("created", fields))
    }

    async fn update(
        &self,
        id: &str,
        fields: &ArtworkFields,
        image: Option<ImagePayload>,
    ) -> Result<Artwork, TransportError> {
        self.mutation_result()?;
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), fields.clone(), image));
        Ok(artwork_with_fields(id, fields))
    }

    async fn delete(&self, id: &str) -> Result<DeleteResponse, TransportError> {
        self.mutation_result()?;
        self.deletes.lock().unwrap().push(id.to_string());
        Ok(DeleteResponse {
            message: self.delete_message.lock().unwrap().clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn artwork(id: &str, created_at: &str) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: "Oil on canvas".to_string(),
        category: "Lukisan".to_string(),
        origin: "Bali".to_string(),
        artist: "Made".to_string(),
        image: Some(format!("https://img.example/{id}.jpg")),
        created_at: created_at.to_string(),
        updated_at: created_at.to_string(),
    }
}

fn artwork_with_fields(id: &str, fields: &ArtworkFields) -> Artwork {
    Artwork {
        id: id.to_string(),
        title: fields.title.clone(),
        description: fields.description.clone(),
        category: fields.category.clone(),
        origin: fields.origin.clone(),
        artist: fields.artist.clone(),
        image: Some(format!("https://img.example/{id}.jpg")),
        created_at: "2024-01-01T00:00:00.000Z".to_string(),
        updated_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

pub fn fields(title: &str) -> ArtworkFields {
    ArtworkFields {
        title: title.to_string(),
        description: "Oil on canvas".to_string(),
        category: "Lukisan".to_string(),
        origin: "Bali".to_string(),
        artist: "Made".to_string(),
    }
}

pub fn image() -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([120, 80, 40])))
}

pub fn ids(artworks: &[Artwork]) -> Vec<&str> {
    artworks.iter().map(|a| a.id.as_str()).collect()
}
