//! Transport binding for the remote artwork service.
//!
//! [`ArtworkService`] is the contract the sync controller depends on;
//! [`ArtworkApi`] implements it over HTTP with [`reqwest`], sending
//! create/update as multipart forms.

pub mod api;
pub mod service;

pub use api::ArtworkApi;
pub use service::{ArtworkService, TransportError};
