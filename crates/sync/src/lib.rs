//! Client-side synchronization for the artwork catalog.
//!
//! - [`SyncController`] owns the published artwork list, the refresh
//!   status, and the error / delete-feedback messages, and drives the
//!   refresh and mutate lifecycle against an
//!   [`ArtworkService`](artboard_client::ArtworkService).
//! - [`Session`] tracks the signed-in [`Identity`](artboard_core::Identity)
//!   and persists it across restarts.
//! - [`SyncConfig`] and [`telemetry`] cover host bootstrap.

pub mod config;
pub mod controller;
pub mod error;
pub mod session;
pub mod state;
pub mod telemetry;

pub use config::SyncConfig;
pub use controller::SyncController;
pub use error::{ConfigError, SyncError};
pub use session::{IdentityError, IdentityProvider, IdentityStore, Session};
pub use state::{Mutation, OperationStatus, SyncEvent, SyncState};
