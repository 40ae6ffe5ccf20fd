//! Domain types for the artboard catalog client.
//!
//! Holds the artwork record exchanged with the remote service, the
//! text fields submitted on create/update, the timestamp policy used
//! for ordering and display, the signed-in identity triple, and the
//! JPEG encoder that prepares image uploads. Nothing in this crate
//! performs network or disk I/O.

pub mod artwork;
pub mod encode;
pub mod error;
pub mod identity;
pub mod timestamp;

pub use artwork::{Artwork, ArtworkFields, DeleteResponse};
pub use encode::{encode_image, EncodingError, ImagePayload};
pub use error::CoreError;
pub use identity::Identity;
