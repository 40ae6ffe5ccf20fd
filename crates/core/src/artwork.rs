//! Artwork record, submission fields, and collection ordering.

use std::cmp::Reverse;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timestamp::{format_for_display, parse_timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Categories offered by the edit form. Category stays free-form text;
/// this list is only a suggestion.
pub const CATEGORY_SUGGESTIONS: &[&str] =
    &["Lukisan", "Patung", "Fotografi", "Digital Art", "Instalasi"];

/// Whether `category` is one of [`CATEGORY_SUGGESTIONS`] (exact match).
pub fn is_suggested_category(category: &str) -> bool {
    CATEGORY_SUGGESTIONS.contains(&category)
}

// ---------------------------------------------------------------------------
// Artwork
// ---------------------------------------------------------------------------

/// One catalog item as returned by the artwork service.
///
/// Equality and hashing go by `id` only; the service assigns it and it
/// never changes afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub origin: String,
    pub artist: String,
    /// Absolute image URL. Only `None` transiently while a create is in
    /// flight on the service side.
    #[serde(default)]
    pub image: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Artwork {
    /// Image reference as served, without rewriting.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref()
    }

    /// Sort key for `createdAt`. `None` means unparsable and orders as
    /// the oldest possible instant.
    pub fn created_at_key(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// `updatedAt` formatted for display, or the raw text when it cannot
    /// be parsed.
    pub fn updated_at_display(&self) -> String {
        format_for_display(&self.updated_at)
    }

    /// The editable text attributes of this record.
    pub fn fields(&self) -> ArtworkFields {
        ArtworkFields {
            title: self.title.clone(),
            description: self.description.clone(),
            category: self.category.clone(),
            origin: self.origin.clone(),
            artist: self.artist.clone(),
        }
    }
}

impl PartialEq for Artwork {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Artwork {}

impl Hash for Artwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Order a listing newest-first by `createdAt`.
///
/// The sort is stable: records with equal keys keep their input order,
/// and records whose `createdAt` cannot be parsed go last in the order
/// they arrived. No record is dropped.
pub fn sort_newest_first(mut artworks: Vec<Artwork>) -> Vec<Artwork> {
    artworks.sort_by_cached_key(|artwork| Reverse(artwork.created_at_key()));
    artworks
}

// ---------------------------------------------------------------------------
// Submission fields
// ---------------------------------------------------------------------------

/// The five text attributes sent on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtworkFields {
    pub title: String,
    pub description: String,
    pub category: String,
    pub origin: String,
    pub artist: String,
}

impl ArtworkFields {
    /// Multipart part names paired with their values, in submission order.
    pub fn parts(&self) -> [(&'static str, &str); 5] {
        [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("category", self.category.as_str()),
            ("origin", self.origin.as_str()),
            ("artist", self.artist.as_str()),
        ]
    }

    /// Reject the submission if any field is empty or whitespace-only.
    ///
    /// The error lists every offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        let empty: Vec<&str> = self
            .parts()
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if empty.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "{} must not be empty",
                empty.join(", ")
            )))
        }
    }
}

// ---------------------------------------------------------------------------
// Delete response
// ---------------------------------------------------------------------------

/// Body of a successful `DELETE /artworks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Human-readable status, surfaced to the user verbatim.
    pub message: String,
}
