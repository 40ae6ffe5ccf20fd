//! Signed-in identity: provider seam, on-disk persistence, and the
//! session that ties them together.
//!
//! The identity triple is the only state persisted across restarts.
//! The artwork list itself is always rebuilt by a refresh.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use artboard_core::Identity;
use async_trait::async_trait;
use tokio::sync::watch;

/// Errors from signing in/out or persisting the identity.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The user dismissed the sign-in flow.
    #[error("Sign-in cancelled")]
    Cancelled,

    /// The provider returned a credential type this client cannot read.
    #[error("Unrecognized credential: {0}")]
    UnrecognizedCredential(String),

    /// Any other provider-side failure.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Reading or writing the identity file failed.
    #[error("Identity storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// The identity file exists but is not valid JSON.
    #[error("Corrupt identity file: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// External sign-in collaborator. The protocol behind it is opaque.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Run the sign-in exchange and return the resulting identity.
    async fn sign_in(&self) -> Result<Identity, IdentityError>;

    /// Clear provider-side credential state.
    async fn sign_out(&self) -> Result<(), IdentityError>;
}

// ---------------------------------------------------------------------------
// IdentityStore
// ---------------------------------------------------------------------------

/// JSON file holding the identity triple.
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted identity. A missing file means signed out.
    pub async fn load(&self) -> Result<Identity, IdentityError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Identity::signed_out()),
            Err(e) => Err(e.into()),
        }
    }

    /// Persist `identity`, replacing the file through a rename so a crash
    /// never leaves a half-written file behind.
    pub async fn save(&self, identity: &Identity) -> Result<(), IdentityError> {
        let json = serde_json::to_vec_pretty(identity)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The current identity, kept in step with the provider and the store.
pub struct Session {
    provider: Arc<dyn IdentityProvider>,
    store: IdentityStore,
    identity: watch::Sender<Identity>,
}

impl Session {
    /// Restore the persisted identity. An unreadable file is logged and
    /// treated as signed out.
    pub async fn load(provider: Arc<dyn IdentityProvider>, store: IdentityStore) -> Self {
        let identity = match store.load().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(
                    path = %store.path().display(),
                    error = %e,
                    "Failed to load persisted identity, starting signed out",
                );
                Identity::signed_out()
            }
        };
        tracing::debug!(signed_in = identity.is_signed_in(), "Session restored");

        let (identity, _) = watch::channel(identity);
        Self {
            provider,
            store,
            identity,
        }
    }

    pub fn identity(&self) -> Identity {
        self.identity.borrow().clone()
    }

    /// Receiver notified whenever the identity changes.
    pub fn watch(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    /// Whether create/update/delete affordances should be offered.
    pub fn can_mutate(&self) -> bool {
        self.identity.borrow().is_signed_in()
    }

    /// Sign in through the provider and persist the result.
    ///
    /// On any failure the current identity stays as it was.
    pub async fn sign_in(&self) -> Result<Identity, IdentityError> {
        let identity = self.provider.sign_in().await.inspect_err(|e| {
            tracing::error!(error = %e, "Sign-in failed");
        })?;

        self.store.save(&identity).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist identity");
        })?;

        tracing::info!(email = %identity.email, "Signed in");
        self.identity.send_replace(identity.clone());
        Ok(identity)
    }

    /// Clear provider state, then reset the local identity to the empty
    /// triple. If the provider refuses, nothing local changes.
    ///
    /// Once the provider has signed out, the in-memory identity is reset
    /// even when persisting the empty triple fails; that failure is
    /// still returned.
    pub async fn sign_out(&self) -> Result<(), IdentityError> {
        self.provider.sign_out().await.inspect_err(|e| {
            tracing::error!(error = %e, "Sign-out failed");
        })?;

        let signed_out = Identity::signed_out();
        self.identity.send_replace(signed_out.clone());
        tracing::info!("Signed out");

        self.store.save(&signed_out).await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to persist signed-out identity");
        })
    }
}
