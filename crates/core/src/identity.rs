//! Signed-in user identity.

use serde::{Deserialize, Serialize};

/// Name, email, and photo URL handed over by the identity provider.
///
/// All three are empty when nobody is signed in. An empty `email` is the
/// only signal used to decide whether mutation affordances are offered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub photo_url: String,
}

impl Identity {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        photo_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            photo_url: photo_url.into(),
        }
    }

    /// The empty triple.
    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn is_signed_in(&self) -> bool {
        !self.email.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_out_is_empty_triple() {
        let id = Identity::signed_out();
        assert!(id.name.is_empty() && id.email.is_empty() && id.photo_url.is_empty());
        assert!(!id.is_signed_in());
    }

    #[test]
    fn email_alone_decides_signed_in() {
        assert!(Identity::new("", "a@b.c", "").is_signed_in());
        assert!(!Identity::new("Rio", "", "https://photo").is_signed_in());
    }

    #[test]
    fn partial_json_defaults_missing_fields() {
        let id: Identity = serde_json::from_str(r#"{"email":"a@b.c"}"#).expect("valid json");
        assert_eq!(id, Identity::new("", "a@b.c", ""));

        let json = serde_json::to_value(Identity::new("Rio", "a@b.c", "https://p")).unwrap();
        assert_eq!(json["photoUrl"], "https://p");
    }
}
