//! Session payload as returned by the auth backend
//!
//! The payload is mirrored as-is. Fields this crate does not interpret are
//! kept in `extra` so nothing the backend sends is lost on the way to the UI.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The `user` object of a session payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Bearer token issued for this user, if the backend includes one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Remaining user fields (id, email, name, ...)
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Current session as reported by the auth backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<SessionUser>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_loading: Option<bool>,

    /// Remaining top-level fields, e.g. the backend's `session` object
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionUser {
    /// Create a user carrying only a token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            extra: Map::new(),
        }
    }
}

impl SessionData {
    /// Create a session for the given user
    #[must_use]
    pub fn for_user(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    /// User token, if the session carries one
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.user.as_ref().and_then(|user| user.token.as_deref())
    }

    /// Decode a "get session" response body.
    ///
    /// An empty body and a JSON `null` both mean there is no session.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is neither empty, `null`, nor a session object
    pub fn from_response_body(body: &str) -> serde_json::Result<Option<Self>> {
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_backend_payload() {
        let body = json!({
            "session": { "id": "sess_1", "expiresAt": "2026-11-01T00:00:00Z" },
            "user": { "id": "u_1", "email": "ada@example.com", "token": "tok_abc" },
            "isLoading": false
        })
        .to_string();

        let session = SessionData::from_response_body(&body).unwrap().unwrap();
        assert_eq!(session.token(), Some("tok_abc"));
        assert_eq!(session.is_loading, Some(false));
        assert_eq!(session.extra["session"]["id"], "sess_1");

        let user = session.user.as_ref().unwrap();
        assert_eq!(user.extra["email"], "ada@example.com");
    }

    #[test]
    fn test_decode_empty_and_null_bodies() {
        assert_eq!(SessionData::from_response_body("").unwrap(), None);
        assert_eq!(SessionData::from_response_body("  \n").unwrap(), None);
        assert_eq!(SessionData::from_response_body("null").unwrap(), None);
    }

    #[test]
    fn test_decode_user_without_token() {
        let session = SessionData::from_response_body(r#"{"user":{"id":"u_2"}}"#)
            .unwrap()
            .unwrap();
        assert!(session.user.is_some());
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(SessionData::from_response_body("<html>502</html>").is_err());
    }

    #[test]
    fn test_serialize_uses_camel_case_and_keeps_extra_fields() {
        let mut session = SessionData::for_user(SessionUser::with_token("t"));
        session.is_loading = Some(true);
        session
            .extra
            .insert("session".to_string(), json!({ "id": "sess_9" }));

        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(
            value,
            json!({
                "user": { "token": "t" },
                "isLoading": true,
                "session": { "id": "sess_9" }
            })
        );
    }
}
