//! UI-facing session state and its transitions

use crate::session::SessionData;
use serde::{Deserialize, Serialize};

/// What readers see: the last session result and whether a check is running
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub data: Option<SessionData>,
    pub is_pending: bool,
}

/// Something that happened during a session check
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// A fetch was issued
    CheckStarted,
    /// The backend answered; `None` means there is no session
    CheckSucceeded(Option<SessionData>),
    /// The fetch failed and the session is treated as absent
    CheckFailed(String),
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self {
            data: None,
            is_pending: true, // Nothing has been fetched yet
        }
    }
}

impl SessionSnapshot {
    /// Whether the last check found a signed-in user
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.data.as_ref().is_some_and(|data| data.user.is_some())
    }

    /// Token of the signed-in user, if any
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.data.as_ref().and_then(SessionData::token)
    }

    /// Update the snapshot from a check event
    #[must_use]
    pub fn apply(self, event: SessionEvent) -> Self {
        match event {
            SessionEvent::CheckStarted => Self {
                is_pending: true,
                ..self
            },
            SessionEvent::CheckSucceeded(data) => Self {
                data,
                is_pending: false,
            },
            SessionEvent::CheckFailed(_) => Self {
                data: None,
                is_pending: false,
            },
        }
    }
}
