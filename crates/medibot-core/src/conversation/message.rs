//! Conversation message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

use crate::document::DocumentPayload;

/// Who authored an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExchangeRole {
    /// Message typed by the signed-in user.
    User,
    /// Reply produced by the server.
    Assistant,
}

impl ExchangeRole {
    /// Maps a role label from the server.
    ///
    /// The server labels its own turns inconsistently ("assistant", "doctor"),
    /// so anything other than "user" is treated as the assistant.
    pub fn from_label(label: &str) -> Self {
        if label.trim().eq_ignore_ascii_case("user") {
            Self::User
        } else {
            Self::Assistant
        }
    }
}

/// A single message turn. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub role: ExchangeRole,
    pub body: String,
    /// Present only on exchanges that produced a generated document.
    pub document: Option<DocumentPayload>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Exchange {
    /// A locally authored user message, not yet confirmed by the server.
    pub fn user(body: impl Into<String>) -> Self {
        Self {
            role: ExchangeRole::User,
            body: body.into(),
            document: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// An assistant message with no document attached.
    pub fn assistant(body: impl Into<String>) -> Self {
        Self {
            role: ExchangeRole::Assistant,
            ..Self::user(body)
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == ExchangeRole::User
    }

    pub fn has_document(&self) -> bool {
        self.document.is_some()
    }
}
