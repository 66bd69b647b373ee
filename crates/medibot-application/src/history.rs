//! The consultation history screen.

use chrono::{DateTime, Utc};
use medibot_core::conversation::Conversation;
use medibot_core::document::DocumentPayload;
use medibot_core::error::{MedibotError, Result};

use crate::session::SessionStore;

/// One card on the history screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    /// e.g. "Jun 4, 2024, 11:59 PM"
    pub created_label: String,
    pub has_document: bool,
}

impl From<&Conversation> for HistoryEntry {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id.clone(),
            title: conversation.title.clone(),
            created_at: conversation.created_at,
            created_label: format_card_date(conversation.created_at),
            has_document: conversation.has_document(),
        }
    }
}

/// What selecting a card leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryAction {
    /// Continue the conversation in the chat screen.
    Resume(String),
    /// Hand the embedded prescription to document delivery.
    Download(DocumentPayload),
}

#[derive(Debug, Default)]
pub struct HistoryList {
    entries: Vec<HistoryEntry>,
}

impl HistoryList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads the conversation list through the session.
    ///
    /// On failure the previous entries stay visible.
    pub async fn refresh(&mut self, session: &mut SessionStore) -> Result<&[HistoryEntry]> {
        match session.refresh_conversations().await {
            Ok(conversations) => {
                self.entries = conversations.iter().map(HistoryEntry::from).collect();
            }
            Err(e) => {
                tracing::warn!("Failed to refresh history: {}", e);
                return Err(e);
            }
        }
        Ok(&self.entries)
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Opens the card at `index` (zero-based).
    ///
    /// Cards carrying a document download it; others select the conversation
    /// in the session so the chat screen resumes it.
    pub fn open(&self, session: &mut SessionStore, index: usize) -> Result<HistoryAction> {
        let entry = self
            .entries
            .get(index)
            .ok_or_else(|| MedibotError::not_found("history entry", (index + 1).to_string()))?;

        if entry.has_document {
            let payload = session
                .conversation(&entry.id)
                .and_then(Conversation::document)
                .cloned()
                .ok_or_else(|| MedibotError::not_found("document", entry.id.clone()))?;
            return Ok(HistoryAction::Download(payload));
        }

        session.select_conversation(entry.id.clone());
        Ok(HistoryAction::Resume(entry.id.clone()))
    }

    /// "New +": the next message starts a fresh conversation.
    pub fn start_new(&self, session: &mut SessionStore) {
        session.start_new_conversation();
    }
}

fn format_card_date(at: DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}
