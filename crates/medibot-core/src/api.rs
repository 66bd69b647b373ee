//! Remote MediBot API contract.
//!
//! The HTTP implementation lives in the infrastructure crate; the application
//! layer only sees this trait, which keeps every flow testable with an
//! in-memory double.

use async_trait::async_trait;

use crate::conversation::Conversation;
use crate::document::DocumentPayload;
use crate::error::Result;
use crate::user::Identity;
use crate::wizard::Question;

/// One message sent from the conversation view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatPrompt {
    pub prompt: String,
    /// `None` asks the server to open a new conversation.
    pub conversation_id: Option<String>,
    pub identity: Identity,
}

#[async_trait]
pub trait MediBotApi: Send + Sync {
    /// Confirms the identity exists on the server.
    ///
    /// A non-success reply carries the server's message, used as the login error.
    async fn lookup_user(&self, identity: &Identity) -> Result<()>;

    /// Every conversation belonging to `identity`, in server order.
    async fn chat_history(&self, identity: &Identity) -> Result<Vec<Conversation>>;

    /// Sends a prompt and returns the updated conversation record.
    async fn send_prompt(&self, prompt: &ChatPrompt) -> Result<Conversation>;

    /// Follow-up questions for a symptom description.
    async fn fetch_questions(&self, symptom: &str) -> Result<Vec<Question>>;

    /// Generates a prescription from the answered questions.
    async fn generate_prescription(
        &self,
        identity: &Identity,
        answers: &[Question],
    ) -> Result<DocumentPayload>;
}
