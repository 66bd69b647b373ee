//! The consultation chat screen.

use medibot_core::api::ChatPrompt;
use medibot_core::conversation::{Exchange, ExchangeRole};
use medibot_core::error::{MedibotError, Result};

use crate::session::SessionStore;

/// Suggestions offered while a conversation has no exchanges yet.
pub const SAMPLE_PROMPTS: [&str; 3] = [
    "What are common headache remedies?",
    "How to improve appetite?",
    "How to fix my sleep cycle?",
];

/// Local state of the open conversation.
#[derive(Debug, Default)]
pub struct ConversationView {
    conversation_id: Option<String>,
    exchanges: Vec<Exchange>,
    awaiting_reply: bool,
}

impl ConversationView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the selected conversation from the session cache, or starts empty.
    pub fn activate(&mut self, session: &SessionStore) {
        self.awaiting_reply = false;
        match session
            .selected_conversation()
            .and_then(|id| session.conversation(id))
        {
            Some(conversation) => {
                self.conversation_id = Some(conversation.id.clone());
                self.exchanges = conversation.exchanges.clone();
            }
            None => {
                self.conversation_id = session.selected_conversation().map(str::to_string);
                self.exchanges.clear();
            }
        }
    }

    /// Sends `text` and appends the reply.
    ///
    /// The user's exchange is shown immediately. If the request fails it stays
    /// in place with no reply, and the error is returned.
    pub async fn send(&mut self, session: &mut SessionStore, text: &str) -> Result<&Exchange> {
        if self.awaiting_reply {
            return Err(MedibotError::Busy);
        }
        let prompt = text.trim();
        if prompt.is_empty() {
            return Err(MedibotError::validation("Message cannot be empty"));
        }
        let identity = session.require_identity()?.clone();

        self.exchanges.push(Exchange::user(prompt));
        self.awaiting_reply = true;

        let request = ChatPrompt {
            prompt: prompt.to_string(),
            conversation_id: self.conversation_id.clone(),
            identity,
        };
        let api = session.api().clone();
        let result = api.send_prompt(&request).await;
        self.awaiting_reply = false;

        let conversation = match result {
            Ok(conversation) => conversation,
            Err(e) => {
                tracing::warn!("Failed to send message: {}", e);
                return Err(e);
            }
        };

        let mut reply = conversation
            .concluding_exchange()
            .cloned()
            .ok_or_else(|| MedibotError::invalid_response("conversation has no messages"))?;
        reply.role = ExchangeRole::Assistant;

        tracing::debug!(conversation_id = %conversation.id, "Received reply");
        self.conversation_id = Some(conversation.id.clone());
        session.select_conversation(conversation.id.clone());
        session.record_conversation(conversation);

        self.exchanges.push(reply);
        Ok(&self.exchanges[self.exchanges.len() - 1])
    }

    pub fn exchanges(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    /// False while a reply is outstanding.
    pub fn can_send(&self) -> bool {
        !self.awaiting_reply
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    /// The sample prompts to offer, if the conversation is still empty.
    pub fn sample_prompts(&self) -> &'static [&'static str] {
        if self.is_empty() { &SAMPLE_PROMPTS } else { &[] }
    }
}
