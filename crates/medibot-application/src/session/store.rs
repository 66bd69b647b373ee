use medibot_core::api::MediBotApi;
use medibot_core::conversation::{Conversation, sort_newest_first};
use medibot_core::error::{MedibotError, Result};
use medibot_core::route::Route;
use medibot_core::user::{Identity, IdentityRepository};
use std::sync::Arc;

/// In-memory session fields.
///
/// `selected_conversation == None` means the next message opens a new
/// conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub selected_conversation: Option<String>,
    /// Cached copy of the user's conversations, newest first.
    pub conversations: Vec<Conversation>,
}

/// Owns the signed-in identity and the cached conversation list.
///
/// `SessionStore` is the only writer of the cached list. Views that need to
/// update it receive it as `&mut`.
pub struct SessionStore {
    api: Arc<dyn MediBotApi>,
    identity_repository: Arc<dyn IdentityRepository>,
    state: SessionState,
}

impl SessionStore {
    /// Creates an unauthenticated session.
    pub fn new(api: Arc<dyn MediBotApi>, identity_repository: Arc<dyn IdentityRepository>) -> Self {
        Self {
            api,
            identity_repository,
            state: SessionState::default(),
        }
    }

    /// Restores the persisted identity, if any, and returns the landing route.
    ///
    /// A stored identity is trusted without asking the server whether it still
    /// exists. The conversation list is refreshed afterwards; a refresh failure
    /// is logged and does not prevent the resume.
    ///
    /// # Errors
    ///
    /// Returns an error only if the identity file cannot be read.
    pub async fn resume(&mut self) -> Result<Route> {
        let Some(identity) = self.identity_repository.load().await? else {
            tracing::debug!("No stored identity, starting at sign-in");
            return Ok(Route::SignIn);
        };

        tracing::info!(user = %identity, "Resuming session");
        self.state.identity = Some(identity);
        if let Err(e) = self.refresh_conversations().await {
            tracing::warn!("Failed to load conversations on resume: {}", e);
        }
        Ok(Route::Consultation)
    }

    /// Signs in as `name`.
    ///
    /// The name is trimmed and must exist on the server. On success it is
    /// persisted for the next launch.
    ///
    /// # Errors
    ///
    /// Validation, server, and storage failures are returned and leave the
    /// session unauthenticated.
    pub async fn login(&mut self, name: &str) -> Result<Route> {
        let identity = Identity::parse(name)?;

        self.api.lookup_user(&identity).await?;
        self.identity_repository.save(&identity).await?;

        tracing::info!(user = %identity, "Signed in");
        self.state = SessionState {
            identity: Some(identity),
            ..SessionState::default()
        };
        if let Err(e) = self.refresh_conversations().await {
            tracing::warn!("Failed to load conversations after login: {}", e);
        }
        Ok(Route::Consultation)
    }

    /// Forgets the persisted identity and clears the session.
    ///
    /// # Errors
    ///
    /// If the identity file cannot be removed, the in-memory session is kept
    /// so the user is not silently signed back in on the next launch.
    pub async fn logout(&mut self) -> Result<Route> {
        if let Err(e) = self.identity_repository.clear().await {
            tracing::warn!("Failed to clear stored identity: {}", e);
            return Err(e);
        }
        tracing::info!("Signed out");
        self.state = SessionState::default();
        Ok(Route::SignIn)
    }

    /// Refetches every conversation of the signed-in user.
    ///
    /// On failure the cached list is left as it was.
    pub async fn refresh_conversations(&mut self) -> Result<&[Conversation]> {
        let identity = self.require_identity()?.clone();
        let mut conversations = self.api.chat_history(&identity).await?;
        sort_newest_first(&mut conversations);
        tracing::debug!(count = conversations.len(), "Refreshed conversations");
        self.state.conversations = conversations;
        Ok(&self.state.conversations)
    }

    /// Inserts or replaces one conversation in the cache, keeping the order.
    pub fn record_conversation(&mut self, conversation: Conversation) {
        let conversations = &mut self.state.conversations;
        match conversations.iter_mut().find(|c| c.id == conversation.id) {
            Some(existing) => *existing = conversation,
            None => conversations.push(conversation),
        }
        sort_newest_first(conversations);
    }

    pub fn select_conversation(&mut self, id: impl Into<String>) {
        self.state.selected_conversation = Some(id.into());
    }

    /// Clears the selection so the next message starts a new conversation.
    pub fn start_new_conversation(&mut self) {
        self.state.selected_conversation = None;
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity.as_ref()
    }

    /// The signed-in identity, or `NotSignedIn`.
    pub fn require_identity(&self) -> Result<&Identity> {
        self.identity().ok_or(MedibotError::NotSignedIn)
    }

    pub fn selected_conversation(&self) -> Option<&str> {
        self.state.selected_conversation.as_deref()
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.state.conversations
    }

    pub fn conversation(&self, id: &str) -> Option<&Conversation> {
        self.state.conversations.iter().find(|c| c.id == id)
    }

    pub fn api(&self) -> &Arc<dyn MediBotApi> {
        &self.api
    }
}
