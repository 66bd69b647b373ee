//! Application layer for the MediBot client.
//!
//! Each screen of the client is backed by one service here. All of them share
//! a single [`SessionStore`], passed by reference, which owns the signed-in
//! identity and the cached conversation list.

pub mod conversation_view;
pub mod document_delivery;
pub mod history;
pub mod session;
pub mod wizard_flow;

pub use conversation_view::{ConversationView, SAMPLE_PROMPTS};
pub use document_delivery::DocumentDelivery;
pub use history::{HistoryAction, HistoryEntry, HistoryList};
pub use session::{SessionState, SessionStore};
pub use wizard_flow::PrescriptionWizard;
