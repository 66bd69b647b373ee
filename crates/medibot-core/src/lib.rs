//! Domain layer for the MediBot client.
//!
//! Holds the data model, the symptom-intake state machine, and the traits the
//! outer layers implement (`MediBotApi`, `IdentityRepository`,
//! `DocumentViewer`).

pub mod api;
pub mod config;
pub mod conversation;
pub mod document;
pub mod error;
pub mod route;
pub mod user;
pub mod wizard;

// Re-export common types
pub use api::{ChatPrompt, MediBotApi};
pub use error::{MedibotError, Result};
pub use route::Route;
