//! Session application services.
//!
//! The session is built once at launch with [`SessionStore::resume`] and torn
//! down with [`SessionStore::logout`].

mod store;

pub use store::{SessionState, SessionStore};
