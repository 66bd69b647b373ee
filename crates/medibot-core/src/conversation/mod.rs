//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: one exchanged turn (`Exchange`, `ExchangeRole`)
//! - `model`: the server-owned `Conversation` snapshot and history ordering
//!
//! # Usage
//!
//! ```ignore
//! use medibot_core::conversation::{Conversation, Exchange, ExchangeRole};
//! ```

mod message;
mod model;

// Re-export public API
pub use message::{Exchange, ExchangeRole};
pub use model::{Conversation, sort_newest_first};
