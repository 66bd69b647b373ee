//! User domain module.
//!
//! # Module Structure
//!
//! - `model`: the `Identity` a user signs in with
//! - `repository`: persistence trait for the signed-in identity
//!
//! # Usage
//!
//! ```ignore
//! use medibot_core::user::{Identity, IdentityRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::Identity;
pub use repository::IdentityRepository;
