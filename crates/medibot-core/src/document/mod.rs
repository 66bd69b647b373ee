//! Generated document domain module.
//!
//! - `payload`: base64 document payload delivered by the server
//! - `viewer`: trait for handing a written file to the platform viewer

mod payload;
mod viewer;

pub use payload::DocumentPayload;
pub use viewer::DocumentViewer;
