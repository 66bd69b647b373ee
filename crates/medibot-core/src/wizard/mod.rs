//! Symptom-intake wizard domain module.
//!
//! - `question`: follow-up questions and the key-unique `QuestionSet`
//! - `stage`: the four-stage state machine (`WizardStage`, `StageKind`)

mod question;
mod stage;

pub use question::{Question, QuestionSet};
pub use stage::{StageKind, WizardStage};
