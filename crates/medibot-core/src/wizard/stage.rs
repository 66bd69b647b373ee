//! Wizard state machine.
//!
//! Stages advance strictly in order: symptom → questions → generating →
//! success. Each variant carries only the data that exists in that stage, so
//! a "generating" stage without answered questions cannot be built.

use strum::{AsRefStr, Display};

use super::question::{Question, QuestionSet};
use crate::document::DocumentPayload;
use crate::error::{MedibotError, Result};

/// Payload-free name of a stage, used for display and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum StageKind {
    Symptom,
    Questions,
    Generating,
    Success,
}

impl StageKind {
    /// Display-only progress percentage.
    pub fn progress(self) -> u8 {
        match self {
            StageKind::Symptom => 10,
            StageKind::Questions => 33,
            StageKind::Generating => 66,
            StageKind::Success => 100,
        }
    }
}

/// The active stage of one wizard run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardStage {
    /// Collecting the free-text symptom description.
    Symptom { symptom: String },
    /// Collecting answers to the server's follow-up questions.
    Questions {
        symptom: String,
        questions: QuestionSet,
    },
    /// Answers submitted, waiting for the generated document.
    Generating {
        symptom: String,
        questions: QuestionSet,
    },
    /// Document received. Terminal until reset.
    Success {
        symptom: String,
        questions: QuestionSet,
        document: DocumentPayload,
    },
}

impl Default for WizardStage {
    fn default() -> Self {
        WizardStage::Symptom {
            symptom: String::new(),
        }
    }
}

/// Outcome of a transition closure: the next stage, or the untouched stage
/// handed back with the reason the transition was refused.
type Transition = std::result::Result<WizardStage, (WizardStage, MedibotError)>;

fn not_allowed(stage: StageKind, action: &str) -> MedibotError {
    MedibotError::invalid_transition(stage.as_ref(), action)
}

impl WizardStage {
    pub fn kind(&self) -> StageKind {
        match self {
            WizardStage::Symptom { .. } => StageKind::Symptom,
            WizardStage::Questions { .. } => StageKind::Questions,
            WizardStage::Generating { .. } => StageKind::Generating,
            WizardStage::Success { .. } => StageKind::Success,
        }
    }

    pub fn progress(&self) -> u8 {
        self.kind().progress()
    }

    pub fn symptom(&self) -> &str {
        match self {
            WizardStage::Symptom { symptom }
            | WizardStage::Questions { symptom, .. }
            | WizardStage::Generating { symptom, .. }
            | WizardStage::Success { symptom, .. } => symptom,
        }
    }

    pub fn questions(&self) -> Option<&QuestionSet> {
        match self {
            WizardStage::Symptom { .. } => None,
            WizardStage::Questions { questions, .. }
            | WizardStage::Generating { questions, .. }
            | WizardStage::Success { questions, .. } => Some(questions),
        }
    }

    pub fn document(&self) -> Option<&DocumentPayload> {
        match self {
            WizardStage::Success { document, .. } => Some(document),
            _ => None,
        }
    }

    /// Replaces the symptom draft. Only valid in the symptom stage.
    pub fn edit_symptom(&mut self, text: impl Into<String>) -> Result<()> {
        match self {
            WizardStage::Symptom { symptom } => {
                *symptom = text.into();
                Ok(())
            }
            other => Err(not_allowed(other.kind(), "edit the symptom")),
        }
    }

    /// The trimmed symptom text to request questions for.
    ///
    /// Fails with a validation error while the draft is blank.
    pub fn symptom_query(&self) -> Result<String> {
        match self {
            WizardStage::Symptom { symptom } => {
                let trimmed = symptom.trim();
                if trimmed.is_empty() {
                    return Err(MedibotError::validation("Describe your symptoms first"));
                }
                Ok(trimmed.to_string())
            }
            other => Err(not_allowed(other.kind(), "submit a symptom")),
        }
    }

    /// symptom → questions, once the server has supplied the questions.
    pub fn accept_questions(&mut self, questions: QuestionSet) -> Result<()> {
        self.transition(move |stage| match stage {
            WizardStage::Symptom { symptom } if !symptom.trim().is_empty() => {
                Ok(WizardStage::Questions { symptom, questions })
            }
            s @ WizardStage::Symptom { .. } => Err((
                s,
                MedibotError::validation("Describe your symptoms first"),
            )),
            other => {
                let err = not_allowed(other.kind(), "accept questions");
                Err((other, err))
            }
        })
    }

    /// Records an answer. Only valid in the questions stage.
    pub fn answer(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        match self {
            WizardStage::Questions { questions, .. } => questions.answer(key, text),
            other => Err(not_allowed(other.kind(), "answer a question")),
        }
    }

    /// True when every question has a non-blank answer.
    pub fn can_generate(&self) -> bool {
        matches!(self, WizardStage::Questions { questions, .. } if questions.all_answered())
    }

    /// questions → generating. Returns the question/answer pairs to submit.
    pub fn begin_generation(&mut self) -> Result<Vec<Question>> {
        let mut submitted = Vec::new();
        self.transition(|stage| match stage {
            WizardStage::Questions { symptom, questions } if questions.all_answered() => {
                submitted = questions.to_vec();
                Ok(WizardStage::Generating { symptom, questions })
            }
            s @ WizardStage::Questions { .. } => Err((
                s,
                MedibotError::validation("Answer every question before generating"),
            )),
            other => {
                let err = not_allowed(other.kind(), "generate a prescription");
                Err((other, err))
            }
        })?;
        Ok(submitted)
    }

    /// generating → success, storing the returned document.
    pub fn complete_generation(&mut self, document: DocumentPayload) -> Result<()> {
        self.transition(move |stage| match stage {
            WizardStage::Generating { symptom, questions } => Ok(WizardStage::Success {
                symptom,
                questions,
                document,
            }),
            other => {
                let err = not_allowed(other.kind(), "store a generated document");
                Err((other, err))
            }
        })
    }

    /// generating → questions after a failed generation request.
    ///
    /// Answers are kept so the user can resubmit.
    pub fn abort_generation(&mut self) -> Result<()> {
        self.transition(|stage| match stage {
            WizardStage::Generating { symptom, questions } => {
                Ok(WizardStage::Questions { symptom, questions })
            }
            other => {
                let err = not_allowed(other.kind(), "abort generation");
                Err((other, err))
            }
        })
    }

    /// Steps back one stage and returns the stage now active.
    ///
    /// questions → symptom drops the questions but keeps the symptom draft;
    /// success → symptom discards everything. Back from symptom does nothing.
    pub fn back(&mut self) -> StageKind {
        *self = match std::mem::take(self) {
            WizardStage::Symptom { symptom } | WizardStage::Questions { symptom, .. } => {
                WizardStage::Symptom { symptom }
            }
            WizardStage::Generating { symptom, questions } => {
                WizardStage::Questions { symptom, questions }
            }
            WizardStage::Success { .. } => WizardStage::default(),
        };
        self.kind()
    }

    /// Discards all wizard state.
    pub fn reset(&mut self) {
        *self = WizardStage::default();
    }

    fn transition<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(WizardStage) -> Transition,
    {
        match f(std::mem::take(self)) {
            Ok(next) => {
                *self = next;
                Ok(())
            }
            Err((unchanged, err)) => {
                *self = unchanged;
                Err(err)
            }
        }
    }
}
