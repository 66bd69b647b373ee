//! The prescription wizard: symptom, follow-up questions, generation, download.

use medibot_core::document::DocumentPayload;
use medibot_core::error::{MedibotError, Result};
use medibot_core::wizard::{QuestionSet, StageKind, WizardStage};
use std::path::PathBuf;

use crate::document_delivery::DocumentDelivery;
use crate::session::SessionStore;

/// Drives a [`WizardStage`] through the server calls each transition needs.
///
/// A failed call leaves the wizard on the stage it was on before the call:
/// a failed question fetch stays on `symptom`, a failed generation returns to
/// `questions` with the answers kept.
#[derive(Debug, Default)]
pub struct PrescriptionWizard {
    stage: WizardStage,
}

impl PrescriptionWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> &WizardStage {
        &self.stage
    }

    pub fn kind(&self) -> StageKind {
        self.stage.kind()
    }

    /// Progress percentage for the current stage.
    pub fn progress(&self) -> u8 {
        self.stage.progress()
    }

    pub fn edit_symptom(&mut self, text: impl Into<String>) -> Result<()> {
        self.stage.edit_symptom(text)
    }

    /// symptom → questions.
    pub async fn submit_symptom(&mut self, session: &SessionStore) -> Result<&QuestionSet> {
        let symptom = self.stage.symptom_query()?;
        tracing::debug!(%symptom, "Requesting follow-up questions");

        let questions = session
            .api()
            .fetch_questions(&symptom)
            .await
            .and_then(QuestionSet::new)
            .map_err(|e| {
                tracing::warn!("Failed to fetch questions: {}", e);
                e
            })?;

        self.stage.accept_questions(questions)?;
        self.stage
            .questions()
            .ok_or_else(|| MedibotError::invalid_transition(self.stage.kind().to_string(), "list questions"))
    }

    pub fn answer(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        self.stage.answer(key, text)
    }

    pub fn can_generate(&self) -> bool {
        self.stage.can_generate()
    }

    /// questions → generating → success.
    pub async fn generate(&mut self, session: &SessionStore) -> Result<&DocumentPayload> {
        let identity = session.require_identity()?.clone();
        let answers = self.stage.begin_generation()?;
        tracing::debug!(questions = answers.len(), "Generating prescription");

        match session.api().generate_prescription(&identity, &answers).await {
            Ok(document) => {
                self.stage.complete_generation(document)?;
                tracing::info!("Prescription generated");
            }
            Err(e) => {
                tracing::warn!("Failed to generate prescription: {}", e);
                self.stage.abort_generation()?;
                return Err(e);
            }
        }

        self.stage
            .document()
            .ok_or_else(|| MedibotError::invalid_transition(self.stage.kind().to_string(), "read the document"))
    }

    /// Steps back one stage and returns the stage now active.
    pub fn back(&mut self) -> StageKind {
        self.stage.back()
    }

    /// Discards all wizard state ("go home").
    pub fn reset(&mut self) {
        self.stage.reset();
    }

    /// Delivers the generated document. Only valid in the success stage.
    pub async fn download(&self, delivery: &DocumentDelivery) -> Result<PathBuf> {
        let document = self.stage.document().ok_or_else(|| {
            MedibotError::invalid_transition(self.stage.kind().to_string(), "download a prescription")
        })?;
        delivery.deliver(document).await
    }
}
