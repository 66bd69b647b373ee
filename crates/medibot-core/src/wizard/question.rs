//! Follow-up questions asked by the server about a symptom.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::{MedibotError, Result};

/// One follow-up question and the user's answer to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable key, unique within one wizard run
    pub key: String,
    /// Grouping label supplied by the server (e.g. "duration")
    pub category: String,
    /// Text shown to the user
    pub prompt: String,
    /// Absent until the user types something
    pub answer: Option<String>,
}

impl Question {
    pub fn new(
        key: impl Into<String>,
        category: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            category: category.into(),
            prompt: prompt.into(),
            answer: None,
        }
    }

    /// True when the answer holds something other than whitespace.
    pub fn is_answered(&self) -> bool {
        self.answer.as_deref().is_some_and(|a| !a.trim().is_empty())
    }
}

/// The ordered questions of one wizard run. Keys are unique.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionSet {
    questions: Vec<Question>,
}

impl QuestionSet {
    /// Builds a set, rejecting duplicate keys.
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        let mut seen = HashSet::new();
        for question in &questions {
            if !seen.insert(question.key.as_str()) {
                return Err(MedibotError::invalid_response(format!(
                    "duplicate question key '{}'",
                    question.key
                )));
            }
        }
        Ok(Self { questions })
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.key == key)
    }

    /// Records the answer for `key`. The text is stored as typed.
    pub fn answer(&mut self, key: &str, text: impl Into<String>) -> Result<()> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.key == key)
            .ok_or_else(|| MedibotError::not_found("question", key))?;
        question.answer = Some(text.into());
        Ok(())
    }

    /// True once every question carries a non-blank answer.
    pub fn all_answered(&self) -> bool {
        self.questions.iter().all(Question::is_answered)
    }

    /// Questions still waiting for a non-blank answer.
    pub fn unanswered(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter().filter(|q| !q.is_answered())
    }

    /// Snapshot of the question/answer pairs for submission.
    pub fn to_vec(&self) -> Vec<Question> {
        self.questions.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuestionSet {
        QuestionSet::new(vec![
            Question::new("duration", "timeline", "How long has it lasted?"),
            Question::new("severity", "intensity", "How bad is it from 1 to 10?"),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_keys_rejected() {
        let result = QuestionSet::new(vec![
            Question::new("k", "a", "first"),
            Question::new("k", "b", "second"),
        ]);
        assert!(matches!(result, Err(MedibotError::InvalidResponse(_))));
    }

    #[test]
    fn test_whitespace_answer_does_not_count() {
        let mut set = sample();
        set.answer("duration", "   ").unwrap();
        set.answer("severity", "7").unwrap();
        assert!(!set.all_answered());
        assert_eq!(set.unanswered().count(), 1);

        set.answer("duration", "two hours").unwrap();
        assert!(set.all_answered());
    }

    #[test]
    fn test_unknown_key() {
        let mut set = sample();
        assert!(set.answer("missing", "x").unwrap_err().is_not_found());
    }
}
