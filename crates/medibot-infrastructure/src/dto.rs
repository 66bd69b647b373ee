//! Wire formats of the MediBot HTTP API.
//!
//! The server speaks camelCase JSON with Mongo-style `_id` fields. These
//! types mirror that shape exactly and convert into the domain model.

use chrono::{DateTime, Utc};
use medibot_core::conversation::{Conversation, Exchange, ExchangeRole};
use medibot_core::document::DocumentPayload;
use medibot_core::error::{MedibotError, Result};
use medibot_core::wizard::Question;
use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRequest<'a> {
    pub user_name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest<'a> {
    pub prompt: &'a str,
    /// Empty string asks the server to create a conversation
    pub chat_id: &'a str,
    pub user_name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct QuestionsRequest<'a> {
    pub symptom: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionRequest<'a> {
    pub user_name: &'a str,
    pub qna: Vec<QuestionDto>,
}

// ============================================================================
// Responses
// ============================================================================

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrescriptionResponse {
    pub pdf_base64: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionDto {
    pub key: String,
    #[serde(default)]
    pub category: String,
    pub question: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDto {
    #[serde(rename = "_id")]
    pub id: String,
    /// The server sends `null` for untitled conversations
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub messages: Vec<MessageDto>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub pdf_blob: Option<PdfBlobDto>,
}

/// An embedded document as stored by the server.
///
/// History records serialize it as a Node buffer (`{"type":"Buffer","data":[..]}`);
/// a plain base64 string is accepted as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PdfBlobDto {
    Buffer { data: Vec<u8> },
    Base64(String),
}

// ============================================================================
// Conversions
// ============================================================================

impl From<QuestionDto> for Question {
    fn from(dto: QuestionDto) -> Self {
        Question {
            key: dto.key,
            category: dto.category,
            prompt: dto.question,
            answer: dto.answer,
        }
    }
}

impl From<&Question> for QuestionDto {
    /// Unanswered questions are sent with an empty answer.
    fn from(question: &Question) -> Self {
        QuestionDto {
            key: question.key.clone(),
            category: question.category.clone(),
            question: question.prompt.clone(),
            answer: Some(question.answer.clone().unwrap_or_default()),
        }
    }
}

impl PdfBlobDto {
    fn into_payload(self) -> Option<DocumentPayload> {
        match self {
            PdfBlobDto::Buffer { data } if !data.is_empty() => {
                Some(DocumentPayload::from_bytes(&data))
            }
            PdfBlobDto::Buffer { .. } => None,
            PdfBlobDto::Base64(encoded) => DocumentPayload::from_base64(encoded).ok(),
        }
    }
}

impl From<MessageDto> for Exchange {
    fn from(dto: MessageDto) -> Self {
        Exchange {
            role: ExchangeRole::from_label(dto.role.as_deref().unwrap_or_default()),
            body: dto.message.unwrap_or_default(),
            document: dto.pdf_blob.and_then(PdfBlobDto::into_payload),
            created_at: dto.created_at,
            updated_at: dto.updated_at,
        }
    }
}

impl TryFrom<ConversationDto> for Conversation {
    type Error = MedibotError;

    fn try_from(dto: ConversationDto) -> Result<Self> {
        if dto.id.trim().is_empty() {
            return Err(MedibotError::invalid_response("conversation without an id"));
        }
        // Records missing timestamps sort as oldest
        let created_at = dto.created_at.unwrap_or_default();
        Ok(Conversation {
            id: dto.id,
            title: dto.title.unwrap_or_default(),
            exchanges: dto.messages.into_iter().map(Exchange::from).collect(),
            created_at,
            updated_at: dto.updated_at.unwrap_or(created_at),
        })
    }
}
