//! HttpMediBotApi - REST client for the MediBot server.
//!
//! Every call is a single request with no retry. Transport failures, non-success
//! statuses, and malformed bodies each map to their own `MedibotError` variant.

use async_trait::async_trait;
use medibot_core::api::{ChatPrompt, MediBotApi};
use medibot_core::config::ApiSettings;
use medibot_core::conversation::Conversation;
use medibot_core::document::DocumentPayload;
use medibot_core::error::{MedibotError, Result};
use medibot_core::user::Identity;
use medibot_core::wizard::Question;
use reqwest::{Client, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::dto::{
    ChatRequest, ConversationDto, ErrorBody, HistoryRequest, PrescriptionRequest,
    PrescriptionResponse, QuestionDto, QuestionsRequest, QuestionsResponse,
};

/// Client for the MediBot HTTP API rooted at `base_url`.
#[derive(Clone)]
pub struct HttpMediBotApi {
    client: Client,
    base_url: Url,
}

impl HttpMediBotApi {
    /// Creates a client from the configured API settings.
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let base_url = parse_base_url(&settings.base_url)?;

        let mut builder = Client::builder();
        if settings.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(settings.request_timeout_secs));
        }
        let client = builder
            .build()
            .map_err(|e| MedibotError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Resolves `segments` below the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| MedibotError::config("Base URL cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B, T>(&self, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        tracing::debug!(%url, "POST");
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(response).await
    }
}

#[async_trait]
impl MediBotApi for HttpMediBotApi {
    async fn lookup_user(&self, identity: &Identity) -> Result<()> {
        let url = self.endpoint(&["user", identity.as_str()])?;
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(error_from_response(response, "Login failed").await)
    }

    async fn chat_history(&self, identity: &Identity) -> Result<Vec<Conversation>> {
        let records: Vec<ConversationDto> = self
            .post_json(
                &["chat", "history"],
                &HistoryRequest {
                    user_name: identity.as_str(),
                },
            )
            .await?;
        records.into_iter().map(Conversation::try_from).collect()
    }

    async fn send_prompt(&self, prompt: &ChatPrompt) -> Result<Conversation> {
        let record: ConversationDto = self
            .post_json(
                &["chat"],
                &ChatRequest {
                    prompt: &prompt.prompt,
                    chat_id: prompt.conversation_id.as_deref().unwrap_or(""),
                    user_name: prompt.identity.as_str(),
                },
            )
            .await?;
        Conversation::try_from(record)
    }

    async fn fetch_questions(&self, symptom: &str) -> Result<Vec<Question>> {
        let response: QuestionsResponse = self
            .post_json(&["chat", "questions"], &QuestionsRequest { symptom })
            .await?;
        Ok(response.questions.into_iter().map(Question::from).collect())
    }

    async fn generate_prescription(
        &self,
        identity: &Identity,
        answers: &[Question],
    ) -> Result<DocumentPayload> {
        let url = self.endpoint(&["chat", "prescription"])?;
        tracing::debug!(%url, questions = answers.len(), "POST");
        let body = PrescriptionRequest {
            user_name: identity.as_str(),
            qna: answers.iter().map(QuestionDto::from).collect(),
        };
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(MedibotError::api(
                Some(status),
                "Failed to generate prescription",
            ));
        }

        let parsed: PrescriptionResponse = response
            .json()
            .await
            .map_err(|e| MedibotError::invalid_response(format!("prescription: {e}")))?;
        let encoded = parsed
            .pdf_base64
            .ok_or_else(|| MedibotError::invalid_response("prescription reply had no pdfBase64"))?;
        DocumentPayload::from_base64(encoded)
    }
}

/// Parses the base URL, making sure relative endpoints resolve below its path.
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| MedibotError::config(format!("Invalid base URL '{raw}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(MedibotError::config(format!(
            "Base URL '{raw}' cannot carry a path"
        )));
    }
    Ok(url)
}

fn transport_error(err: reqwest::Error) -> MedibotError {
    let kind = if err.is_timeout() {
        "timed out"
    } else if err.is_connect() {
        "could not connect"
    } else {
        "request failed"
    };
    MedibotError::transport(format!("{kind}: {err}"))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    if !response.status().is_success() {
        return Err(error_from_response(response, "Request failed").await);
    }
    let url = response.url().clone();
    response
        .json()
        .await
        .map_err(|e| MedibotError::invalid_response(format!("{}: {e}", url.path())))
}

/// Builds an `Api` error, preferring the server's `message` field.
async fn error_from_response(response: Response, fallback: &str) -> MedibotError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());
    MedibotError::api(Some(status), message)
}
