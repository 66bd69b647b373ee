//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use medibot_application::SessionStore;
use medibot_core::api::{ChatPrompt, MediBotApi};
use medibot_core::conversation::{Conversation, Exchange};
use medibot_core::document::{DocumentPayload, DocumentViewer};
use medibot_core::error::{MedibotError, Result};
use medibot_core::user::{Identity, IdentityRepository};
use medibot_core::wizard::Question;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Scripted `MediBotApi`. Each endpoint pops its next queued reply; an empty
/// queue answers with a transport error.
#[derive(Default)]
pub struct MockApi {
    pub known_users: Mutex<Vec<String>>,
    pub history: Mutex<Vec<Conversation>>,
    pub history_fails: Mutex<bool>,
    pub chat_replies: Mutex<VecDeque<Result<Conversation>>>,
    pub question_replies: Mutex<VecDeque<Result<Vec<Question>>>>,
    pub prescription_replies: Mutex<VecDeque<Result<DocumentPayload>>>,

    pub lookup_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
    pub sent_prompts: Mutex<Vec<ChatPrompt>>,
    pub submitted_answers: Mutex<Vec<Vec<Question>>>,
}

impl MockApi {
    pub fn with_user(name: &str) -> Self {
        let api = Self::default();
        api.known_users.lock().unwrap().push(name.to_string());
        api
    }

    pub fn lookups(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn push_chat(&self, reply: Result<Conversation>) {
        self.chat_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_questions(&self, reply: Result<Vec<Question>>) {
        self.question_replies.lock().unwrap().push_back(reply);
    }

    pub fn push_prescription(&self, reply: Result<DocumentPayload>) {
        self.prescription_replies.lock().unwrap().push_back(reply);
    }

    pub fn set_history(&self, conversations: Vec<Conversation>) {
        *self.history.lock().unwrap() = conversations;
    }
}

fn unscripted(endpoint: &str) -> MedibotError {
    MedibotError::transport(format!("no scripted reply for {endpoint}"))
}

#[async_trait]
impl MediBotApi for MockApi {
    async fn lookup_user(&self, identity: &Identity) -> Result<()> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if self
            .known_users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u == identity.as_str())
        {
            Ok(())
        } else {
            Err(MedibotError::api(Some(404), "User not found"))
        }
    }

    async fn chat_history(&self, _identity: &Identity) -> Result<Vec<Conversation>> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if *self.history_fails.lock().unwrap() {
            return Err(MedibotError::transport("connection refused"));
        }
        Ok(self.history.lock().unwrap().clone())
    }

    async fn send_prompt(&self, prompt: &ChatPrompt) -> Result<Conversation> {
        self.sent_prompts.lock().unwrap().push(prompt.clone());
        self.chat_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("chat")))
    }

    async fn fetch_questions(&self, _symptom: &str) -> Result<Vec<Question>> {
        self.question_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("chat/questions")))
    }

    async fn generate_prescription(
        &self,
        _identity: &Identity,
        answers: &[Question],
    ) -> Result<DocumentPayload> {
        self.submitted_answers.lock().unwrap().push(answers.to_vec());
        self.prescription_replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(unscripted("chat/prescription")))
    }
}

#[derive(Default)]
pub struct MockIdentityRepository {
    pub stored: Mutex<Option<Identity>>,
    pub clear_fails: Mutex<bool>,
}

impl MockIdentityRepository {
    pub fn holding(name: &str) -> Self {
        Self {
            stored: Mutex::new(Some(Identity::parse(name).unwrap())),
            clear_fails: Mutex::new(false),
        }
    }
}

#[async_trait]
impl IdentityRepository for MockIdentityRepository {
    async fn load(&self) -> Result<Option<Identity>> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn save(&self, identity: &Identity) -> Result<()> {
        *self.stored.lock().unwrap() = Some(identity.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if *self.clear_fails.lock().unwrap() {
            return Err(MedibotError::io("read-only file system"));
        }
        *self.stored.lock().unwrap() = None;
        Ok(())
    }
}

/// Records opened paths instead of launching anything.
#[derive(Default)]
pub struct MockViewer {
    pub opened: Mutex<Vec<PathBuf>>,
    pub fails: bool,
}

#[async_trait]
impl DocumentViewer for MockViewer {
    async fn open(&self, path: &Path) -> Result<()> {
        if self.fails {
            return Err(MedibotError::document("no viewer installed"));
        }
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

pub fn at(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
}

pub fn conversation(id: &str, title: &str, created_at: DateTime<Utc>) -> Conversation {
    Conversation {
        id: id.to_string(),
        title: title.to_string(),
        exchanges: vec![
            Exchange::user(format!("{title}?")),
            Exchange::assistant(format!("About {title}")),
        ],
        created_at,
        updated_at: created_at,
    }
}

/// A conversation whose reply embeds a generated prescription.
pub fn prescription_conversation(id: &str, created_at: DateTime<Utc>) -> Conversation {
    let mut record = conversation(id, "Prescription", created_at);
    if let Some(last) = record.exchanges.last_mut() {
        last.document = Some(DocumentPayload::from_bytes(b"%PDF-1.4\n"));
    }
    record
}

/// A signed-in session for `name` over the given mocks.
pub async fn signed_in(
    name: &str,
    api: Arc<MockApi>,
    repo: Arc<MockIdentityRepository>,
) -> SessionStore {
    api.known_users.lock().unwrap().push(name.to_string());
    let mut session = SessionStore::new(api, repo);
    session.login(name).await.unwrap();
    session
}
