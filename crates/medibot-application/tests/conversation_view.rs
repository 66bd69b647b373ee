mod common;

use common::{MockApi, MockIdentityRepository, at, conversation, signed_in};
use medibot_application::{ConversationView, SAMPLE_PROMPTS};
use medibot_core::conversation::{Exchange, ExchangeRole};
use medibot_core::error::MedibotError;
use std::sync::Arc;

fn server_reply(id: &str, prompt: &str, answer: &str) -> medibot_core::conversation::Conversation {
    let mut record = conversation(id, prompt, at(5, 10));
    record.exchanges = vec![Exchange::user(prompt), Exchange::assistant(answer)];
    record
}

#[tokio::test]
async fn test_new_conversation_shows_sample_prompts() {
    let session = signed_in(
        "alice",
        Arc::new(MockApi::default()),
        Arc::new(MockIdentityRepository::default()),
    )
    .await;
    let mut view = ConversationView::new();
    view.activate(&session);

    assert!(view.is_empty());
    assert_eq!(view.sample_prompts(), &SAMPLE_PROMPTS);
    assert_eq!(view.conversation_id(), None);
}

#[tokio::test]
async fn test_activate_loads_selected_conversation() {
    let api = Arc::new(MockApi::default());
    api.set_history(vec![conversation("c1", "Cough", at(1, 9))]);
    let mut session = signed_in("alice", api, Arc::new(MockIdentityRepository::default())).await;
    session.select_conversation("c1");

    let mut view = ConversationView::new();
    view.activate(&session);

    assert_eq!(view.conversation_id(), Some("c1"));
    assert_eq!(view.exchanges().len(), 2);
    assert!(view.sample_prompts().is_empty());
}

#[tokio::test]
async fn test_successful_send_adds_two_exchanges_and_adopts_server_id() {
    let api = Arc::new(MockApi::default());
    api.push_chat(Ok(server_reply(
        "srv-42",
        "How to fix my sleep cycle?",
        "Keep a **fixed** wake time.",
    )));
    let mut session = signed_in("alice", api.clone(), Arc::new(MockIdentityRepository::default())).await;
    let mut view = ConversationView::new();
    view.activate(&session);

    let before = view.exchanges().len();
    let reply = view
        .send(&mut session, "How to fix my sleep cycle?")
        .await
        .unwrap()
        .clone();

    assert_eq!(reply.role, ExchangeRole::Assistant);
    assert_eq!(reply.body, "Keep a **fixed** wake time.");
    assert_eq!(view.exchanges().len(), before + 2);
    assert_eq!(view.conversation_id(), Some("srv-42"));
    assert_eq!(session.selected_conversation(), Some("srv-42"));
    assert!(session.conversation("srv-42").is_some());

    let sent = api.sent_prompts.lock().unwrap();
    assert_eq!(sent[0].conversation_id, None);
    assert_eq!(sent[0].identity.as_str(), "alice");
}

#[tokio::test]
async fn test_follow_up_send_reuses_conversation_id() {
    let api = Arc::new(MockApi::default());
    api.push_chat(Ok(server_reply("srv-1", "first", "one")));
    api.push_chat(Ok(server_reply("srv-1", "second", "two")));
    let mut session = signed_in("alice", api.clone(), Arc::new(MockIdentityRepository::default())).await;
    let mut view = ConversationView::new();
    view.activate(&session);

    view.send(&mut session, "first").await.unwrap();
    view.send(&mut session, "second").await.unwrap();

    let sent = api.sent_prompts.lock().unwrap();
    assert_eq!(sent[1].conversation_id.as_deref(), Some("srv-1"));
    assert_eq!(view.exchanges().len(), 4);
    assert_eq!(session.conversations().len(), 1);
}

#[tokio::test]
async fn test_failed_send_keeps_optimistic_exchange() {
    let api = Arc::new(MockApi::default());
    api.push_chat(Err(MedibotError::transport("timed out")));
    let mut session = signed_in("alice", api, Arc::new(MockIdentityRepository::default())).await;
    let mut view = ConversationView::new();
    view.activate(&session);

    let err = view.send(&mut session, "How to improve appetite?").await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(view.exchanges().len(), 1);
    assert!(view.exchanges()[0].is_user());
    assert!(view.can_send());
    assert_eq!(view.conversation_id(), None);
}

#[tokio::test]
async fn test_blank_message_is_rejected_locally() {
    let api = Arc::new(MockApi::default());
    let mut session = signed_in("alice", api.clone(), Arc::new(MockIdentityRepository::default())).await;
    let mut view = ConversationView::new();

    let err = view.send(&mut session, " \n ").await.unwrap_err();
    assert!(err.is_validation());
    assert!(view.is_empty());
    assert!(api.sent_prompts.lock().unwrap().is_empty());
}
