//! # Conversation Flow Test
//!
//! Drives a whole conversation through `ChatEngine`: a greeting with no
//! name, the introduction, and a real question that must come back grounded
//! in retrieved FAQ context.

use possap_assist::chat::{ChatEngine, TurnState, DEFAULT_CONVERSATION_ID};
use possap_assist::corpus::{Category, FaqEntry};
use possap_assist::engine::ResponseEngine;
use possap_assist::store::{ConversationStore, Role};
use possap_assist_test_utils::{MockAiProvider, ScriptedRetriever};
use std::sync::Arc;

fn payment_faq() -> FaqEntry {
    FaqEntry {
        question: "I made payment on my generated invoice, but it didn't reflect".to_string(),
        answer: "Contact POSSAP Customer Service with your payment receipt and invoice number."
            .to_string(),
        category: Category::Payment,
    }
}

struct Harness {
    store: Arc<ConversationStore>,
    chat: ChatEngine,
    provider: MockAiProvider,
}

fn harness() -> Harness {
    let store = Arc::new(ConversationStore::new());
    let retriever = ScriptedRetriever::new();
    retriever.add_script("payment", vec![payment_faq()]);

    let provider = MockAiProvider::new();
    provider.add_response(
        "payment",
        "That's frustrating! Your payment needs 24-48 hours to reflect. Still stuck? Email info@possap.gov.ng",
    );
    provider.add_response("User Question:", "Happy to help!");

    let engine = ResponseEngine::new(Arc::new(retriever), Box::new(provider.clone()));
    let chat = ChatEngine::new(store.clone(), engine);
    Harness {
        store,
        chat,
        provider,
    }
}

#[tokio::test]
async fn greeting_then_name_then_grounded_answer() {
    let h = harness();

    // Turn 1: a plain greeting. The assistant must ask for a name and must
    // not attach any FAQs.
    let first = h.chat.handle_message(None, "Hello").await;
    assert_eq!(first.state, TurnState::AskingForName);
    assert_eq!(first.reply, "Hello! May I know your name?");
    assert!(first.relevant_faqs.is_empty());
    assert!(!first.context_used);
    assert!(!first.conversation_id.is_empty());
    assert_ne!(first.conversation_id, DEFAULT_CONVERSATION_ID);
    let id = first.conversation_id.clone();

    // Turn 2: the introduction. The greeting must mention the captured name.
    let second = h.chat.handle_message(Some(&id), "My name is Ada").await;
    assert_eq!(second.state, TurnState::NameCaptured);
    assert_eq!(second.conversation_id, id);
    assert_eq!(second.user_name.as_deref(), Some("Ada"));
    assert!(second.reply.contains("Ada"));
    assert!(second.relevant_faqs.is_empty());

    // Turn 3: a payment complaint. The answer must be grounded in a
    // retrieved payment FAQ.
    let third = h
        .chat
        .handle_message(Some(&id), "My payment was debited but did not reflect")
        .await;
    assert_eq!(third.state, TurnState::Answered);
    assert!(third.context_used);
    assert!(third
        .relevant_faqs
        .iter()
        .any(|faq| faq.category == Category::Payment));
    assert!(third.reply.contains("mailto:info@possap.gov.ng"));
    assert_eq!(third.user_name.as_deref(), Some("Ada"));

    // The generation call carried the visitor's name and the FAQ context.
    let calls = h.provider.get_calls();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].system_prompt.contains("The user's name is Ada."));
    let final_message = &calls[0].messages.last().unwrap().content;
    assert!(final_message.contains("FAQ 1:"));
}

#[tokio::test]
async fn name_carrying_message_is_consumed_not_answered() {
    let h = harness();

    let first = h.chat.handle_message(None, "Hi there").await;
    let id = first.conversation_id.clone();
    h.chat.handle_message(Some(&id), "My name is Ada").await;

    // The introduction itself is never recorded as a user turn; only the
    // assistant's greeting lands in history.
    let snapshot = h.store.snapshot(&id).expect("session must exist");
    assert_eq!(snapshot.user_name.as_deref(), Some("Ada"));
    let user_turns: Vec<_> = snapshot
        .messages
        .iter()
        .filter(|turn| turn.role == Role::User)
        .collect();
    assert!(user_turns.is_empty(), "introduction was recorded as a question");
    assert!(snapshot
        .messages
        .iter()
        .any(|turn| turn.role == Role::Assistant && turn.content.contains("Ada")));

    // And no generation happened for the introduction.
    assert!(h.provider.get_calls().is_empty());
}

#[tokio::test]
async fn non_greeting_message_without_name_gets_generic_ask() {
    let h = harness();

    let outcome = h.chat.handle_message(None, "My payment did not reflect").await;
    assert_eq!(outcome.state, TurnState::AskingForName);
    assert_eq!(outcome.reply, "May I know your name?");
    assert!(h.provider.get_calls().is_empty());
}

#[tokio::test]
async fn default_placeholder_id_mints_a_fresh_conversation() {
    let h = harness();

    let outcome = h
        .chat
        .handle_message(Some(DEFAULT_CONVERSATION_ID), "Hello")
        .await;
    assert_ne!(outcome.conversation_id, DEFAULT_CONVERSATION_ID);
    assert!(h.store.snapshot(&outcome.conversation_id).is_some());
}

#[tokio::test]
async fn answered_turns_are_recorded_in_order() {
    let h = harness();

    let first = h.chat.handle_message(None, "Ada").await;
    assert_eq!(first.state, TurnState::NameCaptured);
    let id = first.conversation_id.clone();

    h.chat
        .handle_message(Some(&id), "Tell me about payment refunds")
        .await;

    let snapshot = h.store.snapshot(&id).unwrap();
    let roles: Vec<Role> = snapshot.messages.iter().map(|t| t.role).collect();
    assert_eq!(roles, vec![Role::Assistant, Role::User, Role::Assistant]);
    assert_eq!(snapshot.messages[1].content, "Tell me about payment refunds");
}
