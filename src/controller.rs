// src/controller.rs

use crate::api::{ChatClient, DeliveryError};
use crate::session::{ChatSession, SessionEvent};
use std::sync::Weak;
use tokio::sync::Mutex;

/// Accepts or rejects a draft for sending.
///
/// Empty-after-trim input is a silent no-op: no message, no transition,
/// no request. On accept the user message is appended optimistically, the
/// draft is cleared, the session moves to `Pending`, and the trimmed text
/// to put on the wire is returned.
pub fn begin_send(session: &mut ChatSession, raw: &str) -> Option<String> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    log::debug!("send accepted ({} chars)", text.len());
    session.apply(SessionEvent::SendAccepted {
        text: text.to_string(),
    });
    Some(text.to_string())
}

/// Settles the in-flight send. Exactly one bot message is appended per
/// call, and the session returns to `Idle` whatever the outcome. Failure
/// kinds are logged here and nowhere else; the transcript only ever sees
/// the fallback text.
pub fn complete_send(session: &mut ChatSession, outcome: Result<String, DeliveryError>) {
    match outcome {
        Ok(reply) => session.apply(SessionEvent::DeliverySucceeded { reply }),
        Err(err) => {
            log::warn!("delivery failed: {}", err);
            session.apply(SessionEvent::DeliveryFailed);
        }
    }
}

/// Runs one full send cycle against a weak session handle.
///
/// The weak handle is what makes widget teardown safe: if the session is
/// dropped while the call is in flight, the late completion is discarded
/// instead of mutating a store that no longer exists.
pub async fn send(client: &ChatClient, session: &Weak<Mutex<ChatSession>>, raw: &str) {
    let text = {
        let strong = match session.upgrade() {
            Some(strong) => strong,
            None => return,
        };
        let mut guard = strong.lock().await;
        match begin_send(&mut guard, raw) {
            Some(text) => text,
            None => return,
        }
    };

    let outcome = client.send_message(&text).await;

    if let Some(strong) = session.upgrade() {
        complete_send(&mut *strong.lock().await, outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{RequestState, FALLBACK_TEXT};
    use crate::transcript::Sender;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_empty_and_whitespace_sends_are_no_ops() {
        let mut session = ChatSession::new();
        assert!(begin_send(&mut session, "").is_none());
        assert!(begin_send(&mut session, "   ").is_none());
        assert!(session.transcript().is_empty());
        assert_eq!(session.request_state(), RequestState::Idle);
    }

    #[test]
    fn test_accepted_send_trims_the_outgoing_text() {
        let mut session = ChatSession::new();
        let text = begin_send(&mut session, "  Hello  ").unwrap();
        assert_eq!(text, "Hello");
        assert_eq!(session.transcript()[0].content, "Hello");
    }

    #[test]
    fn test_exactly_one_reply_per_send_and_idle_after_each() {
        let mut session = ChatSession::new();

        begin_send(&mut session, "first").unwrap();
        complete_send(&mut session, Ok("reply".to_string()));
        assert_eq!(session.request_state(), RequestState::Idle);

        begin_send(&mut session, "second").unwrap();
        complete_send(
            &mut session,
            Err(DeliveryError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        );
        assert_eq!(session.request_state(), RequestState::Idle);

        let senders: Vec<Sender> = session.transcript().iter().map(|m| m.sender).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
    }

    #[tokio::test]
    async fn test_send_success_scenario() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "response": " Hi there! " })),
            )
            .mount(&server)
            .await;

        let client =
            ChatClient::new(format!("{}/chat", server.uri()), Duration::from_secs(5)).unwrap();
        let session = Arc::new(Mutex::new(ChatSession::new()));

        send(&client, &Arc::downgrade(&session), "Hello").await;

        let session = session.lock().await;
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].sender, Sender::User);
        assert_eq!(transcript[0].content, "Hello");
        assert_eq!(transcript[1].sender, Sender::Bot);
        assert_eq!(transcript[1].content, "Hi there!");
        assert_eq!(session.request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_send_failure_scenario_records_fallback() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client =
            ChatClient::new(format!("{}/chat", server.uri()), Duration::from_secs(5)).unwrap();
        let session = Arc::new(Mutex::new(ChatSession::new()));

        send(&client, &Arc::downgrade(&session), "Hello").await;

        let session = session.lock().await;
        let transcript = session.transcript();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[0].content, "Hello");
        assert_eq!(transcript[1].sender, Sender::Bot);
        assert_eq!(transcript[1].content, FALLBACK_TEXT);
        assert_eq!(session.request_state(), RequestState::Idle);
    }

    #[tokio::test]
    async fn test_late_completion_after_session_drop_is_discarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "response": "too late" }))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&server)
            .await;

        let client =
            ChatClient::new(format!("{}/chat", server.uri()), Duration::from_secs(5)).unwrap();
        let session = Arc::new(Mutex::new(ChatSession::new()));
        let weak = Arc::downgrade(&session);

        let handle = tokio::spawn(async move { send(&client, &weak, "Hello").await });

        // give the request time to start, then tear the widget down
        tokio::time::sleep(Duration::from_millis(50)).await;
        drop(session);

        // must finish quietly with nowhere to record the outcome
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_send_with_dead_session_does_nothing() {
        let client = ChatClient::new("http://127.0.0.1:9/chat", Duration::from_secs(1)).unwrap();
        let session = Arc::new(Mutex::new(ChatSession::new()));
        let weak = Arc::downgrade(&session);
        drop(session);

        send(&client, &weak, "Hello").await;
    }
}
