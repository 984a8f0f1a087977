use crate::anchor::ViewAnchor;
use crate::api::ChatClient;
use crate::session::{Change, ChatSession};
use crate::status_indicator::StatusIndicator;
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;

/// Terminal front end state. The session is shared behind a tokio mutex so
/// in-flight sends can settle from spawned tasks; the view anchor is shared
/// with the session's change listener.
pub struct App {
    pub session: Arc<Mutex<ChatSession>>,
    pub client: ChatClient,
    pub anchor: Arc<StdMutex<ViewAnchor>>,
    pub status: StatusIndicator,
    pub quit_confirm: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new(client: ChatClient) -> App {
        let anchor = Arc::new(StdMutex::new(ViewAnchor::new()));

        let mut session = ChatSession::new();
        let anchor_handle = anchor.clone();
        session.subscribe(move |change| {
            if change == Change::TranscriptAppended {
                anchor_handle.lock().unwrap().request_follow();
            }
        });

        App {
            session: Arc::new(Mutex::new(session)),
            client,
            anchor,
            status: StatusIndicator::new(),
            quit_confirm: false,
            should_quit: false,
        }
    }
}
