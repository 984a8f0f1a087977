use crate::app::App;
use crate::controller;
use crate::session::SessionEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;

/// Dispatches one key event against the current app state.
pub async fn handle_key(app: &mut App, key: KeyEvent) {
    if app.quit_confirm {
        handle_quit_confirm_input(app, key);
        return;
    }

    let session_arc = app.session.clone();
    let mut session = session_arc.lock().await;

    if !session.panel_open() {
        match key.code {
            KeyCode::Char('o') | KeyCode::Enter => session.apply(SessionEvent::PanelOpened),
            KeyCode::Char('q') | KeyCode::Esc => app.quit_confirm = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                app.quit_confirm = true;
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => session.apply(SessionEvent::PanelClosed),
        KeyCode::Enter => {
            // submit is disabled while a send is in flight
            if session.is_pending() {
                return;
            }
            let raw = session.draft().to_string();
            drop(session);

            let weak = Arc::downgrade(&app.session);
            let client = app.client.clone();
            tokio::spawn(async move {
                controller::send(&client, &weak, &raw).await;
            });
        }
        KeyCode::Backspace => {
            let mut draft = session.draft().to_string();
            draft.pop();
            session.apply(SessionEvent::DraftEdited(draft));
        }
        KeyCode::PageUp => app.anchor.lock().unwrap().scroll_up(),
        KeyCode::PageDown => app.anchor.lock().unwrap().scroll_down(),
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.quit_confirm = true,
                    'u' => app.anchor.lock().unwrap().scroll_up(),
                    'd' => app.anchor.lock().unwrap().scroll_down(),
                    _ => {}
                }
            } else {
                let mut draft = session.draft().to_string();
                draft.push(c);
                session.apply(SessionEvent::DraftEdited(draft));
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => app.should_quit = true,
        KeyCode::Char('n') | KeyCode::Esc => app.quit_confirm = false,
        _ => {}
    }
}
