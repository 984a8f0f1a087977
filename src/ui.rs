// src/ui.rs

pub mod chat;
pub mod quit_confirm;

use crate::app::App;
use crate::session::ChatSession;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Top-level draw dispatch: closed-panel hint or the open chat panel,
/// with the quit confirmation overlaid on top when active.
pub fn draw(f: &mut Frame, app: &App, session: &ChatSession) {
    if session.panel_open() {
        chat::draw_chat(f, app, session);
    } else {
        draw_closed_hint(f);
    }

    if app.quit_confirm {
        quit_confirm::draw_quit_confirm(f, centered_rect(f.area()));
    }
}

fn draw_closed_hint(f: &mut Frame) {
    let area = f.area();
    let hint = Paragraph::new("💬 Press 'o' to open the chat panel, 'q' to quit.")
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    let bottom = Rect {
        x: area.x,
        y: area.bottom().saturating_sub(2),
        width: area.width,
        height: 1,
    };
    f.render_widget(hint, bottom);
}

fn centered_rect(area: Rect) -> Rect {
    let width = area.width.min(44);
    let height = area.height.min(7);
    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}
