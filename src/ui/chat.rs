use crate::app::App;
use crate::session::ChatSession;
use crate::transcript::Sender;
use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Draws the open chat panel: transcript, status line, input box.
pub fn draw_chat(f: &mut Frame, app: &App, session: &ChatSession) {
    let area = f.area();
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Ask AI")
        .style(Style::default().fg(Color::LightYellow));
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Min(1),    // messages
                Constraint::Length(1), // status
                Constraint::Length(3), // input
            ]
            .as_ref(),
        )
        .split(area);

    draw_messages(f, app, session, chunks[0]);
    app.status.render(f, chunks[1]);
    draw_input(f, session, chunks[2]);
}

fn draw_messages(f: &mut Frame, app: &App, session: &ChatSession, area: Rect) {
    let width = area.width.max(1) as usize;
    let mut lines: Vec<Line> = Vec::new();

    for message in session.transcript() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }

        let (prefix, color) = match message.sender {
            Sender::User => ("You: ", Color::LightGreen),
            Sender::Bot => ("AI: ", Color::LightBlue),
        };
        let prefix_width = UnicodeWidthStr::width(prefix);
        let wrap_width = width.saturating_sub(prefix_width).max(1);

        for (idx, piece) in textwrap::wrap(&message.content, wrap_width).iter().enumerate() {
            let lead = if idx == 0 {
                Span::styled(
                    prefix,
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::raw(" ".repeat(prefix_width))
            };
            lines.push(Line::from(vec![
                lead,
                Span::styled(piece.to_string(), Style::default().fg(color)),
            ]));
        }
    }

    // lines are pre-wrapped, so their count is the content height
    let scroll = app
        .anchor
        .lock()
        .unwrap()
        .resolve(lines.len() as u16, area.height);

    f.render_widget(Paragraph::new(lines).scroll((scroll, 0)), area);
}

fn draw_input(f: &mut Frame, session: &ChatSession, area: Rect) {
    let title = if session.is_pending() {
        "Input (sending...)"
    } else {
        "Input"
    };

    let input = Paragraph::new(session.draft())
        .style(Style::default().fg(Color::LightYellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(input, area);

    let cursor_x = area.x + 1 + UnicodeWidthStr::width(session.draft()) as u16;
    f.set_cursor_position(Position::new(
        cursor_x.min(area.right().saturating_sub(2)),
        area.y + 1,
    ));
}
