use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Spinner line shown while a send is in flight.
#[derive(Debug)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            thinking: false,
            spinner_idx: 0,
        }
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let (indicator, text) = if self.thinking {
            (
                spinner_frames[self.spinner_idx % spinner_frames.len()],
                "Waiting for the AI backend...",
            )
        } else {
            (" ", "")
        };

        let status = Line::from(vec![
            Span::styled(indicator, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(text, Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }
}

impl Default for StatusIndicator {
    fn default() -> Self {
        Self::new()
    }
}
