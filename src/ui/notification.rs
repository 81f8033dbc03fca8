//! The single error slot shown at the bottom of the editor.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorToast {
    pub message: String,
    pub created_at: Instant,
    pub timeout: Duration,
}

impl ErrorToast {
    pub fn new(message: impl Into<String>, timeout: Duration) -> Self {
        ErrorToast {
            message: message.into(),
            created_at: Instant::now(),
            timeout,
        }
    }

    pub fn is_expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created_at) >= self.timeout
    }
}

/// Holds at most one error; a new error replaces the current one.
#[derive(Debug, Clone)]
pub struct ErrorSlot {
    current: Option<ErrorToast>,
    timeout: Duration,
}

impl ErrorSlot {
    pub fn new(timeout: Duration) -> Self {
        ErrorSlot {
            current: None,
            timeout,
        }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        self.current = Some(ErrorToast::new(message, self.timeout));
    }

    pub fn dismiss(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ErrorToast> {
        self.current.as_ref()
    }

    /// Drops the error once its timeout has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if self.current.as_ref().is_some_and(|t| t.is_expired_at(now)) {
            self.current = None;
        }
    }

    /// Draws the toast along the bottom edge of `area`, never outside it.
    pub fn render(&self, f: &mut Frame, area: Rect) {
        let Some(toast) = &self.current else {
            return;
        };
        let width = (toast.message.chars().count() as u16 + 8).min(area.width);
        let rect = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + area.height.saturating_sub(3),
            width,
            height: 3.min(area.height),
        };
        let line = Line::from(vec![
            Span::styled(" x ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(toast.message.clone()),
        ]);
        let widget = Paragraph::new(line)
            .style(Style::default().fg(Color::White).bg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title(" Error "));
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}
