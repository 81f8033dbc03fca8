//! Keyboard version of a two-thumb slider over `[min, max]`.

use crate::calc::format_time;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Handle {
    #[default]
    Start,
    End,
}

impl Handle {
    pub fn other(self) -> Handle {
        match self {
            Handle::Start => Handle::End,
            Handle::End => Handle::Start,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RangeSlider {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub active: Handle,
}

impl RangeSlider {
    pub fn new(min: f64, max: f64, step: f64) -> Self {
        RangeSlider {
            min,
            max,
            step,
            active: Handle::Start,
        }
    }

    pub fn toggle_handle(&mut self) {
        self.active = self.active.other();
    }

    /// Proposes a new `(start, end)` with the active handle moved by
    /// `delta_steps` steps. The moved value snaps to the step grid, stays in
    /// `[min, max]`, and the pair comes back ordered.
    pub fn nudge(&self, value: (f64, f64), delta_steps: i32) -> (f64, f64) {
        let (start, end) = value;
        let moved = |v: f64| self.snap(v + f64::from(delta_steps) * self.step);
        let (a, b) = match self.active {
            Handle::Start => (moved(start), end),
            Handle::End => (start, moved(end)),
        };
        if a <= b { (a, b) } else { (b, a) }
    }

    fn snap(&self, v: f64) -> f64 {
        let snapped = self.min + ((v - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }

    /// Column (0-based, out of `width`) at which `v` is drawn.
    pub fn column_of(&self, v: f64, width: usize) -> usize {
        if width < 2 || self.max <= self.min {
            return 0;
        }
        let frac = ((v - self.min) / (self.max - self.min)).clamp(0.0, 1.0);
        (frac * (width - 1) as f64).round() as usize
    }

    /// One line: rail, colored track between the handles, and both value labels.
    pub fn render_line(&self, value: (f64, f64), width: usize, color: Color) -> Line<'static> {
        let labels = format!(
            " {} - {}",
            format_time(value.0),
            format_time(value.1)
        );
        let rail_width = width.saturating_sub(labels.chars().count()).max(2);
        let lo = self.column_of(value.0, rail_width);
        let hi = self.column_of(value.1, rail_width);

        let rail = Style::default().fg(Color::DarkGray);
        let track = Style::default().fg(color);
        let handle = |h: Handle| {
            let s = Style::default().fg(color).add_modifier(Modifier::BOLD);
            if h == self.active {
                s.add_modifier(Modifier::REVERSED)
            } else {
                s
            }
        };

        let mut spans = Vec::with_capacity(rail_width + 1);
        for col in 0..rail_width {
            let span = if col == lo {
                Span::styled("●", handle(Handle::Start))
            } else if col == hi {
                Span::styled("●", handle(Handle::End))
            } else if col > lo && col < hi {
                Span::styled("━", track)
            } else {
                Span::styled("─", rail)
            };
            spans.push(span);
        }
        spans.push(Span::raw(labels));
        Line::from(spans)
    }
}
