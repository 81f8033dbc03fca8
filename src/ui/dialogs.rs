//! Modal dialogs for adding a category and editing the time range.
//!
//! Both dialogs edit a draft; nothing reaches the allocation until the
//! draft is submitted and validated.

use crate::calc::validate_editable_range;
use crate::data::TimeRange;
use crate::error::{AllocationError, RangeIssue};
use crate::ui::centered_rect;
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub const DEFAULT_COLOR: &str = "#000000";

/// Which of the two text fields has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Field {
    #[default]
    First,
    Second,
}

impl Field {
    fn other(self) -> Field {
        match self {
            Field::First => Field::Second,
            Field::Second => Field::First,
        }
    }
}

/// What a key press did to an open dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogOutcome {
    Editing,
    Cancelled,
    Submitted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDraft {
    pub name: String,
    pub color: String,
    pub field: Field,
}

impl Default for CategoryDraft {
    fn default() -> Self {
        CategoryDraft {
            name: String::new(),
            color: DEFAULT_COLOR.to_string(),
            field: Field::First,
        }
    }
}

impl CategoryDraft {
    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            Field::First => &mut self.name,
            Field::Second => &mut self.color,
        }
    }

    /// Checks the color field; the name is checked by the allocation itself.
    pub fn checked_color(&self) -> Result<String, AllocationError> {
        let color = self.color.trim();
        match parse_hex_color(color) {
            Some(_) => Ok(color.to_lowercase()),
            None => Err(AllocationError::InvalidColor(color.to_string())),
        }
    }
}

/// Scratch copy of the time range while the settings dialog is open.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeDraft {
    pub start: String,
    pub end: String,
    pub field: Field,
}

impl RangeDraft {
    pub fn from_range(range: TimeRange) -> Self {
        RangeDraft {
            start: trim_hours(range.start),
            end: trim_hours(range.end),
            field: Field::First,
        }
    }

    fn active_buffer(&mut self) -> &mut String {
        match self.field {
            Field::First => &mut self.start,
            Field::Second => &mut self.end,
        }
    }

    /// Parses both fields and checks the result against the editing bounds.
    pub fn parse(&self) -> Result<TimeRange, AllocationError> {
        let range = TimeRange::new(parse_hours(&self.start)?, parse_hours(&self.end)?);
        validate_editable_range(range)?;
        Ok(range)
    }
}

fn parse_hours(raw: &str) -> Result<f64, AllocationError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RangeIssue::NotANumber(trimmed.to_string()).into())
}

fn trim_hours(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dialog {
    AddCategory(CategoryDraft),
    RangeSettings(RangeDraft),
}

impl Dialog {
    /// Routes a key to the open dialog's text fields.
    pub fn handle_key(&mut self, code: KeyCode) -> DialogOutcome {
        match code {
            KeyCode::Esc => return DialogOutcome::Cancelled,
            KeyCode::Enter => return DialogOutcome::Submitted,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => match self {
                Dialog::AddCategory(d) => d.field = d.field.other(),
                Dialog::RangeSettings(d) => d.field = d.field.other(),
            },
            KeyCode::Backspace => {
                self.active_buffer().pop();
            }
            KeyCode::Char(c) => self.active_buffer().push(c),
            _ => {}
        }
        DialogOutcome::Editing
    }

    fn active_buffer(&mut self) -> &mut String {
        match self {
            Dialog::AddCategory(d) => d.active_buffer(),
            Dialog::RangeSettings(d) => d.active_buffer(),
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect) {
        let (title, hint, rows) = match self {
            Dialog::AddCategory(d) => (
                " Add New Category ",
                "Tab=switch field  Enter=add  Esc=cancel",
                vec![
                    ("Category Name", d.name.as_str(), d.field == Field::First),
                    ("Color", d.color.as_str(), d.field == Field::Second),
                ],
            ),
            Dialog::RangeSettings(d) => (
                " Time Range Settings ",
                "Tab=switch field  Enter=apply  Esc=cancel",
                vec![
                    ("Start Time (0-23)", d.start.as_str(), d.field == Field::First),
                    ("End Time (1-24)", d.end.as_str(), d.field == Field::Second),
                ],
            ),
        };

        let mut lines: Vec<Line> = vec![Line::from("")];
        for (label, value, active) in rows {
            let value_style = if active {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let cursor = if active { "_" } else { "" };
            let mut spans = vec![
                Span::styled(format!("  {:<18}", label), Style::default().fg(Color::Gray)),
                Span::styled(format!("{}{}", value, cursor), value_style),
            ];
            // color swatch
            if matches!(self, Dialog::AddCategory(_)) && label == "Color" {
                if let Some(c) = parse_hex_color(value.trim()) {
                    spans.push(Span::raw("  "));
                    spans.push(Span::styled("    ", Style::default().bg(c)));
                }
            }
            lines.push(Line::from(spans));
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("  {}", hint),
            Style::default().fg(Color::DarkGray),
        )));

        let rect = centered_rect(52, lines.len() as u16 + 2, area);
        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(title),
        );
        f.render_widget(Clear, rect);
        f.render_widget(widget, rect);
    }
}

/// Parses `#rrggbb` into a terminal color.
pub(crate) fn parse_hex_color(s: &str) -> Option<Color> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}
