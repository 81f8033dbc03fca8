use chrono::{Datelike, Duration, NaiveDate};
use crossterm::event::KeyCode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

// Calendar cell colors
const RANGE_COLOR: Color = Color::Indexed(31); // steel blue
const ANCHOR_COLOR: Color = Color::Indexed(208); // reddish-orange

/// Inner width of the calendar panel.
pub const DESCRIBE_WIDTH: usize = 22;

/// What the calendar currently has picked. Nothing else in the app reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single(NaiveDate),
    /// Inclusive, earliest date first.
    Range(NaiveDate, NaiveDate),
}

impl Selection {
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Selection::Single(d) => d == date,
            Selection::Range(a, b) => a <= date && date <= b,
        }
    }

    /// One line of at most `DESCRIBE_WIDTH` characters for the calendar panel.
    pub fn describe(&self) -> String {
        match *self {
            Selection::Single(d) => d.format("%a %b %-d, %Y").to_string(),
            Selection::Range(a, b) if a.year() == b.year() => format!(
                "{} – {}",
                a.format("%b %-d"),
                b.format("%b %-d, %Y")
            ),
            Selection::Range(a, b) => {
                format!("{} – {}", a.format("%-m/%-d/%y"), b.format("%-m/%-d/%y"))
            }
        }
    }
}

pub struct CalendarView {
    pub cursor: NaiveDate,
    pub today: NaiveDate,
    pub selection: Selection,
    /// When true, Enter picks range endpoints instead of single days.
    pub range_mode: bool,
    /// First endpoint of a range that is still being picked.
    pub anchor: Option<NaiveDate>,
}

impl CalendarView {
    pub fn new(today: NaiveDate) -> Self {
        CalendarView {
            cursor: today,
            today,
            selection: Selection::Single(today),
            range_mode: false,
            anchor: None,
        }
    }

    /// Returns true when the key was used by the calendar.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Left => self.shift_days(-1),
            KeyCode::Right => self.shift_days(1),
            KeyCode::Up => self.shift_days(-7),
            KeyCode::Down => self.shift_days(7),
            KeyCode::PageUp | KeyCode::Char('<') => self.cursor = add_months(self.cursor, -1),
            KeyCode::PageDown | KeyCode::Char('>') => self.cursor = add_months(self.cursor, 1),
            KeyCode::Char('t') => self.cursor = self.today,
            KeyCode::Char('r') => {
                self.range_mode = !self.range_mode;
                self.anchor = None;
            }
            KeyCode::Enter => self.pick(),
            KeyCode::Esc if self.anchor.is_some() => self.anchor = None,
            _ => return false,
        }
        true
    }

    fn shift_days(&mut self, days: i64) {
        if let Some(d) = self.cursor.checked_add_signed(Duration::days(days)) {
            self.cursor = d;
        }
    }

    fn pick(&mut self) {
        let date = self.cursor;
        if !self.range_mode {
            self.selection = Selection::Single(date);
            return;
        }
        match self.anchor.take() {
            None => self.anchor = Some(date),
            Some(a) => {
                let (start, end) = if a <= date { (a, date) } else { (date, a) };
                self.selection = Selection::Range(start, end);
                tracing::debug!(%start, %end, "calendar range picked");
            }
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let year = self.cursor.year();
        let month = self.cursor.month();

        let title = format!("{} {}", month_name(month), year);
        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                format!("{:^20}", title),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )),
            Line::from("Su Mo Tu We Th Fr Sa"),
        ];

        let days = days_in_month(year, month);
        let Some(first_of_month) = NaiveDate::from_ymd_opt(year, month, 1) else {
            return;
        };
        let start_dow = first_of_month.weekday().num_days_from_sunday() as usize;

        let mut day = 1u32;
        for row in 0..6 {
            if day > days {
                break;
            }
            let mut spans = Vec::new();
            for col in 0..7usize {
                if (row == 0 && col < start_dow) || day > days {
                    spans.push(Span::raw("   "));
                    continue;
                }
                let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                    break;
                };
                let style = calendar_day_style(
                    date == self.cursor && focused,
                    self.selection.contains(date),
                    self.anchor == Some(date),
                    date == self.today,
                    matches!(col, 0 | 6),
                );
                spans.push(Span::styled(format!("{:2}", day), style));
                spans.push(Span::raw(" "));
                day += 1;
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            self.selection.describe(),
            Style::default().fg(Color::Cyan),
        )));
        if self.range_mode {
            let hint = if self.anchor.is_some() {
                "range: pick end date"
            } else {
                "range: pick start date"
            };
            lines.push(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )));
        }

        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let widget = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(" Calendar "),
        );
        f.render_widget(widget, area);
    }
}

// ── Calendar helpers ──────────────────────────────────────────────────────────

pub(crate) fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => "Unknown",
    }
}

pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    match (
        NaiveDate::from_ymd_opt(next_year, next_month, 1),
        NaiveDate::from_ymd_opt(year, month, 1),
    ) {
        (Some(next), Some(first)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

pub(crate) fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let year = date.year();
    let month = date.month() as i32;
    let new_total = month - 1 + months;
    let new_month = (new_total.rem_euclid(12) + 1) as u32;
    let new_year = year + new_total.div_euclid(12);
    let new_day = date.day().min(days_in_month(new_year, new_month));
    NaiveDate::from_ymd_opt(new_year, new_month, new_day).unwrap_or(date)
}

/// Determines the ratatui `Style` for a calendar day cell based on its state.
pub(crate) fn calendar_day_style(
    is_cursor: bool,
    is_selected: bool,
    is_anchor: bool,
    is_today: bool,
    is_weekend: bool,
) -> Style {
    if is_cursor {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else if is_anchor {
        Style::default()
            .fg(Color::Black)
            .bg(ANCHOR_COLOR)
            .add_modifier(Modifier::BOLD)
    } else if is_selected {
        let mut s = Style::default().fg(Color::White).bg(RANGE_COLOR);
        if is_today {
            s = s.add_modifier(Modifier::BOLD);
        }
        s
    } else if is_today {
        Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
    } else if is_weekend {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    }
}
