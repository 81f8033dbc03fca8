use crate::calc::Allocation;
use crate::data::DayConfig;
use crate::ui::allocation_view::AllocationView;
use crate::ui::calendar_view::{CalendarView, DESCRIBE_WIDTH};
use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use std::io::Stdout;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Calendar,
    #[default]
    Editor,
}

/// Root view: the calendar and the editor side by side, plus a footer.
pub struct App {
    pub calendar: CalendarView,
    pub editor: AllocationView,
    pub focus: Focus,
    /// Shown in the footer so the user knows where config.yaml was read from.
    data_dir: PathBuf,
}

impl App {
    pub fn new(config: DayConfig, today: NaiveDate, data_dir: PathBuf) -> Self {
        let allocation = Allocation::new(config.settings.time_range, config.blocks);
        let editor = AllocationView::new(
            allocation,
            config.settings.slider_step,
            Duration::from_secs(config.settings.error_timeout_secs),
        );
        App {
            calendar: CalendarView::new(today),
            editor,
            focus: Focus::default(),
            data_dir,
        }
    }

    /// Returns true if the app should quit.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        // An open dialog takes every key, including q and Tab.
        if self.editor.dialog.is_some() {
            self.editor.handle_key(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('x') => self.editor.errors.dismiss(),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::Calendar => Focus::Editor,
                    Focus::Editor => Focus::Calendar,
                };
            }
            _ => {
                match self.focus {
                    Focus::Calendar => self.calendar.handle_key(code),
                    Focus::Editor => self.editor.handle_key(code),
                };
            }
        }
        false
    }

    /// Time-based housekeeping run once per loop iteration.
    pub fn tick(&mut self, now: Instant) {
        self.editor.errors.tick(now);
    }

    pub fn render(&self, f: &mut Frame) {
        let size = f.area();

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(13), // calendar (title + header + 6 weeks + selection + borders)
                Constraint::Min(16),    // allocation editor
                Constraint::Length(1),  // footer
            ])
            .split(size);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(DESCRIBE_WIDTH as u16 + 2), Constraint::Min(0)])
            .split(rows[0]);

        self.calendar
            .render(f, top[0], self.focus == Focus::Calendar);
        self.render_calendar_help(f, top[1]);
        self.editor
            .render(f, rows[1], self.focus == Focus::Editor);

        let footer = Paragraph::new(Line::from(vec![
            Span::styled("Config  ", Style::default().add_modifier(Modifier::DIM)),
            Span::styled(
                self.data_dir.join("config.yaml").to_string_lossy().to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
        f.render_widget(footer, rows[2]);

        self.editor.render_overlays(f, size, rows[1]);
    }

    fn render_calendar_help(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let dim = Style::default().fg(Color::DarkGray);
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled("  ← → ↑ ↓   Move day / week", dim)),
            Line::from(Span::styled("  < PgUp    Previous month", dim)),
            Line::from(Span::styled("  > PgDn    Next month", dim)),
            Line::from(Span::styled("  Enter     Pick date", dim)),
            Line::from(Span::styled("  r         Toggle range picking", dim)),
            Line::from(Span::styled("  t         Jump to today", dim)),
            Line::from(Span::styled("  Tab       Switch calendar / editor", dim)),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }
}

// ── App event loop ────────────────────────────────────────────────────────────

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        app.tick(Instant::now());
        terminal.draw(|f| app.render(f))?;
        if event::poll(Duration::from_millis(16))? {
            if let CEvent::Key(key) = event::read()? {
                // Windows reports releases too
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.handle_key(key.code, key.modifiers) {
                    break;
                }
            }
        }
    }
    Ok(())
}
