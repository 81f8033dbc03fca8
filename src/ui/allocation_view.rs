use crate::calc::{format_duration, format_time, time_markers, Allocation};
use crate::data::TimeRange;
use crate::error::AllocationError;
use crate::ui::dialogs::{parse_hex_color, CategoryDraft, Dialog, DialogOutcome, RangeDraft};
use crate::ui::notification::ErrorSlot;
use crate::ui::range_slider::{Handle, RangeSlider};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table},
    Frame,
};
use std::time::Duration;
use tracing::{debug, info, warn};

// Fallback for block colors the terminal can't show
const UNKNOWN_BLOCK_COLOR: Color = Color::Gray;

/// The time-allocation editor: owns the blocks, the range, the selection,
/// the open dialog (if any) and the error slot.
pub struct AllocationView {
    pub allocation: Allocation,
    pub selected_block: Option<usize>,
    pub slider: RangeSlider,
    pub dialog: Option<Dialog>,
    pub errors: ErrorSlot,
}

impl AllocationView {
    pub fn new(allocation: Allocation, step: f64, error_timeout: Duration) -> Self {
        let slider = RangeSlider::new(allocation.range.start, allocation.range.end, step);
        AllocationView {
            allocation,
            selected_block: None,
            slider,
            dialog: None,
            errors: ErrorSlot::new(error_timeout),
        }
    }

    /// Returns true when the key was used by the editor.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        if let Some(dialog) = self.dialog.as_mut() {
            match dialog.handle_key(code) {
                DialogOutcome::Editing => {}
                DialogOutcome::Cancelled => {
                    debug!("dialog cancelled");
                    self.dialog = None;
                }
                DialogOutcome::Submitted => self.submit_dialog(),
            }
            return true;
        }

        match code {
            KeyCode::Char(']') => self.select_next(),
            KeyCode::Char('[') => self.select_previous(),
            KeyCode::Right => self.nudge(1),
            KeyCode::Left => self.nudge(-1),
            KeyCode::Char(' ') => self.slider.toggle_handle(),
            KeyCode::Char('a') => self.dialog = Some(Dialog::AddCategory(CategoryDraft::default())),
            KeyCode::Char('o') => self.open_range_settings(),
            KeyCode::Char('d') | KeyCode::Delete => self.remove_selected(),
            KeyCode::Esc if self.selected_block.is_some() => self.selected_block = None,
            _ => return false,
        }
        true
    }

    fn select_next(&mut self) {
        let len = self.allocation.blocks.len();
        if len == 0 {
            return;
        }
        self.selected_block = Some(match self.selected_block {
            Some(i) if i + 1 < len => i + 1,
            Some(i) => i,
            None => 0,
        });
    }

    fn select_previous(&mut self) {
        let len = self.allocation.blocks.len();
        if len == 0 {
            return;
        }
        self.selected_block = Some(match self.selected_block {
            Some(i) => i.saturating_sub(1),
            None => len - 1,
        });
    }

    /// Moves the active handle of the selected block by `delta_steps` slider steps.
    pub fn nudge(&mut self, delta_steps: i32) {
        let Some(index) = self.selected_block else {
            return;
        };
        let Some(block) = self.allocation.blocks.get(index) else {
            return;
        };
        let current = (block.start, block.end);
        let (start, end) = self.slider.nudge(current, delta_steps);
        if (start, end) != current {
            self.adjust_block(index, start, end);
        }
    }

    /// Commits a boundary change, or reports why it was refused.
    pub fn adjust_block(&mut self, index: usize, start: f64, end: f64) {
        match self.allocation.adjusted(index, start, end) {
            Ok(next) => {
                debug!(index, start, end, "block adjusted");
                self.allocation = next;
            }
            Err(e) => self.report(e),
        }
    }

    pub fn open_range_settings(&mut self) {
        self.dialog = Some(Dialog::RangeSettings(RangeDraft::from_range(
            self.allocation.range,
        )));
    }

    /// Rescales the blocks into `range`. Returns false if the range was refused.
    pub fn apply_range(&mut self, range: TimeRange) -> bool {
        match self.allocation.rescaled(range) {
            Ok(next) => {
                info!(start = range.start, end = range.end, "time range changed");
                self.allocation = next;
                self.slider.min = range.start;
                self.slider.max = range.end;
                true
            }
            Err(e) => {
                self.report(e);
                false
            }
        }
    }

    /// Appends a category block. Returns false when the dialog should stay open.
    pub fn add_category(&mut self, draft: &CategoryDraft) -> bool {
        if draft.name.trim().is_empty() {
            return false;
        }
        let color = match draft.checked_color() {
            Ok(c) => c,
            Err(e) => {
                self.report(e);
                return false;
            }
        };
        match self.allocation.with_category(&draft.name, &color) {
            Some(next) => {
                info!(category = draft.name.trim(), %color, "category added");
                self.allocation = next;
            }
            None => info!(category = draft.name.trim(), "no room left for category"),
        }
        true
    }

    pub fn remove_selected(&mut self) {
        let Some(index) = self.selected_block.take() else {
            return;
        };
        if let Some(block) = self.allocation.blocks.get(index) {
            info!(index, category = %block.category, "category removed");
        }
        self.allocation = self.allocation.without_block(index);
    }

    fn submit_dialog(&mut self) {
        let Some(dialog) = self.dialog.clone() else {
            return;
        };
        let close = match dialog {
            Dialog::AddCategory(draft) => self.add_category(&draft),
            Dialog::RangeSettings(draft) => match draft.parse() {
                Ok(range) => self.apply_range(range),
                Err(e) => {
                    self.report(e);
                    false
                }
            },
        };
        if close {
            self.dialog = None;
        }
    }

    fn report(&mut self, err: AllocationError) {
        warn!(error = %err, "edit rejected");
        self.errors.show(err.to_string());
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool) {
        let border = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let outer = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Daily Time Allocation ");
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // range summary
                Constraint::Length(2), // marker labels + ticks
                Constraint::Length(4), // block bar + selection underline
                Constraint::Length(4), // selected block controls
                Constraint::Min(0),    // key bindings
            ])
            .split(inner);

        self.render_summary(f, chunks[0]);
        self.render_markers(f, chunks[1]);
        self.render_bar(f, chunks[2]);
        self.render_selected(f, chunks[3]);
        render_help(f, chunks[4]);
    }

    fn render_summary(&self, f: &mut Frame, area: Rect) {
        let range = self.allocation.range;
        let line = Line::from(vec![
            Span::styled("Range ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!(
                "{} – {}",
                format_time(range.start),
                format_time(range.end)
            )),
            Span::styled("   Covered ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(format!(
                "{} of {}",
                format_duration(self.allocation.covered_hours()),
                format_duration(range.span())
            )),
            Span::styled("   Blocks ", Style::default().add_modifier(Modifier::DIM)),
            Span::raw(self.allocation.blocks.len().to_string()),
        ]);
        f.render_widget(Paragraph::new(line), area);
    }

    fn render_markers(&self, f: &mut Frame, area: Rect) {
        let (labels, ticks) = marker_rows(self.allocation.range, area.width as usize);
        let style = Style::default().fg(Color::Gray);
        let p = Paragraph::new(vec![
            Line::from(Span::styled(labels, style)),
            Line::from(Span::styled(ticks, Style::default().fg(Color::DarkGray))),
        ]);
        f.render_widget(p, area);
    }

    fn render_bar(&self, f: &mut Frame, area: Rect) {
        let width = area.width as usize;
        let columns = block_columns(&self.allocation, width);
        let runs = column_runs(&columns);

        let mut top = Vec::new();
        let mut middle = Vec::new();
        let mut bottom = Vec::new();
        let mut underline = Vec::new();
        for (owner, len) in runs {
            let Some(i) = owner else {
                let gap = " ".repeat(len);
                top.push(Span::raw(gap.clone()));
                middle.push(Span::raw(gap.clone()));
                bottom.push(Span::raw(gap.clone()));
                underline.push(Span::raw(gap));
                continue;
            };
            let block = &self.allocation.blocks[i];
            let bg = parse_hex_color(&block.color).unwrap_or(UNKNOWN_BLOCK_COLOR);
            let fill = Style::default().bg(bg);
            let label_style = fill.fg(Color::White).add_modifier(Modifier::BOLD);
            let blank = " ".repeat(len);
            top.push(Span::styled(blank.clone(), fill));
            middle.push(Span::styled(fit_label(&block.category, len), label_style));
            bottom.push(Span::styled(blank.clone(), fill));
            if self.selected_block == Some(i) {
                underline.push(Span::styled(
                    "▔".repeat(len),
                    Style::default().fg(Color::Yellow),
                ));
            } else {
                underline.push(Span::raw(blank));
            }
        }

        let p = Paragraph::new(vec![
            Line::from(top),
            Line::from(middle),
            Line::from(bottom),
            Line::from(underline),
        ]);
        f.render_widget(p, area);
    }

    fn render_selected(&self, f: &mut Frame, area: Rect) {
        let selected = self
            .selected_block
            .and_then(|i| self.allocation.blocks.get(i));
        let Some(block) = selected else {
            let hint = if self.allocation.blocks.is_empty() {
                "No blocks. Press a to add a category."
            } else {
                "Select a block with [ and ]"
            };
            let p = Paragraph::new(Line::from(Span::styled(
                hint,
                Style::default().fg(Color::DarkGray),
            )));
            f.render_widget(p, area);
            return;
        };

        let color = parse_hex_color(&block.color).unwrap_or(UNKNOWN_BLOCK_COLOR);
        let handle_name = match self.slider.active {
            Handle::Start => "start",
            Handle::End => "end",
        };
        let lines = vec![
            Line::from(vec![
                Span::styled(
                    block.category.clone(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}  {}", block.color, format_duration(block.duration())),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            self.slider
                .render_line((block.start, block.end), area.width as usize, color),
            Line::from(Span::styled(
                format!("moving {} handle  (Space to switch, d to delete)", handle_name),
                Style::default().fg(Color::DarkGray),
            )),
        ];
        f.render_widget(Paragraph::new(lines), area);
    }

    /// The dialog is centered on `screen`; the error toast sits at the bottom
    /// of the editor, inside its border.
    pub fn render_overlays(&self, f: &mut Frame, screen: Rect, editor: Rect) {
        if let Some(dialog) = &self.dialog {
            dialog.render(f, screen);
        }
        self.errors
            .render(f, Block::default().borders(Borders::ALL).inner(editor));
    }
}

fn render_help(f: &mut Frame, area: Rect) {
    let key_rows: Vec<Row> = vec![
        Row::new(vec!["[ / ]", "Select block", "← →", "Move handle"]),
        Row::new(vec!["Space", "Switch handle", "d", "Delete block"]),
        Row::new(vec!["a", "Add category", "o", "Time range"]),
        Row::new(vec!["Tab", "Focus calendar", "x", "Dismiss error"]),
        Row::new(vec!["q/Ctrl+C", "Quit", "", ""]),
    ];
    let table = Table::new(
        key_rows,
        [
            Constraint::Length(10),
            Constraint::Length(18),
            Constraint::Length(6),
            Constraint::Length(18),
        ],
    )
    .style(Style::default().fg(Color::DarkGray))
    .column_spacing(1);
    f.render_widget(table, area);
}

// ── Layout helpers ────────────────────────────────────────────────────────────

/// Column (0-based, out of `width`) where `hour` sits on the axis.
pub(crate) fn hour_to_column(range: TimeRange, hour: f64, width: usize) -> usize {
    if width < 2 || range.span() <= 0.0 {
        return 0;
    }
    let frac = ((hour - range.start) / range.span()).clamp(0.0, 1.0);
    (frac * (width - 1) as f64).round() as usize
}

/// The label row and tick row drawn above the bar.
pub(crate) fn marker_rows(range: TimeRange, width: usize) -> (String, String) {
    let mut labels = vec![' '; width];
    let mut ticks = vec![' '; width];
    let mut next_free = 0usize;
    for hour in time_markers(range) {
        let col = hour_to_column(range, hour, width);
        if col < width {
            ticks[col] = '│';
        }
        let label: Vec<char> = format_time(hour).chars().collect();
        if label.len() > width {
            continue;
        }
        let pos = col
            .saturating_sub(label.len() / 2)
            .min(width - label.len());
        if pos < next_free {
            continue;
        }
        labels[pos..pos + label.len()].copy_from_slice(&label);
        next_free = pos + label.len() + 1;
    }
    (labels.into_iter().collect(), ticks.into_iter().collect())
}

/// For each of `width` columns, the block drawn there. Later blocks are drawn
/// over earlier ones where they overlap.
pub(crate) fn block_columns(allocation: &Allocation, width: usize) -> Vec<Option<usize>> {
    let range = allocation.range;
    (0..width)
        .map(|col| {
            let hour = range.start + (col as f64 + 0.5) / width as f64 * range.span();
            allocation
                .blocks
                .iter()
                .rposition(|b| b.start <= hour && hour < b.end)
        })
        .collect()
}

/// Collapses per-column owners into `(owner, run_length)` pairs.
pub(crate) fn column_runs(columns: &[Option<usize>]) -> Vec<(Option<usize>, usize)> {
    let mut runs: Vec<(Option<usize>, usize)> = Vec::new();
    for &owner in columns {
        match runs.last_mut() {
            Some((last, len)) if *last == owner => *len += 1,
            _ => runs.push((owner, 1)),
        }
    }
    runs
}

/// Centers `label` in `len` columns, truncating it when it does not fit.
pub(crate) fn fit_label(label: &str, len: usize) -> String {
    let truncated: String = label.chars().take(len).collect();
    format!("{:^len$}", truncated, len = len)
}
