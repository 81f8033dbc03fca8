use serde::{Deserialize, Serialize};

/// Shortest block the editor will accept, in hours.
pub const MIN_BLOCK_HOURS: f64 = 0.5;

/// Shortest time range the settings dialog will accept, in hours.
pub const MIN_RANGE_HOURS: f64 = 1.0;

/// A labeled, colored half-open interval `[start, end)` on the hour axis.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct TimeBlock {
    pub start: f64,
    pub end: f64,
    pub category: String,
    pub color: String,
}

impl TimeBlock {
    pub fn new(start: f64, end: f64, category: &str, color: &str) -> Self {
        TimeBlock {
            start,
            end,
            category: category.to_string(),
            color: color.to_string(),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    pub fn is_too_short(&self) -> bool {
        self.duration() < MIN_BLOCK_HOURS
    }
}

/// The `[start, end)` hour window tiled by the blocks.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct TimeRange {
    pub start: f64,
    pub end: f64,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange {
            start: 0.0,
            end: 24.0,
        }
    }
}

impl TimeRange {
    pub fn new(start: f64, end: f64) -> Self {
        TimeRange { start, end }
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    /// True when `[start, end)` shares no time with this range.
    pub fn is_disjoint_from(&self, start: f64, end: f64) -> bool {
        start >= self.end || end <= self.start
    }
}

/// The five blocks a fresh editor starts with.
pub fn default_blocks() -> Vec<TimeBlock> {
    vec![
        TimeBlock::new(0.0, 4.0, "Sleep", "#2196f3"),
        TimeBlock::new(4.0, 8.0, "Work", "#4caf50"),
        TimeBlock::new(8.0, 12.0, "Exercise", "#ff9800"),
        TimeBlock::new(12.0, 16.0, "Leisure", "#9c27b0"),
        TimeBlock::new(16.0, 24.0, "Family Time", "#f44336"),
    ]
}
