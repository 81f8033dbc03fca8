pub mod allocation;
pub mod markers;

pub use allocation::{validate_editable_range, Allocation};
pub use markers::{format_duration, format_time, time_markers};
