use crate::data::TimeRange;

/// Number of strides the marker row is split into.
const MARKER_DIVISIONS: f64 = 4.0;

/// Label positions for the hour axis: `range.start`, then every
/// `ceil(span / 4)` hours, always ending on `range.end`.
pub fn time_markers(range: TimeRange) -> Vec<f64> {
    let interval = (range.span() / MARKER_DIVISIONS).ceil();
    let mut markers = Vec::new();
    if interval > 0.0 {
        // Step by index: `t += interval` stops moving once `t` is large.
        let mut i = 0.0;
        loop {
            let t = range.start + i * interval;
            if t.is_nan() || t > range.end {
                break;
            }
            markers.push(t);
            i += 1.0;
        }
    }
    if !markers.contains(&range.end) {
        markers.push(range.end);
    }
    markers
}

/// Formats an hour value as a 12-hour clock label, e.g. `13.5` -> `"1:30 PM"`.
pub fn format_time(hour: f64) -> String {
    let total_minutes = (hour * 60.0).round() as i64;
    let hours = total_minutes.div_euclid(60);
    let minutes = total_minutes.rem_euclid(60);
    let period = if hours >= 12 { "PM" } else { "AM" };
    let display_hour = match hours.rem_euclid(12) {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", display_hour, minutes, period)
}

/// Formats a duration in hours as `"4h"` or `"2h 30m"`.
pub fn format_duration(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let (h, m) = (total_minutes / 60, total_minutes % 60);
    if m == 0 {
        format!("{}h", h)
    } else if h == 0 {
        format!("{}m", m)
    } else {
        format!("{}h {}m", h, m)
    }
}
