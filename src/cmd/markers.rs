use crate::calc::{format_time, time_markers, validate_editable_range};
use crate::data::TimeRange;
use anyhow::Result;

pub fn run(start: f64, end: f64) -> Result<()> {
    write_markers(TimeRange::new(start, end), &mut std::io::stdout())
}

pub(crate) fn write_markers<W: std::io::Write>(range: TimeRange, out: &mut W) -> Result<()> {
    validate_editable_range(range)?;
    for hour in time_markers(range) {
        writeln!(out, "  {:>5}  {}", hour, format_time(hour))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_markers_full_day() {
        let mut buf = Vec::new();
        write_markers(TimeRange::new(0.0, 24.0), &mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "      0  12:00 AM");
        assert_eq!(lines[2], "     12  12:00 PM");
        assert_eq!(lines[4], "     24  12:00 PM");
    }

    #[test]
    fn test_write_markers_rejects_short_range() {
        let mut buf = Vec::new();
        let err = write_markers(TimeRange::new(5.0, 5.5), &mut buf).unwrap_err();
        assert_eq!(err.to_string(), "Time range must be at least 1 hour");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_write_markers_rejects_out_of_bounds_range() {
        let mut buf = Vec::new();
        let err = write_markers(TimeRange::new(30.0, 100.0), &mut buf).unwrap_err();
        assert_eq!(err.to_string(), "Start time must be between 0 and 23");
        let err = write_markers(TimeRange::new(1.0e16, 1.0000000000000004e16), &mut buf)
            .unwrap_err();
        assert_eq!(err.to_string(), "Start time must be between 0 and 23");
        let err = write_markers(TimeRange::new(2.0, 30.0), &mut buf).unwrap_err();
        assert_eq!(err.to_string(), "End time must be between 1 and 24");
        assert!(buf.is_empty());
    }
}
