use thiserror::Error;

/// Why a proposed time range was refused.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RangeIssue {
    #[error("End time must be greater than start time")]
    EndNotAfterStart,

    #[error("Time range must be at least 1 hour")]
    SpanTooShort,

    #[error("Start time must be between {min} and {max}")]
    StartOutOfBounds { min: f64, max: f64 },

    #[error("End time must be between {min} and {max}")]
    EndOutOfBounds { min: f64, max: f64 },

    #[error("'{0}' is not a number")]
    NotANumber(String),
}

/// Validation failures raised by edits to the block list or the time range.
///
/// Every variant is recoverable: the edit that produced it is discarded and the
/// previous allocation stays in place.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    #[error("{0}")]
    InvalidRange(RangeIssue),

    #[error("Time blocks must be at least 30 minutes long")]
    BlockTooShort,

    #[error("No time block at position {0}")]
    NoSuchBlock(usize),

    #[error("'{0}' is not a color like #1e88e5")]
    InvalidColor(String),
}

impl From<RangeIssue> for AllocationError {
    fn from(issue: RangeIssue) -> Self {
        AllocationError::InvalidRange(issue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_messages_match_dialog_wording() {
        assert_eq!(
            AllocationError::from(RangeIssue::EndNotAfterStart).to_string(),
            "End time must be greater than start time"
        );
        assert_eq!(
            AllocationError::from(RangeIssue::SpanTooShort).to_string(),
            "Time range must be at least 1 hour"
        );
    }

    #[test]
    fn test_block_too_short_message() {
        assert_eq!(
            AllocationError::BlockTooShort.to_string(),
            "Time blocks must be at least 30 minutes long"
        );
    }

    #[test]
    fn test_bounds_message_includes_limits() {
        let msg = RangeIssue::StartOutOfBounds { min: 0.0, max: 23.0 }.to_string();
        assert_eq!(msg, "Start time must be between 0 and 23");
    }

    #[test]
    fn test_not_a_number_echoes_input() {
        let msg = AllocationError::from(RangeIssue::NotANumber("abc".to_string())).to_string();
        assert_eq!(msg, "'abc' is not a number");
    }
}
