use crate::data::{TimeBlock, TimeRange, MIN_BLOCK_HOURS, MIN_RANGE_HOURS};
use crate::error::{AllocationError, RangeIssue};

/// The blocks being edited together with the window they live in.
///
/// Edits never mutate in place: each operation returns a fresh `Allocation`
/// (or a rejection) and the caller swaps it in wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Allocation {
    pub range: TimeRange,
    pub blocks: Vec<TimeBlock>,
}

/// Rejects ranges whose end is not after the start or that span under an hour.
pub fn validate_range(range: TimeRange) -> Result<(), AllocationError> {
    if range.end <= range.start {
        return Err(RangeIssue::EndNotAfterStart.into());
    }
    if range.span() < MIN_RANGE_HOURS {
        return Err(RangeIssue::SpanTooShort.into());
    }
    Ok(())
}

/// Hours the range start may take when edited or configured.
pub const START_BOUNDS: (f64, f64) = (0.0, 23.0);
/// Hours the range end may take when edited or configured.
pub const END_BOUNDS: (f64, f64) = (1.0, 24.0);

/// `validate_range` plus the editing bounds: start in [0, 23], end in [1, 24].
/// Every range that reaches the editor or the marker axis passes through here.
pub fn validate_editable_range(range: TimeRange) -> Result<(), AllocationError> {
    if !(START_BOUNDS.0..=START_BOUNDS.1).contains(&range.start) {
        return Err(RangeIssue::StartOutOfBounds {
            min: START_BOUNDS.0,
            max: START_BOUNDS.1,
        }
        .into());
    }
    if !(END_BOUNDS.0..=END_BOUNDS.1).contains(&range.end) {
        return Err(RangeIssue::EndOutOfBounds {
            min: END_BOUNDS.0,
            max: END_BOUNDS.1,
        }
        .into());
    }
    validate_range(range)
}

impl Allocation {
    pub fn new(range: TimeRange, blocks: Vec<TimeBlock>) -> Self {
        Allocation { range, blocks }
    }

    /// Moves the bounds of block `index` to `[new_start, new_end]`, dragging the
    /// shared edge of each neighbour along so the tiling stays contiguous.
    ///
    /// The edited block is clamped into the range, and the whole edit is
    /// refused if it or a neighbour would end up shorter than half an hour.
    pub fn adjusted(
        &self,
        index: usize,
        new_start: f64,
        new_end: f64,
    ) -> Result<Allocation, AllocationError> {
        let current = self
            .blocks
            .get(index)
            .ok_or(AllocationError::NoSuchBlock(index))?;

        if new_end - new_start < MIN_BLOCK_HOURS {
            return Err(AllocationError::BlockTooShort);
        }

        let has_prev = index > 0;
        let has_next = index + 1 < self.blocks.len();
        let start_moved = new_start != current.start;
        let end_moved = new_end != current.end;

        let mut blocks = self.blocks.clone();
        blocks[index].start = new_start;
        blocks[index].end = new_end;

        if has_prev && start_moved {
            blocks[index - 1].end = new_start;
        }
        if has_next && end_moved {
            blocks[index + 1].start = new_end;
        }

        if blocks[index].end > self.range.end {
            blocks[index].end = self.range.end;
            if has_next {
                blocks[index + 1].start = self.range.end;
            }
        }
        if blocks[index].start < self.range.start {
            blocks[index].start = self.range.start;
            if has_prev {
                blocks[index - 1].end = self.range.start;
            }
        }

        if has_prev && blocks[index - 1].is_too_short() {
            return Err(AllocationError::BlockTooShort);
        }
        if has_next && blocks[index + 1].is_too_short() {
            return Err(AllocationError::BlockTooShort);
        }

        Ok(Allocation {
            range: self.range,
            blocks,
        })
    }

    /// Fits every block into `new_range`. Blocks that overlap it are clipped to
    /// the overlap; blocks entirely outside it are moved to its start with their
    /// duration kept (but cut off at its end).
    ///
    /// Blocks are fitted one at a time, so the result may overlap or leave gaps.
    pub fn rescaled(&self, new_range: TimeRange) -> Result<Allocation, AllocationError> {
        validate_range(new_range)?;

        let blocks = self
            .blocks
            .iter()
            .map(|block| {
                let (start, end) = if new_range.is_disjoint_from(block.start, block.end) {
                    let start = new_range.start;
                    (start, (start + block.duration()).min(new_range.end))
                } else {
                    (
                        new_range.start.max(block.start),
                        new_range.end.min(block.end),
                    )
                };
                TimeBlock {
                    start,
                    end,
                    ..block.clone()
                }
            })
            .collect();

        Ok(Allocation {
            range: new_range,
            blocks,
        })
    }

    /// Appends a block named `name` covering the gap between the last block
    /// and the end of the range.
    ///
    /// Returns `None` when the trimmed name is empty or there is no room left.
    pub fn with_category(&self, name: &str, color: &str) -> Option<Allocation> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }
        let start = self
            .blocks
            .last()
            .map(|b| b.end)
            .unwrap_or(self.range.start);
        if start >= self.range.end {
            return None;
        }

        let mut blocks = self.blocks.clone();
        blocks.push(TimeBlock::new(start, self.range.end, name, color));
        Some(Allocation {
            range: self.range,
            blocks,
        })
    }

    /// Drops block `index`; the block before it grows to cover the hole.
    pub fn without_block(&self, index: usize) -> Allocation {
        let mut blocks = self.blocks.clone();
        if index >= blocks.len() {
            return self.clone();
        }
        let removed = blocks.remove(index);
        if index > 0 {
            blocks[index - 1].end = removed.end;
        }
        Allocation {
            range: self.range,
            blocks,
        }
    }

    /// Sum of all block durations, in hours.
    pub fn covered_hours(&self) -> f64 {
        self.blocks.iter().map(TimeBlock::duration).sum()
    }

    /// True when every block touches the next one and together they span the range.
    pub fn is_contiguous(&self) -> bool {
        let (Some(first), Some(last)) = (self.blocks.first(), self.blocks.last()) else {
            return false;
        };
        first.start == self.range.start
            && last.end == self.range.end
            && self.blocks.windows(2).all(|w| w[0].end == w[1].start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::default_blocks;

    fn default_allocation() -> Allocation {
        Allocation::new(TimeRange::default(), default_blocks())
    }

    fn bounds(a: &Allocation) -> Vec<(f64, f64)> {
        a.blocks.iter().map(|b| (b.start, b.end)).collect()
    }

    // ── validate_range ────────────────────────────────────────────────────────

    #[test]
    fn test_validate_range_accepts_full_day() {
        assert!(validate_range(TimeRange::new(0.0, 24.0)).is_ok());
    }

    #[test]
    fn test_validate_range_end_equal_start() {
        let err = validate_range(TimeRange::new(8.0, 8.0)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::EndNotAfterStart));
    }

    #[test]
    fn test_validate_range_under_one_hour() {
        let err = validate_range(TimeRange::new(5.0, 5.5)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::SpanTooShort));
    }

    #[test]
    fn test_validate_range_exactly_one_hour() {
        assert!(validate_range(TimeRange::new(5.0, 6.0)).is_ok());
    }

    #[test]
    fn test_validate_editable_range_accepts_bound_edges() {
        assert!(validate_editable_range(TimeRange::new(0.0, 24.0)).is_ok());
        assert!(validate_editable_range(TimeRange::new(23.0, 24.0)).is_ok());
        assert!(validate_editable_range(TimeRange::new(0.0, 1.0)).is_ok());
    }

    #[test]
    fn test_validate_editable_range_start_out_of_bounds() {
        let err = validate_editable_range(TimeRange::new(30.0, 100.0)).unwrap_err();
        assert_eq!(
            err,
            AllocationError::InvalidRange(RangeIssue::StartOutOfBounds { min: 0.0, max: 23.0 })
        );
        assert!(validate_editable_range(TimeRange::new(-1.0, 10.0)).is_err());
    }

    #[test]
    fn test_validate_editable_range_end_out_of_bounds() {
        let err = validate_editable_range(TimeRange::new(2.0, 25.0)).unwrap_err();
        assert_eq!(
            err,
            AllocationError::InvalidRange(RangeIssue::EndOutOfBounds { min: 1.0, max: 24.0 })
        );
    }

    #[test]
    fn test_validate_editable_range_rejects_huge_and_nan() {
        assert!(validate_editable_range(TimeRange::new(1.0e16, 1.0000000000000004e16)).is_err());
        assert!(validate_editable_range(TimeRange::new(f64::NAN, 10.0)).is_err());
        assert!(validate_editable_range(TimeRange::new(2.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_validate_editable_range_still_checks_order_and_span() {
        let err = validate_editable_range(TimeRange::new(10.0, 8.0)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::EndNotAfterStart));
        let err = validate_editable_range(TimeRange::new(5.0, 5.5)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::SpanTooShort));
    }

    // ── adjusted ──────────────────────────────────────────────────────────────

    #[test]
    fn test_adjust_interior_keeps_neighbours_contiguous() {
        let a = default_allocation();
        let b = a.adjusted(2, 7.0, 13.0).unwrap();
        assert_eq!(b.blocks[2].start, 7.0);
        assert_eq!(b.blocks[2].end, 13.0);
        assert_eq!(b.blocks[1].end, 7.0);
        assert_eq!(b.blocks[3].start, 13.0);
        assert!(b.is_contiguous());
    }

    #[test]
    fn test_adjust_only_end_leaves_previous_alone() {
        let a = default_allocation();
        let b = a.adjusted(1, 4.0, 6.5).unwrap();
        assert_eq!(b.blocks[0], a.blocks[0]);
        assert_eq!(b.blocks[2].start, 6.5);
        assert_eq!(b.blocks[2].end, 12.0);
    }

    #[test]
    fn test_adjust_only_start_leaves_next_alone() {
        let a = default_allocation();
        let b = a.adjusted(3, 11.0, 16.0).unwrap();
        assert_eq!(b.blocks[2].end, 11.0);
        assert_eq!(b.blocks[4], a.blocks[4]);
    }

    #[test]
    fn test_adjust_span_under_half_hour_is_rejected() {
        let a = default_allocation();
        let err = a.adjusted(2, 9.0, 9.25).unwrap_err();
        assert_eq!(err, AllocationError::BlockTooShort);
        assert_eq!(a, default_allocation());
    }

    #[test]
    fn test_adjust_inverted_bounds_is_rejected() {
        let a = default_allocation();
        assert_eq!(
            a.adjusted(2, 10.0, 9.0).unwrap_err(),
            AllocationError::BlockTooShort
        );
    }

    #[test]
    fn test_adjust_exactly_half_hour_is_allowed() {
        let a = default_allocation();
        let b = a.adjusted(2, 9.0, 9.5).unwrap();
        assert_eq!(b.blocks[2].duration(), 0.5);
        assert_eq!(b.blocks[1].end, 9.0);
        assert_eq!(b.blocks[3].start, 9.5);
    }

    #[test]
    fn test_adjust_squeezing_previous_below_minimum_is_rejected() {
        let a = default_allocation();
        // Work is 4..8; moving Exercise's start to 4.25 leaves Work 0.25h long.
        let err = a.adjusted(2, 4.25, 12.0).unwrap_err();
        assert_eq!(err, AllocationError::BlockTooShort);
    }

    #[test]
    fn test_adjust_squeezing_next_below_minimum_is_rejected() {
        let a = default_allocation();
        // Leisure is 12..16; pushing Exercise's end to 15.75 leaves 0.25h.
        let err = a.adjusted(2, 8.0, 15.75).unwrap_err();
        assert_eq!(err, AllocationError::BlockTooShort);
    }

    #[test]
    fn test_adjust_rejection_commits_nothing() {
        let a = default_allocation();
        // Edited block itself is fine, neighbour is not.
        assert!(a.adjusted(2, 4.0, 12.0).is_err());
        assert_eq!(bounds(&a), bounds(&default_allocation()));
    }

    #[test]
    fn test_adjust_overrunning_end_is_clamped_to_range() {
        let a = Allocation::new(
            TimeRange::new(0.0, 24.0),
            vec![
                TimeBlock::new(0.0, 20.0, "A", "#000000"),
                TimeBlock::new(20.0, 24.0, "B", "#111111"),
            ],
        );
        let b = a.adjusted(1, 20.0, 26.0).unwrap();
        assert_eq!(b.blocks[1].end, 24.0);
    }

    #[test]
    fn test_adjust_clamp_at_end_pulls_next_start_to_range_end() {
        let a = Allocation::new(
            TimeRange::new(0.0, 10.0),
            vec![
                TimeBlock::new(0.0, 5.0, "A", "#000000"),
                TimeBlock::new(5.0, 10.0, "B", "#111111"),
            ],
        );
        // Pushing A past the range end collapses B to nothing: rejected.
        assert_eq!(
            a.adjusted(0, 0.0, 11.0).unwrap_err(),
            AllocationError::BlockTooShort
        );
    }

    #[test]
    fn test_adjust_underrunning_start_is_clamped_to_range() {
        let a = Allocation::new(
            TimeRange::new(2.0, 10.0),
            vec![
                TimeBlock::new(2.0, 6.0, "A", "#000000"),
                TimeBlock::new(6.0, 10.0, "B", "#111111"),
            ],
        );
        let b = a.adjusted(0, 1.0, 6.0).unwrap();
        assert_eq!(b.blocks[0].start, 2.0);
        assert_eq!(b.blocks[0].end, 6.0);
    }

    #[test]
    fn test_adjust_first_block_start_has_no_previous() {
        let a = default_allocation();
        let b = a.adjusted(0, 1.0, 4.0).unwrap();
        assert_eq!(b.blocks[0].start, 1.0);
        assert_eq!(b.blocks.len(), 5);
        assert_eq!(b.range, a.range);
    }

    #[test]
    fn test_adjust_last_block_end_has_no_next() {
        let a = default_allocation();
        let b = a.adjusted(4, 16.0, 22.0).unwrap();
        assert_eq!(b.blocks[4].end, 22.0);
        assert_eq!(b.range.end, 24.0);
    }

    #[test]
    fn test_adjust_unknown_index() {
        let a = default_allocation();
        assert_eq!(
            a.adjusted(9, 0.0, 1.0).unwrap_err(),
            AllocationError::NoSuchBlock(9)
        );
    }

    #[test]
    fn test_adjust_unchanged_bounds_is_identity() {
        let a = default_allocation();
        assert_eq!(a.adjusted(2, 8.0, 12.0).unwrap(), a);
    }

    // ── rescaled ──────────────────────────────────────────────────────────────

    #[test]
    fn test_rescale_two_to_ten_keeps_every_block_inside() {
        let a = default_allocation();
        let b = a.rescaled(TimeRange::new(2.0, 10.0)).unwrap();
        assert_eq!(b.range, TimeRange::new(2.0, 10.0));
        for block in &b.blocks {
            assert!(block.start >= 2.0 && block.end <= 10.0, "{block:?}");
        }
    }

    #[test]
    fn test_rescale_clips_overlapping_blocks() {
        let a = default_allocation();
        let b = a.rescaled(TimeRange::new(2.0, 10.0)).unwrap();
        assert_eq!((b.blocks[0].start, b.blocks[0].end), (2.0, 4.0));
        assert_eq!((b.blocks[1].start, b.blocks[1].end), (4.0, 8.0));
        assert_eq!((b.blocks[2].start, b.blocks[2].end), (8.0, 10.0));
    }

    #[test]
    fn test_rescale_relocates_disjoint_blocks_to_range_start() {
        let a = default_allocation();
        let b = a.rescaled(TimeRange::new(2.0, 10.0)).unwrap();
        // Leisure (12..16, 4h) and Family Time (16..24, 8h) are outside.
        assert_eq!((b.blocks[3].start, b.blocks[3].end), (2.0, 6.0));
        assert_eq!((b.blocks[4].start, b.blocks[4].end), (2.0, 10.0));
        assert_eq!(b.blocks[4].category, "Family Time");
        assert_eq!(b.blocks[4].color, "#f44336");
    }

    #[test]
    fn test_rescale_does_not_restore_contiguity() {
        let a = default_allocation();
        let b = a.rescaled(TimeRange::new(2.0, 10.0)).unwrap();
        assert!(!b.is_contiguous());
    }

    #[test]
    fn test_rescale_half_hour_span_is_rejected() {
        let a = default_allocation();
        let err = a.rescaled(TimeRange::new(5.0, 5.5)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::SpanTooShort));
        assert_eq!(a, default_allocation());
    }

    #[test]
    fn test_rescale_inverted_is_rejected() {
        let a = default_allocation();
        let err = a.rescaled(TimeRange::new(10.0, 2.0)).unwrap_err();
        assert_eq!(err, AllocationError::InvalidRange(RangeIssue::EndNotAfterStart));
    }

    #[test]
    fn test_rescale_to_same_range_is_identity() {
        let a = default_allocation();
        assert_eq!(a.rescaled(TimeRange::default()).unwrap(), a);
    }

    // ── with_category / without_block ─────────────────────────────────────────

    #[test]
    fn test_add_category_fills_gap_to_range_end() {
        let a = Allocation::new(
            TimeRange::default(),
            vec![TimeBlock::new(0.0, 20.0, "Day", "#000000")],
        );
        let b = a.with_category("Reading", "#abcdef").unwrap();
        assert_eq!(b.blocks.len(), 2);
        assert_eq!(b.blocks[1], TimeBlock::new(20.0, 24.0, "Reading", "#abcdef"));
    }

    #[test]
    fn test_add_category_without_room_appends_nothing() {
        let a = default_allocation();
        assert!(a.with_category("Reading", "#abcdef").is_none());
    }

    #[test]
    fn test_add_category_trims_name() {
        let a = Allocation::new(TimeRange::default(), vec![]);
        let b = a.with_category("  Reading  ", "#abcdef").unwrap();
        assert_eq!(b.blocks[0].category, "Reading");
        assert_eq!(b.blocks[0].start, 0.0);
        assert_eq!(b.blocks[0].end, 24.0);
    }

    #[test]
    fn test_add_category_blank_name_is_ignored() {
        let a = Allocation::new(TimeRange::default(), vec![]);
        assert!(a.with_category("   ", "#abcdef").is_none());
    }

    #[test]
    fn test_remove_interior_extends_previous() {
        let a = default_allocation();
        let b = a.without_block(2);
        assert_eq!(b.blocks.len(), 4);
        assert_eq!(b.blocks[1].category, "Work");
        assert_eq!(b.blocks[1].end, 12.0);
        assert!(b.is_contiguous());
    }

    #[test]
    fn test_remove_first_leaves_gap_at_start() {
        let a = default_allocation();
        let b = a.without_block(0);
        assert_eq!(b.blocks.len(), 4);
        assert_eq!(b.blocks[0].start, 4.0);
        assert!(!b.is_contiguous());
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let a = default_allocation();
        assert_eq!(a.without_block(5), a);
    }

    #[test]
    fn test_remove_every_block() {
        let mut a = default_allocation();
        while !a.blocks.is_empty() {
            a = a.without_block(a.blocks.len() - 1);
        }
        assert_eq!(a.covered_hours(), 0.0);
        assert!(!a.is_contiguous());
    }

    #[test]
    fn test_covered_hours_of_defaults() {
        assert_eq!(default_allocation().covered_hours(), 24.0);
    }
}
