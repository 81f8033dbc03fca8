use crate::calc::{format_duration, format_time, Allocation};
use crate::data::{DayConfig, TimeBlock, TimeRange};
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct SummaryJson<'a> {
    range: TimeRange,
    blocks: &'a [TimeBlock],
    covered_hours: f64,
    contiguous: bool,
}

pub fn run(json: bool) -> Result<()> {
    let config = DayConfig::load_checked()?;
    let allocation = Allocation::new(config.settings.time_range, config.blocks);
    let mut out = std::io::stdout();
    if json {
        write_summary_json(&allocation, &mut out)
    } else {
        write_summary(&allocation, &mut out)
    }
}

pub(crate) fn write_summary<W: std::io::Write>(allocation: &Allocation, out: &mut W) -> Result<()> {
    let range = allocation.range;
    writeln!(
        out,
        "Time Allocation [{} - {}]",
        format_time(range.start),
        format_time(range.end)
    )?;
    writeln!(out, "---")?;
    writeln!(
        out,
        "  {:<4} {:<20} {:<10} {:<10} {:<10} {}",
        "#", "Category", "Start", "End", "Duration", "Color"
    )?;
    for (i, b) in allocation.blocks.iter().enumerate() {
        writeln!(
            out,
            "  {:<4} {:<20} {:<10} {:<10} {:<10} {}",
            i + 1,
            b.category,
            format_time(b.start),
            format_time(b.end),
            format_duration(b.duration()),
            b.color
        )?;
    }
    writeln!(out, "---")?;
    writeln!(
        out,
        "Covered: {} of {}{}",
        format_duration(allocation.covered_hours()),
        format_duration(range.span()),
        if allocation.is_contiguous() {
            ""
        } else {
            " (blocks overlap or leave gaps)"
        }
    )?;
    Ok(())
}

pub(crate) fn write_summary_json<W: std::io::Write>(
    allocation: &Allocation,
    out: &mut W,
) -> Result<()> {
    let summary = SummaryJson {
        range: allocation.range,
        blocks: &allocation.blocks,
        covered_hours: allocation.covered_hours(),
        contiguous: allocation.is_contiguous(),
    };
    serde_json::to_writer_pretty(&mut *out, &summary)?;
    writeln!(out)?;
    Ok(())
}
