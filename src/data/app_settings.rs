use crate::calc::{validate_editable_range, Allocation};
use crate::data::persistence::Persistable;
use crate::data::time_block::{default_blocks, TimeBlock, TimeRange};
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AppSettings {
    #[serde(default)]
    pub time_range: TimeRange,
    #[serde(default = "default_slider_step")]
    pub slider_step: f64,
    /// Seconds before an error notification dismisses itself.
    #[serde(default = "default_error_timeout_secs")]
    pub error_timeout_secs: u64,
}

fn default_slider_step() -> f64 {
    0.5
}

fn default_error_timeout_secs() -> u64 {
    6
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            time_range: TimeRange::default(),
            slider_step: default_slider_step(),
            error_timeout_secs: default_error_timeout_secs(),
        }
    }
}

/// Contents of config.yaml: editor settings plus the blocks the editor starts with.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DayConfig {
    #[serde(default)]
    pub settings: AppSettings,
    #[serde(default = "default_blocks")]
    pub blocks: Vec<TimeBlock>,
}

impl Default for DayConfig {
    fn default() -> Self {
        DayConfig {
            settings: AppSettings::default(),
            blocks: default_blocks(),
        }
    }
}

impl Persistable for DayConfig {
    fn filename() -> &'static str {
        "config.yaml"
    }
}

impl DayConfig {
    /// Loads config.yaml and rejects settings the editor cannot start from.
    pub fn load_checked() -> Result<Self> {
        let config = Self::load()?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<()> {
        let step = self.settings.slider_step;
        if step.is_nan() || step <= 0.0 {
            bail!("slider_step must be positive, got {}", step);
        }
        let range = self.settings.time_range;
        validate_editable_range(range)
            .map_err(|e| anyhow::anyhow!("invalid time_range in config.yaml: {}", e))?;

        for (i, block) in self.blocks.iter().enumerate() {
            if !block.start.is_finite() || !block.end.is_finite() {
                bail!("block {} ({}) has a non-finite bound", i + 1, block.category);
            }
            if block.end < block.start {
                bail!(
                    "block {} ({}) ends at {} before it starts at {}",
                    i + 1,
                    block.category,
                    block.end,
                    block.start
                );
            }
        }

        let allocation = Allocation::new(range, self.blocks.clone());
        if !self.blocks.is_empty() && !allocation.is_contiguous() {
            warn!(
                blocks = self.blocks.len(),
                "configured blocks overlap, leave gaps or stray outside the time range"
            );
        }
        Ok(())
    }
}
