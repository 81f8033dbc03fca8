use crate::data::{DayConfig, Persistable};
use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

pub fn run(force: bool) -> Result<()> {
    let dir = crate::data::persistence::get_data_dir()?;
    run_in_dir(&dir, force)?;
    println!("Wrote {}", dir.join(DayConfig::filename()).display());
    Ok(())
}

/// Writes the default config.yaml into `dir`. An existing file is only
/// replaced when `force` is set.
pub(crate) fn run_in_dir(dir: &Path, force: bool) -> Result<()> {
    let path = dir.join(DayConfig::filename());
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    DayConfig::default().save_to(dir)?;
    info!(path = %path.display(), "default config written");
    Ok(())
}
