use crate::data::{persistence::get_data_dir, DayConfig};
use crate::ui::app::{run_app, App};
use crate::ui::{restore_terminal, setup_terminal};
use anyhow::Result;
use chrono::Local;
use tracing::info;

pub fn run() -> Result<()> {
    let config = DayConfig::load_checked()?;
    info!(
        blocks = config.blocks.len(),
        start = config.settings.time_range.start,
        end = config.settings.time_range.end,
        "starting editor"
    );

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(info);
    }));

    let mut terminal = setup_terminal()?;

    let today = Local::now().date_naive();
    let data_dir = get_data_dir().unwrap_or_else(|_| std::path::PathBuf::from("./config"));
    let mut app = App::new(config, today, data_dir);

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    info!("editor closed; edits are not saved");

    result
}
