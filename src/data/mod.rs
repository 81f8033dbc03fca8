pub mod app_settings;
pub mod persistence;
pub mod time_block;

pub use app_settings::DayConfig;
pub use persistence::Persistable;
pub use time_block::{default_blocks, TimeBlock, TimeRange, MIN_BLOCK_HOURS, MIN_RANGE_HOURS};
