pub mod clipboard;
pub mod platform;
pub mod state;
pub mod time_range;

pub use state::{AppState, CopyTarget, LinkRow, NotificationKind, Panel};
pub use time_range::{TimeRange, UsagePeriod};
