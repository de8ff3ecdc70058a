pub mod bytes;
pub mod date;
pub mod time;
pub mod timestamp;

pub use bytes::{format_bytes, usage_percentage};
pub use date::{format_compact_date, format_date, format_day_label};
pub use time::{
    format_on_hold_duration, format_relative_expiry, format_time_ago, on_hold_expiry,
    ExpiryInfo, LastSeen, OnHoldDuration,
};
pub use timestamp::{parse_timestamp, Timestamp};
