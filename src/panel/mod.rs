pub mod cache;
pub mod client;
pub mod endpoints;
pub mod sources;
pub mod types;

pub use cache::{FetchPolicy, RequestCache};
pub use client::{FetchError, PanelClient};
pub use endpoints::Endpoints;
pub use sources::{DataEvent, DataSources, UsageKey};
pub use types::*;
