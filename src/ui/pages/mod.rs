pub mod apps;
pub mod dashboard;
pub mod links;
pub mod qr;
pub mod usage;

pub use apps::render as render_apps;
pub use dashboard::{render_error, render_loading, render_status};
pub use links::render as render_links;
pub use qr::render as render_qr;
pub use usage::render as render_usage;
