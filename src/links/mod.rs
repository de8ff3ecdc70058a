pub mod filter;
pub mod parser;

pub use filter::{filter_config_links, links_from_text};
pub use parser::{get_protocol, parse_link, parse_links, ParsedLink, Protocol};
