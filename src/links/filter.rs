/// Schemes accepted in a subscription's link list
const CONFIG_LINK_PREFIXES: [&str; 4] = ["vless://", "vmess://", "trojan://", "ss://"];

fn is_config_link(link: &str) -> bool {
    CONFIG_LINK_PREFIXES
        .iter()
        .any(|prefix| link.starts_with(prefix))
}

/// Keep trimmed, non-empty entries with a known scheme, in their original order.
pub fn filter_config_links<I, S>(links: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    links
        .into_iter()
        .map(|link| link.as_ref().trim().to_string())
        .filter(|link| !link.is_empty() && is_config_link(link))
        .collect()
}

/// Split a plain-text `/links` body into config links.
pub fn links_from_text(body: &str) -> Vec<String> {
    filter_config_links(body.split('\n'))
}
