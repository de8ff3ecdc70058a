use std::sync::LazyLock;

use base64::Engine;
use regex::Regex;
use serde::Serialize;

/// Flag pairs, pictographs and misc symbols, each with an optional variation selector
static EMOJI_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{1F1E6}-\x{1F1FF}]{2}|[\x{1F300}-\x{1F9FF}][\x{FE00}-\x{FE0F}]?|[\x{2600}-\x{26FF}][\x{FE00}-\x{FE0F}]?",
    )
    .expect("Invalid emoji regex")
});

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static EDGE_PIPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\||\|$").expect("Invalid pipe regex"));

static EDGE_DASH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[-_]+|[-_]+$").expect("Invalid dash regex"));

/// Proxy protocol of a share link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Vless,
    Vmess,
    Trojan,
    Shadowsocks,
    Unknown,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Vless => "vless",
            Protocol::Vmess => "vmess",
            Protocol::Trojan => "trojan",
            Protocol::Shadowsocks => "shadowsocks",
            Protocol::Unknown => "unknown",
        }
    }
}

/// Display record derived from a raw share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedLink {
    pub raw: String,
    pub protocol: Protocol,
    pub name: String,
    pub server: Option<String>,
    pub port: Option<String>,
    pub emoji: Option<String>,
}

/// Classify a link by its scheme prefix. Matching is exact and case-sensitive.
pub fn get_protocol(link: &str) -> Protocol {
    if link.starts_with("vless://") {
        Protocol::Vless
    } else if link.starts_with("vmess://") {
        Protocol::Vmess
    } else if link.starts_with("trojan://") {
        Protocol::Trojan
    } else if link.starts_with("ss://") || link.starts_with("shadowsocks://") {
        Protocol::Shadowsocks
    } else {
        Protocol::Unknown
    }
}

/// Parse one link. Never fails: anything undecodable degrades to empty fields.
pub fn parse_link(link: &str, index: usize) -> ParsedLink {
    let clean_link = link.trim();
    let protocol = get_protocol(clean_link);

    let vmess = if protocol == Protocol::Vmess {
        decode_vmess_config(&clean_link["vmess://".len()..])
    } else {
        None
    };

    let raw_name = match protocol {
        Protocol::Vmess => vmess
            .as_ref()
            .and_then(|config| json_string(config, "ps"))
            .unwrap_or_default(),
        _ => extract_fragment_name(clean_link),
    };

    let (server, port) = match protocol {
        Protocol::Vmess => match &vmess {
            Some(config) => (
                json_string(config, "add").map(|s| s.trim().to_string()),
                json_string(config, "port"),
            ),
            None => (None, None),
        },
        _ => extract_server_info(clean_link),
    };

    let emoji = extract_emoji(&raw_name);
    let name = generate_clean_name(&raw_name, protocol, index);

    ParsedLink {
        raw: clean_link.to_string(),
        protocol,
        name,
        server,
        port,
        emoji,
    }
}

/// Parse a list of links, keeping order and length.
pub fn parse_links<S: AsRef<str>>(links: &[S]) -> Vec<ParsedLink> {
    links
        .iter()
        .enumerate()
        .map(|(index, link)| parse_link(link.as_ref(), index))
        .collect()
}

fn decode_base64(input: &str) -> Option<Vec<u8>> {
    let mut normalized: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    normalized = normalized.replace('-', "+").replace('_', "/");
    while normalized.len() % 4 != 0 {
        normalized.push('=');
    }
    base64::engine::general_purpose::STANDARD
        .decode(normalized.as_bytes())
        .ok()
}

fn decode_vmess_config(payload: &str) -> Option<serde_json::Value> {
    let decoded = decode_base64(payload)?;
    let value: serde_json::Value = serde_json::from_slice(&decoded).ok()?;
    value.is_object().then_some(value)
}

fn json_string(config: &serde_json::Value, key: &str) -> Option<String> {
    config.get(key).and_then(|v| match v {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn extract_fragment_name(link: &str) -> String {
    let Some((_, fragment)) = link.split_once('#') else {
        return String::new();
    };

    match percent_encoding::percent_decode_str(fragment).decode_utf8() {
        Ok(decoded) if !has_malformed_escape(fragment) => decoded.into_owned(),
        _ => fragment.to_string(),
    }
}

/// A `%` not followed by two hex digits makes the whole fragment undecodable.
fn has_malformed_escape(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.iter().enumerate().any(|(i, &b)| {
        b == b'%'
            && !(bytes.get(i + 1).is_some_and(u8::is_ascii_hexdigit)
                && bytes.get(i + 2).is_some_and(u8::is_ascii_hexdigit))
    })
}

fn extract_server_info(link: &str) -> (Option<String>, Option<String>) {
    let Some((_, without_protocol)) = link.split_once("://") else {
        return (None, None);
    };

    let server_part = without_protocol
        .rsplit_once('@')
        .map(|(_, host)| host)
        .unwrap_or(without_protocol);
    let server_part = server_part
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim();

    let mut pieces = server_part.split(':');
    let server = pieces
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);
    let port = pieces
        .next()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    (server, port)
}

fn extract_emoji(text: &str) -> Option<String> {
    EMOJI_REGEX.find(text).map(|m| m.as_str().to_string())
}

fn generate_clean_name(raw_name: &str, protocol: Protocol, index: usize) -> String {
    let fallback = || {
        format!(
            "{} Config {}",
            protocol.as_str().to_uppercase(),
            index + 1
        )
    };

    if raw_name.is_empty() {
        return fallback();
    }

    let without_emoji = EMOJI_REGEX.replace_all(raw_name, "");
    let collapsed = WHITESPACE_REGEX.replace_all(without_emoji.trim(), " ");
    let no_pipes = EDGE_PIPE_REGEX.replace_all(&collapsed, "");
    let mut clean_name = EDGE_DASH_REGEX.replace_all(&no_pipes, "").trim().to_string();

    // Traffic/expiry noise like "50GB | 30 Days Left" hides the location name
    if clean_name.contains("GB") || clean_name.contains("Days Left") {
        let meaningful = clean_name
            .split('|')
            .map(str::trim)
            .find(|part| {
                !part.contains("GB") && !part.contains("Days") && part.chars().count() > 2
            })
            .map(str::to_string);
        if let Some(part) = meaningful {
            clean_name = part;
        }
    }

    if clean_name.is_empty() {
        fallback()
    } else {
        clean_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vmess_link(json: &str) -> String {
        format!(
            "vmess://{}",
            base64::engine::general_purpose::STANDARD.encode(json)
        )
    }

    #[test]
    fn test_get_protocol() {
        assert_eq!(get_protocol("vless://abc@host:443"), Protocol::Vless);
        assert_eq!(get_protocol("vmess://eyJ9"), Protocol::Vmess);
        assert_eq!(get_protocol("trojan://pw@host:443"), Protocol::Trojan);
        assert_eq!(get_protocol("ss://YWVz@host:8388"), Protocol::Shadowsocks);
        assert_eq!(
            get_protocol("shadowsocks://YWVz@host:8388"),
            Protocol::Shadowsocks
        );
        assert_eq!(get_protocol("VLESS://abc@host:443"), Protocol::Unknown);
        assert_eq!(get_protocol("https://example.com"), Protocol::Unknown);
        assert_eq!(get_protocol(""), Protocol::Unknown);
    }

    #[test]
    fn test_parse_vless_link() {
        let link = "  vless://uuid-1234@de.example.com:443?security=tls&type=ws#%F0%9F%87%A9%F0%9F%87%AA%20Frankfurt  ";
        let parsed = parse_link(link, 0);

        assert_eq!(parsed.raw, link.trim());
        assert_eq!(parsed.protocol, Protocol::Vless);
        assert_eq!(parsed.name, "Frankfurt");
        assert_eq!(parsed.emoji.as_deref(), Some("🇩🇪"));
        assert_eq!(parsed.server.as_deref(), Some("de.example.com"));
        assert_eq!(parsed.port.as_deref(), Some("443"));
    }

    #[test]
    fn test_parse_vmess_link() {
        let link = vmess_link(r#"{"v":"2","ps":"🇳🇱 Amsterdam","add":" nl.example.com ","port":8443,"id":"abc"}"#);
        let parsed = parse_link(&link, 3);

        assert_eq!(parsed.protocol, Protocol::Vmess);
        assert_eq!(parsed.name, "Amsterdam");
        assert_eq!(parsed.emoji.as_deref(), Some("🇳🇱"));
        assert_eq!(parsed.server.as_deref(), Some("nl.example.com"));
        assert_eq!(parsed.port.as_deref(), Some("8443"));
    }

    #[test]
    fn test_vmess_with_bad_payload_degrades() {
        let parsed = parse_link("vmess://!!!not-base64!!!", 1);
        assert_eq!(parsed.protocol, Protocol::Vmess);
        assert_eq!(parsed.name, "VMESS Config 2");
        assert_eq!(parsed.server, None);
        assert_eq!(parsed.port, None);
        assert_eq!(parsed.emoji, None);

        let not_json = format!(
            "vmess://{}",
            base64::engine::general_purpose::STANDARD.encode("plain text")
        );
        let parsed = parse_link(&not_json, 0);
        assert_eq!(parsed.name, "VMESS Config 1");
        assert_eq!(parsed.server, None);
    }

    #[test]
    fn test_name_cleanup_prefers_location_segment() {
        let name = "🇩🇪 | 50GB | 30 Days Left | Germany";
        let link = format!("trojan://secret@de.example.com:443#{}", name);
        let parsed = parse_link(&link, 0);

        assert_eq!(parsed.name, "Germany");
        assert_eq!(parsed.emoji.as_deref(), Some("🇩🇪"));
    }

    #[test]
    fn test_name_cleanup_edges() {
        assert_eq!(
            generate_clean_name("--  Tokyo   Fast__", Protocol::Vless, 0),
            "Tokyo Fast"
        );
        assert_eq!(generate_clean_name("| Paris |", Protocol::Vless, 0), "Paris");
        assert_eq!(generate_clean_name("🔥", Protocol::Trojan, 4), "TROJAN Config 5");
        assert_eq!(
            generate_clean_name("", Protocol::Shadowsocks, 0),
            "SHADOWSOCKS Config 1"
        );
        // Every segment is noise, so the cleaned text is kept as-is
        assert_eq!(
            generate_clean_name("10GB | 5 Days Left", Protocol::Vless, 0),
            "10GB | 5 Days Left"
        );
    }

    #[test]
    fn test_symbol_emoji_with_variation_selector() {
        let parsed = parse_link("ss://YWVzOnB3@1.2.3.4:8388#%E2%9A%A1%EF%B8%8F%20Turbo", 0);
        assert_eq!(parsed.emoji.as_deref(), Some("⚡️"));
        assert_eq!(parsed.name, "Turbo");
        assert_eq!(parsed.server.as_deref(), Some("1.2.3.4"));
        assert_eq!(parsed.port.as_deref(), Some("8388"));
    }

    #[test]
    fn test_malformed_fragment_falls_back_to_raw() {
        let parsed = parse_link("vless://id@host:1#Bad%ZZName", 0);
        assert_eq!(parsed.name, "Bad%ZZName");

        let parsed = parse_link("vless://id@host:1#Broken%E0%A4", 0);
        assert_eq!(parsed.name, "Broken%E0%A4");
    }

    #[test]
    fn test_server_info_uses_last_at_sign() {
        let (server, port) = extract_server_info("trojan://user@pass@edge.example.com:2053?sni=x");
        assert_eq!(server.as_deref(), Some("edge.example.com"));
        assert_eq!(port.as_deref(), Some("2053"));

        let (server, port) = extract_server_info("ss://host-only#name");
        assert_eq!(server.as_deref(), Some("host-only"));
        assert_eq!(port, None);

        assert_eq!(extract_server_info("no scheme here"), (None, None));
    }

    #[test]
    fn test_parse_link_is_total() {
        let inputs = [
            "",
            "   ",
            "#",
            "vless://",
            "vless://@:#%",
            "vmess://",
            "vmess://====",
            "trojan://@@@@",
            "ss://::::",
            "shadowsocks://#%F0%9F",
            "random garbage 🇩🇪🇩",
            "\u{0}\u{1}\u{2}",
        ];
        for (index, input) in inputs.iter().enumerate() {
            let parsed = parse_link(input, index);
            assert!(!parsed.name.is_empty());
        }
    }

    #[test]
    fn test_parse_links_preserves_order_and_duplicates() {
        let links = vec![
            "vless://a@one:1#One",
            "trojan://b@two:2#Two",
            "vless://a@one:1#One",
            "garbage",
        ];
        let parsed = parse_links(&links);

        assert_eq!(parsed.len(), links.len());
        assert_eq!(parsed[0].name, "One");
        assert_eq!(parsed[1].name, "Two");
        assert_eq!(parsed[2], parsed[0]);
        assert_eq!(parsed[3].name, "UNKNOWN Config 4");
    }
}
