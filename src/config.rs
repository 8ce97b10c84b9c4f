use std::env;

pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql/";
pub const DEFAULT_RELAY_URL: &str = "https://cors-anywhere.herokuapp.com/";
pub const DEFAULT_PORT: u16 = 8080;

/// Where GraphQL requests go: `relay_url` is prefixed verbatim to `graphql_url`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamConfig {
    pub relay_url: String,
    pub graphql_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn direct(graphql_url: impl Into<String>) -> Self {
        Self {
            relay_url: String::new(),
            graphql_url: graphql_url.into(),
        }
    }

    pub fn request_url(&self) -> String {
        format!("{}{}", self.relay_url, self.graphql_url)
    }
}

/// Reads `LEETCODE_RELAY_URL` and `LEETCODE_GRAPHQL_URL`. An empty relay disables it.
pub fn resolve_upstream() -> UpstreamConfig {
    upstream_from(|key| env::var(key).ok())
}

pub fn resolve_port() -> u16 {
    parse_port(env::var("PORT").ok().as_deref())
}

fn upstream_from(lookup: impl Fn(&str) -> Option<String>) -> UpstreamConfig {
    let mut config = UpstreamConfig::default();
    if let Some(relay) = lookup("LEETCODE_RELAY_URL") {
        config.relay_url = relay.trim().to_string();
    }
    if let Some(url) = lookup("LEETCODE_GRAPHQL_URL") {
        let url = url.trim();
        if !url.is_empty() {
            config.graphql_url = url.to_string();
        }
    }
    config
}

fn parse_port(value: Option<&str>) -> u16 {
    value
        .and_then(|value| value.trim().parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT)
}
