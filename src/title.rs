/// Tab title derivation and presentation
use url::Url;

pub const HOME_TITLE: &str = "New Tab";

/// Derive a tab title from a loaded URL: the registrable domain of its host.
///
/// Hosts ending in a two-letter country code behind `co`/`com` keep three
/// labels (`bbc.co.uk`, `example.com.au`); other hosts keep two. IP addresses
/// and single-label hosts are returned as-is. URLs without a host (`about:`,
/// `data:`) fall back to the full URL.
///
/// Examples:
/// - https://www.google.com/search → google.com
/// - https://news.bbc.co.uk/article → bbc.co.uk
/// - http://127.0.0.1:8080 → 127.0.0.1
pub fn title_from_url(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(_) => return url.to_string(),
    };

    match parsed.host() {
        Some(url::Host::Domain(host)) => registrable_domain(host),
        Some(host) => host.to_string(),
        None => url.to_string(),
    }
}

fn registrable_domain(host: &str) -> String {
    let host = host.trim_end_matches('.').to_lowercase();
    let parts: Vec<&str> = host.split('.').collect();

    if parts.len() < 2 {
        return host;
    }

    let tld = parts[parts.len() - 1];
    let keep = if parts.len() >= 3 && tld.len() == 2 && matches!(parts[parts.len() - 2], "co" | "com") {
        3
    } else {
        2
    };

    parts[parts.len() - keep..].join(".")
}

/// Truncate a title for the sidebar, appending an ellipsis when shortened.
pub fn truncate_title(title: &str, max_chars: usize) -> String {
    let trimmed = title.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }

    let mut short: String = trimmed.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}
