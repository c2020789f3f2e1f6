/// Search/URL resolution for the address bar
use crate::config::{AppConfig, QuickLink};
use crate::error::{AppError, AppResult};
use crate::proxy::ProxyService;
use crate::session::SessionCommand;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Everything `encodeURIComponent` escapes
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a query component the way `encodeURIComponent` does.
pub fn encode_component(text: &str) -> String {
    utf8_percent_encode(text, URI_COMPONENT).to_string()
}

/// Turn free-text input into a URL to load.
///
/// Resolution order:
/// 1. Input that parses as an absolute URL is used as-is (normalized).
/// 2. Otherwise the default scheme is prefixed; the result is accepted when it
///    parses and its host contains a dot.
/// 3. Otherwise the input becomes a query on the configured search engine.
///
/// Returns `None` for blank input.
pub fn resolve_input(input: &str, config: &AppConfig) -> Option<String> {
    let query = input.trim();
    if query.is_empty() {
        return None;
    }

    if let Ok(url) = Url::parse(query) {
        return Some(url.to_string());
    }

    let candidate = format!("{}://{}", config.default_scheme, query);
    if let Ok(url) = Url::parse(&candidate) {
        if url.host_str().is_some_and(|host| host.contains('.')) {
            return Some(url.to_string());
        }
    }

    Some(search_url(query, config))
}

pub fn search_url(query: &str, config: &AppConfig) -> String {
    config
        .search_template
        .replace("{query}", &encode_component(query))
}

/// Resolve address-bar input into the command that loads it.
///
/// The proxy must be available and able to encode the target; otherwise the
/// search is rejected so the UI never shows a tab it cannot render.
pub fn search_command<P: ProxyService>(
    input: &str,
    config: &AppConfig,
    proxy: Option<&P>,
) -> AppResult<Option<SessionCommand>> {
    let Some(target) = resolve_input(input, config) else {
        return Ok(None);
    };

    let proxy = proxy.ok_or(AppError::ProxyUnavailable)?;
    let src = proxy.frame_src(&target)?;
    log::info!("Resolved {:?} to {} via {}", input.trim(), target, src);

    Ok(Some(SessionCommand::Open(target)))
}

/// Command that opens a home-screen quick link.
pub fn quick_link_command<P: ProxyService>(
    link: &QuickLink,
    proxy: Option<&P>,
) -> AppResult<SessionCommand> {
    let proxy = proxy.ok_or(AppError::ProxyUnavailable)?;
    proxy.frame_src(&link.url)?;
    log::info!("Loading {}...", link.name);

    Ok(SessionCommand::Open(link.url.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proxy::tests::FakeProxy;
    use rstest::rstest;

    #[rstest]
    // Absolute URLs are normalized
    #[case("https://example.com", "https://example.com/")]
    #[case("http://example.com/path?q=1", "http://example.com/path?q=1")]
    #[case("  https://rust-lang.org  ", "https://rust-lang.org/")]
    // Domain-like input gets https://
    #[case("example.com", "https://example.com/")]
    #[case("sub.domain.co.uk/page", "https://sub.domain.co.uk/page")]
    #[case("127.0.0.1", "https://127.0.0.1/")]
    // Anything else is a search
    #[case("hello world", "https://duckduckgo.com/search?q=hello%20world&source=web")]
    #[case("rust", "https://duckduckgo.com/search?q=rust&source=web")]
    #[case("a&b=c", "https://duckduckgo.com/search?q=a%26b%3Dc&source=web")]
    #[case("what is 1.5 + 2", "https://duckduckgo.com/search?q=what%20is%201.5%20%2B%202&source=web")]
    #[case("don't (panic)!", "https://duckduckgo.com/search?q=don't%20(panic)!&source=web")]
    #[case("~a_b-c*", "https://duckduckgo.com/search?q=~a_b-c*&source=web")]
    #[case("café", "https://duckduckgo.com/search?q=caf%C3%A9&source=web")]
    fn test_resolve_input(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(resolve_input(input, &AppConfig::default()).as_deref(), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_blank_input_resolves_to_nothing(#[case] input: &str) {
        assert_eq!(resolve_input(input, &AppConfig::default()), None);
    }

    #[test]
    fn test_custom_search_template() {
        let config = AppConfig {
            search_template: "https://search.example/?q={query}".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            resolve_input("cats", &config).as_deref(),
            Some("https://search.example/?q=cats")
        );
    }

    #[test]
    fn test_search_command_opens_target() {
        let proxy = FakeProxy::default();
        let command = search_command("example.com", &AppConfig::default(), Some(&proxy)).unwrap();

        assert_eq!(command, Some(SessionCommand::Open("https://example.com/".to_string())));
    }

    #[test]
    fn test_search_command_blank_input() {
        let proxy = FakeProxy::default();
        assert_eq!(search_command("  ", &AppConfig::default(), Some(&proxy)), Ok(None));
    }

    #[test]
    fn test_search_command_requires_proxy() {
        let result = search_command::<FakeProxy>("example.com", &AppConfig::default(), None);
        assert_eq!(result, Err(AppError::ProxyUnavailable));
    }

    #[test]
    fn test_encode_component_matches_js() {
        assert_eq!(encode_component("a b/c?d#e"), "a%20b%2Fc%3Fd%23e");
        assert_eq!(encode_component("!'()*-._~"), "!'()*-._~");
    }

    #[test]
    fn test_quick_link_command_opens_link() {
        let proxy = FakeProxy::default();
        let link = QuickLink::new("Wikipedia", "https://www.wikipedia.org/");

        assert_eq!(
            quick_link_command(&link, Some(&proxy)),
            Ok(SessionCommand::Open("https://www.wikipedia.org/".to_string()))
        );
    }

    #[test]
    fn test_quick_link_command_requires_proxy() {
        let link = QuickLink::new("Wikipedia", "https://www.wikipedia.org/");
        assert_eq!(
            quick_link_command::<FakeProxy>(&link, None),
            Err(AppError::ProxyUnavailable)
        );
    }

    #[test]
    fn test_search_command_propagates_encode_failure() {
        let proxy = FakeProxy { fail: true, ..FakeProxy::default() };
        let result = search_command("example.com", &AppConfig::default(), Some(&proxy));
        assert!(matches!(result, Err(AppError::Navigation(_))));
    }
}
