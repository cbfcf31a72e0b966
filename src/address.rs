//! Address normalization and display derivation.
//!
//! Turns whatever the user typed into an [`Address`]: the target handed to a
//! rendering surface plus the text the address bar shows. The reverse
//! direction, [`Normalizer::display_from_location`], recovers a display URL
//! from the location a surface reports after loading.
//!
//! # Classification
//!
//! | Input | Target | Display |
//! |-------|--------|---------|
//! | `bolt://docs/readme` | `/bolt/docs/readme.html` | `bolt://docs/readme` |
//! | `example.com` | `https://example.com` | same |
//! | `rust borrow checker` | search URL | same |
//! | `ftp://host/file` | verbatim | same |

// ============================================================================
// Imports
// ============================================================================

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::{Host, Url};

use crate::config::{SEARCH_PLACEHOLDER, ShellConfig};
use crate::error::Result;

// ============================================================================
// Constants
// ============================================================================

/// Permissive `scheme://` detector.
static SCHEME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z][a-zA-Z0-9+.-]*://").expect("scheme pattern is a valid regex")
});

/// Scheme prepended to scheme-less input.
const SECURE_SCHEME: &str = "https://";

/// Label for a tab with no known destination.
pub const NEW_TAB_LABEL: &str = "New Tab";

/// Label for a tab showing the missing-file document.
pub const MISSING_FILE_LABEL: &str = "Missing file";

/// Label for a tab whose destination has an empty host.
const EMPTY_HOST_LABEL: &str = "Tab";

// ============================================================================
// Address
// ============================================================================

/// A normalized destination.
///
/// The two halves are independent: `navigate_target` is what a surface
/// loads, `display_text` is what the user sees.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    /// Target handed to a rendering surface.
    pub navigate_target: String,
    /// Human-readable form for the address bar.
    pub display_text: String,
}

impl Address {
    /// Creates an address whose target and display are the same text.
    #[must_use]
    pub fn same(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            display_text: url.clone(),
            navigate_target: url,
        }
    }

    /// Returns `true` for the empty pair produced by blank input.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.navigate_target.is_empty()
    }
}

// ============================================================================
// Normalizer
// ============================================================================

/// Stateless address normalizer bound to one configuration.
#[derive(Debug, Clone)]
pub struct Normalizer {
    /// Canonical virtual prefix, e.g. `bolt://`.
    virtual_prefix: String,
    /// Local asset root, e.g. `/bolt/`.
    local_root: String,
    /// Extension without the dot.
    extension: String,
    /// Name substituted for an empty virtual path.
    index_name: String,
    /// Search template with `%s`.
    search_template: String,
    /// Marker the proxy engine puts before encoded targets.
    proxy_marker: String,
    /// Base for resolving relative locations.
    origin: Url,
}

impl Normalizer {
    /// Creates a normalizer from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UrlParse`](crate::Error::UrlParse) if the configured
    /// origin is not an absolute URL.
    pub fn new(config: &ShellConfig) -> Result<Self> {
        Ok(Self {
            virtual_prefix: config.virtual_prefix().to_ascii_lowercase(),
            local_root: config.local_root.clone(),
            extension: config.default_extension.clone(),
            index_name: config.index_name.clone(),
            search_template: config.search_template.clone(),
            proxy_marker: config.proxy_marker.clone(),
            origin: config.origin_url()?,
        })
    }

    /// Normalizes raw user input.
    ///
    /// Blank input yields the empty [`Address`]; anything else yields a
    /// non-empty target. Never fails.
    #[must_use]
    pub fn normalize(&self, raw_input: &str) -> Address {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() {
            return Address::default();
        }

        if self.has_virtual_prefix(trimmed) {
            return self
                .normalize_virtual(trimmed)
                .unwrap_or_else(|| Address::same(ensure_protocol(trimmed)));
        }

        if has_scheme(trimmed) {
            return Address::same(trimmed);
        }

        if looks_like_host(trimmed) {
            return Address::same(ensure_protocol(trimmed));
        }

        Address::same(self.search_url(trimmed))
    }

    /// Returns `true` if the target is served from the local asset root.
    #[inline]
    #[must_use]
    pub fn is_local_target(&self, target: &str) -> bool {
        target.starts_with(&self.local_root)
    }

    /// Derives the display URL from a location reported by a surface.
    ///
    /// Proxy-internal locations are decoded back to the real destination,
    /// local asset paths are turned back into the virtual scheme, anything
    /// else is returned in parsed form.
    #[must_use]
    pub fn display_from_location(&self, location: &str) -> String {
        if location.is_empty() {
            return String::new();
        }

        let parsed = match self.origin.join(location) {
            Ok(parsed) => parsed,
            Err(_) => return decode_url(location),
        };

        let href = parsed.as_str();
        if let Some(idx) = href.find(&self.proxy_marker) {
            let encoded = &href[idx + self.proxy_marker.len()..];
            if !encoded.is_empty() {
                return decode_url(encoded);
            }
        }

        if let Some(tail) = parsed.path().strip_prefix(&self.local_root) {
            let dotted = format!(".{}", self.extension);
            let stem = tail.strip_suffix(&dotted).unwrap_or(tail);
            return format!(
                "{}{}{}",
                self.virtual_prefix,
                decode_url(stem),
                query_and_fragment(&parsed)
            );
        }

        href.to_string()
    }

    /// Returns the asset name shown when a local target is missing.
    #[must_use]
    pub fn missing_file_name(&self, target: &str) -> String {
        let name = target
            .strip_prefix(self.local_root.trim_end_matches('/'))
            .unwrap_or(target)
            .trim_start_matches('/');
        if name.is_empty() {
            format!("{}.{}", self.index_name, self.extension)
        } else {
            name.to_string()
        }
    }

    /// Returns the local asset root.
    #[inline]
    #[must_use]
    pub fn local_root(&self) -> &str {
        &self.local_root
    }
}

// ============================================================================
// Normalizer - Internal
// ============================================================================

impl Normalizer {
    fn has_virtual_prefix(&self, input: &str) -> bool {
        input
            .get(..self.virtual_prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&self.virtual_prefix))
    }

    /// Maps `bolt://host/path?q#f` onto the local asset root.
    ///
    /// Returns `None` when the remainder cannot be parsed as host + path.
    fn normalize_virtual(&self, input: &str) -> Option<Address> {
        let remainder = &input[self.virtual_prefix.len()..];

        let (path_part, suffix) = if remainder.trim_matches('/').is_empty() {
            (self.index_name.clone(), String::new())
        } else {
            let fake = Url::parse(&format!("{SECURE_SCHEME}{remainder}")).ok()?;
            let host = fake.host_str().unwrap_or_default();
            let raw_path = format!("{host}{}", fake.path());
            let trimmed = raw_path.trim_start_matches('/').trim_end_matches('/');
            let path_part = if trimmed.is_empty() {
                self.index_name.clone()
            } else {
                trimmed.to_string()
            };
            (path_part, query_and_fragment(&fake))
        };

        let last_segment = path_part.rsplit('/').next().unwrap_or_default();
        let file_path = if last_segment.contains('.') {
            path_part.clone()
        } else {
            format!("{path_part}.{}", self.extension)
        };

        Some(Address {
            navigate_target: format!("{}{file_path}{suffix}", self.local_root),
            display_text: format!("{}{path_part}{suffix}", self.virtual_prefix),
        })
    }

    fn search_url(&self, query: &str) -> String {
        self.search_template
            .replacen(SEARCH_PLACEHOLDER, &urlencoding::encode(query), 1)
    }
}

// ============================================================================
// Free Functions
// ============================================================================

/// Returns `true` if the input starts with `scheme://`.
#[inline]
#[must_use]
pub fn has_scheme(value: &str) -> bool {
    SCHEME_PATTERN.is_match(value)
}

/// Prepends `https://` to scheme-less input.
///
/// Blank input yields an empty string.
#[must_use]
pub fn ensure_protocol(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() || has_scheme(trimmed) {
        return trimmed.to_string();
    }
    format!("{SECURE_SCHEME}{trimmed}")
}

/// Percent-decodes a URL, returning the input unchanged if decoding fails.
#[must_use]
pub fn decode_url(value: &str) -> String {
    urlencoding::decode(value)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| value.to_string())
}

/// Derives a tab label from a display URL.
///
/// Uses the host when the URL parses, the raw text when it does not.
#[must_use]
pub fn tab_label(display_url: Option<&str>) -> String {
    let Some(url) = display_url.filter(|u| !u.is_empty()) else {
        return NEW_TAB_LABEL.to_string();
    };

    let label = match Url::parse(url) {
        Ok(parsed) => parsed.host_str().unwrap_or_default().to_string(),
        Err(_) => url.to_string(),
    };

    if label.is_empty() {
        EMPTY_HOST_LABEL.to_string()
    } else {
        label
    }
}

/// Returns `true` if scheme-less input names a host rather than a query.
fn looks_like_host(input: &str) -> bool {
    if input.chars().any(char::is_whitespace) {
        return false;
    }

    let Ok(parsed) = Url::parse(&format!("{SECURE_SCHEME}{input}")) else {
        return false;
    };

    match parsed.host() {
        Some(Host::Domain(domain)) => domain.contains('.') || domain == "localhost",
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        None => false,
    }
}

/// Renders `?query#fragment`, omitting empty parts.
fn query_and_fragment(url: &Url) -> String {
    let mut out = String::new();
    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        out.push('?');
        out.push_str(query);
    }
    if let Some(fragment) = url.fragment().filter(|f| !f.is_empty()) {
        out.push('#');
        out.push_str(fragment);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn normalizer() -> Normalizer {
        Normalizer::new(&ShellConfig::default()).expect("default config")
    }

    #[test]
    fn test_blank_input_is_empty() {
        let n = normalizer();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("   \t\n").is_empty());
        assert_eq!(n.normalize("  "), Address::default());
    }

    #[test]
    fn test_bare_domain_gets_https() {
        let address = normalizer().normalize("example.com");
        assert_eq!(address.navigate_target, "https://example.com");
        assert_eq!(address.display_text, "https://example.com");
    }

    #[test]
    fn test_domain_with_path_and_port() {
        let n = normalizer();
        assert_eq!(
            n.normalize("localhost:3000/app").navigate_target,
            "https://localhost:3000/app"
        );
        assert_eq!(
            n.normalize("127.0.0.1/status").navigate_target,
            "https://127.0.0.1/status"
        );
    }

    #[test]
    fn test_full_url_is_verbatim() {
        let address = normalizer().normalize("  http://example.org/a?b=c  ");
        assert_eq!(address, Address::same("http://example.org/a?b=c"));
    }

    #[test]
    fn test_query_goes_to_search() {
        let address = normalizer().normalize("rust borrow checker");
        assert_eq!(
            address.navigate_target,
            "https://www.duckduckgo.com/search?q=rust%20borrow%20checker"
        );
        assert_eq!(address.display_text, address.navigate_target);
    }

    #[test]
    fn test_single_word_goes_to_search() {
        let address = normalizer().normalize("weather");
        assert_eq!(
            address.navigate_target,
            "https://www.duckduckgo.com/search?q=weather"
        );
    }

    #[test]
    fn test_custom_search_template() {
        let config =
            ShellConfig::new().with_search_template("https://www.google.com/search?q=%s&hl=en");
        let n = Normalizer::new(&config).expect("config");
        assert_eq!(
            n.normalize("a&b").navigate_target,
            "https://www.google.com/search?q=a%26b&hl=en"
        );
    }

    #[test]
    fn test_virtual_path_gets_extension() {
        let address = normalizer().normalize("bolt://docs/readme");
        assert_eq!(address.navigate_target, "/bolt/docs/readme.html");
        assert_eq!(address.display_text, "bolt://docs/readme");
    }

    #[test]
    fn test_virtual_prefix_is_case_insensitive() {
        let address = normalizer().normalize("BOLT://about");
        assert_eq!(address.navigate_target, "/bolt/about.html");
        assert_eq!(address.display_text, "bolt://about");
    }

    #[test]
    fn test_virtual_path_keeps_existing_extension() {
        let address = normalizer().normalize("bolt://docs/logo.png");
        assert_eq!(address.navigate_target, "/bolt/docs/logo.png");
        assert_eq!(address.display_text, "bolt://docs/logo.png");
    }

    #[test]
    fn test_virtual_path_strips_trailing_slashes() {
        let address = normalizer().normalize("bolt://docs/guide///");
        assert_eq!(address.navigate_target, "/bolt/docs/guide.html");
        assert_eq!(address.display_text, "bolt://docs/guide");
    }

    #[test]
    fn test_virtual_query_and_fragment_follow_extension() {
        let address = normalizer().normalize("bolt://docs/readme?lang=en#intro");
        assert_eq!(address.navigate_target, "/bolt/docs/readme.html?lang=en#intro");
        assert_eq!(address.display_text, "bolt://docs/readme?lang=en#intro");
    }

    #[test]
    fn test_empty_virtual_path_is_index() {
        let n = normalizer();
        for input in ["bolt://", "bolt:///", "bolt:////"] {
            let address = n.normalize(input);
            assert_eq!(address.navigate_target, "/bolt/index.html", "{input}");
            assert_eq!(address.display_text, "bolt://index", "{input}");
        }
    }

    #[test]
    fn test_malformed_virtual_input_falls_back() {
        let address = normalizer().normalize("bolt://exa mple/x");
        assert_eq!(address, Address::same("bolt://exa mple/x"));
    }

    #[test]
    fn test_ensure_protocol() {
        assert_eq!(ensure_protocol("example.com"), "https://example.com");
        assert_eq!(ensure_protocol("ws://a.b"), "ws://a.b");
        assert_eq!(ensure_protocol("   "), "");
    }

    #[test]
    fn test_decode_url() {
        assert_eq!(decode_url("a%20b"), "a b");
        assert_eq!(decode_url("%FF"), "%FF");
    }

    #[test]
    fn test_display_from_proxied_location() {
        let n = normalizer();
        assert_eq!(
            n.display_from_location("/scramjet/https%3A%2F%2Fexample.org%2Fpath"),
            "https://example.org/path"
        );
        assert_eq!(
            n.display_from_location(
                "http://localhost:8080/scramjet/https%3A%2F%2Fexample.org%2Fpath"
            ),
            "https://example.org/path"
        );
    }

    #[test]
    fn test_display_from_local_location() {
        let n = normalizer();
        assert_eq!(
            n.display_from_location("/bolt/docs/readme.html?x=1#top"),
            "bolt://docs/readme?x=1#top"
        );
        assert_eq!(
            n.display_from_location("/bolt/docs/logo.png"),
            "bolt://docs/logo.png"
        );
    }

    #[test]
    fn test_display_from_plain_location() {
        let n = normalizer();
        assert_eq!(
            n.display_from_location("https://example.com"),
            "https://example.com/"
        );
        assert_eq!(n.display_from_location(""), "");
    }

    #[test]
    fn test_missing_file_name() {
        let n = normalizer();
        assert_eq!(n.missing_file_name("/bolt/docs/a.html"), "docs/a.html");
        assert_eq!(n.missing_file_name("/bolt//a.html"), "a.html");
        assert_eq!(n.missing_file_name("/bolt/"), "index.html");
    }

    #[test]
    fn test_tab_label() {
        assert_eq!(tab_label(None), "New Tab");
        assert_eq!(tab_label(Some("")), "New Tab");
        assert_eq!(tab_label(Some("https://example.org/path")), "example.org");
        assert_eq!(tab_label(Some("bolt://docs/readme")), "docs");
        assert_eq!(tab_label(Some("not a url")), "not a url");
        assert_eq!(tab_label(Some("data:text/html,hi")), "Tab");
    }

    #[test]
    fn test_is_local_target() {
        let n = normalizer();
        assert!(n.is_local_target("/bolt/about.html"));
        assert!(!n.is_local_target("https://example.com/bolt/"));
    }

    proptest! {
        #[test]
        fn prop_non_blank_input_has_target(input in "\\PC*") {
            let address = normalizer().normalize(&input);
            prop_assert_eq!(address.is_empty(), input.trim().is_empty());
        }

        #[test]
        fn prop_virtual_display_round_trips(
            host in "[a-z][a-z0-9]{0,7}",
            segments in proptest::collection::vec("[a-z0-9_-]{1,8}", 0..3)
        ) {
            let n = normalizer();
            let mut parts = vec![host];
            parts.extend(segments);
            let input = format!("bolt://{}", parts.join("/"));
            let address = n.normalize(&input);
            prop_assert_eq!(&address.display_text, &input);
            prop_assert_eq!(n.display_from_location(&address.navigate_target), input);
        }
    }
}
