/// Domain classification for Tab Corral
use url::Url;

/// Sentinel for URLs that cannot be parsed at all.
pub const UNKNOWN_DOMAIN: &str = "unknown";

/// Classify a URL into the domain key used to group tabs.
///
/// Rules:
/// 1. Web URLs (http/https/ftp) with a hostname → the hostname with one
///    leading "www." stripped (e.g. "https://www.google.com/search" → "google.com")
/// 2. Any other parseable URL → the scheme followed by "://"
///    (e.g. "chrome://extensions" → "chrome://", "about:blank" → "about://")
/// 3. Unparseable input → "unknown"
///
/// Total and pure: every string maps to exactly one key, and repeated calls
/// produce the same result. Hostnames come back lowercased from the parser,
/// so casing in the input does not split a domain into two buckets.
pub fn domain_key(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return UNKNOWN_DOMAIN.to_string();
    };

    match parsed.scheme() {
        "http" | "https" | "ftp" => match parsed.host_str() {
            Some(host) if !host.is_empty() => {
                host.strip_prefix("www.").unwrap_or(host).to_string()
            }
            _ => scheme_key(&parsed),
        },
        _ => scheme_key(&parsed),
    }
}

fn scheme_key(parsed: &Url) -> String {
    format!("{}://", parsed.scheme())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_key_basic() {
        assert_eq!(domain_key("https://google.com"), "google.com");
        assert_eq!(domain_key("http://google.com"), "google.com");
        assert_eq!(domain_key("https://google.com/search?q=rust"), "google.com");
    }

    #[test]
    fn test_domain_key_strips_leading_www() {
        assert_eq!(domain_key("https://www.google.com"), "google.com");
        assert_eq!(domain_key("https://www.bbc.co.uk/news"), "bbc.co.uk");
        // Only a leading "www." is stripped; subdomains survive
        assert_eq!(domain_key("https://docs.microsoft.com"), "docs.microsoft.com");
        assert_eq!(domain_key("https://www.www.example.com"), "www.example.com");
    }

    #[test]
    fn test_domain_key_case_insensitive() {
        assert_eq!(domain_key("HTTPS://WWW.GOOGLE.COM"), "google.com");
        assert_eq!(domain_key("https://GitHub.com/rust-lang"), "github.com");
    }

    #[test]
    fn test_domain_key_idempotent_over_repeated_calls() {
        let url = "https://www.example.com/a/b?c=d";
        assert_eq!(domain_key(url), domain_key(url));
    }

    #[test]
    fn test_domain_key_non_web_schemes() {
        assert_eq!(domain_key("chrome://extensions"), "chrome://");
        assert_eq!(domain_key("about:blank"), "about://");
        assert_eq!(domain_key("moz-extension://abc123/popup.html"), "moz-extension://");
        assert_eq!(domain_key("file:///tmp/notes.txt"), "file://");
    }

    #[test]
    fn test_domain_key_unparseable() {
        assert_eq!(domain_key(""), UNKNOWN_DOMAIN);
        assert_eq!(domain_key("not a url"), UNKNOWN_DOMAIN);
        assert_eq!(domain_key("://missing-scheme"), UNKNOWN_DOMAIN);
    }

    #[test]
    fn test_domain_key_hosts_with_ports() {
        assert_eq!(domain_key("https://localhost:3000"), "localhost");
        assert_eq!(domain_key("http://127.0.0.1:8080/admin"), "127.0.0.1");
    }
}
