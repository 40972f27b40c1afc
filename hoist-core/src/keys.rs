//! Destination key derivation for uploaded artifacts.

/// Path used when a report has no URL path worth keeping.
const MAIN_PATH: &str = "/main";

/// Derive the destination path fragment from a report's `finalUrl`.
///
/// The `scheme://host` prefix is stripped. A missing URL or a bare `/` path
/// maps to `/main`; a URL with no path at all yields the empty string, which
/// is used verbatim downstream.
pub fn url_path(final_url: Option<&str>) -> String {
    let path = strip_origin(final_url.unwrap_or(MAIN_PATH));
    if path == "/" {
        String::from(MAIN_PATH)
    } else {
        String::from(path)
    }
}

/// Destination key for a badge artifact.
///
/// `prefix` is prepended verbatim; no separator is inserted.
pub fn badge_key(prefix: &str, url_path: &str, label: &str) -> String {
    format!("{prefix}{url_path}.{label}.svg")
}

/// Destination key for a raw report upload.
pub fn report_key(prefix: &str, url_path: &str) -> String {
    format!("{prefix}{url_path}.report.json")
}

fn strip_origin(url: &str) -> &str {
    let Some(scheme_end) = url.find("://") else {
        return url;
    };
    let after_scheme = &url[scheme_end + 3..];
    match after_scheme.find('/') {
        Some(path_start) => &after_scheme[path_start..],
        None => "",
    }
}

#[cfg(test)]
mod tests {
    use super::{badge_key, report_key, url_path};

    #[test]
    fn url_path_strips_scheme_and_host() {
        assert_eq!(url_path(Some("https://a.com/foo")), "/foo");
        assert_eq!(url_path(Some("http://a.com:8080/foo/bar")), "/foo/bar");
    }

    #[test]
    fn url_path_maps_root_to_main() {
        assert_eq!(url_path(Some("https://a.com/")), "/main");
    }

    #[test]
    fn url_path_defaults_to_main_without_url() {
        assert_eq!(url_path(None), "/main");
    }

    #[test]
    fn url_path_without_any_path_is_empty() {
        assert_eq!(url_path(Some("https://a.com")), "");
    }

    #[test]
    fn url_path_keeps_query_and_trailing_segments() {
        assert_eq!(url_path(Some("https://a.com/foo/")), "/foo/");
        assert_eq!(url_path(Some("https://a.com/foo?tab=1")), "/foo?tab=1");
    }

    #[test]
    fn badge_key_prepends_prefix_verbatim() {
        assert_eq!(
            badge_key("badges", "/main", "performance"),
            "badges/main.performance.svg"
        );
        assert_eq!(badge_key("", "/pricing", "seo"), "/pricing.seo.svg");
    }

    #[test]
    fn report_key_prepends_prefix_verbatim() {
        assert_eq!(report_key("ci", "/main"), "ci/main.report.json");
        assert_eq!(report_key("", ""), ".report.json");
    }
}
