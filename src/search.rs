use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

pub const SEARCH_ENDPOINT: &str = "https://www.google.com/search?q=";

/// Everything `encodeURIComponent` escapes.
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

/// Returns `None` when the trimmed query is empty; the caller must not
/// navigate in that case.
pub fn search_url(query: &str) -> Option<String> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }

    let encoded = utf8_percent_encode(query, URI_COMPONENT);
    Some(format!("{SEARCH_ENDPOINT}{encoded}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_encodes_query() {
        let url = search_url(" hello world ").unwrap();
        assert_eq!(url, "https://www.google.com/search?q=hello%20world");
    }

    #[test]
    fn blank_query_does_not_navigate() {
        assert_eq!(search_url(""), None);
        assert_eq!(search_url("   \t\n"), None);
    }

    #[test]
    fn reserved_characters_are_escaped_like_uri_components() {
        let url = search_url("a&b=c/d?e#f+g").unwrap();
        assert!(url.ends_with("a%26b%3Dc%2Fd%3Fe%23f%2Bg"), "{url}");

        let url = search_url("it's (ok)! ~*-_.").unwrap();
        assert!(url.ends_with("it's%20(ok)!%20~*-_."), "{url}");

        let url = search_url("ünïcode").unwrap();
        assert!(url.ends_with("%C3%BCn%C3%AFcode"), "{url}");
    }
}
