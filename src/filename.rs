//! Suggested-filename derivation from source URLs.

use url::Url;

/// Name used when no filename can be derived from the source URL.
pub const FALLBACK_FILENAME: &str = "downloaded-file";

/// Derives a local filename from the final path segment of `url`.
///
/// Malformed URLs, bare directory paths, and dot-only segments all yield
/// [`FALLBACK_FILENAME`]. Characters that are invalid in local filenames are
/// replaced with `_`. Never panics; always returns a non-empty string.
#[must_use]
pub fn suggested_filename(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| {
            parsed
                .path_segments()
                .and_then(|mut segments| segments.next_back().map(sanitize))
        })
        .filter(|name| !name.is_empty() && !matches!(name.as_str(), "." | ".."))
        .unwrap_or_else(|| FALLBACK_FILENAME.to_string())
}

/// Replaces characters that are invalid in local filenames with `_`.
fn sanitize(segment: &str) -> String {
    segment
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_path_segment_is_used() {
        assert_eq!(
            suggested_filename("https://x.com/a/b/file.zip"),
            "file.zip"
        );
    }

    #[test]
    fn single_segment_path() {
        assert_eq!(suggested_filename("https://x.com/archive.tar.gz"), "archive.tar.gz");
    }

    #[test]
    fn trailing_slash_falls_back() {
        assert_eq!(suggested_filename("https://x.com/"), FALLBACK_FILENAME);
        assert_eq!(suggested_filename("https://x.com/dir/"), FALLBACK_FILENAME);
    }

    #[test]
    fn bare_host_falls_back() {
        assert_eq!(suggested_filename("https://x.com"), FALLBACK_FILENAME);
    }

    #[test]
    fn malformed_url_falls_back() {
        assert_eq!(suggested_filename("not a url"), FALLBACK_FILENAME);
        assert_eq!(suggested_filename(""), FALLBACK_FILENAME);
    }

    #[test]
    fn query_string_is_not_part_of_the_name() {
        assert_eq!(
            suggested_filename("https://x.com/file.zip?token=abc"),
            "file.zip"
        );
    }

    #[test]
    fn invalid_characters_are_replaced() {
        assert_eq!(
            suggested_filename("https://x.com/we%2Fird%3Aname"),
            "we%2Fird%3Aname"
        );
        assert_eq!(suggested_filename("https://x.com/a:b"), "a_b");
    }

    #[test]
    fn dot_segments_fall_back() {
        assert_eq!(suggested_filename("https://x.com/a/%2E%2E"), FALLBACK_FILENAME);
    }
}
