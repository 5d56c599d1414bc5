//! Request path utilities
//!
//! All functions are **pure**: given same input, always produce same output with no side effects.

/// Splits a request path into its non-empty segments
///
/// Only `/` separates segments; any other character, `\` included, is
/// segment text.
///
/// ```
/// use fsroute::path::segments;
///
/// let segs: Vec<&str> = segments("//users/4\\2/").collect();
/// assert_eq!(segs, vec!["users", "4\\2"]);
/// ```
pub fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// Percent-decodes a captured value, keeping the raw text when the
/// decoded bytes are not UTF-8
///
/// ```
/// use fsroute::path::decode_lossless;
///
/// assert_eq!(decode_lossless("hello%20world"), "hello world");
/// assert_eq!(decode_lossless("%FF"), "%FF");
/// ```
pub fn decode_lossless(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}
