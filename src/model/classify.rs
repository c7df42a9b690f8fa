//! Text classification helpers for satellite rendering.
//!
//! The arrow label decides how a satellite's text is interpreted: a plain
//! string, an external URL, or an image reference. Math detection only
//! guards title truncation; typesetting itself is out of scope.

fn has_http_scheme(text: &str) -> bool {
    text.starts_with("http:/") || text.starts_with("https:/")
}

/// True when the edge label marks the text as an external URL.
pub fn is_url(text: &str, arrow: &str) -> bool {
    arrow == "has URL" && has_http_scheme(text)
}

/// True when the edge label marks the text as an image reference.
pub fn is_image(text: &str, arrow: &str) -> bool {
    (arrow == "has image" || arrow == "is an image for") && has_http_scheme(text)
}

/// Heuristic markup detection: bracketed expressions are left untruncated
/// so delimiters never get cut in half.
pub fn is_math(text: &str) -> bool {
    text.contains('(') && text.contains(')')
}
