//! Resolution of content URLs against the document base.

use url::Url;

/// Resolves an attribute value to an absolute URL string.
///
/// Surrounding whitespace is ignored and an empty value stays empty. Values
/// that cannot be resolved (relative without a base, malformed) also yield an
/// empty string so the element degrades to having no content URL.
#[must_use]
pub fn resolve_url(base: Option<&Url>, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    let resolved = match base {
        Some(base) => base.join(value),
        None => Url::parse(value),
    };
    match resolved {
        Ok(url) => url.into(),
        Err(error) => {
            tracing::debug!(value, %error, "content URL could not be resolved");
            String::new()
        }
    }
}
