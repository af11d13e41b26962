//! URL scheme checks for `href`, `src` and similar attributes.

use crate::config::SanitizerConfig;

/// Whether an entity-decoded attribute value may be kept.
///
/// Browsers ignore ASCII whitespace and control characters inside a URL
/// scheme, so `java\tscript:` is `javascript:`. They are removed before the
/// scheme is read. Relative URLs have no scheme and are always kept.
pub(crate) fn is_allowed_url(value: &str, config: &SanitizerConfig) -> bool {
    let normalized: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect();

    match scheme(&normalized) {
        Some(scheme) => config.allows_scheme(scheme),
        None => true,
    }
}

/// The text before the first `:`, unless a path, query or fragment starts
/// before it.
fn scheme(url: &str) -> Option<&str> {
    let (candidate, _) = url.split_once(':')?;
    if candidate.contains(['/', '?', '#']) {
        return None;
    }
    Some(candidate)
}
