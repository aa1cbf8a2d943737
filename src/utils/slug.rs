use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, strips diacritics (NFD decomposition, combining marks
/// dropped), collapses any run of other characters into a single hyphen,
/// and trims leading/trailing hyphens. Output contains only `[a-z0-9-]`.
pub fn generate_slug(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.nfd() {
        if is_combining_mark(ch) {
            continue;
        }
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}
