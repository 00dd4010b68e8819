use regex::Regex;
use std::sync::OnceLock;

fn disallowed_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[^a-z0-9_\s-]").expect("valid slug pattern"))
}

fn separator_runs() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s_-]+").expect("valid slug pattern"))
}

/// Turn a display name into a routing slug: `"C-137 Rick"` -> `"c-137-rick"`.
///
/// The result only contains `[a-z0-9]` and single interior hyphens. Names made
/// entirely of punctuation come back empty.
pub fn to_slug(name: &str) -> String {
    // 1. Lowercase
    let lower = name.to_lowercase();

    // 2. Drop everything but ASCII word chars, whitespace and hyphens
    let kept = disallowed_chars().replace_all(&lower, "");

    // 3. Collapse separators into one hyphen
    let slug = separator_runs().replace_all(&kept, "-");

    // 4. Trim hyphens from ends
    slug.trim_matches('-').to_string()
}

/// Best-effort inverse of [`to_slug`], used as a search term.
///
/// Only the first character of each segment is upper-cased; the rest is passed
/// through untouched, so `"mc-donald"` becomes `"Mc Donald"`, not a guess at
/// the original casing.
pub fn from_slug(slug: &str) -> String {
    if slug.is_empty() {
        return String::new();
    }

    slug.split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
