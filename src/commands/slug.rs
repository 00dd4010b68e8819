use serde::Serialize;

use crate::utils::{from_slug, to_slug};

#[derive(Debug, Serialize, PartialEq)]
pub struct SlugOutput {
    pub name: String,
    pub slug: String,
}

/// Words are joined with single spaces first, so `slug Rick Sanchez` works unquoted.
pub fn slug(words: &[String]) -> SlugOutput {
    let name = words.join(" ");
    let slug = to_slug(&name);
    SlugOutput { name, slug }
}

pub fn unslug(slug: &str) -> SlugOutput {
    SlugOutput {
        name: from_slug(slug),
        slug: slug.to_string(),
    }
}
