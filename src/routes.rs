//! Route table of the explorer front-end and the parameters needed to
//! pre-render it.

use futures::StreamExt;
use std::collections::HashSet;
use std::fmt::Display;

use crate::services::{character_names, CharacterSource};
use crate::utils::to_slug;

pub const APP_NAME: &str = "Rick and Morty Characters";
pub const APP_DESCRIPTION: &str = "Explore the Rick and Morty multiverse";
/// Ten days, in seconds.
pub const REVALIDATE_SECS: u64 = 864_000;

pub const HOME: &str = "/";
pub const CHARACTERS: &str = "/characters";
pub const SEARCH: &str = "/search";

pub fn character_detail<T: Display>(id: T) -> String {
    format!("{}/{}", CHARACTERS, id)
}

pub fn character_by_name(name: &str) -> String {
    format!("{}/name/{}", CHARACTERS, to_slug(name))
}

/// `"1"..="total"`, one per character detail page.
pub fn id_params(total: u64) -> Vec<String> {
    (1..=total).map(|id| id.to_string()).collect()
}

/// Slug of every listed name, first occurrence wins. Names that slug to
/// nothing can't be routed and are dropped.
pub async fn name_params<S>(source: &S) -> Vec<String>
where
    S: CharacterSource + ?Sized,
{
    let mut seen = HashSet::new();
    character_names(source)
        .map(|name| to_slug(&name))
        .filter(|slug| {
            let keep = !slug.is_empty() && seen.insert(slug.clone());
            futures::future::ready(keep)
        })
        .collect()
        .await
}
