use anyhow::{bail, Context, Result};

use crate::models::{Character, CharacterPage, SearchFilters};
use crate::services::{enumerate_all_names, resolve_slug, CharacterSource};
use crate::state::AppState;

pub async fn names<S: CharacterSource + ?Sized>(source: &S) -> Vec<String> {
    enumerate_all_names(source).await
}

pub async fn character(state: &AppState, id: u32) -> Result<Character> {
    state
        .client
        .get_character_by_id(id)
        .await
        .with_context(|| format!("Failed to fetch character {}", id))
}

pub async fn characters(state: &AppState, ids: &[u32]) -> Result<Vec<Character>> {
    state
        .client
        .get_characters_by_ids(ids)
        .await
        .context("Failed to fetch characters")
}

pub async fn by_name<S: CharacterSource + ?Sized>(source: &S, slug: &str) -> Result<Character> {
    match resolve_slug(source, slug)
        .await
        .with_context(|| format!("Failed to look up {}", slug))?
    {
        Some(character) => Ok(character),
        None => bail!("Character not found: {}", slug),
    }
}

pub async fn search(state: &AppState, filters: &SearchFilters) -> Result<CharacterPage> {
    state
        .client
        .search_characters(filters)
        .await
        .context("Character search failed")
}

pub async fn total(state: &AppState, fallback: Option<u64>) -> u64 {
    let fallback = fallback.unwrap_or(state.settings.fallback_total_characters);
    state.client.get_total_characters(fallback).await
}
