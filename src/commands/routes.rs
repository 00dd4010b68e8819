use crate::routes;
use crate::services::CharacterSource;
use crate::state::AppState;

/// Detail routes for every known character id.
pub async fn id_routes(state: &AppState, fallback: Option<u64>) -> Vec<String> {
    let total = super::characters::total(state, fallback).await;
    detail_routes(total)
}

fn detail_routes(total: u64) -> Vec<String> {
    routes::id_params(total)
        .iter()
        .map(routes::character_detail)
        .collect()
}

pub async fn name_routes<S: CharacterSource + ?Sized>(source: &S) -> Vec<String> {
    routes::name_params(source)
        .await
        .into_iter()
        .map(|slug| routes::character_by_name(&slug))
        .collect()
}
