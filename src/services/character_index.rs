use async_trait::async_trait;
use futures::stream::{self, Stream, StreamExt};

use super::rick_and_morty::ApiError;
use crate::models::{Character, CharacterPage};
use crate::utils::from_slug;

/// Anything that can serve the paged character listing and a lookup by name.
#[async_trait]
pub trait CharacterSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, ApiError>;

    async fn find_by_name(&self, name: &str) -> Result<Option<Character>, ApiError>;
}

/// Lazily walk the listing from page 1, yielding every display name in order.
///
/// Pages are fetched one at a time. The walk ends after the page without a
/// `next` link, or at the first failed page; names already yielded stay valid.
/// Nothing is de-duplicated, and a listing that changes mid-walk can skip or
/// repeat entries.
pub fn character_names<S>(source: &S) -> impl Stream<Item = String> + Send + '_
where
    S: CharacterSource + ?Sized,
{
    stream::unfold(Some(1u32), move |next_page| async move {
        let page = next_page?;
        match source.fetch_page(page).await {
            Ok(response) => {
                let following = response.has_next().then(|| page + 1);
                let names = response.results.into_iter().map(|c| c.name);
                Some((stream::iter(names.collect::<Vec<_>>()), following))
            }
            Err(e) => {
                log::warn!("Stopping name enumeration at page {}: {}", page, e);
                None
            }
        }
    })
    .flatten()
}

/// Every name in the remote listing. Never fails; a broken page truncates.
pub async fn enumerate_all_names<S>(source: &S) -> Vec<String>
where
    S: CharacterSource + ?Sized,
{
    let names: Vec<String> = character_names(source).collect().await;
    log::debug!("Enumerated {} character names", names.len());
    names
}

/// Look up the character behind a name route, e.g. `rick-sanchez`.
pub async fn resolve_slug<S>(source: &S, slug: &str) -> Result<Option<Character>, ApiError>
where
    S: CharacterSource + ?Sized,
{
    let name = from_slug(slug);
    if name.trim().is_empty() {
        return Ok(None);
    }
    source.find_by_name(&name).await
}


#[cfg(test)]
mod tests {
    use super::fake::PagedSource;
    use super::*;
    use crate::models::character::fixtures::page;
    use std::sync::atomic::Ordering;

    #[tokio::test]
    async fn walks_every_page_in_order() {
        let source = PagedSource::new(vec![
            Some(page(&["Rick Sanchez", "Morty Smith"], true)),
            Some(page(&["Summer Smith"], false)),
        ]);

        let names = enumerate_all_names(&source).await;
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith", "Summer Smith"]);
        assert_eq!(source.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_page_returns_partial_names() {
        let source = PagedSource::new(vec![
            Some(page(&["Rick Sanchez", "Morty Smith"], true)),
            None,
            Some(page(&["Never Reached"], false)),
        ]);

        let names = enumerate_all_names(&source).await;
        assert_eq!(names, vec!["Rick Sanchez", "Morty Smith"]);
        assert_eq!(source.requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failing_first_page_gives_empty_index() {
        let source = PagedSource::new(vec![None]);
        assert!(enumerate_all_names(&source).await.is_empty());
    }

    #[tokio::test]
    async fn duplicates_are_kept() {
        let source = PagedSource::new(vec![
            Some(page(&["Rick Sanchez"], true)),
            Some(page(&["Rick Sanchez"], false)),
        ]);
        assert_eq!(
            enumerate_all_names(&source).await,
            vec!["Rick Sanchez", "Rick Sanchez"]
        );
    }

    #[tokio::test]
    async fn stream_is_lazy_and_restartable() {
        let source = PagedSource::new(vec![
            Some(page(&["Rick Sanchez", "Morty Smith"], true)),
            Some(page(&["Summer Smith"], false)),
        ]);

        let first: Vec<String> = character_names(&source).take(1).collect().await;
        assert_eq!(first, vec!["Rick Sanchez"]);
        assert_eq!(source.requests.load(Ordering::SeqCst), 1);

        let again = enumerate_all_names(&source).await;
        assert_eq!(again.len(), 3);
    }

    #[tokio::test]
    async fn resolves_name_routes() {
        let source = PagedSource::new(vec![Some(page(&["Rick Sanchez", "Morty Smith"], false))]);

        let found = resolve_slug(&source, "morty-smith").await.unwrap();
        assert_eq!(found.map(|c| c.name), Some("Morty Smith".to_string()));

        assert!(resolve_slug(&source, "jerry-smith").await.unwrap().is_none());
        assert!(resolve_slug(&source, "").await.unwrap().is_none());
    }
}
