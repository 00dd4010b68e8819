use async_trait::async_trait;
use reqwest::header::{HeaderValue, CACHE_CONTROL};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use thiserror::Error;

use super::character_index::CharacterSource;
use crate::models::{Character, CharacterPage, OneOrMany, SearchFilters};
use crate::state::AppSettings;

pub const RICK_AND_MORTY_API_BASE: &str = "https://rickandmortyapi.com/api";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API returned {status} for {url}")]
    Status { status: u16, url: String },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// How a call site wants intermediate HTTP caches to treat its request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CachePolicy {
    /// Build-time data: any cached copy is good enough.
    ForceCache,
    /// Accept a cached copy up to this age.
    Revalidate(Duration),
    /// Interactive search: always hit the API.
    NoStore,
}

impl CachePolicy {
    pub fn header_value(&self) -> HeaderValue {
        match self {
            CachePolicy::ForceCache => HeaderValue::from_static("max-stale"),
            CachePolicy::Revalidate(max_age) => {
                HeaderValue::from_str(&format!("max-age={}", max_age.as_secs()))
                    .unwrap_or_else(|_| HeaderValue::from_static("no-cache"))
            }
            CachePolicy::NoStore => HeaderValue::from_static("no-store"),
        }
    }
}

pub struct RickAndMortyClient {
    client: Client,
    base_url: String,
    revalidate: Duration,
}

impl RickAndMortyClient {
    pub fn new(settings: &AppSettings) -> Result<Self, ApiError> {
        let mut builder = Client::builder()
            .user_agent(settings.user_agent.as_str())
            // Avoid hanging forever on bad networks / proxies.
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.timeout_secs));
        if !settings.use_system_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            revalidate: Duration::from_secs(settings.revalidate_secs),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn get(&self, path: &str, policy: CachePolicy) -> RequestBuilder {
        self.client
            .get(self.endpoint(path))
            .header(CACHE_CONTROL, policy.header_value())
    }

    async fn send(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        log::debug!("GET {} -> {}", response.url(), status);

        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        Ok(response)
    }

    /// First listing page, cached for static generation.
    pub async fn get_all_characters(&self) -> Result<CharacterPage, ApiError> {
        self.get_page(1).await.inspect_err(|e| {
            log::error!("Error fetching all characters: {}", e);
        })
    }

    pub async fn get_page(&self, page: u32) -> Result<CharacterPage, ApiError> {
        let request = self
            .get("character", CachePolicy::ForceCache)
            .query(&[("page", page)]);
        Ok(Self::send(request).await?.json().await?)
    }

    pub async fn get_character_by_id(&self, id: u32) -> Result<Character, ApiError> {
        let request = self.get(
            &format!("character/{}", id),
            CachePolicy::Revalidate(self.revalidate),
        );
        let character = Self::send(request)
            .await
            .inspect_err(|e| log::error!("Error fetching character {}: {}", id, e))?
            .json()
            .await?;
        Ok(character)
    }

    pub async fn get_characters_by_ids(&self, ids: &[u32]) -> Result<Vec<Character>, ApiError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let joined = ids
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let request = self.get(
            &format!("character/{}", joined),
            CachePolicy::Revalidate(self.revalidate),
        );

        let data: OneOrMany = Self::send(request)
            .await
            .inspect_err(|e| log::error!("Error fetching characters by ids: {}", e))?
            .json()
            .await?;
        Ok(data.into())
    }

    /// Live search. No matches is not an error: the API's 404 becomes an empty page.
    pub async fn search_characters(
        &self,
        filters: &SearchFilters,
    ) -> Result<CharacterPage, ApiError> {
        let request = self
            .get("character", CachePolicy::NoStore)
            .query(&filters.to_query());

        match Self::send(request).await {
            Ok(response) => Ok(response.json().await?),
            Err(e) if e.is_not_found() => Ok(CharacterPage::empty()),
            Err(e) => {
                log::error!("Error searching characters: {}", e);
                Err(e)
            }
        }
    }

    /// Total character count, or `fallback` when the API can't be reached.
    pub async fn get_total_characters(&self, fallback: u64) -> u64 {
        match self.get_all_characters().await {
            Ok(page) => page.info.count,
            Err(e) => {
                log::warn!("Using fallback character total {}: {}", fallback, e);
                fallback
            }
        }
    }

    /// Exact (ASCII case-insensitive) name match among the search hits.
    ///
    /// `name=` matches substrings, so the exact hit can sit on a later page;
    /// pages are followed until it shows up or the results run out.
    pub async fn get_character_by_name(&self, name: &str) -> Result<Option<Character>, ApiError> {
        let mut filters = SearchFilters::by_name(name);
        let mut page_no = 1;
        loop {
            let page = self.search_characters(&filters).await?;
            let has_next = page.has_next();
            if let Some(found) = pick_exact_match(page.results, name) {
                return Ok(Some(found));
            }
            if !has_next {
                return Ok(None);
            }
            page_no += 1;
            filters.page = Some(page_no);
        }
    }
}

pub(crate) fn pick_exact_match(candidates: Vec<Character>, name: &str) -> Option<Character> {
    let wanted = name.trim();
    candidates
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(wanted))
}

#[async_trait]
impl CharacterSource for RickAndMortyClient {
    async fn fetch_page(&self, page: u32) -> Result<CharacterPage, ApiError> {
        self.get_page(page).await
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Character>, ApiError> {
        self.get_character_by_name(name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::character::fixtures::character;

    fn client_for(base: &str) -> RickAndMortyClient {
        let settings = AppSettings {
            api_base_url: base.to_string(),
            ..AppSettings::default()
        };
        RickAndMortyClient::new(&settings).unwrap()
    }

    #[test]
    fn cache_policy_headers() {
        assert_eq!(CachePolicy::ForceCache.header_value(), "max-stale");
        assert_eq!(CachePolicy::NoStore.header_value(), "no-store");
        assert_eq!(
            CachePolicy::Revalidate(Duration::from_secs(864000)).header_value(),
            "max-age=864000"
        );
    }

    #[test]
    fn endpoint_joins_without_double_slashes() {
        let client = client_for("https://rickandmortyapi.com/api/");
        assert_eq!(client.base_url(), RICK_AND_MORTY_API_BASE);
        assert_eq!(
            client.endpoint("/character/1"),
            "https://rickandmortyapi.com/api/character/1"
        );
        assert_eq!(
            client.endpoint("character"),
            "https://rickandmortyapi.com/api/character"
        );
    }

    #[test]
    fn not_found_detection() {
        let status = |status: u16| ApiError::Status {
            status,
            url: "https://rickandmortyapi.com/api/character?name=nobody".into(),
        };
        assert!(status(404).is_not_found());
        assert!(!status(500).is_not_found());
    }

    #[test]
    fn exact_match_ignores_ascii_case() {
        let hits = vec![
            character(1, "Rick Sanchez"),
            character(2, "Rick Sanchez Jr"),
            character(3, "rick sanchez"),
        ];
        let found = pick_exact_match(hits.clone(), "Rick Sanchez").unwrap();
        assert_eq!(found.id, 1);

        let found = pick_exact_match(hits.clone(), " RICK SANCHEZ ").unwrap();
        assert_eq!(found.id, 1);

        assert!(pick_exact_match(hits, "Rick").is_none());
    }
}
