pub mod character_index;
pub mod rick_and_morty;

pub use character_index::{character_names, enumerate_all_names, resolve_slug, CharacterSource};
pub use rick_and_morty::{ApiError, CachePolicy, RickAndMortyClient, RICK_AND_MORTY_API_BASE};
