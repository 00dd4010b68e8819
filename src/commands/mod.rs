pub mod characters;
pub mod routes;
pub mod slug;
