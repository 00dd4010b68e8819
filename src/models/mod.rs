pub mod character;
pub mod search;

pub use character::*;
pub use search::*;
