pub mod names;
pub mod paths;

pub use names::{from_slug, to_slug};
