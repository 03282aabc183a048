//! Credit extraction library: canonical title and role-annotated artists
//! from free-form upload titles.

pub mod batch;
pub mod compose;
pub mod credits;
pub mod extract;
pub mod models;
pub mod progress;
pub mod safety;
pub mod sanitize;
pub mod segment;

pub use extract::extract;
pub use models::{Artist, ArtistRole, ExtractionResult, RemixType};
