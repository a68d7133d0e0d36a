//! External collaborator seams: catalog provider and entity extractor.

mod http;
mod memory;
mod traits;

pub use http::HttpCatalogProvider;
pub use memory::{StaticCatalogProvider, WhitespaceExtractor};
pub use traits::{CatalogProvider, EntityExtractor};
