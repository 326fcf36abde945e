//! # recx
//!
//! A content-based recommendation engine for titled catalogs.
//!
//! recx ranks catalog records against a seed title by cosine similarity over
//! a fused feature space: a TF-IDF channel built from cleaned descriptions
//! and a down-weighted category multi-hot channel. Results can be filtered
//! by category labels.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use recx::prelude::*;
//!
//! # fn main() -> recx::Result<()> {
//! // Open (or create) the catalog
//! let catalog = Catalog::open("./data/catalog.json")?;
//!
//! // Add a record; duplicate titles are a no-op
//! let record = Record::new("The Hobbit")
//!     .with_clean_description("a hobbit journeys to a dragon's mountain hoard")
//!     .with_categories("Fantasy, Adventure");
//! catalog.upsert_if_absent(record)?;
//!
//! // Rank the rest of the catalog against a seed title
//! let results = recommend(&catalog.all(), "The Hobbit", &[], 5)?;
//! for r in &results {
//!     println!("{} ({:.2})", r.title, r.similarity);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - [`recx-core`](https://docs.rs/recx-core) - Records, feature building, ranking
//! - [`recx-storage`](https://docs.rs/recx-storage) - Durable catalog store

// Re-export core types
pub use recx_core::{
    normalize_title, recommend, Error, FeatureSpace, Rating, Recommendation, Record, Result,
    Vector,
};

// Re-export storage
pub use recx_storage::Catalog;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        normalize_title, recommend, Catalog, Error, FeatureSpace, Rating, Recommendation,
        Record, Result, Vector,
    };
}
