//! # recx Core
//!
//! Core library for the recx recommendation engine.
//!
//! This crate provides the data model and algorithms:
//!
//! - [`Record`] - One catalog entry with text and category metadata
//! - [`FeatureSpace`] - TF-IDF + category multi-hot vector space over a catalog
//! - [`recommend`] - Cosine-ranked, category-filtered recommendations
//!
//! ## Example
//!
//! ```rust
//! use recx_core::{recommend, Record};
//!
//! let catalog = vec![
//!     Record::new("The Hobbit")
//!         .with_clean_description("a hobbit journeys to a dragon's mountain hoard")
//!         .with_categories("Fantasy, Adventure"),
//!     Record::new("The Fellowship of the Ring")
//!         .with_clean_description("a hobbit carries a ring toward a distant mountain")
//!         .with_categories("Fantasy, Adventure"),
//! ];
//!
//! let results = recommend(&catalog, "The Hobbit", &[], 5).unwrap();
//! assert_eq!(results[0].title, "The Fellowship of the Ring");
//! ```

pub mod error;
pub mod features;
pub mod ranker;
pub mod record;
pub mod stopwords;
pub mod vector;

pub use error::{Error, Result};
pub use features::FeatureSpace;
pub use ranker::{recommend, Recommendation};
pub use record::{normalize_title, Rating, Record};
pub use vector::Vector;
