//! Movie metadata lookups against TMDB.
//!
//! Catalog entries are resolved one at a time with a fixed pause between
//! requests, candidates are ranked against the entry, and results can be
//! fanned out into genre groups for browsing.

pub mod client;
pub mod grouping;
pub mod lookup;
pub mod ranking;
pub mod types;

pub use client::TmdbClient;
pub use grouping::{group_by_genre, predictions};
pub use lookup::{search_entries, MetadataSource};
pub use ranking::{rank_candidates, release_year};
pub use types::*;
