//! Paced batch lookup of catalog entries.

use std::future::Future;
use std::time::Duration;

use marquee_core::{CatalogEntry, Result};
use tracing::{debug, warn};

use crate::ranking::rank_candidates;
use crate::types::{EntryResults, TmdbMovie};

/// Anything that can answer a free-text movie search.
pub trait MetadataSource {
    fn search_movie(&self, query: &str) -> impl Future<Output = Result<Vec<TmdbMovie>>> + Send;
}

/// Search one entry and rank its candidates. Failures are logged and
/// degrade to an empty candidate list.
pub async fn search_entry<S: MetadataSource>(source: &S, entry: &CatalogEntry) -> Vec<TmdbMovie> {
    match source.search_movie(&entry.title).await {
        Ok(candidates) => rank_candidates(candidates, &entry.title, entry.year.as_deref()),
        Err(e) => {
            warn!("Error searching for movie {:?}: {}", entry.title, e);
            Vec::new()
        }
    }
}

/// Look up every entry strictly one after another, pausing `delay`
/// between consecutive requests. Results keep the input order.
pub async fn search_entries<S: MetadataSource>(
    source: &S,
    entries: &[CatalogEntry],
    delay: Duration,
) -> Vec<EntryResults> {
    let mut results = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(delay).await;
        }
        let movies = search_entry(source, entry).await;
        debug!("{:?}: {} candidates", entry.title, movies.len());
        results.push(EntryResults {
            entry: entry.clone(),
            movies,
        });
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_core::Error;
    use std::sync::Mutex;
    use std::time::Instant;

    struct FakeSource {
        calls: Mutex<Vec<(String, Instant)>>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self { calls: Mutex::new(Vec::new()) }
        }
    }

    impl MetadataSource for FakeSource {
        async fn search_movie(&self, query: &str) -> Result<Vec<TmdbMovie>> {
            self.calls.lock().unwrap().push((query.to_string(), Instant::now()));
            if query == "Broken" {
                return Err(Error::Http("connection reset".into()));
            }
            Ok(vec![
                TmdbMovie {
                    id: 1,
                    title: format!("{query} Returns"),
                    release_date: Some("2001-01-01".into()),
                    overview: String::new(),
                    poster_path: None,
                    vote_average: 0.0,
                    vote_count: 100,
                    genre_ids: Vec::new(),
                },
                TmdbMovie {
                    id: 2,
                    title: query.to_string(),
                    release_date: Some("1999-01-01".into()),
                    overview: String::new(),
                    poster_path: None,
                    vote_average: 0.0,
                    vote_count: 1,
                    genre_ids: Vec::new(),
                },
            ])
        }
    }

    #[tokio::test]
    async fn test_sequential_with_delay() {
        let source = FakeSource::new();
        let entries = vec![
            CatalogEntry::new("Carol", Some("2015")),
            CatalogEntry::new("Broken", None),
            CatalogEntry::new("Bound", Some("1996")),
        ];
        let delay = Duration::from_millis(250);
        let results = search_entries(&source, &entries, delay).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].entry, entries[0]);
        assert_eq!(results[0].movies[0].id, 2, "exact title ranks first");
        assert!(results[1].movies.is_empty(), "failures degrade to no candidates");

        let calls = source.calls.lock().unwrap();
        let queries: Vec<&str> = calls.iter().map(|(q, _)| q.as_str()).collect();
        assert_eq!(queries, vec!["Carol", "Broken", "Bound"]);
        for pair in calls.windows(2) {
            assert!(pair[1].1.duration_since(pair[0].1) >= delay);
        }
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_calls() {
        let source = FakeSource::new();
        let results = search_entries(&source, &[], Duration::from_millis(250)).await;
        assert!(results.is_empty());
        assert!(source.calls.lock().unwrap().is_empty());
    }
}
