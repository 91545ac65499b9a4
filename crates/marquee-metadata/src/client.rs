//! TMDB v3 HTTP client.

use std::collections::HashMap;
use std::time::Duration;

use marquee_core::{CatalogEntry, Error, Result, TmdbSettings};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::lookup::{self, MetadataSource};
use crate::types::{EntryResults, TmdbGenreList, TmdbMovie, TmdbSearchResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// TMDB client built from explicit settings.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    credential: String,
    base_url: String,
    request_delay: Duration,
}

impl TmdbClient {
    pub fn new(settings: &TmdbSettings) -> Result<Self> {
        let credential = settings
            .api_key
            .clone()
            .ok_or_else(|| Error::Config("TMDB API key is not configured".into()))?;
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        Ok(Self {
            client,
            credential,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            request_delay: settings.request_delay(),
        })
    }

    pub fn request_delay(&self) -> Duration {
        self.request_delay
    }

    /// v4 read access tokens (JWTs) go in a bearer header; v3 keys in the query.
    fn is_access_token(&self) -> bool {
        self.credential.starts_with("eyJ")
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        if self.is_access_token() {
            request.bearer_auth(&self.credential)
        } else {
            request.query(&[("api_key", self.credential.as_str())])
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder, what: &str) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| Error::Http(format!("TMDB request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound(what.to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| Error::Http(format!("TMDB response decode failed: {}", e)))
    }

    /// Free-text movie search (first page).
    pub async fn search_movie(&self, query: &str) -> Result<Vec<TmdbMovie>> {
        debug!("TMDB search: {:?}", query);
        let request = self.get("/search/movie").query(&[
            ("query", query),
            ("language", "en-US"),
            ("page", "1"),
            ("include_adult", "false"),
        ]);
        let response: TmdbSearchResponse = self.fetch(request, &format!("search {:?}", query)).await?;
        Ok(response.results)
    }

    /// Full movie details, passed through untouched.
    pub async fn movie_details(&self, id: i64) -> Result<serde_json::Value> {
        let request = self.get(&format!("/movie/{}", id));
        self.fetch(request, &format!("movie {}", id)).await
    }

    /// Genre id to name map.
    pub async fn genres(&self) -> Result<HashMap<i64, String>> {
        let request = self.get("/genre/movie/list").query(&[("language", "en-US")]);
        let list: TmdbGenreList = self.fetch(request, "genre list").await?;
        Ok(list.into_map())
    }

    /// Search and rank candidates for one entry.
    pub async fn search_entry(&self, entry: &CatalogEntry) -> Vec<TmdbMovie> {
        lookup::search_entry(self, entry).await
    }

    /// Sequential, paced lookup of many entries.
    pub async fn search_entries(&self, entries: &[CatalogEntry]) -> Vec<EntryResults> {
        lookup::search_entries(self, entries, self.request_delay).await
    }
}

impl MetadataSource for TmdbClient {
    async fn search_movie(&self, query: &str) -> Result<Vec<TmdbMovie>> {
        TmdbClient::search_movie(self, query).await
    }
}
