use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::error::{TmdbError, TmdbResult};
use crate::models::{Credits, MovieDetails, MovieSummary, RecommendationSet};

const TMDB_BASE: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/original";

/// Deadline for search and single-entity requests. Popular pages go out
/// without one.
const FETCH_DEADLINE: Duration = Duration::from_secs(10);

/// Trimmed queries shorter than this never reach the network.
const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    deadline: Duration,
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Popular movies, one page at a time. Degrades to empty on any
    /// failure.
    async fn popular_movies(&self, page: u32) -> Vec<MovieSummary>;
    /// Title search. Returns results in API order, not deduplicated;
    /// degrades to empty on any failure.
    async fn search_movies(&self, query: &str, page: u32) -> Vec<MovieSummary>;
    /// Full metadata for one movie.
    async fn movie_details(&self, id: &str) -> TmdbResult<MovieDetails>;
    /// Cast and crew for one movie.
    async fn movie_credits(&self, id: &str) -> TmdbResult<Credits>;
    /// Related movies. Degrades to an empty set on any failure.
    async fn recommendations(&self, id: &str) -> RecommendationSet;
}

impl TmdbClient {
    /// An empty key is accepted here; requests then fail at the remote
    /// with a non-2xx status, which the normal failure policy handles.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, TMDB_BASE)
    }

    pub fn from_env() -> Result<Self> {
        let api_key = env::var("TMDB_API_KEY").context("TMDB_API_KEY not set")?;
        Self::new(api_key)
    }

    /// Points the client at a different API root, e.g. a local mock
    /// server in tests.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let user_agent = format!("cinescope/{}", env!("CARGO_PKG_VERSION"));
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(30))
            .user_agent(user_agent)
            .build()
            .context("Failed to build TMDB HTTP client")?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            deadline: FETCH_DEADLINE,
        })
    }

    /// Overrides the per-request deadline (tests shrink it instead of
    /// waiting out the real ten seconds).
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl CatalogApi for TmdbClient {
    async fn popular_movies(&self, page: u32) -> Vec<MovieSummary> {
        let params = format!("&page={page}");
        match self
            .get_typed::<MovieList>("/movie/popular", &params, None)
            .await
        {
            Ok(list) => list.results,
            Err(e) => {
                error!("Failed to fetch popular movies (page {page}): {e}");
                Vec::new()
            }
        }
    }

    async fn search_movies(&self, query: &str, page: u32) -> Vec<MovieSummary> {
        let trimmed = query.trim();
        if trimmed.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }
        let params = format!(
            "&query={}&page={page}&include_adult=false",
            urlencoding::encode(trimmed)
        );
        match self
            .get_typed::<MovieList>("/search/movie", &params, Some(self.deadline))
            .await
        {
            Ok(list) => list.results,
            Err(TmdbError::Timeout(_)) => {
                warn!("Timeout searching movies for '{trimmed}'");
                Vec::new()
            }
            Err(e) => {
                warn!("Error searching movies for '{trimmed}': {e}");
                Vec::new()
            }
        }
    }

    async fn movie_details(&self, id: &str) -> TmdbResult<MovieDetails> {
        let path = format!("/movie/{id}");
        self.get_typed(&path, "", Some(self.deadline))
            .await
            .map_err(|e| {
                warn!("Failed to fetch movie details for ID {id}: {e}");
                e
            })
    }

    async fn movie_credits(&self, id: &str) -> TmdbResult<Credits> {
        let path = format!("/movie/{id}/credits");
        self.get_typed(&path, "", Some(self.deadline))
            .await
            .map_err(|e| {
                warn!("Failed to fetch credits for ID {id}: {e}");
                e
            })
    }

    async fn recommendations(&self, id: &str) -> RecommendationSet {
        let path = format!("/movie/{id}/recommendations");
        match self.get_typed(&path, "", Some(self.deadline)).await {
            Ok(set) => set,
            Err(e) => {
                warn!("Failed to fetch recommendations for movie ID {id}: {e}");
                RecommendationSet::default()
            }
        }
    }
}

impl TmdbClient {
    /// One GET round trip: send, status check, JSON parse. The deadline,
    /// when given, covers the whole exchange including the body read; on
    /// expiry the request future is dropped, which aborts the in-flight
    /// connection.
    async fn get_value(
        &self,
        path: &str,
        params: &str,
        deadline: Option<Duration>,
    ) -> TmdbResult<Value> {
        let url = format!("{}{path}?api_key={}{params}", self.base_url, self.api_key);
        debug!("GET {path}");
        let exchange = async {
            let res = self.client.get(&url).send().await?;
            let status = res.status();
            if !status.is_success() {
                return Err(TmdbError::Status {
                    status,
                    path: path.to_string(),
                });
            }
            Ok(res.json::<Value>().await?)
        };
        match deadline {
            Some(limit) => tokio::time::timeout(limit, exchange)
                .await
                .unwrap_or(Err(TmdbError::Timeout(limit))),
            None => exchange.await,
        }
    }

    /// Fetches and decodes into the operation's typed shape. A document
    /// that parses as JSON but does not match the shape is rejected as a
    /// whole.
    async fn get_typed<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &str,
        deadline: Option<Duration>,
    ) -> TmdbResult<T> {
        let value = self.get_value(path, params, deadline).await?;
        serde_json::from_value(value).map_err(TmdbError::InvalidData)
    }
}

#[derive(Debug, Deserialize)]
struct MovieList {
    results: Vec<MovieSummary>,
}

/// Builds a renderable image URL from a TMDB image path such as
/// `/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg`.
pub fn image_url(path: &str) -> String {
    format!("{IMAGE_BASE}{path}")
}
