//! Read-through, write-invalidate façade over the movie API.
//!
//! # Design
//! Reads consult the shared `RequestCache` first and only go to the network
//! on a miss; a response body that parsed cleanly is stored tagged with the
//! entities it depends on. Writes always go to the network and, on success,
//! invalidate by tag: the collection tag for every write, plus the per-movie
//! tag for updates and deletes. A failed write leaves the cache untouched.
//!
//! No retries happen here; every failure propagates to the caller.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{CacheKey, CacheTag, RequestCache};
use crate::client::{decode_movie, decode_movies, MovieClient, MovieFilter};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};
use crate::types::{Movie, MovieId, MovieInput};

const MOVIES_TAG: &str = "movies";

/// Cached list reads, used to address their cache entries directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadOp {
    AllMovies,
    TrendingMovies,
    TopRatedMovies,
}

impl ReadOp {
    pub fn cache_key(self) -> CacheKey {
        CacheKey::new(self.name())
    }

    fn name(self) -> &'static str {
        match self {
            ReadOp::AllMovies => "all_movies",
            ReadOp::TrendingMovies => "trending_movies",
            ReadOp::TopRatedMovies => "top_rated_movies",
        }
    }

    fn filter(self) -> MovieFilter {
        match self {
            ReadOp::AllMovies => MovieFilter::All,
            ReadOp::TrendingMovies => MovieFilter::Trending,
            ReadOp::TopRatedMovies => MovieFilter::TopRated,
        }
    }
}

fn collection_tag() -> CacheTag {
    CacheTag::new(MOVIES_TAG)
}

fn movie_tag(id: &MovieId) -> CacheTag {
    CacheTag::new(format!("movie:{id}"))
}

fn movie_key(id: &MovieId) -> CacheKey {
    CacheKey::with_args("movie", [id])
}

/// Typed movie operations routed through a shared cache.
pub struct MovieService<T> {
    client: MovieClient,
    transport: T,
    cache: Arc<RequestCache>,
}

impl MovieService<UreqTransport> {
    /// Service talking to the configured API over the network.
    pub fn from_config(config: &ClientConfig, cache: Arc<RequestCache>) -> Self {
        Self::new(
            MovieClient::new(&config.base_url),
            UreqTransport::new(config.timeout),
            cache,
        )
    }
}

impl<T: Transport> MovieService<T> {
    pub fn new(client: MovieClient, transport: T, cache: Arc<RequestCache>) -> Self {
        Self {
            client,
            transport,
            cache,
        }
    }

    pub fn cache(&self) -> &Arc<RequestCache> {
        &self.cache
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cache_key_for(&self, op: ReadOp) -> CacheKey {
        op.cache_key()
    }

    /// Drop one cached read so the next call refetches it.
    pub fn invalidate(&self, key: &CacheKey) -> bool {
        self.cache.invalidate(key)
    }

    pub async fn all_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.movies_for(ReadOp::AllMovies).await
    }

    pub async fn trending_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.movies_for(ReadOp::TrendingMovies).await
    }

    pub async fn top_rated_movies(&self) -> Result<Vec<Movie>, ApiError> {
        self.movies_for(ReadOp::TopRatedMovies).await
    }

    pub async fn movie(&self, id: &MovieId) -> Result<Movie, ApiError> {
        let request = self.client.build_get_movie(id);
        self.read_through(
            movie_key(id),
            vec![movie_tag(id)],
            request,
            MovieClient::parse_get_movie,
            decode_movie,
        )
        .await
    }

    pub async fn add_movie(&self, input: &MovieInput) -> Result<Movie, ApiError> {
        let request = self.client.build_create_movie(input)?;
        let movie = self.client.parse_create_movie(self.transport.execute(request).await?)?;
        self.cache.invalidate_tag(&collection_tag());
        debug!(id = %movie.id, "movie added");
        Ok(movie)
    }

    pub async fn update_movie(&self, id: &MovieId, input: &MovieInput) -> Result<Movie, ApiError> {
        let request = self.client.build_update_movie(id, input)?;
        let movie = self.client.parse_update_movie(self.transport.execute(request).await?)?;
        self.invalidate_movie(id);
        debug!(id = %id, "movie updated");
        Ok(movie)
    }

    pub async fn delete_movie(&self, id: &MovieId) -> Result<(), ApiError> {
        let request = self.client.build_delete_movie(id);
        self.client.parse_delete_movie(self.transport.execute(request).await?)?;
        self.invalidate_movie(id);
        debug!(id = %id, "movie deleted");
        Ok(())
    }

    pub async fn movies_for(&self, op: ReadOp) -> Result<Vec<Movie>, ApiError> {
        let request = self.client.build_list_movies(op.filter());
        self.read_through(
            op.cache_key(),
            vec![collection_tag()],
            request,
            MovieClient::parse_list_movies,
            decode_movies,
        )
        .await
    }

    /// Cached value for `key`, or the parsed value of a fresh response.
    /// A body is stored only after `parse` accepted it, so error statuses
    /// and undecodable payloads are never cached.
    async fn read_through<V>(
        &self,
        key: CacheKey,
        tags: Vec<CacheTag>,
        request: HttpRequest,
        parse: fn(&MovieClient, HttpResponse) -> Result<V, ApiError>,
        decode: fn(&str) -> Result<V, ApiError>,
    ) -> Result<V, ApiError> {
        if let Some(body) = self.cache.get(&key) {
            return decode(&body);
        }
        let response = self.transport.execute(request).await?;
        let body = response.body.clone();
        let value = parse(&self.client, response)?;
        self.cache.set_tagged(key, body, tags);
        Ok(value)
    }

    fn invalidate_movie(&self, id: &MovieId) {
        self.cache.invalidate_tag(&collection_tag());
        self.cache.invalidate_tag(&movie_tag(id));
    }
}
