//! Client-side data layer for the movie catalog.
//!
//! # Overview
//! A typed client for the movie REST API, a session-scoped request cache,
//! a read-through movie service, and a fetch controller that exposes
//! `{data, loading, error, refresh}` to views. Page controllers (home feed,
//! admin panel, auth forms) are built on top without any UI framework.
//!
//! # Design
//! - `MovieClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`. I/O lives behind `Transport`.
//! - `RequestCache` is an explicit object shared by `Arc`, never a global.
//!   Writes invalidate by entity tag rather than by reconstructed key.
//! - `FetchHandle` applies only the newest cycle's result and publishes
//!   nothing after teardown.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod admin;
pub mod auth;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod home;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use admin::{AdminError, AdminPanel};
pub use cache::{CacheKey, CacheTag, RequestCache};
pub use client::{MovieClient, MovieFilter};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, ValidationError};
pub use fetch::{FetchHandle, FetchPhase, FetchState};
pub use forms::MovieForm;
pub use home::{Carousel, CarouselLayout, HomeFeed, HomeStatus};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{MovieService, ReadOp};
pub use transport::{Transport, UreqTransport};
pub use types::{Movie, MovieId, MovieInput};
