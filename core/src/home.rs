//! Home page feed: three movie carousels fetched independently and folded
//! into one status.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::fetch::{FetchHandle, FetchPhase};
use crate::service::{MovieService, ReadOp};
use crate::transport::Transport;
use crate::types::Movie;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselLayout {
    /// Uses `poster_url` artwork.
    Landscape,
    /// Uses `backdrop_url` artwork.
    Portrait,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Carousel {
    pub title: &'static str,
    pub layout: CarouselLayout,
    pub movies: Vec<Movie>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum HomeStatus {
    Loading,
    /// Error messages of every failed carousel, joined with ", ".
    Failed(String),
    Ready(Vec<Carousel>),
}

struct Section {
    title: &'static str,
    layout: CarouselLayout,
    handle: FetchHandle<Vec<Movie>>,
}

pub struct HomeFeed {
    sections: Vec<Section>,
}

impl HomeFeed {
    pub fn new<T: Transport + 'static>(service: Arc<MovieService<T>>) -> Self {
        let sections = vec![
            Section {
                title: "Continue Watching",
                layout: CarouselLayout::Landscape,
                handle: bind(&service, ReadOp::AllMovies),
            },
            Section {
                title: "Top Rated Today",
                layout: CarouselLayout::Portrait,
                handle: bind(&service, ReadOp::TopRatedMovies),
            },
            Section {
                title: "Trending",
                layout: CarouselLayout::Portrait,
                handle: bind(&service, ReadOp::TrendingMovies),
            },
        ];
        Self { sections }
    }

    pub fn activate(&self) -> Vec<JoinHandle<()>> {
        self.sections.iter().filter_map(|s| s.handle.activate()).collect()
    }

    /// Refetch every carousel.
    pub fn retry(&self) -> Vec<JoinHandle<()>> {
        self.sections.iter().filter_map(|s| s.handle.refresh()).collect()
    }

    pub fn deactivate(&self) {
        for section in &self.sections {
            section.handle.deactivate();
        }
    }

    /// Loading while any carousel has not settled; otherwise failed if any
    /// carousel failed; otherwise ready.
    pub fn status(&self) -> HomeStatus {
        let states: Vec<_> = self.sections.iter().map(|s| s.handle.state()).collect();

        if states
            .iter()
            .any(|s| matches!(s.phase(), FetchPhase::Idle | FetchPhase::Loading))
        {
            return HomeStatus::Loading;
        }

        let errors: Vec<&str> = states.iter().filter_map(|s| s.error.as_deref()).collect();
        if !errors.is_empty() {
            return HomeStatus::Failed(errors.join(", "));
        }

        let carousels = self
            .sections
            .iter()
            .zip(states)
            .map(|(section, state)| Carousel {
                title: section.title,
                layout: section.layout,
                movies: state.data.unwrap_or_default(),
            })
            .collect();
        HomeStatus::Ready(carousels)
    }
}

fn bind<T: Transport + 'static>(
    service: &Arc<MovieService<T>>,
    op: ReadOp,
) -> FetchHandle<Vec<Movie>> {
    let service = service.clone();
    FetchHandle::new(move || {
        let service = service.clone();
        async move { service.movies_for(op).await }
    })
}
