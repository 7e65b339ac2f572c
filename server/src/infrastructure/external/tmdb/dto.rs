//! TMDB API Data Transfer Objects
//!
//! Narrowed to the two lookup paths C3 actually performs: IMDB id via
//! `/find`, TMDB id via the typed movie/tv endpoint.

use serde::Deserialize;

/// `/find/{imdb_id}?external_source=imdb_id` response.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbFindResponse {
    pub movie_results: Vec<TmdbMovieResult>,
    pub tv_results: Vec<TmdbTvResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieResult {
    pub title: String,
    pub release_date: Option<String>,
    pub original_language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvResult {
    pub name: String,
    pub first_air_date: Option<String>,
    pub original_language: String,
}

/// `/movie/{id}` response, narrowed to the fields MediaInfo needs.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetailResponse {
    pub title: String,
    pub release_date: Option<String>,
    pub original_language: String,
}

/// `/tv/{id}` response, narrowed to the fields MediaInfo needs.
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbTvDetailResponse {
    pub name: String,
    pub first_air_date: Option<String>,
    pub original_language: String,
}
