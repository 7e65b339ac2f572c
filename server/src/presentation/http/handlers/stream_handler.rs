//! The one HTTP contract this service owns: resolve an external content id
//! into zero or one playable stream.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::ResolveStreamUseCase;
use crate::domain::entities::Stream;
use torrent_identifier::Resolution;

#[derive(Debug, Deserialize)]
pub struct StreamQuery {
    pub api_key: Option<String>,
    /// Comma-separated, most-preferred first, e.g. `2160p,1080p,720p`.
    pub resolution: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StreamResponse {
    pub streams: Vec<Stream>,
}

const DEFAULT_PREFERENCE: [Resolution; 4] = [
    Resolution::FourK,
    Resolution::R1080p,
    Resolution::R720p,
    Resolution::R480p,
];

fn parse_resolution(token: &str) -> Option<Resolution> {
    match token.trim().to_ascii_lowercase().as_str() {
        "4k" | "2160p" => Some(Resolution::FourK),
        "1080p" => Some(Resolution::R1080p),
        "720p" => Some(Resolution::R720p),
        "480p" => Some(Resolution::R480p),
        _ => None,
    }
}

fn resolution_preference(raw: Option<&str>) -> Vec<Resolution> {
    match raw {
        Some(csv) if !csv.is_empty() => {
            let parsed: Vec<Resolution> = csv.split(',').filter_map(parse_resolution).collect();
            if parsed.is_empty() {
                DEFAULT_PREFERENCE.to_vec()
            } else {
                parsed
            }
        }
        _ => DEFAULT_PREFERENCE.to_vec(),
    }
}

/// `GET /stream/:kind/:id.json`
///
/// `kind` ("movie"/"series") is the addon-protocol routing segment; the
/// actual request shape is derived from `id` itself, which already carries
/// season/episode when present. An unparseable `id` is the only case that
/// returns a non-2xx status; a missing or malformed API key returns an
/// empty stream list, per this pipeline's failure semantics.
pub async fn stream_handler(
    State(use_case): State<Arc<ResolveStreamUseCase>>,
    Path((_kind, id)): Path<(String, String)>,
    Query(query): Query<StreamQuery>,
) -> Response {
    let api_key = match query.api_key.filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => return Json(StreamResponse { streams: Vec::new() }).into_response(),
    };

    let preference = resolution_preference(query.resolution.as_deref());
    match use_case.execute(&id, &api_key, &preference).await {
        Ok(streams) => Json(StreamResponse { streams }).into_response(),
        Err(err) => {
            warn!(%err, %id, "unparseable stream identifier");
            (StatusCode::BAD_REQUEST, Json(StreamResponse { streams: Vec::new() })).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_resolution_tokens() {
        assert_eq!(parse_resolution("1080p"), Some(Resolution::R1080p));
        assert_eq!(parse_resolution("4K"), Some(Resolution::FourK));
        assert_eq!(parse_resolution("nonsense"), None);
    }

    #[test]
    fn treats_2160p_and_4k_as_the_same_resolution() {
        assert_eq!(parse_resolution("2160p"), parse_resolution("4k"));
    }

    #[test]
    fn falls_back_to_default_preference_when_unparseable() {
        let preference = resolution_preference(Some("garbage,more-garbage"));
        assert_eq!(preference, DEFAULT_PREFERENCE.to_vec());
    }

    #[test]
    fn missing_resolution_query_uses_default_preference() {
        assert_eq!(resolution_preference(None), DEFAULT_PREFERENCE.to_vec());
    }
}
