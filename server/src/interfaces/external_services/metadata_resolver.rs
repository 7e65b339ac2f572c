//! Metadata resolver interface (C3's port).

use async_trait::async_trait;

use crate::domain::entities::{ExternalId, MediaInfo};
use crate::shared::error::ResolverError;
use torrent_identifier::RequestKind;

/// Resolves an external identifier to canonical metadata.
#[async_trait]
pub trait MetadataResolver: Send + Sync {
    /// Resolves `ext_id` to [`MediaInfo`]. `kind_hint` disambiguates a TMDB
    /// id that could be either a movie or a tv show; IMDB ids are
    /// self-describing and ignore the hint.
    async fn resolve(
        &self,
        ext_id: &ExternalId,
        kind_hint: Option<RequestKind>,
    ) -> Result<MediaInfo, ResolverError>;
}
