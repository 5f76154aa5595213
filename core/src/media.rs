//! Media operations, shaped like the space operations.

use serde::Serialize;
use tracing::instrument;

use crate::client::{encode_body, path_segment, SpacesClient};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, Transport};
use crate::types::{Media, MediaEnvelope};

pub trait MediaOperations {
    /// `GET /media/{muid}`
    fn get_media(&self, muid: &str) -> Result<Media>;

    /// `POST /media/multiple`. Returns the media echoed by the service.
    fn update_media_multiple(&self, media: &[Media]) -> Result<Media>;

    /// Update one media through the bulk endpoint. Requires an owner id.
    fn update_media(&self, media: &Media) -> Result<Media> {
        if media.owner_id.is_none() {
            return Err(ApiError::MissingOwnerId);
        }
        self.update_media_multiple(std::slice::from_ref(media))
    }
}

#[derive(Serialize)]
struct MediaRequest<'a> {
    media: &'a [Media],
}

impl<T: Transport> MediaOperations for SpacesClient<T> {
    #[instrument(skip(self))]
    fn get_media(&self, muid: &str) -> Result<Media> {
        let path = format!("/media/{}", path_segment(muid));
        let envelope: MediaEnvelope = self.perform(HttpMethod::Get, &path, None)?;
        Ok(envelope.media)
    }

    #[instrument(skip(self, media), fields(count = media.len()))]
    fn update_media_multiple(&self, media: &[Media]) -> Result<Media> {
        let body = encode_body(&MediaRequest { media })?;
        let envelope: MediaEnvelope = self.perform(HttpMethod::Post, "/media/multiple", Some(body))?;
        Ok(envelope.media)
    }
}
