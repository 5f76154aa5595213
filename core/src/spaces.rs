//! Space operations: fetch one space, update spaces in bulk or one at a time.

use serde::Serialize;
use tracing::{debug, instrument};

use crate::client::{encode_body, path_segment, SpacesClient};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, Transport};
use crate::types::{Space, SpaceEnvelope};

pub trait SpaceOperations {
    /// `GET /spaces/{muid}`, with representations.
    fn get_space(&self, muid: &str) -> Result<Space>;

    /// `POST /spaces/multiple`. Returns the space echoed by the service.
    fn update_spaces(&self, spaces: &[Space]) -> Result<Space>;

    /// Update a single space through the bulk endpoint.
    ///
    /// The space must carry an owner id; without one this fails with
    /// `MissingOwnerId` and nothing is sent.
    fn update_space(&self, space: &Space) -> Result<Space> {
        if space.owner_id.is_none() {
            return Err(ApiError::MissingOwnerId);
        }
        self.update_spaces(std::slice::from_ref(space))
    }
}

#[derive(Serialize)]
struct SpacesRequest<'a> {
    spaces: &'a [Space],
}

impl<T: Transport> SpaceOperations for SpacesClient<T> {
    #[instrument(skip(self))]
    fn get_space(&self, muid: &str) -> Result<Space> {
        let path = format!("/spaces/{}", path_segment(muid));
        let envelope: SpaceEnvelope = self.perform(HttpMethod::Get, &path, None)?;
        Ok(envelope.space)
    }

    #[instrument(skip(self, spaces), fields(count = spaces.len()))]
    fn update_spaces(&self, spaces: &[Space]) -> Result<Space> {
        let body = encode_body(&SpacesRequest { spaces })?;
        let envelope: SpaceEnvelope =
            self.perform(HttpMethod::Post, "/spaces/multiple", Some(body))?;
        debug!(muid = ?envelope.space.muid, "spaces updated");
        Ok(envelope.space)
    }
}
