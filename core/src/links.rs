//! Link operations between spaces.

use serde::Serialize;
use tracing::instrument;

use crate::client::{encode_body, path_segment, SpacesClient};
use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, Transport};
use crate::types::{Link, LinkEnvelope};

pub trait LinkOperations {
    /// `GET /links/{muid}`
    fn get_link(&self, muid: &str) -> Result<Link>;

    /// `POST /links/multiple`. Returns the link echoed by the service.
    fn update_links(&self, links: &[Link]) -> Result<Link>;

    /// Update one link through the bulk endpoint. Requires an owner id.
    fn update_link(&self, link: &Link) -> Result<Link> {
        if link.owner_id.is_none() {
            return Err(ApiError::MissingOwnerId);
        }
        self.update_links(std::slice::from_ref(link))
    }
}

#[derive(Serialize)]
struct LinksRequest<'a> {
    links: &'a [Link],
}

impl<T: Transport> LinkOperations for SpacesClient<T> {
    #[instrument(skip(self))]
    fn get_link(&self, muid: &str) -> Result<Link> {
        let path = format!("/links/{}", path_segment(muid));
        let envelope: LinkEnvelope = self.perform(HttpMethod::Get, &path, None)?;
        Ok(envelope.link)
    }

    #[instrument(skip(self, links), fields(count = links.len()))]
    fn update_links(&self, links: &[Link]) -> Result<Link> {
        let body = encode_body(&LinksRequest { links })?;
        let envelope: LinkEnvelope = self.perform(HttpMethod::Post, "/links/multiple", Some(body))?;
        Ok(envelope.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::test_support::MockTransport;

    const LINK_RESPONSE: &str = r#"{"link":{"muid":"l1","state":"active","owner_id":2,"origin_space_muid":"a","target_space_muid":"b","order":3}}"#;

    fn client(transport: MockTransport) -> SpacesClient<MockTransport> {
        let mut client = SpacesClient::with_transport(transport);
        client.set_app_token("app");
        client.set_user_token("user");
        client.set_environment(Environment::Stage, None);
        client
    }

    #[test]
    fn get_link_unwraps_envelope() {
        let client = client(MockTransport::new().with_json(200, LINK_RESPONSE));
        let link = client.get_link("l1").unwrap();
        assert_eq!(link.origin_space_muid.as_deref(), Some("a"));
        assert_eq!(link.target_space_muid.as_deref(), Some("b"));
        assert_eq!(link.order, Some(3));

        let req = client.transport().last_request().unwrap();
        assert_eq!(req.url, "https://mmx-spaces-api-stage.herokuapp.com/links/l1");
        assert_eq!(req.header("X-User-Token"), Some("user"));
    }

    #[test]
    fn update_links_posts_envelope() {
        let client = client(MockTransport::new().with_json(200, LINK_RESPONSE));
        let links = [
            Link {
                origin_space_muid: Some("a".to_string()),
                target_space_muid: Some("b".to_string()),
                ..Link::default()
            },
            Link {
                origin_space_muid: Some("a".to_string()),
                target_space_muid: Some("c".to_string()),
                order: Some(1),
                ..Link::default()
            },
        ];
        let echoed = client.update_links(&links).unwrap();
        assert_eq!(echoed.muid.as_deref(), Some("l1"));

        let body = client.transport().last_body().unwrap();
        assert_eq!(body["links"].as_array().unwrap().len(), 2);
        assert_eq!(body["links"][1]["target_space_muid"], "c");
    }

    #[test]
    fn update_link_without_owner_fails_locally() {
        let client = client(MockTransport::new());
        let err = client.update_link(&Link::default()).unwrap_err();
        assert!(matches!(err, ApiError::MissingOwnerId));
        assert_eq!(client.transport().calls(), 0);
    }

    #[test]
    fn server_error_is_not_retried() {
        let client = client(MockTransport::new().with_json(502, "bad gateway"));
        let link = Link {
            owner_id: Some(2),
            ..Link::default()
        };
        let err = client.update_link(&link).unwrap_err();
        assert!(err.is_retryable());
        assert_eq!(err.status(), Some(502));
        assert_eq!(client.transport().calls(), 1);
    }
}
