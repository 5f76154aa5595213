//! Blocking client for the spaces service.
//!
//! # Overview
//! The service stores a content graph: spaces, the media representations
//! attached to them, and links between spaces. `SpacesClient` sends one
//! JSON request at a time and turns the answer into either a domain value or
//! an `ApiError`.
//!
//! # Design
//! - `SpacesClient::perform` is the only path to the network. It enforces the
//!   app token, resolves the base URL, adds auth headers, classifies the
//!   status and decodes the body.
//! - Resource operations are split into three narrow traits
//!   (`SpaceOperations`, `MediaOperations`, `LinkOperations`). `SpacesApi`
//!   requires all three and is implemented for every type that has them.
//! - The network sits behind the `Transport` trait. `UreqTransport` is the
//!   default; tests plug in an in-memory one.
//!
//! ```no_run
//! use spaces_core::{Environment, SpaceOperations, SpacesClient};
//!
//! let mut client = SpacesClient::new();
//! client.set_app_token("app-token");
//! client.set_environment(Environment::Local, None);
//! let space = client.get_space("abc123")?;
//! # Ok::<(), spaces_core::ApiError>(())
//! ```

pub mod client;
pub mod config;
pub mod environment;
pub mod error;
pub mod http;
pub mod links;
pub mod media;
pub mod spaces;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::SpacesClient;
pub use config::ClientConfig;
pub use environment::Environment;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use links::LinkOperations;
pub use media::MediaOperations;
pub use spaces::SpaceOperations;
pub use types::{
    EntityState, Link, LinkEnvelope, LinksEnvelope, Media, MediaEnvelope, MediaListEnvelope,
    MediaType, Space, SpaceEnvelope, SpaceType, SpacesEnvelope,
};

/// Every operation the spaces service offers.
pub trait SpacesApi: SpaceOperations + MediaOperations + LinkOperations {}

impl<T> SpacesApi for T where T: SpaceOperations + MediaOperations + LinkOperations {}
