//! Entity wire shapes and the envelopes that wrap them.
//!
//! # Design
//! Every optional field is an `Option` that is skipped when `None`, so absent
//! fields never reach the wire as `null`. Request and response bodies are
//! always wrapped in a single named key (`{"space": ...}`, `{"spaces": [...]}`);
//! the envelope structs below are that contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state shared by all entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityState {
    #[default]
    Active,
    Removed,
}

/// Semantic type of a space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpaceType {
    /// Starting point space for a user.
    #[serde(rename = "com.memex.origin")]
    Origin,
    #[serde(rename = "com.memex.media.text")]
    Text,
    #[serde(rename = "com.memex.media.webpage")]
    WebPage,
    /// Image or diagram.
    #[serde(rename = "com.memex.media.image")]
    Image,
    /// Ordered set of links to other spaces.
    #[serde(rename = "com.memex.media.collection")]
    Collection,
}

/// Kind of content held by a media representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MediaType {
    #[serde(rename = "com.memex.media.text")]
    Text,
    #[serde(rename = "com.memex.media.webpage")]
    WebPage,
    #[serde(rename = "com.memex.media.image")]
    Image,
    #[serde(rename = "com.memex.media.collection")]
    Collection,
    #[serde(rename = "com.memex.media.json")]
    Json,
}

/// A node of the content graph: folder, note, web page, anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Space {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visited_at: Option<DateTime<Utc>>,
    pub state: EntityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(rename = "tag_label", default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(rename = "tag_color", default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub type_identifier: SpaceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub representations: Option<Vec<Media>>,
}

impl Space {
    /// A new active space of `type_identifier` with every optional field unset.
    pub fn new(type_identifier: SpaceType) -> Self {
        Self {
            muid: None,
            created_at: None,
            updated_at: None,
            visited_at: None,
            state: EntityState::Active,
            owner_id: None,
            caption: None,
            color: None,
            type_identifier,
            representations: None,
        }
    }

    /// First representation of `media_type`, in collection order.
    pub fn representation_with_type(&self, media_type: MediaType) -> Option<&Media> {
        self.representations
            .as_deref()?
            .iter()
            .find(|media| media.media_type == media_type)
    }
}

/// A concrete representation of a space's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub state: EntityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    pub media_type: MediaType,
    /// Inline payload, itself a JSON document encoded as a string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_url: Option<String>,
}

impl Media {
    pub fn new(media_type: MediaType) -> Self {
        Self {
            muid: None,
            created_at: None,
            updated_at: None,
            state: EntityState::Active,
            owner_id: None,
            media_type,
            data_json: None,
            data_url: None,
        }
    }
}

/// A directed, ordered edge between two spaces.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Link {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    pub state: EntityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_identifier: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_space_muid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_space_muid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// `{"space": Space}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceEnvelope {
    pub space: Space,
}

/// `{"spaces": [Space, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpacesEnvelope {
    pub spaces: Vec<Space>,
}

/// `{"media": Media}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaEnvelope {
    pub media: Media,
}

/// `{"media": [Media, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaListEnvelope {
    pub media: Vec<Media>,
}

/// `{"link": Link}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkEnvelope {
    pub link: Link,
}

/// `{"links": [Link, ...]}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinksEnvelope {
    pub links: Vec<Link>,
}
