use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

pub const APP_TOKEN_HEADER: &str = "x-app-token";

/// A stored entity. Only `muid` is interpreted; every other field is kept
/// as sent and merged on update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muid: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Default)]
pub struct Store {
    pub spaces: HashMap<String, Entity>,
    pub media: HashMap<String, Entity>,
    pub links: HashMap<String, Entity>,
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Serialize, Deserialize)]
pub struct SpaceEnvelope {
    pub space: Entity,
}

#[derive(Serialize, Deserialize)]
pub struct SpacesEnvelope {
    pub spaces: Vec<Entity>,
}

#[derive(Serialize, Deserialize)]
pub struct MediaEnvelope {
    pub media: Entity,
}

#[derive(Serialize, Deserialize)]
pub struct MediaListEnvelope {
    pub media: Vec<Entity>,
}

#[derive(Serialize, Deserialize)]
pub struct LinkEnvelope {
    pub link: Entity,
}

#[derive(Serialize, Deserialize)]
pub struct LinksEnvelope {
    pub links: Vec<Entity>,
}

pub fn app() -> Router {
    app_with_store(Store::default())
}

/// Router serving a pre-populated store.
pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/spaces/multiple", post(update_spaces))
        .route("/spaces/{muid}", get(get_space))
        .route("/media/multiple", post(update_media))
        .route("/media/{muid}", get(get_media))
        .route("/links/multiple", post(update_links))
        .route("/links/{muid}", get(get_link))
        .layer(middleware::from_fn(require_app_token))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock spaces service listening");
    }
    axum::serve(listener, app()).await
}

async fn require_app_token(request: Request, next: Next) -> Result<Response, StatusCode> {
    match request.headers().get(APP_TOKEN_HEADER) {
        Some(token) if !token.is_empty() => Ok(next.run(request).await),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Insert or merge `items` into `table`, returning the last stored entity.
fn upsert(table: &mut HashMap<String, Entity>, items: Vec<Entity>) -> Option<Entity> {
    let mut last = None;
    for item in items {
        let muid = item
            .muid
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().simple().to_string());
        let stored = table.entry(muid.clone()).or_insert_with(|| Entity {
            muid: Some(muid.clone()),
            fields: Map::new(),
        });
        stored.fields.extend(item.fields);
        debug!(%muid, "entity stored");
        last = Some(stored.clone());
    }
    last
}

async fn get_space(
    State(db): State<Db>,
    Path(muid): Path<String>,
) -> Result<Json<SpaceEnvelope>, StatusCode> {
    let store = db.read().await;
    let space = store.spaces.get(&muid).cloned().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(SpaceEnvelope { space }))
}

async fn update_spaces(
    State(db): State<Db>,
    Json(input): Json<SpacesEnvelope>,
) -> Result<Json<SpaceEnvelope>, StatusCode> {
    let mut store = db.write().await;
    let space = upsert(&mut store.spaces, input.spaces).ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(SpaceEnvelope { space }))
}

async fn get_media(
    State(db): State<Db>,
    Path(muid): Path<String>,
) -> Result<Json<MediaEnvelope>, StatusCode> {
    let store = db.read().await;
    let media = store.media.get(&muid).cloned().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(MediaEnvelope { media }))
}

async fn update_media(
    State(db): State<Db>,
    Json(input): Json<MediaListEnvelope>,
) -> Result<Json<MediaEnvelope>, StatusCode> {
    let mut store = db.write().await;
    let media = upsert(&mut store.media, input.media).ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(MediaEnvelope { media }))
}

async fn get_link(
    State(db): State<Db>,
    Path(muid): Path<String>,
) -> Result<Json<LinkEnvelope>, StatusCode> {
    let store = db.read().await;
    let link = store.links.get(&muid).cloned().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(LinkEnvelope { link }))
}

async fn update_links(
    State(db): State<Db>,
    Json(input): Json<LinksEnvelope>,
) -> Result<Json<LinkEnvelope>, StatusCode> {
    let mut store = db.write().await;
    let link = upsert(&mut store.links, input.links).ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(LinkEnvelope { link }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity(value: Value) -> Entity {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn entity_keeps_unknown_fields() {
        let e = entity(json!({"muid": "a", "state": "active", "tag_label": "x"}));
        assert_eq!(e.muid.as_deref(), Some("a"));
        assert_eq!(e.fields["tag_label"], "x");

        let back = serde_json::to_value(&e).unwrap();
        assert_eq!(back, json!({"muid": "a", "state": "active", "tag_label": "x"}));
    }

    #[test]
    fn upsert_assigns_muid_when_missing() {
        let mut table = HashMap::new();
        let stored = upsert(&mut table, vec![entity(json!({"state": "active"}))]).unwrap();
        let muid = stored.muid.unwrap();
        assert_eq!(muid.len(), 32);
        assert!(table.contains_key(&muid));
    }

    #[test]
    fn upsert_merges_into_existing_entity() {
        let mut table = HashMap::new();
        upsert(
            &mut table,
            vec![entity(json!({"muid": "a", "state": "active", "tag_label": "old"}))],
        );
        let merged = upsert(
            &mut table,
            vec![entity(json!({"muid": "a", "tag_label": "new"}))],
        )
        .unwrap();
        assert_eq!(merged.fields["state"], "active");
        assert_eq!(merged.fields["tag_label"], "new");
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn upsert_returns_last_item() {
        let mut table = HashMap::new();
        let last = upsert(
            &mut table,
            vec![entity(json!({"muid": "a"})), entity(json!({"muid": "b"}))],
        )
        .unwrap();
        assert_eq!(last.muid.as_deref(), Some("b"));
        assert!(upsert(&mut table, Vec::new()).is_none());
    }
}
