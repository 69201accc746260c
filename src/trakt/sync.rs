use chrono::SecondsFormat;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::{
    Res,
    trakt::TraktClient,
    types::{MediaRef, Rating, SyncSummary, WatchRequest},
};

/// Wraps a single item into `{"movies"|"shows"|"episodes": [item]}`.
fn single_item_body(media: &MediaRef, mut item: Map<String, Value>) -> Value {
    item.insert("ids".to_string(), json!({ "trakt": media.ids().trakt }));
    let mut body = Map::new();
    body.insert(
        media.kind().bucket().to_string(),
        Value::Array(vec![Value::Object(item)]),
    );
    Value::Object(body)
}

pub fn history_body(request: &WatchRequest) -> Value {
    let mut item = Map::new();
    if let Some(at) = request.watched_at {
        item.insert(
            "watched_at".to_string(),
            json!(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
    }
    single_item_body(&request.media, item)
}

pub fn rating_body(media: &MediaRef, rating: Rating) -> Value {
    let mut item = Map::new();
    item.insert("rating".to_string(), json!(rating.get()));
    single_item_body(media, item)
}

pub async fn add_to_history(client: &TraktClient, request: &WatchRequest) -> Res<SyncSummary> {
    debug!(media = %request.media, watched_at = ?request.watched_at, "adding to history");
    client.post("sync/history", &history_body(request)).await
}

pub async fn rate(client: &TraktClient, media: &MediaRef, rating: Rating) -> Res<SyncSummary> {
    debug!(%media, %rating, "rating");
    client.post("sync/ratings", &rating_body(media, rating)).await
}

pub async fn remove_from_history(client: &TraktClient, history_id: u64) -> Res<SyncSummary> {
    debug!(history_id, "removing from history");
    client
        .post("sync/history/remove", &json!({ "ids": [history_id] }))
        .await
}
