use crate::{
    Res,
    trakt::{TraktClient, models::TraktHistoryItem},
    types::{HistoryEntry, HistoryFilter},
    utils,
};

/// Fetches the first page of the user's watch history, newest first.
pub async fn recent_history(
    client: &TraktClient,
    limit: u32,
    filter: HistoryFilter,
) -> Res<Vec<HistoryEntry>> {
    let mut path = format!("users/{}/history", urlencoding::encode(client.username()));
    if let Some(segment) = filter.path_segment() {
        path.push('/');
        path.push_str(segment);
    }

    let items: Vec<TraktHistoryItem> = client
        .get(
            &path,
            &[("page", "1".to_string()), ("limit", limit.to_string())],
        )
        .await?;

    let mut entries: Vec<HistoryEntry> = items
        .into_iter()
        .filter_map(TraktHistoryItem::into_entry)
        .collect();
    utils::sort_history(&mut entries);
    Ok(entries)
}
