use crate::{
    Res,
    trakt::{TraktClient, models::TraktSearchItem},
    types::{SearchKind, SearchResult},
};

const SEARCH_LIMIT: u32 = 20;

/// Runs a text search against `/search/{types}`.
///
/// Results keep the order trakt returned them in; people and other
/// unsupported result types are dropped before ranks are assigned.
pub async fn search(
    client: &TraktClient,
    query: &str,
    kind: SearchKind,
) -> Res<Vec<SearchResult>> {
    let path = format!("search/{}", kind.search_types());
    let items: Vec<TraktSearchItem> = client
        .get(
            &path,
            &[
                ("query", query.to_string()),
                ("limit", SEARCH_LIMIT.to_string()),
            ],
        )
        .await?;

    Ok(search_results(items))
}

pub fn search_results(items: Vec<TraktSearchItem>) -> Vec<SearchResult> {
    items
        .into_iter()
        .filter_map(TraktSearchItem::into_media)
        .enumerate()
        .map(|(i, media)| SearchResult { rank: i + 1, media })
        .collect()
}
