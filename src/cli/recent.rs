use crate::{
    Res,
    cli::output,
    config,
    trakt::TraktApi,
    types::{HistoryEntry, HistoryFilter},
    utils,
};

#[derive(Debug, Clone)]
pub struct RecentOptions {
    pub limit: u32,
    pub filter: HistoryFilter,
    pub urls: bool,
}

impl Default for RecentOptions {
    fn default() -> Self {
        RecentOptions {
            limit: config::DEFAULT_HISTORY_LIMIT,
            filter: HistoryFilter::All,
            urls: false,
        }
    }
}

/// Prints the recent history, newest first, and returns what was printed.
pub async fn recent<A: TraktApi + ?Sized>(
    api: &A,
    opts: &RecentOptions,
) -> Res<Vec<HistoryEntry>> {
    let mut entries = api.recent_history(opts.limit, opts.filter).await?;
    utils::sort_history(&mut entries);
    output::print_history(&entries, false, opts.urls);
    Ok(entries)
}
