use chrono::Local;

use crate::{
    Error, Res,
    cli::{App, output},
    config, info,
    prompt::{self, Prompter},
    success,
    trakt::TraktApi,
    types::HistoryFilter,
    utils,
};

#[derive(Debug, Clone)]
pub struct UnwatchOptions {
    pub limit: u32,
    /// Pick from a list instead of taking the newest entry.
    pub interactive: bool,
    /// Skip the confirmation.
    pub yes: bool,
}

impl Default for UnwatchOptions {
    fn default() -> Self {
        UnwatchOptions {
            limit: config::DEFAULT_HISTORY_LIMIT,
            interactive: true,
            yes: false,
        }
    }
}

pub async fn unwatch<A, P, B>(app: &mut App<A, P, B>, opts: &UnwatchOptions) -> Res<()>
where
    A: TraktApi,
    P: Prompter,
{
    let mut history = app
        .api
        .recent_history(opts.limit, HistoryFilter::All)
        .await?;
    if history.is_empty() {
        return Err(Error::not_found("No history entries"));
    }
    utils::sort_history(&mut history);

    let index = if opts.interactive {
        let question = format!(
            "Pick item to remove - enter 1-{}, or q to quit, u to show URLs",
            history.len()
        );
        prompt::pick_one(&mut app.prompter, &question, history.len(), |show_urls| {
            output::print_history(&history, true, show_urls);
        })?
    } else {
        0
    };

    let entry = &history[index];
    info!(
        "Removing {}",
        utils::format_history_entry(entry, &Local, true, false)
    );

    if !opts.yes && !app.prompter.confirm("Remove from history?", true)? {
        return Err(Error::Cancelled);
    }

    let summary = app.api.remove_from_history(entry.id).await?;
    output::print_sync_summary(&summary, false);
    if summary.deleted_total() > 0 {
        success!("Removed {} from history", entry.media);
    }

    let mut refreshed = app
        .api
        .recent_history(opts.limit, HistoryFilter::All)
        .await?;
    utils::sort_history(&mut refreshed);
    output::print_history(&refreshed, false, false);
    Ok(())
}
