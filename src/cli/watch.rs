use chrono::{DateTime, Local, Utc};
use tracing::debug;

use crate::{
    Error, Res,
    browser::{self, Browser},
    cli::{App, output},
    config, info,
    prompt::{self, Prompter},
    resolver, success,
    trakt::TraktApi,
    types::{HistoryFilter, MediaRef, Rating, SearchKind, WatchRequest, WatchedAt},
    utils, warning,
};

#[derive(Debug, Clone, Default)]
pub struct WatchOptions {
    pub url: Option<String>,
    pub kind: Option<SearchKind>,
    pub at: WatchedAt,
    pub rating: Option<Rating>,
    pub letterboxd: bool,
}

pub async fn watch<A, P, B>(app: &mut App<A, P, B>, opts: &WatchOptions) -> Res<()>
where
    A: TraktApi,
    P: Prompter,
    B: Browser,
{
    let media = resolver::resolve(&app.api, &mut app.prompter, opts.url.as_deref(), opts.kind).await?;
    mark_watched(app, media, opts).await
}

/// Adds `media` to the history, then rates it and shows the history.
///
/// Shared with `progress`, which resolves the episode itself.
pub(crate) async fn mark_watched<A, P, B>(
    app: &mut App<A, P, B>,
    media: MediaRef,
    opts: &WatchOptions,
) -> Res<()>
where
    A: TraktApi,
    P: Prompter,
    B: Browser,
{
    let watched_at = resolve_watched_at(&app.api, &media, opts.at).await?;

    let confirmed = match media {
        MediaRef::Show(_) => app
            .prompter
            .confirm("Really mark entire show as watched?", false)?,
        _ => true,
    };

    if confirmed {
        info!("Adding {} to history", media);
        let request = WatchRequest::new(media.clone(), watched_at);
        let summary = app.api.add_to_history(&request).await?;
        debug!(added = summary.added_total(), "history updated");
        output::print_sync_summary(&summary, false);
        if summary.added_total() > 0 {
            success!("Marked {} as watched", media);
        }
    } else {
        warning!("Not marking {} as watched", media);
    }

    let rating = match opts.rating {
        Some(rating) => Some(rating),
        None if app.prompter.confirm("Set rating?", true)? => {
            Some(prompt::ask_rating(&mut app.prompter)?)
        }
        None => None,
    };
    if let Some(rating) = rating {
        let summary = app.api.rate(&media, rating).await?;
        output::print_sync_summary(&summary, true);
    }

    if opts.letterboxd {
        browser::open_letterboxd(&app.browser, &media);
    }

    let mut history = app
        .api
        .recent_history(config::DEFAULT_HISTORY_LIMIT, HistoryFilter::All)
        .await?;
    utils::sort_history(&mut history);
    output::print_history(&history, false, false);
    Ok(())
}

/// Turns `--at` into the timestamp sent to trakt, `None` meaning now.
async fn resolve_watched_at<A: TraktApi + ?Sized>(
    api: &A,
    media: &MediaRef,
    at: WatchedAt,
) -> Res<Option<DateTime<Utc>>> {
    let resolved = match at {
        WatchedAt::Now => None,
        WatchedAt::At(at) => Some(at),
        WatchedAt::Released => Some(
            api.release_date(media)
                .await?
                .ok_or_else(|| Error::not_found(format!("No release date for {}", media)))?,
        ),
    };

    if let Some(at) = resolved {
        eprintln!(
            "Date: {}",
            at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S")
        );
    }
    Ok(resolved)
}
