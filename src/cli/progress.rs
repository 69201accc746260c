use tracing::debug;

use crate::{
    Error, Res,
    browser::Browser,
    cli::{
        App,
        watch::{self, WatchOptions},
    },
    prompt::{self, Prompter},
    trakt::TraktApi,
    types::{HistoryFilter, MediaRef, Rating, WatchedAt},
    utils,
};

#[derive(Debug, Clone)]
pub struct ProgressOptions {
    /// Number of history entries scanned for shows in progress.
    pub limit: u32,
    pub at: WatchedAt,
    pub rating: Option<Rating>,
    pub letterboxd: bool,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        ProgressOptions {
            limit: 50,
            at: WatchedAt::Now,
            rating: None,
            letterboxd: false,
        }
    }
}

pub async fn progress<A, P, B>(app: &mut App<A, P, B>, opts: &ProgressOptions) -> Res<()>
where
    A: TraktApi,
    P: Prompter,
    B: Browser,
{
    let history = app
        .api
        .recent_history(opts.limit, HistoryFilter::Episodes)
        .await?;
    let shows = utils::latest_episode_per_show(&history);
    debug!(shows = shows.len(), "shows in progress");

    let pb = utils::spinner("Looking up next episodes...");
    let mut candidates = Vec::new();
    for last in &shows {
        pb.set_message(format!("Looking up next episode of {}", last.show.title));
        match app.api.next_episode(&last.show).await {
            Ok(Some(next)) => candidates.push(MediaRef::Episode(next)),
            Ok(None) => debug!(show = %last.show.title, "no next episode"),
            Err(e) => {
                pb.finish_and_clear();
                return Err(e);
            }
        }
    }
    pb.finish_and_clear();

    if candidates.is_empty() {
        return Err(Error::not_found("No shows in progress"));
    }

    let question = format!(
        "Pick episode to watch - enter 1-{}, or q to quit, u to show URLs",
        candidates.len()
    );
    let index = prompt::pick_one(&mut app.prompter, &question, candidates.len(), |show_urls| {
        println!("Next episodes:");
        for (i, media) in candidates.iter().enumerate() {
            if show_urls {
                println!("{}: {} | {}", i + 1, media, utils::trakt_url(media));
            } else {
                println!("{}: {}", i + 1, media);
            }
        }
    })?;

    let watch_opts = WatchOptions {
        at: opts.at,
        rating: opts.rating,
        letterboxd: opts.letterboxd,
        ..WatchOptions::default()
    };
    let media = candidates.swap_remove(index);
    watch::mark_watched(app, media, &watch_opts).await
}
