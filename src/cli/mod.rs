//! # CLI Module
//!
//! Command handlers behind each subcommand. Every handler composes the
//! [`resolver`](crate::resolver) and the [`TraktApi`](crate::trakt::TraktApi)
//! and prints human-readable output. Prompts, requests and the browser come
//! in through [`App`].
//!
//! ## Commands
//!
//! - [`watch`] - Mark a movie, show or episode as watched, optionally rate it
//! - [`rate`] - Rate a movie, show or episode
//! - [`unwatch`] - Remove an entry from the recent history
//! - [`recent`] - Print the recent history
//! - [`progress`] - Pick the next episode of a recently watched show and watch it
//!
//! ## Usage Patterns
//!
//! ```bash
//! trakt-watch watch --url https://trakt.tv/movies/killers-of-the-flower-moon-2023 --at '10m ago'
//! trakt-watch rate --rating 8
//! trakt-watch recent 20 --type episodes
//! trakt-watch unwatch
//! trakt-watch progress
//! ```

mod output;
mod progress;
mod rate;
mod recent;
mod unwatch;
mod watch;

pub use output::print_history;
pub use output::print_sync_summary;
pub use progress::ProgressOptions;
pub use progress::progress;
pub use rate::RateOptions;
pub use rate::rate;
pub use recent::RecentOptions;
pub use recent::recent;
pub use unwatch::UnwatchOptions;
pub use unwatch::unwatch;
pub use watch::WatchOptions;
pub use watch::watch;

/// Collaborators shared by the handlers.
pub struct App<A, P, B> {
    pub api: A,
    pub prompter: P,
    pub browser: B,
}

impl<A, P, B> App<A, P, B> {
    pub fn new(api: A, prompter: P, browser: B) -> Self {
        App {
            api,
            prompter,
            browser,
        }
    }
}
