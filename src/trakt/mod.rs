//! # trakt.tv Integration Module
//!
//! Thin client for the trakt API endpoints this tool needs. Every request is
//! authenticated with the session read at startup, sends the
//! `trakt-api-version` and `trakt-api-key` headers, and is awaited before the
//! next one starts.
//!
//! ## API Coverage
//!
//! - `GET /search/{type}` - text search
//! - `GET /movies/{id}`, `GET /shows/{id}`,
//!   `GET /shows/{id}/seasons/{s}/episodes/{n}` - summaries and release dates
//! - `GET /shows/{id}/progress/watched` - next episode
//! - `GET /users/{username}/history` - recent history
//! - `POST /sync/history`, `POST /sync/history/remove` - add and remove plays
//! - `POST /sync/ratings` - ratings
//!
//! ## Error Types
//!
//! 401/403 map to [`Error::Auth`](crate::Error::Auth), 404 to
//! [`Error::NotFound`](crate::Error::NotFound), anything else that fails to
//! [`Error::Transport`](crate::Error::Transport) or
//! [`Error::Status`](crate::Error::Status).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    Res,
    types::{
        Episode, HistoryEntry, HistoryFilter, MediaRef, MediaTarget, Rating, SearchKind,
        SearchResult, Show, SyncSummary, WatchRequest,
    },
};

mod client;
pub mod history;
pub mod models;
pub mod search;
pub mod shows;
pub mod sync;

pub use client::TraktClient;

/// The operations command handlers need from trakt.
///
/// Futures are not `Send`: the tool runs on a current-thread runtime and
/// issues one request at a time.
#[async_trait(?Send)]
pub trait TraktApi {
    async fn search(&self, query: &str, kind: SearchKind) -> Res<Vec<SearchResult>>;

    async fn lookup(&self, target: &MediaTarget) -> Res<MediaRef>;

    async fn release_date(&self, media: &MediaRef) -> Res<Option<DateTime<Utc>>>;

    async fn add_to_history(&self, request: &WatchRequest) -> Res<SyncSummary>;

    async fn rate(&self, media: &MediaRef, rating: Rating) -> Res<SyncSummary>;

    async fn remove_from_history(&self, history_id: u64) -> Res<SyncSummary>;

    /// Most recent first.
    async fn recent_history(&self, limit: u32, filter: HistoryFilter) -> Res<Vec<HistoryEntry>>;

    async fn next_episode(&self, show: &Show) -> Res<Option<Episode>>;
}

#[async_trait(?Send)]
impl TraktApi for TraktClient {
    async fn search(&self, query: &str, kind: SearchKind) -> Res<Vec<SearchResult>> {
        search::search(self, query, kind).await
    }

    async fn lookup(&self, target: &MediaTarget) -> Res<MediaRef> {
        shows::lookup(self, target).await
    }

    async fn release_date(&self, media: &MediaRef) -> Res<Option<DateTime<Utc>>> {
        shows::release_date(self, media).await
    }

    async fn add_to_history(&self, request: &WatchRequest) -> Res<SyncSummary> {
        sync::add_to_history(self, request).await
    }

    async fn rate(&self, media: &MediaRef, rating: Rating) -> Res<SyncSummary> {
        sync::rate(self, media, rating).await
    }

    async fn remove_from_history(&self, history_id: u64) -> Res<SyncSummary> {
        sync::remove_from_history(self, history_id).await
    }

    async fn recent_history(&self, limit: u32, filter: HistoryFilter) -> Res<Vec<HistoryEntry>> {
        history::recent_history(self, limit, filter).await
    }

    async fn next_episode(&self, show: &Show) -> Res<Option<Episode>> {
        shows::next_episode(self, show).await
    }
}
