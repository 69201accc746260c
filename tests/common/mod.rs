#![allow(dead_code)]

use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
    io,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use trakt_watch::{
    Error, Res,
    browser::Browser,
    prompt::Prompter,
    trakt::TraktApi,
    types::{
        Episode, HistoryEntry, HistoryFilter, Ids, MediaKind, MediaRef, MediaTarget, Movie,
        Rating, SearchKind, SearchResult, Show, SyncCounts, SyncSummary, WatchRequest,
    },
};

pub fn ids(trakt: u64, slug: &str) -> Ids {
    Ids {
        trakt,
        slug: Some(slug.to_string()),
        ..Ids::default()
    }
}

pub fn movie(trakt: u64, slug: &str, title: &str, year: u32, tmdb: Option<u64>) -> MediaRef {
    let mut ids = ids(trakt, slug);
    ids.tmdb = tmdb;
    MediaRef::Movie(Movie {
        title: title.to_string(),
        year: Some(year),
        ids,
    })
}

pub fn show(trakt: u64, slug: &str, title: &str, year: u32) -> Show {
    Show {
        title: title.to_string(),
        year: Some(year),
        ids: ids(trakt, slug),
    }
}

pub fn episode(show: &Show, trakt: u64, season: u32, number: u32, title: &str) -> Episode {
    Episode {
        show: show.clone(),
        season,
        number,
        title: Some(title.to_string()),
        ids: Ids {
            trakt,
            ..Ids::default()
        },
    }
}

pub fn at(timestamp: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(timestamp)
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub fn entry(id: u64, watched_at: &str, media: MediaRef) -> HistoryEntry {
    HistoryEntry {
        id,
        watched_at: at(watched_at),
        action: "watch".to_string(),
        media,
    }
}

pub fn results(media: Vec<MediaRef>) -> Vec<SearchResult> {
    media
        .into_iter()
        .enumerate()
        .map(|(i, media)| SearchResult {
            rank: i + 1,
            media,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(String, SearchKind),
    Lookup(MediaTarget),
    ReleaseDate(u64),
    AddToHistory(WatchRequest),
    Rate(u64, Rating),
    Remove(u64),
    RecentHistory(u32, HistoryFilter),
    NextEpisode(u64),
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    /// Items returned by `lookup`.
    pub catalog: Vec<MediaRef>,
    pub search_results: Vec<SearchResult>,
    pub history: Vec<HistoryEntry>,
    /// Next episode per show trakt id.
    pub next_episodes: HashMap<u64, Episode>,
    /// Release date per item trakt id.
    pub release_dates: HashMap<u64, DateTime<Utc>>,
    pub next_history_id: u64,
}

/// In-memory trakt account.
#[derive(Debug, Default)]
pub struct FakeTrakt {
    pub state: RefCell<FakeState>,
}

impl FakeTrakt {
    pub fn new() -> Self {
        let fake = FakeTrakt::default();
        fake.state.borrow_mut().next_history_id = 1000;
        fake
    }

    pub fn with_catalog(self, catalog: Vec<MediaRef>) -> Self {
        self.state.borrow_mut().catalog = catalog;
        self
    }

    pub fn with_search_results(self, results: Vec<SearchResult>) -> Self {
        self.state.borrow_mut().search_results = results;
        self
    }

    pub fn with_history(self, history: Vec<HistoryEntry>) -> Self {
        self.state.borrow_mut().history = history;
        self
    }

    pub fn with_next_episode(self, episode: Episode) -> Self {
        self.state
            .borrow_mut()
            .next_episodes
            .insert(episode.show.ids.trakt, episode);
        self
    }

    pub fn with_release_date(self, trakt: u64, date: DateTime<Utc>) -> Self {
        self.state.borrow_mut().release_dates.insert(trakt, date);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn removals(&self) -> Vec<u64> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Remove(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn additions(&self) -> Vec<WatchRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddToHistory(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.state.borrow_mut().calls.push(call);
    }
}

fn counts_for(kind: MediaKind) -> SyncCounts {
    let mut counts = SyncCounts::default();
    match kind {
        MediaKind::Movie => counts.movies = 1,
        MediaKind::Show => counts.shows = 1,
        MediaKind::Episode => counts.episodes = 1,
    }
    counts
}

/// Whether `key` is the slug or the numeric trakt id.
fn key_matches(ids: &Ids, key: &str) -> bool {
    ids.slug.as_deref() == Some(key) || ids.trakt.to_string() == key
}

fn target_matches(target: &MediaTarget, media: &MediaRef) -> bool {
    match (target, media) {
        (MediaTarget::Movie { id }, MediaRef::Movie(m)) => key_matches(&m.ids, id),
        (MediaTarget::Show { id }, MediaRef::Show(s)) => key_matches(&s.ids, id),
        (
            MediaTarget::Episode {
                show,
                season,
                episode,
            },
            MediaRef::Episode(e),
        ) => key_matches(&e.show.ids, show) && e.season == *season && e.number == *episode,
        _ => false,
    }
}

#[async_trait(?Send)]
impl TraktApi for FakeTrakt {
    async fn search(&self, query: &str, kind: SearchKind) -> Res<Vec<SearchResult>> {
        self.record(Call::Search(query.to_string(), kind));
        Ok(self.state.borrow().search_results.clone())
    }

    async fn lookup(&self, target: &MediaTarget) -> Res<MediaRef> {
        self.record(Call::Lookup(target.clone()));
        self.state
            .borrow()
            .catalog
            .iter()
            .find(|media| target_matches(target, media))
            .cloned()
            .ok_or_else(|| Error::not_found(format!("{:?}", target)))
    }

    async fn release_date(&self, media: &MediaRef) -> Res<Option<DateTime<Utc>>> {
        let trakt = media.ids().trakt;
        self.record(Call::ReleaseDate(trakt));
        Ok(self.state.borrow().release_dates.get(&trakt).copied())
    }

    async fn add_to_history(&self, request: &WatchRequest) -> Res<SyncSummary> {
        self.record(Call::AddToHistory(request.clone()));
        let mut state = self.state.borrow_mut();
        let watched_at = request.watched_at.unwrap_or_else(Utc::now);
        let id = state.next_history_id;
        state.next_history_id += 1;
        state.history.push(HistoryEntry {
            id,
            watched_at,
            action: "watch".to_string(),
            media: request.media.clone(),
        });
        Ok(SyncSummary {
            added: Some(counts_for(request.media.kind())),
            ..SyncSummary::default()
        })
    }

    async fn rate(&self, media: &MediaRef, rating: Rating) -> Res<SyncSummary> {
        self.record(Call::Rate(media.ids().trakt, rating));
        Ok(SyncSummary {
            added: Some(counts_for(media.kind())),
            ..SyncSummary::default()
        })
    }

    async fn remove_from_history(&self, history_id: u64) -> Res<SyncSummary> {
        self.record(Call::Remove(history_id));
        let mut state = self.state.borrow_mut();
        let position = state
            .history
            .iter()
            .position(|entry| entry.id == history_id)
            .ok_or_else(|| Error::not_found(format!("history id {}", history_id)))?;
        let removed = state.history.remove(position);
        Ok(SyncSummary {
            deleted: Some(counts_for(removed.media.kind())),
            ..SyncSummary::default()
        })
    }

    async fn recent_history(&self, limit: u32, filter: HistoryFilter) -> Res<Vec<HistoryEntry>> {
        self.record(Call::RecentHistory(limit, filter));
        let mut entries: Vec<HistoryEntry> = self
            .state
            .borrow()
            .history
            .iter()
            .filter(|entry| match filter {
                HistoryFilter::All => true,
                HistoryFilter::Movies => entry.media.kind() == MediaKind::Movie,
                HistoryFilter::Episodes => entry.media.kind() == MediaKind::Episode,
            })
            .cloned()
            .collect();
        entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
        entries.truncate(limit as usize);
        Ok(entries)
    }

    async fn next_episode(&self, show: &Show) -> Res<Option<Episode>> {
        self.record(Call::NextEpisode(show.ids.trakt));
        Ok(self.state.borrow().next_episodes.get(&show.ids.trakt).cloned())
    }
}

/// Answers prompts from a fixed script and records every question.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, question: &str) -> Res<String> {
        self.asked.push(question.to_string());
        self.answers.pop_front().ok_or_else(|| {
            Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for '{}'", question),
            ))
        })
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, question: &str, default: Option<&str>) -> Res<String> {
        let answer = self.next(question)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn confirm(&mut self, question: &str, default: bool) -> Res<bool> {
        let answer = self.next(question)?;
        Ok(match answer.trim().to_lowercase().as_str() {
            "" => default,
            "y" | "yes" => true,
            _ => false,
        })
    }
}

#[derive(Debug, Default)]
pub struct RecordingBrowser {
    pub opened: RefCell<Vec<String>>,
    pub fail: bool,
}

impl Browser for RecordingBrowser {
    fn open(&self, url: &str) -> io::Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        if self.fail {
            return Err(io::Error::other("no browser"));
        }
        Ok(())
    }
}
