use std::{collections::BTreeMap, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::{Res, error::Error};

/// Identifiers trakt attaches to every movie, show and episode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ids {
    pub trakt: u64,
    pub slug: Option<String>,
    pub imdb: Option<String>,
    pub tmdb: Option<u64>,
    pub tvdb: Option<u64>,
}

impl Ids {
    /// The path segment used to address the item in API and web URLs.
    pub fn key(&self) -> String {
        match &self.slug {
            Some(slug) if !slug.is_empty() => slug.clone(),
            _ => self.trakt.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Movie,
    Show,
    Episode,
}

impl MediaKind {
    /// Key of the per-kind arrays in the sync endpoints' request bodies.
    pub fn bucket(self) -> &'static str {
        match self {
            MediaKind::Movie => "movies",
            MediaKind::Show => "shows",
            MediaKind::Episode => "episodes",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Movie => "movie",
            MediaKind::Show => "show",
            MediaKind::Episode => "episode",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Show {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Episode {
    pub show: Show,
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: Ids,
}

/// A resolved movie, show or episode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaRef {
    Movie(Movie),
    Show(Show),
    Episode(Episode),
}

impl MediaRef {
    pub fn kind(&self) -> MediaKind {
        match self {
            MediaRef::Movie(_) => MediaKind::Movie,
            MediaRef::Show(_) => MediaKind::Show,
            MediaRef::Episode(_) => MediaKind::Episode,
        }
    }

    pub fn ids(&self) -> &Ids {
        match self {
            MediaRef::Movie(m) => &m.ids,
            MediaRef::Show(s) => &s.ids,
            MediaRef::Episode(e) => &e.ids,
        }
    }

    /// Path of the item on the trakt website, without the host.
    pub fn web_path(&self) -> String {
        match self {
            MediaRef::Movie(m) => format!("movies/{}", m.ids.key()),
            MediaRef::Show(s) => format!("shows/{}", s.ids.key()),
            MediaRef::Episode(e) => format!(
                "shows/{}/seasons/{}/episodes/{}",
                e.show.ids.key(),
                e.season,
                e.number
            ),
        }
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaRef::Movie(m) => write!(f, "{}", m.title),
            MediaRef::Show(s) => write!(f, "{}", s.title),
            MediaRef::Episode(e) => write!(
                f,
                "{} S{}E{} - {}",
                e.show.title,
                e.season,
                e.number,
                e.title.as_deref().unwrap_or("TBA")
            ),
        }
    }
}

/// An item addressed by a trakt URL, not yet looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaTarget {
    Movie { id: String },
    Show { id: String },
    Episode { show: String, season: u32, episode: u32 },
}

/// What the search menu asks trakt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SearchKind {
    Movie,
    Show,
    /// Search episodes by episode title
    Episode,
    /// Search a show, then ask for season and episode numbers
    ShowEpisode,
    All,
}

impl SearchKind {
    /// Value of the `{type}` segment of `/search/{type}`.
    pub fn search_types(self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Show | SearchKind::ShowEpisode => "show",
            SearchKind::Episode => "episode",
            SearchKind::All => "movie,show,episode",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchKind::Movie => "movie",
            SearchKind::Show | SearchKind::ShowEpisode => "show",
            SearchKind::Episode => "episode",
            SearchKind::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// 1-based position in the order trakt returned the results.
    pub rank: usize,
    pub media: MediaRef,
}

impl SearchResult {
    pub fn label(&self) -> String {
        crate::utils::search_label(&self.media, false)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    pub action: String,
    pub media: MediaRef,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum HistoryFilter {
    #[default]
    #[value(skip)]
    All,
    Movies,
    Episodes,
}

impl HistoryFilter {
    pub fn path_segment(self) -> Option<&'static str> {
        match self {
            HistoryFilter::All => None,
            HistoryFilter::Movies => Some("movies"),
            HistoryFilter::Episodes => Some("episodes"),
        }
    }
}

/// A rating on trakt's 1 to 10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Res<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Ok(Rating(value as u8))
        } else {
            Err(Error::validation(format!(
                "Rating must be between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl FromStr for Rating {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| Error::validation(format!("'{}' is not a valid integer", s.trim())))?;
        Rating::new(value)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// When an item was watched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WatchedAt {
    /// Let trakt stamp the current time.
    #[default]
    Now,
    /// The item's official release date, looked up before sending.
    Released,
    At(DateTime<Utc>),
}

/// One play to add to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchRequest {
    pub media: MediaRef,
    /// `None` lets trakt stamp the current time.
    pub watched_at: Option<DateTime<Utc>>,
}

impl WatchRequest {
    pub fn new(media: MediaRef, watched_at: Option<DateTime<Utc>>) -> Self {
        WatchRequest { media, watched_at }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncCounts {
    #[serde(default)]
    pub movies: u64,
    #[serde(default)]
    pub shows: u64,
    #[serde(default)]
    pub seasons: u64,
    #[serde(default)]
    pub episodes: u64,
}

impl SyncCounts {
    pub fn total(&self) -> u64 {
        self.movies + self.shows + self.seasons + self.episodes
    }
}

/// Body returned by `/sync/history`, `/sync/ratings` and `/sync/history/remove`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncSummary {
    #[serde(default)]
    pub added: Option<SyncCounts>,
    #[serde(default)]
    pub deleted: Option<SyncCounts>,
    #[serde(default)]
    pub not_found: BTreeMap<String, serde_json::Value>,
}

impl SyncSummary {
    pub fn added_total(&self) -> u64 {
        self.added.as_ref().map(SyncCounts::total).unwrap_or(0)
    }

    pub fn deleted_total(&self) -> u64 {
        self.deleted.as_ref().map(SyncCounts::total).unwrap_or(0)
    }

    /// One `kind: item` line per rejected item.
    pub fn not_found_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (kind, items) in &self.not_found {
            match items {
                serde_json::Value::Array(items) => {
                    for item in items {
                        lines.push(format!("{}: {}", kind, item));
                    }
                }
                serde_json::Value::Null => {}
                other => lines.push(format!("{}: {}", kind, other)),
            }
        }
        lines
    }
}
