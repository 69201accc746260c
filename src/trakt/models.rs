//! Response shapes of the trakt API and their conversion into crate types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::types::{Episode, HistoryEntry, Ids, MediaRef, Movie, Show};

#[derive(Debug, Clone, Deserialize)]
pub struct TraktMovie {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,
    /// `YYYY-MM-DD`, only with `extended=full`.
    #[serde(default)]
    pub released: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktShow {
    pub title: String,
    pub year: Option<u32>,
    pub ids: Ids,
    #[serde(default)]
    pub first_aired: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktEpisode {
    pub season: u32,
    pub number: u32,
    pub title: Option<String>,
    pub ids: Ids,
    #[serde(default)]
    pub first_aired: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktSearchItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub movie: Option<TraktMovie>,
    pub show: Option<TraktShow>,
    pub episode: Option<TraktEpisode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TraktHistoryItem {
    pub id: u64,
    pub watched_at: DateTime<Utc>,
    #[serde(default)]
    pub action: String,
    #[serde(rename = "type")]
    pub item_type: String,
    pub movie: Option<TraktMovie>,
    pub show: Option<TraktShow>,
    pub episode: Option<TraktEpisode>,
}

/// `/shows/{id}/progress/watched`, only the part we use.
#[derive(Debug, Clone, Deserialize)]
pub struct TraktWatchedProgress {
    pub next_episode: Option<TraktEpisode>,
}

impl From<TraktMovie> for Movie {
    fn from(movie: TraktMovie) -> Self {
        Movie {
            title: movie.title,
            year: movie.year,
            ids: movie.ids,
        }
    }
}

impl From<TraktShow> for Show {
    fn from(show: TraktShow) -> Self {
        Show {
            title: show.title,
            year: show.year,
            ids: show.ids,
        }
    }
}

impl TraktEpisode {
    pub fn into_episode(self, show: Show) -> Episode {
        Episode {
            show,
            season: self.season,
            number: self.number,
            title: self.title,
            ids: self.ids,
        }
    }
}

impl TraktMovie {
    /// Release day at midnight UTC.
    pub fn release_date(&self) -> Option<DateTime<Utc>> {
        let released = self.released.as_deref()?;
        NaiveDate::parse_from_str(released, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc())
    }
}

/// Builds a media reference from the `type` discriminator and the matching
/// payload. Episodes need their show as well.
fn media_from_parts(
    item_type: &str,
    movie: Option<TraktMovie>,
    show: Option<TraktShow>,
    episode: Option<TraktEpisode>,
) -> Option<MediaRef> {
    match item_type {
        "movie" => movie.map(|m| MediaRef::Movie(m.into())),
        "show" => show.map(|s| MediaRef::Show(s.into())),
        "episode" => {
            let show: Show = show?.into();
            episode.map(|e| MediaRef::Episode(e.into_episode(show)))
        }
        other => {
            debug!(item_type = other, "skipping unsupported item type");
            None
        }
    }
}

impl TraktSearchItem {
    pub fn into_media(self) -> Option<MediaRef> {
        media_from_parts(&self.item_type, self.movie, self.show, self.episode)
    }
}

impl TraktHistoryItem {
    pub fn into_entry(self) -> Option<HistoryEntry> {
        let media = media_from_parts(&self.item_type, self.movie, self.show, self.episode)?;
        Some(HistoryEntry {
            id: self.id,
            watched_at: self.watched_at,
            action: self.action,
            media,
        })
    }
}
