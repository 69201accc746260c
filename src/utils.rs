use std::{collections::HashSet, fmt, time::Duration};

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::Url;

use crate::{
    Error, Res, config,
    types::{Episode, HistoryEntry, MediaRef, MediaTarget, Rating, WatchedAt},
    warning,
};

const TRAKT_HOSTS: [&str; 2] = ["trakt.tv", "www.trakt.tv"];

/// Parses a trakt website URL into the item it points at.
///
/// Accepted paths:
/// - `movies/<id>/...`
/// - `shows/<id>/seasons/<season>/episodes/<episode>/...`
/// - `shows/<id>/...`
///
/// A host other than trakt.tv only produces a warning.
pub fn parse_url(url: &str) -> Res<MediaTarget> {
    let trimmed = url.trim();
    let parsed = Url::parse(trimmed)
        .or_else(|_| Url::parse(&format!("https://{}", trimmed)))
        .map_err(|e| Error::validation(format!("Invalid URL '{}': {}", trimmed, e)))?;

    let host = parsed.host_str().unwrap_or_default();
    if !TRAKT_HOSTS.contains(&host) {
        warning!("Invalid URL host: {}, expected trakt.tv", host);
    }

    let parts: Vec<&str> = parsed
        .path_segments()
        .map(|segments| {
            segments
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .collect()
        })
        .unwrap_or_default();

    match parts.as_slice() {
        ["movies", id, ..] => Ok(MediaTarget::Movie { id: id.to_string() }),
        ["shows", id, "seasons", season, "episodes", episode, ..] => Ok(MediaTarget::Episode {
            show: id.to_string(),
            season: parse_number(season)?,
            episode: parse_number(episode)?,
        }),
        ["shows", id, ..] => Ok(MediaTarget::Show { id: id.to_string() }),
        _ => Err(Error::validation(format!("Invalid URL parts: {:?}", parts))),
    }
}

fn parse_number(value: &str) -> Res<u32> {
    value
        .parse()
        .map_err(|_| Error::validation(format!("'{}' is not a valid number", value)))
}

/// clap value parser for `--at`.
pub fn parse_watched_at(input: &str) -> Result<WatchedAt, String> {
    parse_watched_at_from(input, Utc::now())
}

/// Parses `released`, `now`, `today`, `yesterday`, `<duration> ago`,
/// RFC 3339, and local `YYYY-MM-DD[ HH:MM[:SS]]`.
pub fn parse_watched_at_from(input: &str, now: DateTime<Utc>) -> Result<WatchedAt, String> {
    let value = input.trim();
    let lowered = value.to_lowercase();

    match lowered.as_str() {
        "" => return Err("date cannot be empty".to_string()),
        "released" => return Ok(WatchedAt::Released),
        "now" | "today" => return Ok(WatchedAt::At(now)),
        "yesterday" => return Ok(WatchedAt::At(now - chrono::Duration::days(1))),
        _ => {}
    }

    // humantime is case sensitive: `M` is months, `m` minutes
    if let Some(span) = strip_suffix_ignore_case(value, "ago") {
        let compact: String = span.split_whitespace().collect();
        let ago = humantime::parse_duration(&compact)
            .ok()
            .and_then(|d| chrono::Duration::from_std(d).ok())
            .ok_or_else(|| format!("Could not parse '{}' into a date", value))?;
        return Ok(WatchedAt::At(now - ago));
    }

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(WatchedAt::At(at.with_timezone(&Utc)));
    }

    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return local_to_utc(naive).map(WatchedAt::At);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
            return local_to_utc(midnight).map(WatchedAt::At);
        }
    }

    Err(format!("Could not parse '{}' into a date", value))
}

fn strip_suffix_ignore_case<'a>(value: &'a str, suffix: &str) -> Option<&'a str> {
    let split = value.len().checked_sub(suffix.len())?;
    let tail = value.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        value.get(..split)
    } else {
        None
    }
}

fn local_to_utc(naive: NaiveDateTime) -> Result<DateTime<Utc>, String> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("'{}' does not exist in the local timezone", naive))
}

/// clap value parser for `--rating`.
pub fn parse_rating(input: &str) -> Result<Rating, String> {
    input.parse::<Rating>().map_err(|e| e.to_string())
}

/// Newest first. Entries with the same timestamp keep their order.
pub fn sort_history(entries: &mut [HistoryEntry]) {
    entries.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));
}

/// The most recently watched episode of every show in `entries`, newest
/// show first. Movies are ignored.
pub fn latest_episode_per_show(entries: &[HistoryEntry]) -> Vec<Episode> {
    let mut sorted: Vec<&HistoryEntry> = entries.iter().collect();
    sorted.sort_by(|a, b| b.watched_at.cmp(&a.watched_at));

    let mut seen_shows = HashSet::new();
    sorted
        .into_iter()
        .filter_map(|entry| match &entry.media {
            MediaRef::Episode(episode) => Some(episode),
            _ => None,
        })
        .filter(|episode| seen_shows.insert(episode.show.ids.trakt))
        .cloned()
        .collect()
}

pub fn trakt_url(media: &MediaRef) -> String {
    format!("{}/{}", config::TRAKT_WEB_URL, media.web_path())
}

/// Letterboxd only knows movies, addressed by their tmdb id.
pub fn letterboxd_url(media: &MediaRef) -> Option<String> {
    match media {
        MediaRef::Movie(movie) => movie
            .ids
            .tmdb
            .map(|tmdb| format!("{}/tmdb/{}/", config::LETTERBOXD_URL, tmdb)),
        _ => None,
    }
}

fn with_year(title: &str, year: Option<u32>) -> String {
    match year {
        Some(year) => format!("{} ({})", title, year),
        None => title.to_string(),
    }
}

/// One line of the search result menu.
pub fn search_label(media: &MediaRef, print_url: bool) -> String {
    let mut buf = match media {
        MediaRef::Movie(m) => format!("Movie:\t{}", with_year(&m.title, m.year)),
        MediaRef::Show(s) => format!("Show:\t{}", with_year(&s.title, s.year)),
        MediaRef::Episode(_) => format!("Episode:\t{}", media),
    };
    if print_url {
        buf.push_str(&format!(" | {}", trakt_url(media)));
    }
    buf
}

/// `<timestamp> <title>` in the given timezone.
pub fn format_history_entry<Tz>(
    entry: &HistoryEntry,
    tz: &Tz,
    include_id: bool,
    print_url: bool,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let watched_at = entry.watched_at.with_timezone(tz);
    let mut buf = format!("{} {}", watched_at.format("%Y-%m-%d %H:%M:%S"), entry.media);
    if print_url {
        buf.push_str(&format!(" | {}", trakt_url(&entry.media)));
    }
    if include_id {
        buf.push_str(&format!(" ({})", entry.id));
    }
    buf
}

pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.into());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
