mod common;

use chrono::{Duration, Utc};
use common::*;
use trakt_watch::{
    Error,
    cli::{
        self, App, ProgressOptions, RateOptions, RecentOptions, UnwatchOptions, WatchOptions,
    },
    types::{HistoryFilter, MediaRef, MediaTarget, Rating, SearchKind, WatchedAt},
    utils,
};

const KILLERS_URL: &str = "https://trakt.tv/movies/killers-of-the-flower-moon-2023";

fn killers() -> MediaRef {
    movie(
        1,
        "killers-of-the-flower-moon-2023",
        "Killers of the Flower Moon",
        2023,
        Some(466420),
    )
}

fn stuff_made_here_entry() -> trakt_watch::types::HistoryEntry {
    let smh = show(200, "stuff-made-here", "Stuff Made Here", 2020);
    entry(
        11,
        "2023-10-21T22:24:59Z",
        MediaRef::Episode(episode(&smh, 201, 2023, 1, "Robotic Basketball Hoop")),
    )
}

fn app(
    api: FakeTrakt,
    answers: &[&str],
) -> App<FakeTrakt, ScriptedPrompter, RecordingBrowser> {
    App::new(api, ScriptedPrompter::new(answers), RecordingBrowser::default())
}

#[tokio::test]
async fn test_watch_url_ten_minutes_ago_then_rates_and_lists_it_first() {
    let api = FakeTrakt::new()
        .with_catalog(vec![killers()])
        .with_history(vec![stuff_made_here_entry()]);
    let mut app = app(api, &["y", "8"]);

    let before = Utc::now();
    let at = utils::parse_watched_at("10m ago").expect("valid date");
    let opts = WatchOptions {
        url: Some(KILLERS_URL.to_string()),
        at,
        ..WatchOptions::default()
    };

    cli::watch(&mut app, &opts).await.expect("watch succeeds");

    let calls = app.api.calls();
    assert_eq!(
        calls[0],
        Call::Lookup(MediaTarget::Movie {
            id: "killers-of-the-flower-moon-2023".to_string()
        })
    );

    let added = app.api.additions();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].media, killers());
    let watched = added[0].watched_at.expect("explicit timestamp");
    let offset = before - watched;
    assert!(offset >= Duration::minutes(9) && offset <= Duration::minutes(11));

    assert_eq!(calls[2], Call::Rate(1, Rating::new(8).unwrap()));
    assert_eq!(calls[3], Call::RecentHistory(10, HistoryFilter::All));
    assert_eq!(calls.len(), 4);
    assert_eq!(app.prompter.asked, vec!["Set rating?", "Rating"]);

    let history = cli::recent(&app.api, &RecentOptions::default())
        .await
        .expect("history");
    assert_eq!(history[0].media, killers());
}

#[tokio::test]
async fn test_recent_prints_newest_first() {
    let api = FakeTrakt::new().with_history(vec![
        entry(10, "2023-10-20T14:30:00Z", killers()),
        stuff_made_here_entry(),
    ]);

    let entries = cli::recent(&api, &RecentOptions::default())
        .await
        .expect("history");

    assert_eq!(entries.len(), 2);
    assert_eq!(
        utils::format_history_entry(&entries[0], &Utc, false, false),
        "2023-10-21 22:24:59 Stuff Made Here S2023E1 - Robotic Basketball Hoop"
    );
    assert_eq!(
        utils::format_history_entry(&entries[1], &Utc, false, false),
        "2023-10-20 14:30:00 Killers of the Flower Moon"
    );
}

#[tokio::test]
async fn test_recent_passes_limit_and_filter() {
    let api = FakeTrakt::new().with_history(vec![
        entry(10, "2023-10-20T14:30:00Z", killers()),
        stuff_made_here_entry(),
    ]);
    let opts = RecentOptions {
        limit: 5,
        filter: HistoryFilter::Movies,
        urls: true,
    };

    let entries = cli::recent(&api, &opts).await.expect("history");

    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].media, killers());
    assert_eq!(api.calls(), vec![Call::RecentHistory(5, HistoryFilter::Movies)]);
}

#[tokio::test]
async fn test_search_default_selection_picks_first_result() {
    let inception = movie(16662, "inception-2010", "Inception", 2010, Some(27205));
    let other = movie(99, "inception-the-cobol-job-2010", "Inception: The Cobol Job", 2010, None);
    let api = FakeTrakt::new().with_search_results(results(vec![inception.clone(), other]));
    let mut app = app(api, &["Inception", ""]);
    let opts = RateOptions {
        kind: Some(SearchKind::Movie),
        rating: Some(Rating::new(9).unwrap()),
        letterboxd: true,
        ..RateOptions::default()
    };

    cli::rate(&mut app, &opts).await.expect("rate succeeds");

    assert_eq!(
        app.api.calls(),
        vec![
            Call::Search("Inception".to_string(), SearchKind::Movie),
            Call::Rate(16662, Rating::new(9).unwrap()),
        ]
    );
    assert_eq!(
        app.prompter.asked,
        vec![
            "Search for movie",
            "Pick result - enter 1-2, or q to quit, u to show URLs"
        ]
    );
    assert_eq!(
        *app.browser.opened.borrow(),
        vec!["https://letterboxd.com/tmdb/27205/".to_string()]
    );
}

#[tokio::test]
async fn test_search_reasks_after_invalid_pick_and_url_toggle() {
    let first = movie(1, "a", "A", 2001, None);
    let second = movie(2, "b", "B", 2002, None);
    let api = FakeTrakt::new().with_search_results(results(vec![first, second]));
    let mut app = app(api, &["letters", "u", "x", "3", "2", "5"]);
    let opts = RateOptions {
        kind: Some(SearchKind::Movie),
        ..RateOptions::default()
    };

    cli::rate(&mut app, &opts).await.expect("rate succeeds");

    assert_eq!(app.api.calls()[1], Call::Rate(2, Rating::new(5).unwrap()));
    assert_eq!(app.prompter.remaining(), 0);
}

#[tokio::test]
async fn test_empty_search_results_fail_without_selection_prompt() {
    let api = FakeTrakt::new();
    let mut app = app(api, &["nothing like this"]);
    let opts = RateOptions {
        kind: Some(SearchKind::All),
        ..RateOptions::default()
    };

    let err = cli::rate(&mut app, &opts).await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(app.prompter.asked, vec!["Search for all"]);
    assert_eq!(app.api.calls().len(), 1);
}

#[tokio::test]
async fn test_quitting_selection_cancels() {
    let api = FakeTrakt::new().with_search_results(results(vec![killers()]));
    let mut app = app(api, &["killers", "q"]);
    let opts = WatchOptions {
        kind: Some(SearchKind::Movie),
        ..WatchOptions::default()
    };

    let err = cli::watch(&mut app, &opts).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(app.api.additions().is_empty());
}

#[tokio::test]
async fn test_menu_url_choice_resolves_url() {
    let api = FakeTrakt::new().with_catalog(vec![killers()]);
    let mut app = app(api, &["U", KILLERS_URL, "n"]);

    cli::watch(&mut app, &WatchOptions::default())
        .await
        .expect("watch succeeds");

    assert_eq!(app.api.additions()[0].media, killers());
    assert_eq!(app.api.additions()[0].watched_at, None);
}

#[tokio::test]
async fn test_show_episode_search_asks_for_season_and_episode() {
    let bear = show(300, "the-bear", "The Bear", 2022);
    let target = episode(&bear, 301, 2, 3, "Sundae");
    let api = FakeTrakt::new()
        .with_search_results(results(vec![MediaRef::Show(bear.clone())]))
        .with_catalog(vec![MediaRef::Episode(target.clone())]);
    let mut app = app(api, &["the bear", "", "two", "2", "3", "n"]);
    let opts = WatchOptions {
        kind: Some(SearchKind::ShowEpisode),
        ..WatchOptions::default()
    };

    cli::watch(&mut app, &opts).await.expect("watch succeeds");

    assert!(app.api.calls().contains(&Call::Lookup(MediaTarget::Episode {
        show: "the-bear".to_string(),
        season: 2,
        episode: 3,
    })));
    assert_eq!(app.api.additions()[0].media, MediaRef::Episode(target));
}

#[tokio::test]
async fn test_watch_show_declined_skips_add() {
    let bear = show(300, "the-bear", "The Bear", 2022);
    let api = FakeTrakt::new().with_catalog(vec![MediaRef::Show(bear)]);
    let mut app = app(api, &["n", "n"]);
    let opts = WatchOptions {
        url: Some("https://trakt.tv/shows/the-bear".to_string()),
        ..WatchOptions::default()
    };

    cli::watch(&mut app, &opts).await.expect("watch succeeds");

    assert!(app.api.additions().is_empty());
    assert_eq!(
        app.prompter.asked,
        vec!["Really mark entire show as watched?", "Set rating?"]
    );
}

#[tokio::test]
async fn test_watch_at_released_uses_release_date() {
    let released = at("2023-10-20T00:00:00Z");
    let api = FakeTrakt::new()
        .with_catalog(vec![killers()])
        .with_release_date(1, released);
    let mut app = app(api, &[]);
    let opts = WatchOptions {
        url: Some(KILLERS_URL.to_string()),
        at: WatchedAt::Released,
        rating: Some(Rating::new(10).unwrap()),
        ..WatchOptions::default()
    };

    cli::watch(&mut app, &opts).await.expect("watch succeeds");

    assert_eq!(app.api.additions()[0].watched_at, Some(released));
    assert!(app.prompter.asked.is_empty());
}

#[tokio::test]
async fn test_watch_at_released_without_date_fails_before_adding() {
    let api = FakeTrakt::new().with_catalog(vec![killers()]);
    let mut app = app(api, &[]);
    let opts = WatchOptions {
        url: Some(KILLERS_URL.to_string()),
        at: WatchedAt::Released,
        ..WatchOptions::default()
    };

    let err = cli::watch(&mut app, &opts).await.unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(app.api.additions().is_empty());
}

#[tokio::test]
async fn test_watch_invalid_url_is_validation_error() {
    let mut app = app(FakeTrakt::new(), &[]);
    let opts = WatchOptions {
        url: Some("https://trakt.tv/users/someone".to_string()),
        ..WatchOptions::default()
    };

    let err = cli::watch(&mut app, &opts).await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(app.api.calls().is_empty());
}

#[tokio::test]
async fn test_rate_prompt_reasks_until_rating_in_range() {
    let api = FakeTrakt::new().with_catalog(vec![killers()]);
    let mut app = app(api, &["11", "abc", "0", "7"]);
    let opts = RateOptions {
        url: Some(KILLERS_URL.to_string()),
        ..RateOptions::default()
    };

    cli::rate(&mut app, &opts).await.expect("rate succeeds");

    assert_eq!(
        app.api.calls()[1],
        Call::Rate(1, Rating::new(7).unwrap())
    );
    assert_eq!(app.prompter.asked.len(), 4);
}

#[tokio::test]
async fn test_rate_letterboxd_failure_is_not_fatal() {
    let api = FakeTrakt::new().with_catalog(vec![killers()]);
    let mut app = App::new(
        api,
        ScriptedPrompter::new(&[]),
        RecordingBrowser {
            fail: true,
            ..RecordingBrowser::default()
        },
    );
    let opts = RateOptions {
        url: Some(KILLERS_URL.to_string()),
        rating: Some(Rating::new(6).unwrap()),
        letterboxd: true,
        ..RateOptions::default()
    };

    cli::rate(&mut app, &opts).await.expect("rate succeeds");

    assert_eq!(app.browser.opened.borrow().len(), 1);
}

fn three_entries() -> Vec<trakt_watch::types::HistoryEntry> {
    vec![
        entry(10, "2023-10-20T14:30:00Z", killers()),
        stuff_made_here_entry(),
        entry(
            12,
            "2023-10-19T20:00:00Z",
            movie(5, "past-lives-2023", "Past Lives", 2023, None),
        ),
    ]
}

#[tokio::test]
async fn test_unwatch_rejects_out_of_range_without_removing() {
    let api = FakeTrakt::new().with_history(three_entries());
    let mut app = app(api, &["7", "0", "-1", "q"]);

    let err = cli::unwatch(&mut app, &UnwatchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(app.api.removals().is_empty());
    assert_eq!(app.prompter.asked.len(), 4);
}

#[tokio::test]
async fn test_unwatch_removes_picked_entry_after_confirmation() {
    let api = FakeTrakt::new().with_history(three_entries());
    let mut app = app(api, &["4", "2", ""]);

    cli::unwatch(&mut app, &UnwatchOptions::default())
        .await
        .expect("unwatch succeeds");

    // newest first: Stuff Made Here (11), Killers (10), Past Lives (12)
    assert_eq!(app.api.removals(), vec![10]);
    assert_eq!(
        app.prompter.asked.last().map(String::as_str),
        Some("Remove from history?")
    );
    assert_eq!(app.api.state.borrow().history.len(), 2);
}

#[tokio::test]
async fn test_unwatch_declined_confirmation_cancels() {
    let api = FakeTrakt::new().with_history(three_entries());
    let mut app = app(api, &["", "n"]);

    let err = cli::unwatch(&mut app, &UnwatchOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    assert!(app.api.removals().is_empty());
}

#[tokio::test]
async fn test_unwatch_non_interactive_removes_newest() {
    let api = FakeTrakt::new().with_history(three_entries());
    let mut app = app(api, &[]);
    let opts = UnwatchOptions {
        interactive: false,
        yes: true,
        ..UnwatchOptions::default()
    };

    cli::unwatch(&mut app, &opts).await.expect("unwatch succeeds");

    assert_eq!(app.api.removals(), vec![11]);
    assert!(app.prompter.asked.is_empty());
}

#[tokio::test]
async fn test_unwatch_empty_history_is_not_found() {
    let mut app = app(FakeTrakt::new(), &[]);

    let err = cli::unwatch(&mut app, &UnwatchOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(app.prompter.asked.is_empty());
}

#[tokio::test]
async fn test_progress_omits_finished_shows() {
    let bear = show(300, "the-bear", "The Bear", 2022);
    let severance = show(400, "severance", "Severance", 2022);
    let next = episode(&bear, 303, 2, 4, "Honeydew");
    let api = FakeTrakt::new()
        .with_history(vec![
            entry(20, "2023-10-18T21:00:00Z", MediaRef::Episode(episode(&bear, 301, 2, 2, "Pasta"))),
            entry(21, "2023-10-19T21:00:00Z", MediaRef::Episode(episode(&bear, 302, 2, 3, "Sundae"))),
            entry(
                22,
                "2023-10-17T21:00:00Z",
                MediaRef::Episode(episode(&severance, 401, 1, 9, "The We We Are")),
            ),
            entry(23, "2023-10-16T21:00:00Z", killers()),
        ])
        .with_next_episode(next.clone());
    let mut app = app(api, &["", "n"]);

    cli::progress(&mut app, &ProgressOptions::default())
        .await
        .expect("progress succeeds");

    let calls = app.api.calls();
    assert_eq!(calls[0], Call::RecentHistory(50, HistoryFilter::Episodes));
    assert_eq!(calls[1], Call::NextEpisode(300));
    assert_eq!(calls[2], Call::NextEpisode(400));
    assert_eq!(
        app.prompter.asked[0],
        "Pick episode to watch - enter 1-1, or q to quit, u to show URLs"
    );
    assert_eq!(app.api.additions()[0].media, MediaRef::Episode(next));
}

#[tokio::test]
async fn test_progress_without_next_episodes_is_not_found() {
    let bear = show(300, "the-bear", "The Bear", 2022);
    let api = FakeTrakt::new().with_history(vec![entry(
        20,
        "2023-10-18T21:00:00Z",
        MediaRef::Episode(episode(&bear, 301, 2, 10, "Forks")),
    )]);
    let mut app = app(api, &[]);

    let err = cli::progress(&mut app, &ProgressOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, Error::NotFound(_)));
    assert!(app.prompter.asked.is_empty());
    assert!(app.api.additions().is_empty());
}
