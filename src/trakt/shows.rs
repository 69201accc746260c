use chrono::{DateTime, Utc};

use crate::{
    Res,
    trakt::{
        TraktClient,
        models::{TraktEpisode, TraktMovie, TraktShow, TraktWatchedProgress},
    },
    types::{Episode, MediaRef, MediaTarget, Show},
};

fn extended_full() -> [(&'static str, String); 1] {
    [("extended", "full".to_string())]
}

async fn get_movie(client: &TraktClient, id: &str, full: bool) -> Res<TraktMovie> {
    let path = format!("movies/{}", id);
    if full {
        client.get(&path, &extended_full()).await
    } else {
        client.get(&path, &[]).await
    }
}

async fn get_show(client: &TraktClient, id: &str, full: bool) -> Res<TraktShow> {
    let path = format!("shows/{}", id);
    if full {
        client.get(&path, &extended_full()).await
    } else {
        client.get(&path, &[]).await
    }
}

async fn get_episode(
    client: &TraktClient,
    show: &str,
    season: u32,
    episode: u32,
    full: bool,
) -> Res<TraktEpisode> {
    let path = format!("shows/{}/seasons/{}/episodes/{}", show, season, episode);
    if full {
        client.get(&path, &extended_full()).await
    } else {
        client.get(&path, &[]).await
    }
}

/// Fetches the summary of a URL target. Episodes take two requests, one for
/// the show and one for the episode itself.
pub async fn lookup(client: &TraktClient, target: &MediaTarget) -> Res<MediaRef> {
    match target {
        MediaTarget::Movie { id } => Ok(MediaRef::Movie(get_movie(client, id, false).await?.into())),
        MediaTarget::Show { id } => Ok(MediaRef::Show(get_show(client, id, false).await?.into())),
        MediaTarget::Episode {
            show,
            season,
            episode,
        } => {
            let parent: Show = get_show(client, show, false).await?.into();
            let episode = get_episode(client, show, *season, *episode, false).await?;
            Ok(MediaRef::Episode(episode.into_episode(parent)))
        }
    }
}

/// Official release time: `released` for movies, `first_aired` otherwise.
pub async fn release_date(client: &TraktClient, media: &MediaRef) -> Res<Option<DateTime<Utc>>> {
    match media {
        MediaRef::Movie(movie) => {
            let movie = get_movie(client, &movie.ids.trakt.to_string(), true).await?;
            Ok(movie.release_date())
        }
        MediaRef::Show(show) => {
            let show = get_show(client, &show.ids.trakt.to_string(), true).await?;
            Ok(show.first_aired)
        }
        MediaRef::Episode(ep) => {
            let episode = get_episode(
                client,
                &ep.show.ids.trakt.to_string(),
                ep.season,
                ep.number,
                true,
            )
            .await?;
            Ok(episode.first_aired)
        }
    }
}

/// The episode trakt suggests watching next, `None` once the show is done.
pub async fn next_episode(client: &TraktClient, show: &Show) -> Res<Option<Episode>> {
    let path = format!("shows/{}/progress/watched", show.ids.trakt);
    let progress: TraktWatchedProgress = client.get(&path, &[]).await?;
    Ok(progress
        .next_episode
        .map(|episode| episode.into_episode(show.clone())))
}
