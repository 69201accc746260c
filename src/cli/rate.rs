use crate::{
    Res,
    browser::{self, Browser},
    cli::{App, output},
    info,
    prompt::{self, Prompter},
    resolver,
    trakt::TraktApi,
    types::{Rating, SearchKind},
};

#[derive(Debug, Clone, Default)]
pub struct RateOptions {
    pub url: Option<String>,
    pub kind: Option<SearchKind>,
    pub rating: Option<Rating>,
    pub letterboxd: bool,
}

pub async fn rate<A, P, B>(app: &mut App<A, P, B>, opts: &RateOptions) -> Res<()>
where
    A: TraktApi,
    P: Prompter,
    B: Browser,
{
    let media = resolver::resolve(&app.api, &mut app.prompter, opts.url.as_deref(), opts.kind).await?;

    let rating = match opts.rating {
        Some(rating) => rating,
        None => prompt::ask_rating(&mut app.prompter)?,
    };

    info!("Rating {} with {}", media, rating);
    let summary = app.api.rate(&media, rating).await?;
    output::print_sync_summary(&summary, true);

    if opts.letterboxd {
        browser::open_letterboxd(&app.browser, &media);
    }
    Ok(())
}
