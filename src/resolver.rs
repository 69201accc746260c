//! Turns a URL or an interactive search into a [`MediaRef`].

use tracing::debug;

use crate::{
    Error, Res,
    prompt::{self, Prompter},
    trakt::TraktApi,
    types::{MediaRef, MediaTarget, SearchKind, SearchResult},
    utils, warning,
};

const MENU: &str = "[M]ovie\n[S]how\n[E]pisode name\nEp[I]sode - Show w/ Season/Episode num\n[U]rl\n[A]ll";
const MENU_KEYS: [char; 6] = ['M', 'S', 'I', 'E', 'A', 'U'];

/// Outcome of the media type menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Search(SearchKind),
    Url,
}

/// Reads the first character of a menu answer. Anything unknown searches
/// all types.
pub fn parse_menu_choice(answer: &str) -> MenuChoice {
    let pressed = answer.trim().chars().next().map(|c| c.to_ascii_uppercase());
    match pressed {
        Some('M') => MenuChoice::Search(SearchKind::Movie),
        Some('S') => MenuChoice::Search(SearchKind::Show),
        Some('E') => MenuChoice::Search(SearchKind::Episode),
        Some('I') => MenuChoice::Search(SearchKind::ShowEpisode),
        Some('U') => MenuChoice::Url,
        Some('A') => MenuChoice::Search(SearchKind::All),
        Some(other) => {
            let keys: Vec<String> = MENU_KEYS.iter().map(char::to_string).collect();
            warning!("'{}', should be one of ({})", other, keys.join(", "));
            MenuChoice::Search(SearchKind::All)
        }
        None => {
            warning!("No input");
            MenuChoice::Search(SearchKind::All)
        }
    }
}

/// Resolves `url` when given, otherwise runs the interactive search.
pub async fn resolve<A, P>(
    api: &A,
    prompter: &mut P,
    url: Option<&str>,
    hint: Option<SearchKind>,
) -> Res<MediaRef>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    if let Some(url) = url {
        return resolve_url(api, url).await;
    }

    let kind = match hint {
        Some(kind) => kind,
        None => {
            println!("{}", MENU);
            let answer = prompter.input("What type of media do you want to search for?", None)?;
            match parse_menu_choice(&answer) {
                MenuChoice::Search(kind) => kind,
                MenuChoice::Url => {
                    let url = prompter.input("Url", None)?;
                    return resolve_url(api, &url).await;
                }
            }
        }
    };

    search(api, prompter, kind).await
}

/// Parses a trakt URL and looks the item up.
pub async fn resolve_url<A: TraktApi + ?Sized>(api: &A, url: &str) -> Res<MediaRef> {
    let target = utils::parse_url(url)?;
    debug!(?target, "resolved url");
    api.lookup(&target).await
}

async fn search<A, P>(api: &A, prompter: &mut P, kind: SearchKind) -> Res<MediaRef>
where
    A: TraktApi + ?Sized,
    P: Prompter + ?Sized,
{
    let query = loop {
        let answer = prompter.input(&format!("Search for {}", kind.label()), None)?;
        let answer = answer.trim();
        if !answer.is_empty() {
            break answer.to_string();
        }
        warning!("Search term cannot be empty");
    };

    let results = api.search(&query, kind).await?;
    debug!(count = results.len(), %query, "search results");
    let picked = select_result(prompter, &results)?;

    match (&picked.media, kind) {
        (MediaRef::Show(show), SearchKind::ShowEpisode) => {
            let season = prompt::ask_number(prompter, "Season")?;
            let episode = prompt::ask_number(prompter, "Episode")?;
            api.lookup(&MediaTarget::Episode {
                show: show.ids.key(),
                season,
                episode,
            })
            .await
        }
        _ => Ok(picked.media.clone()),
    }
}

/// Lets the user pick one of `results`, first entry by default.
///
/// An empty result set fails right away without prompting.
pub fn select_result<'a, P: Prompter + ?Sized>(
    prompter: &mut P,
    results: &'a [SearchResult],
) -> Res<&'a SearchResult> {
    if results.is_empty() {
        return Err(Error::not_found("No results found"));
    }

    let question = format!(
        "Pick result - enter 1-{}, or q to quit, u to show URLs",
        results.len()
    );
    let index = prompt::pick_one(prompter, &question, results.len(), |show_urls| {
        println!("Results:");
        for result in results {
            println!(
                "{}: {}",
                result.rank,
                utils::search_label(&result.media, show_urls)
            );
        }
    })?;

    Ok(&results[index])
}
