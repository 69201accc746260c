use std::process;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        FalseyValueParser, Styles,
        styling::{AnsiColor, Effects},
    },
    error::ErrorKind,
};
use clap_complete::{Shell, generate};

use trakt_watch::{
    Res,
    browser::SystemBrowser,
    cli::{self, App, ProgressOptions, RateOptions, RecentOptions, UnwatchOptions, WatchOptions},
    config, error, logging,
    management::SessionManager,
    prompt::TerminalPrompter,
    trakt::TraktClient,
    types::{HistoryFilter, Rating, SearchKind, WatchedAt},
    utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// trakt.tv username whose history is read
    #[clap(short, long, env = "TRAKT_USERNAME")]
    username: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[clap(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Mark a movie, show or episode as watched
    Watch(WatchArgs),

    /// Rate a movie, show or episode
    Rate(RateArgs),

    /// Remove an entry from your recent history
    Unwatch(UnwatchArgs),

    /// Show your recent history
    Recent(RecentArgs),

    /// Watch the next episode of a show you are watching
    Progress(ProgressArgs),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct WatchArgs {
    /// trakt.tv URL of the item, skips the search
    #[clap(long)]
    url: Option<String>,

    /// Media type to search for, skips the menu
    #[clap(short = 't', long = "type", value_enum)]
    kind: Option<SearchKind>,

    /// When you watched it: released, now, today, yesterday, '10m ago',
    /// 'YYYY-MM-DD HH:MM' or RFC 3339
    #[clap(short, long, value_parser = utils::parse_watched_at)]
    at: Option<WatchedAt>,

    /// Rating from 1 to 10, skips the rating prompt
    #[clap(short, long, value_parser = utils::parse_rating)]
    rating: Option<Rating>,

    /// Open the movie on letterboxd.com afterwards
    #[clap(
        short,
        long,
        env = "OPEN_LETTERBOXD",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    letterboxd: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RateArgs {
    /// trakt.tv URL of the item, skips the search
    #[clap(long)]
    url: Option<String>,

    /// Media type to search for, skips the menu
    #[clap(short = 't', long = "type", value_enum)]
    kind: Option<SearchKind>,

    /// Rating from 1 to 10
    #[clap(short, long, value_parser = utils::parse_rating)]
    rating: Option<Rating>,

    /// Open the movie on letterboxd.com afterwards
    #[clap(
        short,
        long,
        env = "OPEN_LETTERBOXD",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    letterboxd: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UnwatchArgs {
    /// Number of history entries to choose from
    #[clap(default_value_t = config::DEFAULT_HISTORY_LIMIT)]
    limit: u32,

    /// Don't ask for confirmation
    #[clap(short, long)]
    yes: bool,

    /// Remove the newest entry without showing a list
    #[clap(short = 'a', long)]
    non_interactive: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RecentArgs {
    /// Number of entries to show
    #[clap(env = "TRAKT_WATCH_LIMIT", default_value_t = config::DEFAULT_HISTORY_LIMIT)]
    limit: u32,

    /// Only show movies or episodes
    #[clap(short = 't', long = "type", value_enum)]
    filter: Option<HistoryFilter>,

    /// Print trakt.tv URLs
    #[clap(short, long)]
    urls: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ProgressArgs {
    /// Number of history entries scanned for shows
    #[clap(default_value_t = 50)]
    limit: u32,

    /// When you watched it, same formats as `watch --at`
    #[clap(short, long, value_parser = utils::parse_watched_at)]
    at: Option<WatchedAt>,

    /// Rating from 1 to 10, skips the rating prompt
    #[clap(short, long, value_parser = utils::parse_rating)]
    rating: Option<Rating>,

    /// Open letterboxd.com afterwards
    #[clap(
        short,
        long,
        env = "OPEN_LETTERBOXD",
        action = ArgAction::SetTrue,
        value_parser = FalseyValueParser::new()
    )]
    letterboxd: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = config::load_env().await {
        warning!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Command::Completions(opt) = &cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    let username = match cli.username.as_deref().map(str::trim) {
        Some(username) if !username.is_empty() => username.to_string(),
        _ => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "a trakt username is required, pass --username or set TRAKT_USERNAME",
            )
            .exit(),
    };

    match run(&username, cli.command).await {
        Ok(()) => {}
        Err(e) if e.is_cancelled() => {
            eprintln!("Aborted!");
            process::exit(1);
        }
        Err(e) => {
            error!("{}", e);
            process::exit(1);
        }
    }
}

async fn run(username: &str, command: Command) -> Res<()> {
    let sessions = SessionManager::load(&config::session_file()).await?;
    let client = TraktClient::new(sessions.get_token(username)?)?;
    let mut app = App::new(client, TerminalPrompter::new(), SystemBrowser);

    match command {
        Command::Watch(opt) => {
            let opts = WatchOptions {
                url: opt.url,
                kind: opt.kind,
                at: opt.at.unwrap_or_default(),
                rating: opt.rating,
                letterboxd: opt.letterboxd,
            };
            cli::watch(&mut app, &opts).await
        }
        Command::Rate(opt) => {
            let opts = RateOptions {
                url: opt.url,
                kind: opt.kind,
                rating: opt.rating,
                letterboxd: opt.letterboxd,
            };
            cli::rate(&mut app, &opts).await
        }
        Command::Unwatch(opt) => {
            let opts = UnwatchOptions {
                limit: opt.limit,
                interactive: !opt.non_interactive,
                yes: opt.yes,
            };
            cli::unwatch(&mut app, &opts).await
        }
        Command::Recent(opt) => {
            let opts = RecentOptions {
                limit: opt.limit,
                filter: opt.filter.unwrap_or_default(),
                urls: opt.urls,
            };
            cli::recent(&app.api, &opts).await.map(|_| ())
        }
        Command::Progress(opt) => {
            let opts = ProgressOptions {
                limit: opt.limit,
                at: opt.at.unwrap_or_default(),
                rating: opt.rating,
                letterboxd: opt.letterboxd,
            };
            cli::progress(&mut app, &opts).await
        }
        Command::Completions(_) => Ok(()),
    }
}
