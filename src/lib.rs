//! trakt.tv watch tracker CLI library
//!
//! This library wraps the parts of the trakt.tv API needed to mark movies and
//! episodes as watched from the terminal: searching, adding to and removing
//! from history, rating, and finding the next episode of a show. The session
//! token is produced by an external authentication tool and only read here.
//!
//! # Modules
//!
//! - `browser` - Opening related pages in the user's browser
//! - `cli` - Command handlers behind each subcommand
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy
//! - `logging` - Diagnostic logging setup
//! - `management` - Session loading
//! - `prompt` - Interactive prompts and the selection protocol
//! - `resolver` - Turning URLs and search terms into media references
//! - `trakt` - trakt.tv API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Parsing and formatting helpers

pub mod browser;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod management;
pub mod prompt;
pub mod resolver;
pub mod trakt;
pub mod types;
pub mod utils;

pub use error::Error;

/// Result type used throughout the crate.
pub type Res<T> = std::result::Result<T, Error>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Removing {}...", entry);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark to stderr.
///
/// Unlike a panic this does not stop the program; callers decide whether the
/// failure is fatal.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
