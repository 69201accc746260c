use chrono::Local;
use colored::Colorize;

use crate::{
    types::{HistoryEntry, SyncCounts, SyncSummary},
    utils,
};

fn print_counts(counts: &SyncCounts) {
    if counts.movies > 0 {
        println!("Movies: {}", counts.movies);
    }
    if counts.shows > 0 {
        println!("Shows: {}", counts.shows);
    }
    if counts.seasons > 0 {
        println!("Seasons: {}", counts.seasons);
    }
    if counts.episodes > 0 {
        println!("Episodes: {}", counts.episodes);
    }
}

/// Prints what a sync endpoint added or removed, and what trakt could not
/// match.
pub fn print_sync_summary(summary: &SyncSummary, rating: bool) {
    let changed = match (&summary.added, &summary.deleted) {
        (Some(added), _) => Some(("Added", added)),
        (None, Some(deleted)) => Some(("Removed", deleted)),
        (None, None) => None,
    };

    if let Some((label, counts)) = changed {
        if counts.total() > 0 {
            let title = if rating {
                format!("{} rating:", label)
            } else {
                format!("{}:", label)
            };
            println!("{}", title.green().bold());
            print_counts(counts);
        }
    }

    let not_found = summary.not_found_lines();
    if !not_found.is_empty() {
        eprintln!("{}", "Not found:".red().bold());
        for line in not_found {
            eprintln!("{}", line);
        }
    }

    println!();
}

/// Prints a numbered history list in local time.
pub fn print_history(entries: &[HistoryEntry], include_id: bool, print_urls: bool) {
    println!("{}", "Recent history:".bold());
    for (i, entry) in entries.iter().enumerate() {
        println!(
            "{}: {}",
            i + 1,
            utils::format_history_entry(entry, &Local, include_id, print_urls)
        );
    }
}
