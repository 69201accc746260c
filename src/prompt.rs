//! Interactive prompts.
//!
//! Handlers never read the terminal directly; they go through [`Prompter`] so
//! tests can script the answers.

use dialoguer::{Confirm, Input, console::Term};

use crate::{Error, Res, error, types::Rating};

pub trait Prompter {
    /// Asks for a line of text. An empty answer yields `default` when given.
    fn input(&mut self, question: &str, default: Option<&str>) -> Res<String>;

    /// Asks a yes/no question.
    fn confirm(&mut self, question: &str, default: bool) -> Res<bool>;
}

/// Prompts on stderr so stdout stays clean for output.
pub struct TerminalPrompter {
    term: Term,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        TerminalPrompter {
            term: Term::stderr(),
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, question: &str, default: Option<&str>) -> Res<String> {
        let mut input = Input::<String>::new()
            .with_prompt(question)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text_on(&self.term)?)
    }

    fn confirm(&mut self, question: &str, default: bool) -> Res<bool> {
        Ok(Confirm::new()
            .with_prompt(question)
            .default(default)
            .interact_on(&self.term)?)
    }
}

/// Answer to a "pick one of N" question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pick {
    /// 1-based index into the displayed list.
    Index(usize),
    ToggleUrls,
}

/// Interprets an answer to a numbered menu with `count` entries.
///
/// Empty input picks the first entry, `q` or `n` cancels, `u` toggles URLs.
pub fn parse_pick(answer: &str, count: usize) -> Res<Pick> {
    let answer = answer.trim();
    match answer {
        "" => {}
        "q" | "n" => return Err(Error::Cancelled),
        "u" => return Ok(Pick::ToggleUrls),
        _ => {}
    }

    let choice = if answer.is_empty() {
        1
    } else {
        answer
            .parse::<usize>()
            .map_err(|_| Error::validation(format!("Could not parse '{}' into a number", answer)))?
    };

    if choice < 1 || choice > count {
        return Err(Error::validation(format!(
            "Invalid choice, must be 1-{}",
            count
        )));
    }
    Ok(Pick::Index(choice))
}

/// Shows a numbered list and asks until a valid entry is picked.
///
/// `render` prints the list and receives whether URLs should be shown.
/// Returns the 0-based index of the picked entry. Fails with
/// [`Error::NotFound`] without asking anything when the list is empty.
pub fn pick_one<P, F>(prompter: &mut P, question: &str, count: usize, mut render: F) -> Res<usize>
where
    P: Prompter + ?Sized,
    F: FnMut(bool),
{
    if count == 0 {
        return Err(Error::not_found("nothing to choose from"));
    }

    let mut show_urls = false;
    loop {
        render(show_urls);
        let answer = prompter.input(question, Some("1"))?;
        match parse_pick(&answer, count) {
            Ok(Pick::Index(choice)) => return Ok(choice - 1),
            Ok(Pick::ToggleUrls) => show_urls = !show_urls,
            Err(Error::Validation(message)) => error!("{}", message),
            Err(e) => return Err(e),
        }
    }
}

/// Asks for a rating until the answer is an integer in range.
pub fn ask_rating<P: Prompter + ?Sized>(prompter: &mut P) -> Res<Rating> {
    loop {
        let answer = prompter.input("Rating", None)?;
        match answer.parse::<Rating>() {
            Ok(rating) => return Ok(rating),
            Err(Error::Validation(message)) => error!("{}", message),
            Err(e) => return Err(e),
        }
    }
}

/// Asks for a non-negative number until one is given.
pub fn ask_number<P: Prompter + ?Sized>(prompter: &mut P, question: &str) -> Res<u32> {
    loop {
        let answer = prompter.input(question, None)?;
        match answer.trim().parse::<u32>() {
            Ok(value) => return Ok(value),
            Err(_) => error!("Could not parse '{}' into a number", answer.trim()),
        }
    }
}
