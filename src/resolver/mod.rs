//! Alias resolution: turn free-form user text into one confirmed canonical key.
//!
//! A [`Resolver`] owns an [`AliasLookup`] built from a [`Catalog`] and runs a two-state loop:
//!
//! - **awaiting input**: read a line. `options` lists every key with its aliases. Empty input
//!   just re-prompts. Anything else is normalized, optionally truncated to `trim` characters and
//!   looked up. A miss prints `Unable to find a match. Please try again.` before the next
//!   prompt.
//! - **awaiting confirmation**: ask `[y/n]` until the answer starts with `y` (accept and return)
//!   or `n` (back to awaiting input, without the miss notice).
//!
//! ```rust
//! use std::io::Cursor;
//!
//! use bikeshare_explorer::console::Console;
//! use bikeshare_explorer::resolver::{resolve, Catalog};
//!
//! let mut console = Console::new(Cursor::new(b"Mon\ny\n".to_vec()), Vec::new());
//! let day = resolve(&mut console, "Which day? ", &Catalog::days(), 3).unwrap();
//! assert_eq!(day, "Monday");
//! ```

pub mod catalog;
pub mod lookup;

use std::io::{BufRead, Write};

use crate::console::{Console, YesNo};
use crate::error::ExplorerResult;

pub use catalog::{Catalog, CatalogEntry, Catalogs, ALL_DAYS, ALL_MONTHS};
pub use lookup::{build_lookup, normalize, truncate, AliasLookup};

/// Reserved input that lists the accepted values instead of matching.
pub const OPTIONS_TOKEN: &str = "options";
/// Printed before re-prompting after a failed match.
pub const NO_MATCH_NOTICE: &str = "Unable to find a match. Please try again.";

/// How one line of input was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMatch<'a> {
    /// The reserved `options` token.
    Options,
    /// Blank input.
    Empty,
    /// A canonical key matched by alias.
    Candidate(&'a str),
    /// Nothing matched.
    NoMatch,
}

/// Outcome of the confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The user answered yes.
    Accepted,
    /// The user answered no.
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    AwaitingInput { attempted: bool },
    AwaitingConfirmation { candidate: String },
}

/// Interactive resolver for one catalog.
#[derive(Debug, Clone)]
pub struct Resolver<'c> {
    catalog: &'c Catalog,
    lookup: AliasLookup,
    trim: usize,
}

impl<'c> Resolver<'c> {
    /// Build a resolver; `trim > 0` matches only the first `trim` characters of longer input.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExplorerError::DuplicateAlias`] if the catalog is ambiguous.
    pub fn new(catalog: &'c Catalog, trim: usize) -> ExplorerResult<Self> {
        Ok(Self {
            catalog,
            lookup: build_lookup(catalog)?,
            trim,
        })
    }

    /// Classify one raw line without any I/O.
    pub fn match_input(&self, raw: &str) -> InputMatch<'_> {
        let normalized = normalize(raw);
        if normalized == OPTIONS_TOKEN {
            return InputMatch::Options;
        }
        if normalized.is_empty() {
            return InputMatch::Empty;
        }
        match self.lookup.get(truncate(&normalized, self.trim)) {
            Some(key) => InputMatch::Candidate(key),
            None => InputMatch::NoMatch,
        }
    }

    /// Prompt until the user confirms a canonical key.
    ///
    /// # Errors
    ///
    /// Only I/O failures and closed input; bad answers are re-prompted.
    pub fn resolve<R: BufRead, W: Write>(
        &self,
        console: &mut Console<R, W>,
        prompt: &str,
    ) -> ExplorerResult<String> {
        let mut state = State::AwaitingInput { attempted: false };
        loop {
            state = match state {
                State::AwaitingInput { attempted } => {
                    if attempted {
                        console.say(NO_MATCH_NOTICE)?;
                    }
                    let raw = console.ask(prompt)?;
                    match self.match_input(&raw) {
                        InputMatch::Options => {
                            self.print_options(console)?;
                            State::AwaitingInput { attempted: false }
                        }
                        InputMatch::Empty => State::AwaitingInput { attempted: false },
                        InputMatch::NoMatch => {
                            log::debug!("no {} alias matches {raw:?}", self.catalog.name());
                            State::AwaitingInput { attempted: true }
                        }
                        InputMatch::Candidate(key) => State::AwaitingConfirmation {
                            candidate: key.to_owned(),
                        },
                    }
                }
                State::AwaitingConfirmation { candidate } => {
                    match confirm_selection(console, &candidate)? {
                        Confirmation::Accepted => {
                            log::debug!("resolved {} to {candidate:?}", self.catalog.name());
                            return Ok(candidate);
                        }
                        Confirmation::Rejected => State::AwaitingInput { attempted: false },
                    }
                }
            };
        }
    }

    /// Print `<key>: <key>, <alias>, ...` for every entry, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ExplorerError::Io`] if the output cannot be written.
    pub fn print_options<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> ExplorerResult<()> {
        for entry in self.catalog.entries() {
            console.say(format_args!(
                "{key}: {key}, {aliases}",
                key = entry.key,
                aliases = entry.aliases.join(", ")
            ))?;
        }
        Ok(())
    }
}

/// Ask the user to confirm `candidate`, repeating on answers that are neither yes nor no.
///
/// # Errors
///
/// Only I/O failures and closed input.
pub fn confirm_selection<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    candidate: &str,
) -> ExplorerResult<Confirmation> {
    let prompt = format!("Please confirm you would like to select '{candidate}' [y/n]: ");
    Ok(match console.ask_yes_no(&prompt)? {
        YesNo::Yes => Confirmation::Accepted,
        YesNo::No => Confirmation::Rejected,
    })
}

/// Resolve one answer against `catalog` with a freshly built lookup.
///
/// # Errors
///
/// [`crate::ExplorerError::DuplicateAlias`] for an ambiguous catalog; otherwise only I/O
/// failures and closed input.
pub fn resolve<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    prompt: &str,
    catalog: &Catalog,
    trim: usize,
) -> ExplorerResult<String> {
    Resolver::new(catalog, trim)?.resolve(console, prompt)
}
