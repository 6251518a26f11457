//! In-memory card store.

use crate::types::Flashcard;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::io;
use std::path::PathBuf;

/// Errors that can occur during store, storage and console operations.
#[derive(Debug)]
pub enum StoreError {
    /// Import source does not exist or cannot be opened.
    FileNotFound(PathBuf),
    /// User input that could not be interpreted.
    InvalidInput(String),
    /// Failure creating, writing or appending to a file.
    Io { path: PathBuf, source: io::Error },
    /// Import source could not be parsed as CSV.
    Malformed { path: PathBuf, message: String },
    /// A random card was requested from an empty store.
    EmptyStore,
    /// Standard input reached end of file.
    InputClosed,
    /// Reading from or writing to the terminal failed.
    Console(io::Error),
}

impl StoreError {
    /// Whether the command loop can report this error and carry on.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, StoreError::InputClosed | StoreError::Console(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::FileNotFound(path) => write!(f, "file not found: {}", path.display()),
            StoreError::InvalidInput(msg) => write!(f, "invalid input: {}", msg),
            StoreError::Io { path, source } => write!(f, "I/O error at {}: {}", path.display(), source),
            StoreError::Malformed { path, message } => {
                write!(f, "malformed card file {}: {}", path.display(), message)
            }
            StoreError::EmptyStore => write!(f, "there are no cards"),
            StoreError::InputClosed => write!(f, "input closed"),
            StoreError::Console(e) => write!(f, "console error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            StoreError::Console(e) => Some(e),
            _ => None,
        }
    }
}

/// The set of flashcards for one session.
///
/// Cards live in a dense vector. Positions are internal: removal moves the
/// last card into the freed slot, so callers only ever address cards by term.
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Vec<Flashcard>,
}

impl CardStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cards.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Whether the store holds no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over all cards in storage order.
    pub fn iter(&self) -> impl Iterator<Item = &Flashcard> {
        self.cards.iter()
    }

    /// Get a card by term.
    pub fn get(&self, term: &str) -> Option<&Flashcard> {
        self.cards.iter().find(|card| card.term == term)
    }

    fn position(&self, term: &str) -> Option<usize> {
        self.cards.iter().position(|card| card.term == term)
    }

    /// Look up the definition of `term`.
    pub fn definition_for(&self, term: &str) -> Option<&str> {
        self.get(term).map(|card| card.definition.as_str())
    }

    /// Look up the term whose definition is `definition`.
    ///
    /// Definitions are unique for cards added interactively, but an imported
    /// file can break that; the alphabetically smallest term wins then.
    pub fn term_for(&self, definition: &str) -> Option<&str> {
        self.cards
            .iter()
            .filter(|card| card.definition == definition)
            .map(|card| card.term.as_str())
            .min()
    }

    /// Whether a card with this term exists.
    pub fn contains_term(&self, term: &str) -> bool {
        self.position(term).is_some()
    }

    /// Whether any card has this definition.
    pub fn contains_definition(&self, definition: &str) -> bool {
        self.cards.iter().any(|card| card.definition == definition)
    }

    /// Insert a card, or replace the card with the same term.
    ///
    /// Replacement is wholesale: the old mistake count is discarded in favour
    /// of the new card's. Returns the replaced card, if any.
    pub fn upsert(&mut self, card: Flashcard) -> Option<Flashcard> {
        match self.position(&card.term) {
            Some(index) => {
                log::debug!("Replacing card {:?}", card.term);
                Some(std::mem::replace(&mut self.cards[index], card))
            }
            None => {
                log::debug!("Adding card {:?}", card.term);
                self.cards.push(card);
                None
            }
        }
    }

    /// Remove the card with this term, returning it.
    pub fn remove(&mut self, term: &str) -> Option<Flashcard> {
        let index = self.position(term)?;
        log::debug!("Removing card {:?}", term);
        Some(self.cards.swap_remove(index))
    }

    /// Pick a card uniformly at random.
    pub fn random<G: Rng + ?Sized>(&self, rng: &mut G) -> Result<&Flashcard, StoreError> {
        self.cards.choose(rng).ok_or(StoreError::EmptyStore)
    }

    /// Add one to the mistake count of `term`. Returns false if there is no such card.
    pub fn record_mistake(&mut self, term: &str) -> bool {
        match self.cards.iter_mut().find(|card| card.term == term) {
            Some(card) => {
                card.mistakes = card.mistakes.saturating_add(1);
                true
            }
            None => false,
        }
    }

    /// Zero every mistake counter.
    pub fn reset_stats(&mut self) {
        for card in &mut self.cards {
            card.mistakes = 0;
        }
    }

    /// Cards sharing the highest mistake count.
    ///
    /// Empty when no card has any mistakes.
    pub fn hardest(&self) -> Vec<&Flashcard> {
        let max = self.cards.iter().map(|card| card.mistakes).max().unwrap_or(0);
        if max == 0 {
            return Vec::new();
        }

        self.cards.iter().filter(|card| card.mistakes == max).collect()
    }
}

impl FromIterator<Flashcard> for CardStore {
    fn from_iter<I: IntoIterator<Item = Flashcard>>(iter: I) -> Self {
        let mut store = CardStore::new();
        for card in iter {
            store.upsert(card);
        }
        store
    }
}
