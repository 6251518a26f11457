//! Core data types for the flashcard store.

use serde::{Deserialize, Serialize};

/// A single term/definition pair with its mistake counter.
///
/// Field order matters: it is the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    /// Prompt side, what the user is asked to define
    pub term: String,

    /// Answer side
    pub definition: String,

    /// Wrong answers since creation or the last stats reset
    #[serde(default)]
    pub mistakes: u32,
}

impl Flashcard {
    /// Create a card with a zero mistake count.
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            definition: definition.into(),
            mistakes: 0,
        }
    }

    /// Set the mistake count.
    pub fn with_mistakes(mut self, mistakes: u32) -> Self {
        self.mistakes = mistakes;
        self
    }
}

/// Outcome of a single quiz round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// The answer is exactly the asked card's definition.
    Correct,

    /// The answer is wrong for the asked card but is the definition of `term`.
    MatchesOther { term: String },

    /// The answer matches no card.
    Wrong,
}

impl Verdict {
    /// Whether this round counts as a mistake.
    pub fn is_mistake(&self) -> bool {
        !matches!(self, Verdict::Correct)
    }

    /// The line shown to the user after answering `card`.
    pub fn feedback(&self, card: &Flashcard) -> String {
        match self {
            Verdict::Correct => "Correct!".to_string(),
            Verdict::MatchesOther { term } => format!(
                "Wrong. The right answer is \"{}\", but your definition is correct for \"{}\".",
                card.definition, term
            ),
            Verdict::Wrong => format!("Wrong. The right answer is \"{}\".", card.definition),
        }
    }
}
