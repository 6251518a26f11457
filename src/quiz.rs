//! Quiz rounds against the card store.

use crate::store::{CardStore, StoreError};
use crate::transcript::Console;
use crate::types::{Flashcard, Verdict};
use rand::Rng;
use std::io::{BufRead, Write};

/// Parse the number of rounds to ask.
pub fn parse_rounds(input: &str) -> Result<usize, StoreError> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| StoreError::InvalidInput(format!("\"{}\" is not a number of rounds", trimmed)))
}

/// Judge `answer` for the asked `card`.
pub fn grade(store: &CardStore, card: &Flashcard, answer: &str) -> Verdict {
    if answer == card.definition {
        return Verdict::Correct;
    }

    match store.term_for(answer) {
        Some(term) => Verdict::MatchesOther { term: term.to_string() },
        None => Verdict::Wrong,
    }
}

/// Tally of one quiz run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuizSummary {
    /// Rounds played.
    pub asked: usize,
    /// Rounds answered correctly.
    pub correct: usize,
}

impl QuizSummary {
    pub fn wrong(&self) -> usize {
        self.asked - self.correct
    }
}

/// A quiz over a store, drawing cards with `rng`.
pub struct Quiz<'a, G: ?Sized> {
    store: &'a mut CardStore,
    rng: &'a mut G,
}

impl<'a, G: Rng + ?Sized> Quiz<'a, G> {
    pub fn new(store: &'a mut CardStore, rng: &'a mut G) -> Self {
        Self { store, rng }
    }

    /// Ask `rounds` random cards through `console`.
    ///
    /// Every wrong answer adds a mistake to the asked card. Fails up front with
    /// [`StoreError::EmptyStore`] if there is nothing to ask.
    pub fn run<R: BufRead, W: Write>(
        &mut self,
        console: &mut Console<R, W>,
        rounds: usize,
    ) -> Result<QuizSummary, StoreError> {
        if rounds > 0 && self.store.is_empty() {
            return Err(StoreError::EmptyStore);
        }

        let mut summary = QuizSummary::default();
        for _ in 0..rounds {
            let card = self.store.random(&mut *self.rng)?.clone();
            let answer = console.ask(format!("Print the definition of \"{}\":", card.term))?;

            let verdict = grade(&*self.store, &card, &answer);
            if verdict.is_mistake() {
                self.store.record_mistake(&card.term);
            } else {
                summary.correct += 1;
            }
            summary.asked += 1;

            log::debug!("Asked {:?}: {:?}", card.term, verdict);
            console.say(verdict.feedback(&card))?;
        }

        log::info!("Quiz finished: {}/{} correct", summary.correct, summary.asked);
        Ok(summary)
    }
}
