//! Shared test infrastructure for flashcards integration tests.
//!
//! Provides TestEnv helper for consistent test setup/teardown.

#![allow(dead_code)]

use flashcards::{CardStore, Flashcard, Session, SessionConfig};
use rand::RngCore;
use std::io::Cursor;
use std::path::PathBuf;
use tempfile::TempDir;

/// Test environment with automatic cleanup.
pub struct TestEnv {
    pub temp_dir: TempDir,
    pub store: CardStore,
}

impl TestEnv {
    /// Create a new test environment with an empty store.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            temp_dir,
            store: CardStore::new(),
        }
    }

    /// Create a test environment holding the cat/dog pair.
    pub fn with_animals() -> Self {
        let mut env = Self::new();
        env.add_card("cat", "a small domesticated feline");
        env.add_card("dog", "a domesticated canine");
        env
    }

    /// Add a card with no mistakes.
    pub fn add_card(&mut self, term: &str, definition: &str) -> Flashcard {
        let card = Flashcard::new(term, definition);
        self.store.upsert(card.clone());
        card
    }

    /// Add a card with a given mistake count.
    pub fn add_card_with_mistakes(&mut self, term: &str, definition: &str, mistakes: u32) -> Flashcard {
        let card = Flashcard::new(term, definition).with_mistakes(mistakes);
        self.store.upsert(card.clone());
        card
    }

    /// Path of a file inside the temp directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write raw content to a file inside the temp directory.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        std::fs::write(&path, content).expect("Failed to write file");
        path
    }

    /// Read a file inside the temp directory.
    pub fn read_file(&self, name: &str) -> String {
        std::fs::read_to_string(self.path(name)).expect("Failed to read file")
    }

    /// Sorted (term, definition, mistakes) triples of the store.
    pub fn triples(&self) -> Vec<(String, String, u32)> {
        triples(&self.store)
    }

    /// Run a scripted session over this environment's store.
    ///
    /// Returns the store after the session and everything printed.
    pub fn run_session(&self, config: SessionConfig, input: &str) -> (CardStore, String) {
        let session = Session::new(config.seed(7), Cursor::new(input.to_string()), Vec::new())
            .with_store(self.store.clone());
        finish(session)
    }

    /// Run a scripted session where every quiz round asks the first card.
    pub fn run_session_first_card(&self, config: SessionConfig, input: &str) -> (CardStore, String) {
        let session = Session::new(config, Cursor::new(input.to_string()), Vec::new())
            .with_store(self.store.clone())
            .with_rng(FirstCardRng);
        finish(session)
    }

    /// Assert that a term is present with the given mistake count.
    pub fn assert_mistakes(store: &CardStore, term: &str, expected: u32) {
        let card = store
            .get(term)
            .unwrap_or_else(|| panic!("Expected card {:?} to exist", term));
        assert_eq!(
            card.mistakes, expected,
            "Expected {:?} to have {} mistakes, found {}",
            term, expected, card.mistakes
        );
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn finish(mut session: Session<Cursor<String>, Vec<u8>>) -> (CardStore, String) {
    session.run().expect("Session failed");

    let (store, out, _) = session.into_parts();
    (store, String::from_utf8(out).expect("Output is not UTF-8"))
}

/// Card picker that always draws the first card in the store.
pub struct FirstCardRng;

impl RngCore for FirstCardRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(0);
    }
}

/// Sorted (term, definition, mistakes) triples of a store.
pub fn triples(store: &CardStore) -> Vec<(String, String, u32)> {
    let mut out: Vec<_> = store
        .iter()
        .map(|c| (c.term.clone(), c.definition.clone(), c.mistakes))
        .collect();
    out.sort();
    out
}
