//! Flashcards: a terminal flashcard trainer.
//!
//! Cards are term/definition pairs held in a [`CardStore`]. A [`Session`]
//! drives the interactive command loop, quizzes the user, counts mistakes per
//! card and moves the store to and from CSV files.
//!
//! # Example
//!
//! ```
//! use flashcards::{CardStore, Flashcard, StoreCsvExt};
//!
//! let mut store = CardStore::new();
//! store.upsert(Flashcard::new("cat", "a small domesticated feline"));
//! store.upsert(Flashcard::new("dog", "a domesticated canine"));
//!
//! store.record_mistake("dog");
//! assert_eq!(store.hardest()[0].term, "dog");
//!
//! let dir = std::env::temp_dir().join("flashcards-doc-example");
//! std::fs::create_dir_all(&dir).unwrap();
//! let path = dir.join("cards.csv");
//! assert_eq!(store.export_csv(&path).unwrap(), 2);
//!
//! let mut restored = CardStore::new();
//! assert_eq!(restored.import_csv(&path).unwrap(), 2);
//! assert_eq!(restored.get("dog").unwrap().mistakes, 1);
//! ```

mod store;
mod types;

pub mod quiz;
pub mod session;
pub mod storage;
pub mod transcript;

// Re-export public API
pub use quiz::{Quiz, QuizSummary, grade, parse_rounds};
pub use session::{ACTION_PROMPT, Action, Flow, Session, SessionConfig};
pub use storage::StoreCsvExt;
pub use store::{CardStore, StoreError};
pub use transcript::{Console, Transcript};
pub use types::{Flashcard, Verdict};
