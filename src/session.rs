//! Interactive study session: command loop over one card store.

use crate::quiz::{Quiz, parse_rounds};
use crate::storage::StoreCsvExt;
use crate::store::{CardStore, StoreError};
use crate::transcript::{Console, Transcript};
use crate::types::Flashcard;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

/// Prompt shown before every command.
pub const ACTION_PROMPT: &str =
    "Input the action (add, remove, import, export, ask, exit, log, hardest card, reset stats):";

/// Startup options for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Cards to load before the first prompt
    pub import_from: Option<PathBuf>,

    /// Where to save the cards when the session ends
    pub export_to: Option<PathBuf>,

    /// Seed for the card picker; OS entropy when unset
    pub seed: Option<u64>,
}

impl SessionConfig {
    /// Create config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the startup import file. An empty path means none.
    pub fn import_from(mut self, path: impl Into<PathBuf>) -> Self {
        self.import_from = non_empty(path.into());
        self
    }

    /// Set the exit export file. An empty path means none.
    pub fn export_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.export_to = non_empty(path.into());
        self
    }

    /// Seed the card picker.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

fn non_empty(path: PathBuf) -> Option<PathBuf> {
    if path.as_os_str().is_empty() { None } else { Some(path) }
}

/// A user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Add,
    Remove,
    Import,
    Export,
    Ask,
    Log,
    HardestCard,
    ResetStats,
    Exit,
    Unknown(String),
}

impl Action {
    /// Parse a command line. Matching is exact and case-sensitive.
    pub fn parse(line: &str) -> Self {
        match line {
            "add" => Action::Add,
            "remove" => Action::Remove,
            "import" => Action::Import,
            "export" => Action::Export,
            "ask" => Action::Ask,
            "log" => Action::Log,
            "hardest card" => Action::HardestCard,
            "reset stats" => Action::ResetStats,
            "exit" => Action::Exit,
            other => Action::Unknown(other.to_string()),
        }
    }
}

/// Whether the command loop keeps going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// One study session: the store, the console and the startup options.
pub struct Session<R, W> {
    config: SessionConfig,
    store: CardStore,
    console: Console<R, W>,
    rng: Box<dyn RngCore>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    /// Create a session with an empty store.
    pub fn new(config: SessionConfig, reader: R, writer: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self {
            config,
            store: CardStore::new(),
            console: Console::new(reader, writer),
            rng: Box::new(rng),
        }
    }

    /// Start from an existing store.
    pub fn with_store(mut self, store: CardStore) -> Self {
        self.store = store;
        self
    }

    /// Replace the card picker.
    pub fn with_rng(mut self, rng: impl RngCore + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn store(&self) -> &CardStore {
        &self.store
    }

    pub fn transcript(&self) -> &Transcript {
        self.console.transcript()
    }

    /// Consume the session, returning the store, the output sink and the transcript.
    pub fn into_parts(self) -> (CardStore, W, Transcript) {
        let (writer, transcript) = self.console.into_parts();
        (self.store, writer, transcript)
    }

    /// Run the command loop until `exit` or end of input.
    ///
    /// Only console failures are returned; everything else is reported to the
    /// user and the loop continues.
    pub fn run(&mut self) -> Result<(), StoreError> {
        if let Some(path) = self.config.import_from.clone() {
            let result = self.load(&path);
            self.recover(result)?;
        }

        loop {
            let line = match self.console.ask(ACTION_PROMPT) {
                Ok(line) => line,
                Err(StoreError::InputClosed) => {
                    log::info!("Input closed, ending session");
                    break;
                }
                Err(e) => return Err(e),
            };

            let flow = match self.execute(Action::parse(&line)) {
                Ok(flow) => flow,
                Err(StoreError::InputClosed) => Flow::Exit,
                Err(e) => {
                    self.recover(Err(e))?;
                    Flow::Continue
                }
            };

            self.console.say("")?;
            if flow == Flow::Exit {
                break;
            }
        }

        if let Some(path) = self.config.export_to.clone() {
            let result = self.save(&path);
            self.recover(result)?;
        }

        self.console.say("Bye bye!")
    }

    /// Perform one action.
    pub fn execute(&mut self, action: Action) -> Result<Flow, StoreError> {
        log::debug!("Action: {:?}", action);

        match action {
            Action::Add => self.add()?,
            Action::Remove => self.remove()?,
            Action::Import => {
                let path = self.console.ask("File name:")?;
                self.load(Path::new(&path))?;
            }
            Action::Export => {
                let path = self.console.ask("File name:")?;
                self.save(Path::new(&path))?;
            }
            Action::Ask => self.ask()?,
            Action::Log => self.dump_log()?,
            Action::HardestCard => self.hardest_card()?,
            Action::ResetStats => {
                self.store.reset_stats();
                self.console.say("Card statistics have been reset.")?;
            }
            Action::Exit => return Ok(Flow::Exit),
            Action::Unknown(_) => self.console.say("Unknown command!")?,
        }

        Ok(Flow::Continue)
    }

    /// Report a recoverable error to the user; pass anything else through.
    fn recover(&mut self, result: Result<(), StoreError>) -> Result<(), StoreError> {
        let Err(e) = result else {
            return Ok(());
        };
        if !e.is_recoverable() {
            return Err(e);
        }

        log::warn!("{}", e);
        let message = match &e {
            StoreError::FileNotFound(_) => "File not found.".to_string(),
            StoreError::EmptyStore => "There are no cards to ask about.".to_string(),
            other => format!("Error: {}.", other),
        };
        self.console.say(message)
    }

    fn add(&mut self) -> Result<(), StoreError> {
        let mut term = self.console.ask("The card:")?;
        while self.store.contains_term(&term) {
            term = self
                .console
                .ask(format!("The card \"{}\" already exists. Try again:", term))?;
        }

        let mut definition = self.console.ask("The definition of the card:")?;
        while self.store.contains_definition(&definition) {
            definition = self
                .console
                .ask(format!("The definition \"{}\" already exists. Try again:", definition))?;
        }

        let message = format!("The pair (\"{}\":\"{}\") has been added.", term, definition);
        self.store.upsert(Flashcard::new(term, definition));
        self.console.say(message)
    }

    fn remove(&mut self) -> Result<(), StoreError> {
        let term = self.console.ask("Which card?")?;
        match self.store.remove(&term) {
            Some(_) => self.console.say("The card has been removed."),
            None => self
                .console
                .say(format!("Can't remove \"{}\": there is no such card.", term)),
        }
    }

    fn load(&mut self, path: &Path) -> Result<(), StoreError> {
        let count = self.store.import_csv(path)?;
        self.console.say(format!("{} cards have been loaded.", count))
    }

    fn save(&mut self, path: &Path) -> Result<(), StoreError> {
        let count = self.store.export_csv(path)?;
        self.console.say(format!("{} cards have been saved.", count))
    }

    fn ask(&mut self) -> Result<(), StoreError> {
        let reply = self.console.ask("How many times to ask?")?;
        let rounds = parse_rounds(&reply)?;
        Quiz::new(&mut self.store, &mut *self.rng).run(&mut self.console, rounds)?;
        Ok(())
    }

    fn dump_log(&mut self) -> Result<(), StoreError> {
        let path = self.console.ask("File name:")?;
        self.console.transcript().append_to(Path::new(&path))?;
        self.console.say("The log has been saved.")
    }

    fn hardest_card(&mut self) -> Result<(), StoreError> {
        let hardest = self.store.hardest();
        let message = match hardest.as_slice() {
            [] => "There are no cards with errors.".to_string(),
            [card] => format!(
                "The hardest card is \"{}\". You have {} errors answering it.",
                card.term, card.mistakes
            ),
            cards => {
                let terms: Vec<String> = cards.iter().map(|card| format!("\"{}\"", card.term)).collect();
                format!(
                    "The hardest cards are {}. You have {} errors answering them.",
                    terms.join(", "),
                    cards[0].mistakes
                )
            }
        };
        self.console.say(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn scripted(input: &str) -> Session<Cursor<String>, Vec<u8>> {
        Session::new(SessionConfig::new().seed(42), Cursor::new(input.to_string()), Vec::new())
    }

    #[test]
    fn test_action_parse() {
        assert_eq!(Action::parse("add"), Action::Add);
        assert_eq!(Action::parse("hardest card"), Action::HardestCard);
        assert_eq!(Action::parse("reset stats"), Action::ResetStats);
        assert_eq!(Action::parse("exit"), Action::Exit);
        assert_eq!(Action::parse("Exit"), Action::Unknown("Exit".to_string()));
        assert_eq!(Action::parse(" add"), Action::Unknown(" add".to_string()));
    }

    #[test]
    fn test_config_empty_paths_are_unset() {
        let config = SessionConfig::new().import_from("").export_to("out.csv");
        assert_eq!(config.import_from, None);
        assert_eq!(config.export_to, Some(PathBuf::from("out.csv")));
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let store: CardStore = [Flashcard::new("cat", "feline")].into_iter().collect();
        let mut session = scripted("cat\ndog\nfeline\ncanine\n").with_store(store);

        assert_eq!(session.execute(Action::Add).unwrap(), Flow::Continue);
        assert_eq!(session.store().definition_for("dog"), Some("canine"));

        let (_, out, _) = session.into_parts();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The card:\n\
             The card \"cat\" already exists. Try again:\n\
             The definition of the card:\n\
             The definition \"feline\" already exists. Try again:\n\
             The pair (\"dog\":\"canine\") has been added.\n"
        );
    }

    #[test]
    fn test_remove_missing_card() {
        let mut session = scripted("cow\n");

        session.execute(Action::Remove).unwrap();

        assert!(
            session
                .transcript()
                .as_str()
                .ends_with("Can't remove \"cow\": there is no such card.\n")
        );
    }

    #[test]
    fn test_hardest_card_messages() {
        let store: CardStore = [
            Flashcard::new("a", "1").with_mistakes(2),
            Flashcard::new("b", "2").with_mistakes(5),
            Flashcard::new("c", "3").with_mistakes(5),
        ]
        .into_iter()
        .collect();
        let mut session = scripted("").with_store(store);

        session.execute(Action::HardestCard).unwrap();
        assert_eq!(
            session.transcript().as_str(),
            "The hardest cards are \"b\", \"c\". You have 5 errors answering them.\n"
        );

        session.execute(Action::ResetStats).unwrap();
        session.execute(Action::HardestCard).unwrap();
        assert!(
            session
                .transcript()
                .as_str()
                .ends_with("Card statistics have been reset.\nThere are no cards with errors.\n")
        );
    }

    #[test]
    fn test_single_hardest_card_message() {
        let store: CardStore = [Flashcard::new("a", "1").with_mistakes(1), Flashcard::new("b", "2")]
            .into_iter()
            .collect();
        let mut session = scripted("").with_store(store);

        session.execute(Action::HardestCard).unwrap();

        assert_eq!(
            session.transcript().as_str(),
            "The hardest card is \"a\". You have 1 errors answering it.\n"
        );
    }

    #[test]
    fn test_ask_invalid_count_is_returned() {
        let mut session = scripted("many\n");

        let result = session.execute(Action::Ask);

        assert!(matches!(result, Err(StoreError::InvalidInput(_))));
    }

    #[test]
    fn test_unknown_command() {
        let mut session = scripted("");
        session.execute(Action::parse("fly")).unwrap();
        assert_eq!(session.transcript().as_str(), "Unknown command!\n");
    }

    #[test]
    fn test_exit_flow() {
        let mut session = scripted("");
        assert_eq!(session.execute(Action::Exit).unwrap(), Flow::Exit);
    }
}
