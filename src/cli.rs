//! CLI argument parsing for the flashcards trainer.

use clap::Parser;
use flashcards::SessionConfig;

#[derive(Parser, Debug)]
#[command(
    name = "flashcards",
    about = "Learn term/definition pairs from the terminal",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/flashcards/logs/flashcards.log"
)]
pub struct Cli {
    /// Import cards from this CSV file before the first prompt
    #[arg(long = "import_from", visible_alias = "import-from", value_name = "FILE")]
    pub import_from: Option<String>,

    /// Export cards to this CSV file when the session ends
    #[arg(long = "export_to", visible_alias = "export-to", value_name = "FILE")]
    pub export_to: Option<String>,

    /// Seed for picking quiz cards (repeatable sessions)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Cli {
    /// Build the session configuration from the parsed flags.
    pub fn session_config(&self) -> SessionConfig {
        let mut config = SessionConfig::new();
        if let Some(path) = &self.import_from {
            config = config.import_from(path);
        }
        if let Some(path) = &self.export_to {
            config = config.export_to(path);
        }
        if let Some(seed) = self.seed {
            config = config.seed(seed);
        }
        config
    }
}
