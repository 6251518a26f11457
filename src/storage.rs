//! CSV persistence for the card store.
//!
//! One record per card, `term,definition,mistakes`, no header row. Fields
//! containing a comma, quote or newline are quoted with embedded quotes doubled.

use crate::store::{CardStore, StoreError};
use crate::types::Flashcard;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Write `cards` as CSV records. Returns the number of records written.
pub fn write_cards<'a, W: Write>(
    cards: impl IntoIterator<Item = &'a Flashcard>,
    writer: W,
) -> io::Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut count = 0;
    for card in cards {
        writer.serialize(card)?;
        count += 1;
    }
    writer.flush()?;

    Ok(count)
}

/// Parse CSV records into cards.
///
/// A missing or non-integer mistakes field counts as zero. Records with fewer
/// than two fields carry no card and are skipped.
pub fn parse_cards<R: Read>(reader: R) -> Result<Vec<Flashcard>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut cards = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = result?;
        let line = index + 1;

        let (Some(term), Some(definition)) = (record.get(0), record.get(1)) else {
            log::warn!("Skipping record {}: expected term and definition", line);
            continue;
        };

        let mistakes = match record.get(2).map(str::trim) {
            Some(raw) => raw.parse::<u32>().unwrap_or_else(|_| {
                log::warn!("Record {}: invalid mistake count {:?}, using 0", line, raw);
                0
            }),
            None => 0,
        };

        cards.push(Flashcard::new(term, definition).with_mistakes(mistakes));
    }

    Ok(cards)
}

/// Extension trait for CSV import/export on CardStore.
pub trait StoreCsvExt {
    /// Write every card to `path`, replacing any existing file.
    fn export_csv(&self, path: &Path) -> Result<usize, StoreError>;

    /// Read cards from `path` and upsert each into the store.
    ///
    /// The whole file is parsed before any card is applied, so a failed
    /// import leaves the store untouched.
    fn import_csv(&mut self, path: &Path) -> Result<usize, StoreError>;
}

impl StoreCsvExt for CardStore {
    fn export_csv(&self, path: &Path) -> Result<usize, StoreError> {
        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let file = File::create(path).map_err(io_error)?;
        let count = write_cards(self.iter(), BufWriter::new(file)).map_err(io_error)?;

        log::info!("Exported {} cards to {}", count, path.display());
        Ok(count)
    }

    fn import_csv(&mut self, path: &Path) -> Result<usize, StoreError> {
        let file = File::open(path).map_err(|e| {
            log::debug!("Failed to open {}: {}", path.display(), e);
            StoreError::FileNotFound(path.to_path_buf())
        })?;

        let cards = parse_cards(BufReader::new(file)).map_err(|e| StoreError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let count = cards.len();
        for card in cards {
            if let Some(previous) = self.upsert(card) {
                log::debug!("Import replaced {:?} ({} mistakes dropped)", previous.term, previous.mistakes);
            }
        }

        log::info!("Imported {} cards from {}", count, path.display());
        Ok(count)
    }
}
