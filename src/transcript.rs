//! Session transcript and the console wrapper that feeds it.
//!
//! Every line written to or read from the user passes through [`Console`],
//! which mirrors it into a [`Transcript`]. Command handlers never log
//! explicitly.

use crate::store::StoreError;
use std::fs::OpenOptions;
use std::io::{BufRead, Write};
use std::path::Path;

/// Verbatim record of a session's dialogue.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    buffer: String,
}

impl Transcript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one line; a trailing newline is added.
    pub fn record(&mut self, line: &str) {
        self.buffer.push_str(line);
        self.buffer.push('\n');
    }

    /// The full transcript text.
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    /// Number of recorded lines.
    pub fn line_count(&self) -> usize {
        self.buffer.matches('\n').count()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Append the transcript to `path`, creating the file if needed.
    ///
    /// Existing content is kept. Returns the number of bytes written.
    pub fn append_to(&self, path: &Path) -> Result<usize, StoreError> {
        let io_error = |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(io_error)?;
        file.write_all(self.buffer.as_bytes()).map_err(io_error)?;
        file.flush().map_err(io_error)?;

        log::info!("Appended {} transcript bytes to {}", self.buffer.len(), path.display());
        Ok(self.buffer.len())
    }
}

/// Line-oriented user I/O that records everything into a transcript.
pub struct Console<R, W> {
    reader: R,
    writer: W,
    transcript: Transcript,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            transcript: Transcript::new(),
        }
    }

    /// Print one line to the user.
    pub fn say(&mut self, line: impl AsRef<str>) -> Result<(), StoreError> {
        let line = line.as_ref();
        writeln!(self.writer, "{}", line).map_err(StoreError::Console)?;
        self.writer.flush().map_err(StoreError::Console)?;
        self.transcript.record(line);
        Ok(())
    }

    /// Read one line from the user, without its line terminator.
    ///
    /// Returns [`StoreError::InputClosed`] at end of input.
    pub fn read_line(&mut self) -> Result<String, StoreError> {
        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(StoreError::Console)?;
        if read == 0 {
            return Err(StoreError::InputClosed);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }

        self.transcript.record(&line);
        Ok(line)
    }

    /// Print a prompt and read the reply.
    pub fn ask(&mut self, prompt: impl AsRef<str>) -> Result<String, StoreError> {
        self.say(prompt)?;
        self.read_line()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Consume the console, returning the output sink and the transcript.
    pub fn into_parts(self) -> (W, Transcript) {
        (self.writer, self.transcript)
    }
}
