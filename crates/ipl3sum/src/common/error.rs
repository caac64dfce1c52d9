//! Error types and diagnostic reporting

use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};
use std::path::PathBuf;
use thiserror::Error;

use crate::checksum::Checksum;

/// Errors raised around a checksum computation.
///
/// The engine itself cannot fail once it has a word source; everything
/// here happens before it starts (loading, parsing user input) or after
/// it finishes (verification).
#[derive(Error, Debug)]
pub enum ChecksumError {
    #[error("cannot read {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("image is {len} bytes, at least {required} bytes are required")]
    ImageTooSmall { len: usize, required: usize },

    #[error("invalid seed `{input}`: {message}")]
    InvalidSeed { input: String, message: String },

    #[error("invalid checksum `{input}`: {message}")]
    InvalidChecksum { input: String, message: String },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    Mismatch { expected: Checksum, actual: Checksum },
}

impl ChecksumError {
    pub fn open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Open {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_seed(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSeed {
            input: input.into(),
            message: message.into(),
        }
    }

    pub fn invalid_checksum(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidChecksum {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Build the diagnostic shown for this error
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        match self {
            ChecksumError::Open { path, source } => Diagnostic::error()
                .with_message(format!("cannot read {}", path.display()))
                .with_notes(vec![source.to_string()]),

            ChecksumError::ImageTooSmall { len, required } => Diagnostic::error()
                .with_message("image too small")
                .with_notes(vec![
                    format!("image is {} bytes", len),
                    format!("the boot code region ends at {:#x}", required),
                ]),

            ChecksumError::InvalidSeed { input, message } => Diagnostic::error()
                .with_message(format!("invalid seed `{}`", input))
                .with_notes(vec![message.clone()]),

            ChecksumError::InvalidChecksum { input, message } => Diagnostic::error()
                .with_message(format!("invalid checksum `{}`", input))
                .with_notes(vec![message.clone()]),

            ChecksumError::Mismatch { expected, actual } => Diagnostic::error()
                .with_message("checksum mismatch")
                .with_notes(vec![
                    format!("expected: 0x{}", expected),
                    format!("  actual: 0x{}", actual),
                ]),
        }
    }
}

pub type ChecksumResult<T> = Result<T, ChecksumError>;

/// Diagnostic reporter for pretty error and warning output
pub struct DiagnosticReporter {
    files: SimpleFiles<String, String>,
    writer: StandardStream,
    config: term::Config,
}

impl DiagnosticReporter {
    pub fn new() -> Self {
        Self {
            files: SimpleFiles::new(),
            writer: StandardStream::stderr(ColorChoice::Auto),
            config: term::Config::default(),
        }
    }

    pub fn report_error(&self, error: &ChecksumError) {
        self.emit(&error.to_diagnostic());
    }

    pub fn report_warning(&self, message: impl Into<String>, notes: Vec<String>) {
        self.emit(&Diagnostic::warning().with_message(message).with_notes(notes));
    }

    fn emit(&self, diagnostic: &Diagnostic<usize>) {
        let _ = term::emit(&mut self.writer.lock(), &self.config, &self.files, diagnostic);
    }
}

impl Default for DiagnosticReporter {
    fn default() -> Self {
        Self::new()
    }
}
