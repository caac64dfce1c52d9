//! Common infrastructure shared by the engine, the image loader and the CLI

mod error;

pub use error::{ChecksumError, ChecksumResult, DiagnosticReporter};
