use std::path::PathBuf;

/// Errors produced when verifying recorded request history.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum VerifyError {
  /// History was read before any request was recorded
  EmptyHistory,
}

impl std::fmt::Display for VerifyError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      VerifyError::EmptyHistory => {
        write!(f, "No requests have been recorded for this stub")
      }
    }
  }
}

impl std::error::Error for VerifyError {}

/// Errors reported by the file-read collaborator when resolving a
/// file-backed response body.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum FileReadError {
  /// The file does not exist
  NotFound(PathBuf),

  /// The requested byte range cannot be satisfied
  InvalidRange {
    /// File the range was requested from
    path: PathBuf,
    /// First byte of the requested range
    from: u64,
    /// Last byte of the requested range, inclusive
    to: u64,
  },

  /// Any other I/O failure while reading the file
  Io(PathBuf, std::io::ErrorKind),
}

impl std::fmt::Display for FileReadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      FileReadError::NotFound(path) => {
        write!(f, "Response file not found: {}", path.display())
      }
      FileReadError::InvalidRange { path, from, to } => {
        write!(
          f,
          "Invalid byte range {}-{} for file: {}",
          from,
          to,
          path.display()
        )
      }
      FileReadError::Io(path, kind) => {
        write!(f, "Failed to read response file {}: {}", path.display(), kind)
      }
    }
  }
}

impl std::error::Error for FileReadError {}

/// Errors surfaced while answering a dispatched request.
#[derive(Debug, PartialEq, Eq, Hash)]
pub enum MockError {
  /// No armed stub matched the request
  NoMatchFound {
    /// Method of the unmatched request
    method: String,
    /// Path of the unmatched request
    path: String,
  },

  /// The file-read collaborator failed to resolve the response body
  FileRead(FileReadError),
}

impl std::fmt::Display for MockError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      MockError::NoMatchFound { method, path } => {
        write!(f, "No stub matched request: {} {}", method, path)
      }
      MockError::FileRead(e) => write!(f, "Response assembly failed: {}", e),
    }
  }
}

impl std::error::Error for MockError {}

impl From<FileReadError> for MockError {
  fn from(e: FileReadError) -> Self {
    MockError::FileRead(e)
  }
}
