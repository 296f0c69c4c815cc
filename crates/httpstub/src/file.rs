use std::{fs, io::ErrorKind, path::Path};

use bytes::Bytes;

use crate::FileReadError;

/// The file-read collaborator used to resolve file-backed response bodies.
///
/// Implementations own clamping byte ranges to the actual file length and
/// reporting read failures; the stub engine never touches the filesystem
/// itself and never retries a failed read.
pub trait FileReader: Send + Sync {
  /// Reads the full contents of the file at `path`.
  fn read(&self, path: &Path) -> Result<Bytes, FileReadError>;

  /// Reads the inclusive byte range `[from, to]` of the file at `path`,
  /// clamped to the end of the file.
  fn read_range(&self, path: &Path, from: u64, to: u64) -> Result<Bytes, FileReadError>;
}

/// `FileReader` backed by `std::fs`.
///
/// # Examples
///
/// ```
/// use httpstub::{FileReader, FixtureDir, FsFileReader};
///
/// let fixtures = FixtureDir::builder()
///   .file("greeting.txt", "Hello, World!")
///   .build()
///   .expect("should prepare fixtures");
///
/// let reader = FsFileReader;
/// let bytes = reader
///   .read(&fixtures.path_of("greeting.txt"))
///   .expect("should read file");
///
/// assert_eq!(bytes, "Hello, World!");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FsFileReader;

impl FsFileReader {
  fn read_all(&self, path: &Path) -> Result<Vec<u8>, FileReadError> {
    fs::read(path).map_err(|e| match e.kind() {
      ErrorKind::NotFound => FileReadError::NotFound(path.to_owned()),
      kind => FileReadError::Io(path.to_owned(), kind),
    })
  }
}

impl FileReader for FsFileReader {
  fn read(&self, path: &Path) -> Result<Bytes, FileReadError> {
    self.read_all(path).map(Bytes::from)
  }

  fn read_range(&self, path: &Path, from: u64, to: u64) -> Result<Bytes, FileReadError> {
    let contents = self.read_all(path)?;
    let len = contents.len() as u64;

    if from > to || from >= len {
      return Err(FileReadError::InvalidRange {
        path: path.to_owned(),
        from,
        to,
      });
    }

    // Inclusive range, clamped to the last byte of the file.
    let end = to.min(len - 1) as usize;
    Ok(Bytes::copy_from_slice(&contents[from as usize..=end]))
  }
}
