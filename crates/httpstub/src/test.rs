use std::{
  collections::HashMap,
  env::temp_dir,
  fs::{create_dir_all, remove_dir_all, File},
  io::{Error, Write},
  ops::Deref,
  path::{Path, PathBuf},
  process,
  sync::atomic::{AtomicUsize, Ordering},
};

static FIXTURE_SEQ: AtomicUsize = AtomicUsize::new(0);

/// A temporary directory of fixture files for file-backed response tests.
///
/// The directory and everything in it are removed when the `FixtureDir` is
/// dropped.
///
/// # Examples
///
/// ```
/// use httpstub::FixtureDir;
///
/// let fixtures = FixtureDir::builder()
///   .file("body.txt", "Hello, World!")
///   .build()
///   .expect("should prepare fixtures");
///
/// assert!(fixtures.path_of("body.txt").exists());
/// ```
pub struct FixtureDir(PathBuf);

impl FixtureDir {
  pub(crate) fn new<D, H>(root: D, files: H) -> Result<Self, Error>
  where
    D: AsRef<Path>,
    H: Into<HashMap<PathBuf, String>>,
  {
    let root = root.as_ref();
    create_dir_all(root)?;

    let map: HashMap<PathBuf, String> = files.into();
    for (path, contents) in map.iter() {
      let stripped = path.strip_prefix("/").unwrap_or(path);

      let file_path = root.join(stripped);
      if let Some(parent) = file_path.parent() {
        create_dir_all(parent)?;
      }

      let mut file = File::create(file_path)?;
      file.write_all(contents.as_bytes())?;
    }

    // This unwrap should be safe due to creating the root dir above.
    Ok(Self(root.canonicalize().unwrap()))
  }

  /// Creates a new `FixtureDirBuilder`.
  pub fn builder() -> FixtureDirBuilder {
    FixtureDirBuilder::default()
  }

  /// Returns the full path of a fixture file by name.
  pub fn path_of<P: AsRef<Path>>(&self, name: P) -> PathBuf {
    self.0.join(name)
  }
}

impl Drop for FixtureDir {
  fn drop(&mut self) {
    remove_dir_all(&self.0).ok();
  }
}

impl Deref for FixtureDir {
  type Target = PathBuf;

  fn deref(&self) -> &Self::Target {
    &self.0
  }
}

/// Builds a [`FixtureDir`] from named files and their contents.
#[derive(Debug)]
pub struct FixtureDirBuilder(PathBuf, HashMap<PathBuf, String>);

impl FixtureDirBuilder {
  pub(crate) fn new<D>(root: D) -> Self
  where
    D: AsRef<Path>,
  {
    Self(root.as_ref().to_owned(), HashMap::new())
  }

  /// Adds a file with the given contents to the fixture directory.
  pub fn file<P, C>(mut self, path: P, contents: C) -> FixtureDirBuilder
  where
    P: AsRef<Path>,
    C: Into<String>,
  {
    self.1.insert(path.as_ref().to_owned(), contents.into());
    self
  }

  /// Creates the directory and writes every configured file.
  pub fn build(self) -> Result<FixtureDir, Error> {
    FixtureDir::new(self.0, self.1)
  }
}

impl Default for FixtureDirBuilder {
  fn default() -> Self {
    // Unique per builder so parallel tests do not share a directory.
    let seq = FIXTURE_SEQ.fetch_add(1, Ordering::Relaxed);
    Self::new(temp_dir().join(format!("httpstub-fixtures-{}-{}", process::id(), seq)))
  }
}
