use std::path::{Path, PathBuf};

use bytes::Bytes;

use http_model::Headers;

/// Where a stubbed response body comes from.
///
/// Exactly one source is active at a time; configuring a new one replaces
/// whatever was set before. File-backed sources are resolved into bytes by
/// the file-read collaborator at delivery time, never at configuration time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodySource {
  /// A literal body configured on the stub
  Literal(Bytes),

  /// The full contents of a file
  WholeFile(PathBuf),

  /// An inclusive byte range `[from, to]` of a file
  FileRange(PathBuf, u64, u64),
}

impl Default for BodySource {
  fn default() -> Self {
    BodySource::Literal(Bytes::new())
  }
}

/// Accumulates response configuration for one stub.
///
/// Owned exclusively by the stub being configured and mutated only through
/// its fluent surface. `build` produces the immutable [`ResponseSpec`]
/// carried by the armed stub.
///
/// # Examples
///
/// ```
/// use httpstub::ResponseBuilder;
///
/// let mut builder = ResponseBuilder::new();
/// builder
///   .with_status(201)
///   .with_content_type("application/json")
///   .with_body("{\"ok\":true}");
///
/// let spec = builder.build();
/// assert_eq!(spec.status(), 201);
/// assert_eq!(spec.headers().get("Content-Type"), Some("application/json".to_string()));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ResponseBuilder {
  status: Option<u16>,
  headers: Headers,
  body: BodySource,
}

impl ResponseBuilder {
  /// Creates a new `ResponseBuilder` with no status, headers, or body.
  pub fn new() -> Self {
    Self {
      status: None,
      headers: Headers::new(),
      body: BodySource::default(),
    }
  }

  /// Sets the response status code.
  pub fn with_status(&mut self, status: u16) -> &mut Self {
    self.status = Some(status);
    self
  }

  /// Sets the `Content-Type` response header.
  pub fn with_content_type<T: Into<String>>(&mut self, content_type: T) -> &mut Self {
    self.headers.set("Content-Type", content_type);
    self
  }

  /// Sets a response header, overwriting any previous value for the field.
  pub fn add_header<K, V>(&mut self, key: K, value: V) -> &mut Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.headers.set(key, value);
    self
  }

  /// Sets a literal response body, replacing any configured body source.
  pub fn with_body<T: Into<Bytes>>(&mut self, body: T) -> &mut Self {
    self.body = BodySource::Literal(body.into());
    self
  }

  /// Sets the response body to the full contents of a file, replacing any
  /// configured body source. The file is not touched until delivery.
  pub fn with_file<P: AsRef<Path>>(&mut self, path: P) -> &mut Self {
    self.body = BodySource::WholeFile(path.as_ref().to_owned());
    self
  }

  /// Sets the response body to the inclusive byte range `[from, to]` of a
  /// file, replacing any configured body source. The range is stored
  /// verbatim; clamping to the actual file length happens at read time.
  pub fn with_file_range<P: AsRef<Path>>(&mut self, path: P, from: u64, to: u64) -> &mut Self {
    self.body = BodySource::FileRange(path.as_ref().to_owned(), from, to);
    self
  }

  /// Builds the response descriptor. The status defaults to 200 when unset.
  pub fn build(&self) -> ResponseSpec {
    ResponseSpec {
      status: self.status.unwrap_or(200),
      headers: self.headers.clone(),
      body: self.body.clone(),
    }
  }
}

/// The assembled response descriptor carried by an armed stub.
///
/// Delivery resolves the [`BodySource`] into bytes through the file-read
/// collaborator; this type itself performs no I/O.
#[derive(Clone, Debug)]
pub struct ResponseSpec {
  status: u16,
  headers: Headers,
  body: BodySource,
}

impl ResponseSpec {
  /// Returns the configured status code.
  pub fn status(&self) -> u16 {
    self.status
  }

  /// Returns the configured response headers.
  pub fn headers(&self) -> &Headers {
    &self.headers
  }

  /// Returns the configured body source.
  pub fn body_source(&self) -> &BodySource {
    &self.body
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn last_body_setting_call_wins() {
    let mut builder = ResponseBuilder::new();
    builder
      .with_body("literal")
      .with_file("whole.txt")
      .with_file_range("ranged.txt", 5, 10);

    assert_eq!(
      builder.build().body_source(),
      &BodySource::FileRange(PathBuf::from("ranged.txt"), 5, 10)
    );
  }

  #[test]
  fn file_range_is_stored_verbatim() {
    let mut builder = ResponseBuilder::new();
    builder.with_file_range("f.txt", 5, 10);

    // No clamping at this layer, even for ranges a real file cannot satisfy.
    assert_eq!(
      builder.build().body_source(),
      &BodySource::FileRange(PathBuf::from("f.txt"), 5, 10)
    );
  }

  #[test]
  fn status_defaults_to_200() {
    assert_eq!(ResponseBuilder::new().build().status(), 200);
  }

  #[test]
  fn add_header_overwrites_per_field() {
    let mut builder = ResponseBuilder::new();
    builder
      .add_header("X-Test", "one")
      .add_header("X-Test", "two");

    assert_eq!(
      builder.build().headers().get_all("X-Test"),
      vec!["two".to_string()]
    );
  }
}
