use std::sync::Arc;

use bytes::Bytes;

use http_model::{Handler, Request, Response};

use crate::{
  file::{FileReader, FsFileReader},
  registry::Registry,
  response_builder::{BodySource, ResponseSpec},
  stub::StubBuilder,
  FileReadError, MockError,
};

/// The in-process mock server: a stub registry plus the file-read
/// collaborator used to resolve file-backed response bodies.
///
/// `MockServer` owns no transport. Whatever listens for HTTP traffic parses
/// requests into [`Request`] values, calls [`Handler::handle`], and delivers
/// the resulting [`Response`] (or maps a [`MockError`] to its own failure
/// convention, typically a 404 for `NoMatchFound`).
///
/// # Examples
///
/// ```
/// use httpstub::{Handler, MockServer, Request};
///
/// let server = MockServer::new();
///
/// server
///   .get("/status")
///   .return_body("OK")
///   .as_content_type("text/plain")
///   .ok();
///
/// let request = Request::builder()
///   .method("GET")
///   .url("http://localhost/status").expect("invalid url")
///   .build()
///   .expect("should build request");
///
/// let response = server.handle(request).expect("should handle request");
///
/// assert_eq!(response.status(), 200);
/// assert_eq!(response.body(), "OK");
/// assert_eq!(response.content_type(), Some("text/plain".to_string()));
/// ```
pub struct MockServer {
  registry: Arc<Registry>,
  reader: Box<dyn FileReader>,
}

impl MockServer {
  /// Creates a server resolving file-backed bodies through [`FsFileReader`].
  pub fn new() -> Self {
    Self::with_reader(Box::new(FsFileReader))
  }

  /// Creates a server with a custom file-read collaborator.
  pub fn with_reader(reader: Box<dyn FileReader>) -> Self {
    Self {
      registry: Arc::new(Registry::new()),
      reader,
    }
  }

  /// Returns the stub registry, shared with every builder this server
  /// hands out.
  pub fn registry(&self) -> Arc<Registry> {
    self.registry.clone()
  }

  /// Starts configuring a stub for the given method and path. The stub only
  /// becomes matchable once a terminal status call arms it.
  pub fn stub<M, P>(&self, method: M, path: P) -> StubBuilder
  where
    M: Into<String>,
    P: Into<String>,
  {
    StubBuilder::new(self.registry.clone(), method, path)
  }

  /// Starts configuring a stub for `GET` requests on `path`.
  pub fn get<P: Into<String>>(&self, path: P) -> StubBuilder {
    self.stub("GET", path)
  }

  /// Starts configuring a stub for `POST` requests on `path`.
  pub fn post<P: Into<String>>(&self, path: P) -> StubBuilder {
    self.stub("POST", path)
  }

  /// Starts configuring a stub for `PUT` requests on `path`.
  pub fn put<P: Into<String>>(&self, path: P) -> StubBuilder {
    self.stub("PUT", path)
  }

  /// Starts configuring a stub for `DELETE` requests on `path`.
  pub fn delete<P: Into<String>>(&self, path: P) -> StubBuilder {
    self.stub("DELETE", path)
  }

  /// Starts configuring a stub for `HEAD` requests on `path`.
  pub fn head<P: Into<String>>(&self, path: P) -> StubBuilder {
    self.stub("HEAD", path)
  }

  /// Returns the number of armed stubs.
  pub fn stub_count(&self) -> usize {
    self.registry.len()
  }

  fn resolve(&self, spec: &ResponseSpec) -> Result<Bytes, FileReadError> {
    match spec.body_source() {
      BodySource::Literal(bytes) => Ok(bytes.clone()),
      BodySource::WholeFile(path) => self.reader.read(path),
      BodySource::FileRange(path, from, to) => self.reader.read_range(path, *from, *to),
    }
  }
}

impl Handler for MockServer {
  type Error = MockError;

  /// Answers one request: dispatch through the registry (which records the
  /// request on the winning stub), then resolve the configured body source
  /// into bytes. File resolution failures surface as
  /// [`MockError::FileRead`]; nothing is retried.
  fn handle(&self, request: Request) -> Result<Response, Self::Error> {
    let (_stub, spec) = self.registry.dispatch(&request)?;
    let body = self.resolve(&spec)?;

    Ok(Response::new(spec.status(), spec.headers().clone(), body))
  }
}

impl Default for MockServer {
  fn default() -> Self {
    Self::new()
  }
}
