use std::{
  collections::{HashMap, VecDeque},
  sync::{Arc, Mutex},
};

use bytes::Bytes;

use http_model::{Constraint, Request, Url};

use crate::{
  registry::Registry,
  response_builder::{ResponseBuilder, ResponseSpec},
  VerifyError,
};

/// Configures one stub before it is armed.
///
/// A `StubBuilder` is created by [`MockServer::stub`](crate::MockServer::stub)
/// or one of the verb helpers. It is a configuration-only object: until a
/// terminal status call (`ok`, `not_found`, `with_status`) arms it, it is not
/// registered anywhere and can never match a request. Dropping an un-armed
/// builder discards it silently.
///
/// # Examples
///
/// ```
/// use httpstub::MockServer;
///
/// let server = MockServer::new();
///
/// let stub = server
///   .get("/items")
///   .with_params([("type", "book")])
///   .return_body("[]")
///   .as_content_type("application/json")
///   .ok();
///
/// assert_eq!(stub.request_count(), 0);
/// ```
pub struct StubBuilder {
  path: String,
  method: String,
  query_params: HashMap<String, String>,
  constraints: Vec<Box<dyn Constraint>>,
  response: ResponseBuilder,
  registry: Arc<Registry>,
}

impl StubBuilder {
  pub(crate) fn new<M, P>(registry: Arc<Registry>, method: M, path: P) -> Self
  where
    M: Into<String>,
    P: Into<String>,
  {
    Self {
      path: path.into(),
      method: method.into(),
      query_params: HashMap::new(),
      constraints: Vec::new(),
      response: ResponseBuilder::new(),
      registry,
    }
  }

  /// Sets a literal response body, replacing any configured body source.
  pub fn return_body<T: Into<Bytes>>(mut self, body: T) -> Self {
    self.response.with_body(body);
    self
  }

  /// Serves the full contents of the file at `path` as the response body.
  ///
  /// The file is not checked at configuration time; a missing file surfaces
  /// as a delivery failure when the stub answers a request.
  pub fn return_file<P: Into<String>>(mut self, path: P) -> Self {
    self.response.with_file(path.into());
    self
  }

  /// Serves the inclusive byte range `[from, to]` of the file at `path` as
  /// the response body. Expects `from <= to`; the range is stored verbatim
  /// and the file-read collaborator clamps it to the actual file length.
  pub fn return_file_range<P: Into<String>>(mut self, path: P, from: u64, to: u64) -> Self {
    self.response.with_file_range(path.into(), from, to);
    self
  }

  /// Replaces the expected query parameters wholesale.
  ///
  /// Requests match when every configured parameter is present with exactly
  /// this value; extra request parameters are ignored. Calling `with_params`
  /// again discards the previous mapping rather than merging into it.
  pub fn with_params<I, K, V>(mut self, params: I) -> Self
  where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
  {
    self.query_params = params
      .into_iter()
      .map(|(key, value)| (key.into(), value.into()))
      .collect();
    self
  }

  /// Appends one URL constraint. Constraints accumulate across calls and
  /// must all hold for the stub to match.
  ///
  /// # Examples
  ///
  /// ```
  /// use httpstub::{MockServer, Url};
  ///
  /// let server = MockServer::new();
  ///
  /// let stub = server
  ///   .get("/items")
  ///   .with_url_constraint(Box::new(|url: &Url| url.query().is_some()))
  ///   .ok();
  ///
  /// assert!(stub.can_verify_constraints_for(
  ///   &"http://localhost/items?type=book".parse().unwrap()
  /// ));
  /// assert!(!stub.can_verify_constraints_for(
  ///   &"http://localhost/items".parse().unwrap()
  /// ));
  /// ```
  pub fn with_url_constraint(mut self, constraint: Box<dyn Constraint>) -> Self {
    self.constraints.push(constraint);
    self
  }

  /// Sets the response content type.
  pub fn as_content_type<T: Into<String>>(mut self, content_type: T) -> Self {
    self.response.with_content_type(content_type);
    self
  }

  /// Sets the response content type to `text/xml`.
  pub fn as_xml_content(self) -> Self {
    self.as_content_type("text/xml")
  }

  /// Sets one response header, overwriting any previous value for the field.
  pub fn add_header<K, V>(mut self, key: K, value: V) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.response.add_header(key, value);
    self
  }

  /// Arms the stub with status 200.
  pub fn ok(self) -> Arc<RequestStub> {
    self.with_status(200)
  }

  /// Arms the stub with status 404.
  pub fn not_found(self) -> Arc<RequestStub> {
    self.with_status(404)
  }

  /// Sets the response status and arms the stub: from here on it is
  /// registered with the owning registry and eligible for matching. This is
  /// the only path by which a stub becomes visible to dispatch.
  pub fn with_status(mut self, status: u16) -> Arc<RequestStub> {
    self.response.with_status(status);

    let stub = Arc::new(RequestStub {
      path: self.path,
      method: self.method,
      query_params: self.query_params,
      constraints: self.constraints,
      response: self.response.build(),
      observed: Mutex::new(VecDeque::new()),
    });

    self.registry.add(stub.clone());
    stub
  }
}

/// One armed stub: immutable match data, the assembled response descriptor,
/// and the history of requests it has answered.
///
/// Obtained from the terminal status calls on [`StubBuilder`]. The returned
/// `Arc` is the verification handle: tests keep it to assert on
/// [`request_count`](RequestStub::request_count),
/// [`last_request`](RequestStub::last_request), and
/// [`get_body`](RequestStub::get_body) after traffic has flowed.
pub struct RequestStub {
  path: String,
  method: String,
  query_params: HashMap<String, String>,
  constraints: Vec<Box<dyn Constraint>>,
  response: ResponseSpec,
  observed: Mutex<VecDeque<Request>>,
}

impl RequestStub {
  /// Returns the route path this stub answers.
  pub fn path(&self) -> &str {
    &self.path
  }

  /// Returns the HTTP method this stub answers.
  pub fn method(&self) -> &str {
    &self.method
  }

  /// Returns the assembled response descriptor.
  pub fn response(&self) -> &ResponseSpec {
    &self.response
  }

  /// Checks the full match chain for a request: exact path and method,
  /// query-parameter subset, and every URL constraint.
  pub fn matches(&self, request: &Request) -> bool {
    self.matches_route(request.method(), request.path())
      && self.matches_query(request)
      && self.can_verify_constraints_for(request.url())
  }

  /// Checks exact path and method equality.
  pub fn matches_route(&self, method: &str, path: &str) -> bool {
    self.method == method && self.path == path
  }

  /// Checks that every expected query parameter is present on the request
  /// with exactly the expected value. Request parameters not covered by the
  /// stub are ignored; an empty expectation matches any query string.
  pub fn matches_query(&self, request: &Request) -> bool {
    self
      .query_params
      .iter()
      .all(|(key, value)| request.query_param(key).as_deref() == Some(value.as_str()))
  }

  /// Returns true iff every registered constraint holds for `url`. A stub
  /// with no constraints trivially passes.
  pub fn can_verify_constraints_for(&self, url: &Url) -> bool {
    self.constraints.iter().all(|c| c.matches(url))
  }

  /// Records one observed request. Called exactly once per request the
  /// registry routes to this stub.
  pub fn record_request(&self, request: Request) {
    let mut observed = self.observed.lock().expect("request history poisoned");
    observed.push_back(request);
  }

  /// Returns the number of requests recorded so far.
  pub fn request_count(&self) -> usize {
    self.observed.lock().expect("request history poisoned").len()
  }

  /// Returns the FIRST recorded request, not the most recent one.
  ///
  /// This peeks the head of the history queue without removing it, so the
  /// same request is returned no matter how many have been recorded since.
  /// The name is kept for compatibility with existing suites even though it
  /// reads like "most recent".
  ///
  /// Fails with [`VerifyError::EmptyHistory`] when nothing was recorded, so
  /// callers can tell "no requests yet" apart from an empty body.
  pub fn last_request(&self) -> Result<Request, VerifyError> {
    self
      .observed
      .lock()
      .expect("request history poisoned")
      .front()
      .cloned()
      .ok_or(VerifyError::EmptyHistory)
  }

  /// Returns the body of the FIRST recorded request (see
  /// [`last_request`](RequestStub::last_request) for the peek semantics).
  pub fn get_body(&self) -> Result<Bytes, VerifyError> {
    self.last_request().map(|request| request.body())
  }
}

impl std::fmt::Display for RequestStub {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    writeln!(f, "{}:{}", self.path, self.method)?;
    for (key, value) in &self.query_params {
      writeln!(f, "{}:{}", key, value)?;
    }
    Ok(())
  }
}

impl std::fmt::Debug for RequestStub {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RequestStub")
      .field("path", &self.path)
      .field("method", &self.method)
      .field("query_params", &self.query_params)
      .field("constraints", &self.constraints.len())
      .field("response", &self.response)
      .finish()
  }
}

#[cfg(test)]
mod test {
  use http_model::Request;

  use crate::MockServer;

  fn request(url: &str) -> Request {
    Request::builder()
      .url(url)
      .expect("invalid url")
      .build()
      .expect("should build request")
  }

  #[test]
  fn request_count_tracks_every_recorded_request() {
    let server = MockServer::new();
    let stub = server.get("/counter").ok();

    assert_eq!(stub.request_count(), 0);

    for n in 1..=5 {
      stub.record_request(request("http://localhost/counter"));
      assert_eq!(stub.request_count(), n);
    }
  }

  #[test]
  fn last_request_returns_oldest_not_newest() {
    let server = MockServer::new();
    let stub = server.post("/inbox").ok();

    stub.record_request(
      Request::builder()
        .method("POST")
        .url("http://localhost/inbox")
        .expect("invalid url")
        .body("first")
        .build()
        .expect("should build request"),
    );
    stub.record_request(
      Request::builder()
        .method("POST")
        .url("http://localhost/inbox")
        .expect("invalid url")
        .body("second")
        .build()
        .expect("should build request"),
    );

    // Peek, not dequeue: repeated reads keep answering with the head.
    let observed = stub.last_request().expect("should have history");
    assert_eq!(observed.body(), "first");
    assert_eq!(stub.get_body().expect("should have history"), "first");
    assert_eq!(stub.request_count(), 2);
  }

  #[test]
  fn history_reads_fail_loudly_when_empty() {
    let server = MockServer::new();
    let stub = server.get("/quiet").ok();

    assert!(stub.last_request().is_err());
    assert!(stub.get_body().is_err());
  }

  #[test]
  fn empty_body_is_distinguishable_from_empty_history() {
    let server = MockServer::new();
    let stub = server.post("/empty").ok();

    stub.record_request(
      Request::builder()
        .method("POST")
        .url("http://localhost/empty")
        .expect("invalid url")
        .build()
        .expect("should build request"),
    );

    assert_eq!(stub.get_body().expect("should have history"), "");
  }

  #[test]
  fn with_params_replaces_rather_than_merges() {
    let server = MockServer::new();
    let stub = server
      .get("/items")
      .with_params([("type", "book")])
      .with_params([("page", "2")])
      .ok();

    // Only the last mapping applies: type is no longer expected.
    assert!(stub.matches(&request("http://localhost/items?page=2")));
    assert!(stub.matches(&request("http://localhost/items?page=2&type=dvd")));
    assert!(!stub.matches(&request("http://localhost/items?type=book")));
  }

  #[test]
  fn constraints_accumulate_and_all_must_hold() {
    use http_model::Url;

    let server = MockServer::new();
    let stub = server
      .get("/items")
      .with_url_constraint(Box::new(|url: &Url| url.query().is_some()))
      .with_url_constraint(Box::new(|url: &Url| url.path().starts_with("/items")))
      .ok();

    assert!(stub.can_verify_constraints_for(&"http://localhost/items?a=1".parse().unwrap()));
    assert!(!stub.can_verify_constraints_for(&"http://localhost/items".parse().unwrap()));
  }

  #[test]
  fn zero_constraints_hold_for_any_url() {
    let server = MockServer::new();
    let stub = server.get("/anything").ok();

    assert!(stub.can_verify_constraints_for(&"http://localhost/other".parse().unwrap()));
    assert!(stub.can_verify_constraints_for(&"https://elsewhere.example/x?y=z".parse().unwrap()));
  }

  #[test]
  fn recording_is_safe_across_threads() {
    let server = MockServer::new();
    let stub = server.get("/burst").ok();

    let handles: Vec<_> = (0..8)
      .map(|_| {
        let stub = stub.clone();
        std::thread::spawn(move || {
          for _ in 0..50 {
            stub.record_request(
              Request::builder()
                .url("http://localhost/burst")
                .expect("invalid url")
                .build()
                .expect("should build request"),
            );
          }
        })
      })
      .collect();

    for handle in handles {
      handle.join().expect("thread should finish");
    }

    assert_eq!(stub.request_count(), 400);
  }

  #[test]
  fn display_renders_route_and_params() {
    let server = MockServer::new();
    let stub = server.get("/items").with_params([("type", "book")]).ok();

    let rendered = stub.to_string();
    assert!(rendered.starts_with("/items:GET\n"));
    assert!(rendered.contains("type:book\n"));
  }
}
