use std::sync::{Arc, RwLock};

use http_model::Request;

use crate::{response_builder::ResponseSpec, stub::RequestStub, MockError};

/// Owns the set of armed stubs and selects which one answers a request.
///
/// Stubs are kept in registration order; when several stubs fully match the
/// same request the earliest-registered one wins. Registration is
/// synchronized against concurrent matching, though the usual pattern is to
/// arm every stub before any traffic flows.
#[derive(Default)]
pub struct Registry {
  stubs: RwLock<Vec<Arc<RequestStub>>>,
}

impl Registry {
  /// Creates an empty registry.
  pub fn new() -> Self {
    Self {
      stubs: RwLock::new(Vec::new()),
    }
  }

  /// Registers an armed stub. Called by the terminal status operations on
  /// [`StubBuilder`](crate::StubBuilder).
  pub fn add(&self, stub: Arc<RequestStub>) {
    log::debug!("armed stub {} {}", stub.method(), stub.path());
    let mut stubs = self.stubs.write().expect("stub registry poisoned");
    stubs.push(stub);
  }

  /// Returns the number of armed stubs.
  pub fn len(&self) -> usize {
    self.stubs.read().expect("stub registry poisoned").len()
  }

  /// Returns true when no stub has been armed.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Selects the stub answering `request`, if any: exact path and method,
  /// query-parameter subset, then URL constraints, first registered wins.
  pub fn find_match(&self, request: &Request) -> Option<Arc<RequestStub>> {
    let stubs = self.stubs.read().expect("stub registry poisoned");
    stubs.iter().find(|stub| stub.matches(request)).cloned()
  }

  /// Routes one request: selects the matching stub, records the request on
  /// it exactly once, and hands back the stub together with its assembled
  /// response descriptor for delivery.
  pub fn dispatch(&self, request: &Request) -> Result<(Arc<RequestStub>, ResponseSpec), MockError> {
    match self.find_match(request) {
      Some(stub) => {
        log::debug!(
          "{} {} matched stub {} {}",
          request.method(),
          request.url(),
          stub.method(),
          stub.path()
        );
        stub.record_request(request.clone());
        let spec = stub.response().clone();
        Ok((stub, spec))
      }
      None => {
        log::info!("no stub matched {} {}", request.method(), request.url());
        Err(MockError::NoMatchFound {
          method: request.method().to_string(),
          path: request.path().to_string(),
        })
      }
    }
  }
}

#[cfg(test)]
mod test {
  use http_model::Request;

  use crate::{MockError, MockServer};

  fn get(url: &str) -> Request {
    Request::builder()
      .method("GET")
      .url(url)
      .expect("invalid url")
      .build()
      .expect("should build request")
  }

  #[test]
  fn matching_filters_on_path_and_method() {
    let server = MockServer::new();
    let get_stub = server.get("/items").return_body("get").ok();
    let post_stub = server.post("/items").return_body("post").ok();

    let registry = server.registry();
    let matched = registry
      .find_match(&get("http://localhost/items"))
      .expect("should match");

    assert!(std::sync::Arc::ptr_eq(&matched, &get_stub));
    assert_eq!(post_stub.request_count(), 0);
  }

  #[test]
  fn query_subset_ignores_extra_request_params() {
    let server = MockServer::new();
    server.get("/items").with_params([("type", "book")]).ok();
    let registry = server.registry();

    assert!(registry
      .find_match(&get("http://localhost/items?type=book&page=2"))
      .is_some());
    assert!(registry
      .find_match(&get("http://localhost/items?type=dvd"))
      .is_none());
    assert!(registry.find_match(&get("http://localhost/items")).is_none());
  }

  #[test]
  fn first_registered_stub_wins_ties() {
    let server = MockServer::new();
    let first = server.get("/dup").return_body("first").ok();
    let second = server.get("/dup").return_body("second").ok();

    let registry = server.registry();
    let request = get("http://localhost/dup");

    for _ in 0..3 {
      let matched = registry.find_match(&request).expect("should match");
      assert!(std::sync::Arc::ptr_eq(&matched, &first));
    }
    assert_eq!(second.request_count(), 0);
  }

  #[test]
  fn dispatch_records_exactly_once_per_request() {
    let server = MockServer::new();
    let stub = server.get("/seen").ok();

    let registry = server.registry();
    registry
      .dispatch(&get("http://localhost/seen"))
      .expect("should dispatch");
    registry
      .dispatch(&get("http://localhost/seen"))
      .expect("should dispatch");

    assert_eq!(stub.request_count(), 2);
  }

  #[test]
  fn dispatch_reports_no_match() {
    let server = MockServer::new();
    server.get("/known").ok();

    let err = server
      .registry()
      .dispatch(&get("http://localhost/unknown"))
      .unwrap_err();

    assert_eq!(
      err,
      MockError::NoMatchFound {
        method: "GET".to_string(),
        path: "/unknown".to_string(),
      }
    );
  }

  #[test]
  fn constraints_narrow_matching_by_full_url() {
    use http_model::Url;

    let server = MockServer::new();
    server
      .get("/items")
      .with_url_constraint(Box::new(|url: &Url| {
        url.query().map(|q| q.contains("page=")).unwrap_or(false)
      }))
      .ok();

    let registry = server.registry();
    assert!(registry
      .find_match(&get("http://localhost/items?page=3"))
      .is_some());
    assert!(registry
      .find_match(&get("http://localhost/items?type=book"))
      .is_none());
  }
}
