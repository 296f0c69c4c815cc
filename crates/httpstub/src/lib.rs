//! # In-process HTTP stubbing for test suites
//!
//! httpstub answers HTTP requests from registered stubs and records what it
//! saw so tests can assert on it afterwards. A stub is configured fluently
//! (path, method, expected query parameters, URL constraints, response) and
//! armed by a terminal status call; an armed stub is matched against
//! incoming requests and keeps a history of every request it answered.
//!
//! The crate owns no transport: whatever listens on a socket parses traffic
//! into [`Request`] values, hands them to [`MockServer`] through the
//! [`Handler`] trait, and delivers the [`Response`] that comes back.
//!
//! ## Example
//!
//! ```rust
//! use httpstub::{Handler, MockServer, Request};
//!
//! let server = MockServer::new();
//!
//! // Arming happens in the terminal status call. A builder that never
//! // reaches one stays invisible to matching.
//! let stub = server
//!   .get("/items")
//!   .with_params([("type", "book")])
//!   .return_body("[\"dune\"]")
//!   .as_content_type("application/json")
//!   .ok();
//!
//! let request = Request::builder()
//!   .method("GET")
//!   .url("http://localhost/items?type=book&page=2").expect("invalid url")
//!   .build()
//!   .expect("should build request");
//!
//! let response = server.handle(request).expect("should handle request");
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.body(), "[\"dune\"]");
//!
//! // The stub recorded the request it answered.
//! assert_eq!(stub.request_count(), 1);
//! let observed = stub.last_request().expect("should have history");
//! assert_eq!(observed.query_param("page"), Some("2".to_string()));
//! ```

#![warn(rust_2018_idioms)]
#![warn(clippy::dbg_macro, clippy::print_stdout)]
#![warn(missing_docs)]

mod error;
mod file;
mod registry;
mod response_builder;
mod server;
mod stub;
mod test;

pub use http_model::{
  Constraint, ConstraintExt, ConstraintGroup, Handler, Headers, PathConstraint, QueryConstraint,
  Request, RequestBuilder, RequestBuilderError, Response, Url,
};

pub use error::{FileReadError, MockError, VerifyError};
pub use file::{FileReader, FsFileReader};
pub use registry::Registry;
pub use response_builder::{BodySource, ResponseBuilder, ResponseSpec};
pub use server::MockServer;
pub use stub::{RequestStub, StubBuilder};
pub use test::{FixtureDir, FixtureDirBuilder};
