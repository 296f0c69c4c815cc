//! HTTP value model for the httpstub mock server.
//!
//! This crate holds the request/response value types, the header multi-map,
//! the [`Handler`] seam between the stub engine and whatever transport drives
//! it, and the [`Constraint`] predicate system used to narrow stub matching
//! by arbitrary conditions on the request URL.

mod constraint;
mod handler;
mod headers;
mod request;
mod response;

pub use constraint::{
  Constraint, ConstraintExt, ConstraintGroup, PathConstraint, QueryConstraint,
};
pub use handler::Handler;
pub use headers::Headers;
pub use request::{Request, RequestBuilder, RequestBuilderError};
pub use response::Response;
pub use url::Url;
