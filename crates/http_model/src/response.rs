use bytes::Bytes;

use crate::Headers;

/// A fully resolved HTTP response: status, headers, and body bytes.
///
/// The stub engine assembles responses from a configured descriptor; by the
/// time a `Response` exists any file-backed body has already been read.
#[derive(Clone, Debug)]
pub struct Response {
  status: u16,
  headers: Headers,
  body: Bytes,
}

impl Response {
  pub fn new<T: Into<Bytes>>(status: u16, headers: Headers, body: T) -> Self {
    Self {
      status,
      headers,
      body: body.into(),
    }
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  pub fn headers(&self) -> &Headers {
    &self.headers
  }

  pub fn body(&self) -> Bytes {
    self.body.clone()
  }

  /// Returns the `Content-Type` header, if one was configured.
  pub fn content_type(&self) -> Option<String> {
    self.headers.get("Content-Type")
  }
}
