use bytes::{Bytes, BytesMut};
use url::{ParseError, Url};

use crate::Headers;

/// An observed HTTP request. Includes the method, URL, headers, and body.
///
/// Requests are immutable once built. The stub engine records one `Request`
/// per dispatched call so tests can assert on what was received.
///
/// # Examples
///
/// ```
/// use http_model::Request;
///
/// let request = Request::builder()
///   .method("POST")
///   .url("http://example.com/items?type=book").expect("invalid url")
///   .header("Accept", "application/json")
///   .body("Hello, World!")
///   .build()
///   .expect("should build request");
///
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.path(), "/items");
/// assert_eq!(request.query_param("type"), Some("book".to_string()));
/// assert_eq!(request.body(), "Hello, World!");
/// ```
#[derive(Clone, Debug)]
pub struct Request {
  method: String,
  url: Url,
  headers: Headers,
  body: Bytes,
}

impl Request {
  /// Creates a new `Request` with the given method, URL, headers, and body.
  ///
  /// # Examples
  ///
  /// ```
  /// use http_model::{Headers, Request};
  ///
  /// let request = Request::new(
  ///   "GET".to_string(),
  ///   "http://example.com/status".parse().unwrap(),
  ///   Headers::new(),
  ///   "",
  /// );
  ///
  /// assert_eq!(request.method(), "GET");
  /// ```
  pub fn new<T: Into<Bytes>>(method: String, url: Url, headers: Headers, body: T) -> Self {
    Self {
      method,
      url,
      headers,
      body: body.into(),
    }
  }

  /// Creates a new `RequestBuilder` to build a `Request`.
  pub fn builder() -> RequestBuilder {
    RequestBuilder::new()
  }

  /// Returns the method of the request.
  pub fn method(&self) -> &str {
    &self.method
  }

  /// Returns the URL of the request.
  pub fn url(&self) -> &Url {
    &self.url
  }

  /// Returns the path segment of the request URL.
  pub fn path(&self) -> &str {
    self.url.path()
  }

  /// Returns the headers of the request.
  pub fn headers(&self) -> &Headers {
    &self.headers
  }

  /// Returns the body of the request.
  pub fn body(&self) -> Bytes {
    self.body.clone()
  }

  /// Returns the first query parameter with the given name, if present.
  ///
  /// # Examples
  ///
  /// ```
  /// use http_model::Request;
  ///
  /// let request = Request::builder()
  ///   .url("http://example.com/items?type=book&page=2").expect("invalid url")
  ///   .build()
  ///   .expect("should build request");
  ///
  /// assert_eq!(request.query_param("type"), Some("book".to_string()));
  /// assert_eq!(request.query_param("missing"), None);
  /// ```
  pub fn query_param<K>(&self, name: K) -> Option<String>
  where
    K: AsRef<str>,
  {
    self
      .url
      .query_pairs()
      .find(|(key, _)| key == name.as_ref())
      .map(|(_, value)| value.into_owned())
  }

  /// Returns all query parameters of the request URL in order of appearance.
  pub fn query_params(&self) -> Vec<(String, String)> {
    self
      .url
      .query_pairs()
      .map(|(key, value)| (key.into_owned(), value.into_owned()))
      .collect()
  }
}

/// Errors which may be produced when building a Request from a RequestBuilder.
#[derive(Debug, PartialEq)]
pub enum RequestBuilderError {
  /// Url is required
  MissingUrl,
}

impl std::fmt::Display for RequestBuilderError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      RequestBuilderError::MissingUrl => write!(f, "Expected url to be set"),
    }
  }
}

impl std::error::Error for RequestBuilderError {}

/// Builds an HTTP request.
///
/// # Examples
///
/// ```
/// use http_model::RequestBuilder;
///
/// let request = RequestBuilder::new()
///   .method("POST")
///   .url("http://example.com/echo").expect("invalid url")
///   .header("Content-Type", "text/plain")
///   .body("Hello, World!")
///   .build()
///   .expect("should build request");
///
/// assert_eq!(request.method(), "POST");
/// assert_eq!(request.headers().get("Content-Type"), Some("text/plain".to_string()));
/// ```
#[derive(Clone)]
pub struct RequestBuilder {
  method: Option<String>,
  url: Option<Url>,
  headers: Headers,
  body: BytesMut,
}

impl RequestBuilder {
  /// Creates a new `RequestBuilder`.
  pub fn new() -> Self {
    Self {
      method: None,
      url: None,
      headers: Headers::new(),
      body: BytesMut::new(),
    }
  }

  /// Sets the method of the request.
  pub fn method<T: Into<String>>(mut self, method: T) -> Self {
    self.method = Some(method.into());
    self
  }

  /// Sets the URL of the request. Fails if the URL does not parse.
  pub fn url<T>(mut self, url: T) -> Result<Self, ParseError>
  where
    T: Into<String>,
  {
    match url.into().parse() {
      Ok(url) => {
        self.url = Some(url);
        Ok(self)
      }
      Err(e) => Err(e),
    }
  }

  /// Adds a header line to the request.
  pub fn header<K, V>(mut self, key: K, value: V) -> Self
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.headers.add(key.into(), value.into());
    self
  }

  /// Sets the body of the request.
  pub fn body<T: Into<BytesMut>>(mut self, body: T) -> Self {
    self.body = body.into();
    self
  }

  /// Builds the request. The method defaults to `GET` when unset.
  ///
  /// # Examples
  ///
  /// ```
  /// use http_model::RequestBuilder;
  ///
  /// let request = RequestBuilder::new()
  ///   .url("http://example.com/status").expect("invalid url")
  ///   .build()
  ///   .expect("should build request");
  ///
  /// assert_eq!(request.method(), "GET");
  /// assert_eq!(request.body(), "");
  /// ```
  pub fn build(self) -> Result<Request, RequestBuilderError> {
    Ok(Request {
      method: self.method.unwrap_or_else(|| "GET".to_string()),
      url: self.url.ok_or(RequestBuilderError::MissingUrl)?,
      headers: self.headers,
      body: self.body.freeze(),
    })
  }
}

impl Default for RequestBuilder {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn build_without_url_fails() {
    let result = RequestBuilder::new().method("GET").build();

    assert_eq!(result.unwrap_err(), RequestBuilderError::MissingUrl);
  }

  #[test]
  fn query_params_preserve_order() {
    let request = Request::builder()
      .url("http://example.com/items?b=2&a=1")
      .expect("invalid url")
      .build()
      .expect("should build request");

    assert_eq!(
      request.query_params(),
      vec![
        ("b".to_string(), "2".to_string()),
        ("a".to_string(), "1".to_string())
      ]
    );
  }
}
