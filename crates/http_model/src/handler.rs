use super::{Request, Response};

/// Enables a type to support handling HTTP requests.
///
/// This is the seam between the stub engine and the transport driving it:
/// the transport parses a request off the wire, hands it to a `Handler`, and
/// delivers whatever `Response` comes back.
///
/// # Example
///
/// ```
/// use http_model::{Handler, Headers, Request, Response};
///
/// struct EchoHandler;
///
/// impl Handler for EchoHandler {
///   type Error = String;
///
///   fn handle(&self, request: Request) -> Result<Response, Self::Error> {
///     Ok(Response::new(200, Headers::new(), request.body()))
///   }
/// }
///
/// let request = Request::builder()
///   .url("http://example.com/echo").expect("invalid url")
///   .body("hello")
///   .build()
///   .expect("should build request");
///
/// let response = EchoHandler.handle(request).expect("should handle request");
/// assert_eq!(response.body(), "hello");
/// ```
pub trait Handler {
  type Error;

  /// Handles an HTTP request.
  fn handle(&self, request: Request) -> Result<Response, Self::Error>;
}
