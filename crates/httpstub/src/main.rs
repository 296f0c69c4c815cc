use httpstub::{Handler, MockServer, Request};

pub fn main() {
  let server = MockServer::new();

  let stub = server
    .get("/status")
    .return_body("OK")
    .as_content_type("text/plain")
    .ok();

  let request = Request::builder()
    .method("GET")
    .url("http://localhost/status")
    .expect("invalid url")
    .build()
    .expect("should build request");

  println!("request: {:#?}", request);

  let response = server.handle(request).expect("should handle request");

  println!("response: {:#?}", response);
  println!("recorded: {} request(s)", stub.request_count());
}
