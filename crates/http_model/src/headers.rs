use std::collections::HashMap;

/// A multi-map of HTTP header fields.
///
/// Keys are compared as configured, without case folding. `set` replaces all
/// values for a field while `add` appends another line to it.
///
/// # Examples
///
/// ```
/// # use http_model::Headers;
/// let mut headers = Headers::new();
/// headers.set("Content-Type", "text/plain");
///
/// assert_eq!(headers.get("Content-Type"), Some("text/plain".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Headers(HashMap<String, Vec<String>>);

impl Headers {
  /// Creates an empty `Headers` map.
  pub fn new() -> Self {
    Headers(HashMap::new())
  }

  /// Checks if a header field exists.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.set("Content-Type", "text/plain");
  ///
  /// assert!(headers.has("Content-Type"));
  /// assert!(!headers.has("Accept"));
  /// ```
  pub fn has<K>(&self, key: K) -> bool
  where
    K: AsRef<str>,
  {
    self.0.contains_key(key.as_ref())
  }

  /// Returns the last value associated with a header field.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.add("Accept", "text/plain");
  /// headers.add("Accept", "application/json");
  ///
  /// assert_eq!(headers.get("Accept"), Some("application/json".to_string()));
  /// ```
  pub fn get<K>(&self, key: K) -> Option<String>
  where
    K: AsRef<str>,
  {
    self
      .0
      .get(key.as_ref())
      .and_then(|values| values.last().cloned())
  }

  /// Returns all values associated with a header field.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.add("Accept", "text/plain");
  /// headers.add("Accept", "application/json");
  ///
  /// assert_eq!(headers.get_all("Accept"), vec![
  ///   "text/plain".to_string(),
  ///   "application/json".to_string()
  /// ]);
  /// ```
  pub fn get_all<K>(&self, key: K) -> Vec<String>
  where
    K: AsRef<str>,
  {
    self.0.get(key.as_ref()).cloned().unwrap_or_default()
  }

  /// Sets a header field, replacing any existing values.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.set("Content-Type", "text/plain");
  /// headers.set("Content-Type", "text/html");
  ///
  /// assert_eq!(headers.get("Content-Type"), Some("text/html".to_string()));
  /// ```
  pub fn set<K, V>(&mut self, key: K, value: V)
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.0.insert(key.into(), vec![value.into()]);
  }

  /// Adds a value to a header field without replacing existing ones.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.add("Accept", "text/plain");
  /// headers.add("Accept", "application/json");
  ///
  /// assert_eq!(headers.get_all("Accept").len(), 2);
  /// ```
  pub fn add<K, V>(&mut self, key: K, value: V)
  where
    K: Into<String>,
    V: Into<String>,
  {
    self.0.entry(key.into()).or_default().push(value.into());
  }

  /// Removes a header field.
  pub fn remove<K>(&mut self, key: K)
  where
    K: AsRef<str>,
  {
    self.0.remove(key.as_ref());
  }

  /// Clears all headers.
  pub fn clear(&mut self) {
    self.0.clear();
  }

  /// Returns the number of header fields.
  pub fn len(&self) -> usize {
    self.0.len()
  }

  /// Returns true when no header fields are present.
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Returns an iterator over header fields and their values.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::Headers;
  /// let mut headers = Headers::new();
  /// headers.set("Accept", "text/plain");
  ///
  /// for (key, values) in headers.iter() {
  ///   println!("{}: {:?}", key, values);
  /// }
  /// ```
  pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<String>)> {
    self.0.iter()
  }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn set_replaces_all_values() {
    let mut headers = Headers::new();
    headers.add("Accept", "text/plain");
    headers.add("Accept", "application/json");
    headers.set("Accept", "text/xml");

    assert_eq!(headers.get_all("Accept"), vec!["text/xml".to_string()]);
  }

  #[test]
  fn get_on_missing_field_is_none() {
    let headers = Headers::new();

    assert_eq!(headers.get("Accept"), None);
    assert!(headers.get_all("Accept").is_empty());
  }
}
