use regex::{Error, Regex};
use url::Url;

/// A Constraint narrows stub matching with a predicate over the request URL.
///
/// All constraints registered on a stub must hold for the stub to match; a
/// stub with no constraints matches unconditionally at this stage.
pub trait Constraint: Sync + Send {
  /// Returns true when the constraint holds for the given URL.
  fn matches(&self, url: &Url) -> bool;
}

impl<F> Constraint for F
where
  F: Fn(&Url) -> bool + Sync + Send,
{
  /// Matches if calling the closure with the given URL returns true.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::{Constraint, Url};
  /// let constraint = |url: &Url| url.path().contains("/items");
  ///
  /// let url: Url = "http://example.com/items?type=book".parse().unwrap();
  /// assert!(constraint.matches(&url));
  /// ```
  fn matches(&self, url: &Url) -> bool {
    self(url)
  }
}

/// Matches the path segment of a URL against a regex pattern.
#[derive(Clone, Debug)]
pub struct PathConstraint {
  pattern: Regex,
}

impl PathConstraint {
  /// Constructs a new PathConstraint matching the given Regex pattern.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::PathConstraint;
  /// let constraint = PathConstraint::new("^/items/\\d+$")
  ///   .expect("should be valid regex");
  /// ```
  pub fn new<R>(pattern: R) -> Result<Box<Self>, Error>
  where
    R: TryInto<Regex>,
    Error: From<<R as TryInto<Regex>>::Error>,
  {
    let pattern = pattern.try_into()?;
    Ok(Box::new(Self { pattern }))
  }
}

impl Constraint for PathConstraint {
  /// A PathConstraint holds when the path segment of the URL matches the
  /// pattern given at construction.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::{Constraint, PathConstraint, Url};
  /// let constraint = PathConstraint::new("^/items/\\d+$")
  ///   .expect("should be valid regex");
  ///
  /// let url: Url = "http://example.com/items/42".parse().unwrap();
  /// assert!(constraint.matches(&url));
  ///
  /// let url: Url = "http://example.com/items/latest".parse().unwrap();
  /// assert!(!constraint.matches(&url));
  /// ```
  fn matches(&self, url: &Url) -> bool {
    self.pattern.is_match(url.path())
  }
}

/// Matches the raw query string of a URL against a regex pattern.
#[derive(Clone, Debug)]
pub struct QueryConstraint {
  pattern: Regex,
}

impl QueryConstraint {
  /// Constructs a new QueryConstraint matching the given Regex pattern.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::QueryConstraint;
  /// let constraint = QueryConstraint::new("type=book")
  ///   .expect("should be valid regex");
  /// ```
  pub fn new<R>(pattern: R) -> Result<Box<Self>, Error>
  where
    R: TryInto<Regex>,
    Error: From<<R as TryInto<Regex>>::Error>,
  {
    let pattern = pattern.try_into()?;
    Ok(Box::new(Self { pattern }))
  }
}

impl Constraint for QueryConstraint {
  /// A QueryConstraint holds when the URL has a query string and it matches
  /// the pattern given at construction.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::{Constraint, QueryConstraint, Url};
  /// let constraint = QueryConstraint::new("type=book")
  ///   .expect("should be valid regex");
  ///
  /// let url: Url = "http://example.com/items?type=book".parse().unwrap();
  /// assert!(constraint.matches(&url));
  ///
  /// let url: Url = "http://example.com/items".parse().unwrap();
  /// assert!(!constraint.matches(&url));
  /// ```
  fn matches(&self, url: &Url) -> bool {
    url
      .query()
      .map(|query| self.pattern.is_match(query))
      .unwrap_or(false)
  }
}

// Tested via Constraint::and(...) and Constraint::or(...) doctests

/// Logical grouping of constraints using either AND or OR combination.
pub enum ConstraintGroup<A, B>
where
  A: Constraint + ?Sized,
  B: Constraint + ?Sized,
{
  /// Combines two constraints using logical OR.
  Or(Box<A>, Box<B>),

  /// Combines two constraints using logical AND.
  And(Box<A>, Box<B>),
}

impl<A, B> ConstraintGroup<A, B>
where
  A: Constraint + ?Sized,
  B: Constraint + ?Sized,
{
  /// Constructs a new ConstraintGroup combining both constraints with
  /// logical AND.
  pub fn and(a: Box<A>, b: Box<B>) -> Box<Self> {
    Box::new(ConstraintGroup::And(a, b))
  }

  /// Constructs a new ConstraintGroup combining both constraints with
  /// logical OR.
  pub fn or(a: Box<A>, b: Box<B>) -> Box<Self> {
    Box::new(ConstraintGroup::Or(a, b))
  }
}

impl<A, B> Constraint for ConstraintGroup<A, B>
where
  A: Constraint + ?Sized,
  B: Constraint + ?Sized,
{
  fn matches(&self, url: &Url) -> bool {
    match self {
      ConstraintGroup::Or(a, b) => a.matches(url) || b.matches(url),
      ConstraintGroup::And(a, b) => a.matches(url) && b.matches(url),
    }
  }
}

impl<T: ?Sized> ConstraintExt for T where T: Constraint {}

pub trait ConstraintExt: Constraint {
  /// Makes a new constraint which must pass both constraints.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::{Constraint, ConstraintExt, PathConstraint, QueryConstraint, Url};
  /// let path = PathConstraint::new("^/items$")
  ///   .expect("should be valid regex");
  /// let query = QueryConstraint::new("type=book")
  ///   .expect("should be valid regex");
  ///
  /// let constraint = path.and(query);
  ///
  /// let url: Url = "http://example.com/items?type=book".parse().unwrap();
  /// assert!(constraint.matches(&url));
  ///
  /// let url: Url = "http://example.com/items?type=dvd".parse().unwrap();
  /// assert!(!constraint.matches(&url));
  /// ```
  fn and<C>(self: Box<Self>, other: Box<C>) -> Box<ConstraintGroup<Self, C>>
  where
    C: Constraint + ?Sized,
  {
    ConstraintGroup::and(self, other)
  }

  /// Makes a new constraint which must pass either constraint.
  ///
  /// # Examples
  ///
  /// ```
  /// # use http_model::{Constraint, ConstraintExt, QueryConstraint, Url};
  /// let book = QueryConstraint::new("type=book")
  ///   .expect("should be valid regex");
  /// let dvd = QueryConstraint::new("type=dvd")
  ///   .expect("should be valid regex");
  ///
  /// let constraint = book.or(dvd);
  ///
  /// let url: Url = "http://example.com/items?type=dvd".parse().unwrap();
  /// assert!(constraint.matches(&url));
  /// ```
  fn or<C>(self: Box<Self>, other: Box<C>) -> Box<ConstraintGroup<Self, C>>
  where
    C: Constraint + ?Sized,
  {
    ConstraintGroup::or(self, other)
  }
}
