//! Validation cursor: the current field path plus every violation found so
//! far.
//!
//! Field specs and contracts never stop at the first failure. They record a
//! [`Violation`] on the cursor, return `None` for the failing value, and let
//! sibling fields keep validating so one pass reports every problem.

use serde_json::{Map, Value};

use super::diagnostic::{Constraint, Violation};
use super::path::FieldPath;
use super::reader::ObjectReader;
use super::value::describe;

/// Path-tracking violation collector threaded through a validation pass.
#[derive(Debug, Default)]
pub struct Cursor {
    path: FieldPath,
    violations: Vec<Violation>,
}

impl Cursor {
    /// Creates a cursor positioned at the input root.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path of the value currently being checked.
    #[must_use]
    pub const fn path(&self) -> &FieldPath {
        &self.path
    }

    /// Number of violations recorded so far.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` while no violation has been recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Records a violation at the current path.
    ///
    /// `received` is `None` when the value was absent.
    pub fn violate(&mut self, constraint: Constraint, received: Option<&Value>) {
        self.violations.push(Violation {
            path: self.path.clone(),
            constraint,
            received: describe(received),
        });
    }

    /// Records a violation one key below the current path.
    pub fn violate_at(&mut self, key: &str, constraint: Constraint, received: Option<&Value>) {
        self.at_key(key, |cx| cx.violate(constraint, received));
    }

    /// Runs `check` with the path extended by `key`.
    pub fn at_key<T>(&mut self, key: &str, check: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push_key(key);
        let out = check(self);
        self.path.pop();
        out
    }

    /// Runs `check` with the path extended by `index`.
    pub fn at_index<T>(&mut self, index: usize, check: impl FnOnce(&mut Self) -> T) -> T {
        self.path.push_index(index);
        let out = check(self);
        self.path.pop();
        out
    }

    /// Checks that `value` is an object and hands its fields to `read`.
    ///
    /// A non-object value records a single type violation and `read` is
    /// never called.
    pub fn object<T>(
        &mut self,
        value: &Value,
        read: impl FnOnce(&mut ObjectReader<'_, '_>) -> Option<T>,
    ) -> Option<T> {
        let Value::Object(map) = value else {
            self.violate(Constraint::Type { expected: "object" }, Some(value));
            return None;
        };
        self.fields(map, read)
    }

    pub(crate) fn fields<T>(
        &mut self,
        map: &Map<String, Value>,
        read: impl FnOnce(&mut ObjectReader<'_, '_>) -> Option<T>,
    ) -> Option<T> {
        let mut reader = ObjectReader::new(self, map);
        read(&mut reader)
    }

    /// Returns a fresh cursor at the same path with no violations, used
    /// for trial matching where a failed attempt must not leak errors.
    #[must_use]
    pub fn fork(&self) -> Self {
        Self {
            path: self.path.clone(),
            violations: Vec::new(),
        }
    }

    pub(crate) fn extend(&mut self, violations: Vec<Violation>) {
        self.violations.extend(violations);
    }

    pub(crate) fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}
