//! Field-by-field reading of one JSON object.
//!
//! [`ObjectReader`] is the only way contracts look at object keys, which is
//! what makes unknown keys disappear from validated output: a key nobody
//! asks for is never copied anywhere.

use serde_json::{Map, Value};

use super::cursor::Cursor;
use super::diagnostic::Constraint;
use super::field::{Field, literal};
use super::literal::Literal;

/// Reads declared fields out of a JSON object, recording violations on the
/// shared [`Cursor`].
///
/// Every accessor returns `None` when the field failed; callers bind all
/// fields first and combine them with `?` afterwards, so a failure in one
/// field never hides failures in its siblings.
#[derive(Debug)]
pub struct ObjectReader<'c, 'v> {
    cx: &'c mut Cursor,
    map: &'v Map<String, Value>,
}

impl<'c, 'v> ObjectReader<'c, 'v> {
    pub(crate) const fn new(cx: &'c mut Cursor, map: &'v Map<String, Value>) -> Self {
        Self { cx, map }
    }

    /// Reads a field that must be present.
    pub fn required<F: Field>(&mut self, key: &str, field: F) -> Option<F::Out> {
        let Some(value) = self.map.get(key) else {
            self.cx.violate_at(key, Constraint::Required, None);
            return None;
        };
        self.cx.at_key(key, |cx| field.check(cx, value))
    }

    /// Reads a field that may be absent.
    ///
    /// Absence yields `Some(None)`. An explicit `null` is checked against
    /// `field` like any other value, so it only passes when `field` is
    /// itself [`nullable`](super::field::nullable).
    pub fn optional<F: Field>(&mut self, key: &str, field: F) -> Option<Option<F::Out>> {
        match self.map.get(key) {
            None => Some(None),
            Some(value) => self.cx.at_key(key, |cx| field.check(cx, value)).map(Some),
        }
    }

    /// Reads a field that takes `default` when absent.
    ///
    /// A present value (including `null` or an empty string) is validated
    /// normally and never replaced by the default.
    pub fn defaulted<F: Field>(&mut self, key: &str, field: F, default: F::Out) -> Option<F::Out> {
        match self.map.get(key) {
            None => Some(default),
            Some(value) => self.cx.at_key(key, |cx| field.check(cx, value)),
        }
    }

    /// Reads a field whose default is an *input* value.
    ///
    /// When the key is absent `default` is built and run through `field`,
    /// so a nested shape defaulted to `{}` still gets its own field
    /// defaults filled in before the outer object sees it.
    pub fn defaulted_from<F: Field>(
        &mut self,
        key: &str,
        field: F,
        default: impl FnOnce() -> Value,
    ) -> Option<F::Out> {
        match self.map.get(key) {
            None => {
                let value = default();
                self.cx.at_key(key, |cx| field.check(cx, &value))
            }
            Some(value) => self.cx.at_key(key, |cx| field.check(cx, value)),
        }
    }

    /// Reads the literal tag of a discriminated union.
    pub fn discriminator<E: Literal>(&mut self, key: &str) -> Option<E> {
        self.required(key, literal::<E>())
    }

    /// Returns `true` if `key` is present (even when `null`).
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Gives access to the underlying cursor, for contracts that need to
    /// record cross-field violations.
    pub fn cursor(&mut self) -> &mut Cursor {
        &mut *self.cx
    }
}
