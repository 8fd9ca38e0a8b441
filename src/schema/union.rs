//! Untagged unions resolved by ordered structural trial.
//!
//! Some legacy payloads carry no tag, so the variant is recovered by trying
//! each candidate shape in declaration order and keeping the first one that
//! validates cleanly. Variant order is therefore part of the contract:
//! swapping two overlapping variants changes which one wins.
//!
//! When no variant matches, the report names the tried variants and then
//! repeats the violations of the closest variant at their real paths, so a
//! deck with one bad slide still points at that slide's field.

use serde_json::Value;
use tracing::trace;

use super::contract::Contract;
use super::cursor::Cursor;
use super::diagnostic::{Constraint, Violation};
use super::field::{Field, shape};

/// Ordered trial over the variants of an untagged union.
///
/// Failed attempts run on forked cursors. If every attempt fails, one
/// `shape.no_variant` violation naming the tried variants is recorded,
/// followed by the violations of the closest variant.
///
/// The closest variant is the one with the fewest violations among those
/// that accepted the value's outer type, that is, whose violations all sit
/// below the union's own path. Ties go to the earlier variant. When no
/// variant got past the outer type only `shape.no_variant` is recorded.
#[derive(Debug)]
pub struct Trial<'c, 'v, T> {
    cx: &'c mut Cursor,
    value: &'v Value,
    matched: Option<T>,
    tried: Vec<&'static str>,
    closest: Option<Vec<Violation>>,
}

impl<'c, 'v, T> Trial<'c, 'v, T> {
    /// Starts a trial of `value` at the cursor's current path.
    pub const fn new(cx: &'c mut Cursor, value: &'v Value) -> Self {
        Self {
            cx,
            value,
            matched: None,
            tried: Vec::new(),
            closest: None,
        }
    }

    /// Tries a whole contract as the next variant.
    #[must_use]
    pub fn attempt<C: Contract>(self, wrap: impl FnOnce(C) -> T) -> Self {
        self.attempt_field(C::NAME, shape::<C>(), wrap)
    }

    /// Tries an arbitrary field spec, labelled `name`, as the next variant.
    #[must_use]
    pub fn attempt_field<F: Field>(
        mut self,
        name: &'static str,
        field: F,
        wrap: impl FnOnce(F::Out) -> T,
    ) -> Self {
        if self.matched.is_some() {
            return self;
        }
        self.tried.push(name);
        let mut scratch = self.cx.fork();
        match field.check(&mut scratch, self.value) {
            Some(out) if scratch.is_clean() => self.matched = Some(wrap(out)),
            _ => {
                trace!(
                    variant = name,
                    path = %self.cx.path(),
                    violations = scratch.violation_count(),
                    "union variant rejected"
                );
                self.keep_if_closer(scratch.into_violations());
            }
        }
        self
    }

    fn keep_if_closer(&mut self, violations: Vec<Violation>) {
        let depth = self.cx.path().segments().len();
        let nested = !violations.is_empty()
            && violations
                .iter()
                .all(|v| v.path.segments().len() > depth);
        let closer = self
            .closest
            .as_ref()
            .is_none_or(|best| violations.len() < best.len());
        if nested && closer {
            self.closest = Some(violations);
        }
    }

    /// Returns the first matching variant, or records `shape.no_variant`
    /// and the closest variant's violations.
    pub fn finish(self) -> Option<T> {
        if self.matched.is_none() {
            self.cx.violate(
                Constraint::NoVariant {
                    variants: self.tried,
                },
                Some(self.value),
            );
            if let Some(violations) = self.closest {
                self.cx.extend(violations);
            }
            return None;
        }
        self.matched
    }
}
