//! Field specifications: the primitive constraints a single value must
//! meet.
//!
//! Each spec is a small builder value (`text().non_empty().max(200)`,
//! `number().range(0.0, 1.0)`) that implements [`Field`]. Specs compose:
//! [`list`] and [`nullable`] wrap another spec and [`shape`] defers to a
//! whole [`Contract`].

use std::marker::PhantomData;

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use serde_json::Value;
use uuid::Uuid;

use super::contract::Contract;
use super::cursor::Cursor;
use super::diagnostic::Constraint;
use super::format::Format;
use super::literal::Literal;
use super::newtypes::DecimalString;

/// Largest float magnitude accepted as an exact integer.
const MAX_EXACT_FLOAT_INT: f64 = 9_007_199_254_740_991.0;

/// A constraint on a single JSON value that produces a typed output.
pub trait Field {
    /// The validated output type.
    type Out;

    /// Checks `value`, recording violations on `cx`.
    ///
    /// Returns `None` if and only if at least one violation was recorded.
    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<Self::Out>;
}

fn type_error(cx: &mut Cursor, expected: &'static str, value: &Value) {
    cx.violate(Constraint::Type { expected }, Some(value));
}

// ── Text ────────────────────────────────────────────────────────────

/// String field with optional length bounds and lexical format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text {
    min_chars: Option<usize>,
    max_chars: Option<usize>,
    format: Option<Format>,
}

/// Starts a string field spec.
#[must_use]
pub const fn text() -> Text {
    Text {
        min_chars: None,
        max_chars: None,
        format: None,
    }
}

impl Text {
    /// Requires at least `n` characters.
    #[must_use]
    pub const fn min(mut self, n: usize) -> Self {
        self.min_chars = Some(n);
        self
    }

    /// Allows at most `n` characters.
    #[must_use]
    pub const fn max(mut self, n: usize) -> Self {
        self.max_chars = Some(n);
        self
    }

    /// Requires at least one character.
    #[must_use]
    pub const fn non_empty(self) -> Self {
        self.min(1)
    }

    /// Requires a lexical format.
    #[must_use]
    pub const fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }
}

impl Field for Text {
    type Out = String;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<String> {
        let Value::String(s) = value else {
            type_error(cx, "string", value);
            return None;
        };
        let before = cx.violation_count();
        let chars = s.chars().count();
        if let Some(minimum) = self.min_chars.filter(|min| chars < *min) {
            cx.violate(
                Constraint::TooShort {
                    minimum,
                    unit: "characters",
                },
                Some(value),
            );
        }
        if let Some(maximum) = self.max_chars.filter(|max| chars > *max) {
            cx.violate(
                Constraint::TooLong {
                    maximum,
                    unit: "characters",
                },
                Some(value),
            );
        }
        if let Some(format) = self.format.filter(|format| !format.matches(s)) {
            cx.violate(Constraint::Format { format }, Some(value));
        }
        (cx.violation_count() == before).then(|| s.clone())
    }
}

/// Absolute `http(s)` URL string.
#[must_use]
pub const fn url() -> Text {
    text().format(Format::Url)
}

// ── Numbers ─────────────────────────────────────────────────────────

/// Floating-point field with optional inclusive or exclusive bounds.
#[derive(Debug, Clone, Copy, Default)]
pub struct Number {
    lower: Option<(f64, bool)>,
    upper: Option<(f64, bool)>,
}

/// Starts a number field spec.
#[must_use]
pub const fn number() -> Number {
    Number {
        lower: None,
        upper: None,
    }
}

impl Number {
    /// Requires `value >= minimum`.
    #[must_use]
    pub const fn min(mut self, minimum: f64) -> Self {
        self.lower = Some((minimum, true));
        self
    }

    /// Requires `value > minimum`.
    #[must_use]
    pub const fn gt(mut self, minimum: f64) -> Self {
        self.lower = Some((minimum, false));
        self
    }

    /// Requires `value <= maximum`.
    #[must_use]
    pub const fn max(mut self, maximum: f64) -> Self {
        self.upper = Some((maximum, true));
        self
    }

    /// Requires `minimum <= value <= maximum`.
    #[must_use]
    pub const fn range(self, minimum: f64, maximum: f64) -> Self {
        self.min(minimum).max(maximum)
    }

    /// Requires `value >= 0`.
    #[must_use]
    pub const fn non_negative(self) -> Self {
        self.min(0.0)
    }

    fn check_bounds(&self, cx: &mut Cursor, n: f64, value: &Value) -> bool {
        let mut ok = true;
        if let Some((minimum, inclusive)) = self.lower {
            let below = if inclusive { n < minimum } else { n <= minimum };
            if below {
                cx.violate(Constraint::TooSmall { minimum, inclusive }, Some(value));
                ok = false;
            }
        }
        if let Some((maximum, inclusive)) = self.upper {
            let above = if inclusive { n > maximum } else { n >= maximum };
            if above {
                cx.violate(Constraint::TooBig { maximum, inclusive }, Some(value));
                ok = false;
            }
        }
        ok
    }
}

impl Field for Number {
    type Out = f64;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<f64> {
        let Some(n) = value.as_f64() else {
            type_error(cx, "number", value);
            return None;
        };
        self.check_bounds(cx, n, value).then_some(n)
    }
}

/// Integer field converted into `T` after bounds checking.
#[derive(Debug, Clone, Copy)]
pub struct Integer<T> {
    min: Option<i64>,
    max: Option<i64>,
    out: PhantomData<fn() -> T>,
}

/// Starts an integer field spec producing `T`.
#[must_use]
pub const fn integer<T>() -> Integer<T> {
    Integer {
        min: None,
        max: None,
        out: PhantomData,
    }
}

/// Non-negative integer count.
#[must_use]
pub const fn count() -> Integer<u64> {
    integer::<u64>().min(0)
}

impl<T> Integer<T> {
    /// Requires `value >= minimum`.
    #[must_use]
    pub const fn min(mut self, minimum: i64) -> Self {
        self.min = Some(minimum);
        self
    }

    /// Requires `value <= maximum`.
    #[must_use]
    pub const fn max(mut self, maximum: i64) -> Self {
        self.max = Some(maximum);
        self
    }

    /// Requires `minimum <= value <= maximum`.
    #[must_use]
    pub const fn range(self, minimum: i64, maximum: i64) -> Self {
        self.min(minimum).max(maximum)
    }
}

/// Integer types an [`Integer`] field can produce.
///
/// `MIN` and `MAX` bound every value the field accepts, on top of any
/// declared bound, so a value that does not fit the output type is
/// reported against the type's own limit.
pub trait IntegerOut: TryFrom<i128> {
    /// Smallest representable value.
    const MIN: i128;
    /// Largest representable value.
    const MAX: i128;
}

macro_rules! integer_out {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntegerOut for $ty {
                const MIN: i128 = <$ty>::MIN as i128;
                const MAX: i128 = <$ty>::MAX as i128;
            }
        )+
    };
}

integer_out!(u8, u16, u32, u64, i32, i64);

/// Reads an integral JSON number; integral floats such as `12.0` count.
#[expect(
    clippy::cast_possible_truncation,
    reason = "the float is integral and within the exact-integer range"
)]
fn as_integer(value: &Value) -> Option<i128> {
    if let Some(i) = value.as_i64() {
        return Some(i128::from(i));
    }
    if let Some(u) = value.as_u64() {
        return Some(i128::from(u));
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_INT)
        .map(|f| f as i128)
}

#[expect(
    clippy::cast_precision_loss,
    reason = "bounds are only rendered in messages"
)]
const fn bound(n: i128) -> f64 {
    n as f64
}

impl<T: IntegerOut> Integer<T> {
    /// Declared lower bound, raised to `T::MIN` when looser.
    fn lower(&self) -> i128 {
        self.min.map_or(T::MIN, |min| i128::from(min).max(T::MIN))
    }

    /// Declared upper bound, lowered to `T::MAX` when looser.
    fn upper(&self) -> i128 {
        self.max.map_or(T::MAX, |max| i128::from(max).min(T::MAX))
    }
}

impl<T: IntegerOut> Field for Integer<T> {
    type Out = T;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<T> {
        let Some(n) = as_integer(value) else {
            type_error(cx, "integer", value);
            return None;
        };
        let (minimum, maximum) = (self.lower(), self.upper());
        if n < minimum {
            cx.violate(
                Constraint::TooSmall {
                    minimum: bound(minimum),
                    inclusive: true,
                },
                Some(value),
            );
            return None;
        }
        if n > maximum {
            cx.violate(
                Constraint::TooBig {
                    maximum: bound(maximum),
                    inclusive: true,
                },
                Some(value),
            );
            return None;
        }
        let converted = T::try_from(n).ok();
        if converted.is_none() {
            cx.violate(
                Constraint::TooBig {
                    maximum: bound(T::MAX),
                    inclusive: true,
                },
                Some(value),
            );
        }
        converted
    }
}

// ── Boolean ─────────────────────────────────────────────────────────

/// Boolean field.
#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

/// Starts a boolean field spec.
#[must_use]
pub const fn boolean() -> Boolean {
    Boolean
}

impl Field for Boolean {
    type Out = bool;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<bool> {
        let b = value.as_bool();
        if b.is_none() {
            type_error(cx, "boolean", value);
        }
        b
    }
}

// ── Literals ────────────────────────────────────────────────────────

/// Field restricted to a closed literal set.
#[derive(Debug, Clone, Copy)]
pub struct LiteralField<E>(PhantomData<fn() -> E>);

/// Starts a literal-set field spec.
#[must_use]
pub const fn literal<E: Literal>() -> LiteralField<E> {
    LiteralField(PhantomData)
}

impl<E: Literal> Field for LiteralField<E> {
    type Out = E;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<E> {
        let Value::String(s) = value else {
            type_error(cx, "string", value);
            return None;
        };
        let member = E::parse(s);
        if member.is_none() {
            cx.violate(
                Constraint::Enum {
                    allowed: E::names(),
                },
                Some(value),
            );
        }
        member
    }
}

// ── Typed formats ───────────────────────────────────────────────────

/// UUID string parsed into [`Uuid`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidField;

/// Starts a UUID field spec.
#[must_use]
pub const fn uuid() -> UuidField {
    UuidField
}

impl Field for UuidField {
    type Out = Uuid;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<Uuid> {
        parse_formatted(cx, value, Format::Uuid, |s| Uuid::try_parse(s).ok())
    }
}

/// RFC 3339 timestamp normalised to UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timestamp;

/// Starts a timestamp field spec.
#[must_use]
pub const fn timestamp() -> Timestamp {
    Timestamp
}

impl Field for Timestamp {
    type Out = DateTime<Utc>;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<DateTime<Utc>> {
        parse_formatted(cx, value, Format::DateTime, |s| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
    }
}

/// Calendar date, `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateField;

/// Starts a calendar date field spec.
#[must_use]
pub const fn date() -> DateField {
    DateField
}

impl Field for DateField {
    type Out = NaiveDate;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<NaiveDate> {
        parse_formatted(cx, value, Format::Date, |s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
        })
    }
}

/// Decimal number carried as a string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal;

/// Starts a decimal-string field spec.
#[must_use]
pub const fn decimal() -> Decimal {
    Decimal
}

impl Field for Decimal {
    type Out = DecimalString;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<DecimalString> {
        parse_formatted(cx, value, Format::Decimal, |s| {
            DecimalString::new(s.to_owned()).ok()
        })
    }
}

fn parse_formatted<T>(
    cx: &mut Cursor,
    value: &Value,
    format: Format,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Option<T> {
    let Value::String(s) = value else {
        type_error(cx, "string", value);
        return None;
    };
    let parsed = parse(s);
    if parsed.is_none() {
        cx.violate(Constraint::Format { format }, Some(value));
    }
    parsed
}

// ── Any JSON ────────────────────────────────────────────────────────

/// Accepts any JSON value unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnyJson;

/// Starts an unconstrained JSON field spec.
#[must_use]
pub const fn json() -> AnyJson {
    AnyJson
}

impl Field for AnyJson {
    type Out = Value;

    fn check(&self, _cx: &mut Cursor, value: &Value) -> Option<Value> {
        Some(value.clone())
    }
}

// ── Composition ─────────────────────────────────────────────────────

/// Nested contract.
#[derive(Debug, Clone, Copy)]
pub struct Shape<C>(PhantomData<fn() -> C>);

/// Defers to a whole contract.
#[must_use]
pub const fn shape<C: Contract>() -> Shape<C> {
    Shape(PhantomData)
}

impl<C: Contract> Field for Shape<C> {
    type Out = C;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<C> {
        C::check(cx, value)
    }
}

/// Field that also accepts an explicit `null`.
#[derive(Debug, Clone, Copy)]
pub struct Nullable<F>(F);

/// Wraps `field` so that `null` validates as `None`.
#[must_use]
pub const fn nullable<F: Field>(field: F) -> Nullable<F> {
    Nullable(field)
}

impl<F: Field> Field for Nullable<F> {
    type Out = Option<F::Out>;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<Option<F::Out>> {
        if value.is_null() {
            return Some(None);
        }
        self.0.check(cx, value).map(Some)
    }
}

/// Array field with optional item-count bounds.
#[derive(Debug, Clone, Copy)]
pub struct List<F> {
    item: F,
    min_items: Option<usize>,
    max_items: Option<usize>,
}

/// Array whose every element must satisfy `item`.
#[must_use]
pub const fn list<F: Field>(item: F) -> List<F> {
    List {
        item,
        min_items: None,
        max_items: None,
    }
}

impl<F> List<F> {
    /// Requires at least `n` items.
    #[must_use]
    pub const fn min(mut self, n: usize) -> Self {
        self.min_items = Some(n);
        self
    }

    /// Allows at most `n` items.
    #[must_use]
    pub const fn max(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    /// Requires at least one item.
    #[must_use]
    pub const fn non_empty(self) -> Self {
        self.min(1)
    }
}

impl<F: Field> Field for List<F> {
    type Out = Vec<F::Out>;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<Vec<F::Out>> {
        let Value::Array(items) = value else {
            type_error(cx, "array", value);
            return None;
        };
        let before = cx.violation_count();
        if let Some(minimum) = self.min_items.filter(|min| items.len() < *min) {
            cx.violate(
                Constraint::TooShort {
                    minimum,
                    unit: "items",
                },
                Some(value),
            );
        }
        if let Some(maximum) = self.max_items.filter(|max| items.len() > *max) {
            cx.violate(
                Constraint::TooLong {
                    maximum,
                    unit: "items",
                },
                Some(value),
            );
        }
        let checked: Vec<Option<F::Out>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| cx.at_index(index, |cx| self.item.check(cx, item)))
            .collect();
        if cx.violation_count() != before {
            return None;
        }
        checked.into_iter().collect()
    }
}

/// Object whose keys come from a literal set and whose values all satisfy
/// one field spec.
#[derive(Debug, Clone, Copy)]
pub struct RecordOf<K, F> {
    value: F,
    key: PhantomData<fn() -> K>,
}

/// Map keyed by members of `K`, preserving input key order.
#[must_use]
pub const fn record_of<K: Literal, F: Field>(value: F) -> RecordOf<K, F> {
    RecordOf {
        value,
        key: PhantomData,
    }
}

impl<K: Literal, F: Field> Field for RecordOf<K, F> {
    type Out = IndexMap<K, F::Out>;

    fn check(&self, cx: &mut Cursor, value: &Value) -> Option<IndexMap<K, F::Out>> {
        let Value::Object(map) = value else {
            type_error(cx, "object", value);
            return None;
        };
        let before = cx.violation_count();
        let mut out = IndexMap::with_capacity(map.len());
        for (raw_key, raw_value) in map {
            cx.at_key(raw_key, |cx| {
                let key = K::parse(raw_key);
                if key.is_none() {
                    cx.violate(
                        Constraint::Enum {
                            allowed: K::names(),
                        },
                        Some(&Value::String(raw_key.clone())),
                    );
                }
                let checked = self.value.check(cx, raw_value);
                if let (Some(k), Some(v)) = (key, checked) {
                    out.insert(k, v);
                }
            });
        }
        (cx.violation_count() == before).then_some(out)
    }
}

#[cfg(test)]
#[path = "field_tests.rs"]
mod tests;
