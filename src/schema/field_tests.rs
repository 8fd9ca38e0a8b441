//! Unit tests for field specifications.

use rstest::*;
use serde_json::json;

use super::*;
use crate::schema::diagnostic::{Violation, ViolationCode};
use crate::schema::literal_set;

literal_set! {
    /// Test palette.
    enum Colour {
        /// Red.
        Red => "red",
        /// Green.
        Green => "green",
    }
}

/// Runs `field` against `value` at the root and returns the output with
/// every recorded violation.
fn run<F: Field>(field: &F, value: &Value) -> (Option<F::Out>, Vec<Violation>) {
    let mut cx = Cursor::new();
    let out = field.check(&mut cx, value);
    (out, cx.into_violations())
}

fn codes(violations: &[Violation]) -> Vec<ViolationCode> {
    violations.iter().map(Violation::code).collect()
}

#[rstest]
#[case::within("abc", vec![])]
#[case::empty("", vec![ViolationCode::TooShort])]
#[case::long("abcdef", vec![ViolationCode::TooLong])]
fn text_length_bounds(#[case] input: &str, #[case] expected: Vec<ViolationCode>) {
    let (out, violations) = run(&text().non_empty().max(5), &json!(input));
    assert_eq!(codes(&violations), expected);
    assert_eq!(out.is_some(), expected.is_empty());
}

#[rstest]
fn text_counts_characters_not_bytes() {
    let (out, violations) = run(&text().max(3), &json!("åøæ"));
    assert!(violations.is_empty());
    assert_eq!(out.as_deref(), Some("åøæ"));
}

#[rstest]
fn text_reports_every_failed_bound() {
    let (out, violations) = run(&text().max(2).format(Format::Currency), &json!("dollars"));
    assert!(out.is_none());
    assert_eq!(
        codes(&violations),
        [ViolationCode::TooLong, ViolationCode::InvalidFormat]
    );
}

#[rstest]
#[case::number(json!(3))]
#[case::null(json!(null))]
#[case::array(json!(["a"]))]
fn text_rejects_non_strings(#[case] input: Value) {
    let (_, violations) = run(&text(), &input);
    assert_eq!(codes(&violations), [ViolationCode::InvalidType]);
}

#[rstest]
#[case::https("https://cdn.example.org/a.png", true)]
#[case::http("http://example.org", true)]
#[case::relative("/images/a.png", false)]
#[case::ftp("ftp://example.org/a", false)]
fn url_requires_absolute_http(#[case] input: &str, #[case] accepted: bool) {
    let (out, _) = run(&url(), &json!(input));
    assert_eq!(out.is_some(), accepted);
}

#[rstest]
#[case::lower_inclusive(0.0, true)]
#[case::upper_inclusive(1.0, true)]
#[case::below(-0.1, false)]
#[case::above(1.1, false)]
fn number_range_is_inclusive(#[case] input: f64, #[case] accepted: bool) {
    let (out, _) = run(&number().range(0.0, 1.0), &json!(input));
    assert_eq!(out.is_some(), accepted);
}

#[rstest]
fn number_gt_excludes_bound() {
    let (out, violations) = run(&number().gt(0.0), &json!(0));
    assert!(out.is_none());
    assert_eq!(
        violations.first().map(|v| v.constraint.clone()),
        Some(Constraint::TooSmall {
            minimum: 0.0,
            inclusive: false
        })
    );
}

#[rstest]
fn number_rejects_numeric_strings() {
    let (_, violations) = run(&number(), &json!("12"));
    assert_eq!(codes(&violations), [ViolationCode::InvalidType]);
}

#[rstest]
#[case::integral(json!(7), Some(7))]
#[case::integral_float(json!(7.0), Some(7))]
#[case::fractional(json!(7.5), None)]
#[case::string(json!("7"), None)]
fn integer_accepts_integral_numbers(#[case] input: Value, #[case] expected: Option<u32>) {
    let (out, _) = run(&integer::<u32>(), &input);
    assert_eq!(out, expected);
}

#[rstest]
fn integer_bounds_checked_before_conversion() {
    let (out, violations) = run(&integer::<u8>().range(1, 4), &json!(5));
    assert!(out.is_none());
    assert_eq!(codes(&violations), [ViolationCode::TooBig]);
}

#[rstest]
#[case::u8_over(run(&integer::<u8>(), &json!(300)).1, "must be <= 255")]
#[case::u32_over(run(&integer::<u32>(), &json!(4_294_967_296_u64)).1, "must be <= 4294967295")]
#[case::u32_negative(run(&integer::<u32>(), &json!(-3)).1, "must be >= 0")]
#[case::declared_bound_wins(run(&integer::<u8>().max(1_000), &json!(256)).1, "must be <= 255")]
fn integer_out_of_target_range_names_the_type_limit(
    #[case] violations: Vec<Violation>,
    #[case] message: &str,
) {
    assert_eq!(violations.len(), 1);
    let violation = violations.first().expect("one violation");
    assert_eq!(violation.constraint.to_string(), message);
}

#[rstest]
fn count_rejects_negative() {
    let (_, violations) = run(&count(), &json!(-1));
    assert_eq!(codes(&violations), [ViolationCode::TooSmall]);
}

#[rstest]
fn count_accepts_values_beyond_i64() {
    let (out, violations) = run(&count(), &json!(u64::MAX));
    assert!(violations.is_empty());
    assert_eq!(out, Some(u64::MAX));
}

#[rstest]
fn signed_integer_rejects_values_beyond_i64() {
    let (out, violations) = run(&integer::<i64>(), &json!(u64::MAX));
    assert!(out.is_none());
    assert_eq!(codes(&violations), [ViolationCode::TooBig]);
}

#[rstest]
fn boolean_does_not_coerce() {
    let (_, violations) = run(&boolean(), &json!("true"));
    assert_eq!(codes(&violations), [ViolationCode::InvalidType]);
}

#[rstest]
fn literal_lists_allowed_members() {
    let (out, violations) = run(&literal::<Colour>(), &json!("blue"));
    assert!(out.is_none());
    assert_eq!(
        violations.first().map(|v| v.constraint.clone()),
        Some(Constraint::Enum {
            allowed: vec!["red", "green"]
        })
    );
}

#[rstest]
fn literal_is_case_sensitive() {
    let (out, _) = run(&literal::<Colour>(), &json!("Red"));
    assert!(out.is_none());
}

#[rstest]
fn timestamp_normalises_to_utc() {
    let (out, _) = run(&timestamp(), &json!("2024-03-01T12:00:00+02:00"));
    assert_eq!(
        out.map(|dt| dt.to_rfc3339()),
        Some("2024-03-01T10:00:00+00:00".to_owned())
    );
}

#[rstest]
#[case::garbage(json!("not-a-uuid"))]
#[case::truncated(json!("123e4567-e89b-12d3-a456"))]
fn uuid_reports_format(#[case] input: Value) {
    let (_, violations) = run(&uuid(), &input);
    assert_eq!(codes(&violations), [ViolationCode::InvalidFormat]);
}

#[rstest]
#[case::leap_day("2024-02-29", true)]
#[case::not_leap("2023-02-29", false)]
#[case::with_time("2024-02-01T00:00:00Z", false)]
fn date_is_calendar_checked(#[case] input: &str, #[case] accepted: bool) {
    let (out, _) = run(&date(), &json!(input));
    assert_eq!(out.is_some(), accepted);
}

#[rstest]
#[case::plain("1250", true)]
#[case::fraction("-12.50", true)]
#[case::exponent("1e3", false)]
#[case::trailing_dot("12.", false)]
fn decimal_strings(#[case] input: &str, #[case] accepted: bool) {
    let (out, _) = run(&decimal(), &json!(input));
    assert_eq!(out.is_some(), accepted);
}

#[rstest]
fn nullable_accepts_null_only_as_none() {
    let field = nullable(text());
    assert_eq!(run(&field, &json!(null)).0, Some(None));
    assert_eq!(run(&field, &json!("x")).0, Some(Some("x".to_owned())));
    assert_eq!(codes(&run(&field, &json!(1)).1), [ViolationCode::InvalidType]);
}

#[rstest]
fn list_reports_each_bad_item_by_index() {
    let (out, violations) = run(&list(count()), &json!([1, "two", 3, -4]));
    assert!(out.is_none());
    let paths: Vec<String> = violations.iter().map(|v| v.path.to_string()).collect();
    assert_eq!(paths, ["[1]", "[3]"]);
}

#[rstest]
fn list_bounds_and_items_are_both_reported() {
    let (_, violations) = run(&list(text()).max(1), &json!(["a", 2]));
    assert_eq!(
        codes(&violations),
        [ViolationCode::TooLong, ViolationCode::InvalidType]
    );
}

#[rstest]
fn record_of_keeps_input_order() {
    let (out, violations) = run(&record_of::<Colour, _>(count()), &json!({ "green": 2, "red": 1 }));
    assert!(violations.is_empty());
    let keys: Vec<Colour> = out.map(|m| m.keys().copied().collect()).unwrap_or_default();
    assert_eq!(keys, [Colour::Green, Colour::Red]);
}

#[rstest]
fn record_of_checks_key_and_value() {
    let (out, violations) = run(&record_of::<Colour, _>(count()), &json!({ "blue": -1 }));
    assert!(out.is_none());
    assert_eq!(
        codes(&violations),
        [ViolationCode::InvalidEnum, ViolationCode::TooSmall]
    );
    assert!(violations.iter().all(|v| v.path == "blue"));
}

#[rstest]
fn any_json_passes_through() {
    let value = json!({ "nested": [1, null, "x"] });
    let (out, violations) = run(&json(), &value);
    assert!(violations.is_empty());
    assert_eq!(out, Some(value));
}
