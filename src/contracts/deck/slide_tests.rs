//! Unit tests for slides and the slide-array union.

use rstest::*;
use serde_json::{Value, json};

use super::*;
use crate::schema::{ViolationCode, parse_strict};

fn title_block(id: &str) -> Value {
    json!({ "id": id, "type": "title", "order": 0, "text": "Q1 impact" })
}

#[fixture]
fn slide() -> Value {
    json!({ "id": "s1", "slideNumber": 1, "blocks": [title_block("b1")] })
}

#[rstest]
fn slide_defaults(slide: Value) {
    let parsed: Slide = parse_strict(&slide).expect("slide should validate");
    assert_eq!(parsed.layout, SlideLayout::TitleContent);
    assert!(!parsed.hidden);
    assert!(parsed.notes.is_none());
}

#[rstest]
fn slide_numbers_start_at_one(mut slide: Value) {
    slide["slideNumber"] = json!(0);
    let violations = parse_strict::<Slide>(&slide).expect_err("slide zero");
    let violation = violations
        .at("slideNumber")
        .into_iter()
        .next()
        .expect("violation at slideNumber");
    assert_eq!(violation.code(), ViolationCode::TooSmall);
}

#[rstest]
fn slide_number_beyond_u32_names_the_u32_limit(mut slide: Value) {
    slide["slideNumber"] = json!(4_294_967_296_u64);
    let violations = parse_strict::<Slide>(&slide).expect_err("slide number overflow");
    let violation = violations
        .at("slideNumber")
        .into_iter()
        .next()
        .expect("violation at slideNumber");
    assert_eq!(violation.code(), ViolationCode::TooBig);
    assert_eq!(violation.constraint.to_string(), "must be <= 4294967295");
}

#[rstest]
fn nested_block_paths_are_indexed(mut slide: Value) {
    slide["blocks"] = json!([title_block("b1"), { "id": "b2", "type": "quote", "order": 1 }]);
    let violations = parse_strict::<Slide>(&slide).expect_err("quote without text");
    assert_eq!(violations.at("blocks[1].text").len(), 1);
}

#[rstest]
fn legacy_slide_defaults_blocks() {
    let value = json!({ "type": "cover", "title": "Impact 2024" });
    let parsed: LegacySlide = parse_strict(&value).expect("legacy slide should validate");
    assert_eq!(parsed.kind, LegacySlideType::Cover);
    assert!(parsed.blocks.is_empty());
}

#[rstest]
fn current_slides_win_the_trial(slide: Value) {
    let slides: DeckSlides = parse_strict(&json!([slide])).expect("slides should validate");
    assert!(matches!(slides, DeckSlides::Current(_)));
    assert_eq!(slides.len(), 1);
    assert_eq!(slides.blocks().count(), 1);
}

#[rstest]
fn legacy_slides_are_recognised() {
    let value = json!([
        { "type": "cover", "title": "Impact 2024" },
        { "type": "metrics", "title": "Numbers", "blocks": [title_block("b7")] }
    ]);
    let slides: DeckSlides = parse_strict(&value).expect("legacy slides should validate");
    assert!(matches!(slides, DeckSlides::Legacy(_)));
    let ids: Vec<&str> = slides.blocks().map(|b| b.id.as_str()).collect();
    assert_eq!(ids, ["b7"]);
}

#[rstest]
fn empty_slide_array_resolves_as_current() {
    let slides: DeckSlides = parse_strict(&json!([])).expect("empty slides validate");
    assert!(matches!(slides, DeckSlides::Current(_)));
    assert!(slides.is_empty());
}

#[rstest]
fn mixed_arrays_match_no_variant(slide: Value) {
    let value = json!([slide, { "type": "cover", "title": "Impact 2024" }]);
    let violations = parse_strict::<DeckSlides>(&value).expect_err("mixed slides");
    let violation = violations.iter().next().expect("union violation first");
    assert_eq!(violation.code(), ViolationCode::NoVariant);
    assert!(violation.path.is_root());
    assert_eq!(
        violation.constraint.to_string(),
        "did not match any variant (tried Slide[], LegacySlide[])"
    );
    // The legacy reading misses two fields, the current reading three.
    assert_eq!(violations.len(), 3);
    assert_eq!(violations.at("[0].type").len(), 1);
    assert_eq!(violations.at("[0].title").len(), 1);
}

#[rstest]
fn bad_current_slide_points_at_its_field(mut slide: Value) {
    slide["blocks"][0]["order"] = json!(-1);
    let violations = parse_strict::<DeckSlides>(&json!([slide])).expect_err("negative order");
    assert_eq!(violations.len(), 2);
    let violation = violations
        .at("[0].blocks[0].order")
        .into_iter()
        .next()
        .expect("violation at the block order");
    assert_eq!(violation.code(), ViolationCode::TooSmall);
}

#[rstest]
#[case::boolean(json!(true))]
#[case::object(json!({ "id": "s1" }))]
fn non_array_slides_are_only_no_variant(#[case] input: Value) {
    let violations = parse_strict::<DeckSlides>(&input).expect_err("not an array");
    assert_eq!(violations.len(), 1);
    let violation = violations.iter().next().expect("one violation");
    assert_eq!(violation.code(), ViolationCode::NoVariant);
}
