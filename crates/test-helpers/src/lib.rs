//! Fixture loading and JSON editing helpers shared by the integration
//! tests.
//!
//! Fixtures live under `tests/fixtures/` relative to the crate being tested.
//! Edits address values with JSON Pointers (`/slides/0/blocks/1/type`), so a
//! test can start from one valid document and break exactly one thing.

use serde_json::Value;

/// Directory fixtures are read from.
pub const FIXTURE_DIR: &str = "tests/fixtures";

/// Loads a fixture file as text.
///
/// # Panics
///
/// Panics if the file cannot be read.
#[must_use]
pub fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("{FIXTURE_DIR}/{name}"))
        .unwrap_or_else(|e| panic!("failed to read fixture {name}: {e}"))
}

/// Loads a fixture file and parses it as JSON.
///
/// # Panics
///
/// Panics if the file cannot be read or is not valid JSON.
#[must_use]
pub fn load_json_fixture(name: &str) -> Value {
    let text = load_fixture(name);
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("fixture {name} is not JSON: {e}"))
}

/// Returns `value` with the member at `pointer` removed.
///
/// Object members are removed by key and array items by index.
///
/// # Panics
///
/// Panics if the pointer's parent does not exist or the member is absent.
#[must_use]
pub fn without(mut value: Value, pointer: &str) -> Value {
    let (parent, last) = split_pointer(pointer);
    let removed = match value.pointer_mut(parent) {
        Some(Value::Object(map)) => map.shift_remove(last).is_some(),
        Some(Value::Array(items)) => match last.parse::<usize>() {
            Ok(index) if index < items.len() => {
                items.remove(index);
                true
            }
            _ => false,
        },
        _ => false,
    };
    assert!(removed, "nothing to remove at {pointer}");
    value
}

/// Returns `value` with `replacement` written at `pointer`.
///
/// Missing object members are inserted; existing ones are replaced.
///
/// # Panics
///
/// Panics if the pointer's parent does not exist or is not a container.
#[must_use]
pub fn with(mut value: Value, pointer: &str, replacement: Value) -> Value {
    if let Some(slot) = value.pointer_mut(pointer) {
        *slot = replacement;
        return value;
    }
    let (parent, last) = split_pointer(pointer);
    match value.pointer_mut(parent) {
        Some(Value::Object(map)) => {
            map.insert(last.to_owned(), replacement);
        }
        _ => panic!("cannot write at {pointer}"),
    }
    value
}

/// Splits `/a/b/c` into (`/a/b`, `c`).
fn split_pointer(pointer: &str) -> (&str, &str) {
    pointer.rsplit_once('/').unwrap_or(("", pointer))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{with, without};

    #[test]
    fn removes_object_members_and_array_items() {
        let doc = json!({ "a": { "b": 1, "c": 2 }, "list": [1, 2, 3] });
        let edited = without(without(doc, "/a/b"), "/list/0");
        assert_eq!(edited, json!({ "a": { "c": 2 }, "list": [2, 3] }));
    }

    #[test]
    fn writes_new_and_existing_members() {
        let doc = json!({ "a": { "b": 1 } });
        let edited = with(with(doc, "/a/b", json!(null)), "/a/z", json!("new"));
        assert_eq!(edited, json!({ "a": { "b": null, "z": "new" } }));
    }

    #[test]
    #[should_panic(expected = "nothing to remove at /a/missing")]
    fn removing_an_absent_member_panics() {
        drop(without(json!({ "a": {} }), "/a/missing"));
    }
}
