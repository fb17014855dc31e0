//! Result-shape normalization.
//!
//! Node and wallet calls come back in several shapes: a bare mapping, a
//! result object exposing `result`/`data`/`value`, a mapping keyed the same
//! way, or a plain scalar. [`unwrap`] peels those layers off and
//! [`find_value`] locates nested structures whose depth varies by route.

use serde_json::{Map, Value};

use super::models::{SdkObject, SdkValue};

/// Wrapper layers stripped before giving up.
pub const MAX_UNWRAP_DEPTH: usize = 3;

/// Nesting levels `find_value` descends before treating a key as absent.
pub const MAX_FIND_DEPTH: usize = 64;

const WRAPPER_KEYS: [&str; 3] = ["result", "data", "value"];

/// Strips up to [`MAX_UNWRAP_DEPTH`] wrapper layers and returns the innermost payload.
///
/// Mappings are unwrapped by key (`result`, then `data`, then `value`), objects
/// by attribute (the same names, then `_value`), skipping null attributes. A
/// value matching neither convention comes back unchanged.
pub fn unwrap(value: SdkValue) -> SdkValue {
    let mut current = value;
    for _ in 0..MAX_UNWRAP_DEPTH {
        current = match peel(current) {
            Ok(inner) => inner,
            Err(done) => return done,
        };
    }
    current
}

/// Strips a single result-object layer. Mappings are never unwrapped by key,
/// so a wallet payload keeps its own `data` or `value` fields.
pub fn unwrap_object(value: SdkValue) -> SdkValue {
    match value {
        SdkValue::Object(_) => peel(value).unwrap_or_else(|done| done),
        other => other,
    }
}

// Ok carries the next layer, Err hands the value back untouched.
fn peel(value: SdkValue) -> Result<SdkValue, SdkValue> {
    match value {
        SdkValue::Json(Value::Object(mut map)) => {
            match WRAPPER_KEYS.iter().find(|k| map.contains_key(**k)) {
                Some(key) => Ok(SdkValue::Json(map.remove(*key).unwrap_or(Value::Null))),
                None => Err(SdkValue::Json(Value::Object(map))),
            }
        }
        SdkValue::Object(mut obj) => {
            let attr = WRAPPER_KEYS
                .iter()
                .copied()
                .chain(std::iter::once(SdkObject::PRIVATE_VALUE))
                .find(|name| obj.attr(name).is_some_and(|v| !v.is_null()));
            match attr.and_then(|name| obj.take_attr(name)) {
                Some(inner) => Ok(inner),
                None => Err(SdkValue::Object(obj)),
            }
        }
        other => Err(other),
    }
}

/// Depth-first search for the first value stored under any of `keys`.
///
/// At a mapping, the candidate keys are tried directly in order before
/// descending into its values in insertion order; sequences are searched
/// element by element. Leaves never match.
pub fn find_value<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    find_bounded(value, keys, 0)
}

fn find_bounded<'a>(value: &'a Value, keys: &[&str], depth: usize) -> Option<&'a Value> {
    if depth > MAX_FIND_DEPTH {
        return None;
    }
    match value {
        Value::Object(map) => find_in_map(map, keys, depth),
        Value::Array(items) => items.iter().find_map(|v| found_below(v, keys, depth)),
        _ => None,
    }
}

/// [`find_value`] rooted at a mapping.
pub fn find_in<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    find_in_map(map, keys, 0)
}

fn find_in_map<'a>(map: &'a Map<String, Value>, keys: &[&str], depth: usize) -> Option<&'a Value> {
    keys.iter()
        .find_map(|k| map.get(*k))
        .or_else(|| map.values().find_map(|v| found_below(v, keys, depth)))
}

// A null found in a child counts as absent so the search moves on to later siblings.
fn found_below<'a>(value: &'a Value, keys: &[&str], depth: usize) -> Option<&'a Value> {
    find_bounded(value, keys, depth + 1).filter(|v| !v.is_null())
}

/// Coerces an unwrapped value into a mapping: objects become their attributes,
/// anything that is not already a mapping is stored under `value`.
pub fn as_dict(value: SdkValue) -> Map<String, Value> {
    match value.into_json() {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}

/// Prefers a `content` sub-field over the whole mapping.
pub fn content_of(d: &Map<String, Value>) -> Value {
    d.get("content")
        .cloned()
        .unwrap_or_else(|| Value::Object(d.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn wrap(attr: &str, inner: impl Into<SdkValue>) -> SdkValue {
        SdkObject::wrapping(attr, inner).into()
    }

    #[test]
    fn bare_mapping_is_returned_unchanged() {
        let v = json!({"height": 1, "hash": "abc"});
        assert_eq!(unwrap(v.clone().into()), SdkValue::Json(v));
    }

    #[test]
    fn scalars_and_bytes_pass_through() {
        assert_eq!(unwrap(json!(42).into()), SdkValue::Json(json!(42)));
        assert_eq!(unwrap(SdkValue::Bytes(vec![1])), SdkValue::Bytes(vec![1]));
    }

    #[test]
    fn single_result_attribute_is_stripped() {
        let payload = json!({"content": {"x": 1}});
        assert_eq!(unwrap(wrap("result", payload.clone())), SdkValue::Json(payload));
    }

    #[test]
    fn private_value_attribute_is_stripped() {
        assert_eq!(unwrap(wrap("_value", json!("ok"))), SdkValue::Json(json!("ok")));
    }

    #[test]
    fn null_attributes_are_skipped() {
        let obj = SdkObject::new()
            .with("result", Value::Null)
            .with("data", json!({"n": 1}));
        assert_eq!(unwrap(obj.into()), SdkValue::Json(json!({"n": 1})));
    }

    #[test]
    fn dict_keys_follow_priority_order() {
        let v = json!({"value": 3, "data": 2, "result": 1});
        assert_eq!(unwrap(v.into()), SdkValue::Json(json!(1)));

        let v = json!({"value": 3, "data": 2});
        assert_eq!(unwrap(v.into()), SdkValue::Json(json!(2)));
    }

    #[test]
    fn mixed_three_level_chain_is_fully_unwrapped() {
        let v = wrap("data", json!({"result": {"value": {"content": 7}}}));
        assert_eq!(unwrap(v), SdkValue::Json(json!({"content": 7})));
    }

    #[test]
    fn chains_past_the_bound_stop_after_three_layers() {
        let v = json!({"result": {"result": {"result": {"result": "deep"}}}});
        assert_eq!(unwrap(v.into()), SdkValue::Json(json!({"result": "deep"})));
    }

    #[test]
    fn find_checks_direct_keys_before_children() {
        let v = json!({"block": {"header": "nested"}, "header": "direct"});
        assert_eq!(find_value(&v, &["header"]), Some(&json!("direct")));
    }

    #[test]
    fn find_prefers_earlier_candidates() {
        let v = json!({"b": 2, "a": 1});
        assert_eq!(find_value(&v, &["a", "b"]), Some(&json!(1)));
        assert_eq!(find_value(&v, &["b", "a"]), Some(&json!(2)));
    }

    #[test]
    fn find_descends_in_insertion_order() {
        let v = json!({"first": {"x": {"header": 1}}, "second": {"header": 2}});
        assert_eq!(find_value(&v, &["header"]), Some(&json!(1)));
    }

    #[test]
    fn find_searches_sequences() {
        let v = json!({"content": [{"other": 0}, {"block": {"header": {"b_num": 5}}}]});
        assert_eq!(find_value(&v, &["header"]), Some(&json!({"b_num": 5})));
    }

    #[test]
    fn find_skips_null_matches_in_children() {
        let v = json!({"a": {"header": null}, "b": {"header": {"b_num": 1}}});
        assert_eq!(find_value(&v, &["header"]), Some(&json!({"b_num": 1})));

        let v = json!([{"header": null}, {"header": 2}]);
        assert_eq!(find_value(&v, &["header"]), Some(&json!(2)));
    }

    #[test]
    fn direct_null_match_is_returned() {
        let v = json!({"header": null, "block": {"header": 1}});
        assert_eq!(find_value(&v, &["header"]), Some(&Value::Null));
    }

    #[test]
    fn object_unwrap_strips_one_layer_only() {
        let inner = json!({"data": {"total": 1}});
        assert_eq!(unwrap_object(wrap("result", inner.clone())), SdkValue::Json(inner.clone()));
        assert_eq!(unwrap_object(inner.clone().into()), SdkValue::Json(inner));
        assert_eq!(
            unwrap_object(wrap("_value", wrap("result", json!(3)))),
            wrap("result", json!(3))
        );
    }

    #[test]
    fn find_reports_absent_keys() {
        let v = json!({"content": {"block": [1, 2, {"x": null}]}});
        assert_eq!(find_value(&v, &["header"]), None);
        assert_eq!(find_value(&json!(5), &["header"]), None);
    }

    #[test]
    fn find_gives_up_past_the_depth_guard() {
        let mut v = json!({"header": "bottom"});
        for _ in 0..=MAX_FIND_DEPTH {
            v = json!({ "n": v });
        }
        assert_eq!(find_value(&v, &["header"]), None);

        let shallow = json!({"a": {"b": {"header": "here"}}});
        assert_eq!(find_value(&shallow, &["header"]), Some(&json!("here")));
    }

    #[test]
    fn as_dict_wraps_non_mappings() {
        assert_eq!(as_dict(json!(3).into()), json!({"value": 3}).as_object().unwrap().clone());
        let obj: SdkValue = SdkObject::new().with("id", json!("x")).into();
        assert_eq!(as_dict(obj), json!({"id": "x"}).as_object().unwrap().clone());
    }

    #[test]
    fn content_is_preferred_over_whole_mapping() {
        let d = json!({"id": "1", "content": {"b": 2}});
        assert_eq!(content_of(d.as_object().unwrap()), json!({"b": 2}));
        let d = json!({"height": 1});
        assert_eq!(content_of(d.as_object().unwrap()), json!({"height": 1}));
    }
}
