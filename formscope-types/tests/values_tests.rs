use formscope_types::{Error, ValueSet};
use pretty_assertions::assert_eq;
use serde_json::json;

fn values(v: serde_json::Value) -> ValueSet {
    ValueSet::from_json(v).unwrap()
}

#[test]
fn from_json_accepts_objects() {
    let set = values(json!({"email": "a@b.c", "age": 3}));
    assert_eq!(set.len(), 2);
    assert_eq!(set.get("email"), Some(&json!("a@b.c")));
}

#[test]
fn from_json_rejects_non_objects() {
    let err = ValueSet::from_json(json!([1, 2])).unwrap_err();
    assert!(matches!(err, Error::InvalidPayload(msg) if msg.contains("an array")));
}

#[test]
fn get_path_walks_objects_and_arrays() {
    let set = values(json!({
        "address": {"city": "Oslo"},
        "items": [{"sku": "a1"}, {"sku": "b2"}]
    }));
    assert_eq!(set.get_path("address.city"), Some(&json!("Oslo")));
    assert_eq!(set.get_path("items[1].sku"), Some(&json!("b2")));
    assert_eq!(set.get_path("items.0.sku"), Some(&json!("a1")));
}

#[test]
fn get_path_returns_none_for_missing_segments() {
    let set = values(json!({"address": {"city": "Oslo"}, "items": []}));
    assert_eq!(set.get_path("address.zip"), None);
    assert_eq!(set.get_path("items[0]"), None);
    assert_eq!(set.get_path("address.city.name"), None);
    assert_eq!(set.get_path(""), None);
}

#[test]
fn insert_and_iterate() {
    let mut set = ValueSet::new();
    assert!(set.is_empty());
    assert_eq!(set.insert("a", json!(1)), None);
    assert_eq!(set.insert("a", json!(2)), Some(json!(1)));
    let names: Vec<_> = set.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(names, vec!["a"]);
    assert_eq!(set.into_value(), json!({"a": 2}));
}

#[test]
fn serializes_transparently() {
    let set = values(json!({"name": "x"}));
    assert_eq!(serde_json::to_value(&set).unwrap(), json!({"name": "x"}));
}
