use serde::de::value::MapDeserializer;
use serde::Deserialize;
use serde_dotted::{dotted, DottedMap, DottedValue, Error, NestedMap};

fn sample() -> NestedMap {
    NestedMap::from_value(dotted!({ "a.b.c": 1, "x.y.z": 2 })).unwrap()
}

#[test]
fn test_from_dotted_pairs() {
    let map = sample();
    assert_eq!(
        map.into_value(),
        dotted!({ "a": { "b": { "c": 1 } }, "x": { "y": { "z": 2 } } })
    );
}

#[test]
fn test_from_pair_list() {
    let map = NestedMap::from_value(dotted!([["a.b", 1], ["c", "two"]])).unwrap();
    assert_eq!(map.into_value(), dotted!({ "a": { "b": 1 }, "c": "two" }));
}

#[test]
fn test_from_null_is_empty() {
    let map = NestedMap::from_value(DottedValue::Null).unwrap();
    assert!(map.is_empty());
}

#[test]
fn test_key_rejection() {
    let err = NestedMap::from_value(dotted!([[7, 1], ["b", 2]])).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
}

#[test]
fn test_mapping_key_rejection_checks_every_entry() {
    let entries = vec![
        (dotted!("b"), dotted!(2)),
        (dotted!(7), dotted!(1)),
        (dotted!("c"), dotted!(3)),
    ];
    let source = MapDeserializer::<_, Error>::new(entries.into_iter());
    let err = NestedMap::deserialize(source).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
    assert!(err.to_string().contains('7'));
}

#[test]
fn test_integer_keyed_mapping_rejected() {
    let source = MapDeserializer::<_, Error>::new(vec![(7, 1), (8, 2)].into_iter());
    let err = NestedMap::deserialize(source).unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
}

#[test]
fn test_string_keyed_mapping_expands_paths() {
    let source = MapDeserializer::<_, Error>::new(vec![("a.b", 1), ("a.c", 2)].into_iter());
    let map = NestedMap::deserialize(source).unwrap();
    assert_eq!(map.into_value(), dotted!({ "a": { "b": 1, "c": 2 } }));
}

#[test]
fn test_malformed_pairs() {
    let err = NestedMap::from_value(dotted!([["a", 1, 2]])).unwrap_err();
    assert!(matches!(err, Error::InvalidEntry(_)));

    let err = NestedMap::from_value(dotted!(["a"])).unwrap_err();
    assert!(matches!(err, Error::InvalidEntry(_)));
}

#[test]
fn test_invalid_source() {
    let err = NestedMap::from_value(dotted!("a.b")).unwrap_err();
    assert!(matches!(err, Error::InvalidSource(_)));

    let err = NestedMap::from_value(dotted!(5)).unwrap_err();
    assert!(matches!(err, Error::InvalidSource(_)));
}

#[test]
fn test_path_addressing() {
    let map = sample();
    assert_eq!(map.get("a.b.c").unwrap(), &dotted!(1));
    assert_eq!(map.get("a.b").unwrap(), &dotted!({ "c": 1 }));
    assert_eq!(map.get("a").unwrap(), &dotted!({ "b": { "c": 1 } }));
}

#[test]
fn test_prefix_containment() {
    let map = sample();
    for key in ["a", "a.b", "a.b.c", "x", "x.y", "x.y.z"] {
        assert!(map.contains(key), "{key} should be present");
    }
    for key in ["b", "a.c", "a.b.c.d", "x.y.z.w", ""] {
        assert!(!map.contains(key), "{key} should be absent");
    }
}

#[test]
fn test_get_missing() {
    let map = sample();
    let err = map.get("a.q").unwrap_err();
    assert_eq!(err, Error::key_not_found("a.q"));
    assert!(err.to_string().contains("a.q"));

    // below a leaf
    assert!(matches!(map.get("a.b.c.d"), Err(Error::KeyNotFound { .. })));
}

#[test]
fn test_get_mut() {
    let mut map = sample();
    *map.get_mut("a.b.c").unwrap() = dotted!("changed");
    assert_eq!(map.get("a.b.c").unwrap(), &dotted!("changed"));
    assert!(map.get_mut("missing").is_err());
}

#[test]
fn test_get_or() {
    let map = sample();
    let fallback = dotted!("fallback");
    assert_eq!(map.get_or("a.b.c", &fallback), &dotted!(1));
    assert_eq!(map.get_or("a.b.q", &fallback), &fallback);
}

#[test]
fn test_overwrite_leaf_with_branch() {
    let mut map = NestedMap::new();
    map.set("a", 1);
    map.set("a.b", 2);
    assert_eq!(map.into_value(), dotted!({ "a": { "b": 2 } }));
}

#[test]
fn test_overwrite_branch_with_leaf() {
    let mut map = sample();
    let previous = map.set("a", "flat");
    assert_eq!(previous, Some(dotted!({ "b": { "c": 1 } })));
    assert!(!map.contains("a.b"));
    assert_eq!(map.get("a").unwrap(), &dotted!("flat"));
}

#[test]
fn test_set_then_get() {
    let mut map = NestedMap::new();
    map.set("p.q.r", dotted!([1, 2]));
    map.set("p.s", true);
    assert_eq!(map.get("p.q.r").unwrap(), &dotted!([1, 2]));
    assert_eq!(map.get("p.s").unwrap(), &dotted!(true));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_delete_does_not_prune() {
    let mut map = NestedMap::new();
    map.set("a.b.c", 1);
    assert_eq!(map.delete("a.b.c").unwrap(), dotted!(1));
    assert!(!map.contains("a.b.c"));
    assert!(map.contains("a.b"));
    assert_eq!(map.get("a.b").unwrap(), &dotted!({}));
}

#[test]
fn test_delete_subtree() {
    let mut map = sample();
    assert_eq!(map.delete("a").unwrap(), dotted!({ "b": { "c": 1 } }));
    assert!(!map.contains("a.b.c"));
    assert_eq!(map.len(), 1);
}

#[test]
fn test_delete_missing() {
    let mut map = sample();
    assert!(matches!(map.delete("a.z"), Err(Error::KeyNotFound { .. })));
    assert!(matches!(map.delete("a.b.c.d"), Err(Error::KeyNotFound { .. })));
    assert!(matches!(map.delete("nope.x"), Err(Error::KeyNotFound { .. })));
}

#[test]
fn test_pop() {
    let mut map = sample();
    assert_eq!(map.pop("x.y.z", DottedValue::Null), dotted!(2));
    assert_eq!(map.pop("x.y.z", dotted!("gone")), dotted!("gone"));
    assert!(map.contains("x.y"));
}

#[test]
fn test_pop_item() {
    let mut map = sample();
    let (key, value) = map.pop_item("a.b").unwrap();
    assert_eq!(key, "a.b");
    assert_eq!(value, dotted!({ "c": 1 }));
    assert!(map.pop_item("a.b").is_err());
}

#[test]
fn test_update_with_extra_pairs() {
    let mut map = NestedMap::from_value(dotted!({ "a": 1, "b": 2 })).unwrap();
    map.update(dotted!({ "c.d": 3 }), [("w", 10), ("x", 11), ("y", 12), ("z", 13)])
        .unwrap();
    assert_eq!(map.len(), 7);
    assert_eq!(map.get("c.d").unwrap(), &dotted!(3));
    assert_eq!(map.get("z").unwrap(), &dotted!(13));
}

#[test]
fn test_update_extra_pairs_apply_after_source() {
    let mut map = NestedMap::new();
    map.update(dotted!({ "k": "source" }), [("k", "extra")]).unwrap();
    assert_eq!(map.get("k").unwrap(), &dotted!("extra"));
}

#[test]
fn test_update_partial_application() {
    let mut map = NestedMap::new();
    let err = map
        .update(dotted!([["ok.first", 1], [7, 2], ["never", 3]]), [("extra", 4)])
        .unwrap_err();
    assert!(matches!(err, Error::InvalidKey(_)));
    assert_eq!(map.get("ok.first").unwrap(), &dotted!(1));
    assert!(!map.contains("never"));
    assert!(!map.contains("extra"));
}

#[test]
fn test_custom_separator() {
    let mut map = NestedMap::with_separator("/");
    map.set("a/b.c", 1);
    assert_eq!(map.separator(), "/");
    assert!(map.contains("a/b.c"));
    assert!(!map.contains("a/b"));
    assert_eq!(map.flatten().collect::<Vec<_>>(), vec![r#"a/b.c="1""#]);
}

#[test]
fn test_from_iterator_and_extend() {
    let mut map: NestedMap = vec![("a.b", 1), ("a.c", 2)].into_iter().collect();
    map.extend([("d", 3)]);
    assert_eq!(
        map.into_value(),
        dotted!({ "a": { "b": 1, "c": 2 }, "d": 3 })
    );
}

#[test]
fn test_from_dotted_map_expands_keys() {
    let mut plain = DottedMap::new();
    plain.insert("a.b".to_string(), dotted!(1));
    let map = NestedMap::from(plain);
    assert_eq!(map.as_map().get("a"), Some(&dotted!({ "b": 1 })));
}

#[test]
fn test_iteration_order() {
    let mut map = NestedMap::new();
    map.set("z", 1);
    map.set("a", 2);
    map.set("m.n", 3);
    let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_flatten_uses_own_separator() {
    let map = sample();
    let lines: Vec<String> = map.flatten().collect();
    assert_eq!(lines, vec![r#"a.b.c="1""#, r#"x.y.z="2""#]);
}
