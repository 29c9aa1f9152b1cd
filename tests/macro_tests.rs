use serde_dotted::{dotted, DottedMap, DottedValue, NestedMap, Number};

#[test]
fn test_dotted_macro_null() {
    let value = dotted!(null);
    assert_eq!(value, DottedValue::Null);
}

#[test]
fn test_dotted_macro_booleans() {
    assert_eq!(dotted!(true), DottedValue::Bool(true));
    assert_eq!(dotted!(false), DottedValue::Bool(false));
}

#[test]
fn test_dotted_macro_numbers() {
    assert_eq!(dotted!(42), DottedValue::Number(Number::Integer(42)));
    assert_eq!(dotted!(3.5), DottedValue::Number(Number::Float(3.5)));
    assert_eq!(dotted!(-123), DottedValue::Number(Number::Integer(-123)));
}

#[test]
fn test_dotted_macro_strings() {
    assert_eq!(dotted!("hello"), DottedValue::String("hello".to_string()));
    assert_eq!(dotted!(""), DottedValue::String(String::new()));
}

#[test]
fn test_dotted_macro_nested_arrays() {
    let value = dotted!([[1, 2], ["a", null]]);
    let outer = value.as_array().unwrap();
    assert_eq!(outer.len(), 2);
    assert_eq!(outer[0], dotted!([1, 2]));
    assert_eq!(outer[1].as_array().unwrap()[1], DottedValue::Null);
}

#[test]
fn test_dotted_macro_objects() {
    let value = dotted!({
        "server": { "host": "localhost", "port": 8080 },
        "debug": false,
    });

    let mut server = DottedMap::new();
    server.insert("host".to_string(), DottedValue::from("localhost"));
    server.insert("port".to_string(), DottedValue::from(8080));
    let mut expected = DottedMap::new();
    expected.insert("server".to_string(), DottedValue::Object(server));
    expected.insert("debug".to_string(), DottedValue::Bool(false));

    assert_eq!(value, DottedValue::Object(expected));
}

#[test]
fn test_dotted_macro_preserves_key_order() {
    let value = dotted!({ "z": 1, "a": 2, "m": 3 });
    let keys: Vec<&str> = value
        .as_object()
        .unwrap()
        .keys()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, vec!["z", "a", "m"]);
}

#[test]
fn test_dotted_macro_expressions() {
    let port: u16 = 9000;
    let names = vec!["a", "b"];
    assert_eq!(dotted!(port), dotted!(9000));
    assert_eq!(dotted!(names), dotted!(["a", "b"]));
}

#[test]
fn test_dotted_macro_feeds_nested_map() {
    let map = NestedMap::from_value(dotted!({ "db.host": "h", "db.port": "5432" })).unwrap();
    assert_eq!(map.into_value(), dotted!({ "db": { "host": "h", "port": "5432" } }));
}
