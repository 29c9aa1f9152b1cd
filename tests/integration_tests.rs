use serde::{Deserialize, Serialize};
use serde_dotted::{
    dotted, flatten, from_reader, from_str, from_str_with_options, json_to_text, text_to_json,
    to_string, to_string_with_options, to_value, to_writer, unflatten, DottedOptions, Error,
    NestedMap, Number, Value,
};
use std::collections::BTreeMap;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
enum Status {
    Active,
    Inactive,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Account {
    status: Status,
    nickname: Option<String>,
    limits: BTreeMap<String, u32>,
}

fn order() -> Order {
    Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.5,
                quantity: 1,
            },
        ],
        total: 109.48,
    }
}

#[test]
fn test_simple_struct() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    let user_back: User = from_str(&text).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct() {
    let order = order();
    let text = to_string(&order).unwrap();

    assert!(text.contains("customer.name=\"Alice\"\n"));
    assert!(text.contains("customer.active=\"true\"\n"));

    let order_back: Order = from_str(&text).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_lines_follow_field_order() {
    let text = to_string(&order()).unwrap();
    let keys: Vec<&str> = text
        .lines()
        .filter_map(|line| line.split_once('=').map(|(k, _)| k))
        .collect();
    assert_eq!(
        keys,
        vec![
            "order_id",
            "customer.id",
            "customer.name",
            "customer.active",
            "customer.tags",
            "items",
            "total"
        ]
    );
}

#[test]
fn test_enum_option_and_map_fields() {
    let mut limits = BTreeMap::new();
    limits.insert("daily".to_string(), 10);
    limits.insert("monthly".to_string(), 200);

    let account = Account {
        status: Status::Inactive,
        nickname: None,
        limits,
    };

    let text = to_string(&account).unwrap();
    assert_eq!(
        text,
        "status=\"Inactive\"\nnickname=\"null\"\nlimits.daily=\"10\"\nlimits.monthly=\"200\"\n"
    );

    let account_back: Account = from_str(&text).unwrap();
    assert_eq!(account, account_back);

    let active: Account = from_str("status=\"Active\"\nnickname=\"al\"\nlimits.x=\"1\"").unwrap();
    assert_eq!(active.status, Status::Active);
    assert_eq!(active.nickname.as_deref(), Some("al"));
}

#[test]
fn test_type_mismatch_on_read() {
    let err = from_str::<User>("id=\"abc\"\nname=\"x\"\nactive=\"true\"\ntags=\"[]\"").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));

    let err = from_str::<User>("id=\"1\"\nname=\"x\"\nactive=\"maybe\"\ntags=\"[]\"").unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_concrete_document() {
    let doc = dotted!({ "a": { "b": { "c": 1 } } });
    let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
    assert_eq!(lines, vec![r#"a.b.c="1""#]);

    let back = unflatten(&lines, ".").into_value();
    assert_eq!(back, dotted!({ "a": { "b": { "c": "1" } } }));
}

#[test]
fn test_string_documents_round_trip() {
    let doc = dotted!({
        "server": { "host": "localhost", "port": "8080" },
        "db": { "primary": { "url": "postgres://x" }, "pool": "4" },
        "name": "demo"
    });
    let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(unflatten(&lines, ".").into_value(), doc);
}

#[test]
fn test_empty_document() {
    let doc = dotted!({});
    assert_eq!(flatten(doc.as_object().unwrap(), ".").count(), 0);
    assert!(unflatten(Vec::<String>::new(), ".").is_empty());
}

#[test]
fn test_empty_branch_vanishes() {
    let doc = dotted!({ "a": {}, "b": "1" });
    let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
    assert_eq!(lines, vec![r#"b="1""#]);
    assert_eq!(unflatten(&lines, ".").into_value(), dotted!({ "b": "1" }));
}

#[test]
fn test_leaf_forms() {
    let doc = dotted!({ "n": null, "t": true, "i": (-4), "f": 2.5, "w": 3.0, "arr": [1, "x"] });
    let lines: Vec<String> = flatten(doc.as_object().unwrap(), ".").collect();
    assert_eq!(
        lines,
        vec![
            r#"n="null""#,
            r#"t="true""#,
            r#"i="-4""#,
            r#"f="2.5""#,
            r#"w="3.0""#,
            r#"arr="[1,"x"]""#,
        ]
    );
}

#[test]
fn test_header_written_first() {
    let options = DottedOptions::new().with_header("settings");
    let text = to_string_with_options(&dotted!({ "a": "1" }), &options).unwrap();
    assert_eq!(text, "# settings\na=\"1\"\n");
}

#[test]
fn test_multi_line_header() {
    let options = DottedOptions::new().with_header("line one\nline two");
    let text = to_string_with_options(&dotted!({ "a": "1" }), &options).unwrap();
    assert!(text.starts_with("# line one\n# line two\n"));
    let map: BTreeMap<String, String> = from_str(&text).unwrap();
    assert_eq!(map.len(), 1);
}

#[test]
fn test_timestamp_header() {
    let options = DottedOptions::new().with_timestamp_header("out.txt");
    let text = to_string_with_options(&dotted!({ "a": "1" }), &options).unwrap();
    let first = text.lines().next().unwrap();
    assert!(first.starts_with("# Created 'out.txt' at UTC: "));
}

#[test]
fn test_custom_separator_round_trip() {
    let options = DottedOptions::new().with_separator("::");
    let order = order();
    let text = to_string_with_options(&order, &options).unwrap();
    assert!(text.contains("customer::name=\"Alice\""));

    let order_back: Order = from_str_with_options(&text, &options).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_to_writer_and_from_reader() {
    let order = order();
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &order).unwrap();

    let order_back: Order = from_reader(buffer.as_slice()).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_non_object_top_level() {
    assert!(matches!(
        to_string(&"scalar").unwrap_err(),
        Error::UnsupportedType(_)
    ));
    assert!(matches!(
        to_string(&vec!["a"]).unwrap_err(),
        Error::UnsupportedType(_)
    ));
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Counters {
    big: u64,
    wide: u128,
    low: i64,
}

#[test]
fn test_to_value_numbers() {
    let value = to_value(&BTreeMap::from([("big", u64::MAX)])).unwrap();
    let big = value.as_object().unwrap().get("big").unwrap();
    assert_eq!(big, &Value::Number(Number::Unsigned(u64::MAX)));

    let value = to_value(&BTreeMap::from([("small", 7u8)])).unwrap();
    assert_eq!(value, dotted!({ "small": 7 }));
}

#[test]
fn test_wide_integers_round_trip_exactly() {
    let counters = Counters {
        big: u64::MAX,
        wide: u128::MAX,
        low: i64::MIN,
    };

    let text = to_string(&counters).unwrap();
    assert_eq!(
        text,
        concat!(
            "big=\"18446744073709551615\"\n",
            "wide=\"340282366920938463463374607431768211455\"\n",
            "low=\"-9223372036854775808\"\n",
        )
    );

    let counters_back: Counters = from_str(&text).unwrap();
    assert_eq!(counters, counters_back);
}

#[test]
fn test_json_integers_keep_their_digits() {
    let options = DottedOptions::new();
    let json = r#"{
        "n": 18446744073709551615,
        "m": 9223372036854775809,
        "huge": 123456789012345678901234567890123456789012345678901234567890,
        "list": [18446744073709551616, 1.5]
    }"#;

    let text = json_to_text(json, &options).unwrap();
    assert_eq!(
        text,
        concat!(
            "n=\"18446744073709551615\"\n",
            "m=\"9223372036854775809\"\n",
            "huge=\"123456789012345678901234567890123456789012345678901234567890\"\n",
            "list=\"[18446744073709551616,1.5]\"\n",
        )
    );
}

#[test]
fn test_json_conversion() {
    let options = DottedOptions::new();
    let json = r#"{"server": {"host": "example.com", "ports": [80, 443]}, "debug": false}"#;

    let text = json_to_text(json, &options).unwrap();
    assert_eq!(
        text,
        "server.host=\"example.com\"\nserver.ports=\"[80,443]\"\ndebug=\"false\"\n"
    );

    let back = text_to_json(&text, &options).unwrap();
    assert!(back.ends_with("}\n"));
    let parsed: serde_json::Value = serde_json::from_str(&back).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!({
            "server": { "host": "example.com", "ports": "[80,443]" },
            "debug": "false"
        })
    );
}

#[test]
fn test_json_conversion_with_header() {
    let options = DottedOptions::new()
        .with_separator("/")
        .with_timestamp_header("data.json");
    let text = json_to_text(r#"{"a": {"b": "c"}}"#, &options).unwrap();
    assert!(text.starts_with("# Created 'data.json' at UTC: "));
    assert!(text.ends_with("a/b=\"c\"\n"));

    let back = text_to_json(&text, &options).unwrap();
    assert_eq!(back, "{\n  \"a\": {\n    \"b\": \"c\"\n  }\n}\n");
}

#[test]
fn test_json_errors() {
    let options = DottedOptions::new();
    assert!(matches!(
        json_to_text("{", &options).unwrap_err(),
        Error::Document(_)
    ));
    assert!(matches!(
        json_to_text("\"just a string\"", &options).unwrap_err(),
        Error::UnsupportedType(_)
    ));
}

#[test]
fn test_nested_map_serializes_as_tree() {
    let mut map = NestedMap::new();
    map.set("a.b", "1");
    map.set("a.c", "2");

    let json = serde_json::to_string(&map).unwrap();
    assert_eq!(json, r#"{"a":{"b":"1","c":"2"}}"#);

    let text = to_string(&map).unwrap();
    assert_eq!(text, "a.b=\"1\"\na.c=\"2\"\n");
}

#[test]
fn test_nested_map_deserializes_dotted_keys() {
    let map: NestedMap = serde_json::from_str(r#"{"a.b": 1, "a.c": {"d.e": 2}}"#).unwrap();
    assert_eq!(map.get("a.b").unwrap(), &dotted!(1));
    assert_eq!(map.get("a.c").unwrap(), &dotted!({ "d.e": 2 }));
    assert!(!map.contains("a.c.d"));
}
