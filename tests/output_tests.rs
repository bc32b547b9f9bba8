// tests/output_tests.rs

use jqlite::output::{DisplayPrinter, format_number, to_display, to_json, to_json_pretty};
use jqlite::{Object, Value, parse_json};

fn json(text: &str) -> Value {
    parse_json(text).unwrap_or_else(|e| panic!("bad test JSON {:?}: {}", text, e))
}

// ============================================================================
// Scalars
// ============================================================================

#[test]
fn test_display_scalars() {
    let test_cases = vec![
        (Value::Null, "null"),
        (Value::Bool(true), "true"),
        (Value::Bool(false), "false"),
        (Value::from(42), "42"),
        (Value::from("hello"), "\"hello\""),
    ];

    for (value, expected) in test_cases {
        assert_eq!(to_display(&value), expected);
    }
}

#[test]
fn test_display_strings_are_not_escaped() {
    let value = Value::from("say \"hi\"\nbye");
    assert_eq!(to_display(&value), "\"say \"hi\"\nbye\"");
}

// ============================================================================
// Number Formatting
// ============================================================================

#[test]
fn test_format_numbers() {
    let test_cases = vec![
        (0.0, "0"),
        (-0.0, "0"),
        (3.0, "3"),
        (-17.0, "-17"),
        (2.5, "2.5"),
        (0.1, "0.1"),
        (-0.25, "-0.25"),
        (1e15, "1000000000000000"),
        (9007199254740991.0, "9007199254740991"),
    ];

    for (n, expected) in test_cases {
        assert_eq!(format_number(n), expected, "Failed for {}", n);
    }
}

#[test]
fn test_format_non_finite_numbers() {
    assert_eq!(format_number(f64::NAN), "null");
    assert_eq!(format_number(f64::INFINITY), "null");
    assert_eq!(format_number(f64::NEG_INFINITY), "null");
}

#[test]
fn test_format_exponent_notation() {
    let test_cases = vec![
        (1.5e-7, "1.5e-07"),
        (-2.5e-9, "-2.5e-09"),
        (0.0001, "0.0001"),
        (0.00001, "1e-05"),
        (123456.789, "123456.789"),
        (1e16, "10000000000000000"),
        (1e17, "1e+17"),
        (1e300, "1e+300"),
        (1.7976931348623157e308, "1.7976931348623157e+308"),
    ];

    for (n, expected) in test_cases {
        assert_eq!(format_number(n), expected, "Failed for {:e}", n);
    }
}

#[test]
fn test_format_exponent_notation_round_trips() {
    for n in [1e300, 3.25e-12, -6.02214076e23] {
        assert_eq!(format_number(n).parse::<f64>().unwrap(), n);
    }
}

// ============================================================================
// Collections
// ============================================================================

#[test]
fn test_display_array() {
    assert_eq!(to_display(&json("[1, 2, 3]")), "[\n  1,\n  2,\n  3\n]");
}

#[test]
fn test_display_object_keeps_insertion_order() {
    let value = json(r#"{"zeta": 1, "alpha": "a", "mid": null}"#);
    assert_eq!(
        to_display(&value),
        "{\n  \"zeta\": 1,\n  \"alpha\": \"a\",\n  \"mid\": null\n}"
    );
}

#[test]
fn test_display_nested() {
    let value = json(r#"{"user": {"name": "Ann", "tags": ["x", "y"]}, "n": 2.5}"#);
    let expected = r#"{
  "user": {
    "name": "Ann",
    "tags": [
      "x",
      "y"
    ]
  },
  "n": 2.5
}"#;
    assert_eq!(to_display(&value), expected);
}

#[test]
fn test_display_array_of_objects() {
    let value = json(r#"[{"v": 5}, {"v": 10}]"#);
    let expected = "[\n  {\n    \"v\": 5\n  },\n  {\n    \"v\": 10\n  }\n]";
    assert_eq!(to_display(&value), expected);
}

#[test]
fn test_display_empty_collections() {
    assert_eq!(to_display(&Value::array()), "[\n\n]");
    assert_eq!(to_display(&Value::object()), "{\n\n}");
    assert_eq!(
        to_display(&json(r#"{"a": [], "b": {}}"#)),
        "{\n  \"a\": [\n\n  ],\n  \"b\": {\n\n  }\n}"
    );
}

#[test]
fn test_display_custom_indent() {
    let printer = DisplayPrinter::new(4);
    assert_eq!(printer.print(&json("[[1]]")), "[\n    [\n        1\n    ]\n]");
}

#[test]
fn test_display_overwritten_key_keeps_position() {
    let mut object = Object::new();
    object.insert("a", Value::from(1));
    object.insert("b", Value::from(2));
    object.insert("a", Value::from(3));

    assert_eq!(
        to_display(&Value::from(object)),
        "{\n  \"a\": 3,\n  \"b\": 2\n}"
    );
}

// ============================================================================
// JSON Output
// ============================================================================

#[test]
fn test_to_json_escapes_strings() {
    let value = Value::from("line\n\"quoted\"");
    assert_eq!(to_json(&value), r#""line\n\"quoted\"""#);
}

#[test]
fn test_to_json_numbers() {
    assert_eq!(to_json(&json("[1, 2.5, -0, 1e2]")), "[1,2.5,0,100]");
    assert_eq!(to_json(&Value::Number(f64::NAN)), "null");
}

#[test]
fn test_to_json_keeps_member_order() {
    let value = json(r#"{"b": 1, "a": [true, null]}"#);
    assert_eq!(to_json(&value), r#"{"b":1,"a":[true,null]}"#);
}

#[test]
fn test_to_json_reparses() {
    let value = json(r#"{"s": "tab\there", "nested": {"x": [1, {"y": false}]}}"#);
    assert_eq!(parse_json(&to_json(&value)).unwrap(), value);
    assert_eq!(parse_json(&to_json_pretty(&value)).unwrap(), value);
}

#[test]
fn test_to_json_pretty_layout() {
    assert_eq!(to_json_pretty(&json(r#"{"a": 1}"#)), "{\n  \"a\": 1\n}");
}

// ============================================================================
// JSON Input
// ============================================================================

#[test]
fn test_parse_json_duplicate_keys() {
    let value = json(r#"{"a": 1, "b": 2, "a": 3}"#);
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(value.get("a"), Some(&Value::from(3)));
}

#[test]
fn test_parse_json_rejects_invalid_text() {
    assert!(parse_json("{").is_err());
    assert!(parse_json("[1,]").is_err());
    assert!(parse_json("").is_err());
}
