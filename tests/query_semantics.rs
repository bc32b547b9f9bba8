// tests/query_semantics.rs
//
// End-to-end behavior of query text run against JSON text.

use jqlite::{Evaluator, QueryError, Value, parse_json, parse_query, to_display};

fn run(query: &str, input: &str) -> Result<Value, QueryError> {
    let query = parse_query(query).unwrap_or_else(|e| panic!("failed to parse {:?}: {}", query, e));
    let input = parse_json(input).unwrap_or_else(|e| panic!("bad test JSON {:?}: {}", input, e));
    Evaluator::new().evaluate(&query, &input)
}

fn json(text: &str) -> Value {
    parse_json(text).unwrap()
}

const BLOG: &str = r#"{
    "title": "My Blog",
    "posts": [
        {"title": "First", "likes": 3, "tags": ["intro"]},
        {"title": "Second", "likes": 12, "tags": ["rust", "json"]},
        {"title": "Third", "likes": 40},
        {"title": "Draft"}
    ]
}"#;

// ============================================================================
// Paths
// ============================================================================

#[test]
fn test_paths() {
    let test_cases = vec![
        (".", BLOG),
        (".title", r#""My Blog""#),
        (".posts[1].title", r#""Second""#),
        (".posts[0].tags[0]", r#""intro""#),
        (".posts[2].likes", "40"),
        (r#".["title"]"#, r#""My Blog""#),
    ];

    for (query, expected) in test_cases {
        assert_eq!(run(query, BLOG).unwrap(), json(expected), "Failed for query: {}", query);
    }
}

#[test]
fn test_path_errors() {
    assert_eq!(
        run(".posts[9]", BLOG).unwrap_err(),
        QueryError::IndexOutOfBounds { index: 9, len: 4 }
    );
    assert_eq!(
        run(".posts[3].likes", BLOG).unwrap_err(),
        QueryError::FieldNotFound("likes".to_string())
    );
    assert!(matches!(
        run(".title.length", BLOG).unwrap_err(),
        QueryError::TypeMismatch { actual: "string", .. }
    ));
}

// ============================================================================
// Slices
// ============================================================================

#[test]
fn test_slices() {
    let input = "[0, 1, 2, 3, 4]";
    assert_eq!(run("[1:3]", input).unwrap(), json("[1, 2]"));
    assert_eq!(run(".[2:]", input).unwrap(), json("[2, 3, 4]"));
    assert_eq!(run(".[:2]", input).unwrap(), json("[0, 1]"));
    assert_eq!(run("[10:20]", input).unwrap(), json("[]"));
}

#[test]
fn test_slice_then_map() {
    assert_eq!(
        run(".posts[1:3][].title", BLOG).unwrap(),
        json(r#"["Second", "Third"]"#)
    );
}

// ============================================================================
// Iteration
// ============================================================================

#[test]
fn test_iterate_pass_through() {
    assert_eq!(run(".[] | .", "[1, 2, 3]").unwrap(), json("[1, 2, 3]"));
    assert_eq!(run(".[]", "[1, 2, 3]").unwrap(), json("[1, 2, 3]"));
}

#[test]
fn test_iterate_maps_rest_of_chain() {
    assert_eq!(
        run(".posts[].title", BLOG).unwrap(),
        json(r#"["First", "Second", "Third", "Draft"]"#)
    );
    assert_eq!(
        run(".posts | .[].title", BLOG).unwrap(),
        json(r#"["First", "Second", "Third", "Draft"]"#)
    );
}

#[test]
fn test_pipe_after_iterate_sees_whole_array() {
    assert_eq!(
        run(".[] | select(.v > 3)", r#"[{"v": 1}, {"v": 5}, {"v": 10}]"#).unwrap(),
        json(r#"[{"v": 5}, {"v": 10}]"#)
    );
    assert_eq!(run(".[] | .[0]", "[[1, 2], [3, 4]]").unwrap(), json("[1, 2]"));
    assert_eq!(run(".[][0]", "[[1, 2], [3, 4]]").unwrap(), json("[1, 3]"));
    assert!(matches!(
        run(".posts[] | .title", BLOG).unwrap_err(),
        QueryError::TypeMismatch { actual: "array", .. }
    ));
}

#[test]
fn test_iterate_drops_failures() {
    assert_eq!(
        run(".posts[].likes", BLOG).unwrap(),
        json("[3, 12, 40]")
    );
    assert_eq!(
        run(".[].missing", r#"[{"missing": 1}, 2, {"missing": 3}]"#).unwrap(),
        json("[1, 3]")
    );
}

#[test]
fn test_iterate_nested_paths() {
    assert_eq!(
        run(".posts[].tags[0]", BLOG).unwrap(),
        json(r#"["intro", "rust"]"#)
    );
}

// ============================================================================
// Select
// ============================================================================

#[test]
fn test_select() {
    assert_eq!(
        run("select(.v > 3)", r#"[{"v": 1}, {"v": 5}, {"v": 10}]"#).unwrap(),
        json(r#"[{"v": 5}, {"v": 10}]"#)
    );
}

#[test]
fn test_select_pipeline() {
    assert_eq!(
        run(".posts | select(.likes > 10) | .[].title", BLOG).unwrap(),
        json(r#"["Second", "Third"]"#)
    );
}

#[test]
fn test_select_twice() {
    assert_eq!(
        run(".posts | select(.likes >= 3) | select(.likes < 40) | .[].title", BLOG).unwrap(),
        json(r#"["First", "Second"]"#)
    );
}

#[test]
fn test_select_with_pipe_in_condition() {
    assert_eq!(
        run("select(.s | .n != 2)", r#"[{"s": {"n": 1}}, {"s": {"n": 2}}]"#).unwrap(),
        json(r#"[{"s": {"n": 1}}]"#)
    );
}

#[test]
fn test_select_floats_and_negatives() {
    let input = r#"[{"t": -5}, {"t": -0.5}, {"t": 0.25}, {"t": 2}]"#;
    assert_eq!(
        run("select(.t > -1)", input).unwrap(),
        json(r#"[{"t": -0.5}, {"t": 0.25}, {"t": 2}]"#)
    );
    assert_eq!(
        run("select(.t <= 0.25) | .[].t", input).unwrap(),
        json("[-5, -0.5, 0.25]")
    );
}

#[test]
fn test_select_missing_field_excluded() {
    assert_eq!(
        run(".posts | select(.likes == 40) | .[0].title", BLOG).unwrap(),
        json(r#""Third""#)
    );
}

// ============================================================================
// Pipes
// ============================================================================

#[test]
fn test_pipe_equivalences() {
    let input = r#"{"a": {"b": 7}}"#;
    assert_eq!(run(".a | .b", input).unwrap(), Value::from(7));
    assert_eq!(run(".a.b", input), run(".a | .b", input));
    assert_eq!(run(". | .a | . | .b", input).unwrap(), Value::from(7));
}

#[test]
fn test_pipe_left_failure() {
    assert_eq!(
        run(".x | .b", r#"{"a": {"b": 7}}"#).unwrap_err(),
        QueryError::FieldNotFound("x".to_string())
    );
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn test_display_of_empty_slice() {
    let result = run("[10:20]", "[0, 1, 2, 3, 4]").unwrap();
    assert_eq!(to_display(&result), "[\n\n]");
}

#[test]
fn test_display_of_query_result() {
    let result = run(".posts | select(.likes > 10) | .[].title", BLOG).unwrap();
    assert_eq!(to_display(&result), "[\n  \"Second\",\n  \"Third\"\n]");
}

#[test]
fn test_same_query_same_result() {
    let query = parse_query(".posts[].tags").unwrap();
    let input = json(BLOG);
    let mut evaluator = Evaluator::new();

    let first = evaluator.evaluate(&query, &input).unwrap();
    let second = evaluator.evaluate(&query, &input).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, json(r#"[["intro"], ["rust", "json"]]"#));
}
