//! Variant Dispatch Tests
//!
//! - Value variants compare by rendered value and report alternatives
//! - Type variants try alternatives in order; first match wins
//! - Exhausted dispatch keeps the reason of every attempted alternative
//! - `description(1)` is the top line only

use shapecheck::{from_yaml_str, Error, Validator};

fn validate(schema: &str, doc: &str) -> Vec<Error> {
    let validator = Validator::new(&from_yaml_str(schema).unwrap()).unwrap();
    validator.validate(&from_yaml_str(doc).unwrap())
}

// =============================================================================
// Value Variants
// =============================================================================

const VALUE_VARIANT_SCHEMA: &str =
    "root: !variant\n- 42\n- some string\n- [ 1, 2, 3 ]\n- { key: key, value: value }";

#[test]
fn test_value_variant_accepts_each_alternative() {
    for doc in ["42", "some string", "[ 1, 2, 3 ]", "{ key: key, value: value }"] {
        assert!(validate(VALUE_VARIANT_SCHEMA, doc).is_empty(), "doc: {doc}");
    }
}

#[test]
fn test_value_variant_mismatch_lists_alternatives() {
    let errors = validate(VALUE_VARIANT_SCHEMA, "420");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].description(None),
        "/: expected value: one of\
         \n\t- 42\
         \n\t- some string\
         \n\t- [1, 2, 3]\
         \n\t- {key: key, value: value}"
    );
    assert_eq!(errors[0].description(Some(1)), "/: expected value: one of");
}

#[test]
fn test_value_variant_as_key_type() {
    let schema = "types:\n  key: !variant\n    - first\n    - second\nroot:\n  $key: any\n  required: any";
    assert!(validate(schema, "{ first: 42, required: 24 }").is_empty());
    assert!(validate(schema, "{ second: 42, required: 24 }").is_empty());

    let errors = validate(schema, "{ third: 42, required: 24 }");
    let lines: Vec<String> = errors.iter().map(|e| e.description(None)).collect();
    assert_eq!(
        lines,
        ["/: missing key with type: key", "/third: undefined node"]
    );
}

// =============================================================================
// Type Variants
// =============================================================================

const TYPE_VARIANT_SCHEMA: &str =
    "root:\n- scalar\n- [scalar]\n- { key: scalar, value: [scalar], optional: !optional scalar }";

#[test]
fn test_type_variant_accepts_each_shape() {
    assert!(validate(TYPE_VARIANT_SCHEMA, "42").is_empty());
    assert!(validate(TYPE_VARIANT_SCHEMA, "[ 1, 2, 3 ]").is_empty());
    assert!(validate(TYPE_VARIANT_SCHEMA, "{ key: 42, value: [ 1, 2, 3 ] }").is_empty());
}

#[test]
fn test_type_variant_failure_keeps_every_branch() {
    let errors = validate(TYPE_VARIANT_SCHEMA, "{ key: 42, value: 420 }");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].description(None),
        "/: expected value type: one of\
         \n\t- scalar\
         \n\t- [scalar]\
         \n\t- {key: scalar, value: [scalar], optional: !<!optional> scalar}\
         \n\t* failed variant 0:\
         \n\t\t/: expected value type: scalar\
         \n\t* failed variant 1:\
         \n\t\t/: expected value type: [scalar]\
         \n\t* failed variant 2:\
         \n\t\t/value: expected value type: {key: scalar, value: [scalar], optional: !<!optional> scalar}"
    );
}

#[test]
fn test_type_variant_failure_with_structure_errors() {
    let errors = validate(TYPE_VARIANT_SCHEMA, "{ name: 42, description: 420 }");
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].description(None),
        "/: expected value type: one of\
         \n\t- scalar\
         \n\t- [scalar]\
         \n\t- {key: scalar, value: [scalar], optional: !<!optional> scalar}\
         \n\t* failed variant 0:\
         \n\t\t/: expected value type: scalar\
         \n\t* failed variant 1:\
         \n\t\t/: expected value type: [scalar]\
         \n\t* failed variant 2:\
         \n\t\t/key: node not found\
         \n\t\t/value: node not found\
         \n\t\t/name: undefined node\
         \n\t\t/description: undefined node"
    );
}

// =============================================================================
// Nested Errors
// =============================================================================

const NESTED_SCHEMA: &str =
    "types:\n  target:\n  - library: string\n  - executable: string\nroot:\n  targets: [target]";

#[test]
fn test_named_variant_failure_renders_name() {
    let doc = "targets:\n- library: library\n- executable: executable\n  undefined_key: anything";
    let errors = validate(NESTED_SCHEMA, doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].description(None),
        "/targets.1: expected value type: target\
         \n\t* failed variant 0:\
         \n\t\t/targets.1.library: node not found\
         \n\t\t/targets.1.executable: undefined node\
         \n\t\t/targets.1.undefined_key: undefined node\
         \n\t* failed variant 1:\
         \n\t\t/targets.1.undefined_key: undefined node"
    );
}

#[test]
fn test_depth_one_prints_top_line_only() {
    let doc = "targets:\n- library: library\n- executable: executable\n  undefined_key: anything";
    let errors = validate(NESTED_SCHEMA, doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].description(Some(1)),
        "/targets.1: expected value type: target"
    );
    let full = errors[0].description(None);
    assert_eq!(errors[0].description(Some(1)), full.lines().next().unwrap());
}

#[test]
fn test_error_accessors() {
    let doc = "targets:\n- undefined_key: anything";
    let errors = validate(NESTED_SCHEMA, doc);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].path(), "/targets.0");
    assert_eq!(errors[0].message(), "expected value type: target");
    assert_eq!(errors[0].variant_failures().len(), 2);
}
