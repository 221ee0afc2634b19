//! Validation Invariant Tests
//!
//! Core matching rules:
//! - Builtin predicates match exactly; quoted scalars are strings
//! - List errors accumulate per element
//! - Struct checks run field-order first, then key types, then
//!   undefined keys in document order
//! - Validation is deterministic

use shapecheck::{from_yaml_str, Error, Validator};

// =============================================================================
// Helper Functions
// =============================================================================

fn validate(schema: &str, doc: &str) -> Vec<Error> {
    let validator = Validator::new(&from_yaml_str(schema).unwrap()).unwrap();
    validator.validate(&from_yaml_str(doc).unwrap())
}

fn descriptions(schema: &str, doc: &str) -> Vec<String> {
    validate(schema, doc)
        .iter()
        .map(|error| error.description(None))
        .collect()
}

// =============================================================================
// Builtin Types
// =============================================================================

#[test]
fn test_any_accepts_everything() {
    for doc in ["42.0", "[ 1, 2, 3 ]", "{ key: value }", ""] {
        assert!(validate("root: any", doc).is_empty(), "doc: {doc:?}");
    }
}

#[test]
fn test_scalar_type() {
    assert!(validate("root: scalar", "42.0").is_empty());
    assert_eq!(
        descriptions("root: scalar", "[ 1, 2, 3 ]"),
        ["/: expected value type: scalar"]
    );
    assert_eq!(
        descriptions("root: scalar", "{ key: value }"),
        ["/: expected value type: scalar"]
    );
}

#[test]
fn test_numeric_type() {
    assert!(validate("root: numeric", "42").is_empty());
    assert!(validate("root: numeric", "42.0").is_empty());
    assert_eq!(
        descriptions("root: numeric", "some string"),
        ["/: expected value type: numeric"]
    );
}

#[test]
fn test_integer_type() {
    assert!(validate("root: integer", "42").is_empty());
    assert_eq!(
        descriptions("root: integer", "42.0"),
        ["/: expected value type: integer"]
    );
    assert_eq!(
        descriptions("root: integer", "some string"),
        ["/: expected value type: integer"]
    );
}

#[test]
fn test_boolean_type() {
    assert!(validate("root: [boolean]", "[ true, false, y, n, yes, no, on, off ]").is_empty());
    assert_eq!(
        descriptions("root: [boolean]", "[ true, some string ]"),
        ["/1: expected value type: boolean"]
    );
}

#[test]
fn test_string_type() {
    // Quoted scalars that look numeric or boolean are strings.
    assert!(validate("root: [string]", "[ some string, '42', 'true', '42.0' ]").is_empty());
    assert_eq!(
        descriptions("root: [string]", "[ true, 42, 42.0 ]"),
        [
            "/0: expected value type: string",
            "/1: expected value type: string",
            "/2: expected value type: string",
        ]
    );
}

#[test]
fn test_any_sequence_and_any_map() {
    assert!(validate("root: []", "[ 1, 2, 3 ]").is_empty());
    assert_eq!(descriptions("root: []", "42.0"), ["/: expected value type: []"]);
    assert!(validate("root: {}", "{ key: value }").is_empty());
    assert_eq!(descriptions("root: {}", "42.0"), ["/: expected value type: {}"]);
}

#[test]
fn test_type_aliases() {
    for (schema, doc) in [
        ("root: map", "{ key: value }"),
        ("root: list", "[ 1, 2, 3 ]"),
        ("root: num", "42.0"),
        ("root: int", "42"),
        ("root: bool", "true"),
        ("root: str", "hello"),
    ] {
        assert!(validate(schema, doc).is_empty(), "schema: {schema}");
    }
}

// =============================================================================
// Custom Types
// =============================================================================

#[test]
fn test_custom_alias_reports_body_type() {
    let schema = "types:\n  custom_type: scalar\nroot: custom_type";
    assert!(validate(schema, "42.0").is_empty());
    assert_eq!(
        descriptions(schema, "[ 1, 2, 3 ]"),
        ["/: expected value type: scalar"]
    );
}

// =============================================================================
// Sequences of Structs
// =============================================================================

const SEQUENCE_SCHEMA: &str = "root:\n- name: scalar\n  description: any";

#[test]
fn test_sequence_of_structs_valid() {
    let doc = "- name: Some name 1\n  description: Some description 1\n- name: Some name 2\n  description: Some description 2";
    assert!(validate(SEQUENCE_SCHEMA, doc).is_empty());
}

#[test]
fn test_sequence_element_type_error() {
    let doc = "- name: Some name 1\n  description: Some description 1\n- name: [ 1, 2, 3 ]\n  description: Some description 2";
    assert_eq!(
        descriptions(SEQUENCE_SCHEMA, doc),
        ["/1.name: expected value type: scalar"]
    );
}

#[test]
fn test_sequence_element_missing_field() {
    let doc = "- name: Some name 1\n  description: Some description 1\n- description: Some description 2";
    assert_eq!(descriptions(SEQUENCE_SCHEMA, doc), ["/1.name: node not found"]);
}

#[test]
fn test_sequence_root_against_scalar_renders_schema_shape() {
    assert_eq!(
        descriptions(SEQUENCE_SCHEMA, "42"),
        ["/: expected value type: [{name: scalar, description: any}]"]
    );
}

// =============================================================================
// Structures
// =============================================================================

const REQUIRED_SCHEMA: &str =
    "types:\n  custom_type:\n    name: scalar\n    description: any\nroot: custom_type";

#[test]
fn test_required_structure_valid() {
    assert!(validate(REQUIRED_SCHEMA, "name: some name\ndescription: [ 1, 2, 3 ]").is_empty());
}

#[test]
fn test_required_structure_missing_field() {
    assert_eq!(
        descriptions(REQUIRED_SCHEMA, "name: some name"),
        ["/description: node not found"]
    );
}

#[test]
fn test_required_structure_field_order() {
    assert_eq!(
        descriptions(REQUIRED_SCHEMA, "{}"),
        ["/name: node not found", "/description: node not found"]
    );
}

#[test]
fn test_required_structure_against_null_expands_to_fields() {
    assert_eq!(
        descriptions(REQUIRED_SCHEMA, ""),
        ["/name: node not found", "/description: node not found"]
    );
}

const OPTIONAL_SCHEMA: &str =
    "types:\n  custom_type:\n    name: !optional scalar\n    description: !optional any\nroot: custom_type";

#[test]
fn test_optional_fields_may_be_absent() {
    assert!(validate(OPTIONAL_SCHEMA, "name: some name").is_empty());
    assert!(validate(OPTIONAL_SCHEMA, "name: some name\ndescription: [ 1, 2, 3 ]").is_empty());
}

#[test]
fn test_optional_structure_against_null_is_single_type_error() {
    assert_eq!(
        descriptions(OPTIONAL_SCHEMA, ""),
        ["/: expected value type: custom_type"]
    );
}

#[test]
fn test_undefined_keys_reported_in_document_order() {
    let schema = "root:\n  name: scalar";
    assert_eq!(
        descriptions(schema, "name: x\nzed: 1\nalpha: 2"),
        ["/zed: undefined node", "/alpha: undefined node"]
    );
}

// =============================================================================
// Embedded Structures
// =============================================================================

const EMBED_SCHEMA: &str =
    "types:\n  custom_type:\n    name: scalar\n    description: any\nroot:\n  _: !embed custom_type";

#[test]
fn test_embedded_fields_spliced() {
    assert!(validate(EMBED_SCHEMA, "name: some name\ndescription: [ 1, 2, 3 ]").is_empty());
    assert_eq!(
        descriptions(EMBED_SCHEMA, "{}"),
        ["/name: node not found", "/description: node not found"]
    );
}

#[test]
fn test_embedded_structure_against_null_renders_embed_signature() {
    assert_eq!(
        descriptions(EMBED_SCHEMA, ""),
        ["/: expected value type: {_: !<!embed> custom_type}"]
    );
}

#[test]
fn test_optional_embedded_structure_against_null() {
    let schema = "types:\n  custom_type:\n    name: !optional scalar\n    description: !optional any\nroot:\n  _: !embed custom_type";
    assert_eq!(
        descriptions(schema, ""),
        ["/: expected value type: {_: !<!embed> custom_type}"]
    );
}

// =============================================================================
// Dynamic Keys
// =============================================================================

const KEY_TYPE_SCHEMA: &str = "root:\n  $numeric: any\n  $boolean: any";

#[test]
fn test_key_types_satisfied() {
    assert!(validate(KEY_TYPE_SCHEMA, "{ 420: [ 1, 2, 3 ], 42.0: 123, true: 1 }").is_empty());
}

#[test]
fn test_key_types_missing_then_undefined() {
    assert_eq!(
        descriptions(KEY_TYPE_SCHEMA, "{ some_key: [ 1, 2, 3 ], another_key: 123 }"),
        [
            "/: missing key with type: numeric",
            "/: missing key with type: boolean",
            "/some_key: undefined node",
            "/another_key: undefined node",
        ]
    );
}

#[test]
fn test_key_type_struct_against_scalar() {
    assert_eq!(
        descriptions(KEY_TYPE_SCHEMA, "some string"),
        ["/: expected value type: {$numeric: any, $boolean: any}"]
    );
}

const EMBEDDED_KEY_SCHEMA: &str = "types:\n  embedded:\n    $integer: any\nroot:\n  _1: !embed\n    $numeric: any\n  _2: !embed embedded\n  $boolean: any";

#[test]
fn test_embedded_key_types_satisfied() {
    assert!(validate(EMBEDDED_KEY_SCHEMA, "{ 420: [ 1, 2, 3 ], 42.0: 123, true: 1 }").is_empty());
}

#[test]
fn test_embedded_key_types_missing_in_declaration_order() {
    assert_eq!(
        descriptions(EMBEDDED_KEY_SCHEMA, "{ some_key: [ 1, 2, 3 ], another_key: 123 }"),
        [
            "/: missing key with type: numeric",
            "/: missing key with type: integer",
            "/: missing key with type: boolean",
            "/some_key: undefined node",
            "/another_key: undefined node",
        ]
    );
}

#[test]
fn test_embedded_key_type_struct_against_scalar() {
    assert_eq!(
        descriptions(EMBEDDED_KEY_SCHEMA, "some string"),
        ["/: expected value type: {_1: !<!embed> {$numeric: any}, _2: !<!embed> embedded, $boolean: any}"]
    );
}

// =============================================================================
// Settings
// =============================================================================

#[test]
fn test_default_required_false() {
    let schema = "settings:\n  default_required: false\nroot:\n  name: !required scalar\n  description: any";
    assert!(validate(schema, "name: some name").is_empty());
    assert_eq!(descriptions(schema, "{}"), ["/name: node not found"]);
}

#[test]
fn test_custom_tag_names() {
    let schema = "settings:\n  optional_tag: my_optional\n  required_tag: my_required\n  embed_tag: my_embed\nroot:\n  _: !my_embed\n    name: !my_required scalar\n    description: !my_optional any";
    assert!(validate(schema, "name: some name").is_empty());
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_attributes_not_ignored_by_default() {
    let schema = "root: { key: string }";
    assert!(validate(schema, "key: some string").is_empty());
    assert_eq!(
        descriptions(schema, "key:ATTR: some string"),
        ["/key: node not found", "/key:ATTR: undefined node"]
    );
}

#[test]
fn test_attributes_ignored_when_enabled() {
    let schema = "settings:\n  ignore_attributes: true\nroot:\n  key: string";
    assert!(validate(schema, "key: some string").is_empty());
    assert!(validate(schema, "key:ATTR: some string").is_empty());
    assert!(validate(schema, "key:ATTR:ATTR: some string").is_empty());
}

#[test]
fn test_attribute_stripping_keeps_key_scalar_category() {
    let schema = "settings:\n  ignore_attributes: true\nroot:\n  $numeric: any";
    assert!(validate(schema, "42: 1").is_empty());
    assert!(validate(schema, "42:X: 1").is_empty());
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_validation_is_deterministic() {
    let doc = "{ some_key: [ 1, 2, 3 ], another_key: 123 }";
    let first = descriptions(KEY_TYPE_SCHEMA, doc);
    for _ in 0..50 {
        assert_eq!(descriptions(KEY_TYPE_SCHEMA, doc), first);
    }
}
