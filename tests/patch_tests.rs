use streamql::patch::{to_wire_bytes, update};
use streamql::{Node, NodeType, PatchError};

#[test]
fn test_replaces_key_preserving_the_rest() {
    let doc = r#"{"a":1,"b":2}"#;
    assert_eq!(update(doc, "b", &Node::Int(5)).unwrap(), r#"{"a":1,"b":5}"#);
    assert_eq!(update(doc, "a", &Node::Int(9)).unwrap(), r#"{"a":9,"b":2}"#);
}

#[test]
fn test_untouched_formatting_survives() {
    let doc = "{ \"a\" : 1 ,\n  \"b\" : 2 }";
    assert_eq!(
        update(doc, "b", &Node::Int(5)).unwrap(),
        "{ \"a\" : 1 ,\n  \"b\" : 5 }"
    );
}

#[test]
fn test_key_order_is_preserved() {
    let doc = r#"{"z":1,"a":2,"m":3}"#;
    assert_eq!(
        update(doc, "a", &Node::Int(0)).unwrap(),
        r#"{"z":1,"a":0,"m":3}"#
    );
}

#[test]
fn test_string_replacement_is_quoted() {
    let doc = r#"{"name":"old","n":1}"#;
    assert_eq!(
        update(doc, "name", &Node::String("new".into())).unwrap(),
        r#"{"name":"new","n":1}"#
    );
}

#[test]
fn test_numeric_and_bool_replacements_are_unquoted() {
    let doc = r#"{"x":1}"#;
    assert_eq!(
        update(doc, "x", &Node::Float(2.5)).unwrap(),
        r#"{"x":2.500000}"#
    );
    assert_eq!(update(doc, "x", &Node::Bool(true)).unwrap(), r#"{"x":true}"#);
}

#[test]
fn test_json_replacement_splices_verbatim() {
    let doc = r#"{"a":1,"cfg":2}"#;
    let sub = Node::Json(r#"{"deep":[1,2]}"#.into());
    assert_eq!(
        update(doc, "cfg", &sub).unwrap(),
        r#"{"a":1,"cfg":{"deep":[1,2]}}"#
    );
}

#[test]
fn test_container_values_are_replaced_whole() {
    let doc = r#"{"a":[1,2,3],"b":{"k":0}}"#;
    assert_eq!(
        update(doc, "a", &Node::Int(7)).unwrap(),
        r#"{"a":7,"b":{"k":0}}"#
    );
    assert_eq!(
        update(doc, "b", &Node::Int(7)).unwrap(),
        r#"{"a":[1,2,3],"b":7}"#
    );
}

#[test]
fn test_whole_document_replace() {
    let doc = r#"{"anything":"goes"}"#;
    let replacement = Node::Json(r#"{"x":9}"#.into());
    assert_eq!(update(doc, "", &replacement).unwrap(), r#"{"x":9}"#);
}

#[test]
fn test_empty_key_without_json_replacement_fails() {
    assert_eq!(
        update(r#"{"a":1}"#, "", &Node::Int(1)),
        Err(PatchError::KeyNotFound("".into()))
    );
}

#[test]
fn test_missing_key_is_an_error() {
    assert_eq!(
        update(r#"{"a":1}"#, "b", &Node::Int(1)),
        Err(PatchError::KeyNotFound("b".into()))
    );
}

#[test]
fn test_unsupported_replacement_kinds() {
    let doc = r#"{"a":1}"#;
    assert_eq!(
        update(doc, "a", &Node::Array("[1]".into())),
        Err(PatchError::UnsupportedValue(NodeType::Array))
    );
    assert_eq!(
        update(doc, "a", &Node::Null),
        Err(PatchError::UnsupportedValue(NodeType::Null))
    );
    assert_eq!(
        update(doc, "a", &Node::Undefined),
        Err(PatchError::UnsupportedValue(NodeType::Undefined))
    );
}

#[test]
fn test_nested_keys_do_not_match() {
    let doc = r#"{"a":{"b":1},"b":2}"#;
    assert_eq!(
        update(doc, "b", &Node::Int(9)).unwrap(),
        r#"{"a":{"b":1},"b":9}"#
    );
}

#[test]
fn test_keys_inside_string_values_do_not_match() {
    let doc = r#"{"a":"b","b":1}"#;
    assert_eq!(
        update(doc, "b", &Node::Int(2)).unwrap(),
        r#"{"a":"b","b":2}"#
    );
}

#[test]
fn test_non_object_documents_are_rejected() {
    assert!(matches!(
        update("[1,2]", "a", &Node::Int(1)),
        Err(PatchError::Malformed(_))
    ));
    assert!(matches!(
        update("", "a", &Node::Int(1)),
        Err(PatchError::Malformed(_))
    ));
    assert!(matches!(
        update(r#"{"a":"#, "a", &Node::Int(1)),
        Err(PatchError::Malformed(_))
    ));
}

#[test]
fn test_wire_encoding() {
    assert_eq!(
        to_wire_bytes(&Node::Json(r#"{"a":1}"#.into())),
        br#"{"a":1}"#.to_vec()
    );
    assert_eq!(to_wire_bytes(&Node::String("s".into())), b"\"s\"".to_vec());
    assert_eq!(to_wire_bytes(&Node::Int(5)), b"5".to_vec());
    assert_eq!(to_wire_bytes(&Node::Float(2.5)), b"2.500000".to_vec());
    assert_eq!(to_wire_bytes(&Node::Bool(true)), b"true".to_vec());
    assert_eq!(to_wire_bytes(&Node::Null), b"null".to_vec());
    assert_eq!(to_wire_bytes(&Node::Array("[1]".into())), b"[1]".to_vec());
    assert_eq!(to_wire_bytes(&Node::Undefined), Vec::<u8>::new());
}
