//! Textual JSON patching for result materialization.
//!
//! [`update`] replaces the value of one top-level key inside a raw JSON
//! object without decoding the document into a tree: a scanner locates the
//! target value span and splices in the replacement text. Every byte outside
//! the span (key order, whitespace, nested formatting) is carried into the
//! output unchanged, and the input text is never mutated.
//!
//! [`to_wire_bytes`] encodes any node for embedding into surrounding JSON
//! text.

use std::fmt;
use std::ops::Range;

use crate::value::{Node, NodeType};

/// Structural failure of a patch operation.
///
/// Unlike value coercion, a failed patch is an explicit error: it points to
/// a malformed document or a caller bug, not to bad record data.
#[derive(Debug, Clone, PartialEq)]
pub enum PatchError {
    /// The replacement node kind cannot be embedded into a document.
    UnsupportedValue(NodeType),

    /// The key is not present at the top level of the document.
    KeyNotFound(String),

    /// The document text is not a scannable JSON object.
    Malformed(String),
}

impl fmt::Display for PatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchError::UnsupportedValue(t) => {
                write!(f, "unsupported replacement value of type {}", t)
            }
            PatchError::KeyNotFound(key) => write!(f, "key {:?} not found in document", key),
            PatchError::Malformed(msg) => write!(f, "malformed document: {}", msg),
        }
    }
}

impl std::error::Error for PatchError {}

/// Replaces the value of `key` at the top level of `doc`, returning the
/// patched document.
///
/// An empty `key` with a [`Node::Json`] replacement swaps out the whole
/// document for the replacement's raw text. Otherwise numeric and boolean
/// replacements splice their canonical text unquoted, strings splice wrapped
/// in double quotes (no escaping beyond what the caller guarantees), and
/// raw JSON splices verbatim as a sub-document. `Array`, `Null`, and
/// `Undefined` replacements are rejected.
///
/// # Examples
///
/// ```
/// use streamql::{patch, Node};
///
/// let doc = r#"{"a":1,"b":2}"#;
/// let out = patch::update(doc, "b", &Node::Int(5)).unwrap();
/// assert_eq!(out, r#"{"a":1,"b":5}"#);
/// ```
pub fn update(doc: &str, key: &str, value: &Node) -> Result<String, PatchError> {
    let encoded = match value {
        Node::Int(_) | Node::Float(_) | Node::Bool(_) => value.to_string(),
        Node::String(s) => format!("\"{}\"", s),
        Node::Json(raw) => {
            if key.is_empty() {
                return Ok(raw.clone());
            }
            raw.clone()
        }
        other => return Err(PatchError::UnsupportedValue(other.node_type())),
    };

    let span = locate_value(doc, key)?;
    let mut out = String::with_capacity(doc.len() - span.len() + encoded.len());
    out.push_str(&doc[..span.start]);
    out.push_str(&encoded);
    out.push_str(&doc[span.end..]);
    Ok(out)
}

/// Encodes a node to its on-the-wire byte form for embedding into a larger
/// JSON structure: raw JSON passes through, strings are quote-wrapped,
/// everything else uses the canonical text (so `Undefined` encodes as
/// nothing and `Null` as `null`).
pub fn to_wire_bytes(value: &Node) -> Vec<u8> {
    match value {
        Node::Json(raw) => raw.clone().into_bytes(),
        Node::String(s) => format!("\"{}\"", s).into_bytes(),
        _ => value.to_string().into_bytes(),
    }
}

/// Finds the byte span of `key`'s value at the top level of `doc`.
///
/// The scan walks key/value pairs left to right: keys are scanned as JSON
/// strings (escape-aware) and values are skipped whole with depth tracking,
/// so a nested occurrence of `key`, or one inside a string value, never
/// matches.
fn locate_value(doc: &str, key: &str) -> Result<Range<usize>, PatchError> {
    let b = doc.as_bytes();
    let mut i = skip_whitespace(b, 0);
    if i >= b.len() || b[i] != b'{' {
        return Err(PatchError::Malformed("expected a top-level object".to_string()));
    }
    i += 1;

    loop {
        i = skip_whitespace(b, i);
        match b.get(i) {
            None => return Err(PatchError::Malformed("unterminated object".to_string())),
            Some(b'}') => return Err(PatchError::KeyNotFound(key.to_string())),
            Some(b'"') => {}
            Some(_) => return Err(PatchError::Malformed("expected a key string".to_string())),
        }

        let key_start = i + 1;
        let after_key = scan_string(b, i)?;
        let key_end = after_key - 1;

        i = skip_whitespace(b, after_key);
        if b.get(i) != Some(&b':') {
            return Err(PatchError::Malformed("expected ':' after key".to_string()));
        }
        i = skip_whitespace(b, i + 1);

        let value_start = i;
        let value_end = scan_value(b, i)?;
        if &doc[key_start..key_end] == key {
            return Ok(value_start..value_end);
        }

        i = skip_whitespace(b, value_end);
        match b.get(i) {
            Some(b',') => i += 1,
            Some(b'}') => return Err(PatchError::KeyNotFound(key.to_string())),
            _ => return Err(PatchError::Malformed("expected ',' or '}' after value".to_string())),
        }
    }
}

fn skip_whitespace(b: &[u8], mut i: usize) -> usize {
    while i < b.len() && matches!(b[i], b' ' | b'\t' | b'\n' | b'\r') {
        i += 1;
    }
    i
}

/// Scans the string starting at the opening quote `i`; returns the index
/// just past the closing quote.
fn scan_string(b: &[u8], i: usize) -> Result<usize, PatchError> {
    let mut j = i + 1;
    while j < b.len() {
        match b[j] {
            b'\\' => j += 2,
            b'"' => return Ok(j + 1),
            _ => j += 1,
        }
    }
    Err(PatchError::Malformed("unterminated string".to_string()))
}

/// Scans one complete value starting at `i`; returns the index just past it.
fn scan_value(b: &[u8], i: usize) -> Result<usize, PatchError> {
    match b.get(i) {
        None => Err(PatchError::Malformed("expected a value".to_string())),
        Some(b'"') => scan_string(b, i),
        Some(b'{') | Some(b'[') => scan_container(b, i),
        Some(_) => {
            // Number, true/false, or null: runs to the next delimiter.
            let mut j = i;
            while j < b.len()
                && !matches!(b[j], b',' | b'}' | b']')
                && !b[j].is_ascii_whitespace()
            {
                j += 1;
            }
            if j == i {
                return Err(PatchError::Malformed("expected a value".to_string()));
            }
            Ok(j)
        }
    }
}

fn scan_container(b: &[u8], mut i: usize) -> Result<usize, PatchError> {
    let mut depth = 0usize;
    while i < b.len() {
        match b[i] {
            b'"' => {
                i = scan_string(b, i)?;
                continue;
            }
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i + 1);
                }
            }
            _ => {}
        }
        i += 1;
    }
    Err(PatchError::Malformed("unterminated object or array".to_string()))
}

#[test]
fn locate_skips_escaped_quotes_in_keys() {
    let doc = r#"{"a\"b":1,"x":2}"#;
    assert_eq!(update(doc, "x", &Node::Int(9)).unwrap(), r#"{"a\"b":1,"x":9}"#);
}

#[test]
fn locate_handles_padded_documents() {
    let doc = "  {  \"only\" :  [1, {\"deep\": 2}]  }  ";
    let span = locate_value(doc, "only").unwrap();
    assert_eq!(&doc[span], "[1, {\"deep\": 2}]");
}
