use std::fmt;

use serde::{Deserialize, Serialize};

/// The dynamic type of a [`Node`].
///
/// `Number` is an abstract category covering `Int` and `Float`: it is a
/// valid coercion target but is never returned by [`Node::node_type`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Undefined,
    Null,
    Bool,
    Number,
    Int,
    Float,
    String,
    Array,
    Json,
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeType::Undefined => "Undefined",
            NodeType::Null => "Null",
            NodeType::Bool => "Bool",
            NodeType::Number => "Number",
            NodeType::Int => "Int",
            NodeType::Float => "Float",
            NodeType::String => "String",
            NodeType::Array => "Array",
            NodeType::Json => "JSON",
        };
        write!(f, "{}", name)
    }
}

/// A dynamically typed value flowing through the record pipeline.
///
/// Nodes are immutable once constructed, and every projection
/// ([`node_type`](Node::node_type), [`coerce`](Node::coerce),
/// [`value`](Node::value), `Display`) is pure, so a node can be shared
/// read-only across concurrently running evaluators.
///
/// `Array` and `Json` carry their serialized JSON text verbatim;
/// [`Node::value`] decodes it lazily on each call.
///
/// # Coercion
///
/// [`Node::coerce`] is a total function: a conversion that cannot be
/// performed yields [`Node::Undefined`] instead of an error, and downstream
/// stages treat the sentinel as "omit". Callers detect failure with
/// [`Node::is_undefined`].
///
/// # Examples
///
/// ```
/// use streamql::{Node, NodeType};
///
/// assert_eq!(Node::String("3".into()).coerce(NodeType::Number), Node::Int(3));
/// assert_eq!(Node::String("3.5".into()).coerce(NodeType::Number), Node::Float(3.5));
/// assert!(Node::String("many".into()).coerce(NodeType::Int).is_undefined());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// No representable value; produced by any failed coercion.
    Undefined,

    /// JSON null.
    Null,

    /// JSON boolean.
    Bool(bool),

    /// Discrete number (preserved separately from floats).
    Int(i64),

    /// Floating-point number.
    Float(f64),

    /// UTF-8 string.
    String(String),

    /// A JSON array carried as its serialized text.
    Array(String),

    /// An arbitrary JSON object or array carried as raw text.
    Json(String),
}

impl Node {
    /// The type tag of this node. Never returns [`NodeType::Number`].
    pub fn node_type(&self) -> NodeType {
        match self {
            Node::Undefined => NodeType::Undefined,
            Node::Null => NodeType::Null,
            Node::Bool(_) => NodeType::Bool,
            Node::Int(_) => NodeType::Int,
            Node::Float(_) => NodeType::Float,
            Node::String(_) => NodeType::String,
            Node::Array(_) => NodeType::Array,
            Node::Json(_) => NodeType::Json,
        }
    }

    /// Whether this node is the [`Node::Undefined`] sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Node::Undefined)
    }

    /// Whether this node is JSON null.
    pub fn is_null(&self) -> bool {
        matches!(self, Node::Null)
    }

    /// Converts this node to the requested type.
    ///
    /// Total over every `(variant, target)` pair: combinations with no
    /// defined conversion return [`Node::Undefined`] rather than failing.
    ///
    /// `NodeType::Number` routes strings by the textual presence of a
    /// decimal point (no dot parses as `Int`, a dot parses as `Float`),
    /// independent of the numeric value.
    pub fn coerce(&self, target: NodeType) -> Node {
        match self {
            Node::Undefined => Node::Undefined,
            Node::Null => match target {
                NodeType::Null => Node::Null,
                NodeType::Json => Node::Json("{}".to_string()),
                NodeType::Array => Node::Array("[]".to_string()),
                _ => Node::Undefined,
            },
            Node::Bool(b) => match target {
                NodeType::Bool => self.clone(),
                NodeType::String => Node::String(b.to_string()),
                _ => Node::Undefined,
            },
            Node::Int(i) => match target {
                NodeType::Int | NodeType::Number => self.clone(),
                NodeType::Float => Node::Float(*i as f64),
                NodeType::String => Node::String(i.to_string()),
                _ => Node::Undefined,
            },
            Node::Float(x) => match target {
                NodeType::Float | NodeType::Number => self.clone(),
                NodeType::Int => Node::Int(*x as i64),
                NodeType::String => Node::String(format!("{:.6}", x)),
                _ => Node::Undefined,
            },
            Node::String(s) => match target {
                NodeType::String => self.clone(),
                NodeType::Bool => match parse_bool(s) {
                    Some(b) => Node::Bool(b),
                    None => Node::Undefined,
                },
                NodeType::Number => {
                    if s.contains('.') {
                        self.coerce(NodeType::Float)
                    } else {
                        self.coerce(NodeType::Int)
                    }
                }
                NodeType::Int => match s.parse::<i64>() {
                    Ok(i) => Node::Int(i),
                    Err(_) => Node::Undefined,
                },
                NodeType::Float => match s.parse::<f64>() {
                    Ok(x) => Node::Float(x),
                    Err(_) => Node::Undefined,
                },
                _ => Node::Undefined,
            },
            Node::Array(raw) => match target {
                NodeType::Array => self.clone(),
                NodeType::String => Node::String(raw.clone()),
                NodeType::Json => Node::Json(raw.clone()),
                _ => Node::Undefined,
            },
            Node::Json(_) => match target {
                NodeType::Json => self.clone(),
                _ => Node::Undefined,
            },
        }
    }

    /// The generic decoded form of this node.
    ///
    /// `Array` and `Json` parse their raw text on each call; text that does
    /// not parse decodes to `Value::Null`, as do the `Undefined` sentinel
    /// and non-finite floats.
    pub fn value(&self) -> serde_json::Value {
        match self {
            Node::Undefined | Node::Null => serde_json::Value::Null,
            Node::Bool(b) => serde_json::Value::Bool(*b),
            Node::Int(i) => serde_json::Value::from(*i),
            Node::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Node::String(s) => serde_json::Value::String(s.clone()),
            Node::Array(raw) | Node::Json(raw) => {
                serde_json::from_str(raw).unwrap_or(serde_json::Value::Null)
            }
        }
    }
}

/// Canonical text form of a node.
///
/// Bools render as `true`/`false`, ints as plain decimals, floats with
/// exactly six fractional digits, strings as their raw unquoted text,
/// `Array`/`Json` as their raw content verbatim, and `Undefined` as the
/// empty string. Downstream JSON assembly depends on these exact renderings.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Undefined => Ok(()),
            Node::Null => write!(f, "null"),
            Node::Bool(b) => write!(f, "{}", b),
            Node::Int(i) => write!(f, "{}", i),
            Node::Float(x) => write!(f, "{:.6}", x),
            Node::String(s) => write!(f, "{}", s),
            Node::Array(raw) | Node::Json(raw) => write!(f, "{}", raw),
        }
    }
}

// Boolean spellings accepted by string coercion.
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

impl From<bool> for Node {
    fn from(v: bool) -> Self {
        Node::Bool(v)
    }
}

impl From<f64> for Node {
    fn from(v: f64) -> Self {
        Node::Float(v)
    }
}

impl From<f32> for Node {
    fn from(v: f32) -> Self {
        Node::Float(f64::from(v))
    }
}

impl From<i64> for Node {
    fn from(v: i64) -> Self {
        Node::Int(v)
    }
}

impl From<i32> for Node {
    fn from(v: i32) -> Self {
        Node::Int(i64::from(v))
    }
}

impl From<i16> for Node {
    fn from(v: i16) -> Self {
        Node::Int(i64::from(v))
    }
}

impl From<i8> for Node {
    fn from(v: i8) -> Self {
        Node::Int(i64::from(v))
    }
}

impl From<u8> for Node {
    fn from(v: u8) -> Self {
        Node::Int(i64::from(v))
    }
}

impl From<u16> for Node {
    fn from(v: u16) -> Self {
        Node::Int(i64::from(v))
    }
}

impl From<u32> for Node {
    fn from(v: u32) -> Self {
        Node::Int(i64::from(v))
    }
}

/// Normalized through a decimal-text round trip: values above `i64::MAX`
/// have no `Int` form and degrade to `Undefined`.
impl From<u64> for Node {
    fn from(v: u64) -> Self {
        Node::String(v.to_string()).coerce(NodeType::Int)
    }
}

impl From<usize> for Node {
    fn from(v: usize) -> Self {
        Node::from(v as u64)
    }
}

impl From<isize> for Node {
    fn from(v: isize) -> Self {
        Node::Int(v as i64)
    }
}

impl From<&str> for Node {
    fn from(v: &str) -> Self {
        Node::String(v.to_string())
    }
}

impl From<String> for Node {
    fn from(v: String) -> Self {
        Node::String(v)
    }
}

/// Byte sequences are treated as raw JSON text.
impl From<&[u8]> for Node {
    fn from(v: &[u8]) -> Self {
        Node::Json(String::from_utf8_lossy(v).into_owned())
    }
}

impl From<Vec<u8>> for Node {
    fn from(v: Vec<u8>) -> Self {
        Node::from(v.as_slice())
    }
}

/// `None` becomes `Null`; `Some` unwraps one level and converts the inner
/// value.
impl<T: Into<Node>> From<Option<T>> for Node {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Node::Null,
        }
    }
}

/// Construction from a generic decoded JSON value, the one genuinely
/// dynamic input boundary. Total: unsupported shapes (numbers with no
/// 64-bit form) degrade to `Undefined`, never an error.
impl From<serde_json::Value> for Node {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Node::Null,
            serde_json::Value::Bool(b) => Node::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Node::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Node::from(u)
                } else {
                    n.as_f64().map(Node::Float).unwrap_or(Node::Undefined)
                }
            }
            serde_json::Value::String(s) => Node::String(s),
            // Arrays and objects re-serialize to raw JSON text.
            other => match serde_json::to_string(&other) {
                Ok(raw) => Node::Json(raw),
                Err(_) => Node::Undefined,
            },
        }
    }
}
