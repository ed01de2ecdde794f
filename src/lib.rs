pub mod ast;
pub mod patch;
pub mod value;

pub use ast::{
    BinOp, CallExpr, CaseExpr, Dimensions, Expr, Field, Fields, Filter, JsonPathExpr,
    SelectStatement, SwitchExpr, Topic, Window, WindowKind,
};
pub use patch::{PatchError, to_wire_bytes, update};
pub use value::{Node, NodeType};
