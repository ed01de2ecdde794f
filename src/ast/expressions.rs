use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::BinOp;
use crate::value::Node;

/// Expression node in the parse tree.
///
/// Expressions appear below the clause level everywhere a value is computed
/// per record: projected fields, the filter predicate, case branches, and
/// function arguments. The set of variants is closed; [`Expr::walk`] visits
/// a subtree without the caller matching on shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Constant embedded in the query text.
    ///
    /// Any [`Node`] variant doubles as a leaf expression.
    Literal(Node),

    /// Reference to a field of the current record.
    Path(JsonPathExpr),

    /// Binary operation.
    ///
    /// The tree guarantees both operands are present; the operator is
    /// resolved by the evaluator.
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Function invocation.
    Call(CallExpr),

    /// Multi-branch conditional.
    Switch(SwitchExpr),
}

impl Expr {
    /// Visits this expression and every sub-expression in pre-order.
    ///
    /// # Examples
    ///
    /// ```
    /// use streamql::{Expr, Node};
    ///
    /// let expr = Expr::Literal(Node::Int(4));
    /// let mut count = 0;
    /// expr.walk(&mut |_| count += 1);
    /// assert_eq!(count, 1);
    /// ```
    pub fn walk<'a, F: FnMut(&'a Expr)>(&'a self, visit: &mut F) {
        visit(self);
        match self {
            Expr::Literal(_) | Expr::Path(_) => {}
            Expr::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Expr::Call(call) => {
                for arg in &call.args {
                    arg.walk(visit);
                }
            }
            Expr::Switch(switch) => {
                switch.subject.walk(visit);
                for case in &switch.cases {
                    case.when.walk(visit);
                    case.then.walk(visit);
                }
                if let Some(default) = &switch.default_branch {
                    default.walk(visit);
                }
            }
        }
    }
}

/// Opaque JSON-path reference into the current record.
///
/// The path grammar belongs to the parser and the resolution against a
/// record to the evaluator; this node only carries the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPathExpr {
    pub path: String,
}

impl fmt::Display for JsonPathExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// Function invocation.
///
/// Keeps the unparsed invocation text alongside the parsed name and ordered
/// arguments; the function itself is looked up by name at evaluation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    /// Unparsed invocation text, kept for diagnostics.
    pub raw: String,

    /// Function name.
    pub name: String,

    /// Ordered argument expressions.
    pub args: Vec<Expr>,
}

impl fmt::Display for CallExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Multi-branch conditional.
///
/// The evaluator checks `cases` in order against `subject` and takes the
/// first match, falling back to `default_branch` when none matches. Builders
/// must preserve source order in `cases`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchExpr {
    pub subject: Box<Expr>,
    pub cases: Vec<CaseExpr>,
    pub default_branch: Option<Box<Expr>>,
}

/// One `WHEN ... THEN ...` branch of a [`SwitchExpr`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseExpr {
    pub when: Expr,
    pub then: Expr,
}
