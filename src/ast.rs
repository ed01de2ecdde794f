//! Parse tree for the record selection language.
//!
//! A query selects, filters, and groups fields of records streaming in from
//! one or more topics:
//!
//! ```text
//! SELECT temperature AS temp, device
//! FROM sensors
//! WHERE temperature > 20
//! GROUP BY device, TUMBLINGWINDOW(60)
//! ```
//!
//! The tree is built once by the parser and read-only afterwards: every
//! child is owned exactly once by its parent, there are no back-references,
//! and no method mutates a node. A parsed statement can therefore be walked
//! by any number of evaluator threads at once.
//!
//! ## Submodules
//!
//! - **[query]** - the [`SelectStatement`] root and its clauses
//! - **[expressions]** - expression nodes below the clause level
//! - **[operators]** - binary operators
//! - **[window]** - streaming window descriptors

pub mod expressions;
pub mod operators;
pub mod query;
pub mod window;

pub use expressions::{CallExpr, CaseExpr, Expr, JsonPathExpr, SwitchExpr};
pub use operators::BinOp;
pub use query::{Dimensions, Field, Fields, Filter, SelectStatement, Topic};
pub use window::{Window, WindowKind};
