use serde::{Deserialize, Serialize};

use crate::ast::{Expr, JsonPathExpr, Window};

/// Root of a parsed selection query.
///
/// ```text
/// SELECT fields FROM topic WHERE filter GROUP BY dimensions
/// ```
///
/// `fields` and `topic` are always present; a query without a `WHERE` clause
/// has no filter and one without `GROUP BY` has no dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub fields: Fields,
    pub topic: Topic,
    pub filter: Option<Filter>,
    pub dimensions: Option<Dimensions>,
}

/// Ordered projection list of a query.
pub type Fields = Vec<Field>;

/// One projected output field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub expr: Expr,

    /// Output name; `None` leaves naming to the evaluator.
    pub alias: Option<String>,
}

/// Ordered topic names the query reads records from.
pub type Topic = Vec<String>;

/// The boolean-valued predicate of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub expr: Expr,
}

/// Grouping dimensions plus the optional streaming window.
///
/// Group-by keys are record field references; computed keys are not part of
/// the language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub paths: Vec<JsonPathExpr>,
    pub window: Option<Window>,
}
