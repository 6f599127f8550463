//! Criteria lists for WHERE/HAVING composition.
//!
//! A criteria list is an ordered sequence of predicates and bracket markers.
//! Insertion order is the rendering order; nodes are never reordered or
//! deduplicated, and a criterion is immutable once appended.

use crate::error::{QueryError, QueryResult};
use crate::value::Value;

/// Logical connector joining a node to its predecessor at the same depth.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Connector {
    /// AND
    And,
    /// OR
    Or,
}

impl Connector {
    /// SQL keyword for this connector.
    pub fn as_sql(self) -> &'static str {
        match self {
            Connector::And => "AND",
            Connector::Or => "OR",
        }
    }
}

/// Comparison operator for a criterion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    /// Equal: column = value
    Eq,
    /// Not equal: column != value
    Ne,
    /// Less than: column < value
    Lt,
    /// Less than or equal: column <= value
    Lte,
    /// Greater than: column > value
    Gt,
    /// Greater than or equal: column >= value
    Gte,
    /// LIKE pattern match
    Like,
    /// IS, right-hand side emitted verbatim
    Is,
    /// IS NOT, right-hand side emitted verbatim
    IsNot,
    /// IN (list)
    In,
    /// NOT IN (list)
    NotIn,
    /// BETWEEN a AND b
    Between,
    /// NOT BETWEEN a AND b
    NotBetween,
    /// Arbitrary operator text (escape hatch).
    ///
    /// # Safety
    /// The text is emitted as-is. The caller must ensure safety.
    Raw(String),
}

impl Operator {
    /// Parse operator text, falling back to [`Operator::Raw`] for anything
    /// outside the closed set.
    pub fn parse(op: &str) -> Self {
        match op.trim().to_ascii_uppercase().as_str() {
            "=" => Operator::Eq,
            "!=" | "<>" => Operator::Ne,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "LIKE" => Operator::Like,
            "IS" => Operator::Is,
            "IS NOT" => Operator::IsNot,
            "IN" => Operator::In,
            "NOT IN" => Operator::NotIn,
            "BETWEEN" => Operator::Between,
            "NOT BETWEEN" => Operator::NotBetween,
            _ => Operator::Raw(op.trim().to_string()),
        }
    }

    /// SQL text for this operator.
    pub fn as_sql(&self) -> &str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Like => "LIKE",
            Operator::Is => "IS",
            Operator::IsNot => "IS NOT",
            Operator::In => "IN",
            Operator::NotIn => "NOT IN",
            Operator::Between => "BETWEEN",
            Operator::NotBetween => "NOT BETWEEN",
            Operator::Raw(s) => s,
        }
    }
}

/// Value payload of a criterion.
#[derive(Clone, Debug)]
pub enum CriterionValue {
    /// One scalar
    Single(Value),
    /// A (from, to) range pair
    Pair(Value, Value),
    /// A membership list
    List(Vec<Value>),
}

/// One predicate term in a WHERE/HAVING tree.
#[derive(Clone, Debug)]
pub struct Criterion {
    /// Column or expression on the left-hand side
    pub column: String,
    /// Comparison operator
    pub operator: Operator,
    /// Right-hand side value(s)
    pub value: CriterionValue,
    /// How this predicate joins to its predecessor
    pub connector: Connector,
}

/// A node in a criteria list: a predicate or a bracket marker.
#[derive(Clone, Debug)]
pub enum CriteriaNode {
    /// One predicate
    Condition(Criterion),
    /// Opening bracket, carrying the connector that joins the group to its
    /// predecessor
    GroupOpen(Connector),
    /// Closing bracket
    GroupClose,
}

/// Ordered sequence of predicates and bracket markers.
#[derive(Clone, Debug, Default)]
pub struct CriteriaList {
    nodes: Vec<CriteriaNode>,
}

impl CriteriaList {
    /// Create an empty criteria list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any nodes have been added.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The nodes in insertion order.
    pub fn nodes(&self) -> &[CriteriaNode] {
        &self.nodes
    }

    /// Append one predicate.
    pub fn add_condition(
        &mut self,
        column: &str,
        operator: Operator,
        value: Value,
        connector: Connector,
    ) {
        self.nodes.push(CriteriaNode::Condition(Criterion {
            column: column.to_string(),
            operator,
            value: CriterionValue::Single(value),
            connector,
        }));
    }

    /// Append a BETWEEN predicate over a (from, to) range.
    pub fn add_range(&mut self, column: &str, from: Value, to: Value, connector: Connector) {
        self.push_range(column, Operator::Between, from, to, connector);
    }

    /// Append a NOT BETWEEN predicate over a (from, to) range.
    pub fn add_not_range(&mut self, column: &str, from: Value, to: Value, connector: Connector) {
        self.push_range(column, Operator::NotBetween, from, to, connector);
    }

    /// Append an IN predicate; the value list must be non-empty.
    pub fn add_membership(
        &mut self,
        column: &str,
        values: Vec<Value>,
        connector: Connector,
    ) -> QueryResult<()> {
        self.push_membership(column, Operator::In, values, connector)
    }

    /// Append a NOT IN predicate; the value list must be non-empty.
    pub fn add_not_membership(
        &mut self,
        column: &str,
        values: Vec<Value>,
        connector: Connector,
    ) -> QueryResult<()> {
        self.push_membership(column, Operator::NotIn, values, connector)
    }

    /// Open a bracketed group joined to its predecessor by `connector`.
    ///
    /// Balance against [`CriteriaList::close_group`] is not checked here;
    /// rendering validates it once.
    pub fn open_group(&mut self, connector: Connector) {
        self.nodes.push(CriteriaNode::GroupOpen(connector));
    }

    /// Close the innermost bracketed group.
    pub fn close_group(&mut self) {
        self.nodes.push(CriteriaNode::GroupClose);
    }

    fn push_range(
        &mut self,
        column: &str,
        operator: Operator,
        from: Value,
        to: Value,
        connector: Connector,
    ) {
        self.nodes.push(CriteriaNode::Condition(Criterion {
            column: column.to_string(),
            operator,
            value: CriterionValue::Pair(from, to),
            connector,
        }));
    }

    fn push_membership(
        &mut self,
        column: &str,
        operator: Operator,
        values: Vec<Value>,
        connector: Connector,
    ) -> QueryResult<()> {
        if values.is_empty() {
            return Err(QueryError::invalid_argument(format!(
                "{} condition on '{}' requires at least one value",
                operator.as_sql(),
                column
            )));
        }
        self.nodes.push(CriteriaNode::Condition(Criterion {
            column: column.to_string(),
            operator,
            value: CriterionValue::List(values),
            connector,
        }));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_parse() {
        assert_eq!(Operator::parse("="), Operator::Eq);
        assert_eq!(Operator::parse("<>"), Operator::Ne);
        assert_eq!(Operator::parse("not in"), Operator::NotIn);
        assert_eq!(Operator::parse(" is not "), Operator::IsNot);
    }

    #[test]
    fn test_operator_parse_raw_fallback() {
        assert_eq!(
            Operator::parse("@>"),
            Operator::Raw("@>".to_string())
        );
        assert_eq!(Operator::parse("@>").as_sql(), "@>");
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut list = CriteriaList::new();
        list.add_condition("a", Operator::Eq, Value::Int(1), Connector::And);
        list.add_condition("a", Operator::Eq, Value::Int(1), Connector::And);
        list.add_condition("b", Operator::Gt, Value::Int(2), Connector::Or);
        // Duplicates are kept; nothing is merged.
        assert_eq!(list.nodes().len(), 3);
    }

    #[test]
    fn test_empty_membership_rejected() {
        let mut list = CriteriaList::new();
        let err = list
            .add_membership("id", vec![], Connector::And)
            .unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(list.is_empty());
    }

    #[test]
    fn test_groups_append_without_eager_validation() {
        let mut list = CriteriaList::new();
        list.close_group();
        list.open_group(Connector::Or);
        assert_eq!(list.nodes().len(), 2);
    }
}
