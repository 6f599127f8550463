//! Criteria rendering: list walk, operator-specific fragments, placeholders.
//!
//! Rendering is pure: the fragment and its ordered values are returned
//! together, and placeholder order in the fragment always matches the value
//! order in the returned list.

use crate::criteria::{CriteriaNode, Criterion, CriterionValue, Operator};
use crate::error::{QueryError, QueryResult};
use crate::quote::Quoter;
use crate::value::Value;

/// Rendering mode for criteria and SET fragments.
#[derive(Clone, Copy)]
pub enum RenderMode<'a> {
    /// Emit `?` placeholders and collect bound values.
    Parameterized,
    /// Inline values through the quoting collaborator.
    Literal(&'a dyn Quoter),
}

impl RenderMode<'_> {
    /// Render one value: a placeholder in parameterized mode, quoted text in
    /// literal mode.
    pub(crate) fn render_value(&self, value: &Value, params: &mut Vec<Value>) -> String {
        match self {
            RenderMode::Parameterized => {
                params.push(value.clone());
                "?".to_string()
            }
            RenderMode::Literal(quoter) => {
                if value.is_keyword() {
                    value.raw_text()
                } else {
                    quoter.quote(&value.raw_text())
                }
            }
        }
    }
}

/// Render a criteria list into a SQL fragment plus ordered parameters.
///
/// Walks the list in insertion order with a connector-pending flag: a
/// condition or group-open emits its own connector when a sibling precedes
/// it, and a group-close re-arms the flag for whatever follows.
pub fn render_criteria(
    nodes: &[CriteriaNode],
    mode: RenderMode<'_>,
) -> QueryResult<(String, Vec<Value>)> {
    check_balance(nodes)?;

    let mut fragment = String::new();
    let mut params = Vec::new();
    let mut pending = false;

    for node in nodes {
        match node {
            CriteriaNode::GroupOpen(connector) => {
                if pending {
                    fragment.push(' ');
                    fragment.push_str(connector.as_sql());
                    fragment.push(' ');
                }
                fragment.push('(');
                pending = false;
            }
            CriteriaNode::GroupClose => {
                fragment.push(')');
                pending = true;
            }
            CriteriaNode::Condition(criterion) => {
                if pending {
                    fragment.push(' ');
                    fragment.push_str(criterion.connector.as_sql());
                    fragment.push(' ');
                }
                render_condition(criterion, mode, &mut fragment, &mut params)?;
                pending = true;
            }
        }
    }

    Ok((fragment.trim().to_string(), params))
}

fn render_condition(
    criterion: &Criterion,
    mode: RenderMode<'_>,
    fragment: &mut String,
    params: &mut Vec<Value>,
) -> QueryResult<()> {
    fragment.push_str(&criterion.column);
    fragment.push(' ');
    fragment.push_str(criterion.operator.as_sql());
    fragment.push(' ');

    match (&criterion.operator, &criterion.value) {
        // IS / IS NOT: right-hand side is raw SQL text, never parameterized.
        (Operator::Is | Operator::IsNot, CriterionValue::Single(value)) => {
            fragment.push_str(&value.raw_text());
        }
        (Operator::Between | Operator::NotBetween, CriterionValue::Pair(from, to)) => {
            fragment.push_str(&mode.render_value(from, params));
            fragment.push_str(" AND ");
            fragment.push_str(&mode.render_value(to, params));
        }
        (Operator::In | Operator::NotIn, CriterionValue::List(values)) => {
            let rendered: Vec<String> = values
                .iter()
                .map(|v| mode.render_value(v, params))
                .collect();
            fragment.push('(');
            fragment.push_str(&rendered.join(", "));
            fragment.push(')');
        }
        (
            Operator::Eq
            | Operator::Ne
            | Operator::Lt
            | Operator::Lte
            | Operator::Gt
            | Operator::Gte
            | Operator::Like
            | Operator::Raw(_),
            CriterionValue::Single(value),
        ) => {
            fragment.push_str(&mode.render_value(value, params));
        }
        (operator, _) => {
            // Unreachable through the public list operations.
            return Err(QueryError::unsupported(format!(
                "operator {} does not match the shape of its value",
                operator.as_sql()
            )));
        }
    }

    Ok(())
}

// One pass with a depth counter; malformed lists fail here instead of
// rendering unbalanced brackets.
fn check_balance(nodes: &[CriteriaNode]) -> QueryResult<()> {
    let mut depth: i64 = 0;
    for node in nodes {
        match node {
            CriteriaNode::GroupOpen(_) => depth += 1,
            CriteriaNode::GroupClose => {
                depth -= 1;
                if depth < 0 {
                    return Err(QueryError::unbalanced(
                        "group closed without a matching open",
                    ));
                }
            }
            CriteriaNode::Condition(_) => {}
        }
    }
    if depth > 0 {
        return Err(QueryError::unbalanced(format!(
            "{depth} group(s) left open"
        )));
    }
    Ok(())
}
