//! Per-clause accumulators: SELECT, FROM/JOIN, SET, GROUP BY, ORDER BY, LIMIT.
//!
//! Each builder exposes an add operation and a render operation. Rendering
//! never mutates the builder; SET rendering returns its values alongside the
//! fragment so the assembler can splice them ahead of WHERE parameters.

use crate::error::QueryResult;
use crate::render::RenderMode;
use crate::value::Value;

// ==================== SELECT ====================

/// SELECT column list with execution-option keywords.
///
/// Entries are keyed by expression: re-adding a known expression replaces its
/// alias but keeps its original slot.
#[derive(Clone, Debug, Default)]
pub struct SelectClause {
    entries: Vec<(String, Option<String>)>,
    options: Vec<String>,
}

impl SelectClause {
    /// Add a column or expression, optionally aliased.
    pub fn add_column(&mut self, expr: &str, alias: Option<&str>) {
        if let Some(entry) = self.entries.iter_mut().find(|(e, _)| e == expr) {
            entry.1 = alias.map(str::to_string);
        } else {
            self.entries
                .push((expr.to_string(), alias.map(str::to_string)));
        }
    }

    /// Add an execution-option keyword (e.g. `DISTINCT`).
    pub fn add_option(&mut self, keyword: &str) {
        self.options.push(keyword.to_string());
    }

    /// Check if any columns have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the column list, prefixed with `SELECT` when `with_keyword`.
    pub fn render(&self, with_keyword: bool) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let columns: Vec<String> = self
            .entries
            .iter()
            .map(|(expr, alias)| match alias {
                Some(a) => format!("{expr} AS {a}"),
                None => expr.clone(),
            })
            .collect();
        let mut out = String::new();
        if with_keyword {
            out.push_str("SELECT ");
        }
        for option in &self.options {
            out.push_str(option);
            out.push(' ');
        }
        out.push_str(&columns.join(", "));
        out
    }
}

// ==================== FROM / JOIN ====================

/// Join type.
#[derive(Clone, Debug)]
pub enum JoinKind {
    /// INNER JOIN
    Inner,
    /// LEFT JOIN
    Left,
    /// RIGHT JOIN
    Right,
    /// Arbitrary join keyword text (e.g. `CROSS JOIN`)
    Custom(String),
}

impl JoinKind {
    /// SQL keyword for this join type.
    pub fn as_sql(&self) -> &str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Custom(s) => s,
        }
    }
}

/// One JOIN registration: target table and its ON conditions.
#[derive(Clone, Debug)]
pub struct JoinSpec {
    /// Joined table
    pub table: String,
    /// Optional alias
    pub alias: Option<String>,
    /// Join type
    pub kind: JoinKind,
    /// ON conditions: raw `a = b` text (detected by `=`), or a bare column
    /// resolved against the previous table in the FROM/JOIN chain
    pub criteria: Vec<String>,
}

impl JoinSpec {
    // The name the rendered SQL can reference this table by.
    fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }
}

/// FROM table plus ordered JOIN registrations.
#[derive(Clone, Debug, Default)]
pub struct FromClause {
    table: Option<(String, Option<String>)>,
    joins: Vec<JoinSpec>,
}

impl FromClause {
    /// Set the FROM table, replacing any prior value.
    pub fn set_from(&mut self, table: &str, alias: Option<&str>) {
        self.table = Some((table.to_string(), alias.map(str::to_string)));
    }

    /// Register a join; joins render in registration order.
    pub fn add_join(&mut self, join: JoinSpec) {
        self.joins.push(join);
    }

    /// Check if a table or any join has been registered.
    pub fn is_empty(&self) -> bool {
        self.table.is_none() && self.joins.is_empty()
    }

    fn from_reference(&self) -> Option<&str> {
        self.table
            .as_ref()
            .map(|(table, alias)| alias.as_deref().unwrap_or(table))
    }

    /// Render `table [AS alias]` followed by the joins in registration order.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some((table, alias)) = &self.table {
            out.push_str(table);
            if let Some(a) = alias {
                out.push_str(" AS ");
                out.push_str(a);
            }
        }

        let mut previous = self.from_reference().map(str::to_string);
        for join in &self.joins {
            if !out.is_empty() {
                out.push(' ');
            }
            out.push_str(join.kind.as_sql());
            out.push(' ');
            out.push_str(&join.table);
            if let Some(a) = &join.alias {
                out.push_str(" AS ");
                out.push_str(a);
            }
            if !join.criteria.is_empty() {
                out.push_str(" ON ");
                let conditions: Vec<String> = join
                    .criteria
                    .iter()
                    .map(|c| resolve_on_condition(c, previous.as_deref(), join.reference()))
                    .collect();
                out.push_str(&conditions.join(" AND "));
            }
            previous = Some(join.reference().to_string());
        }

        out.trim().to_string()
    }
}

// Raw `a = b` text passes through; a bare column resolves as
// `previous.col = current.col`.
fn resolve_on_condition(condition: &str, previous: Option<&str>, current: &str) -> String {
    if condition.contains('=') {
        condition.to_string()
    } else {
        match previous {
            Some(prev) => format!("{prev}.{condition} = {current}.{condition}"),
            None => condition.to_string(),
        }
    }
}

// ==================== SET ====================

/// SET assignments with last-write-wins per column.
#[derive(Clone, Debug, Default)]
pub struct SetClause {
    assignments: Vec<(String, Value)>,
}

impl SetClause {
    /// Assign a value to a column; a repeated column keeps its original slot.
    pub fn assign(&mut self, column: &str, value: Value) {
        if let Some(slot) = self.assignments.iter_mut().find(|(c, _)| c == column) {
            slot.1 = value;
        } else {
            self.assignments.push((column.to_string(), value));
        }
    }

    /// Assign every (column, value) pair in order.
    pub fn assign_all<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (column, value) in pairs {
            self.assign(column.as_ref(), value.into());
        }
    }

    /// Assign a column from any serializable value, stored as JSON text.
    pub fn assign_json<T: serde::Serialize>(&mut self, column: &str, value: &T) -> QueryResult<()> {
        let json = serde_json::to_string(value)?;
        self.assign(column, Value::Text(json));
        Ok(())
    }

    /// Check if any assignments have been made.
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Render `SET col = ?, …` plus the values in emission order.
    pub fn render(&self, mode: RenderMode<'_>) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        if self.assignments.is_empty() {
            return (String::new(), params);
        }
        let parts: Vec<String> = self
            .assignments
            .iter()
            .map(|(column, value)| format!("{} = {}", column, mode.render_value(value, &mut params)))
            .collect();
        (format!("SET {}", parts.join(", ")), params)
    }
}

// ==================== GROUP BY / ORDER BY ====================

/// Ordered `(column, direction)` pairs shared by GROUP BY and ORDER BY.
#[derive(Clone, Debug)]
pub struct OrderingClause {
    keyword: &'static str,
    entries: Vec<(String, Option<String>)>,
}

impl OrderingClause {
    /// Create a clause rendered under the given keyword.
    pub fn new(keyword: &'static str) -> Self {
        Self {
            keyword,
            entries: Vec::new(),
        }
    }

    /// Append a column; direction is free text, absent means ascending.
    pub fn add(&mut self, column: &str, direction: Option<&str>) {
        self.entries
            .push((column.to_string(), direction.map(str::to_string)));
    }

    /// Check if any entries have been added.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render comma-joined `col dir` pairs, keyword-prefixed on request.
    pub fn render(&self, with_keyword: bool) -> String {
        if self.entries.is_empty() {
            return String::new();
        }
        let parts: Vec<String> = self
            .entries
            .iter()
            .map(|(column, direction)| match direction {
                Some(d) => format!("{column} {d}"),
                None => column.clone(),
            })
            .collect();
        if with_keyword {
            format!("{} {}", self.keyword, parts.join(", "))
        } else {
            parts.join(", ")
        }
    }
}

// ==================== LIMIT ====================

/// LIMIT count with optional row offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LimitSpec {
    /// Maximum number of rows
    pub count: u64,
    /// Rows to skip before counting
    pub offset: u64,
}

impl LimitSpec {
    /// Render `offset, count` when offset is non-zero, else `count`,
    /// keyword-prefixed on request.
    pub fn render(&self, with_keyword: bool) -> String {
        let body = if self.offset != 0 {
            format!("{}, {}", self.offset, self.count)
        } else {
            self.count.to_string()
        };
        if with_keyword {
            format!("LIMIT {body}")
        } else {
            body
        }
    }
}
