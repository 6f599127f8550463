//! Query aggregate: statement kinds, fluent clause building, assembly.
//!
//! The statement kind is fixed at construction, so a query can never drift
//! between shapes. Assembly is pure: the SQL string and its ordered values
//! are produced together on every call, and building twice with no mutation
//! in between yields identical output.

use crate::clause::{
    FromClause, JoinKind, JoinSpec, LimitSpec, OrderingClause, SelectClause, SetClause,
};
use crate::criteria::{Connector, CriteriaList, Operator};
use crate::error::{QueryError, QueryResult};
use crate::quote::Quoter;
use crate::render::{render_criteria, RenderMode};
use crate::value::Value;
use tokio_postgres::types::ToSql;

/// Statement kind, fixed at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatementKind {
    /// SELECT … FROM …
    Select,
    /// INSERT INTO … SET …
    Insert,
    /// UPDATE … SET … WHERE …
    Update,
    /// DELETE FROM … WHERE …
    Delete,
}

impl StatementKind {
    /// SQL keyword for this statement kind.
    pub fn as_sql(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

/// The result of assembling a query: SQL text and ordered parameters.
#[derive(Clone, Debug)]
pub struct BuiltQuery {
    /// SQL with `?` placeholders
    pub sql: String,
    /// Values in placeholder order
    pub params: Vec<Value>,
}

impl BuiltQuery {
    /// Get parameters as references for tokio-postgres.
    pub fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params
            .iter()
            .map(|v| v as &(dyn ToSql + Sync))
            .collect()
    }
}

/// Create a SELECT query over the given column expressions.
///
/// # Example
/// ```
/// let q = sqlforge::select(&["id"]).from("users").eq("id", 1i64);
/// assert_eq!(q.to_sql().unwrap(), "SELECT id FROM users WHERE id = ?");
/// ```
pub fn select(columns: &[&str]) -> Query {
    Query::select(columns)
}

/// Create an INSERT query for the given table.
pub fn insert_into(table: &str) -> Query {
    Query::insert_into(table)
}

/// Create an UPDATE query for the given table.
pub fn update(table: &str) -> Query {
    Query::update(table)
}

/// Create a DELETE query for the given table.
pub fn delete_from(table: &str) -> Query {
    Query::delete_from(table)
}

/// Fluent statement builder.
#[derive(Clone, Debug)]
pub struct Query {
    kind: StatementKind,
    /// Target table for INSERT/UPDATE/DELETE
    table: Option<String>,
    select: SelectClause,
    from: FromClause,
    set: SetClause,
    where_list: CriteriaList,
    group: OrderingClause,
    having_list: CriteriaList,
    order: OrderingClause,
    limit: Option<LimitSpec>,
}

impl Query {
    fn with_kind(kind: StatementKind, table: Option<&str>) -> Self {
        Self {
            kind,
            table: table.map(str::to_string),
            select: SelectClause::default(),
            from: FromClause::default(),
            set: SetClause::default(),
            where_list: CriteriaList::new(),
            group: OrderingClause::new("GROUP BY"),
            having_list: CriteriaList::new(),
            order: OrderingClause::new("ORDER BY"),
            limit: None,
        }
    }

    /// Start a SELECT statement over the given column expressions.
    pub fn select(columns: &[&str]) -> Self {
        let mut query = Self::with_kind(StatementKind::Select, None);
        for column in columns {
            query.select.add_column(column, None);
        }
        query
    }

    /// Start an INSERT statement targeting `table`.
    pub fn insert_into(table: &str) -> Self {
        Self::with_kind(StatementKind::Insert, Some(table))
    }

    /// Start an UPDATE statement targeting `table`.
    pub fn update(table: &str) -> Self {
        Self::with_kind(StatementKind::Update, Some(table))
    }

    /// Start a DELETE statement targeting `table`.
    pub fn delete_from(table: &str) -> Self {
        Self::with_kind(StatementKind::Delete, Some(table))
    }

    /// The statement kind this query was constructed as.
    pub fn kind(&self) -> StatementKind {
        self.kind
    }

    // ==================== SELECT columns ====================

    /// Append one SELECT column or expression.
    pub fn column(mut self, expr: &str) -> Self {
        self.select.add_column(expr, None);
        self
    }

    /// Append one aliased SELECT column; re-adding a column replaces its alias.
    pub fn column_as(mut self, expr: &str, alias: &str) -> Self {
        self.select.add_column(expr, Some(alias));
        self
    }

    /// Append multiple SELECT columns.
    pub fn columns(mut self, exprs: &[&str]) -> Self {
        for expr in exprs {
            self.select.add_column(expr, None);
        }
        self
    }

    /// Add the `DISTINCT` execution option.
    pub fn distinct(self) -> Self {
        self.option("DISTINCT")
    }

    /// Add an execution-option keyword emitted between `SELECT` and the
    /// column list.
    pub fn option(mut self, keyword: &str) -> Self {
        self.select.add_option(keyword);
        self
    }

    // ==================== FROM / JOIN ====================

    /// Set the FROM table.
    pub fn from(mut self, table: &str) -> Self {
        self.from.set_from(table, None);
        self
    }

    /// Set the FROM table with an alias.
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.from.set_from(table, Some(alias));
        self
    }

    /// Add INNER JOIN with ON conditions (raw `a = b` text, or bare columns
    /// resolved against the previous table in the chain).
    pub fn inner_join(self, table: &str, on: &[&str]) -> Self {
        self.join(JoinKind::Inner, table, None, on)
    }

    /// Add LEFT JOIN.
    pub fn left_join(self, table: &str, on: &[&str]) -> Self {
        self.join(JoinKind::Left, table, None, on)
    }

    /// Add RIGHT JOIN.
    pub fn right_join(self, table: &str, on: &[&str]) -> Self {
        self.join(JoinKind::Right, table, None, on)
    }

    /// Add a join with full control over type and alias.
    pub fn join(mut self, kind: JoinKind, table: &str, alias: Option<&str>, on: &[&str]) -> Self {
        self.from.add_join(JoinSpec {
            table: table.to_string(),
            alias: alias.map(str::to_string),
            kind,
            criteria: on.iter().map(|c| c.to_string()).collect(),
        });
        self
    }

    // ==================== WHERE ====================

    /// Add WHERE predicate with arbitrary operator text, joined by AND.
    pub fn cmp(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
        self.where_list
            .add_condition(column, Operator::parse(op), value.into(), Connector::And);
        self
    }

    /// Add WHERE predicate with arbitrary operator text, joined by OR.
    pub fn or_cmp(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
        self.where_list
            .add_condition(column, Operator::parse(op), value.into(), Connector::Or);
        self
    }

    /// Add WHERE: column = value
    pub fn eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, "=", value)
    }

    /// Add WHERE: column = value, joined by OR
    pub fn or_eq(self, column: &str, value: impl Into<Value>) -> Self {
        self.or_cmp(column, "=", value)
    }

    /// Add WHERE: column != value
    pub fn ne(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, "!=", value)
    }

    /// Add WHERE: column > value
    pub fn gt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, ">", value)
    }

    /// Add WHERE: column >= value
    pub fn gte(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, ">=", value)
    }

    /// Add WHERE: column < value
    pub fn lt(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, "<", value)
    }

    /// Add WHERE: column <= value
    pub fn lte(self, column: &str, value: impl Into<Value>) -> Self {
        self.cmp(column, "<=", value)
    }

    /// Add WHERE: column LIKE pattern
    pub fn like(self, column: &str, pattern: impl Into<Value>) -> Self {
        self.cmp(column, "LIKE", pattern)
    }

    /// Add WHERE: column IS `raw`. The right-hand side is emitted verbatim
    /// and never parameterized.
    pub fn is(mut self, column: &str, raw: &str) -> Self {
        self.where_list.add_condition(
            column,
            Operator::Is,
            Value::Text(raw.to_string()),
            Connector::And,
        );
        self
    }

    /// Add WHERE: column IS NOT `raw` (verbatim right-hand side).
    pub fn is_not(mut self, column: &str, raw: &str) -> Self {
        self.where_list.add_condition(
            column,
            Operator::IsNot,
            Value::Text(raw.to_string()),
            Connector::And,
        );
        self
    }

    /// Add WHERE: column IS NULL
    pub fn is_null(self, column: &str) -> Self {
        self.is(column, "NULL")
    }

    /// Add WHERE: column IS NOT NULL
    pub fn is_not_null(self, column: &str) -> Self {
        self.is_not(column, "NULL")
    }

    /// Add WHERE: column IN (values…); the list must be non-empty.
    pub fn in_list<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> QueryResult<Self> {
        self.where_list.add_membership(
            column,
            values.into_iter().map(Into::into).collect(),
            Connector::And,
        )?;
        Ok(self)
    }

    /// Add WHERE: column NOT IN (values…); the list must be non-empty.
    pub fn not_in<T: Into<Value>>(mut self, column: &str, values: Vec<T>) -> QueryResult<Self> {
        self.where_list.add_not_membership(
            column,
            values.into_iter().map(Into::into).collect(),
            Connector::And,
        )?;
        Ok(self)
    }

    /// Add WHERE: column BETWEEN from AND to
    pub fn between<T: Into<Value>>(mut self, column: &str, from: T, to: T) -> Self {
        self.where_list
            .add_range(column, from.into(), to.into(), Connector::And);
        self
    }

    /// Add WHERE: column NOT BETWEEN from AND to
    pub fn not_between<T: Into<Value>>(mut self, column: &str, from: T, to: T) -> Self {
        self.where_list
            .add_not_range(column, from.into(), to.into(), Connector::And);
        self
    }

    /// Open a bracketed WHERE group joined by AND.
    pub fn open_group(mut self) -> Self {
        self.where_list.open_group(Connector::And);
        self
    }

    /// Open a bracketed WHERE group joined by OR.
    pub fn or_open_group(mut self) -> Self {
        self.where_list.open_group(Connector::Or);
        self
    }

    /// Close the innermost bracketed WHERE group.
    pub fn close_group(mut self) -> Self {
        self.where_list.close_group();
        self
    }

    // ==================== HAVING ====================

    /// Add HAVING predicate with arbitrary operator text, joined by AND.
    pub fn having(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
        self.having_list
            .add_condition(column, Operator::parse(op), value.into(), Connector::And);
        self
    }

    /// Add HAVING predicate with arbitrary operator text, joined by OR.
    pub fn or_having(mut self, column: &str, op: &str, value: impl Into<Value>) -> Self {
        self.having_list
            .add_condition(column, Operator::parse(op), value.into(), Connector::Or);
        self
    }

    // ==================== SET ====================

    /// Assign a value to a column; repeated columns keep their original slot,
    /// last write wins.
    pub fn set(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.set.assign(column, value.into());
        self
    }

    /// Assign every (column, value) pair in order.
    pub fn set_values<I, K, V>(mut self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        self.set.assign_all(pairs);
        self
    }

    /// Assign a column from any serializable value, stored as JSON text.
    pub fn set_json<T: serde::Serialize>(mut self, column: &str, value: &T) -> QueryResult<Self> {
        self.set.assign_json(column, value)?;
        Ok(self)
    }

    // ==================== GROUP BY / ORDER BY / LIMIT ====================

    /// Append a GROUP BY column.
    pub fn group_by(mut self, column: &str) -> Self {
        self.group.add(column, None);
        self
    }

    /// Append a GROUP BY column with a direction.
    pub fn group_by_dir(mut self, column: &str, direction: &str) -> Self {
        self.group.add(column, Some(direction));
        self
    }

    /// Append an ORDER BY column (ascending).
    pub fn order_by(mut self, column: &str) -> Self {
        self.order.add(column, None);
        self
    }

    /// Append an ORDER BY column with a direction (free text).
    pub fn order_by_dir(mut self, column: &str, direction: &str) -> Self {
        self.order.add(column, Some(direction));
        self
    }

    /// Set LIMIT, overwriting any prior value.
    pub fn limit(mut self, count: u64) -> Self {
        self.limit = Some(LimitSpec { count, offset: 0 });
        self
    }

    /// Set LIMIT with a row offset, overwriting any prior value.
    pub fn limit_offset(mut self, count: u64, offset: u64) -> Self {
        self.limit = Some(LimitSpec { count, offset });
        self
    }

    // ==================== Assembly ====================

    /// Assemble the parameterized SQL and its ordered values.
    pub fn build(&self) -> QueryResult<BuiltQuery> {
        let (sql, params) = self.assemble(RenderMode::Parameterized)?;
        Ok(BuiltQuery { sql, params })
    }

    /// Assemble fully literal SQL with values inlined through `quoter`.
    pub fn build_literal(&self, quoter: &dyn Quoter) -> QueryResult<String> {
        let (sql, _) = self.assemble(RenderMode::Literal(quoter))?;
        Ok(sql)
    }

    /// Parameterized SQL string (debugging helper).
    pub fn to_sql(&self) -> QueryResult<String> {
        Ok(self.build()?.sql)
    }

    fn assemble(&self, mode: RenderMode<'_>) -> QueryResult<(String, Vec<Value>)> {
        self.check_applicable()?;
        match self.kind {
            StatementKind::Select => self.assemble_select(mode),
            StatementKind::Insert => self.assemble_insert(mode),
            StatementKind::Update => self.assemble_update(mode),
            StatementKind::Delete => self.assemble_delete(mode),
        }
    }

    // Clause state the locked kind never renders is rejected, not dropped.
    fn check_applicable(&self) -> QueryResult<()> {
        let mut offending: Vec<&str> = Vec::new();
        match self.kind {
            StatementKind::Select => {
                if !self.set.is_empty() {
                    offending.push("SET");
                }
            }
            StatementKind::Insert => {
                if !self.select.is_empty() {
                    offending.push("SELECT columns");
                }
                if !self.from.is_empty() {
                    offending.push("FROM/JOIN");
                }
                if !self.where_list.is_empty() {
                    offending.push("WHERE");
                }
                if !self.group.is_empty() {
                    offending.push("GROUP BY");
                }
                if !self.having_list.is_empty() {
                    offending.push("HAVING");
                }
                if !self.order.is_empty() {
                    offending.push("ORDER BY");
                }
            }
            StatementKind::Update => {
                if !self.select.is_empty() {
                    offending.push("SELECT columns");
                }
                if !self.from.is_empty() {
                    offending.push("FROM/JOIN");
                }
                if !self.group.is_empty() {
                    offending.push("GROUP BY");
                }
                if !self.having_list.is_empty() {
                    offending.push("HAVING");
                }
                if !self.order.is_empty() {
                    offending.push("ORDER BY");
                }
            }
            StatementKind::Delete => {
                if !self.select.is_empty() {
                    offending.push("SELECT columns");
                }
                if !self.from.is_empty() {
                    offending.push("FROM/JOIN");
                }
                if !self.set.is_empty() {
                    offending.push("SET");
                }
                if !self.group.is_empty() {
                    offending.push("GROUP BY");
                }
                if !self.having_list.is_empty() {
                    offending.push("HAVING");
                }
                if !self.order.is_empty() {
                    offending.push("ORDER BY");
                }
            }
        }
        if let Some(clause) = offending.first() {
            return Err(QueryError::invalid_argument(format!(
                "{} does not apply to {} statements",
                clause,
                self.kind.as_sql()
            )));
        }
        Ok(())
    }

    fn target_table(&self) -> QueryResult<&str> {
        self.table.as_deref().ok_or_else(|| {
            QueryError::invalid_argument(format!(
                "{} statement requires a target table",
                self.kind.as_sql()
            ))
        })
    }

    fn assemble_select(&self, mode: RenderMode<'_>) -> QueryResult<(String, Vec<Value>)> {
        // No columns, no statement.
        if self.select.is_empty() {
            return Ok((String::new(), Vec::new()));
        }

        let mut sql = self.select.render(true);
        let mut params = Vec::new();

        let from_sql = self.from.render();
        if !from_sql.is_empty() {
            sql.push_str(" FROM ");
            sql.push_str(&from_sql);
        }

        if !self.where_list.is_empty() {
            let (fragment, values) = render_criteria(self.where_list.nodes(), mode)?;
            sql.push_str(" WHERE ");
            sql.push_str(&fragment);
            params.extend(values);
        }

        if !self.group.is_empty() {
            sql.push(' ');
            sql.push_str(&self.group.render(true));
        }

        if !self.having_list.is_empty() {
            let (fragment, values) = render_criteria(self.having_list.nodes(), mode)?;
            sql.push_str(" HAVING ");
            sql.push_str(&fragment);
            params.extend(values);
        }

        if !self.order.is_empty() {
            sql.push(' ');
            sql.push_str(&self.order.render(true));
        }

        if let Some(limit) = self.limit {
            sql.push(' ');
            sql.push_str(&limit.render(true));
        }

        Ok((sql, params))
    }

    fn assemble_insert(&self, mode: RenderMode<'_>) -> QueryResult<(String, Vec<Value>)> {
        let table = self.target_table()?;
        let (set_sql, params) = self.set.render(mode);

        let mut sql = format!("INSERT INTO {table}");
        if !set_sql.is_empty() {
            sql.push(' ');
            sql.push_str(&set_sql);
        }
        if let Some(limit) = self.limit {
            sql.push(' ');
            sql.push_str(&limit.render(true));
        }

        Ok((sql, params))
    }

    fn assemble_update(&self, mode: RenderMode<'_>) -> QueryResult<(String, Vec<Value>)> {
        let table = self.target_table()?;
        if self.where_list.is_empty() {
            return Err(QueryError::missing_clause(
                "UPDATE requires a WHERE clause",
            ));
        }

        // SET values precede WHERE values, matching placeholder order.
        let (set_sql, mut params) = self.set.render(mode);
        let mut sql = format!("UPDATE {table}");
        if !set_sql.is_empty() {
            sql.push(' ');
            sql.push_str(&set_sql);
        }

        let (where_sql, where_params) = render_criteria(self.where_list.nodes(), mode)?;
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);
        params.extend(where_params);

        if let Some(limit) = self.limit {
            sql.push(' ');
            sql.push_str(&limit.render(true));
        }

        Ok((sql, params))
    }

    fn assemble_delete(&self, mode: RenderMode<'_>) -> QueryResult<(String, Vec<Value>)> {
        let table = self.target_table()?;
        if self.where_list.is_empty() {
            return Err(QueryError::missing_clause(
                "DELETE requires a WHERE clause",
            ));
        }

        let mut sql = format!("DELETE FROM {table}");
        let (where_sql, params) = render_criteria(self.where_list.nodes(), mode)?;
        sql.push_str(" WHERE ");
        sql.push_str(&where_sql);

        if let Some(limit) = self.limit {
            sql.push(' ');
            sql.push_str(&limit.render(true));
        }

        Ok((sql, params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::DefaultQuoter;

    #[test]
    fn test_simple_select() {
        let q = select(&["id"]).from("users").gte("age", 18i64).order_by("id");
        let built = q.build().unwrap();
        assert_eq!(built.sql, "SELECT id FROM users WHERE age >= ? ORDER BY id");
        assert_eq!(built.params, vec![Value::Int(18)]);
    }

    #[test]
    fn test_select_all_clauses_in_order() {
        let q = select(&["user_id", "COUNT(*)"])
            .from_as("orders", "o")
            .inner_join("users", &["o.user_id = users.id"])
            .eq("o.status", "paid")
            .group_by("user_id")
            .having("COUNT(*)", ">", 5i64)
            .order_by_dir("user_id", "DESC")
            .limit_offset(10, 20);
        let built = q.build().unwrap();
        assert_eq!(
            built.sql,
            "SELECT user_id, COUNT(*) FROM orders AS o \
             INNER JOIN users ON o.user_id = users.id \
             WHERE o.status = ? GROUP BY user_id HAVING COUNT(*) > ? \
             ORDER BY user_id DESC LIMIT 20, 10"
        );
        assert_eq!(built.params, vec![Value::from("paid"), Value::Int(5)]);
    }

    #[test]
    fn test_empty_select_renders_empty() {
        let q = select(&[]);
        let built = q.build().unwrap();
        assert_eq!(built.sql, "");
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_select_distinct() {
        let q = select(&["name"]).distinct().from("users");
        assert_eq!(q.to_sql().unwrap(), "SELECT DISTINCT name FROM users");
    }

    #[test]
    fn test_update_params_set_before_where() {
        let q = update("users").set("name", "Bob").eq("id", 5i64);
        let built = q.build().unwrap();
        assert_eq!(built.sql, "UPDATE users SET name = ? WHERE id = ?");
        assert_eq!(built.params, vec![Value::from("Bob"), Value::Int(5)]);
    }

    #[test]
    fn test_update_without_where_fails() {
        let err = update("users").set("name", "Bob").build().unwrap_err();
        assert!(err.is_missing_clause());
    }

    #[test]
    fn test_delete_without_where_fails() {
        let err = delete_from("users").build().unwrap_err();
        assert!(err.is_missing_clause());
    }

    #[test]
    fn test_delete_with_where() {
        let q = delete_from("users").eq("id", 5i64).limit(1);
        let built = q.build().unwrap();
        assert_eq!(built.sql, "DELETE FROM users WHERE id = ? LIMIT 1");
        assert_eq!(built.params, vec![Value::Int(5)]);
    }

    #[test]
    fn test_insert_set_form() {
        let q = insert_into("users")
            .set("username", "alice")
            .set("email", "alice@example.com");
        let built = q.build().unwrap();
        assert_eq!(built.sql, "INSERT INTO users SET username = ?, email = ?");
        assert_eq!(
            built.params,
            vec![Value::from("alice"), Value::from("alice@example.com")]
        );
    }

    #[test]
    fn test_insert_without_set_is_not_enforced() {
        let built = insert_into("users").build().unwrap();
        assert_eq!(built.sql, "INSERT INTO users");
    }

    #[test]
    fn test_kind_locked_set_on_select_fails() {
        let err = select(&["id"]).from("users").set("name", "x").build().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_kind_locked_where_on_insert_fails() {
        let err = insert_into("users")
            .set("name", "x")
            .eq("id", 1i64)
            .build()
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_where_group_round_trip() {
        let q = select(&["*"])
            .from("users")
            .eq("status", "active")
            .or_open_group()
            .eq("role", "admin")
            .or_eq("role", "superuser")
            .close_group();
        assert_eq!(
            q.to_sql().unwrap(),
            "SELECT * FROM users WHERE status = ? OR (role = ? OR role = ?)"
        );
    }

    #[test]
    fn test_in_list_membership() {
        let q = select(&["*"])
            .from("users")
            .in_list("id", vec![1i64, 2, 3])
            .unwrap();
        let built = q.build().unwrap();
        assert_eq!(built.sql, "SELECT * FROM users WHERE id IN (?, ?, ?)");
        assert_eq!(
            built.params,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_empty_in_list_fails() {
        let err = select(&["*"])
            .from("users")
            .in_list::<i64>("id", vec![])
            .unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_literal_mode_is_idempotent() {
        let q = select(&["*"])
            .from("users")
            .eq("name", "o'brien")
            .between("age", 18i64, 65i64);
        let first = q.build_literal(&DefaultQuoter).unwrap();
        let second = q.build_literal(&DefaultQuoter).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            first,
            "SELECT * FROM users WHERE name = 'o\\'brien' AND age BETWEEN 18 AND 65"
        );
    }

    #[test]
    fn test_parameterized_build_is_pure() {
        let q = update("users").set("name", "Bob").eq("id", 5i64);
        let first = q.build().unwrap();
        let second = q.build().unwrap();
        assert_eq!(first.sql, second.sql);
        assert_eq!(first.params, second.params);
    }

    #[test]
    fn test_join_bare_column_resolution() {
        let q = select(&["*"])
            .from("orders")
            .inner_join("order_items", &["user_id"]);
        assert_eq!(
            q.to_sql().unwrap(),
            "SELECT * FROM orders INNER JOIN order_items ON orders.user_id = order_items.user_id"
        );
    }

    #[test]
    fn test_is_null_shortcuts() {
        let q = select(&["*"]).from("users").is_null("deleted_at");
        let built = q.build().unwrap();
        assert_eq!(built.sql, "SELECT * FROM users WHERE deleted_at IS NULL");
        assert!(built.params.is_empty());
    }

    #[test]
    fn test_unbalanced_where_group_fails_at_build() {
        let err = select(&["*"])
            .from("users")
            .open_group()
            .eq("a", 1i64)
            .build()
            .unwrap_err();
        assert!(err.is_unbalanced());
    }

    #[test]
    fn test_select_without_from() {
        let q = select(&["1"]);
        assert_eq!(q.to_sql().unwrap(), "SELECT 1");
    }

    #[test]
    fn test_set_values_bulk() {
        let q = update("users")
            .set_values([("name", "Bob"), ("email", "bob@example.com")])
            .eq("id", 1i64);
        let built = q.build().unwrap();
        assert_eq!(
            built.sql,
            "UPDATE users SET name = ?, email = ? WHERE id = ?"
        );
    }
}
