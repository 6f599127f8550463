//! Execution adapter: executor trait and placeholder renumbering.
//!
//! The core assembles SQL with `?` markers; this boundary rewrites them to
//! the `$1…$n` form tokio-postgres expects and hands the statement to an
//! executor. Executor failures propagate opaquely.

use crate::error::QueryResult;
use crate::query::Query;
use tokio_postgres::types::ToSql;
use tokio_postgres::Row;

/// A trait that unifies database clients and transactions.
///
/// This allows the same query to execute against either a direct client
/// connection or a transaction.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryResult<Vec<Row>>> + Send;

    /// Execute a query and require exactly one row.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryResult<Row>> + Send;

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryResult<Option<Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = QueryResult<u64>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<Vec<Row>> {
        Ok(tokio_postgres::Client::query(self, sql, params).await?)
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<Row> {
        Ok(tokio_postgres::Client::query_one(self, sql, params).await?)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryResult<Option<Row>> {
        Ok(tokio_postgres::Client::query_opt(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<u64> {
        Ok(tokio_postgres::Client::execute(self, sql, params).await?)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<Vec<Row>> {
        Ok(tokio_postgres::Transaction::query(self, sql, params).await?)
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<Row> {
        Ok(tokio_postgres::Transaction::query_one(self, sql, params).await?)
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> QueryResult<Option<Row>> {
        Ok(tokio_postgres::Transaction::query_opt(self, sql, params).await?)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> QueryResult<u64> {
        Ok(tokio_postgres::Transaction::execute(self, sql, params).await?)
    }
}

/// Rewrite `?` placeholders as `$1…$n`.
pub fn numbered(sql: &str) -> String {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut idx = 0usize;
    for ch in sql.chars() {
        if ch == '?' {
            idx += 1;
            out.push('$');
            out.push_str(&idx.to_string());
        } else {
            out.push(ch);
        }
    }
    out
}

impl Query {
    /// Build, renumber placeholders, and return all rows.
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> QueryResult<Vec<Row>> {
        let built = self.build()?;
        let sql = numbered(&built.sql);
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = built.params.len(), "executing query");
        let params = built.params_ref();
        conn.query(&sql, &params).await
    }

    /// Build, renumber placeholders, and return exactly one row.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> QueryResult<Row> {
        let built = self.build()?;
        let sql = numbered(&built.sql);
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = built.params.len(), "executing query");
        let params = built.params_ref();
        conn.query_one(&sql, &params).await
    }

    /// Build, renumber placeholders, and return the first row, if any.
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> QueryResult<Option<Row>> {
        let built = self.build()?;
        let sql = numbered(&built.sql);
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = built.params.len(), "executing query");
        let params = built.params_ref();
        conn.query_opt(&sql, &params).await
    }

    /// Build, renumber placeholders, and return the affected row count.
    pub async fn execute(&self, conn: &impl GenericClient) -> QueryResult<u64> {
        let built = self.build()?;
        let sql = numbered(&built.sql);
        #[cfg(feature = "tracing")]
        tracing::debug!(sql = %sql, params = built.params.len(), "executing statement");
        let params = built.params_ref();
        conn.execute(&sql, &params).await
    }
}
