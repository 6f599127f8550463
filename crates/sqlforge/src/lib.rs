//! # sqlforge
//!
//! A fluent SQL statement assembler.
//!
//! ## Features
//!
//! - **Two render modes**: parameterized SQL with `?` placeholders plus an
//!   ordered value list, or fully literal SQL with values inlined through an
//!   injectable quoting collaborator
//! - **Criteria composition**: connector-joined predicates with bracketed
//!   grouping, shared by WHERE and HAVING
//! - **Four statement shapes**: SELECT, INSERT, UPDATE, DELETE, with the kind
//!   fixed at construction
//! - **Safe defaults**: UPDATE and DELETE require WHERE
//! - **Pure rendering**: building twice without mutation yields identical
//!   output
//!
//! ## Usage
//!
//! ```
//! use sqlforge::{select, Value};
//!
//! let query = select(&["id", "name"])
//!     .from("users")
//!     .eq("status", "active")
//!     .order_by("id");
//! let built = query.build().unwrap();
//! assert_eq!(built.sql, "SELECT id, name FROM users WHERE status = ? ORDER BY id");
//! assert_eq!(built.params, vec![Value::Text("active".into())]);
//! ```
//!
//! Execution goes through any [`GenericClient`] (tokio-postgres clients and
//! transactions implement it); `?` placeholders are renumbered to `$n` at
//! that boundary:
//!
//! ```ignore
//! let rows = select(&["*"])
//!     .from("users")
//!     .eq("id", user_id)
//!     .fetch_all(&client)
//!     .await?;
//! ```

pub mod clause;
pub mod client;
pub mod criteria;
pub mod error;
pub mod query;
pub mod quote;
pub mod render;
pub mod value;

pub use clause::{FromClause, JoinKind, JoinSpec, LimitSpec, OrderingClause, SelectClause, SetClause};
pub use client::{numbered, GenericClient};
pub use criteria::{Connector, CriteriaList, CriteriaNode, Criterion, CriterionValue, Operator};
pub use error::{QueryError, QueryResult};
pub use query::{delete_from, insert_into, select, update, BuiltQuery, Query, StatementKind};
pub use quote::{DefaultQuoter, Quoter};
pub use render::{render_criteria, RenderMode};
pub use value::Value;
