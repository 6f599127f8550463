//! End-to-end build scenarios across statement kinds and render modes.

use sqlforge::{delete_from, insert_into, select, update, DefaultQuoter, Value};

#[test]
fn select_scenario_matches_expected_sql_and_params() {
    let q = select(&["id"]).from("users").gte("age", 18i64).order_by("id");
    let built = q.build().unwrap();
    assert_eq!(built.sql, "SELECT id FROM users WHERE age >= ? ORDER BY id");
    assert_eq!(built.params, vec![Value::Int(18)]);
}

#[test]
fn update_scenario_binds_set_before_where() {
    let q = update("users").set("name", "Bob").eq("id", 5i64);
    let built = q.build().unwrap();
    assert_eq!(built.sql, "UPDATE users SET name = ? WHERE id = ?");
    assert_eq!(built.params, vec![Value::from("Bob"), Value::Int(5)]);
}

#[test]
fn delete_without_where_is_rejected() {
    let err = delete_from("users").build().unwrap_err();
    assert!(err.is_missing_clause());
}

#[test]
fn join_with_bare_column_resolves_against_from_table() {
    let q = select(&["*"])
        .from("orders")
        .inner_join("order_items", &["user_id"]);
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT * FROM orders INNER JOIN order_items ON orders.user_id = order_items.user_id"
    );
}

#[test]
fn placeholder_count_always_matches_param_count() {
    let q = select(&["*"])
        .from("t")
        .eq("a", 1i64)
        .between("b", 2i64, 3i64)
        .in_list("c", vec![4i64, 5, 6])
        .unwrap()
        .is_not_null("d")
        .having("COUNT(*)", ">=", 2i64);
    let built = q.build().unwrap();
    assert_eq!(built.sql.matches('?').count(), built.params.len());
    assert_eq!(built.params.len(), 7);
}

#[test]
fn literal_and_parameterized_modes_agree_on_structure() {
    let q = select(&["id"])
        .from("users")
        .eq("name", "alice")
        .in_list("role", vec!["admin", "user"])
        .unwrap()
        .limit(10);
    let built = q.build().unwrap();
    let literal = q.build_literal(&DefaultQuoter).unwrap();
    assert_eq!(
        built.sql,
        "SELECT id FROM users WHERE name = ? AND role IN (?, ?) LIMIT 10"
    );
    assert_eq!(
        literal,
        "SELECT id FROM users WHERE name = 'alice' AND role IN ('admin', 'user') LIMIT 10"
    );
}

#[test]
fn literal_render_is_idempotent_across_calls() {
    let q = update("accounts")
        .set("balance", 12.5f64)
        .set("note", "it's fine")
        .eq("id", 9i64);
    let first = q.build_literal(&DefaultQuoter).unwrap();
    let second = q.build_literal(&DefaultQuoter).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first,
        "UPDATE accounts SET balance = 12.5, note = 'it\\'s fine' WHERE id = 9"
    );
}

#[test]
fn grouped_criteria_render_with_correct_connectors() {
    let q = select(&["*"])
        .from("users")
        .eq("active", true)
        .or_open_group()
        .eq("role", "admin")
        .or_eq("role", "superuser")
        .close_group()
        .open_group()
        .gt("age", 18i64)
        .lt("age", 65i64)
        .close_group();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT * FROM users WHERE active = ? OR (role = ? OR role = ?) AND (age > ? AND age < ?)"
    );
}

#[test]
fn insert_renders_set_form_with_limit() {
    let q = insert_into("audit_log")
        .set("event", "login")
        .set("user_id", 7i64)
        .limit(1);
    let built = q.build().unwrap();
    assert_eq!(
        built.sql,
        "INSERT INTO audit_log SET event = ?, user_id = ? LIMIT 1"
    );
    assert_eq!(built.params, vec![Value::from("login"), Value::Int(7)]);
}

#[test]
fn membership_literal_uses_numeric_passthrough() {
    let q = select(&["*"])
        .from("t")
        .in_list("col", vec![1i64, 2, 3])
        .unwrap();
    assert_eq!(
        q.build_literal(&DefaultQuoter).unwrap(),
        "SELECT * FROM t WHERE col IN (1, 2, 3)"
    );
}

#[test]
fn not_between_and_not_in_render_negated_forms() {
    let q = select(&["*"])
        .from("t")
        .not_between("a", 1i64, 5i64)
        .not_in("b", vec![7i64, 8])
        .unwrap();
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT * FROM t WHERE a NOT BETWEEN ? AND ? AND b NOT IN (?, ?)"
    );
}

#[test]
fn multiple_joins_resolve_chain_left_to_right() {
    let q = select(&["*"])
        .from("a")
        .left_join("b", &["a_id"])
        .right_join("c", &["b.x = c.x", "b_id"]);
    assert_eq!(
        q.to_sql().unwrap(),
        "SELECT * FROM a LEFT JOIN b ON a.a_id = b.a_id \
         RIGHT JOIN c ON b.x = c.x AND b.b_id = c.b_id"
    );
}
