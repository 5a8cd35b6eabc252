//! Custom operator-prefix configuration.
//!
//! The prefix snapshot is process-wide and captured on first use, so this
//! suite runs in its own test binary: the first build here must see the
//! custom tokens, not the defaults.

use odata_filter::{build_query, Dialect, OperatorPrefixes, QueryBuilder, SqlValue};

#[test]
fn custom_tokens_flow_through_navigation_leaves() {
    let prefixes = OperatorPrefixes {
        greater_than: String::from("gt:"),
        greater_or_equal: String::from("ge:"),
        less_than: String::from("lt:"),
        less_or_equal: String::from("le:"),
        not_equal: String::from("ne:"),
        like: String::from("like:"),
        not_like: String::from("notlike:"),
    };
    let builder = QueryBuilder::new().register_operator_prefixes(prefixes);

    let built = build_query(
        "metadata/count ge 5 and not(startswith(metadata/name,'x'))",
        builder,
        Dialect::Sqlite,
    )
    .unwrap();
    let (sql, params) = built.build_where();

    // the emitter builds leaves with the custom tokens and the deep-filter
    // plugin strips the same tokens back off
    assert_eq!(
        sql,
        "WHERE metadata_id IN (SELECT id FROM metadata WHERE count >= ?) \
         AND metadata_id IN (SELECT id FROM metadata WHERE name NOT LIKE ?)"
    );
    assert_eq!(
        params,
        vec![SqlValue::Int(5), SqlValue::Text(String::from("x%"))]
    );
}
