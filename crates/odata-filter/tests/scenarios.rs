//! End-to-end translation scenarios: filter string in, SQL text and bound
//! parameters out.

use odata_filter::{build_query, get_ast, print_tree, Dialect, NodeKind, QueryBuilder, SqlValue};

fn translate(query: &str, dialect: Dialect) -> (String, Vec<SqlValue>) {
    build_query(query, QueryBuilder::new(), dialect)
        .unwrap()
        .build_where()
}

fn translate_err(query: &str) -> String {
    build_query(query, QueryBuilder::new(), Dialect::Sqlite)
        .unwrap_err()
        .to_string()
}

fn text(value: &str) -> SqlValue {
    SqlValue::Text(String::from(value))
}

#[test]
fn mixed_logical_and_string_predicates() {
    let (sql, params) = translate(
        "name ne 'prd' and (contains(testValue,'testvalue') or endswith(testValue,'accvalue'))",
        Dialect::Sqlite,
    );
    assert_eq!(
        sql,
        "WHERE name != ? AND (test_value LIKE ? OR test_value LIKE ?)"
    );
    assert_eq!(
        params,
        vec![text("prd"), text("%testvalue%"), text("%accvalue")]
    );
}

#[test]
fn unary_function_chain() {
    let (sql, params) = translate("length(trim(toupper(testValue))) gt 10", Dialect::Sqlite);
    assert_eq!(sql, "WHERE LENGTH(TRIM(UPPER(test_value))) > ?");
    assert_eq!(params, vec![SqlValue::Int(10)]);
}

#[test]
fn postgres_date_time_functions() {
    let (sql, params) = translate(
        "year(createdAt) gt 2025 and time(createdAt) lt '01:12:00'",
        Dialect::Postgres,
    );
    assert_eq!(
        sql,
        "WHERE EXTRACT(YEAR FROM created_at) > ? AND CAST(created_at::timestamp AS time) < ?"
    );
    assert_eq!(params, vec![SqlValue::Int(2025), text("01:12:00")]);
}

#[test]
fn mysql_family_date_time_functions() {
    for dialect in [Dialect::MySql, Dialect::Sqlite, Dialect::SqlServer] {
        let (sql, params) = translate("year(createdAt) gt 2025", dialect);
        assert_eq!(sql, "WHERE YEAR(created_at) > ?");
        assert_eq!(params, vec![SqlValue::Int(2025)]);
    }
}

#[test]
fn navigation_paths_become_correlated_subqueries() {
    let (sql, params) = translate(
        "name eq 'test' and (metadata/name eq 'test-4-metadata' or startswith(metadata/tag/value,'test-3'))",
        Dialect::Sqlite,
    );
    assert_eq!(
        sql,
        "WHERE name = ? AND (metadata_id IN (SELECT id FROM metadata WHERE name = ?) \
         OR metadata_id IN (SELECT id FROM metadata WHERE tag_id IN (SELECT id FROM tags WHERE value LIKE ?)))"
    );
    assert_eq!(
        params,
        vec![text("test"), text("test-4-metadata"), text("test-3%")]
    );
}

#[test]
fn negation_lowers_via_de_morgan() {
    let (sql, params) = translate(
        "not(contains(tolower(testValue),' ') and endswith(metadata/name,'prd')) \
         and not(name eq 'test' or startswith(name,'prd'))",
        Dialect::Sqlite,
    );
    assert_eq!(
        sql,
        "WHERE (LOWER(test_value) NOT LIKE ? \
         OR metadata_id IN (SELECT id FROM metadata WHERE name NOT LIKE ?)) \
         AND (name != ? AND name NOT LIKE ?)"
    );
    assert_eq!(
        params,
        vec![text("% %"), text("%prd"), text("test"), text("prd%")]
    );
}

#[test]
fn negation_of_disjunction_without_grouping() {
    let (sql, params) = translate("not(name eq 'x' or name eq 'y')", Dialect::Sqlite);
    assert_eq!(sql, "WHERE name != ? AND name != ?");
    assert_eq!(params, vec![text("x"), text("y")]);
}

#[test]
fn unclosed_bracket_is_a_parse_error() {
    assert_eq!(
        translate_err("length(name"),
        "failed to parse query: missing closing bracket ')'"
    );
}

#[test]
fn function_without_brackets_is_a_parse_error() {
    assert_eq!(
        translate_err("not name eq 'x'"),
        "failed to parse query: missing opening bracket '('"
    );
}

#[test]
fn typo_is_a_parse_error_with_fragment() {
    assert_eq!(
        translate_err("name qe 'prd'"),
        "failed to parse query: possible typo in \"qe 'prd'\""
    );
}

#[test]
fn non_not_unary_at_root_is_invalid() {
    assert_eq!(
        translate_err("length(name)"),
        "invalid query: root level operators other then 'not' are not supported"
    );
}

#[test]
fn bare_operand_at_root_is_invalid() {
    assert_eq!(
        translate_err("name"),
        "invalid query: root level operands are not supported"
    );
    assert_eq!(
        translate_err("'test'"),
        "invalid query: root level operands are not supported"
    );
}

#[test]
fn percent_in_pattern_is_escaped_exactly_once() {
    let (sql, params) = translate("contains(name,'%')", Dialect::Sqlite);
    assert_eq!(sql, "WHERE name LIKE ? ESCAPE '\\'");
    assert_eq!(params, vec![text("%\\%%")]);
}

#[test]
fn integer_literals_bind_as_integers() {
    let (sql, params) = translate("id eq 10", Dialect::Sqlite);
    assert_eq!(sql, "WHERE id = ?");
    assert_eq!(params, vec![SqlValue::Int(10)]);

    let (_, params) = translate("id eq '10'", Dialect::Sqlite);
    assert_eq!(params, vec![text("10")]);
}

#[test]
fn doubled_quote_unescapes_in_parameter() {
    let (sql, params) = translate("name eq 'it''s'", Dialect::Sqlite);
    assert_eq!(sql, "WHERE name = ?");
    assert_eq!(params, vec![text("it's")]);
}

#[test]
fn navigation_comparison_carries_prefix_token() {
    let (sql, params) = translate("metadata/count ge 5", Dialect::Sqlite);
    assert_eq!(
        sql,
        "WHERE metadata_id IN (SELECT id FROM metadata WHERE count >= ?)"
    );
    assert_eq!(params, vec![SqlValue::Int(5)]);
}

#[test]
fn negated_navigation_comparison_uses_reversed_token() {
    let (sql, params) = translate("not(metadata/count gt 5)", Dialect::Sqlite);
    assert_eq!(
        sql,
        "WHERE metadata_id IN (SELECT id FROM metadata WHERE count <= ?)"
    );
    assert_eq!(params, vec![SqlValue::Int(5)]);

    let (sql, params) = translate("not(metadata/name eq 'x')", Dialect::Sqlite);
    assert_eq!(
        sql,
        "WHERE metadata_id IN (SELECT id FROM metadata WHERE name != ?)"
    );
    assert_eq!(params, vec![text("x")]);
}

#[test]
fn concat_renders_inline() {
    let (sql, params) = translate("concat(name,' suffix') eq 'x suffix'", Dialect::Sqlite);
    assert_eq!(sql, "WHERE name || ' suffix' = ?");
    assert_eq!(params, vec![text("x suffix")]);
}

#[test]
fn concat_nests_with_functions() {
    let (sql, _) = translate(
        "concat(toupper(name),concat(testValue,'!')) eq 'x'",
        Dialect::Sqlite,
    );
    assert_eq!(sql, "WHERE UPPER(name) || test_value || '!' = ?");
}

#[test]
fn unary_function_on_right_is_invalid() {
    assert_eq!(
        translate_err("name eq length(name)"),
        "invalid query: unary operators not supported as right operand of equality operators"
    );
}

#[test]
fn concat_on_right_is_invalid() {
    assert_eq!(
        translate_err("name eq concat(name,'x')"),
        "invalid query: concat not supported as right operand of equality operators"
    );
}

#[test]
fn identifier_on_right_is_invalid() {
    assert_eq!(
        translate_err("name eq otherName"),
        "invalid query: only literal values are supported as right operand of equality operators"
    );
    assert_eq!(
        translate_err("name eq metadata/name"),
        "invalid query: only literal values are supported as right operand of equality operators"
    );
}

#[test]
fn navigation_inside_function_is_invalid() {
    assert_eq!(
        translate_err("length(metadata/name) gt 3"),
        "invalid query: navigation paths are not supported inside function arguments"
    );
}

#[test]
fn string_predicate_requires_string_literal() {
    assert_eq!(
        translate_err("contains(name,5)"),
        "invalid query: 'contains' requires a quoted string literal as its second argument"
    );
}

#[test]
fn parameters_never_appear_in_sql_text() {
    let (sql, params) = translate(
        "name ne 'prd' and (contains(testValue,'needle') or metadata/name eq 'deep')",
        Dialect::Sqlite,
    );
    for param in &params {
        if let SqlValue::Text(value) = param {
            assert!(!sql.contains(value.trim_matches('%')), "{value} leaked into {sql}");
        }
    }
    assert_eq!(sql.matches('?').count(), params.len());
}

#[test]
fn get_ast_exposes_tree_shape() {
    let tree = get_ast("name eq 'test'").unwrap();
    let root = tree.root();
    assert_eq!(root.kind, NodeKind::BinaryOperator);
    assert_eq!(root.value, "eq");
    assert_eq!(tree.left(root).unwrap().kind, NodeKind::LeftOperand);
    assert_eq!(tree.right(root).unwrap().kind, NodeKind::RightOperand);
}

#[test]
fn print_tree_renders_indented_nodes() {
    let rendered = print_tree("name eq 'test' and id gt 5").unwrap();
    assert_eq!(
        rendered,
        "and\n├── eq\n│   ├── name\n│   └── 'test'\n└── gt\n    ├── id\n    └── 5\n"
    );
}

#[test]
fn print_tree_propagates_parse_errors() {
    let err = print_tree("name eq").unwrap_err();
    assert_eq!(
        err.to_string(),
        "failed to parse query: possible typo in \"name eq\""
    );
}

#[test]
fn translation_appends_to_existing_predicates() {
    let builder = QueryBuilder::new().filter("tenant_id = ?", vec![SqlValue::Int(7)]);
    let built = build_query("name eq 'x'", builder, Dialect::Sqlite).unwrap();
    let (sql, params) = built.build_where();
    assert_eq!(sql, "WHERE tenant_id = ? AND name = ?");
    assert_eq!(params, vec![SqlValue::Int(7), text("x")]);
}
