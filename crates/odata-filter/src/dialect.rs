//! SQL dialect selection and unary-function rendering.
//!
//! The dialects only diverge on unary functions: PostgreSQL extracts
//! date/time parts with `EXTRACT(<UNIT> FROM expr)` and casts for `time`,
//! while MySQL, SQLite, and SQL Server use plain function names.

/// The SQL flavor targeted by the emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// PostgreSQL.
    Postgres,
    /// MySQL.
    MySql,
    /// SQLite.
    Sqlite,
    /// Microsoft SQL Server.
    SqlServer,
}

/// How a unary function renders: a plain name wrapping its argument, or a
/// template with a `%s` placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FnSql {
    Name(&'static str),
    Template(&'static str),
}

impl Dialect {
    fn unary_fn(self, name: &str) -> Option<FnSql> {
        use FnSql::{Name, Template};

        // dialect-independent functions
        match name {
            "length" => return Some(Name("LENGTH")),
            "tolower" => return Some(Name("LOWER")),
            "toupper" => return Some(Name("UPPER")),
            "trim" => return Some(Name("TRIM")),
            "now" => return Some(Name("NOW")),
            "round" => return Some(Name("ROUND")),
            "floor" => return Some(Name("FLOOR")),
            "ceiling" => return Some(Name("CEIL")),
            _ => {}
        }

        match self {
            Self::Postgres => match name {
                "indexof" => Some(Name("POSITION")),
                "year" => Some(Template("EXTRACT(YEAR FROM %s)")),
                "month" => Some(Template("EXTRACT(MONTH FROM %s)")),
                "day" => Some(Template("EXTRACT(DAY FROM %s)")),
                "hour" => Some(Template("EXTRACT(HOUR FROM %s)")),
                "minute" => Some(Template("EXTRACT(MINUTE FROM %s)")),
                "second" => Some(Template("EXTRACT(SECOND FROM %s)")),
                "fractionalsecond" => Some(Template("EXTRACT(MICROSECOND FROM %s)")),
                "date" => Some(Name("TO_DATE")),
                "time" => Some(Template("CAST(%s::timestamp AS time)")),
                _ => None,
            },
            Self::MySql | Self::Sqlite | Self::SqlServer => match name {
                "indexof" => Some(Name("LOCATE")),
                "year" => Some(Name("YEAR")),
                "month" => Some(Name("MONTH")),
                "day" => Some(Name("DAY")),
                "hour" => Some(Name("HOUR")),
                "minute" => Some(Name("MINUTE")),
                "second" => Some(Name("SECOND")),
                "fractionalsecond" => Some(Name("MICROSECOND")),
                "date" => Some(Name("DATE")),
                "time" => Some(Name("TIME")),
                _ => None,
            },
        }
    }

    /// Renders a unary function call around an already-rendered argument.
    ///
    /// Returns `None` for names that are not unary SQL functions in this
    /// dialect.
    #[must_use]
    pub(crate) fn render_unary(self, name: &str, arg: Option<&str>) -> Option<String> {
        Some(match self.unary_fn(name)? {
            FnSql::Name(sql_name) => format!("{sql_name}({})", arg.unwrap_or_default()),
            FnSql::Template(template) => template.replace("%s", arg.unwrap_or_default()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_functions_are_identical_across_dialects() {
        for dialect in [
            Dialect::Postgres,
            Dialect::MySql,
            Dialect::Sqlite,
            Dialect::SqlServer,
        ] {
            assert_eq!(
                dialect.render_unary("length", Some("name")),
                Some(String::from("LENGTH(name)"))
            );
            assert_eq!(
                dialect.render_unary("ceiling", Some("price")),
                Some(String::from("CEIL(price)"))
            );
        }
    }

    #[test]
    fn test_postgres_extract_templates() {
        assert_eq!(
            Dialect::Postgres.render_unary("year", Some("created_at")),
            Some(String::from("EXTRACT(YEAR FROM created_at)"))
        );
        assert_eq!(
            Dialect::Postgres.render_unary("fractionalsecond", Some("created_at")),
            Some(String::from("EXTRACT(MICROSECOND FROM created_at)"))
        );
        assert_eq!(
            Dialect::Postgres.render_unary("time", Some("created_at")),
            Some(String::from("CAST(created_at::timestamp AS time)"))
        );
    }

    #[test]
    fn test_mysql_family_plain_names() {
        for dialect in [Dialect::MySql, Dialect::Sqlite, Dialect::SqlServer] {
            assert_eq!(
                dialect.render_unary("year", Some("created_at")),
                Some(String::from("YEAR(created_at)"))
            );
            assert_eq!(
                dialect.render_unary("indexof", Some("name")),
                Some(String::from("LOCATE(name)"))
            );
        }
        assert_eq!(
            Dialect::Postgres.render_unary("indexof", Some("name")),
            Some(String::from("POSITION(name)"))
        );
    }

    #[test]
    fn test_now_without_argument() {
        assert_eq!(
            Dialect::Sqlite.render_unary("now", None),
            Some(String::from("NOW()"))
        );
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(Dialect::Sqlite.render_unary("not", Some("x")), None);
        assert_eq!(Dialect::Postgres.render_unary("frobnicate", Some("x")), None);
    }
}
