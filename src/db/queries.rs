//! SQL for the people table: predicate rendering and table statements.
//!
//! CHANGELOG:
//! - 01/12/2026 - Predicate rendering with numbered parameters
//! - 01/11/2026 - Initial query builders

use crate::store::{Clause, Predicate};

/// Quote an identifier for SQLite ("col""name").
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// A rendered WHERE clause and its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    pub sql: String,
    pub params: Vec<String>,
}

/// Render `predicate` as a WHERE clause body; `1` when it has no conditions.
pub fn render_where(predicate: &Predicate) -> WhereClause {
    let mut params = Vec::new();
    let mut parts = Vec::new();

    if let Some(condition) = &predicate.condition {
        parts.push(format!("({})", condition));
    }
    for clause in &predicate.clauses {
        parts.push(render_clause(clause, &mut params));
    }

    let sql = if parts.is_empty() {
        "1".to_string()
    } else {
        parts.join(" AND ")
    };
    WhereClause { sql, params }
}

fn render_clause(clause: &Clause, params: &mut Vec<String>) -> String {
    match clause {
        Clause::Equals { field, value } => {
            params.push(value.clone());
            format!("{} = ?{}", quote_ident(field), params.len())
        }
        Clause::Matches { field, pattern } => {
            params.push(pattern.clone());
            format!("{} REGEXP ?{}", quote_ident(field), params.len())
        }
        Clause::AnyOf(inner) if inner.is_empty() => "0".to_string(),
        Clause::AnyOf(inner) => {
            let rendered: Vec<String> = inner.iter().map(|c| render_clause(c, params)).collect();
            format!("({})", rendered.join(" OR "))
        }
    }
}

/// SELECT over `table`; the rowid comes back as the first column.
pub fn select_sql(table: &str, where_sql: &str) -> String {
    format!(
        "SELECT rowid AS {}, * FROM {} WHERE {} ORDER BY rowid",
        ROWID_ALIAS,
        quote_ident(table),
        where_sql
    )
}

/// Column alias for the rowid in [`select_sql`].
pub const ROWID_ALIAS: &str = "__namematch_rowid";

/// CREATE TABLE for the mapped name columns.
pub fn create_table_sql(table: &str, columns: &[&str]) -> String {
    let cols: Vec<String> = columns
        .iter()
        .map(|c| format!("    {} TEXT", quote_ident(c)))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    id INTEGER PRIMARY KEY,\n{}\n)",
        quote_ident(table),
        cols.join(",\n")
    )
}

/// INSERT of the given columns.
pub fn insert_sql(table: &str, columns: &[&str]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_ident(c)).collect();
    let slots: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_ident(table),
        names.join(", "),
        slots.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_ident() {
        assert_eq!(quote_ident("first"), "\"first\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }

    #[test]
    fn test_render_where() {
        let predicate = Predicate::new()
            .with_condition(Some("batch = '2026.01.10'"))
            .and(Clause::AnyOf(vec![
                Clause::equals("first", "John"),
                Clause::matches("first", "(?i)^J([.]?)$"),
            ]))
            .and(Clause::equals("last", "Smith"));

        let rendered = render_where(&predicate);
        assert_eq!(
            rendered.sql,
            "(batch = '2026.01.10') AND (\"first\" = ?1 OR \"first\" REGEXP ?2) AND \"last\" = ?3"
        );
        assert_eq!(rendered.params, vec!["John", "(?i)^J([.]?)$", "Smith"]);
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_where(&Predicate::new()).sql, "1");
        let never = Predicate::new().and(Clause::AnyOf(vec![]));
        assert_eq!(render_where(&never).sql, "0");
    }

    #[test]
    fn test_insert_sql() {
        assert_eq!(
            insert_sql("people", &["first", "last"]),
            "INSERT INTO \"people\" (\"first\", \"last\") VALUES (?1, ?2)"
        );
    }
}
