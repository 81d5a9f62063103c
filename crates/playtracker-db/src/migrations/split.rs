//! Splitting migration text into single statements.
//!
//! This is a line-oriented filter, not a SQL tokenizer. Migrations must not
//! put `;` or `--` inside string literals, and a `--` comment that follows
//! code on the same line is kept: once lines are joined it comments out
//! everything after it.

const LINE_COMMENT: &str = "--";
const TERMINATOR: char = ';';

/// Break `raw` into executable statements, in file order.
///
/// Blank lines and lines starting with `--` are dropped, the remaining
/// trimmed lines are joined with single spaces, and the result is split on
/// `;`. Empty segments are discarded, so a file holding only comments
/// yields no statements.
pub fn split_statements(raw: &str) -> Vec<String> {
    let joined = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(LINE_COMMENT))
        .collect::<Vec<_>>()
        .join(" ");

    joined
        .split(TERMINATOR)
        .map(str::trim)
        .filter(|stmt| !stmt.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::split_statements;

    #[test]
    fn multi_line_statement_is_joined_with_spaces() {
        let sql = "CREATE TABLE users (\n    id INTEGER PRIMARY KEY,\n    name TEXT NOT NULL\n);\n";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE users ( id INTEGER PRIMARY KEY, name TEXT NOT NULL )"]
        );
    }

    #[test]
    fn comment_lines_and_blank_lines_are_dropped() {
        let sql = "
-- This is a comment
-- Another comment

CREATE TABLE test_table (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    -- Inline comment
    name TEXT NOT NULL
);

-- Final comment

";
        assert_eq!(
            split_statements(sql),
            vec!["CREATE TABLE test_table ( id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL )"]
        );
    }

    #[test]
    fn comment_only_source_has_no_statements() {
        assert!(split_statements("-- nothing here\n\n   -- still nothing\n").is_empty());
        assert!(split_statements("").is_empty());
        assert!(split_statements(" ;; ; \n;").is_empty());
    }

    #[test]
    fn statements_keep_file_order() {
        let sql = "CREATE TABLE a (id INTEGER); CREATE TABLE b (id INTEGER);\nINSERT INTO a VALUES (1)";
        assert_eq!(
            split_statements(sql),
            vec![
                "CREATE TABLE a (id INTEGER)",
                "CREATE TABLE b (id INTEGER)",
                "INSERT INTO a VALUES (1)",
            ]
        );
    }

    #[test]
    fn indented_comment_lines_are_dropped() {
        let sql = "    -- indented\nSELECT 1;";
        assert_eq!(split_statements(sql), vec!["SELECT 1"]);
    }

    #[test]
    fn crlf_line_endings_are_handled() {
        let sql = "-- header\r\nCREATE TABLE a (id INTEGER);\r\n";
        assert_eq!(split_statements(sql), vec!["CREATE TABLE a (id INTEGER)"]);
    }

    #[test]
    fn semicolon_inside_literal_is_split_naively() {
        let sql = "INSERT INTO notes (body) VALUES ('a;b');";
        assert_eq!(
            split_statements(sql),
            vec!["INSERT INTO notes (body) VALUES ('a", "b')"]
        );
    }
}
