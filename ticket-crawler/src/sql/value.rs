//! SQL literal values.

use std::fmt;

/// A value bound to a statement placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Text(String),
}

impl SqlValue {
    /// Render as a MySQL literal. Text is single-quoted with `'` and `\`
    /// doubled, so no value can terminate the literal early.
    pub fn to_literal(&self) -> String {
        match self {
            SqlValue::Null => "NULL".to_string(),
            SqlValue::Integer(n) => n.to_string(),
            SqlValue::Text(s) => quote_text(s),
        }
    }
}

impl fmt::Display for SqlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal())
    }
}

/// Quote a string as a SQL text literal.
pub fn quote_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        match c {
            '\'' => out.push_str("''"),
            '\\' => out.push_str("\\\\"),
            _ => out.push(c),
        }
    }
    out.push('\'');
    out
}

impl From<&str> for SqlValue {
    fn from(s: &str) -> Self {
        SqlValue::Text(s.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(s: String) -> Self {
        SqlValue::Text(s)
    }
}

impl From<u32> for SqlValue {
    fn from(n: u32) -> Self {
        SqlValue::Integer(i64::from(n))
    }
}

impl From<i64> for SqlValue {
    fn from(n: i64) -> Self {
        SqlValue::Integer(n)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SqlValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals() {
        assert_eq!(SqlValue::Null.to_literal(), "NULL");
        assert_eq!(SqlValue::Integer(-3).to_literal(), "-3");
        assert_eq!(SqlValue::from("上海").to_literal(), "'上海'");
    }

    #[test]
    fn quotes_are_doubled() {
        assert_eq!(quote_text("O'Hare"), "'O''Hare'");
        assert_eq!(quote_text("'); DROP TABLE stations; --"), "'''); DROP TABLE stations; --'");
    }

    #[test]
    fn backslashes_are_doubled() {
        assert_eq!(quote_text(r"a\'b"), r"'a\\''b'");
    }

    #[test]
    fn option_conversion() {
        assert_eq!(SqlValue::from(None::<u32>), SqlValue::Null);
        assert_eq!(SqlValue::from(Some(300u32)), SqlValue::Integer(300));
        assert_eq!(SqlValue::from(Some("G")), SqlValue::Text("G".into()));
    }
}
