//! Parameterized statement construction.
//!
//! Statements are assembled from fixed SQL fragments and bound values. Data
//! never becomes part of the SQL text directly: the parameterized form keeps
//! values separate behind `?` placeholders, and the rendered form substitutes
//! them as escaped literals.

use std::fmt;

use super::value::SqlValue;

/// A column value in an `INSERT`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    /// A bound value.
    Value(SqlValue),
    /// A scalar sub-select resolving a row id from a key column, e.g.
    /// `(SELECT station_id FROM stations WHERE station_name = ?)`.
    Lookup {
        table: &'static str,
        id_column: &'static str,
        key_column: &'static str,
        key: SqlValue,
    },
}

impl Expr {
    pub fn value(v: impl Into<SqlValue>) -> Self {
        Expr::Value(v.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Sql(String),
    Param(SqlValue),
}

/// A single SQL statement with its bound parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    parts: Vec<Part>,
}

impl Statement {
    /// Build `INSERT INTO table (c1, c2, ...) VALUES (e1, e2, ...);`.
    pub fn insert(table: &'static str, columns: Vec<(&'static str, Expr)>) -> Self {
        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();

        let mut stmt = Statement { parts: Vec::new() };
        stmt.push_sql(format!("INSERT INTO {table} ({}) VALUES (", names.join(", ")));

        for (i, (_, expr)) in columns.into_iter().enumerate() {
            if i > 0 {
                stmt.push_sql(", ".to_string());
            }
            match expr {
                Expr::Value(value) => stmt.parts.push(Part::Param(value)),
                Expr::Lookup {
                    table,
                    id_column,
                    key_column,
                    key,
                } => {
                    stmt.push_sql(format!(
                        "(SELECT {id_column} FROM {table} WHERE {key_column} = "
                    ));
                    stmt.parts.push(Part::Param(key));
                    stmt.push_sql(")".to_string());
                }
            }
        }

        stmt.push_sql(");".to_string());
        stmt
    }

    fn push_sql(&mut self, sql: String) {
        match self.parts.last_mut() {
            Some(Part::Sql(last)) => last.push_str(&sql),
            _ => self.parts.push(Part::Sql(sql)),
        }
    }

    /// SQL text with `?` in place of every bound value.
    pub fn template(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Sql(sql) => sql.as_str(),
                Part::Param(_) => "?",
            })
            .collect()
    }

    /// Bound values in placeholder order.
    pub fn params(&self) -> Vec<&SqlValue> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Param(value) => Some(value),
                Part::Sql(_) => None,
            })
            .collect()
    }

    /// Self-contained SQL with every value rendered as a literal.
    pub fn render(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                Part::Sql(sql) => sql.clone(),
                Part::Param(value) => value.to_literal(),
            })
            .collect()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station_insert(name: &str) -> Statement {
        Statement::insert(
            "stations",
            vec![
                ("station_name", Expr::value(name)),
                ("city", Expr::value("上海")),
            ],
        )
    }

    #[test]
    fn template_and_params() {
        let stmt = station_insert("上海");
        assert_eq!(
            stmt.template(),
            "INSERT INTO stations (station_name, city) VALUES (?, ?);"
        );
        assert_eq!(
            stmt.params(),
            vec![&SqlValue::from("上海"), &SqlValue::from("上海")]
        );
    }

    #[test]
    fn render_escapes_values() {
        let stmt = station_insert("O'Hare");
        assert_eq!(
            stmt.render(),
            "INSERT INTO stations (station_name, city) VALUES ('O''Hare', '上海');"
        );
    }

    #[test]
    fn question_marks_in_values_stay_literal() {
        let stmt = station_insert("?");
        assert_eq!(stmt.params().len(), 2);
        assert_eq!(
            stmt.render(),
            "INSERT INTO stations (station_name, city) VALUES ('?', '上海');"
        );
    }

    #[test]
    fn lookup_renders_subselect() {
        let stmt = Statement::insert(
            "trains",
            vec![
                ("train_number", Expr::value("G1")),
                (
                    "start_station_id",
                    Expr::Lookup {
                        table: "stations",
                        id_column: "station_id",
                        key_column: "station_name",
                        key: "北京北".into(),
                    },
                ),
                ("duration_minutes", Expr::value(None::<u32>)),
            ],
        );

        assert_eq!(
            stmt.template(),
            "INSERT INTO trains (train_number, start_station_id, duration_minutes) VALUES \
             (?, (SELECT station_id FROM stations WHERE station_name = ?), ?);"
        );
        assert_eq!(
            stmt.to_string(),
            "INSERT INTO trains (train_number, start_station_id, duration_minutes) VALUES \
             ('G1', (SELECT station_id FROM stations WHERE station_name = '北京北'), NULL);"
        );
    }
}
