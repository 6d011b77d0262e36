//! SQL output.
//!
//! Builds `INSERT` statements for the `stations`, `trains` and `train_stops`
//! tables. Values are always bound through [`Statement`], never spliced
//! into SQL text.

mod generate;
mod statement;
mod value;

pub use generate::{
    generate_sql, render_stop_sql, station_statement, stop_statement, stop_statements,
    train_statement,
};
pub use statement::{Expr, Statement};
pub use value::{SqlValue, quote_text};
