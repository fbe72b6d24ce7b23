//! Inspection results and their console rendering.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use wayfarer_domain::{parse_params, ParamMap};

/// The single outcome of one inspection command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Report {
    /// Rows as the store returned them.
    Rows {
        table: String,
        count: usize,
        rows: Vec<Value>,
    },
    /// Rows reshaped into one line each.
    Listing { title: String, lines: Vec<String> },
    /// Rows changed by a patch.
    Updated {
        table: String,
        affected: usize,
        rows: Vec<Value>,
    },
    Columns { table: String, columns: Vec<String> },
    Params { params: ParamMap },
}

impl Report {
    pub fn rows(table: impl Into<String>, rows: Vec<Value>) -> Self {
        Self::Rows {
            table: table.into(),
            count: rows.len(),
            rows,
        }
    }

    pub fn updated(table: impl Into<String>, rows: Vec<Value>) -> Self {
        Self::Updated {
            table: table.into(),
            affected: rows.len(),
            rows,
        }
    }

    /// Parse a parameter string. Needs no store; malformed input is logged
    /// by the parser and reported as an empty map.
    pub fn params(input: &str) -> Self {
        Self::Params {
            params: parse_params(Some(input)),
        }
    }

    pub fn listing(title: impl Into<String>, lines: Vec<String>) -> Self {
        Self::Listing {
            title: title.into(),
            lines,
        }
    }
}

fn write_pretty(f: &mut fmt::Formatter<'_>, value: &impl Serialize) -> fmt::Result {
    let text = serde_json::to_string_pretty(value).map_err(|_| fmt::Error)?;
    writeln!(f, "{text}")
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows { table, count, rows } => {
                writeln!(f, "{table}: {count} row(s)")?;
                for row in rows {
                    write_pretty(f, row)?;
                }
                Ok(())
            }
            Self::Listing { title, lines } => {
                writeln!(f, "{title} ({})", lines.len())?;
                for line in lines {
                    writeln!(f, "  {line}")?;
                }
                Ok(())
            }
            Self::Updated {
                table,
                affected,
                rows,
            } => {
                if *affected == 0 {
                    return writeln!(f, "{table}: no rows matched, nothing updated");
                }
                writeln!(f, "{table}: {affected} row(s) updated")?;
                for row in rows {
                    write_pretty(f, row)?;
                }
                Ok(())
            }
            Self::Columns { table, columns } if columns.is_empty() => {
                writeln!(f, "{table}: no visible rows, columns unknown")
            }
            Self::Columns { table, columns } => {
                writeln!(f, "{table} columns: {}", columns.join(", "))
            }
            Self::Params { params } => write_pretty(f, params),
        }
    }
}
