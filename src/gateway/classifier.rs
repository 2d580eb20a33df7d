//! Read/write routing heuristic
//!
//! Looks only at the first whitespace-delimited token. This is not a parser:
//! the rest of the statement is neither inspected nor validated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Leading keywords that route a statement to the read path
const READ_KEYWORDS: [&str; 3] = ["select", "show", "pragma"];

/// Routing class of a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryKind {
    Read,
    Write,
}

impl QueryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKind::Read => "read",
            QueryKind::Write => "write",
        }
    }
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a statement by its first keyword.
///
/// Empty or whitespace-only input is a write, so it goes through the
/// persistence path like any other unrecognized statement.
pub fn classify(sql: &str) -> QueryKind {
    match sql.split_whitespace().next() {
        Some(first) if READ_KEYWORDS.iter().any(|k| first.eq_ignore_ascii_case(k)) => {
            QueryKind::Read
        }
        _ => QueryKind::Write,
    }
}
