//! Batch query files.
//!
//! One query per line. Blank lines and lines starting with `#` are echoed
//! back untouched so reports line up with their input. In test files every
//! query line carries its expected result count after a tab:
//!
//! ```text
//! # plain terms
//! gato	12
//! gato AND NOT perro	9
//! ```

use crate::engine::Engine;
use crate::error::{Error, Result};

const COMMENT: char = '#';

fn is_passthrough(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(COMMENT)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryCount {
    /// Comment or blank line.
    Echo(String),
    Counted { query: String, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryTest {
    Echo(String),
    Passed {
        query: String,
        count: usize,
    },
    Failed {
        query: String,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryTestReport {
    pub lines: Vec<QueryTest>,
}

impl QueryTestReport {
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &QueryTest> {
        self.lines
            .iter()
            .filter(|line| matches!(line, QueryTest::Failed { .. }))
    }
}

/// Solve every query line and report its result count.
///
/// The first query that fails to evaluate aborts the batch.
pub fn count_queries<I, S>(engine: &Engine, lines: I) -> Result<Vec<QueryCount>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            if is_passthrough(line) {
                return Ok(QueryCount::Echo(line.to_string()));
            }
            let count = engine.solve_query(line)?.len();
            Ok(QueryCount::Counted {
                query: line.to_string(),
                count,
            })
        })
        .collect()
}

/// Solve every `query<TAB>count` line and compare against the expected count.
pub fn test_queries<I, S>(engine: &Engine, lines: I) -> Result<QueryTestReport>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = QueryTestReport::default();

    for line in lines {
        let line = line.as_ref();
        if is_passthrough(line) {
            report.lines.push(QueryTest::Echo(line.to_string()));
            continue;
        }

        let (query, expected) = line
            .split_once('\t')
            .ok_or_else(|| Error::unsupported(format!("missing expected count: {}", line)))?;
        let expected: usize = expected.trim().parse().map_err(|_| {
            Error::unsupported(format!("expected count is not a number: {}", line))
        })?;

        let actual = engine.solve_query(query)?.len();
        let query = query.to_string();
        report.lines.push(if actual == expected {
            QueryTest::Passed {
                query,
                count: actual,
            }
        } else {
            QueryTest::Failed {
                query,
                expected,
                actual,
            }
        });
    }

    Ok(report)
}
