// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boolean query evaluation.
//!
//! A query is resolved in three passes, and the order is what gives nested
//! queries their meaning:
//!
//! 1. **Parentheses**: the first `(` is found, nested groups inside it are
//!    resolved first (recursively), then the group itself is evaluated as an
//!    independent query and replaced by a placeholder token.
//! 2. **Phrases**: each `"…"` span, with an optional `field:` glued to the
//!    opening quote, is resolved and replaced by a placeholder token.
//! 3. **Flat pass**: the remaining text is split on whitespace and folded
//!    strictly left to right. `AND` and `OR` have equal precedence, so
//!    `a OR b AND c` is `(a OR b) AND c`. A connective is required between
//!    any two operands; there is no implicit `AND`.
//!
//! ```text
//! ((a AND b) OR c) AND d
//!   → (%p1 OR c) AND d      inner group first
//!   → %p2 AND d             then the enclosing one
//!   → and(%p2, d)           flat pass
//! ```

pub mod batch;
mod parser;
mod placeholder;

pub use batch::{count_queries, test_queries, QueryCount, QueryTest, QueryTestReport};
pub use parser::MAX_GROUP_DEPTH;
pub use placeholder::PLACEHOLDER_MARK;

use tracing::debug;

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::postings::{and_posting, minus_posting, or_posting, reverse_posting};
use crate::types::{ArticleId, Field};

use placeholder::SubResults;

pub const AND: &str = "AND";
pub const OR: &str = "OR";
pub const NOT: &str = "NOT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Connective {
    And,
    Or,
}

/// One operand of the flat pass, possibly negated.
struct Operand {
    negated: bool,
    ids: Vec<ArticleId>,
}

/// Resolves one query against an engine.
///
/// Holds the placeholder table for the duration of the query, so nested
/// groups and phrases resolved early stay visible to the enclosing passes.
pub struct QueryEvaluator<'a> {
    engine: &'a Engine,
    sub_results: SubResults,
}

impl<'a> QueryEvaluator<'a> {
    pub fn new(engine: &'a Engine) -> Self {
        QueryEvaluator {
            engine,
            sub_results: SubResults::new(),
        }
    }

    /// Sorted, duplicate-free ids of the articles matching `query`.
    pub fn evaluate(&mut self, query: &str) -> Result<Vec<ArticleId>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let without_groups = self.eliminate_parentheses(query)?;
        let flat = self.eliminate_phrases(&without_groups)?;
        debug!(
            %query,
            %flat,
            subqueries = self.sub_results.len(),
            "evaluating flat query"
        );
        self.evaluate_flat(&flat)
    }

    fn evaluate_flat(&self, query: &str) -> Result<Vec<ArticleId>> {
        let mut tokens = query.split_whitespace();

        let first = self.next_operand(&mut tokens)?;
        let mut result = if first.negated {
            reverse_posting(&first.ids, self.engine.universe())
        } else {
            first.ids
        };

        while let Some(token) = tokens.next() {
            let connective = match token {
                AND => Connective::And,
                OR => Connective::Or,
                other => {
                    return Err(Error::unsupported(format!(
                        "expected AND or OR before '{}'",
                        other
                    )))
                }
            };

            let operand = self.next_operand(&mut tokens)?;
            result = match (connective, operand.negated) {
                (Connective::And, false) => and_posting(&result, &operand.ids),
                (Connective::And, true) => minus_posting(&result, &operand.ids),
                (Connective::Or, false) => or_posting(&result, &operand.ids),
                (Connective::Or, true) => or_posting(
                    &result,
                    &reverse_posting(&operand.ids, self.engine.universe()),
                ),
            };
        }

        Ok(result)
    }

    /// Read `operand` or `NOT operand`.
    fn next_operand<'q>(&self, tokens: &mut impl Iterator<Item = &'q str>) -> Result<Operand> {
        let token = tokens
            .next()
            .ok_or_else(|| Error::unsupported("query ends where an operand was expected"))?;

        if token == NOT {
            let operand = tokens
                .next()
                .ok_or_else(|| Error::unsupported("NOT without a following operand"))?;
            return Ok(Operand {
                negated: true,
                ids: self.resolve_operand(operand)?,
            });
        }

        Ok(Operand {
            negated: false,
            ids: self.resolve_operand(token)?,
        })
    }

    fn resolve_operand(&self, token: &str) -> Result<Vec<ArticleId>> {
        if matches!(token, AND | OR | NOT) {
            return Err(Error::unsupported(format!(
                "'{}' where an operand was expected",
                token
            )));
        }

        if let Some(ids) = self.sub_results.get(token) {
            return Ok(ids.to_vec());
        }

        match token.split_once(':') {
            Some((field, term)) => {
                let field: Field = field.parse()?;
                if term.is_empty() {
                    return Err(Error::unsupported(format!(
                        "field '{}' without a term",
                        field
                    )));
                }
                self.engine.resolve(term, field)
            }
            None => self.engine.resolve(token, Field::DEFAULT),
        }
    }
}

impl Engine {
    /// Evaluate a boolean query.
    ///
    /// ```
    /// use wikidex::{Engine, IndexOptions};
    ///
    /// let mut engine = Engine::new(IndexOptions::default());
    /// let record = r#"{"url": "u1", "title": "gato", "summary": "", "sections": []}"#;
    /// engine.index_record(record, "inline:1").unwrap();
    ///
    /// let ids = engine.solve_query("gato AND NOT perro").unwrap();
    /// assert_eq!(ids.len(), 1);
    /// ```
    pub fn solve_query(&self, query: &str) -> Result<Vec<ArticleId>> {
        QueryEvaluator::new(self).evaluate(query)
    }
}
