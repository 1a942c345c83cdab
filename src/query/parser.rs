// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The two rewriting passes that run before the flat token pass.
//!
//! Both passes work on the query text itself: a resolved span is cut out and
//! a placeholder token is spliced in, so later passes only ever see
//! whitespace-separated operands and connectives.

use tracing::trace;

use super::QueryEvaluator;
use crate::error::{Error, Result};
use crate::types::{ArticleId, Field};

const OPEN: char = '(';
const CLOSE: char = ')';
const QUOTE: char = '"';

/// Deepest accepted group nesting. Each level is one recursive call.
pub const MAX_GROUP_DEPTH: usize = 256;

impl QueryEvaluator<'_> {
    /// Replace every parenthesized group, innermost first, by a placeholder.
    pub(super) fn eliminate_parentheses(&mut self, query: &str) -> Result<String> {
        reject_parentheses_in_phrases(query)?;

        let mut current = query.to_string();
        while let Some(position) = current.find([OPEN, CLOSE]) {
            if current[position..].starts_with(CLOSE) {
                return Err(Error::unsupported(format!(
                    "unbalanced ')' at byte {}",
                    position
                )));
            }
            current = self.resolve_group(current, position, 1)?;
        }
        Ok(current)
    }

    /// Resolve the group opening at byte `open`, nested groups included.
    fn resolve_group(&mut self, mut current: String, open: usize, depth: usize) -> Result<String> {
        if depth > MAX_GROUP_DEPTH {
            return Err(Error::unsupported(format!(
                "parentheses nested too deeply (more than {} levels)",
                MAX_GROUP_DEPTH
            )));
        }
        loop {
            let position = current[open + 1..]
                .find([OPEN, CLOSE])
                .map(|offset| open + 1 + offset)
                .ok_or_else(|| {
                    Error::unsupported(format!("unbalanced '(' at byte {}", open))
                })?;

            if current[position..].starts_with(OPEN) {
                current = self.resolve_group(current, position, depth + 1)?;
                continue;
            }

            let ids = {
                let inner = &current[open + 1..position];
                if inner.trim().is_empty() {
                    return Err(Error::unsupported("empty parentheses"));
                }
                trace!(%inner, "resolving group");
                self.evaluate_group(inner)?
            };

            let token = self
                .sub_results
                .insert(&current[open..=position], open, &current, ids);
            // Padding keeps the token a separate operand in `NOT(a)`.
            current.replace_range(open..=position, &format!(" {} ", token));
            return Ok(current);
        }
    }

    /// A group body: parentheses are already gone, phrases may remain.
    fn evaluate_group(&mut self, inner: &str) -> Result<Vec<ArticleId>> {
        let flat = self.eliminate_phrases(inner)?;
        self.evaluate_flat(&flat)
    }

    /// Replace every `"…"` or `field:"…"` span by a placeholder.
    pub(super) fn eliminate_phrases(&mut self, query: &str) -> Result<String> {
        let mut current = query.to_string();
        while let Some(open) = current.find(QUOTE) {
            let close = current[open + 1..]
                .find(QUOTE)
                .map(|offset| open + 1 + offset)
                .ok_or_else(|| Error::unsupported("unterminated phrase"))?;

            if let Some(next) = current[close + 1..].chars().next() {
                if !next.is_whitespace() {
                    return Err(Error::unsupported(format!(
                        "unexpected '{}' after closing quote",
                        next
                    )));
                }
            }

            let start = current[..open]
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
                .map_or(0, |(i, c)| i + c.len_utf8());
            let field = phrase_field(&current[start..open])?;

            let ids = self.engine.resolve(&current[open..=close], field)?;
            trace!(phrase = &current[open..=close], %field, matches = ids.len(), "resolved phrase");

            let token = self
                .sub_results
                .insert(&current[start..=close], start, &current, ids);
            current.replace_range(start..=close, &token);
        }
        Ok(current)
    }
}

/// Groups are resolved before phrases, so a parenthesis inside quotes would
/// be cut out of the phrase.
fn reject_parentheses_in_phrases(query: &str) -> Result<()> {
    let mut in_phrase = false;
    for (position, c) in query.char_indices() {
        match c {
            QUOTE => in_phrase = !in_phrase,
            OPEN | CLOSE if in_phrase => {
                return Err(Error::unsupported(format!(
                    "'{}' inside a phrase at byte {}",
                    c, position
                )))
            }
            _ => {}
        }
    }
    Ok(())
}

/// The text glued in front of an opening quote: nothing, or `field:`.
fn phrase_field(qualifier: &str) -> Result<Field> {
    if qualifier.is_empty() {
        return Ok(Field::DEFAULT);
    }
    match qualifier.strip_suffix(':') {
        Some(name) => name.parse(),
        None => Err(Error::unsupported(format!(
            "unexpected '{}' before opening quote",
            qualifier
        ))),
    }
}
