//! Ordered pattern tables with first-accepted-wins evaluation.
//!
//! Each field is described by a table of `(rule label, regex)` pairs. Rules run
//! in declared order; for each rule only its first match is considered, and the
//! first capture an acceptance predicate keeps ends the search. A rejected
//! capture moves on to the next rule, never to a later match of the same rule.

use regex::Regex;
use tracing::{debug, trace};

/// One compiled rule of a cascade.
#[derive(Debug)]
pub struct FieldRule {
    pub label: &'static str,
    pub pattern: Regex,
}

/// A value kept by a cascade, with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Accepted<T> {
    pub rule: &'static str,
    pub value: T,
}

/// An ordered table of rules for a single field.
#[derive(Debug)]
pub struct Cascade {
    field: &'static str,
    rules: Vec<FieldRule>,
}

impl Cascade {
    /// Compile a rule table. Every pattern must have exactly one capture group
    /// holding the candidate value.
    ///
    /// # Panics
    ///
    /// Panics if a pattern does not compile; tables are static, so this
    /// surfaces on first use.
    pub fn new<P: AsRef<str>>(field: &'static str, table: &[(&'static str, P)]) -> Self {
        let rules = table
            .iter()
            .map(|(label, pattern)| FieldRule {
                label: *label,
                pattern: Regex::new(pattern.as_ref())
                    .unwrap_or_else(|e| panic!("invalid {field} rule `{label}`: {e}")),
            })
            .collect();
        Self { field, rules }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Rule labels in evaluation order.
    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(|rule| rule.label)
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    /// Evaluate the rules against `text` and return the first accepted value.
    pub fn first_accepted<'t, T>(
        &self,
        text: &'t str,
        mut accept: impl FnMut(&'t str) -> Option<T>,
    ) -> Option<Accepted<T>> {
        for rule in &self.rules {
            let Some(captured) = rule.pattern.captures(text).and_then(|caps| caps.get(1)) else {
                continue;
            };
            match accept(captured.as_str()) {
                Some(value) => {
                    debug!(field = self.field, rule = rule.label, "Cascade rule accepted");
                    return Some(Accepted { rule: rule.label, value });
                }
                None => trace!(field = self.field, rule = rule.label, "Cascade candidate rejected"),
            }
        }
        None
    }
}
