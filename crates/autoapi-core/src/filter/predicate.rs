// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Compiled predicate and per-query plans.

use std::fmt;

use super::{Expr, Record};

/// Kind of query a predicate is applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKind {
    /// Result-returning query.
    Select,
    /// Count-only query.
    Count
}

/// What an executor applies for one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryPlan<'a> {
    /// Filter condition.
    pub filter:   &'a Expr,
    /// To-one relations to load eagerly.
    pub fetch:    &'a [String],
    /// Whether duplicate rows must be removed.
    pub distinct: bool
}

/// A filter condition plus eager-fetch directives.
///
/// The filter applies to every query; fetch directives and row
/// deduplication only apply to result-returning queries (see
/// [`Predicate::plan`]).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Predicate {
    filter:   Expr,
    fetch:    Vec<String>,
    distinct: bool
}

impl Predicate {
    /// Predicate with `filter` and no fetch directives.
    #[must_use]
    pub const fn new(filter: Expr) -> Self {
        Self {
            filter,
            fetch: Vec::new(),
            distinct: false
        }
    }

    /// Predicate matching everything.
    #[must_use]
    pub const fn always() -> Self {
        Self::new(Expr::True)
    }

    /// Load `relations` eagerly and deduplicate rows.
    #[must_use]
    pub fn with_fetch(mut self, relations: Vec<String>) -> Self {
        self.fetch = relations;
        self.distinct = true;
        self
    }

    /// Filter condition.
    #[must_use]
    pub const fn filter(&self) -> &Expr {
        &self.filter
    }

    /// Relations to load eagerly for result-returning queries.
    #[must_use]
    pub fn fetch(&self) -> &[String] {
        &self.fetch
    }

    /// Whether result-returning queries deduplicate rows.
    #[must_use]
    pub const fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Plan for a query of `kind`. Count queries get the filter only.
    #[must_use]
    pub fn plan(&self, kind: QueryKind) -> QueryPlan<'_> {
        match kind {
            QueryKind::Select => QueryPlan {
                filter:   &self.filter,
                fetch:    &self.fetch,
                distinct: self.distinct
            },
            QueryKind::Count => QueryPlan {
                filter:   &self.filter,
                fetch:    &[],
                distinct: false
            }
        }
    }

    /// Combine with `other`: filters are conjoined, fetch directives merged.
    #[must_use]
    pub fn and(mut self, other: Self) -> Self {
        self.filter = self.filter.and(other.filter);
        for relation in other.fetch {
            if !self.fetch.contains(&relation) {
                self.fetch.push(relation);
            }
        }
        self.distinct |= other.distinct;
        self
    }

    /// Evaluate the filter against `record`.
    pub fn matches<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.filter.eval(record)
    }

    /// Take the filter condition.
    #[must_use]
    pub fn into_filter(self) -> Expr {
        self.filter
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.filter)?;
        if !self.fetch.is_empty() {
            write!(f, " FETCH {}", self.fetch.join(", "))?;
        }
        if self.distinct {
            f.write_str(" DISTINCT")?;
        }
        Ok(())
    }
}
