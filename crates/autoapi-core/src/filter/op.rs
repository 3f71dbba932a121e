// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Filter operators and per-field filter configuration.
//!
//! # Parameter Naming
//!
//! Each operator reads one query parameter named `<base><suffix>`, where
//! `<base>` is the configured parameter name or the field name:
//!
//! | Operator | Suffix | Example |
//! |----------|--------|---------|
//! | `Equals` | *(none)* | `status=active` |
//! | `Like` | `_like` | `name_like=ann` |
//! | `GreaterThan` | `_gt` | `age_gt=17` |
//! | `GreaterThanOrEqual` | `_gte` | `age_gte=18` |
//! | `LessThan` | `_lt` | `age_lt=66` |
//! | `LessThanOrEqual` | `_lte` | `age_lte=65` |
//! | `Range` | `_gte` and `_lte` | `age_gte=18&age_lte=65` |
//! | `In` | `_in` | `status_in=a,b` |
//! | `NotIn` | `_not_in` | `status_not_in=c` |
//! | `IsNull` | `_null` | `email_null=true` |
//! | `Between` | `_between` | `age_between=18,65` |

use std::fmt;

/// Filter operator declared on a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    /// Equality.
    Equals,
    /// Substring match.
    Like,
    /// Strictly greater.
    GreaterThan,
    /// Greater or equal.
    GreaterThanOrEqual,
    /// Strictly less.
    LessThan,
    /// Less or equal.
    LessThanOrEqual,
    /// Shorthand enabling both `GreaterThanOrEqual` and `LessThanOrEqual`.
    Range,
    /// Membership.
    In,
    /// Non-membership.
    NotIn,
    /// Null check.
    IsNull,
    /// Inclusive range in one parameter.
    Between
}

impl FilterOp {
    /// Parameter suffix; `None` for [`FilterOp::Range`], which reads the
    /// `_gte` and `_lte` parameters.
    #[must_use]
    pub const fn suffix(&self) -> Option<&'static str> {
        Some(match self {
            Self::Equals => "",
            Self::Like => "_like",
            Self::GreaterThan => "_gt",
            Self::GreaterThanOrEqual => "_gte",
            Self::LessThan => "_lt",
            Self::LessThanOrEqual => "_lte",
            Self::In => "_in",
            Self::NotIn => "_not_in",
            Self::IsNull => "_null",
            Self::Between => "_between",
            Self::Range => return None
        })
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Equals => "equals",
            Self::Like => "like",
            Self::GreaterThan => "greater_than",
            Self::GreaterThanOrEqual => "greater_than_or_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Range => "range",
            Self::In => "in",
            Self::NotIn => "not_in",
            Self::IsNull => "is_null",
            Self::Between => "between"
        };
        f.write_str(name)
    }
}

/// Filter configuration of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterConfig {
    /// Enabled operators.
    pub operators:      Vec<FilterOp>,
    /// Parameter base name override.
    pub param_name:     Option<String>,
    /// Whether textual equality and LIKE respect case.
    pub case_sensitive: bool,
    /// Human-readable description.
    pub description:    Option<String>
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self::new(vec![FilterOp::Equals])
    }
}

impl FilterConfig {
    /// Configuration enabling `operators`.
    #[must_use]
    pub const fn new(operators: Vec<FilterOp>) -> Self {
        Self {
            operators,
            param_name: None,
            case_sensitive: true,
            description: None
        }
    }

    /// Override the parameter base name.
    #[must_use]
    pub fn param_name(mut self, name: impl Into<String>) -> Self {
        self.param_name = Some(name.into());
        self
    }

    /// Set case sensitivity of textual matching.
    #[must_use]
    pub const fn case_sensitive(mut self, sensitive: bool) -> Self {
        self.case_sensitive = sensitive;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check if `op` is enabled. `GreaterThanOrEqual` and
    /// `LessThanOrEqual` are also enabled by `Range`.
    #[must_use]
    pub fn supports(&self, op: FilterOp) -> bool {
        self.operators.contains(&op)
            || (matches!(op, FilterOp::GreaterThanOrEqual | FilterOp::LessThanOrEqual)
                && self.operators.contains(&FilterOp::Range))
    }

    /// Parameter base name for a field called `field`.
    #[must_use]
    pub fn base_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.param_name.as_deref().unwrap_or(field)
    }

    /// Full parameter names read for a field called `field`, in
    /// compilation order.
    #[must_use]
    pub fn parameter_names(&self, field: &str) -> Vec<String> {
        let base = self.base_name(field);
        COMPILATION_ORDER
            .iter()
            .filter(|op| self.supports(**op))
            .filter_map(FilterOp::suffix)
            .map(|suffix| format!("{base}{suffix}"))
            .collect()
    }
}

/// Order in which operators produce conditions.
pub(crate) const COMPILATION_ORDER: [FilterOp; 10] = [
    FilterOp::Equals,
    FilterOp::Like,
    FilterOp::GreaterThan,
    FilterOp::GreaterThanOrEqual,
    FilterOp::LessThan,
    FilterOp::LessThanOrEqual,
    FilterOp::In,
    FilterOp::NotIn,
    FilterOp::IsNull,
    FilterOp::Between
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_equality_case_sensitive() {
        let config = FilterConfig::default();
        assert_eq!(config.operators, vec![FilterOp::Equals]);
        assert!(config.case_sensitive);
        assert!(config.param_name.is_none());
    }

    #[test]
    fn range_enables_inclusive_bounds() {
        let config = FilterConfig::new(vec![FilterOp::Range]);
        assert!(config.supports(FilterOp::GreaterThanOrEqual));
        assert!(config.supports(FilterOp::LessThanOrEqual));
        assert!(!config.supports(FilterOp::GreaterThan));
        assert_eq!(config.parameter_names("age"), vec!["age_gte", "age_lte"]);
    }

    #[test]
    fn param_name_overrides_field() {
        let config = FilterConfig::new(vec![FilterOp::Equals, FilterOp::Like]).param_name("q");
        assert_eq!(config.base_name("name"), "q");
        assert_eq!(config.parameter_names("name"), vec!["q", "q_like"]);
    }

    #[test]
    fn suffixes() {
        assert_eq!(FilterOp::NotIn.suffix(), Some("_not_in"));
        assert_eq!(FilterOp::Range.suffix(), None);
        assert_eq!(FilterOp::IsNull.to_string(), "is_null");
    }
}
