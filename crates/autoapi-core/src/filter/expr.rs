// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Filter expression tree.
//!
//! [`Expr`] is what the compiler produces and what query executors
//! translate. Executors either walk the tree with [`Expr::visit`] / a
//! `match`, or evaluate it in memory against a [`Record`] with
//! [`Expr::eval`].
//!
//! Evaluation follows SQL three-valued logic: any comparison involving a
//! null (or absent) field is unknown, and a record matches only if the
//! whole tree is definitely true.

use std::{cmp::Ordering, fmt, ops::Not};

use super::Record;
use crate::value::Value;

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    /// `=`
    Eq,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le
}

impl CompareOp {
    /// SQL symbol.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::Lt => "<",
            Self::Le => "<="
        }
    }

    /// Check if `ordering` (of field relative to operand) satisfies the
    /// operator.
    #[must_use]
    pub const fn holds(&self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => matches!(ordering, Ordering::Equal),
            Self::Gt => matches!(ordering, Ordering::Greater),
            Self::Ge => !matches!(ordering, Ordering::Less),
            Self::Lt => matches!(ordering, Ordering::Less),
            Self::Le => !matches!(ordering, Ordering::Greater)
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// `field <op> value`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprCompare {
    /// Field name.
    pub field:            String,
    /// Operator.
    pub op:               CompareOp,
    /// Operand.
    pub value:            Value,
    /// Compare lower-cased text; the operand is already lower-cased.
    pub case_insensitive: bool
}

/// `field LIKE pattern`, with `%` and `_` wildcards.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprLike {
    /// Field name.
    pub field:            String,
    /// Pattern.
    pub pattern:          String,
    /// Match lower-cased text; the pattern is already lower-cased.
    pub case_insensitive: bool
}

/// `field IN (values)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprInList {
    /// Field name.
    pub field:  String,
    /// Candidate values.
    pub values: Vec<Value>
}

/// `field IS [NOT] NULL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprIsNull {
    /// Field name.
    pub field:  String,
    /// `IS NOT NULL` when set.
    pub negate: bool
}

/// `field BETWEEN low AND high`, inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprBetween {
    /// Field name.
    pub field: String,
    /// Lower bound.
    pub low:   Value,
    /// Upper bound.
    pub high:  Value
}

/// Filter condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Expr {
    /// Always true.
    #[default]
    True,
    /// Conjunction.
    And(Vec<Expr>),
    /// Negation.
    Not(Box<Expr>),
    /// Comparison.
    Compare(ExprCompare),
    /// Pattern match.
    Like(ExprLike),
    /// Membership.
    InList(ExprInList),
    /// Null check.
    IsNull(ExprIsNull),
    /// Inclusive range.
    Between(ExprBetween)
}

impl Expr {
    fn compare(field: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> Self {
        Self::Compare(ExprCompare {
            field: field.into(),
            op,
            value: value.into(),
            case_insensitive: false
        })
    }

    /// `field = value`.
    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Eq, value)
    }

    /// Case-insensitive `field = text`.
    pub fn eq_ignore_case(field: impl Into<String>, text: &str) -> Self {
        Self::Compare(ExprCompare {
            field:            field.into(),
            op:               CompareOp::Eq,
            value:            Value::String(text.to_lowercase()),
            case_insensitive: true
        })
    }

    /// `field > value`.
    pub fn gt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Gt, value)
    }

    /// `field >= value`.
    pub fn ge(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Ge, value)
    }

    /// `field < value`.
    pub fn lt(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Lt, value)
    }

    /// `field <= value`.
    pub fn le(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(field, CompareOp::Le, value)
    }

    /// `field LIKE pattern`.
    pub fn like(field: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::Like(ExprLike {
            field:            field.into(),
            pattern:          pattern.into(),
            case_insensitive: false
        })
    }

    /// Case-insensitive `field LIKE pattern`.
    pub fn like_ignore_case(field: impl Into<String>, pattern: &str) -> Self {
        Self::Like(ExprLike {
            field:            field.into(),
            pattern:          pattern.to_lowercase(),
            case_insensitive: true
        })
    }

    /// `field IN (values)`.
    pub fn in_list(field: impl Into<String>, values: Vec<Value>) -> Self {
        Self::InList(ExprInList {
            field: field.into(),
            values
        })
    }

    /// `field IS NULL`.
    pub fn is_null(field: impl Into<String>) -> Self {
        Self::IsNull(ExprIsNull {
            field:  field.into(),
            negate: false
        })
    }

    /// `field IS NOT NULL`.
    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::IsNull(ExprIsNull {
            field:  field.into(),
            negate: true
        })
    }

    /// `field BETWEEN low AND high`.
    pub fn between(field: impl Into<String>, low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self::Between(ExprBetween {
            field: field.into(),
            low:   low.into(),
            high:  high.into()
        })
    }

    /// Conjunction of `self` and `other`, flattening nested conjunctions
    /// and dropping `True` operands.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::all([self, other])
    }

    /// Conjunction of every operand, flattened. No operands yield `True`.
    pub fn all(operands: impl IntoIterator<Item = Self>) -> Self {
        let mut flat = Vec::new();
        for operand in operands {
            match operand {
                Self::True => {}
                Self::And(inner) => flat.extend(inner),
                other => flat.push(other)
            }
        }
        match flat.len() {
            0 => Self::True,
            1 => flat.pop().unwrap_or_default(),
            _ => Self::And(flat)
        }
    }

    /// Check if this is the always-true condition.
    #[must_use]
    pub const fn is_true(&self) -> bool {
        matches!(self, Self::True)
    }

    /// Visit every node in pre-order.
    pub fn visit(&self, visitor: &mut impl FnMut(&Self)) {
        visitor(self);
        match self {
            Self::And(operands) => {
                for operand in operands {
                    operand.visit(visitor);
                }
            }
            Self::Not(inner) => inner.visit(visitor),
            _ => {}
        }
    }

    /// Evaluate against `record`; unknown counts as not matching.
    pub fn eval<R: Record + ?Sized>(&self, record: &R) -> bool {
        self.eval_sql(record) == Some(true)
    }

    /// Three-valued evaluation; `None` is SQL `UNKNOWN`.
    fn eval_sql<R: Record + ?Sized>(&self, record: &R) -> Option<bool> {
        match self {
            Self::True => Some(true),
            Self::And(operands) => {
                let mut unknown = false;
                for operand in operands {
                    match operand.eval_sql(record) {
                        Some(false) => return Some(false),
                        None => unknown = true,
                        Some(true) => {}
                    }
                }
                if unknown { None } else { Some(true) }
            }
            Self::Not(inner) => inner.eval_sql(record).map(|matched| !matched),
            Self::Compare(compare) => {
                let actual = present(record, &compare.field)?;
                if compare.case_insensitive
                    && let (Some(actual), Some(expected)) = (actual.as_str(), compare.value.as_str())
                {
                    return Some(compare.op.holds(actual.to_lowercase().as_str().cmp(expected)));
                }
                actual.compare(&compare.value).map(|ordering| compare.op.holds(ordering))
            }
            Self::Like(like) => {
                let actual = present(record, &like.field)?;
                let text = actual.as_str()?;
                Some(if like.case_insensitive {
                    like_match(&text.to_lowercase(), &like.pattern)
                } else {
                    like_match(text, &like.pattern)
                })
            }
            Self::InList(list) => {
                let actual = present(record, &list.field)?;
                Some(list.values.iter().any(|candidate| actual.loose_eq(candidate)))
            }
            Self::IsNull(check) => {
                let is_null = present(record, &check.field).is_none();
                Some(is_null != check.negate)
            }
            Self::Between(range) => {
                let actual = present(record, &range.field)?;
                let low = actual.compare(&range.low)?;
                let high = actual.compare(&range.high)?;
                Some(low != Ordering::Less && high != Ordering::Greater)
            }
        }
    }
}

impl Not for Expr {
    type Output = Self;

    fn not(self) -> Self {
        match self {
            Self::Not(inner) => *inner,
            other => Self::Not(Box::new(other))
        }
    }
}

fn present<R: Record + ?Sized>(record: &R, field: &str) -> Option<Value> {
    record.value(field).filter(|value| !value.is_null())
}

/// SQL `LIKE` matching: `%` matches any run, `_` any single character.
fn like_match(text: &str, pattern: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    let (mut t, mut p) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && pattern[p] == '%' {
            p += 1;
            backtrack = Some((p, t));
        } else if p < pattern.len() && (pattern[p] == '_' || pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if let Some((resume, start)) = backtrack {
            p = resume;
            t = start + 1;
            backtrack = Some((resume, start + 1));
        } else {
            return false;
        }
    }
    pattern[p..].iter().all(|c| *c == '%')
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => f.write_str("TRUE"),
            Self::And(operands) => {
                for (i, operand) in operands.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" AND ")?;
                    }
                    write!(f, "{operand}")?;
                }
                Ok(())
            }
            Self::Not(inner) => write!(f, "NOT ({inner})"),
            Self::Compare(compare) if compare.case_insensitive => {
                write!(f, "LOWER({}) {} {}", compare.field, compare.op, compare.value)
            }
            Self::Compare(compare) => {
                write!(f, "{} {} {}", compare.field, compare.op, compare.value)
            }
            Self::Like(like) => {
                let pattern = Value::String(like.pattern.clone());
                if like.case_insensitive {
                    write!(f, "LOWER({}) LIKE {pattern}", like.field)
                } else {
                    write!(f, "{} LIKE {pattern}", like.field)
                }
            }
            Self::InList(list) => {
                write!(f, "{} IN {}", list.field, Value::List(list.values.clone()))
            }
            Self::IsNull(check) if check.negate => write!(f, "{} IS NOT NULL", check.field),
            Self::IsNull(check) => write!(f, "{} IS NULL", check.field),
            Self::Between(range) => {
                write!(f, "{} BETWEEN {} AND {}", range.field, range.low, range.high)
            }
        }
    }
}
