// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamic filtering from query parameters.
//!
//! Fields opt into filtering with a [`FilterConfig`] naming the operators
//! they accept. Each operator reads one query parameter:
//!
//! | Operator | Parameter | Condition |
//! |----------|-----------|-----------|
//! | `Equals` | `name` | `name = v` |
//! | `Like` | `name_like` | `name LIKE '%v%'` |
//! | `GreaterThan` | `name_gt` | `name > v` |
//! | `GreaterThanOrEqual` | `name_gte` | `name >= v` |
//! | `LessThan` | `name_lt` | `name < v` |
//! | `LessThanOrEqual` | `name_lte` | `name <= v` |
//! | `Range` | `name_gte`, `name_lte` | both bounds optional |
//! | `In` | `name_in` | `name IN (a, b)` |
//! | `NotIn` | `name_not_in` | `NOT (name IN (a, b))` |
//! | `IsNull` | `name_null` | `true` checks null, anything else not null |
//! | `Between` | `name_between` | `name BETWEEN a AND b` |
//!
//! # Module Structure
//!
//! ```text
//! filter/
//! ├── op.rs        # FilterOp, FilterConfig
//! ├── expr.rs      # Expr condition tree
//! ├── record.rs    # Record lookup for in-memory evaluation
//! ├── predicate.rs # Predicate, QueryPlan
//! └── compiler.rs  # FilterCompiler, Params
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let compiler = FilterCompiler::new();
//! let predicate = compiler.compile(&metadata, &params, None)?;
//! let plan = predicate.plan(QueryKind::Select);
//! ```

mod compiler;
mod expr;
mod op;
mod predicate;
mod record;

pub use compiler::{FilterCompiler, Params};
pub use expr::{
    CompareOp, Expr, ExprBetween, ExprCompare, ExprInList, ExprIsNull, ExprLike
};
pub(crate) use op::COMPILATION_ORDER;
pub use op::{FilterConfig, FilterOp};
pub use predicate::{Predicate, QueryKind, QueryPlan};
pub use record::{EntityRecord, Record};
