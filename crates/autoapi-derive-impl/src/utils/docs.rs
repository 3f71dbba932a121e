// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Doc comment extraction.
//!
//! Doc comments arrive as `#[doc = "..."]` attributes. The summary of an
//! entity's doc comment becomes its API description when
//! `#[auto_api(description = "...")]` is absent; the same holds for
//! `#[filter]` descriptions on fields.
//!
//! ```rust,ignore
//! /// A person in the directory.
//! ///
//! /// Imported nightly from HR.
//! #[derive(Entity)]
//! #[auto_api]
//! pub struct Person { ... }
//!
//! // summary: "A person in the directory."
//! ```

use syn::{Attribute, Expr, ExprLit, Lit, Meta};

/// Combined doc comment text, lines trimmed, or `None` when there is no
/// non-blank doc text.
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            Meta::NameValue(meta) => match &meta.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(text),
                    ..
                }) => Some(text.value().trim().to_owned()),
                _ => None
            },
            _ => None
        })
        .collect();

    let combined = lines.join("\n");
    let trimmed = combined.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// First non-blank doc line.
pub fn extract_doc_summary(attrs: &[Attribute]) -> Option<String> {
    extract_doc_comments(attrs)
        .and_then(|docs| docs.lines().map(str::trim).find(|line| !line.is_empty()).map(str::to_owned))
}
