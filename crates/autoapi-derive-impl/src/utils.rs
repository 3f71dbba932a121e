// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared helpers for the derive.
//!
//! - [`docs`]: doc comment extraction for descriptions

pub mod docs;
