// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Per-call mapping options.

use serde::{Deserialize, Serialize};

/// Options of one mapping call.
///
/// | Preset | `max_depth` |
/// |--------|-------------|
/// | [`SHALLOW`](Self::SHALLOW) (default) | 0 |
/// | [`STANDARD`](Self::STANDARD) | 1 |
/// | [`DEEP`](Self::DEEP) | 3 |
///
/// All presets detect cycles and omit null fields.
///
/// # Example
///
/// ```rust
/// use autoapi_core::mapper::MappingConfig;
///
/// let config = MappingConfig::new(-4, true, false);
/// assert_eq!(config.max_depth(), 0);
///
/// let config = MappingConfig::STANDARD.include_null_fields(true);
/// assert!(config.includes_null_fields());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "RawMappingConfig")]
pub struct MappingConfig {
    max_depth:           u32,
    detect_cycles:       bool,
    include_null_fields: bool
}

impl MappingConfig {
    /// Identities only.
    pub const SHALLOW: Self = Self::preset(0);

    /// One level of nested relations.
    pub const STANDARD: Self = Self::preset(1);

    /// Three levels of nested relations.
    pub const DEEP: Self = Self::preset(3);

    const fn preset(max_depth: u32) -> Self {
        Self {
            max_depth,
            detect_cycles: true,
            include_null_fields: false
        }
    }

    /// Build a config; negative depths become 0.
    #[must_use]
    pub fn new(max_depth: i64, detect_cycles: bool, include_null_fields: bool) -> Self {
        Self {
            max_depth: clamp_depth(max_depth),
            detect_cycles,
            include_null_fields
        }
    }

    /// Relation hops that may be expanded into nested maps.
    #[must_use]
    pub const fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Check if references back into the active path are truncated.
    #[must_use]
    pub const fn detects_cycles(&self) -> bool {
        self.detect_cycles
    }

    /// Check if null fields are emitted.
    #[must_use]
    pub const fn includes_null_fields(&self) -> bool {
        self.include_null_fields
    }

    /// Set the maximum depth.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Enable or disable cycle detection.
    #[must_use]
    pub const fn detect_cycles(mut self, detect: bool) -> Self {
        self.detect_cycles = detect;
        self
    }

    /// Emit or omit null fields.
    #[must_use]
    pub const fn include_null_fields(mut self, include: bool) -> Self {
        self.include_null_fields = include;
        self
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self::SHALLOW
    }
}

fn clamp_depth(depth: i64) -> u32 {
    u32::try_from(depth.max(0)).unwrap_or(u32::MAX)
}

/// Wire form; accepts negative depths so they can be clamped.
#[derive(Deserialize)]
#[serde(default)]
struct RawMappingConfig {
    max_depth:           i64,
    detect_cycles:       bool,
    include_null_fields: bool
}

impl Default for RawMappingConfig {
    fn default() -> Self {
        Self {
            max_depth:           0,
            detect_cycles:       true,
            include_null_fields: false
        }
    }
}

impl From<RawMappingConfig> for MappingConfig {
    fn from(raw: RawMappingConfig) -> Self {
        Self::new(raw.max_depth, raw.detect_cycles, raw.include_null_fields)
    }
}
