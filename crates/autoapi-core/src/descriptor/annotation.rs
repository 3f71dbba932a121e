// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Structural markers attached to entity types and fields.
//!
//! Annotations are raw declarations. The resolver decodes them into the
//! boolean flags and configurations of
//! [`EntityMetadata`](crate::metadata::EntityMetadata); nothing downstream
//! of the resolver inspects annotations directly.
//!
//! # Type Annotations
//!
//! | Annotation | Effect |
//! |------------|--------|
//! | `AutoApi` | Marks the type as an exposed entity (required) |
//! | `Table` | Storage name override |
//! | `SharedBase` | Fields are inherited by types that embed this one |
//! | `SoftDelete` | Soft-delete bookkeeping field names |
//! | `Auditable` | Audit bookkeeping field names |
//!
//! # Field Annotations
//!
//! | Annotation | Flag |
//! |------------|------|
//! | `Id`, `EmbeddedId` | `is_id`, `read_only` |
//! | `Version` | `is_version` |
//! | `Hidden` | `hidden` |
//! | `ReadOnly` | `read_only` |
//! | `Transient` | field skipped |
//! | `JsonIgnore` | `json_ignored` |
//! | `Column { nullable: false }`, `NotNull`, `NotBlank` | `nullable = false` |
//! | `OneToOne`, `ManyToOne`, `OneToMany`, `ManyToMany` | relation kind |

use crate::filter::FilterConfig;

/// Marker on an entity type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotation {
    /// Exposes the type as an entity.
    AutoApi(ApiConfig),
    /// Storage (table) name.
    Table(String),
    /// Type whose fields are inherited by embedding types.
    SharedBase,
    /// Soft-delete configuration.
    SoftDelete(SoftDeleteConfig),
    /// Audit configuration.
    Auditable(AuditConfig)
}

/// Marker on an entity field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldAnnotation {
    /// Identity field.
    Id,
    /// Composite identity field.
    EmbeddedId,
    /// Optimistic-lock version field.
    Version,
    /// Never exposed on the wire, in either direction.
    Hidden,
    /// Exposed on output, never written from input.
    ReadOnly,
    /// Not part of the entity structure.
    Transient,
    /// Ignored by external JSON serializers.
    JsonIgnore,
    /// Value generated by the storage layer.
    Generated(GenerationType),
    /// Storage column options.
    Column {
        /// Whether the column accepts null.
        nullable: bool
    },
    /// Validation constraint.
    Constraint(Constraint),
    /// Filter configuration.
    Filterable(FilterConfig),
    /// One-to-one relation.
    OneToOne {
        /// Field on the other side that owns the relation.
        mapped_by: Option<String>
    },
    /// Many-to-one relation.
    ManyToOne,
    /// One-to-many relation.
    OneToMany {
        /// Field on the other side that owns the relation.
        mapped_by: Option<String>
    },
    /// Many-to-many relation.
    ManyToMany {
        /// Field on the other side that owns the relation.
        mapped_by: Option<String>
    }
}

/// Identity generation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationType {
    /// Storage layer decides.
    #[default]
    Auto,
    /// Identity / auto-increment column.
    Identity,
    /// Database sequence.
    Sequence,
    /// Random UUID.
    Uuid
}

/// Which operations a transport should expose for an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Expose {
    /// Every operation.
    #[default]
    All,
    /// Read operations only.
    ReadOnly,
    /// Create and update without delete.
    CreateUpdate,
    /// Operations are chosen by the application.
    Custom
}

/// Exposure configuration of an entity.
///
/// Carried through metadata for transport collaborators; the engine itself
/// only reads [`ApiConfig::path`] to fill the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base path. `None` lets the resolver derive it from the type name.
    pub path:        Option<String>,
    /// Exposed operations.
    pub expose:      Expose,
    /// Whether list operations are paginated.
    pub pagination:  bool,
    /// Whether list operations accept sorting.
    pub sorting:     bool,
    /// Human-readable description.
    pub description: Option<String>,
    /// Grouping tags.
    pub tags:        Vec<String>
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            path:        None,
            expose:      Expose::All,
            pagination:  true,
            sorting:     true,
            description: None,
            tags:        Vec::new()
        }
    }
}

impl ApiConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set exposed operations.
    #[must_use]
    pub fn expose(mut self, expose: Expose) -> Self {
        self.expose = expose;
        self
    }

    /// Enable or disable pagination.
    #[must_use]
    pub fn pagination(mut self, enabled: bool) -> Self {
        self.pagination = enabled;
        self
    }

    /// Enable or disable sorting.
    #[must_use]
    pub fn sorting(mut self, enabled: bool) -> Self {
        self.sorting = enabled;
        self
    }

    /// Set the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a tag.
    #[must_use]
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }
}

/// Soft-delete bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftDeleteConfig {
    /// Boolean "deleted" flag field.
    pub deleted_field:    String,
    /// Deletion timestamp field.
    pub deleted_at_field: String
}

impl Default for SoftDeleteConfig {
    fn default() -> Self {
        Self {
            deleted_field:    "deleted".to_owned(),
            deleted_at_field: "deleted_at".to_owned()
        }
    }
}

/// Audit bookkeeping fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    /// Whether entity history is versioned.
    pub versioned:        bool,
    /// Creation timestamp field.
    pub created_at_field: String,
    /// Update timestamp field.
    pub updated_at_field: String,
    /// Creator field.
    pub created_by_field: String,
    /// Last updater field.
    pub updated_by_field: String
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            versioned:        false,
            created_at_field: "created_at".to_owned(),
            updated_at_field: "updated_at".to_owned(),
            created_by_field: "created_by".to_owned(),
            updated_by_field: "updated_by".to_owned()
        }
    }
}

/// Validation constraint declared on a field.
///
/// Constraints are recorded in metadata for validation collaborators and
/// schema generators. `NotNull` and `NotBlank` also make a field
/// non-nullable.
#[derive(Debug, Clone, PartialEq)]
pub enum Constraint {
    /// Value must be present.
    NotNull,
    /// Text must contain a non-whitespace character.
    NotBlank,
    /// Text or collection must not be empty.
    NotEmpty,
    /// Length bounds.
    Length {
        /// Minimum length.
        min: Option<usize>,
        /// Maximum length.
        max: Option<usize>
    },
    /// Numeric bounds.
    Range {
        /// Minimum value.
        min: Option<f64>,
        /// Maximum value.
        max: Option<f64>
    },
    /// Email address.
    Email,
    /// URL.
    Url,
    /// Regular expression.
    Pattern(String),
    /// Instant in the past.
    Past,
    /// Instant in the past or now.
    PastOrPresent,
    /// Instant in the future.
    Future,
    /// Instant in the future or now.
    FutureOrPresent,
    /// Must be `true`.
    AssertTrue,
    /// Must be `false`.
    AssertFalse
}

impl Constraint {
    /// Constraint name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::NotNull => "NotNull",
            Self::NotBlank => "NotBlank",
            Self::NotEmpty => "NotEmpty",
            Self::Length { .. } => "Length",
            Self::Range { .. } => "Range",
            Self::Email => "Email",
            Self::Url => "Url",
            Self::Pattern(_) => "Pattern",
            Self::Past => "Past",
            Self::PastOrPresent => "PastOrPresent",
            Self::Future => "Future",
            Self::FutureOrPresent => "FutureOrPresent",
            Self::AssertTrue => "AssertTrue",
            Self::AssertFalse => "AssertFalse"
        }
    }

    /// Check if this constraint forbids null.
    #[must_use]
    pub const fn forbids_null(&self) -> bool {
        matches!(self, Self::NotNull | Self::NotBlank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_builder() {
        let config = ApiConfig::new()
            .path("/people")
            .expose(Expose::ReadOnly)
            .pagination(false)
            .tag("crm")
            .tag("people");
        assert_eq!(config.path.as_deref(), Some("/people"));
        assert_eq!(config.expose, Expose::ReadOnly);
        assert!(!config.pagination);
        assert!(config.sorting);
        assert_eq!(config.tags, vec!["crm".to_owned(), "people".to_owned()]);
    }

    #[test]
    fn bookkeeping_defaults() {
        assert_eq!(SoftDeleteConfig::default().deleted_field, "deleted");
        assert_eq!(SoftDeleteConfig::default().deleted_at_field, "deleted_at");
        let audit = AuditConfig::default();
        assert!(!audit.versioned);
        assert_eq!(audit.updated_by_field, "updated_by");
    }

    #[test]
    fn constraints_forbidding_null() {
        assert!(Constraint::NotNull.forbids_null());
        assert!(Constraint::NotBlank.forbids_null());
        assert!(!Constraint::NotEmpty.forbids_null());
        assert_eq!(
            Constraint::Length {
                min: Some(1),
                max: None
            }
            .name(),
            "Length"
        );
    }
}
