//! Model types shared between the host generator and entity plugins.
//!
//! The host introspects tables into [`TableMetadata`], builds one
//! [`ClassModel`] per [`ArtifactKind`], and hands each model to the plugin
//! hooks before rendering it.
//!
//! # Architecture
//!
//! ```text
//! table metadata → host (class models) → entigen-plugin hooks → host rendering
//! ```
//!
//! The types here carry no rendering or persistence concerns.

mod artifact;
mod class;
mod identity;
mod table;

pub use artifact::ArtifactKind;
pub use class::{Annotation, ClassModel, FieldModel, MethodKind, MethodModel};
pub use identity::{IdentityError, TypeIdentity, validate_segment};
pub use table::{ColumnMetadata, TableMetadata, non_blank};
