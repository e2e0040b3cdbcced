//! Entity customization hooks for a schema-driven class generator.
//!
//! The host generator builds a base entity, a primary-key class and a query
//! example class for every table, and calls back into [`GeneratorHooks`]
//! while doing so. [`EntityPlugin`] uses those callbacks to document classes
//! and fields, attach a capability annotation bundle, suppress accessor
//! generation, and relocate the primary-key and example types into their own
//! subpackages.
//!
//! # Module Organization
//!
//! - [`hooks`] - The callback contract ([`GeneratorHooks`], [`Hook`])
//! - [`entity`] - The entity plugin
//! - [`annotator`] - Column documentation to field documentation
//! - [`rewriter`] - Type identity relocation
//! - [`pipeline`] - Reference host pass driving the hooks over tables

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod annotator;
mod context;
mod diagnostic;
pub mod entity;
mod error;
pub mod hooks;
pub mod pipeline;
pub mod rewriter;

pub use context::{AuxiliaryTypes, GenerationContext};
pub use diagnostic::{Diagnostic, Severity};
pub use entity::EntityPlugin;
pub use error::{Error, Result};
pub use hooks::{GeneratorHooks, Hook};
pub use pipeline::{GeneratedClass, GenerationReport, Pipeline, TableInput, TableOutput};
