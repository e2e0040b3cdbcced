//! TOML configuration for the entigen entity plugin.
//!
//! Every key is optional; the defaults reproduce the stock behaviour
//! (`key`/`example` subpackages, the Lombok capability bundle and Swagger
//! field documentation).

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod config;
mod error;
mod parse;
mod validate;

pub use config::{AnnotationSpec, DocumentationConfig, EntityConfig, PackagesConfig, PluginConfig};
pub use error::{Error, Result, SourceContext};
pub use parse::{CONFIG_FILE, parse_config};
pub use validate::ConfigProblem;
