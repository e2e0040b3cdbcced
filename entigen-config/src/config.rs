//! Plugin configuration types.

use entigen_ir::{Annotation, IdentityError, TypeIdentity};
use serde::Deserialize;

/// Root configuration for the entity plugin.
///
/// Every section is optional; an empty document yields [`PluginConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Subpackages auxiliary types are relocated into
    #[serde(default)]
    pub packages: PackagesConfig,

    /// Base entity settings
    #[serde(default)]
    pub entity: EntityConfig,

    /// Capability annotations attached to base and primary-key classes
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<AnnotationSpec>,

    /// Annotation carrying field documentation
    #[serde(default)]
    pub documentation: DocumentationConfig,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            packages: PackagesConfig::default(),
            entity: EntityConfig::default(),
            capabilities: default_capabilities(),
            documentation: DocumentationConfig::default(),
        }
    }
}

impl PluginConfig {
    /// Build the capability bundle in configured order.
    pub fn capability_annotations(&self) -> Result<Vec<Annotation>, IdentityError> {
        self.capabilities
            .iter()
            .map(AnnotationSpec::to_annotation)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackagesConfig {
    #[serde(default = "default_primary_key_package")]
    pub primary_key: String,
    #[serde(default = "default_example_package")]
    pub example: String,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            primary_key: default_primary_key_package(),
            example: default_example_package(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    /// Appended to the class name when the table has no remarks
    #[serde(default = "default_doc_suffix")]
    pub doc_suffix: String,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            doc_suffix: default_doc_suffix(),
        }
    }
}

/// An annotation by simple name, with the type to import for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnnotationSpec {
    pub name: String,
    #[serde(default)]
    pub import: Option<String>,
}

impl AnnotationSpec {
    pub fn new(name: impl Into<String>, import: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import: Some(import.into()),
        }
    }

    pub fn to_annotation(&self) -> Result<Annotation, IdentityError> {
        let annotation = Annotation::new(&self.name);
        match &self.import {
            Some(import) => Ok(annotation.import(import.parse::<TypeIdentity>()?)),
            None => Ok(annotation),
        }
    }
}

/// The annotation mirroring field documentation.
///
/// `import` left out means the stock import for the stock annotation and no
/// import for any other; `import = ""` never imports.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DocumentationConfig {
    #[serde(default = "default_doc_annotation")]
    pub annotation: String,
    #[serde(default)]
    pub import: Option<String>,
}

impl Default for DocumentationConfig {
    fn default() -> Self {
        Self {
            annotation: default_doc_annotation(),
            import: None,
        }
    }
}

impl DocumentationConfig {
    /// The documentation annotation as an [`AnnotationSpec`], with its
    /// import resolved.
    pub fn spec(&self) -> AnnotationSpec {
        let import = match self.import.as_deref() {
            Some("") => None,
            Some(import) => Some(import.to_string()),
            None if self.annotation == DEFAULT_DOC_ANNOTATION => {
                Some(DEFAULT_DOC_IMPORT.to_string())
            }
            None => None,
        };
        AnnotationSpec {
            name: self.annotation.clone(),
            import,
        }
    }
}

fn default_primary_key_package() -> String {
    "key".to_string()
}

fn default_example_package() -> String {
    "example".to_string()
}

fn default_doc_suffix() -> String {
    " Entity".to_string()
}

fn default_capabilities() -> Vec<AnnotationSpec> {
    vec![
        AnnotationSpec::new("Data", "lombok.Data"),
        AnnotationSpec::new("AllArgsConstructor", "lombok.AllArgsConstructor"),
        AnnotationSpec::new("Builder", "lombok.Builder"),
    ]
}

const DEFAULT_DOC_ANNOTATION: &str = "ApiModelProperty";
const DEFAULT_DOC_IMPORT: &str = "io.swagger.annotations.ApiModelProperty";

fn default_doc_annotation() -> String {
    DEFAULT_DOC_ANNOTATION.to_string()
}
