//! Semantic checks run after the TOML has been deserialized.
//!
//! [`PluginConfig::problems`] reports what is wrong without any source text,
//! so configurations built in code are checked the same way as loaded ones.
//! [`validate_config`] turns the first problem into a spanned error.

use std::{collections::HashSet, fmt};

use entigen_ir::{IdentityError, TypeIdentity, validate_segment};

use crate::{AnnotationSpec, PluginConfig, Result, error::SourceContext};

/// Something wrong with a configuration, keyed by its dotted TOML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigProblem {
    /// A package or annotation name that is not a valid identifier segment.
    InvalidSegment {
        key: String,
        value: String,
        reason: &'static str,
    },
    /// Any other rule, pointing at `value` when there is one.
    Invalid {
        key: String,
        value: Option<String>,
        message: String,
    },
}

impl ConfigProblem {
    pub fn key(&self) -> &str {
        match self {
            ConfigProblem::InvalidSegment { key, .. } | ConfigProblem::Invalid { key, .. } => key,
        }
    }

    fn invalid(key: impl Into<String>, value: Option<&str>, message: impl Into<String>) -> Self {
        ConfigProblem::Invalid {
            key: key.into(),
            value: value.map(str::to_string),
            message: message.into(),
        }
    }

    fn into_error(self, ctx: &SourceContext) -> Box<crate::Error> {
        match self {
            ConfigProblem::InvalidSegment { key, value, reason } => {
                ctx.invalid_segment_error(key, &value, reason)
            }
            ConfigProblem::Invalid { value, message, .. } => {
                ctx.validation_error(message, value.as_deref())
            }
        }
    }
}

impl fmt::Display for ConfigProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigProblem::InvalidSegment { key, value, reason } => {
                write!(f, "invalid {} '{}': {}", key, value, reason)
            }
            ConfigProblem::Invalid { message, .. } => f.write_str(message),
        }
    }
}

impl PluginConfig {
    /// Every problem in this configuration, in key order.
    pub fn problems(&self) -> Vec<ConfigProblem> {
        let mut problems = Vec::new();

        check_segment(&mut problems, "packages.primary_key", &self.packages.primary_key);
        check_segment(&mut problems, "packages.example", &self.packages.example);
        if self.packages.primary_key == self.packages.example {
            problems.push(ConfigProblem::invalid(
                "packages.example",
                Some(&self.packages.example),
                "primary key and example types cannot share a subpackage",
            ));
        }

        if self.capabilities.is_empty() {
            problems.push(ConfigProblem::invalid(
                "capabilities",
                None,
                "at least one capability annotation is required",
            ));
        }

        let mut seen = HashSet::new();
        for (i, spec) in self.capabilities.iter().enumerate() {
            let key = format!("capabilities[{}]", i);
            check_annotation(&mut problems, &key, "name", spec);
            if !seen.insert(spec.name.as_str()) {
                problems.push(ConfigProblem::invalid(
                    format!("{}.name", key),
                    Some(&spec.name),
                    format!("duplicate capability annotation '{}'", spec.name),
                ));
            }
        }

        check_annotation(
            &mut problems,
            "documentation",
            "annotation",
            &self.documentation.spec(),
        );
        problems
    }
}

/// Validate a parsed configuration against its source.
pub(crate) fn validate_config(config: &PluginConfig, ctx: &SourceContext) -> Result<()> {
    match config.problems().into_iter().next() {
        Some(problem) => Err(problem.into_error(ctx)),
        None => Ok(()),
    }
}

fn check_segment(problems: &mut Vec<ConfigProblem>, key: &str, value: &str) {
    if let Some(reason) = validate_segment(value) {
        problems.push(ConfigProblem::InvalidSegment {
            key: key.to_string(),
            value: value.to_string(),
            reason,
        });
    }
}

/// `name_key` is the key holding the annotation name under `table`.
fn check_annotation(
    problems: &mut Vec<ConfigProblem>,
    table: &str,
    name_key: &str,
    spec: &AnnotationSpec,
) {
    check_segment(problems, &format!("{}.{}", table, name_key), &spec.name);

    let Some(import) = &spec.import else {
        return;
    };
    let key = format!("{}.import", table);

    match import.parse::<TypeIdentity>() {
        Ok(identity) if identity.simple_name() != spec.name => {
            problems.push(ConfigProblem::invalid(
                key,
                Some(import),
                format!("import '{}' does not name annotation '{}'", import, spec.name),
            ));
        }
        Ok(_) => {}
        Err(IdentityError::EmptyPackage) => problems.push(ConfigProblem::invalid(
            key,
            Some(import),
            format!("import '{}' must be fully qualified", import),
        )),
        Err(IdentityError::InvalidSegment { segment, reason }) => {
            problems.push(ConfigProblem::InvalidSegment {
                key,
                value: segment,
                reason,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn check(src: &str) -> Result<()> {
        let config: PluginConfig = toml::from_str(src).expect("Failed to parse test config");
        validate_config(&config, &SourceContext::new(src, "entigen.toml"))
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(check("").is_ok());
        assert!(PluginConfig::default().problems().is_empty());
    }

    #[test]
    fn test_invalid_package_segment() {
        let err = check(
            r#"
            [packages]
            primary_key = "pk-types"
        "#,
        )
        .unwrap_err();
        assert!(matches!(
            *err,
            Error::InvalidSegment { ref field, .. } if field == "packages.primary_key"
        ));
    }

    #[test]
    fn test_shared_subpackage() {
        let err = check(
            r#"
            [packages]
            primary_key = "aux"
            example = "aux"
        "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("share a subpackage"));
    }

    #[test]
    fn test_empty_capabilities() {
        let err = check("capabilities = []").unwrap_err();
        assert!(err.to_string().contains("at least one"));
    }

    #[test]
    fn test_duplicate_capability() {
        let err = check(
            r#"
            [[capabilities]]
            name = "Data"

            [[capabilities]]
            name = "Data"
        "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate capability"));
    }

    #[test]
    fn test_import_must_name_annotation() {
        let err = check(
            r#"
            [documentation]
            annotation = "Schema"
            import = "io.swagger.annotations.ApiModelProperty"
        "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("does not name annotation 'Schema'"));
    }

    #[test]
    fn test_custom_doc_annotation_without_import() {
        let src = r#"
            [documentation]
            annotation = "Schema"
        "#;
        assert!(check(src).is_ok());
    }

    #[test]
    fn test_import_must_be_qualified() {
        let err = check(
            r#"
            [[capabilities]]
            name = "Data"
            import = "Data"
        "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("fully qualified"));
    }

    #[test]
    fn test_invalid_import_segment() {
        let err = check(
            r#"
            [[capabilities]]
            name = "Data"
            import = "lombok.9.Data"
        "#,
        )
        .unwrap_err();
        assert!(matches!(
            *err,
            Error::InvalidSegment { ref field, ref value, .. }
                if value == "9" && field == "capabilities[0].import"
        ));
    }

    #[test]
    fn test_problems_of_config_built_in_code() {
        let mut config = PluginConfig::default();
        config.capabilities.clear();
        config.documentation.annotation = "class".to_string();
        config.documentation.import = Some(String::new());

        let keys: Vec<String> = config
            .problems()
            .iter()
            .map(|p| p.key().to_string())
            .collect();
        assert_eq!(keys, ["capabilities", "documentation.annotation"]);
        assert_eq!(
            config.problems()[1].to_string(),
            "invalid documentation.annotation 'class': segment is a reserved word"
        );
    }
}
