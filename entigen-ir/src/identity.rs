//! Fully-qualified type identities.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reserved words that cannot appear as a package segment or simple name.
pub(crate) const RESERVED_WORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "final", "finally", "float",
    "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "package", "private", "protected", "public", "return", "short", "static",
    "strictfp", "super", "switch", "synchronized", "this", "throw", "throws", "transient", "try",
    "void", "volatile", "while",
    // Literals
    "true", "false", "null",
];

/// Why an identity could not be built or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("type identity has an empty package path")]
    EmptyPackage,

    #[error("invalid segment '{segment}': {reason}")]
    InvalidSegment {
        segment: String,
        reason: &'static str,
    },
}

/// Check a single package segment or simple name.
///
/// Returns `None` if valid, `Some(reason)` otherwise.
pub fn validate_segment(segment: &str) -> Option<&'static str> {
    if RESERVED_WORDS.contains(&segment) {
        return Some("segment is a reserved word");
    }

    let mut chars = segment.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        Some(_) => return Some("segment must start with a letter, '_' or '$'"),
        None => return Some("segment cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_' || c == '$')) {
        return Some("segment must contain only letters, digits, '_' and '$'");
    }

    None
}

fn check_segment(segment: &str) -> Result<(), IdentityError> {
    match validate_segment(segment) {
        Some(reason) => Err(IdentityError::InvalidSegment {
            segment: segment.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// A package path plus simple name identifying one generated type.
///
/// Identities are values: relocating a type builds a new identity rather
/// than mutating the existing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentity {
    package_path: Vec<String>,
    simple_name: String,
}

impl TypeIdentity {
    /// Create an identity without validating it.
    ///
    /// Hosts hand over whatever identity they computed; [`TypeIdentity::validate`]
    /// is run at the point where a malformed path matters.
    pub fn new<I, S>(package_path: I, simple_name: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            package_path: package_path.into_iter().map(Into::into).collect(),
            simple_name: simple_name.into(),
        }
    }

    pub fn package_path(&self) -> &[String] {
        &self.package_path
    }

    pub fn simple_name(&self) -> &str {
        &self.simple_name
    }

    /// Check that the package path is non-empty and every part is a valid segment.
    pub fn validate(&self) -> Result<(), IdentityError> {
        if self.package_path.is_empty() {
            return Err(IdentityError::EmptyPackage);
        }
        for segment in &self.package_path {
            check_segment(segment)?;
        }
        check_segment(&self.simple_name)
    }

    /// Build a copy of this identity with `segment` appended to the package path.
    ///
    /// The simple name is preserved.
    pub fn with_segment(&self, segment: &str) -> Result<Self, IdentityError> {
        self.validate()?;
        check_segment(segment)?;

        let mut package_path = self.package_path.clone();
        package_path.push(segment.to_string());
        Ok(Self {
            package_path,
            simple_name: self.simple_name.clone(),
        })
    }
}

impl fmt::Display for TypeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.package_path {
            write!(f, "{}.", segment)?;
        }
        write!(f, "{}", self.simple_name)
    }
}

impl FromStr for TypeIdentity {
    type Err = IdentityError;

    /// Parse a dotted name such as `com.x.model.User`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<&str> = s.split('.').collect();
        let simple_name = parts.pop().unwrap_or_default();
        let identity = Self::new(parts, simple_name);
        identity.validate()?;
        Ok(identity)
    }
}
