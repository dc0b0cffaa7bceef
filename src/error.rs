//! Error types for literal encoding, snippet rendering and remote operations.

use std::fmt;

/// A value (or part of one) has no literal representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EncodingError {
    /// A named type is missing from the [`crate::literal::SymbolTable`]
    UnknownType {
        /// Type name as reported by its `Serialize` impl
        type_name: String,
    },
    /// A named type is registered as having no literal form
    OpaqueType {
        /// Type name as reported by its `Serialize` impl
        type_name: String,
    },
    /// The value's `Serialize` impl failed
    Custom(String),
    /// Any of the above, located at a field path such as `metadata.managedFields[0].fieldsV1`
    Field {
        /// Dotted wire path of the failing field
        path: String,
        /// Underlying failure
        source: Box<EncodingError>,
    },
}

impl EncodingError {
    /// Attach `path` unless the error is already located.
    pub fn at(self, path: String) -> Self {
        match self {
            located @ EncodingError::Field { .. } => located,
            other => EncodingError::Field {
                path,
                source: Box::new(other),
            },
        }
    }

    /// Field path of a located error.
    pub fn path(&self) -> Option<&str> {
        match self {
            EncodingError::Field { path, .. } => Some(path),
            _ => None,
        }
    }
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::UnknownType { type_name } => {
                write!(f, "type '{type_name}' has no registered package")
            }
            EncodingError::OpaqueType { type_name } => {
                write!(f, "type '{type_name}' has no literal representation")
            }
            EncodingError::Custom(msg) => write!(f, "{msg}"),
            EncodingError::Field { path, source } => write!(f, "{path}: {source}"),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodingError::Field { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl serde::ser::Error for EncodingError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        EncodingError::Custom(msg.to_string())
    }
}

/// A snippet template failed to parse or render.
#[derive(Debug)]
pub struct TemplateError {
    /// Template name (`install.rs`, `uninstall.rs`)
    pub template: String,
    /// Underlying minijinja failure
    pub source: minijinja::Error,
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "template '{}' failed: {}", self.template, self.source)
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// A create or delete call against the live client failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOperationError {
    /// `create` or `delete`
    pub operation: &'static str,
    /// Kind of the object the call targeted
    pub kind: String,
    /// `namespace/name` of the object the call targeted
    pub object: String,
    /// Client-supplied failure description
    pub message: String,
}

impl RemoteOperationError {
    pub fn new(
        operation: &'static str,
        kind: impl Into<String>,
        object: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind: kind.into(),
            object: object.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for RemoteOperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} '{}' failed: {}",
            self.operation, self.kind, self.object, self.message
        )
    }
}

impl std::error::Error for RemoteOperationError {}

/// Failure of a whole install or uninstall call.
#[derive(Debug)]
pub enum GenerateError {
    /// Encoding failed under [`crate::config::ErrorPolicy::Fail`]
    Encoding(EncodingError),
    /// Rendering failed under [`crate::config::ErrorPolicy::Fail`]
    Template(TemplateError),
    /// The live client rejected the operation
    Remote(RemoteOperationError),
    /// The object could not be captured as a [`crate::DynamicObject`]
    Object(serde_json::Error),
}

impl fmt::Display for GenerateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateError::Encoding(e) => write!(f, "encoding failed: {e}"),
            GenerateError::Template(e) => write!(f, "{e}"),
            GenerateError::Remote(e) => write!(f, "{e}"),
            GenerateError::Object(e) => write!(f, "object capture failed: {e}"),
        }
    }
}

impl std::error::Error for GenerateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerateError::Encoding(e) => Some(e),
            GenerateError::Template(e) => Some(e),
            GenerateError::Remote(e) => Some(e),
            GenerateError::Object(e) => Some(e),
        }
    }
}

impl From<EncodingError> for GenerateError {
    fn from(e: EncodingError) -> Self {
        GenerateError::Encoding(e)
    }
}

impl From<TemplateError> for GenerateError {
    fn from(e: TemplateError) -> Self {
        GenerateError::Template(e)
    }
}

impl From<RemoteOperationError> for GenerateError {
    fn from(e: RemoteOperationError) -> Self {
        GenerateError::Remote(e)
    }
}

impl From<serde_json::Error> for GenerateError {
    fn from(e: serde_json::Error) -> Self {
        GenerateError::Object(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_keeps_innermost_path() {
        let err = EncodingError::OpaqueType {
            type_name: "FieldsV1".to_string(),
        }
        .at("metadata.managedFields[0].fieldsV1".to_string())
        .at("metadata".to_string());
        assert_eq!(err.path(), Some("metadata.managedFields[0].fieldsV1"));
        assert_eq!(
            err.to_string(),
            "metadata.managedFields[0].fieldsV1: type 'FieldsV1' has no literal representation"
        );
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteOperationError::new("create", "ConfigMap", "apps/settings", "forbidden");
        assert_eq!(
            err.to_string(),
            "create ConfigMap 'apps/settings' failed: forbidden"
        );
    }
}
