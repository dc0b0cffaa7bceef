use std::collections::HashMap;

use super::expr::Symbol;
use crate::error::EncodingError;

/// Package path of the core API kinds.
pub const CORE_V1: &str = "kodify::api::core::v1";
/// Package path of the shared metadata types.
pub const META_V1: &str = "kodify::api::meta::v1";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Entry {
    Package(String),
    Opaque,
}

/// Resolves the type names that `Serialize` impls report to package paths.
///
/// serde only hands a serializer the bare type name (`"ObjectMeta"`), so the
/// encoder needs this table to emit a path the generated code can resolve.
/// Names registered as opaque are known to have no literal form.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    entries: HashMap<String, Entry>,
}

impl SymbolTable {
    /// An empty table; every named type is unknown.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Table covering every type under [`crate::api`].
    pub fn builtin() -> Self {
        Self::empty()
            .with_package(
                CORE_V1,
                &[
                    "ByteString",
                    "ConfigMap",
                    "PersistentVolumeClaim",
                    "PersistentVolumeClaimCondition",
                    "PersistentVolumeClaimSpec",
                    "PersistentVolumeClaimStatus",
                    "Quantity",
                    "TypedLocalObjectReference",
                    "TypedObjectReference",
                    "VolumeResourceRequirements",
                ],
            )
            .with_package(
                META_V1,
                &[
                    "LabelSelector",
                    "LabelSelectorRequirement",
                    "ManagedFieldsEntry",
                    "ObjectMeta",
                    "OwnerReference",
                    "Time",
                ],
            )
            .with_opaque("FieldsV1")
    }

    pub fn with_package(mut self, package: &str, names: &[&str]) -> Self {
        for name in names {
            self.register(name, package);
        }
        self
    }

    pub fn with_opaque(mut self, name: &str) -> Self {
        self.register_opaque(name);
        self
    }

    pub fn register(&mut self, name: &str, package: &str) {
        self.entries
            .insert(name.to_string(), Entry::Package(package.to_string()));
    }

    pub fn register_opaque(&mut self, name: &str) {
        self.entries.insert(name.to_string(), Entry::Opaque);
    }

    /// # Errors
    ///
    /// [`EncodingError::UnknownType`] for unregistered names,
    /// [`EncodingError::OpaqueType`] for opaque ones.
    pub fn resolve(&self, name: &str) -> Result<Symbol, EncodingError> {
        match self.entries.get(name) {
            Some(Entry::Package(package)) => Ok(Symbol::new(Some(package), name)),
            Some(Entry::Opaque) => Err(EncodingError::OpaqueType {
                type_name: name.to_string(),
            }),
            None => Err(EncodingError::UnknownType {
                type_name: name.to_string(),
            }),
        }
    }
}
