//! # Resources
//!
//! The [`Resource`] trait ties a typed API object to its kind and metadata,
//! and [`DynamicObject`] is the type-erased form that flows into the
//! [`crate::Registry`] and the [`crate::ResourceClient`].

use serde::{Deserialize, Serialize};

use crate::api::meta::v1::ObjectMeta;

/// A typed API object with standard metadata.
pub trait Resource: Serialize {
    /// `apiVersion` of the kind (`v1`, `apps/v1`, ...)
    const API_VERSION: &'static str;
    /// `kind` of the object (`PersistentVolumeClaim`, ...)
    const KIND: &'static str;

    fn metadata(&self) -> &ObjectMeta;

    fn metadata_mut(&mut self) -> &mut ObjectMeta;

    /// Declared name, empty when unset.
    fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }

    fn namespace(&self) -> Option<&str> {
        self.metadata().namespace.as_deref()
    }
}

/// Type-erased API object.
///
/// `body` holds the full wire representation (camelCase JSON) including the
/// `apiVersion` and `kind` keys, so it can be sent to an API server as is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicObject {
    pub api_version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    pub body: serde_json::Value,
}

impl DynamicObject {
    /// Captures `object` in its wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the object's `Serialize` impl fails.
    pub fn from_resource<R: Resource>(object: &R) -> Result<Self, serde_json::Error> {
        let mut body = serde_json::to_value(object)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "apiVersion".to_string(),
                serde_json::Value::String(R::API_VERSION.to_string()),
            );
            map.insert(
                "kind".to_string(),
                serde_json::Value::String(R::KIND.to_string()),
            );
        }
        Ok(Self {
            api_version: R::API_VERSION.to_string(),
            kind: R::KIND.to_string(),
            namespace: object.namespace().map(str::to_string),
            name: object.name().to_string(),
            body,
        })
    }
}
