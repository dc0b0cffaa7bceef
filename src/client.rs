//! Live API client seam.
//!
//! The generator never talks to a cluster itself. When the caller hands it a
//! [`ResourceClient`], install and uninstall apply their operation right away
//! and surface any failure as a [`RemoteOperationError`]. There is no retry,
//! backoff or timeout here; that policy belongs to the implementation.

use crate::error::RemoteOperationError;
use crate::resource::DynamicObject;

/// Blocking create/delete against a management API.
pub trait ResourceClient {
    /// Create `object` in `namespace`.
    fn create(&self, namespace: &str, object: &DynamicObject) -> Result<(), RemoteOperationError>;

    /// Delete the object of `kind` named `name` in `namespace`.
    fn delete(&self, kind: &str, namespace: &str, name: &str) -> Result<(), RemoteOperationError>;
}
