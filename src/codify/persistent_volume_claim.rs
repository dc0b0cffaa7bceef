use super::Codify;
use crate::api::core::v1::PersistentVolumeClaim;
use crate::normalize::{clean_object_meta, NormalizeOptions};

impl Codify for PersistentVolumeClaim {
    const VARIABLE_SUFFIX: &'static str = "persistent_volume_claim";

    /// Status is owned by the control plane, and storage requests depend on
    /// the target cluster, so both are cleared.
    fn normalize(&mut self, options: &NormalizeOptions) {
        self.metadata = clean_object_meta(&self.metadata, options);
        self.status = None;
        if let Some(spec) = self.spec.as_mut() {
            spec.resources = None;
        }
    }
}
